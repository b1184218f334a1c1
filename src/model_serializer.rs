//! Serialization of model and input artifacts.
//!
//! The external executables read the model and input by fixed filename
//! convention from their working directory, so the paths live in one place and
//! can be redirected to a scratch directory in tests.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::errors::{SerializationError, SerializationResult};
use crate::model::{Model, ParameterOrder};
use crate::tensor::Tensor;
use crate::tensor_codec::TensorCodec;

/// Filename the variant executables load the model parameters from.
pub const MODEL_FILE: &str = "model.pt";
/// Filename the variant executables load the input tensor from.
pub const INPUT_FILE: &str = "data.txt";
/// Filename the runner captures all variant stdout into.
pub const CAPTURE_FILE: &str = "stdout.txt";

/// The three artifact paths of one benchmark scenario, rooted at a directory.
///
/// Each scenario run overwrites all three; nothing else is persisted.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    dir: PathBuf,
}

impl ArtifactPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The working-directory convention the executables were built against.
    pub fn in_current_dir() -> Self {
        Self::new(".")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn model(&self) -> PathBuf {
        self.dir.join(MODEL_FILE)
    }

    pub fn input(&self) -> PathBuf {
        self.dir.join(INPUT_FILE)
    }

    pub fn capture(&self) -> PathBuf {
        self.dir.join(CAPTURE_FILE)
    }
}

/// Writes a model's parameter tensors, in policy order, to one binary file.
pub struct ModelSerializer {
    order: ParameterOrder,
}

impl Default for ModelSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelSerializer {
    pub fn new() -> Self {
        Self {
            order: ParameterOrder::default(),
        }
    }

    pub fn with_order(order: ParameterOrder) -> Self {
        Self { order }
    }

    /// Writes every parameter tensor sequentially with no delimiters,
    /// creating or overwriting the artifact.
    ///
    /// The traversal order must equal the executable's load order; that is the
    /// whole contract, since the format carries no shape or count metadata.
    pub fn write_model(&self, model: &Model, path: &Path) -> SerializationResult<()> {
        let file = File::create(path).map_err(|source| SerializationError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        let mut total_elements = 0usize;
        for tensor in model.parameter_tensors(self.order) {
            writer
                .write_all(&TensorCodec::encode(tensor.data()))
                .map_err(|source| SerializationError::Write {
                    path: path.to_path_buf(),
                    source,
                })?;
            total_elements += tensor.element_count();
        }
        writer.flush().map_err(|source| SerializationError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            "Serialized {} parameter elements ({} bytes) to {}",
            total_elements,
            total_elements * 4,
            path.display()
        );
        Ok(())
    }

    /// Writes the input tensor to its own artifact file.
    pub fn write_input(&self, input: &Tensor, path: &Path) -> SerializationResult<()> {
        let file = File::create(path).map_err(|source| SerializationError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(&TensorCodec::encode(input.data()))
            .map_err(|source| SerializationError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        writer.flush().map_err(|source| SerializationError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}
