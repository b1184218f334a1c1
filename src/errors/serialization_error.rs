//! Error types for artifact serialization.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing model or input artifacts.
#[derive(Error, Debug)]
pub enum SerializationError {
    #[error("Failed to create artifact file '{path}': {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write artifact file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
