//! Scenario definitions and configuration loading.
//!
//! A scenario pairs a synthetic model and input with the external executables
//! that consume them. Configurations are JSON files with validated defaults,
//! so the harness runs out of the box against the conventional executable
//! names. Model and input data are generated deterministically; determinism
//! of the reference computation is part of the validation contract, so no RNG
//! is involved anywhere.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;

use crate::errors::{ConfigError, ConfigResult, ModelResult};
use crate::model::{ConvLayer, DenseLayer, Layer, Model};
use crate::tensor::Tensor;

/// Configuration for the dense-layer scenario.
///
/// Mirrors a `dim -> dim` fully connected layer applied `layer_count` times
/// with shared parameters, matching what the `run-linear` executables compute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseScenarioConfig {
    pub dim: usize,
    pub layer_count: usize,
    pub executable: String,
    pub parallel_suffix: String,
    pub accel_flag: String,
    pub timeout_secs: Option<u64>,
}

impl Default for DenseScenarioConfig {
    fn default() -> Self {
        Self {
            dim: 4096,
            layer_count: 100,
            executable: "./run-linear".to_string(),
            parallel_suffix: "-p".to_string(),
            accel_flag: "blas".to_string(),
            timeout_secs: None,
        }
    }
}

impl DenseScenarioConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.dim == 0 {
            return Err(ConfigError::Invalid {
                field: "dim".to_string(),
                message: "Dimension must be greater than 0".to_string(),
            });
        }
        if self.layer_count == 0 {
            return Err(ConfigError::Invalid {
                field: "layer_count".to_string(),
                message: "Layer count must be greater than 0".to_string(),
            });
        }
        if self.executable.is_empty() {
            return Err(ConfigError::Invalid {
                field: "executable".to_string(),
                message: "Executable path must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Configuration for the convolution scenario.
///
/// An input conv lifts `(in_channels, height, width)` to `hidden_channels`,
/// then one hidden conv is applied `layer_count` times with shared parameters,
/// matching what the `run-conv` executables compute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvScenarioConfig {
    pub in_channels: usize,
    pub height: usize,
    pub width: usize,
    pub hidden_channels: usize,
    pub kernel_size: usize,
    pub stride: usize,
    pub padding: usize,
    pub layer_count: usize,
    pub executable: String,
    pub parallel_suffix: String,
    pub accel_flag: String,
    pub timeout_secs: Option<u64>,
}

impl Default for ConvScenarioConfig {
    fn default() -> Self {
        Self {
            in_channels: 3,
            height: 28,
            width: 28,
            hidden_channels: 64,
            kernel_size: 3,
            stride: 1,
            padding: 1,
            layer_count: 100,
            executable: "./run-conv".to_string(),
            parallel_suffix: "-p".to_string(),
            accel_flag: "blas".to_string(),
            timeout_secs: None,
        }
    }
}

impl ConvScenarioConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [
            ("in_channels", self.in_channels),
            ("height", self.height),
            ("width", self.width),
            ("hidden_channels", self.hidden_channels),
            ("kernel_size", self.kernel_size),
            ("stride", self.stride),
            ("layer_count", self.layer_count),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    field: field.to_string(),
                    message: "Must be greater than 0".to_string(),
                });
            }
        }
        if self.kernel_size > self.height + 2 * self.padding
            || self.kernel_size > self.width + 2 * self.padding
        {
            return Err(ConfigError::Invalid {
                field: "kernel_size".to_string(),
                message: "Kernel does not fit the padded input".to_string(),
            });
        }
        if self.executable.is_empty() {
            return Err(ConfigError::Invalid {
                field: "executable".to_string(),
                message: "Executable path must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Configuration loader that handles JSON files with fallbacks
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a configuration file with fallback to defaults
    pub fn load_config<T: serde::de::DeserializeOwned + Default>(
        path: &str,
        config_name: &str,
    ) -> ConfigResult<T> {
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_string(),
                source,
            }),
            Err(_) => {
                warn!(
                    "Config file '{}' not found, using default configuration for {}",
                    path, config_name
                );
                Ok(T::default())
            }
        }
    }

    /// Load dense scenario configuration
    pub fn load_dense_config() -> ConfigResult<DenseScenarioConfig> {
        Self::load_config("configs/dense.json", "dense")
    }

    /// Load convolution scenario configuration
    pub fn load_conv_config() -> ConfigResult<ConvScenarioConfig> {
        Self::load_config("configs/conv.json", "conv")
    }
}

/// Deterministic pseudo-pattern in `[-0.5, 0.5)`, cheap and reproducible.
fn pattern_value(index: usize, seed: usize) -> f32 {
    let raw = (index.wrapping_mul(31).wrapping_add(seed.wrapping_mul(17))) % 97;
    raw as f32 / 97.0 - 0.5
}

/// Builds the shared dense layer model for the dense scenario.
///
/// Weights are scaled by `1 / dim` so repeated application stays bounded over
/// any layer count.
pub fn build_dense_model(config: &DenseScenarioConfig) -> ModelResult<Model> {
    let dim = config.dim;
    let scale = 1.0 / dim as f32;
    let weight: Vec<f32> = (0..dim * dim)
        .map(|index| pattern_value(index, 7) * scale)
        .collect();
    let bias: Vec<f32> = (0..dim).map(|index| pattern_value(index, 11) * 0.01).collect();

    let layer = Layer::Dense(DenseLayer::new(dim, dim, weight, Some(bias), false)?);
    Model::with_schedule(vec![layer], vec![0; config.layer_count])
}

/// Builds the dense scenario input tensor.
pub fn build_dense_input(config: &DenseScenarioConfig) -> Tensor {
    let values: Vec<f32> = (0..config.dim)
        .map(|index| pattern_value(index, 3) + 0.5)
        .collect();
    Tensor::from_vec(values)
}

/// Builds the conv scenario model: one input conv, then a shared hidden conv
/// applied `layer_count` times.
pub fn build_conv_model(config: &ConvScenarioConfig) -> ModelResult<Model> {
    let k = config.kernel_size;

    let in_patch = config.in_channels * k * k;
    let input_weight: Vec<f32> = (0..config.hidden_channels * in_patch)
        .map(|index| pattern_value(index, 13) / in_patch as f32)
        .collect();
    let input_bias: Vec<f32> = (0..config.hidden_channels)
        .map(|index| pattern_value(index, 17) * 0.01)
        .collect();
    let input_layer = Layer::Conv2d(ConvLayer::new(
        config.in_channels,
        config.hidden_channels,
        k,
        config.stride,
        config.padding,
        input_weight,
        Some(input_bias),
        false,
    )?);

    let hidden_patch = config.hidden_channels * k * k;
    let hidden_weight: Vec<f32> = (0..config.hidden_channels * hidden_patch)
        .map(|index| pattern_value(index, 19) / hidden_patch as f32)
        .collect();
    let hidden_bias: Vec<f32> = (0..config.hidden_channels)
        .map(|index| pattern_value(index, 23) * 0.01)
        .collect();
    let hidden_layer = Layer::Conv2d(ConvLayer::new(
        config.hidden_channels,
        config.hidden_channels,
        k,
        config.stride,
        config.padding,
        hidden_weight,
        Some(hidden_bias),
        false,
    )?);

    let mut schedule = vec![0];
    schedule.extend(std::iter::repeat(1).take(config.layer_count));
    Model::with_schedule(vec![input_layer, hidden_layer], schedule)
}

/// Builds the conv scenario input volume.
pub fn build_conv_input(config: &ConvScenarioConfig) -> ModelResult<Tensor> {
    let count = config.in_channels * config.height * config.width;
    let values: Vec<f32> = (0..count).map(|index| pattern_value(index, 5) + 0.5).collect();
    Tensor::new(values, vec![config.in_channels, config.height, config.width])
}
