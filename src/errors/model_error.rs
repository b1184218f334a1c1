//! Error types for model construction and forward evaluation.

use thiserror::Error;

/// Errors that can occur while building a model or running the reference
/// forward pass.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Tensor data length {actual} does not match shape {shape:?} ({expected} elements)")]
    TensorShapeMismatch {
        expected: usize,
        actual: usize,
        shape: Vec<usize>,
    },

    #[error("At least one layer is required")]
    NoLayersProvided,

    #[error(
        "Dense weight must have {expected} elements for {out_features}x{in_features}, got {actual}"
    )]
    DenseWeightSizeMismatch {
        expected: usize,
        actual: usize,
        out_features: usize,
        in_features: usize,
    },

    #[error(
        "Conv weight must have {expected} elements for {out_channels}x{in_channels}x{kernel_size}x{kernel_size}, got {actual}"
    )]
    ConvWeightSizeMismatch {
        expected: usize,
        actual: usize,
        out_channels: usize,
        in_channels: usize,
        kernel_size: usize,
    },

    #[error("Bias must have {expected} elements, got {actual}")]
    BiasSizeMismatch { expected: usize, actual: usize },

    #[error("Layer dimensions must be greater than 0")]
    InvalidLayerDimensions,

    #[error("Conv stride must be greater than 0")]
    InvalidStride,

    #[error("Schedule entry {index} is out of bounds for {layer_count} layers")]
    ScheduleIndexOutOfBounds { index: usize, layer_count: usize },

    #[error("The schedule must contain at least one layer application")]
    EmptySchedule,

    #[error("Input has {actual} elements but the layer expects {expected}")]
    InputSizeMismatch { expected: usize, actual: usize },

    #[error(
        "Input shape {shape:?} is not a (channels, height, width) volume with {expected_channels} channels"
    )]
    InputVolumeMismatch {
        shape: Vec<usize>,
        expected_channels: usize,
    },

    #[error(
        "Kernel size {kernel_size} with padding {padding} does not fit a {height}x{width} input"
    )]
    KernelExceedsInput {
        kernel_size: usize,
        padding: usize,
        height: usize,
        width: usize,
    },
}
