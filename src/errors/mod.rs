//! Error types for the benchmarking harness.
//!
//! This module contains specific error types used throughout the harness,
//! avoiding generic error wrappers like `anyhow` or `Box<dyn Error>` for better
//! error handling and debugging. Every error is fatal to the current benchmark
//! scenario: there is no local recovery, partial-result reporting, or retry.

mod config_error;
mod format_error;
mod harness_error;
mod model_error;
mod parsing_error;
mod process_error;
mod serialization_error;
mod validation_error;

pub use config_error::ConfigError;
pub use format_error::FormatError;
pub use harness_error::HarnessError;
pub use model_error::ModelError;
pub use parsing_error::ParsingError;
pub use process_error::ProcessError;
pub use serialization_error::SerializationError;
pub use validation_error::ValidationError;

/// Result type alias for tensor codec operations.
pub type CodecResult<T> = std::result::Result<T, FormatError>;

/// Result type alias for model construction and evaluation.
pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Result type alias for artifact serialization.
pub type SerializationResult<T> = std::result::Result<T, SerializationError>;

/// Result type alias for subprocess orchestration.
pub type ProcessResult<T> = std::result::Result<T, ProcessError>;

/// Result type alias for captured-output parsing.
pub type ParsingResult<T> = std::result::Result<T, ParsingError>;

/// Result type alias for numeric validation.
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for whole-scenario operations.
pub type HarnessResult<T> = std::result::Result<T, HarnessError>;
