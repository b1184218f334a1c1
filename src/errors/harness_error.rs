//! Top-level error type covering every stage of a benchmark scenario.

use thiserror::Error;

use super::{
    ConfigError, FormatError, ModelError, ParsingError, ProcessError, SerializationError,
    ValidationError,
};

/// Umbrella error for the scenario pipeline.
///
/// Each variant corresponds to one stage of the linear pipeline; the first
/// failing stage aborts the scenario with its originating error.
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Serialization(#[from] SerializationError),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    Parsing(#[from] ParsingError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
