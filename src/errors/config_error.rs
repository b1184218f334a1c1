//! Error types for scenario configuration loading.

use thiserror::Error;

/// Errors that can occur while loading or validating a scenario configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file '{path}': {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("Configuration validation error for field '{field}': {message}")]
    Invalid { field: String, message: String },

    #[error("Unknown scenario: '{name}'")]
    UnknownScenario { name: String },
}
