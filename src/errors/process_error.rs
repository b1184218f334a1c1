//! Error types for subprocess orchestration.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while launching or waiting on variant executables.
///
/// Any of these aborts the remaining run sequence; there is no partial
/// continuation or retry.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to open capture file '{path}': {source}")]
    CaptureFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to launch variant '{variant}' ({program}): {source}")]
    Launch {
        variant: String,
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("Variant '{variant}' exited with {status}: {stderr}")]
    ExitFailure {
        variant: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("Variant '{variant}' did not finish within {timeout:?} and was killed")]
    Timeout { variant: String, timeout: Duration },

    #[error("Failed waiting on variant '{variant}': {source}")]
    Wait {
        variant: String,
        source: std::io::Error,
    },

    #[error("Expected {expected} variant durations, got {actual}")]
    VariantCountMismatch { expected: usize, actual: usize },
}
