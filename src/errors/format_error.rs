//! Error types for the binary tensor codec.

use thiserror::Error;

/// Errors raised when a byte buffer does not match its schema descriptor.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error(
        "Buffer length does not match schema: expected {expected} bytes for {element_count} f32 elements, got {actual}"
    )]
    ByteLengthMismatch {
        expected: usize,
        actual: usize,
        element_count: usize,
    },
}
