//! Error types for numeric validation against the reference output.

use thiserror::Error;

/// Errors that can occur while comparing variant outputs to the reference.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error(
        "Variant {variant_index} deviates from reference at element {element_index}: expected {expected}, got {actual}, deviation {deviation}"
    )]
    ToleranceExceeded {
        variant_index: usize,
        element_index: usize,
        expected: f32,
        actual: f32,
        deviation: f32,
    },

    #[error("Variant rows have {row_len} elements but the reference has {reference_len}")]
    ReferenceLengthMismatch { row_len: usize, reference_len: usize },
}
