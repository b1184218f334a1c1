//! Error types for parsing the captured variant output.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning the shared capture stream into numeric rows.
///
/// These are reported before any tolerance comparison is attempted.
#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("Failed to read capture file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(
        "Capture holds {actual} tokens but {num_variants} variants x {output_element_count} elements requires {expected}"
    )]
    TokenCountMismatch {
        expected: usize,
        actual: usize,
        num_variants: usize,
        output_element_count: usize,
    },

    #[error("Token {index} is not a decimal float: '{token}'")]
    TokenNotNumeric { index: usize, token: String },
}
