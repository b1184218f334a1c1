//! Parsing and tolerance validation of captured variant output.
//!
//! The capture file holds `num_variants * output_element_count` whitespace
//! separated decimal float tokens in invocation order. Parsing reshapes them
//! into per-variant rows; validation compares each row element-wise against
//! the reference. Accelerated and parallel variants may reorder float
//! operations, so the comparison uses a combined tolerance rather than exact
//! equality, but a single out-of-tolerance element anywhere fails the whole
//! scenario.

use std::fs;
use std::path::Path;

use log::info;

use crate::errors::{
    HarnessResult, ParsingError, ParsingResult, ValidationError, ValidationResult,
};

/// The fixed combined relative/absolute error bound.
///
/// An element passes when `|actual - expected| <= atol + rtol * |expected|`.
#[derive(Debug, Clone, Copy)]
pub struct TolerancePolicy {
    pub rtol: f32,
    pub atol: f32,
}

impl Default for TolerancePolicy {
    fn default() -> Self {
        Self {
            rtol: 1e-5,
            atol: 1e-6,
        }
    }
}

impl TolerancePolicy {
    pub fn accepts(&self, actual: f32, expected: f32) -> bool {
        (actual - expected).abs() <= self.atol + self.rtol * expected.abs()
    }
}

/// Validates reshaped variant outputs against the reference computation.
pub struct ResultValidator {
    policy: TolerancePolicy,
}

impl Default for ResultValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultValidator {
    pub fn new() -> Self {
        Self {
            policy: TolerancePolicy::default(),
        }
    }

    pub fn with_policy(policy: TolerancePolicy) -> Self {
        Self { policy }
    }

    /// Parses capture text into `(num_variants, output_element_count)` rows.
    ///
    /// The token count is checked before any token is parsed; both a count
    /// mismatch and an unparseable token are fatal and reported before any
    /// numeric comparison is attempted.
    pub fn parse_capture(
        text: &str,
        num_variants: usize,
        output_element_count: usize,
    ) -> ParsingResult<Vec<Vec<f32>>> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let expected = num_variants * output_element_count;
        if output_element_count == 0 {
            return if tokens.is_empty() {
                Ok(vec![Vec::new(); num_variants])
            } else {
                Err(ParsingError::TokenCountMismatch {
                    expected,
                    actual: tokens.len(),
                    num_variants,
                    output_element_count,
                })
            };
        }
        if tokens.len() != expected {
            return Err(ParsingError::TokenCountMismatch {
                expected,
                actual: tokens.len(),
                num_variants,
                output_element_count,
            });
        }

        let mut values = Vec::with_capacity(expected);
        for (index, token) in tokens.iter().enumerate() {
            let value: f32 = token.parse().map_err(|_| ParsingError::TokenNotNumeric {
                index,
                token: token.to_string(),
            })?;
            values.push(value);
        }

        Ok(values
            .chunks_exact(output_element_count)
            .map(|row| row.to_vec())
            .collect())
    }

    /// Compares every variant row element-wise against the flattened
    /// reference.
    ///
    /// Fails on the first out-of-tolerance element, identifying the variant
    /// index, the element index, and the observed deviation. No averaging,
    /// no skipping.
    pub fn validate(&self, rows: &[Vec<f32>], reference: &[f32]) -> ValidationResult<()> {
        for (variant_index, row) in rows.iter().enumerate() {
            if row.len() != reference.len() {
                return Err(ValidationError::ReferenceLengthMismatch {
                    row_len: row.len(),
                    reference_len: reference.len(),
                });
            }
            for (element_index, (&actual, &expected)) in row.iter().zip(reference).enumerate() {
                if !self.policy.accepts(actual, expected) {
                    return Err(ValidationError::ToleranceExceeded {
                        variant_index,
                        element_index,
                        expected,
                        actual,
                        deviation: (actual - expected).abs(),
                    });
                }
            }
        }
        info!(
            "All {} variant rows within tolerance (rtol={}, atol={})",
            rows.len(),
            self.policy.rtol,
            self.policy.atol
        );
        Ok(())
    }

    /// Reads, parses, and validates a capture file in one step.
    pub fn validate_capture_file(
        &self,
        path: &Path,
        num_variants: usize,
        reference: &[f32],
    ) -> HarnessResult<()> {
        let text = fs::read_to_string(path).map_err(|source| ParsingError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let rows = Self::parse_capture(&text, num_variants, reference.len())?;
        self.validate(&rows, reference)?;
        Ok(())
    }
}
