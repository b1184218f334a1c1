//! Arrangement and rendering of per-variant durations.
//!
//! The four variants map onto a 2x2 parallelism x acceleration grid. The
//! matrix assumes validation already succeeded; it performs no checking of
//! the numeric results.

use std::fmt;
use std::time::Duration;

use crate::errors::{ProcessError, ProcessResult};
use crate::process_runner::ExecutionResult;

/// Row labels, indexed by parallelism off/on.
pub const ROW_LABELS: [&str; 2] = ["Without Parallel", "With Parallel"];
/// Column labels, indexed by acceleration off/on.
pub const COL_LABELS: [&str; 2] = ["Without Accel", "With Accel"];

/// Read-only 2x2 table of variant durations, in seconds.
#[derive(Debug, Clone)]
pub struct BenchmarkMatrix {
    cells: [[f64; 2]; 2],
}

impl BenchmarkMatrix {
    /// Builds the matrix from exactly 4 durations in the fixed invocation
    /// order [baseline, accel, parallel, parallel+accel].
    pub fn new(durations: [Duration; 4]) -> Self {
        let secs: Vec<f64> = durations.iter().map(Duration::as_secs_f64).collect();
        Self {
            cells: [[secs[0], secs[1]], [secs[2], secs[3]]],
        }
    }

    /// Builds the matrix from the runner's results, which must hold exactly
    /// one entry per standard variant.
    pub fn from_results(results: &[ExecutionResult]) -> ProcessResult<Self> {
        if results.len() != 4 {
            return Err(ProcessError::VariantCountMismatch {
                expected: 4,
                actual: results.len(),
            });
        }
        Ok(Self::new([
            results[0].duration,
            results[1].duration,
            results[2].duration,
            results[3].duration,
        ]))
    }

    /// Duration in seconds for one parallelism/acceleration combination.
    pub fn cell(&self, parallel: bool, accel: bool) -> f64 {
        self.cells[parallel as usize][accel as usize]
    }
}

impl fmt::Display for BenchmarkMatrix {
    /// Renders the table with durations rounded to 3 decimal places.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = ROW_LABELS.iter().map(|l| l.len()).max().unwrap_or(0);
        write!(f, "{:label_width$}", "")?;
        for col in COL_LABELS {
            write!(f, "  {col:>13}")?;
        }
        writeln!(f)?;
        for (row_index, row_label) in ROW_LABELS.iter().enumerate() {
            write!(f, "{row_label:label_width$}")?;
            for col_index in 0..COL_LABELS.len() {
                write!(f, "  {:>13.3}", self.cells[row_index][col_index])?;
            }
            if row_index + 1 < ROW_LABELS.len() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
