//! Sequential execution of variant executables with shared output capture.
//!
//! Variants run strictly one after another so wall-clock measurements are free
//! of resource contention between them. Every variant's stdout is appended to
//! one capture file in invocation order; order is the only structure in that
//! file, so append order equals invocation order is a hard invariant that the
//! validator's reshape step relies on.

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use log::info;

use crate::errors::{ProcessError, ProcessResult};

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// One variant invocation: a labeled executable plus optional arguments.
#[derive(Debug, Clone)]
pub struct VariantSpec {
    pub label: String,
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl VariantSpec {
    pub fn new(label: impl Into<String>, program: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// The standard 4-variant set for one base executable, in the fixed
    /// invocation order [baseline, accel, parallel, parallel+accel].
    ///
    /// The parallel build is a separate executable distinguished by a name
    /// suffix; the acceleration flag selects the optimized code path within
    /// the same executable.
    pub fn standard_matrix(
        base_executable: &str,
        parallel_suffix: &str,
        accel_flag: &str,
    ) -> [VariantSpec; 4] {
        let parallel_executable = format!("{base_executable}{parallel_suffix}");
        [
            VariantSpec::new("baseline", base_executable),
            VariantSpec::new("accel", base_executable)
                .with_args(vec![accel_flag.to_string()]),
            VariantSpec::new("parallel", parallel_executable.clone()),
            VariantSpec::new("parallel+accel", parallel_executable)
                .with_args(vec![accel_flag.to_string()]),
        ]
    }
}

/// Outcome of one completed variant run.
///
/// Created when the subprocess exits and consumed immediately by validation
/// and reporting; the capture file is the only persisted record of the output.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub label: String,
    pub duration: Duration,
}

/// Launches variant executables strictly sequentially, capturing stdout into
/// one shared file and measuring per-variant wall-clock duration.
pub struct ProcessRunner {
    capture_path: PathBuf,
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl ProcessRunner {
    pub fn new(capture_path: impl Into<PathBuf>) -> Self {
        Self {
            capture_path: capture_path.into(),
            working_dir: None,
            timeout: None,
        }
    }

    /// Working directory the variants run in; they load the model and input
    /// artifacts from here by filename convention.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Bounded wait per variant. On expiry the child is killed and the run
    /// sequence aborts with [`ProcessError::Timeout`]. Default is unlimited.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Runs every variant in declaration order, one completed before the next
    /// starts, and returns one [`ExecutionResult`] per variant in that order.
    ///
    /// The capture file is created once before the loop and closed when this
    /// function returns on any path. Each child inherits a clone of the same
    /// file handle, so sequential writes append in invocation order. stderr is
    /// piped separately and never enters the comparison data.
    ///
    /// A launch failure or non-zero exit aborts the remaining sequence.
    pub fn execute(&self, variants: &[VariantSpec]) -> ProcessResult<Vec<ExecutionResult>> {
        let capture = File::create(&self.capture_path).map_err(|source| {
            ProcessError::CaptureFile {
                path: self.capture_path.clone(),
                source,
            }
        })?;

        let mut results = Vec::with_capacity(variants.len());
        for spec in variants {
            let stdout = capture
                .try_clone()
                .map_err(|source| ProcessError::CaptureFile {
                    path: self.capture_path.clone(),
                    source,
                })?;

            let mut command = Command::new(&spec.program);
            command
                .args(&spec.args)
                .stdout(Stdio::from(stdout))
                .stderr(Stdio::piped());
            if let Some(dir) = &self.working_dir {
                command.current_dir(dir);
            }

            let start = Instant::now();
            let mut child = command.spawn().map_err(|source| ProcessError::Launch {
                variant: spec.label.clone(),
                program: spec.program.clone(),
                source,
            })?;

            let status = self.wait_for_exit(&mut child, spec)?;
            let duration = start.elapsed();

            if !status.success() {
                return Err(ProcessError::ExitFailure {
                    variant: spec.label.clone(),
                    status,
                    stderr: Self::drain_stderr(&mut child),
                });
            }

            info!(
                "Variant '{}' finished in {:.3} seconds",
                spec.label,
                duration.as_secs_f64()
            );
            results.push(ExecutionResult {
                label: spec.label.clone(),
                duration,
            });
        }

        Ok(results)
    }

    fn wait_for_exit(&self, child: &mut Child, spec: &VariantSpec) -> ProcessResult<ExitStatus> {
        let timeout = match self.timeout {
            Some(timeout) => timeout,
            None => {
                return child.wait().map_err(|source| ProcessError::Wait {
                    variant: spec.label.clone(),
                    source,
                });
            }
        };

        let deadline = Instant::now() + timeout;
        loop {
            let exited = child.try_wait().map_err(|source| ProcessError::Wait {
                variant: spec.label.clone(),
                source,
            })?;
            if let Some(status) = exited {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                // Best effort: the child may have exited between the poll and the kill.
                let _ = child.kill();
                let _ = child.wait();
                return Err(ProcessError::Timeout {
                    variant: spec.label.clone(),
                    timeout,
                });
            }
            thread::sleep(WAIT_POLL_INTERVAL);
        }
    }

    fn drain_stderr(child: &mut Child) -> String {
        let mut text = String::new();
        if let Some(mut stderr) = child.stderr.take() {
            let _ = stderr.read_to_string(&mut text);
        }
        text.trim().to_string()
    }
}
