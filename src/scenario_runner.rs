//! Scenario pipeline orchestration.
//!
//! Drives the linear pipeline of one benchmark scenario: build model and
//! input, serialize artifacts, compute the reference, run the variants,
//! validate, report. Any failure at any stage aborts the scenario with the
//! originating error; no timing table is produced once validation fails.

use std::time::{Duration, Instant};

use log::{error, info};

use crate::benchmark_matrix::BenchmarkMatrix;
use crate::errors::{ConfigError, HarnessResult};
use crate::model::Model;
use crate::model_serializer::{ArtifactPaths, ModelSerializer};
use crate::process_runner::{ProcessRunner, VariantSpec};
use crate::reference_computer::ReferenceComputer;
use crate::result_validator::ResultValidator;
use crate::scenario::{self, ConfigLoader};
use crate::tensor::Tensor;

/// Main scenario runner
pub struct ScenarioRunner;

impl ScenarioRunner {
    /// Run all built-in scenarios, stopping at the first failure.
    pub fn run_all_scenarios() -> HarnessResult<()> {
        info!("Starting benchmark scenario suite");
        Self::run_dense_scenario()?;
        Self::run_conv_scenario()?;
        info!("All scenarios completed successfully");
        Ok(())
    }

    /// Run a specific scenario by name.
    pub fn run_scenario(name: &str) -> HarnessResult<()> {
        match name {
            "dense" => Self::run_dense_scenario(),
            "conv" => Self::run_conv_scenario(),
            _ => Err(ConfigError::UnknownScenario {
                name: name.to_string(),
            }
            .into()),
        }
    }

    /// List available scenarios
    pub fn list_scenarios() {
        println!("Available scenarios:");
        println!("  dense - Repeated fully connected layer against run-linear variants");
        println!("  conv  - Repeated 2D convolution against run-conv variants");
    }

    fn run_dense_scenario() -> HarnessResult<()> {
        let config = ConfigLoader::load_dense_config()?;
        config.validate()?;

        info!("{}", "=".repeat(80));
        info!(
            "Dense scenario: {}x{} layer applied {} times",
            config.dim, config.dim, config.layer_count
        );
        info!("{}", "=".repeat(80));

        let model = scenario::build_dense_model(&config)?;
        let input = scenario::build_dense_input(&config);
        let variants =
            VariantSpec::standard_matrix(&config.executable, &config.parallel_suffix, &config.accel_flag);

        Self::run_pipeline(
            "dense",
            &model,
            &input,
            &variants,
            config.timeout_secs.map(Duration::from_secs),
        )
    }

    fn run_conv_scenario() -> HarnessResult<()> {
        let config = ConfigLoader::load_conv_config()?;
        config.validate()?;

        info!("{}", "=".repeat(80));
        info!(
            "Conv scenario: {}x{}x{} input, {} hidden channels, {} applications",
            config.in_channels, config.height, config.width, config.hidden_channels,
            config.layer_count
        );
        info!("{}", "=".repeat(80));

        let model = scenario::build_conv_model(&config)?;
        let input = scenario::build_conv_input(&config)?;
        let variants =
            VariantSpec::standard_matrix(&config.executable, &config.parallel_suffix, &config.accel_flag);

        Self::run_pipeline(
            "conv",
            &model,
            &input,
            &variants,
            config.timeout_secs.map(Duration::from_secs),
        )
    }

    /// Runs one scenario end to end against already-built model and input.
    ///
    /// Exposed for harness-level tests that substitute stub variants.
    pub fn run_pipeline(
        label: &str,
        model: &Model,
        input: &Tensor,
        variants: &[VariantSpec],
        timeout: Option<Duration>,
    ) -> HarnessResult<()> {
        let paths = ArtifactPaths::in_current_dir();
        Self::run_pipeline_at(label, model, input, variants, &paths, timeout)
    }

    /// Same as [`run_pipeline`](Self::run_pipeline) with explicit artifact paths.
    pub fn run_pipeline_at(
        label: &str,
        model: &Model,
        input: &Tensor,
        variants: &[VariantSpec],
        paths: &ArtifactPaths,
        timeout: Option<Duration>,
    ) -> HarnessResult<()> {
        let serializer = ModelSerializer::new();
        serializer.write_model(model, &paths.model())?;
        serializer.write_input(input, &paths.input())?;

        // Reference is computed once and held; variants never re-derive it.
        let reference_start = Instant::now();
        let reference = ReferenceComputer::forward(model, input)?;
        info!(
            "Reference: {:.3} seconds",
            reference_start.elapsed().as_secs_f64()
        );

        let mut runner = ProcessRunner::new(paths.capture()).with_working_dir(paths.dir());
        if let Some(timeout) = timeout {
            runner = runner.with_timeout(timeout);
        }
        let results = runner.execute(variants);
        let results = match results {
            Ok(results) => results,
            Err(e) => {
                error!("Scenario '{}' aborted during variant execution: {}", label, e);
                return Err(e.into());
            }
        };

        let validator = ResultValidator::new();
        validator.validate_capture_file(&paths.capture(), variants.len(), reference.flatten())?;

        let matrix = BenchmarkMatrix::from_results(&results)?;
        println!("{}\n", matrix);
        Ok(())
    }
}
