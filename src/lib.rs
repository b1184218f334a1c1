//! Correctness-and-performance benchmarking harness for external numeric
//! compute executables.
//!
//! The harness builds a numeric model and input tensor, serializes both to a
//! fixed headerless binary layout, runs several variant executables strictly
//! sequentially while capturing their stdout into one shared stream, validates
//! every variant's output against a trusted in-process reference computation
//! under a combined tolerance, and tabulates per-variant wall-clock durations
//! into a parallelism x acceleration matrix.

pub mod benchmark_matrix;
pub mod errors;
pub mod model;
pub mod model_serializer;
pub mod process_runner;
pub mod reference_computer;
pub mod result_validator;
pub mod scenario;
pub mod scenario_runner;
pub mod tensor;
pub mod tensor_codec;

pub use benchmark_matrix::BenchmarkMatrix;
pub use model::{ConvLayer, DenseLayer, Layer, Model, ParameterOrder};
pub use model_serializer::{ArtifactPaths, ModelSerializer};
pub use process_runner::{ExecutionResult, ProcessRunner, VariantSpec};
pub use reference_computer::ReferenceComputer;
pub use result_validator::{ResultValidator, TolerancePolicy};
pub use scenario_runner::ScenarioRunner;
pub use tensor::{Tensor, TensorSchema};
pub use tensor_codec::TensorCodec;
