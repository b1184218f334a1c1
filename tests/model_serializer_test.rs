//! Tests for artifact serialization and the parameter-order contract.

use std::fs;

use layerbench::errors::{FormatError, SerializationError};
use layerbench::model::{DenseLayer, Layer, Model, ParameterOrder};
use layerbench::tensor::{Tensor, TensorSchema};
use layerbench::{ModelSerializer, TensorCodec};
use tempfile::tempdir;

fn identity_model(n: usize) -> Model {
    let mut weight = vec![0.0f32; n * n];
    for i in 0..n {
        weight[i * n + i] = 1.0;
    }
    let layer = DenseLayer::new(n, n, weight, Some(vec![0.0; n]), false).unwrap();
    Model::sequential(vec![Layer::Dense(layer)]).unwrap()
}

#[test]
fn dense_identity_model_serializes_weight_then_bias() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.pt");
    let model = identity_model(4);

    ModelSerializer::new()
        .write_model(&model, &path)
        .expect("model serialization should succeed");

    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 4 * (16 + 4));

    let values = TensorCodec::decode(&bytes, &TensorSchema::new(20)).unwrap();
    // First 16 elements are the identity weight matrix, row-major.
    for row in 0..4 {
        for col in 0..4 {
            let expected = if row == col { 1.0 } else { 0.0 };
            assert_eq!(values[row * 4 + col], expected);
        }
    }
    // Last 4 elements are the zero bias.
    assert_eq!(&values[16..], &[0.0; 4]);
}

#[test]
fn serialization_order_matches_parameter_order_policy() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.pt");

    let first = DenseLayer::new(2, 3, vec![1.0; 6], Some(vec![2.0; 3]), false).unwrap();
    let second = DenseLayer::new(3, 1, vec![3.0; 3], None, false).unwrap();
    let model = Model::sequential(vec![Layer::Dense(first), Layer::Dense(second)]).unwrap();

    ModelSerializer::with_order(ParameterOrder::WeightThenBias)
        .write_model(&model, &path)
        .unwrap();

    let bytes = fs::read(&path).unwrap();
    let values = TensorCodec::decode(&bytes, &TensorSchema::new(12)).unwrap();
    assert_eq!(&values[..6], &[1.0; 6]);
    assert_eq!(&values[6..9], &[2.0; 3]);
    assert_eq!(&values[9..], &[3.0; 3]);
}

#[test]
fn shared_layer_parameters_are_written_once() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.pt");

    let layer = DenseLayer::new(2, 2, vec![1.0; 4], Some(vec![0.5; 2]), false).unwrap();
    let model = Model::with_schedule(vec![Layer::Dense(layer)], vec![0; 100]).unwrap();

    ModelSerializer::new().write_model(&model, &path).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 4 * (4 + 2));
}

#[test]
fn corrupted_model_file_fails_at_decode() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.pt");
    let model = identity_model(4);

    ModelSerializer::new().write_model(&model, &path).unwrap();

    // Truncate one byte off the artifact; the decode contract must catch it.
    let mut bytes = fs::read(&path).unwrap();
    bytes.pop();
    let result = TensorCodec::decode(&bytes, &TensorSchema::new(model.total_parameter_count()));
    assert!(matches!(
        result,
        Err(FormatError::ByteLengthMismatch { .. })
    ));
}

#[test]
fn unwritable_path_is_a_serialization_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing-subdir").join("model.pt");
    let model = identity_model(2);

    let result = ModelSerializer::new().write_model(&model, &path);
    assert!(matches!(result, Err(SerializationError::Create { .. })));
}

#[test]
fn input_artifact_holds_exactly_the_input_elements() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.txt");
    let input = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0]);

    ModelSerializer::new().write_input(&input, &path).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 16);
    let values = TensorCodec::decode(&bytes, &input.schema()).unwrap();
    assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);
}
