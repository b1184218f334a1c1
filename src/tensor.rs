//! Tensor and schema descriptor types.
//!
//! A tensor is an ordered, finite sequence of f32 values plus a shape that is
//! harness-side bookkeeping only: the shape is never persisted, and the
//! consuming executables agree on it out of band. The schema descriptor makes
//! the one checkable part of that agreement, the element count, explicit so a
//! byte buffer can be validated before decoding.

use crate::errors::{ModelError, ModelResult};

/// Schema descriptor for a serialized tensor buffer.
///
/// The harness only supports f32 elements in row-major (outermost dimension
/// slowest) order, so the element count is the entire negotiable surface of
/// the binary contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TensorSchema {
    pub element_count: usize,
}

impl TensorSchema {
    pub fn new(element_count: usize) -> Self {
        Self { element_count }
    }

    /// Exact byte length a conforming buffer must have.
    pub fn byte_len(&self) -> usize {
        self.element_count * std::mem::size_of::<f32>()
    }
}

/// An immutable f32 tensor with row-major data.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    data: Vec<f32>,
    shape: Vec<usize>,
}

impl Tensor {
    /// Creates a tensor, checking that the data length matches the shape.
    pub fn new(data: Vec<f32>, shape: Vec<usize>) -> ModelResult<Self> {
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(ModelError::TensorShapeMismatch {
                expected,
                actual: data.len(),
                shape,
            });
        }
        Ok(Tensor { data, shape })
    }

    /// Creates a rank-1 tensor from a flat vector.
    pub fn from_vec(data: Vec<f32>) -> Self {
        let shape = vec![data.len()];
        Tensor { data, shape }
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn element_count(&self) -> usize {
        self.data.len()
    }

    /// Schema descriptor for this tensor's serialized form.
    pub fn schema(&self) -> TensorSchema {
        TensorSchema::new(self.data.len())
    }

    /// The flattened values, in natural row-major order.
    pub fn flatten(&self) -> &[f32] {
        &self.data
    }
}
