//! Model structure and the parameter traversal policy.
//!
//! A model is an ordered sequence of parameter-bearing layers plus a schedule
//! describing the order in which those layers are applied. The schedule lets a
//! single layer be applied many times while its parameters are serialized once,
//! which is how the external executables consume repeated-layer benchmarks.

use crate::errors::{ModelError, ModelResult};
use crate::tensor::Tensor;

/// A fully connected layer: `weight (out x in) @ x (in) + bias (out)`.
#[derive(Debug, Clone)]
pub struct DenseLayer {
    pub(crate) weight: Tensor,
    pub(crate) bias: Option<Tensor>,
    pub(crate) in_features: usize,
    pub(crate) out_features: usize,
    pub(crate) relu: bool,
}

impl DenseLayer {
    pub fn new(
        in_features: usize,
        out_features: usize,
        weight: Vec<f32>,
        bias: Option<Vec<f32>>,
        relu: bool,
    ) -> ModelResult<Self> {
        if in_features == 0 || out_features == 0 {
            return Err(ModelError::InvalidLayerDimensions);
        }
        if weight.len() != in_features * out_features {
            return Err(ModelError::DenseWeightSizeMismatch {
                expected: in_features * out_features,
                actual: weight.len(),
                out_features,
                in_features,
            });
        }
        let bias = match bias {
            Some(values) => {
                if values.len() != out_features {
                    return Err(ModelError::BiasSizeMismatch {
                        expected: out_features,
                        actual: values.len(),
                    });
                }
                Some(Tensor::new(values, vec![out_features])?)
            }
            None => None,
        };
        Ok(DenseLayer {
            weight: Tensor::new(weight, vec![out_features, in_features])?,
            bias,
            in_features,
            out_features,
            relu,
        })
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }
}

/// A 2-D convolution layer with square kernel and zero padding.
#[derive(Debug, Clone)]
pub struct ConvLayer {
    pub(crate) weight: Tensor,
    pub(crate) bias: Option<Tensor>,
    pub(crate) in_channels: usize,
    pub(crate) out_channels: usize,
    pub(crate) kernel_size: usize,
    pub(crate) stride: usize,
    pub(crate) padding: usize,
    pub(crate) relu: bool,
}

impl ConvLayer {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        in_channels: usize,
        out_channels: usize,
        kernel_size: usize,
        stride: usize,
        padding: usize,
        weight: Vec<f32>,
        bias: Option<Vec<f32>>,
        relu: bool,
    ) -> ModelResult<Self> {
        if in_channels == 0 || out_channels == 0 || kernel_size == 0 {
            return Err(ModelError::InvalidLayerDimensions);
        }
        if stride == 0 {
            return Err(ModelError::InvalidStride);
        }
        let expected = out_channels * in_channels * kernel_size * kernel_size;
        if weight.len() != expected {
            return Err(ModelError::ConvWeightSizeMismatch {
                expected,
                actual: weight.len(),
                out_channels,
                in_channels,
                kernel_size,
            });
        }
        let bias = match bias {
            Some(values) => {
                if values.len() != out_channels {
                    return Err(ModelError::BiasSizeMismatch {
                        expected: out_channels,
                        actual: values.len(),
                    });
                }
                Some(Tensor::new(values, vec![out_channels])?)
            }
            None => None,
        };
        Ok(ConvLayer {
            weight: Tensor::new(
                weight,
                vec![out_channels, in_channels, kernel_size, kernel_size],
            )?,
            bias,
            in_channels,
            out_channels,
            kernel_size,
            stride,
            padding,
            relu,
        })
    }

    pub fn in_channels(&self) -> usize {
        self.in_channels
    }

    pub fn out_channels(&self) -> usize {
        self.out_channels
    }
}

/// One parameter-bearing layer of a model.
#[derive(Debug, Clone)]
pub enum Layer {
    Dense(DenseLayer),
    Conv2d(ConvLayer),
}

/// Named traversal policy for a model's parameter tensors.
///
/// The traversal order is the binary contract with the consuming executable:
/// it must equal the executable's load order exactly, so it is a named policy
/// rather than the iteration order of an arbitrary structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterOrder {
    /// Per layer in declaration order: weight tensor, then bias tensor when
    /// the layer has one.
    #[default]
    WeightThenBias,
}

impl ParameterOrder {
    /// The parameter tensors of one layer, in policy order.
    pub fn layer_tensors<'a>(&self, layer: &'a Layer) -> Vec<&'a Tensor> {
        let (weight, bias) = match layer {
            Layer::Dense(dense) => (&dense.weight, dense.bias.as_ref()),
            Layer::Conv2d(conv) => (&conv.weight, conv.bias.as_ref()),
        };
        match self {
            ParameterOrder::WeightThenBias => {
                let mut tensors = vec![weight];
                if let Some(bias) = bias {
                    tensors.push(bias);
                }
                tensors
            }
        }
    }
}

/// An immutable model: unique layers plus an application schedule.
#[derive(Debug, Clone)]
pub struct Model {
    layers: Vec<Layer>,
    schedule: Vec<usize>,
}

impl Model {
    /// A model whose layers are each applied once, in declaration order.
    pub fn sequential(layers: Vec<Layer>) -> ModelResult<Self> {
        if layers.is_empty() {
            return Err(ModelError::NoLayersProvided);
        }
        let schedule = (0..layers.len()).collect();
        Ok(Model { layers, schedule })
    }

    /// A model with an explicit application schedule over shared layers.
    ///
    /// Schedule entries index into `layers`; a layer may appear any number of
    /// times, and its parameters are still serialized exactly once.
    pub fn with_schedule(layers: Vec<Layer>, schedule: Vec<usize>) -> ModelResult<Self> {
        if layers.is_empty() {
            return Err(ModelError::NoLayersProvided);
        }
        if schedule.is_empty() {
            return Err(ModelError::EmptySchedule);
        }
        for &index in &schedule {
            if index >= layers.len() {
                return Err(ModelError::ScheduleIndexOutOfBounds {
                    index,
                    layer_count: layers.len(),
                });
            }
        }
        Ok(Model { layers, schedule })
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// The layers in application order, following the schedule.
    pub fn application_sequence(&self) -> impl Iterator<Item = &Layer> {
        self.schedule.iter().map(|&index| &self.layers[index])
    }

    /// The parameter tensors in serialization order, following the policy.
    ///
    /// Traverses unique layers, not the schedule: shared layers contribute
    /// their parameters once.
    pub fn parameter_tensors(&self, order: ParameterOrder) -> Vec<&Tensor> {
        self.layers
            .iter()
            .flat_map(|layer| order.layer_tensors(layer))
            .collect()
    }

    /// Total f32 element count across all parameter tensors.
    pub fn total_parameter_count(&self) -> usize {
        self.parameter_tensors(ParameterOrder::default())
            .iter()
            .map(|tensor| tensor.element_count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_dense(n: usize) -> DenseLayer {
        let mut weight = vec![0.0; n * n];
        for i in 0..n {
            weight[i * n + i] = 1.0;
        }
        DenseLayer::new(n, n, weight, Some(vec![0.0; n]), false).unwrap()
    }

    #[test]
    fn weight_precedes_bias_per_layer() {
        let model = Model::sequential(vec![
            Layer::Dense(identity_dense(2)),
            Layer::Dense(identity_dense(3)),
        ])
        .unwrap();

        let tensors = model.parameter_tensors(ParameterOrder::WeightThenBias);
        let counts: Vec<usize> = tensors.iter().map(|t| t.element_count()).collect();
        assert_eq!(counts, vec![4, 2, 9, 3]);
    }

    #[test]
    fn bias_less_layer_contributes_one_tensor() {
        let layer = DenseLayer::new(2, 2, vec![1.0, 0.0, 0.0, 1.0], None, false).unwrap();
        let model = Model::sequential(vec![Layer::Dense(layer)]).unwrap();
        assert_eq!(model.parameter_tensors(ParameterOrder::default()).len(), 1);
        assert_eq!(model.total_parameter_count(), 4);
    }

    #[test]
    fn shared_layer_serializes_once() {
        let model =
            Model::with_schedule(vec![Layer::Dense(identity_dense(4))], vec![0, 0, 0]).unwrap();
        assert_eq!(model.application_sequence().count(), 3);
        assert_eq!(model.total_parameter_count(), 16 + 4);
    }

    #[test]
    fn schedule_index_is_bounds_checked() {
        let result = Model::with_schedule(vec![Layer::Dense(identity_dense(2))], vec![0, 1]);
        assert!(matches!(
            result,
            Err(ModelError::ScheduleIndexOutOfBounds {
                index: 1,
                layer_count: 1,
            })
        ));
    }
}
