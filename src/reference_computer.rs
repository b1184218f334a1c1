//! Trusted reference forward evaluation.
//!
//! Produces the ground-truth output tensor a scenario validates against.
//! The evaluation is single-threaded and deterministic: identical model and
//! input always produce bit-identical output, which is what makes the
//! tolerance comparison meaningful for reordering variants.

use crate::errors::{ModelError, ModelResult};
use crate::model::{ConvLayer, DenseLayer, Layer, Model};
use crate::tensor::Tensor;

/// Computes the reference output for a model and input.
pub struct ReferenceComputer;

impl ReferenceComputer {
    /// Runs the forward pass over the model's application schedule.
    ///
    /// Dense layers consume and produce flat vectors. Conv layers consume a
    /// `(channels, height, width)` volume; the spatial dimensions propagate
    /// from layer to layer as `(d + 2*pad - k) / stride + 1`.
    pub fn forward(model: &Model, input: &Tensor) -> ModelResult<Tensor> {
        let mut values = input.data().to_vec();
        let mut volume = VolumeShape::from_input(input);

        for layer in model.application_sequence() {
            match layer {
                Layer::Dense(dense) => {
                    values = Self::dense_forward(dense, &values)?;
                    volume = None;
                }
                Layer::Conv2d(conv) => {
                    let shape = match volume {
                        Some(shape) => shape,
                        None => {
                            return Err(ModelError::InputVolumeMismatch {
                                shape: vec![values.len()],
                                expected_channels: conv.in_channels(),
                            });
                        }
                    };
                    let (out_values, out_shape) = Self::conv_forward(conv, &values, shape)?;
                    values = out_values;
                    volume = Some(out_shape);
                }
            }
        }

        let shape = match volume {
            Some(v) => vec![v.channels, v.height, v.width],
            None => vec![values.len()],
        };
        Tensor::new(values, shape)
    }

    fn dense_forward(layer: &DenseLayer, input: &[f32]) -> ModelResult<Vec<f32>> {
        if input.len() != layer.in_features() {
            return Err(ModelError::InputSizeMismatch {
                expected: layer.in_features(),
                actual: input.len(),
            });
        }

        let weight = layer.weight.data();
        let bias = layer.bias.as_ref().map(Tensor::data);
        let in_features = layer.in_features();

        let mut output = Vec::with_capacity(layer.out_features());
        for row in 0..layer.out_features() {
            let mut acc = 0.0f32;
            let weights_row = &weight[row * in_features..(row + 1) * in_features];
            for (w, x) in weights_row.iter().zip(input) {
                acc += w * x;
            }
            if let Some(bias) = bias {
                acc += bias[row];
            }
            output.push(if layer.relu { acc.max(0.0) } else { acc });
        }
        Ok(output)
    }

    fn conv_forward(
        layer: &ConvLayer,
        input: &[f32],
        shape: VolumeShape,
    ) -> ModelResult<(Vec<f32>, VolumeShape)> {
        if shape.channels != layer.in_channels() || input.len() != shape.element_count() {
            return Err(ModelError::InputVolumeMismatch {
                shape: vec![shape.channels, shape.height, shape.width],
                expected_channels: layer.in_channels(),
            });
        }
        if shape.height + 2 * layer.padding < layer.kernel_size
            || shape.width + 2 * layer.padding < layer.kernel_size
        {
            return Err(ModelError::KernelExceedsInput {
                kernel_size: layer.kernel_size,
                padding: layer.padding,
                height: shape.height,
                width: shape.width,
            });
        }

        let k = layer.kernel_size;
        let out_height = (shape.height + 2 * layer.padding - k) / layer.stride + 1;
        let out_width = (shape.width + 2 * layer.padding - k) / layer.stride + 1;
        let pixels = out_height * out_width;
        let patch_len = shape.channels * k * k;

        // im2col: one column of length patch_len per output pixel.
        let col = Self::im2col(input, shape, layer, out_height, out_width);

        let weight = layer.weight.data();
        let bias = layer.bias.as_ref().map(Tensor::data);
        let mut output = vec![0.0f32; layer.out_channels() * pixels];
        for channel in 0..layer.out_channels() {
            let weights_row = &weight[channel * patch_len..(channel + 1) * patch_len];
            let bias_value = bias.map_or(0.0, |b| b[channel]);
            for pixel in 0..pixels {
                let mut acc = 0.0f32;
                for (j, w) in weights_row.iter().enumerate() {
                    acc += w * col[j * pixels + pixel];
                }
                acc += bias_value;
                output[channel * pixels + pixel] = if layer.relu { acc.max(0.0) } else { acc };
            }
        }

        Ok((
            output,
            VolumeShape {
                channels: layer.out_channels(),
                height: out_height,
                width: out_width,
            },
        ))
    }

    /// Unfolds `(c, h, w)` into `(c*k*k, out_h*out_w)` with zero padding.
    fn im2col(
        input: &[f32],
        shape: VolumeShape,
        layer: &ConvLayer,
        out_height: usize,
        out_width: usize,
    ) -> Vec<f32> {
        let k = layer.kernel_size;
        let pixels = out_height * out_width;
        let patch_len = shape.channels * k * k;
        let mut col = vec![0.0f32; patch_len * pixels];

        for row in 0..patch_len {
            let kernel_col = row % k;
            let kernel_row = (row / k) % k;
            let channel = row / (k * k);
            for out_row in 0..out_height {
                for out_col in 0..out_width {
                    let in_row = (out_row * layer.stride + kernel_row) as isize
                        - layer.padding as isize;
                    let in_col = (out_col * layer.stride + kernel_col) as isize
                        - layer.padding as isize;
                    let value = if in_row >= 0
                        && in_col >= 0
                        && (in_row as usize) < shape.height
                        && (in_col as usize) < shape.width
                    {
                        input[(channel * shape.height + in_row as usize) * shape.width
                            + in_col as usize]
                    } else {
                        0.0
                    };
                    col[(row * out_height + out_row) * out_width + out_col] = value;
                }
            }
        }
        col
    }
}

/// Spatial bookkeeping for conv inputs, carried between layers.
#[derive(Debug, Clone, Copy)]
struct VolumeShape {
    channels: usize,
    height: usize,
    width: usize,
}

impl VolumeShape {
    fn from_input(input: &Tensor) -> Option<Self> {
        match input.shape() {
            [channels, height, width] => Some(VolumeShape {
                channels: *channels,
                height: *height,
                width: *width,
            }),
            _ => None,
        }
    }

    fn element_count(&self) -> usize {
        self.channels * self.height * self.width
    }
}
