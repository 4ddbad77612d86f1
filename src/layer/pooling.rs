//
// This file is part of smallconv.
//
// smallconv is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// smallconv is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with smallconv. If not, see <http://www.gnu.org/licenses/>.
//
// Copyright 2017 Chris Foster
//

use log::trace;

use smallmath::Matrix;

use crate::error::ShapeError;
use crate::im2col::{col2im, im2col};
use crate::layer::{assert_shape, Gradient, Layer, Tape};
use crate::shape::{output_extent, Shape};
use crate::tensor::Tensor;

/// Max pooling over each channel.  The output has as many channels as the input, and the same kernel and stride rules
/// as a [`ConvolutionLayer`](struct.ConvolutionLayer.html).
///
/// The gradient of each window goes to the first of its maximal elements, summed where windows overlap.
#[derive(Clone, Debug)]
pub struct PoolingLayer {
    pub(crate) input_shape: Shape,
    output_shape: Shape,
    pub(crate) kernel: (usize, usize),
    pub(crate) stride: (usize, usize),
}

impl PoolingLayer {
    pub fn new(input_shape: Shape, kernel: (usize, usize), stride: (usize, usize)) -> Result<PoolingLayer, ShapeError> {
        input_shape.validate()?;

        let output_shape = match input_shape {
            Shape::D1(_) => return Err(ShapeError::UnsupportedShape { layer: "PoolingLayer", shape: input_shape }),
            Shape::D2(rows, columns) => Shape::D2(
                output_extent(rows, kernel.0, stride.0)?,
                output_extent(columns, kernel.1, stride.1)?,
            ),
            Shape::D3(rows, columns, channels) => Shape::D3(
                output_extent(rows, kernel.0, stride.0)?,
                output_extent(columns, kernel.1, stride.1)?,
                channels,
            ),
        };

        Ok(PoolingLayer {
            input_shape,
            output_shape,
            kernel,
            stride,
        })
    }

    fn patches(&self, inputs: &Tensor) -> Matrix {
        im2col(
            self.kernel.0, self.kernel.1,
            self.stride.0, self.stride.1,
            self.input_shape.rows(), self.input_shape.columns(),
            inputs.as_matrix(),
        )
    }

    /// Runs `f(channel, position, offset_of_first_maximum, maximum)` for every window.
    fn for_each_maximum<F>(&self, patches: &Matrix, mut f: F) where F: FnMut(usize, usize, usize, f64) {
        let window = self.kernel.0 * self.kernel.1;

        for position in 0..patches.rows() {
            let patch = &patches[position];
            for channel in 0..self.input_shape.channels() {
                let values = &patch[channel * window..(channel + 1) * window];

                let mut best = 0;
                for i in 1..window {
                    if values[i] > values[best] {
                        best = i;
                    }
                }

                f(channel, position, channel * window + best, values[best]);
            }
        }
    }
}

impl Layer for PoolingLayer {
    fn input_shape(&self) -> Shape {
        self.input_shape
    }

    fn output_shape(&self) -> Shape {
        self.output_shape
    }

    fn feed_forward(&self, inputs: Tensor) -> (Tape, Tensor) {
        assert_shape("PoolingLayer", self.input_shape, &inputs);
        trace!("PoolingLayer forward: {} -> {}", self.input_shape, self.output_shape);

        let positions = self.output_shape.rows() * self.output_shape.columns();
        let mut outputs = Tensor::zeros(self.output_shape);
        {
            let values = outputs.values_mut();
            self.for_each_maximum(&self.patches(&inputs), |channel, position, _, maximum| {
                values[channel * positions + position] = maximum;
            });
        }

        (Tape::Inputs(inputs), outputs)
    }

    fn propagate_backward(&self, tape: Tape, gradients: &Tensor) -> (Gradient, Tensor) {
        assert_shape("PoolingLayer", self.output_shape, gradients);

        let inputs = tape.into_inputs();
        assert_shape("PoolingLayer", self.input_shape, &inputs);

        let patches = self.patches(&inputs);
        let positions = self.output_shape.rows() * self.output_shape.columns();

        // Route each window's gradient to its maximum, then scatter the windows back over the image
        let mut patch_gradients = Matrix::zeros(patches.rows(), patches.columns());
        self.for_each_maximum(&patches, |channel, position, offset, _| {
            patch_gradients[(position, offset)] = gradients.values()[channel * positions + position];
        });

        let input_gradients = col2im(
            self.kernel.0, self.kernel.1,
            self.stride.0, self.stride.1,
            self.input_shape.rows(), self.input_shape.columns(),
            &patch_gradients,
        );

        (Gradient::None, Tensor::from_matrix(self.input_shape, input_gradients))
    }

    fn boxed_clone(&self) -> Box<dyn Layer> {
        Box::new(self.clone())
    }
}
