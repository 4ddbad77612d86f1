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

use crate::error::ShapeError;
use crate::layer::{assert_shape, Gradient, Layer, Tape};
use crate::shape::Shape;
use crate::tensor::Tensor;

/// Normalizes a vector into a probability distribution.
#[derive(Clone, Debug)]
pub struct SoftmaxLayer {
    pub(crate) size: usize,
}

impl SoftmaxLayer {
    /// Only vectors are accepted.
    pub fn new(shape: Shape) -> Result<SoftmaxLayer, ShapeError> {
        shape.validate()?;

        match shape {
            Shape::D1(size) => Ok(SoftmaxLayer {
                size,
            }),
            _ => Err(ShapeError::UnsupportedShape { layer: "SoftmaxLayer", shape }),
        }
    }
}

impl Layer for SoftmaxLayer {
    fn input_shape(&self) -> Shape {
        Shape::D1(self.size)
    }

    fn output_shape(&self) -> Shape {
        Shape::D1(self.size)
    }

    fn feed_forward(&self, inputs: Tensor) -> (Tape, Tensor) {
        assert_shape("SoftmaxLayer", self.input_shape(), &inputs);
        trace!("SoftmaxLayer forward: {}", self.input_shape());

        // Shifting by the maximum keeps exp() from overflowing
        let max = inputs.max();
        let exponentials = inputs.values().iter().map(|x| (x - max).exp()).collect::<Vec<_>>();
        let sum: f64 = exponentials.iter().sum();

        let outputs = Tensor::new(self.output_shape(), exponentials.into_iter().map(|x| x / sum).collect());
        (Tape::Outputs(outputs.clone()), outputs)
    }

    fn propagate_backward(&self, tape: Tape, gradients: &Tensor) -> (Gradient, Tensor) {
        assert_shape("SoftmaxLayer", self.output_shape(), gradients);

        let outputs = tape.into_outputs();
        assert_shape("SoftmaxLayer", self.output_shape(), &outputs);

        // input_gradients[i] = outputs[i] * (gradients[i] - sum_j(outputs[j] * gradients[j]))
        let dot = (&outputs * gradients).sum();
        let input_gradients = outputs.values().iter()
            .zip(gradients.values())
            .map(|(y, g)| y * (g - dot))
            .collect();

        (Gradient::None, Tensor::new(self.input_shape(), input_gradients))
    }

    fn boxed_clone(&self) -> Box<dyn Layer> {
        Box::new(self.clone())
    }
}
