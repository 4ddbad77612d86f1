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

/// Reinterprets a tensor with a different shape of the same length.  Values keep their flat order.
#[derive(Clone, Debug)]
pub struct ReshapeLayer {
    pub(crate) input_shape: Shape,
    pub(crate) output_shape: Shape,
}

impl ReshapeLayer {
    pub fn new(input_shape: Shape, output_shape: Shape) -> Result<ReshapeLayer, ShapeError> {
        input_shape.validate()?;
        output_shape.validate()?;

        if input_shape.len() != output_shape.len() {
            return Err(ShapeError::LengthMismatch { input: input_shape, output: output_shape });
        }

        Ok(ReshapeLayer {
            input_shape,
            output_shape,
        })
    }
}

impl Layer for ReshapeLayer {
    fn input_shape(&self) -> Shape {
        self.input_shape
    }

    fn output_shape(&self) -> Shape {
        self.output_shape
    }

    fn feed_forward(&self, inputs: Tensor) -> (Tape, Tensor) {
        assert_shape("ReshapeLayer", self.input_shape, &inputs);
        trace!("ReshapeLayer forward: {} -> {}", self.input_shape, self.output_shape);

        (Tape::Empty, inputs.reshape(self.output_shape))
    }

    fn propagate_backward(&self, _: Tape, gradients: &Tensor) -> (Gradient, Tensor) {
        assert_shape("ReshapeLayer", self.output_shape, gradients);
        (Gradient::None, gradients.clone().reshape(self.input_shape))
    }

    fn boxed_clone(&self) -> Box<dyn Layer> {
        Box::new(self.clone())
    }
}
