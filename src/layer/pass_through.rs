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

#[derive(Clone, Debug)]
pub struct PassThroughLayer {
    pub(crate) shape: Shape,
}

impl PassThroughLayer {
    pub fn new(shape: Shape) -> Result<PassThroughLayer, ShapeError> {
        shape.validate()?;

        Ok(PassThroughLayer {
            shape,
        })
    }
}

impl Layer for PassThroughLayer {
    fn input_shape(&self) -> Shape {
        self.shape
    }

    fn output_shape(&self) -> Shape {
        self.shape
    }

    fn feed_forward(&self, inputs: Tensor) -> (Tape, Tensor) {
        assert_shape("PassThroughLayer", self.shape, &inputs);
        trace!("PassThroughLayer forward: {}", self.shape);

        (Tape::Empty, inputs)
    }

    fn propagate_backward(&self, _: Tape, gradients: &Tensor) -> (Gradient, Tensor) {
        assert_shape("PassThroughLayer", self.shape, gradients);
        (Gradient::None, gradients.clone())
    }

    fn boxed_clone(&self) -> Box<dyn Layer> {
        Box::new(self.clone())
    }
}
