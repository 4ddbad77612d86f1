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

/// Margins around each channel of an image, in values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Padding {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

impl Padding {
    pub fn new(left: usize, top: usize, right: usize, bottom: usize) -> Padding {
        Padding {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same margin on every side.
    pub fn uniform(margin: usize) -> Padding {
        Padding::new(margin, margin, margin, margin)
    }
}

/// Surrounds each channel with zeros.
#[derive(Clone, Debug)]
pub struct PadLayer {
    pub(crate) input_shape: Shape,
    output_shape: Shape,
    pub(crate) padding: Padding,
}

impl PadLayer {
    pub fn new(input_shape: Shape, padding: Padding) -> Result<PadLayer, ShapeError> {
        input_shape.validate()?;

        let rows = input_shape.rows().checked_add(padding.top).and_then(|rows| rows.checked_add(padding.bottom));
        let columns = input_shape.columns().checked_add(padding.left).and_then(|columns| columns.checked_add(padding.right));
        let (rows, columns) = rows.zip(columns).ok_or(ShapeError::TooLarge(input_shape))?;

        let output_shape = input_shape.with_extents(rows, columns, input_shape.channels())
            .ok_or(ShapeError::UnsupportedShape { layer: "PadLayer", shape: input_shape })?;
        output_shape.validate()?;

        Ok(PadLayer {
            input_shape,
            output_shape,
            padding,
        })
    }
}

impl Layer for PadLayer {
    fn input_shape(&self) -> Shape {
        self.input_shape
    }

    fn output_shape(&self) -> Shape {
        self.output_shape
    }

    fn feed_forward(&self, inputs: Tensor) -> (Tape, Tensor) {
        assert_shape("PadLayer", self.input_shape, &inputs);
        trace!("PadLayer forward: {} -> {}", self.input_shape, self.output_shape);

        (Tape::Empty, pad(&inputs, self.output_shape, self.padding))
    }

    fn propagate_backward(&self, _: Tape, gradients: &Tensor) -> (Gradient, Tensor) {
        assert_shape("PadLayer", self.output_shape, gradients);
        trace!("PadLayer backward: {} -> {}", self.output_shape, self.input_shape);

        (Gradient::None, crop(gradients, self.input_shape, self.padding))
    }

    fn boxed_clone(&self) -> Box<dyn Layer> {
        Box::new(self.clone())
    }
}

/// Copies every channel of `image` into the interior of a zeroed tensor of `shape`.
pub(crate) fn pad(image: &Tensor, shape: Shape, padding: Padding) -> Tensor {
    let (rows, columns) = (image.shape().rows(), image.shape().columns());
    let mut padded = Tensor::zeros(shape);

    for channel in 0..shape.channels() {
        for row in 0..rows {
            let source = channel * rows + row;
            let destination = channel * shape.rows() + row + padding.top;

            padded.as_matrix_mut()[destination][padding.left..padding.left + columns]
                .copy_from_slice(&image.as_matrix()[source]);
        }
    }

    padded
}

/// Cuts the margins off every channel of `image`, leaving a tensor of `shape`.
pub(crate) fn crop(image: &Tensor, shape: Shape, margins: Padding) -> Tensor {
    let (rows, columns) = (shape.rows(), shape.columns());
    let mut cropped = Tensor::zeros(shape);

    for channel in 0..shape.channels() {
        for row in 0..rows {
            let source = channel * image.shape().rows() + row + margins.top;
            let destination = channel * rows + row;

            cropped.as_matrix_mut()[destination]
                .copy_from_slice(&image.as_matrix()[source][margins.left..margins.left + columns]);
        }
    }

    cropped
}
