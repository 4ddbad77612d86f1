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
use crate::layer::pad::{crop, pad};
use crate::layer::{assert_shape, Gradient, Layer, Padding, Tape};
use crate::shape::Shape;
use crate::tensor::Tensor;

/// Removes margins from each channel.  The backward pass pads the gradient back out with zeros.
#[derive(Clone, Debug)]
pub struct CropLayer {
    pub(crate) input_shape: Shape,
    output_shape: Shape,
    pub(crate) margins: Padding,
}

impl CropLayer {
    pub fn new(input_shape: Shape, margins: Padding) -> Result<CropLayer, ShapeError> {
        input_shape.validate()?;

        if !input_shape.is_image() {
            return Err(ShapeError::UnsupportedShape { layer: "CropLayer", shape: input_shape });
        }

        let rows = margins.top.checked_add(margins.bottom).and_then(|margin| input_shape.rows().checked_sub(margin));
        let columns = margins.left.checked_add(margins.right).and_then(|margin| input_shape.columns().checked_sub(margin));

        let (rows, columns) = match (rows, columns) {
            (Some(rows), Some(columns)) if rows > 0 && columns > 0 => (rows, columns),
            _ => return Err(ShapeError::CropExceedsInput { shape: input_shape }),
        };

        let output_shape = input_shape.with_extents(rows, columns, input_shape.channels())
            .ok_or(ShapeError::UnsupportedShape { layer: "CropLayer", shape: input_shape })?;

        Ok(CropLayer {
            input_shape,
            output_shape,
            margins,
        })
    }
}

impl Layer for CropLayer {
    fn input_shape(&self) -> Shape {
        self.input_shape
    }

    fn output_shape(&self) -> Shape {
        self.output_shape
    }

    fn feed_forward(&self, inputs: Tensor) -> (Tape, Tensor) {
        assert_shape("CropLayer", self.input_shape, &inputs);
        trace!("CropLayer forward: {} -> {}", self.input_shape, self.output_shape);

        (Tape::Empty, crop(&inputs, self.output_shape, self.margins))
    }

    fn propagate_backward(&self, _: Tape, gradients: &Tensor) -> (Gradient, Tensor) {
        assert_shape("CropLayer", self.output_shape, gradients);
        trace!("CropLayer backward: {} -> {}", self.output_shape, self.input_shape);

        (Gradient::None, pad(gradients, self.input_shape, self.margins))
    }

    fn boxed_clone(&self) -> Box<dyn Layer> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop() {
        let layer = CropLayer::new(Shape::D2(3, 3), Padding::new(1, 1, 0, 1)).unwrap();
        assert_eq!(layer.output_shape(), Shape::D2(1, 2));

        let (tape, outputs) = layer.feed_forward(Tensor::new(Shape::D2(3, 3), (0..9).map(|x| x as f64).collect()));
        assert_eq!(outputs.values(), &[4.0, 5.0]);

        let (_, input_gradients) = layer.propagate_backward(tape, &Tensor::new(Shape::D2(1, 2), vec![1.0, 2.0]));
        assert_eq!(input_gradients.values(), &[0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_rejects_excessive_margins() {
        assert_eq!(
            CropLayer::new(Shape::D2(3, 3), Padding::new(2, 0, 1, 0)).unwrap_err(),
            ShapeError::CropExceedsInput { shape: Shape::D2(3, 3) },
        );
    }

    #[test]
    fn test_rejects_overflowing_margins() {
        assert_eq!(
            CropLayer::new(Shape::D2(3, 3), Padding::new(usize::MAX, 0, 2, 0)).unwrap_err(),
            ShapeError::CropExceedsInput { shape: Shape::D2(3, 3) },
        );
    }
}
