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

use std::fmt;
use std::mem;

use crate::error::ShapeError;

/// The dimensions of a [`Tensor`](struct.Tensor.html).
///
/// `D3` images are stored channel by channel, so a `D2` plane is the same thing as a `D3` image with a single channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// A vector of the given length.
    D1(usize),
    /// A plane of `rows` by `columns`.
    D2(usize, usize),
    /// An image of `rows` by `columns` with the given number of channels.
    D3(usize, usize, usize),
}

impl Shape {
    /// The total number of values.  Only meaningful for shapes that pass [`validate`](#method.validate).
    pub fn len(&self) -> usize {
        match *self {
            Shape::D1(length) => length,
            Shape::D2(rows, columns) => rows * columns,
            Shape::D3(rows, columns, channels) => rows * columns * channels,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn rows(&self) -> usize {
        match *self {
            Shape::D1(_) => 1,
            Shape::D2(rows, _) | Shape::D3(rows, _, _) => rows,
        }
    }

    pub fn columns(&self) -> usize {
        match *self {
            Shape::D1(length) => length,
            Shape::D2(_, columns) | Shape::D3(_, columns, _) => columns,
        }
    }

    pub fn channels(&self) -> usize {
        match *self {
            Shape::D1(_) | Shape::D2(_, _) => 1,
            Shape::D3(_, _, channels) => channels,
        }
    }

    /// The dimensions of the matrix backing a tensor of this shape: the channels are stacked vertically.
    pub fn matrix_dimensions(&self) -> (usize, usize) {
        (self.channels() * self.rows(), self.columns())
    }

    /// `true` for planes and multi-channel images.
    pub fn is_image(&self) -> bool {
        match *self {
            Shape::D1(_) => false,
            Shape::D2(_, _) | Shape::D3(_, _, _) => true,
        }
    }

    /// Builds an image shape with the same rank as `self`.
    ///
    /// Returns `None` if `self` is a plane and `channels` isn't 1, or if `self` isn't an image.
    pub fn with_extents(&self, rows: usize, columns: usize, channels: usize) -> Option<Shape> {
        match *self {
            Shape::D1(_) => None,
            Shape::D2(_, _) if channels == 1 => Some(Shape::D2(rows, columns)),
            Shape::D2(_, _) => None,
            Shape::D3(_, _, _) => Some(Shape::D3(rows, columns, channels)),
        }
    }

    /// Checks that every extent is nonzero and that a tensor of this shape is addressable.
    pub fn validate(&self) -> Result<(), ShapeError> {
        let (rows, columns, channels) = match *self {
            Shape::D1(length) => (1, length, 1),
            Shape::D2(rows, columns) => (rows, columns, 1),
            Shape::D3(rows, columns, channels) => (rows, columns, channels),
        };

        if rows == 0 || columns == 0 || channels == 0 {
            return Err(ShapeError::ZeroDimension(*self));
        }

        let bytes = rows
            .checked_mul(columns)
            .and_then(|length| length.checked_mul(channels))
            .and_then(|length| length.checked_mul(mem::size_of::<f64>()));

        match bytes {
            Some(bytes) if bytes <= isize::MAX as usize => Ok(()),
            _ => Err(ShapeError::TooLarge(*self)),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Shape::D1(length) => write!(f, "D1({})", length),
            Shape::D2(rows, columns) => write!(f, "D2({}x{})", rows, columns),
            Shape::D3(rows, columns, channels) => write!(f, "D3({}x{}x{})", rows, columns, channels),
        }
    }
}

/// The number of positions a kernel fits into along one axis.
///
/// `output = (input - kernel) / stride + 1`, and the division must be exact.
pub fn output_extent(input: usize, kernel: usize, stride: usize) -> Result<usize, ShapeError> {
    if stride == 0 {
        return Err(ShapeError::ZeroStride);
    }

    if kernel == 0 {
        return Err(ShapeError::ZeroKernel);
    }

    if kernel > input {
        return Err(ShapeError::KernelTooLarge { input, kernel });
    }

    if (input - kernel) % stride != 0 {
        return Err(ShapeError::UnevenStride { input, kernel, stride });
    }

    Ok((input - kernel) / stride + 1)
}
