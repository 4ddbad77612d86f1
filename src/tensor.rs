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

use std::ops::{Add, Mul, Sub};

use rand::Rng;

use smallmath::vector::{self, Vector};
use smallmath::Matrix;

use crate::shape::Shape;

/// A dense array of `f64` values with a fixed [`Shape`](enum.Shape.html).
///
/// The values are kept in one contiguous buffer ordered by channel, then row, then column.  The backing matrix has the
/// dimensions given by [`Shape::matrix_dimensions`](enum.Shape.html#method.matrix_dimensions).
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
    shape: Shape,
    values: Matrix,
}

impl Tensor {
    /// # Panics
    /// Panics if `values` doesn't hold exactly `shape.len()` values.
    pub fn new(shape: Shape, values: Vec<f64>) -> Tensor {
        assert!(values.len() == shape.len(), "Incorrect number of values for tensor shape {}!", shape);

        let (rows, columns) = shape.matrix_dimensions();
        Tensor {
            shape,
            values: Matrix::from_vec(rows, columns, values),
        }
    }

    /// Wraps a matrix, reinterpreting its row-major buffer with the given shape.
    ///
    /// # Panics
    /// Panics if the matrix doesn't hold exactly `shape.len()` values.
    pub fn from_matrix(shape: Shape, matrix: Matrix) -> Tensor {
        assert!(matrix.len() == shape.len(), "Incorrect number of values for tensor shape {}!", shape);

        let (rows, columns) = shape.matrix_dimensions();
        Tensor {
            shape,
            values: matrix.reshape(rows, columns),
        }
    }

    pub fn zeros(shape: Shape) -> Tensor {
        Tensor::new(shape, vec![0.0; shape.len()])
    }

    /// A tensor that is zero everywhere except for a 1.0 at flat position `index`.
    pub fn one_hot(shape: Shape, index: usize) -> Tensor {
        assert!(index < shape.len(), "One-hot index out of range for {}!", shape);

        let mut tensor = Tensor::zeros(shape);
        tensor.values_mut()[index] = 1.0;
        tensor
    }

    /// A tensor of values drawn uniformly from `[-1, 1)`.
    pub fn random<R>(shape: Shape, rng: &mut R) -> Tensor where R: Rng {
        Tensor::new(shape, (0..shape.len()).map(|_| rng.gen_range(-1.0..1.0)).collect())
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn as_matrix(&self) -> &Matrix {
        &self.values
    }

    pub fn as_matrix_mut(&mut self) -> &mut Matrix {
        &mut self.values
    }

    pub fn into_matrix(self) -> Matrix {
        self.values
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// The value at `(row, column)` of the given channel.  Vectors have a single row.
    pub fn get(&self, row: usize, column: usize, channel: usize) -> f64 {
        debug_assert!(row < self.shape.rows() && column < self.shape.columns() && channel < self.shape.channels(), "Tensor index out of bounds!");
        self.values[(channel * self.shape.rows() + row, column)]
    }

    /// Changes the shape without moving any data.
    ///
    /// # Panics
    /// Panics if `shape` holds a different number of values.
    pub fn reshape(self, shape: Shape) -> Tensor {
        Tensor::from_matrix(shape, self.values)
    }

    /// The largest value.
    pub fn max(&self) -> f64 {
        self.values.max()
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    fn zip_with(&self, rhs: &Tensor, op: fn(&Vector, &Vector, &mut Vector)) -> Tensor {
        assert!(self.shape == rhs.shape, "Tensor shapes {} and {} don't match!", self.shape, rhs.shape);

        let mut result = Tensor::zeros(self.shape);
        op(&self.values, &rhs.values, &mut result.values);
        result
    }
}

impl<'a> Add<&'a Tensor> for &'a Tensor {
    type Output = Tensor;

    fn add(self, rhs: &Tensor) -> Tensor {
        self.zip_with(rhs, vector::ops::add)
    }
}

impl<'a> Sub<&'a Tensor> for &'a Tensor {
    type Output = Tensor;

    fn sub(self, rhs: &Tensor) -> Tensor {
        self.zip_with(rhs, vector::ops::subtract)
    }
}

impl<'a> Mul<&'a Tensor> for &'a Tensor {
    type Output = Tensor;

    /// Element-wise product.
    fn mul(self, rhs: &Tensor) -> Tensor {
        self.zip_with(rhs, vector::ops::multiply)
    }
}

impl<'a> Mul<f64> for &'a Tensor {
    type Output = Tensor;

    fn mul(self, rhs: f64) -> Tensor {
        let mut result = Tensor::zeros(self.shape);
        vector::ops::scale(&self.values, rhs, &mut result.values);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_layout() {
        let tensor = Tensor::new(Shape::D3(2, 2, 2), (0..8).map(|x| x as f64).collect());

        assert_eq!(tensor.as_matrix().rows(), 4);
        assert_eq!(tensor.as_matrix().columns(), 2);
        assert_eq!(tensor.get(0, 1, 0), 1.0);
        assert_eq!(tensor.get(1, 0, 1), 6.0);
    }

    #[test]
    fn test_reshape_keeps_order() {
        let tensor = Tensor::new(Shape::D3(2, 2, 2), (0..8).map(|x| x as f64).collect());
        let flat = tensor.clone().reshape(Shape::D1(8));

        assert_eq!(flat.values(), tensor.values());
        assert_eq!(flat.as_matrix().rows(), 1);
        assert_eq!(flat.reshape(Shape::D3(2, 2, 2)), tensor);
    }

    #[test]
    fn test_arithmetic() {
        let a = Tensor::new(Shape::D2(1, 3), vec![1.0, -2.0, 3.0]);
        let b = Tensor::one_hot(Shape::D2(1, 3), 1);

        assert_eq!((&a * &b).values(), &[0.0, -2.0, 0.0]);
        assert_eq!((&a + &b).values(), &[1.0, -1.0, 3.0]);
        assert_eq!((&a - &b).values(), &[1.0, -3.0, 3.0]);
        assert_eq!((&a * 0.5).values(), &[0.5, -1.0, 1.5]);
        assert_eq!((&a * &b).max(), 0.0);
        assert_eq!(a.sum(), 2.0);
    }

    #[test]
    #[should_panic(expected = "don't match")]
    fn test_mismatched_shapes_panic() {
        let _ = &Tensor::zeros(Shape::D1(4)) + &Tensor::zeros(Shape::D2(2, 2));
    }
}
