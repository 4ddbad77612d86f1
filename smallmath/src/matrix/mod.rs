//
// This file is part of smallmath.
//
// smallmath is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// smallmath is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with smallmath. If not, see <http://www.gnu.org/licenses/>.
//
// Copyright 2017 Chris Foster
//

use std::ops::{Deref, DerefMut, Index, IndexMut, Mul};

use crate::vector::Vector;

/// A dense, row-major matrix.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Matrix {
    rows: usize,
    columns: usize,
    values: Vector,
}

impl Matrix {
    /// Constructs a matrix from a `Vec<f64>` holding its rows back to back.
    ///
    /// # Panics
    /// Panics if the length of `values` isn't equal to `rows` times `columns`.
    pub fn from_vec(rows: usize, columns: usize, values: Vec<f64>) -> Matrix {
        assert!(values.len() == rows * columns, "Incorrect number of values for matrix!");

        Matrix {
            rows,
            columns,
            values: Vector::from_vec(values),
        }
    }

    /// Constructs a matrix from values listed column by column.
    ///
    /// # Panics
    /// Panics if the length of `values` isn't equal to `rows` times `columns`.
    pub fn from_column_major(rows: usize, columns: usize, values: &[f64]) -> Matrix {
        assert!(values.len() == rows * columns, "Incorrect number of values for matrix!");

        let mut matrix = Matrix::zeros(rows, columns);
        for column in 0..columns {
            for row in 0..rows {
                matrix[(row, column)] = values[column * rows + row];
            }
        }
        matrix
    }

    pub fn zeros(rows: usize, columns: usize) -> Matrix {
        Matrix::from_vec(rows, columns, vec![0.0; rows * columns])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Borrows the matrix as a vector of length `self.rows()` * `self.columns()`.
    pub fn as_vector(&self) -> &Vector {
        &self.values
    }

    /// Mutably borrows the matrix as a vector of length `self.rows()` * `self.columns()`.
    pub fn as_vector_mut(&mut self) -> &mut Vector {
        &mut self.values
    }

    /// Reinterprets the row-major buffer with new dimensions.  No data is moved.
    ///
    /// # Panics
    /// Panics if `rows` times `columns` doesn't match the current number of elements.
    pub fn reshape(self, rows: usize, columns: usize) -> Matrix {
        assert!(rows * columns == self.rows * self.columns, "Cannot reshape matrix to a different number of elements!");

        Matrix {
            rows,
            columns,
            values: self.values,
        }
    }

    /// Returns the transpose of the matrix.  This will allocate and return a new matrix.  To avoid an additional allocation, use
    /// [`matrix::ops::transpose`](ops/fn.transpose.html).
    pub fn transpose(&self) -> Matrix {
        let mut transposed = Matrix::zeros(self.columns, self.rows);
        ops::transpose(self, &mut transposed);
        transposed
    }

    /// Returns the values listed column by column.
    pub fn to_column_major(&self) -> Vec<f64> {
        self.transpose().into()
    }
}

impl Deref for Matrix {
    type Target = Vector;

    fn deref(&self) -> &Vector {
        &self.values
    }
}

impl DerefMut for Matrix {
    fn deref_mut(&mut self) -> &mut Vector {
        &mut self.values
    }
}

impl From<Matrix> for Vec<f64> {
    fn from(matrix: Matrix) -> Vec<f64> {
        matrix.values.into()
    }
}

impl Index<usize> for Matrix {
    type Output = [f64];

    /// Returns the specified row of the matrix.
    fn index(&self, index: usize) -> &[f64] {
        &self.values[index * self.columns..(index + 1) * self.columns]
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    /// Returns the specified element of the matrix.
    fn index(&self, (row, column): (usize, usize)) -> &f64 {
        debug_assert!(row < self.rows && column < self.columns, "Matrix index out of bounds!");
        &self.values[row * self.columns + column]
    }
}

impl IndexMut<usize> for Matrix {
    /// Returns the specified row of the matrix.
    fn index_mut(&mut self, index: usize) -> &mut [f64] {
        let columns = self.columns;
        &mut self.values[index * columns..(index + 1) * columns]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    /// Returns the specified element of the matrix.
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut f64 {
        debug_assert!(row < self.rows && column < self.columns, "Matrix index out of bounds!");
        let columns = self.columns;
        &mut self.values[row * columns + column]
    }
}

impl<'a> Mul<&'a Matrix> for &'a Matrix {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Matrix {
        let mut result = Matrix::zeros(self.rows, rhs.columns);
        ops::multiply(self, rhs, &mut result);
        result
    }
}

pub mod ops;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_major_round_trip() {
        let matrix = Matrix::from_vec(2, 3, vec![
            1.0, 2.0, 3.0,
            4.0, 5.0, 6.0,
        ]);

        let column_major = matrix.to_column_major();
        assert_eq!(column_major, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert_eq!(Matrix::from_column_major(2, 3, &column_major), matrix);
    }

    #[test]
    fn test_reshape_keeps_data() {
        let matrix = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let reshaped = matrix.clone().reshape(3, 2);

        assert_eq!(reshaped.rows(), 3);
        assert_eq!(reshaped[1], [3.0, 4.0]);
        assert_eq!(reshaped.as_vector(), matrix.as_vector());
    }

    #[test]
    #[should_panic(expected = "Incorrect number of values for matrix!")]
    fn test_from_vec_wrong_length() {
        Matrix::from_vec(2, 2, vec![1.0; 3]);
    }
}
