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

use std::ops::{Add, AddAssign, Deref, DerefMut, Mul, MulAssign, Sub, SubAssign};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vector {
    values: Vec<f64>,
}

impl Vector {
    /// Constructs a vector from a `Vec<f64>`.
    pub fn from_vec(values: Vec<f64>) -> Vector {
        Vector {
            values,
        }
    }

    pub fn zeros(size: usize) -> Vector {
        Vector::from_vec(vec![0.0; size])
    }

    /// Clears the vector to all zeros.
    pub fn zero(&mut self) {
        for value in self.values.iter_mut() {
            *value = 0.0;
        }
    }

    /// Returns the largest element, or negative infinity for an empty vector.
    pub fn max(&self) -> f64 {
        ops::max(self)
    }
}

impl From<Vector> for Vec<f64> {
    fn from(vector: Vector) -> Vec<f64> {
        vector.values
    }
}

impl Deref for Vector {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.values
    }
}

impl DerefMut for Vector {
    fn deref_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }
}

impl<'a> Add<&'a Vector> for &'a Vector {
    type Output = Vector;

    /// Performs the element-wise addition of the vector and `rhs`.  The vectors must be the same length.  This allocates a new vector.
    fn add(self, rhs: &Vector) -> Vector {
        let mut result = Vector::zeros(self.len());
        ops::add(self, rhs, &mut result);
        result
    }
}

impl<'a> AddAssign<&'a Vector> for Vector {
    fn add_assign(&mut self, rhs: &Vector) {
        ops::add_assign(self, rhs);
    }
}

impl<'a> Sub<&'a Vector> for &'a Vector {
    type Output = Vector;

    fn sub(self, rhs: &Vector) -> Vector {
        let mut result = Vector::zeros(self.len());
        ops::subtract(self, rhs, &mut result);
        result
    }
}

impl<'a> SubAssign<&'a Vector> for Vector {
    fn sub_assign(&mut self, rhs: &Vector) {
        ops::subtract_assign(self, rhs);
    }
}

impl<'a> Mul<f64> for &'a Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        let mut result = Vector::zeros(self.len());
        ops::scale(self, rhs, &mut result);
        result
    }
}

impl<'a> Mul<&'a Vector> for &'a Vector {
    type Output = Vector;

    /// Element-wise product.
    fn mul(self, rhs: &Vector) -> Vector {
        let mut result = Vector::zeros(self.len());
        ops::multiply(self, rhs, &mut result);
        result
    }
}

impl MulAssign<f64> for Vector {
    fn mul_assign(&mut self, rhs: f64) {
        ops::scale_assign(self, rhs);
    }
}

impl<'a> MulAssign<&'a Vector> for Vector {
    fn mul_assign(&mut self, rhs: &Vector) {
        ops::multiply_assign(self, rhs);
    }
}

pub mod ops;
