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

#[cfg(feature = "with_blas")]
use cblas;

use crate::vector::Vector;

/// `c = a * b`
#[cfg(feature = "with_blas")]
pub fn scale(a: &Vector, b: f64, c: &mut Vector) {
    debug_assert!(a.len() == c.len(), "Source and destination vectors are different lengths!");

    c.zero();
    unsafe { cblas::daxpy(
        a.len() as i32, b, a, 1, c, 1,
    ) };
}

#[cfg(feature = "with_blas")]
pub fn scale_assign(a: &mut Vector, b: f64) {
    unsafe { cblas::dscal(
        a.len() as i32, b, a, 1,
    ) };
}

/// `c = a * b`
#[cfg(not(feature = "with_blas"))]
pub fn scale(a: &Vector, b: f64, c: &mut Vector) {
    debug_assert!(a.len() == c.len(), "Source and destination vectors are different lengths!");

    for (c, a) in c.iter_mut().zip(a.iter()) {
        *c = a * b;
    }
}

#[cfg(not(feature = "with_blas"))]
pub fn scale_assign(a: &mut Vector, b: f64) {
    for a in a.iter_mut() {
        *a *= b;
    }
}
