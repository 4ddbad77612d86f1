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

use crate::matrix::Matrix;

/// `c = a * b`.  Any previous contents of `c` are overwritten.
#[cfg(feature = "with_blas")]
pub fn multiply(a: &Matrix, b: &Matrix, c: &mut Matrix) {
    debug_assert!(a.columns() == b.rows(), "Invalid matrix dimensions for multiplication!");
    debug_assert!(a.rows() == c.rows() && b.columns() == c.columns(), "Invalid destination matrix dimensions for multiplication!");

    let (m, k, n) = (a.rows() as i32, b.rows() as i32, b.columns() as i32);
    unsafe { cblas::dgemm(
        cblas::Layout::RowMajor, cblas::Transpose::None, cblas::Transpose::None,
        m, n, k,
        1.0, a, k,
        b, n,
        0.0, c, n,
    ) };
}

/// `c = a * b`.  Any previous contents of `c` are overwritten.
#[cfg(not(feature = "with_blas"))]
pub fn multiply(a: &Matrix, b: &Matrix, c: &mut Matrix) {
    debug_assert!(a.columns() == b.rows(), "Invalid matrix dimensions for multiplication!");
    debug_assert!(a.rows() == c.rows() && b.columns() == c.columns(), "Invalid destination matrix dimensions for multiplication!");

    c.zero();

    // i-k-j order keeps the inner loop on contiguous rows of b and c
    for i in 0..a.rows() {
        for k in 0..a.columns() {
            let a_ik = a[(i, k)];
            if a_ik == 0.0 {
                continue;
            }

            let b_row = &b[k];
            let c_row = &mut c[i];
            for (c_ij, b_kj) in c_row.iter_mut().zip(b_row.iter()) {
                *c_ij += a_ik * b_kj;
            }
        }
    }
}
