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

use crate::vector::Vector;

pub fn add(a: &Vector, b: &Vector, c: &mut Vector) {
    debug_assert!(a.len() == b.len(), "Operand vectors are different lengths!");
    debug_assert!(a.len() == c.len(), "Source and destination vectors are different lengths!");

    for ((c, a), b) in c.iter_mut().zip(a.iter()).zip(b.iter()) {
        *c = a + b;
    }
}

pub fn add_assign(a: &mut Vector, b: &Vector) {
    debug_assert!(a.len() == b.len(), "Operand vectors are different lengths!");

    for (a, b) in a.iter_mut().zip(b.iter()) {
        *a += b;
    }
}
