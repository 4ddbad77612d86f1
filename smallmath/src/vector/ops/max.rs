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

pub fn max(a: &Vector) -> f64 {
    a.iter().fold(f64::NEG_INFINITY, |max, &x| max.max(x))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max() {
        assert_eq!(max(&Vector::from_vec(vec![-3.0, 0.0, -1.0])), 0.0);
        assert_eq!(max(&Vector::from_vec(vec![-3.0])), -3.0);
        assert_eq!(max(&Vector::zeros(0)), f64::NEG_INFINITY);
    }
}
