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

use crate::activation_function::ActivationFunction;

#[derive(Clone, Debug)]
pub struct ReLuActivationFunction;

impl ActivationFunction for ReLuActivationFunction {
    fn f(x: f64) -> f64 {
        x.max(0.0)
    }

    fn f_prime(x: f64) -> f64 {
        if x > 0.0 {
            1.0
        } else {
            0.0
        }
    }
}
