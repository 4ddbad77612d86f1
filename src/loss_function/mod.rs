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

use smallmath::Vector;

pub use self::mean_squared_error::MeanSquaredErrorLossFunction;

/// Compares network outputs `x` with targets `y`.  `l_prime` is the derivative with respect to the output and seeds the
/// backward pass.
pub trait LossFunction {
    fn l(x: f64, y: f64) -> f64;
    fn l_prime(x: f64, y: f64) -> f64;

    fn l_vector(outputs: &Vector, targets: &Vector, loss: &mut Vector) {
        debug_assert!(outputs.len() == targets.len() && outputs.len() == loss.len(), "Vector dimensions don't match!");
        for i in 0..outputs.len() {
            loss[i] = Self::l(outputs[i], targets[i]);
        }
    }

    fn l_prime_vector(outputs: &Vector, targets: &Vector, loss_prime: &mut Vector) {
        debug_assert!(outputs.len() == targets.len() && outputs.len() == loss_prime.len(), "Vector dimensions don't match!");
        for i in 0..outputs.len() {
            loss_prime[i] = Self::l_prime(outputs[i], targets[i]);
        }
    }
}

mod mean_squared_error;
