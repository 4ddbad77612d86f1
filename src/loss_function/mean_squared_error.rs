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

use smallmath::vector::{self, Vector};

use crate::loss_function::LossFunction;

pub struct MeanSquaredErrorLossFunction;

impl LossFunction for MeanSquaredErrorLossFunction {
    fn l(x: f64, y: f64) -> f64 {
        let difference = x - y;
        difference * difference / 2.0
    }

    fn l_prime(x: f64, y: f64) -> f64 {
        x - y
    }

    fn l_prime_vector(outputs: &Vector, targets: &Vector, loss_prime: &mut Vector) {
        vector::ops::subtract(outputs, targets, loss_prime);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_squared_error() {
        assert_eq!(MeanSquaredErrorLossFunction::l(0.5, 1.5), 0.5);
        assert_eq!(MeanSquaredErrorLossFunction::l_prime(0.5, 1.5), -1.0);

        let outputs = Vector::from_vec(vec![1.0, 2.0, 3.0]);
        let targets = Vector::from_vec(vec![0.0, 2.0, 5.0]);
        let mut loss = Vector::zeros(3);

        MeanSquaredErrorLossFunction::l_vector(&outputs, &targets, &mut loss);
        assert_eq!(&loss[..], &[0.5, 0.0, 2.0]);

        MeanSquaredErrorLossFunction::l_prime_vector(&outputs, &targets, &mut loss);
        assert_eq!(&loss[..], &[1.0, 0.0, -2.0]);
    }
}
