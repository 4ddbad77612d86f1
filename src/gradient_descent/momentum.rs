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
use smallmath::Matrix;

use crate::gradient_descent::LearningParameters;

/// Momentum gradient descent with multiplicative weight decay.  Returns `(new_weights, new_momentum)`.
///
/// ```text
/// new_momentum = momentum * old_momentum - rate * gradient
/// new_weights  = weights * (1 - rate * regulariser) + new_momentum
/// ```
pub fn descend_vector(
    parameters: &LearningParameters,
    weights: &Vector,
    gradient: &Vector,
    momentum: &Vector,
) -> (Vector, Vector) {
    assert!(weights.len() == gradient.len(), "weights.len() doesn't match gradient.len()!");
    assert!(weights.len() == momentum.len(), "weights.len() doesn't match momentum.len()!");

    let size = weights.len();

    // new_momentum = momentum * old_momentum - rate * gradient
    let mut new_momentum = Vector::zeros(size);
    let mut step = Vector::zeros(size);
    vector::ops::scale(momentum, parameters.momentum, &mut new_momentum);
    vector::ops::scale(gradient, parameters.rate, &mut step);
    vector::ops::subtract_assign(&mut new_momentum, &step);

    // new_weights = weights * (1 - rate * regulariser) + new_momentum
    let mut new_weights = Vector::zeros(size);
    vector::ops::scale(weights, 1.0 - parameters.rate * parameters.regulariser, &mut new_weights);
    vector::ops::add_assign(&mut new_weights, &new_momentum);

    (new_weights, new_momentum)
}

/// [`descend_vector`](fn.descend_vector.html) for weight matrices.  The rule is element-wise, so the matrix role doesn't
/// matter.
pub fn descend(
    parameters: &LearningParameters,
    weights: &Matrix,
    gradient: &Matrix,
    momentum: &Matrix,
) -> (Matrix, Matrix) {
    assert!(weights.rows() == gradient.rows() && weights.columns() == gradient.columns(), "Dimension mismatch between weights and gradient!");
    assert!(weights.rows() == momentum.rows() && weights.columns() == momentum.columns(), "Dimension mismatch between weights and momentum!");

    let (new_weights, new_momentum) = descend_vector(parameters, weights, gradient, momentum);

    (
        Matrix::from_vec(weights.rows(), weights.columns(), new_weights.into()),
        Matrix::from_vec(weights.rows(), weights.columns(), new_momentum.into()),
    )
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn matrices() -> (Matrix, Matrix, Matrix) {
        (
            Matrix::from_vec(2, 2, vec![1.0, -2.0, 0.5, 4.0]),
            Matrix::from_vec(2, 2, vec![0.1, 0.2, -0.3, 0.4]),
            Matrix::from_vec(2, 2, vec![-1.0, 1.0, 2.0, 0.0]),
        )
    }

    #[test]
    fn test_zero_rate_only_decays_momentum() {
        let (weights, gradient, momentum) = matrices();
        let parameters = LearningParameters::new(0.0, 0.9, 0.5);

        let (new_weights, new_momentum) = descend(&parameters, &weights, &gradient, &momentum);

        for i in 0..4 {
            assert_relative_eq!(new_momentum.as_vector()[i], 0.9 * momentum.as_vector()[i]);
            assert_relative_eq!(new_weights.as_vector()[i], weights.as_vector()[i] + 0.9 * momentum.as_vector()[i]);
        }
    }

    #[test]
    fn test_zero_rate_without_momentum_is_identity() {
        let (weights, gradient, _) = matrices();
        let parameters = LearningParameters::new(0.0, 0.9, 0.5);

        let (new_weights, _) = descend(&parameters, &weights, &gradient, &Matrix::zeros(2, 2));

        assert_eq!(new_weights, weights);
    }

    #[test]
    fn test_plain_gradient_descent() {
        let (weights, gradient, momentum) = matrices();
        let parameters = LearningParameters::new(0.1, 0.0, 0.0);

        let (new_weights, new_momentum) = descend(&parameters, &weights, &gradient, &momentum);

        for i in 0..4 {
            assert_relative_eq!(new_weights.as_vector()[i], weights.as_vector()[i] - 0.1 * gradient.as_vector()[i]);
            assert_relative_eq!(new_momentum.as_vector()[i], -0.1 * gradient.as_vector()[i]);
        }
    }

    #[test]
    fn test_full_rule() {
        let (weights, gradient, momentum) = matrices();
        let parameters = LearningParameters::new(0.01, 0.9, 0.0005);

        let (new_weights, new_momentum) = descend(&parameters, &weights, &gradient, &momentum);

        for i in 0..4 {
            let expected_momentum = 0.9 * momentum.as_vector()[i] - 0.01 * gradient.as_vector()[i];
            assert_relative_eq!(new_momentum.as_vector()[i], expected_momentum);
            assert_relative_eq!(new_weights.as_vector()[i], weights.as_vector()[i] * (1.0 - 0.01 * 0.0005) + expected_momentum);
        }
    }

    #[test]
    fn test_vector_form_matches() {
        let weights = Vector::from_vec(vec![1.0, 2.0]);
        let gradient = Vector::from_vec(vec![0.5, -0.5]);
        let momentum = Vector::from_vec(vec![0.25, 0.0]);
        let parameters = LearningParameters::new(0.2, 0.5, 0.1);

        let (new_weights, new_momentum) = descend_vector(&parameters, &weights, &gradient, &momentum);

        assert_relative_eq!(new_momentum[0], 0.5 * 0.25 - 0.2 * 0.5);
        assert_relative_eq!(new_momentum[1], 0.2 * 0.5);
        assert_relative_eq!(new_weights[0], 1.0 * 0.98 + new_momentum[0]);
        assert_relative_eq!(new_weights[1], 2.0 * 0.98 + new_momentum[1]);
    }
}
