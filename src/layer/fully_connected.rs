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

use std::io::{self, Read, Write};

use log::trace;
use rand::Rng;
use rand_distr::StandardNormal;

use smallmath::{Matrix, Vector};

use crate::error::{SerializationError, ShapeError};
use crate::gradient_descent::{self, LearningParameters};
use crate::layer::{assert_shape, Gradient, Layer, Tape};
use crate::serialization::{read_matrix, read_vector, write_matrix, write_vector};
use crate::shape::Shape;
use crate::tensor::Tensor;

/// An affine map from `D1(inputs)` to `D1(outputs)`.
#[derive(Clone, Debug)]
pub struct FullyConnectedLayer {
    pub(crate) weights: Matrix,
    pub(crate) biases: Vector,

    weights_momentum: Matrix,
    biases_momentum: Vector,
}

/// The gradients of a [`FullyConnectedLayer`](struct.FullyConnectedLayer.html)'s weights and biases.
#[derive(Clone, Debug, PartialEq)]
pub struct FullyConnectedGradient {
    pub weights: Matrix,
    pub biases: Vector,
}

impl FullyConnectedLayer {
    pub fn new<R>(inputs: usize, outputs: usize, rng: &mut R) -> Result<FullyConnectedLayer, ShapeError> where R: Rng {
        Shape::D2(inputs, outputs).validate()?;

        let scale = (2.0 / outputs as f64).sqrt();
        let weights = Matrix::from_vec(
            inputs,
            outputs,
            (0..inputs * outputs).map(|_| scale * rng.sample::<f64, _>(StandardNormal)).collect(),
        );

        FullyConnectedLayer::from_parameters(weights, Vector::zeros(outputs))
    }

    /// Builds a layer around an `inputs x outputs` weight matrix and `outputs` biases, with zero momentum.
    pub fn from_parameters(weights: Matrix, biases: Vector) -> Result<FullyConnectedLayer, ShapeError> {
        Shape::D2(weights.rows(), weights.columns()).validate()?;

        if biases.len() != weights.columns() {
            return Err(ShapeError::ParameterMismatch {
                expected_rows: 1,
                expected_columns: weights.columns(),
                found_rows: 1,
                found_columns: biases.len(),
            });
        }

        Ok(FullyConnectedLayer {
            weights_momentum: Matrix::zeros(weights.rows(), weights.columns()),
            biases_momentum: Vector::zeros(biases.len()),
            weights,
            biases,
        })
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn biases(&self) -> &Vector {
        &self.biases
    }
}

impl Layer for FullyConnectedLayer {
    fn input_shape(&self) -> Shape {
        Shape::D1(self.weights.rows())
    }

    fn output_shape(&self) -> Shape {
        Shape::D1(self.weights.columns())
    }

    fn feed_forward(&self, inputs: Tensor) -> (Tape, Tensor) {
        assert_shape("FullyConnectedLayer", self.input_shape(), &inputs);
        trace!("FullyConnectedLayer forward: {} -> {}", self.input_shape(), self.output_shape());

        // outputs = inputs * weights + biases
        let mut outputs = inputs.as_matrix() * &self.weights;
        *outputs.as_vector_mut() += &self.biases;

        (Tape::Inputs(inputs), Tensor::from_matrix(self.output_shape(), outputs))
    }

    fn propagate_backward(&self, tape: Tape, gradients: &Tensor) -> (Gradient, Tensor) {
        assert_shape("FullyConnectedLayer", self.output_shape(), gradients);
        trace!("FullyConnectedLayer backward: {} -> {}", self.output_shape(), self.input_shape());

        let inputs = tape.into_inputs();
        assert_shape("FullyConnectedLayer", self.input_shape(), &inputs);

        // weight_gradients = inputs.transpose() * gradients
        let weight_gradients = &inputs.as_matrix().transpose() * gradients.as_matrix();

        // input_gradients = gradients * weights.transpose()
        let input_gradients = gradients.as_matrix() * &self.weights.transpose();

        (
            Gradient::FullyConnected(FullyConnectedGradient {
                weights: weight_gradients,
                biases: gradients.as_matrix().as_vector().clone(),
            }),
            Tensor::from_matrix(self.input_shape(), input_gradients),
        )
    }

    fn apply_gradient(&mut self, gradient: &Gradient, parameters: &LearningParameters) {
        let gradient = match *gradient {
            Gradient::FullyConnected(ref gradient) => gradient,
            _ => panic!("FullyConnectedLayer received a gradient for a different layer!"),
        };

        let (weights, weights_momentum) = gradient_descent::descend(parameters, &self.weights, &gradient.weights, &self.weights_momentum);
        let (biases, biases_momentum) = gradient_descent::descend_vector(parameters, &self.biases, &gradient.biases, &self.biases_momentum);

        self.weights = weights;
        self.weights_momentum = weights_momentum;
        self.biases = biases;
        self.biases_momentum = biases_momentum;
    }

    fn write_parameters(&self, writer: &mut dyn Write) -> io::Result<()> {
        write_matrix(writer, &self.weights)?;
        write_vector(writer, &self.biases)
    }

    fn read_parameters(&mut self, reader: &mut dyn Read) -> Result<(), SerializationError> {
        let weights = read_matrix(reader, self.weights.rows(), self.weights.columns())?;
        let biases = read_vector(reader, self.biases.len())?;

        self.weights_momentum = Matrix::zeros(weights.rows(), weights.columns());
        self.biases_momentum = Vector::zeros(biases.len());
        self.weights = weights;
        self.biases = biases;
        Ok(())
    }

    fn boxed_clone(&self) -> Box<dyn Layer> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer() -> FullyConnectedLayer {
        FullyConnectedLayer::from_parameters(
            Matrix::from_vec(3, 2, vec![
                1.0, 0.0,
                2.0, -1.0,
                0.0, 3.0,
            ]),
            Vector::from_vec(vec![0.5, -0.5]),
        ).unwrap()
    }

    #[test]
    fn test_feed_forward() {
        let (tape, outputs) = layer().feed_forward(Tensor::new(Shape::D1(3), vec![1.0, 2.0, 3.0]));

        assert_eq!(outputs, Tensor::new(Shape::D1(2), vec![5.5, 6.5]));
        assert_eq!(tape, Tape::Inputs(Tensor::new(Shape::D1(3), vec![1.0, 2.0, 3.0])));
    }

    #[test]
    fn test_propagate_backward() {
        let layer = layer();
        let (tape, _) = layer.feed_forward(Tensor::new(Shape::D1(3), vec![1.0, 2.0, 3.0]));
        let (gradient, input_gradients) = layer.propagate_backward(tape, &Tensor::new(Shape::D1(2), vec![1.0, -1.0]));

        assert_eq!(gradient, Gradient::FullyConnected(FullyConnectedGradient {
            weights: Matrix::from_vec(3, 2, vec![
                1.0, -1.0,
                2.0, -2.0,
                3.0, -3.0,
            ]),
            biases: Vector::from_vec(vec![1.0, -1.0]),
        }));
        assert_eq!(input_gradients, Tensor::new(Shape::D1(3), vec![1.0, 3.0, -3.0]));
    }

    #[test]
    fn test_apply_gradient_moves_biases() {
        let mut layer = layer();
        let gradient = Gradient::FullyConnected(FullyConnectedGradient {
            weights: Matrix::zeros(3, 2),
            biases: Vector::from_vec(vec![1.0, -1.0]),
        });

        layer.apply_gradient(&gradient, &LearningParameters::new(0.5, 0.0, 0.0));

        assert_eq!(&layer.biases()[..], &[0.0, 0.0]);
        assert_eq!(layer.weights(), &Matrix::from_vec(3, 2, vec![1.0, 0.0, 2.0, -1.0, 0.0, 3.0]));
    }

    #[test]
    fn test_rejects_mismatched_biases() {
        assert_eq!(
            FullyConnectedLayer::from_parameters(Matrix::zeros(3, 2), Vector::zeros(3)).unwrap_err(),
            ShapeError::ParameterMismatch { expected_rows: 1, expected_columns: 2, found_rows: 1, found_columns: 3 },
        );
    }
}
