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
use std::marker::PhantomData;

use log::trace;

use crate::activation_function::ActivationFunction;
use crate::error::{SerializationError, ShapeError};
use crate::layer::{assert_shape, Gradient, Layer, Tape};
use crate::serialization::{read_shape, write_shape, Identifiable, Serializable};
use crate::shape::Shape;
use crate::tensor::Tensor;

/// Applies `F` to every value, keeping the shape.
#[derive(Clone, Debug)]
pub struct ActivationLayer<F> {
    shape: Shape,
    activation_function: PhantomData<F>,
}

impl<F> ActivationLayer<F> where F: ActivationFunction {
    pub fn new(shape: Shape) -> Result<ActivationLayer<F>, ShapeError> {
        shape.validate()?;

        Ok(ActivationLayer {
            shape,
            activation_function: PhantomData,
        })
    }
}

impl<F> Layer for ActivationLayer<F> where F: ActivationFunction + Identifiable {
    fn input_shape(&self) -> Shape {
        self.shape
    }

    fn output_shape(&self) -> Shape {
        self.shape
    }

    fn feed_forward(&self, inputs: Tensor) -> (Tape, Tensor) {
        assert_shape("ActivationLayer", self.shape, &inputs);
        trace!("{} forward: {}", Self::identifier(), self.shape);

        let mut outputs = Tensor::zeros(self.shape);
        F::f_vector(inputs.as_matrix(), outputs.as_matrix_mut());
        debug_assert!(outputs.values().iter().all(|x| !x.is_nan()), "NaN here!");

        (Tape::Inputs(inputs), outputs)
    }

    fn propagate_backward(&self, tape: Tape, gradients: &Tensor) -> (Gradient, Tensor) {
        assert_shape("ActivationLayer", self.shape, gradients);

        let inputs = tape.into_inputs();
        assert_shape("ActivationLayer", self.shape, &inputs);

        // input_gradients = f'(inputs) .* gradients
        let mut input_gradients = Tensor::zeros(self.shape);
        F::f_prime_vector(inputs.as_matrix(), input_gradients.as_matrix_mut());
        *input_gradients.as_matrix_mut().as_vector_mut() *= gradients.as_matrix().as_vector();

        (Gradient::None, input_gradients)
    }

    fn boxed_clone(&self) -> Box<dyn Layer> {
        Box::new(self.clone())
    }
}

impl<F> Serializable for ActivationLayer<F> where F: ActivationFunction + Identifiable {
    fn read_from(reader: &mut dyn Read) -> Result<ActivationLayer<F>, SerializationError> {
        Ok(ActivationLayer::new(read_shape(reader)?)?)
    }

    fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
        write_shape(writer, self.shape)
    }
}

#[cfg(test)]
mod tests {
    use crate::activation_function::{LogitActivationFunction, ReLuActivationFunction};

    use super::*;

    #[test]
    fn test_relu_layer() {
        let layer = ActivationLayer::<ReLuActivationFunction>::new(Shape::D2(2, 2)).unwrap();
        let (tape, outputs) = layer.feed_forward(Tensor::new(Shape::D2(2, 2), vec![-1.0, 2.0, 0.0, 3.0]));

        assert_eq!(outputs.values(), &[0.0, 2.0, 0.0, 3.0]);

        let (gradient, input_gradients) = layer.propagate_backward(tape, &Tensor::new(Shape::D2(2, 2), vec![5.0, 6.0, 7.0, 8.0]));

        assert_eq!(gradient, Gradient::None);
        assert_eq!(input_gradients.values(), &[0.0, 6.0, 0.0, 8.0]);
    }

    #[test]
    fn test_identifier() {
        assert_eq!(ActivationLayer::<LogitActivationFunction>::identifier(), "ActivationLayer<LogitActivationFunction>");
        assert_eq!(
            ActivationLayer::<ReLuActivationFunction>::new(Shape::D1(3)).unwrap().get_identifier(),
            "ActivationLayer<ReLuActivationFunction>",
        );
    }
}
