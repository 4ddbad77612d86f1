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

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;

use crate::error::{SerializationError, ShapeError};
use crate::gradient_descent::LearningParameters;
use crate::layer::{Gradient, Layer, Tape};
use crate::loss_function::LossFunction;
use crate::serialization::{read_layer, read_string, read_usize, write_string, write_usize, Identifiable, Serializable};
use crate::shape::Shape;
use crate::tensor::Tensor;

/// A chain of layers, each feeding the next.
///
/// Running the network never changes it.  Training goes through [`apply_update`](#method.apply_update), which consumes
/// the network and returns the updated one.
#[derive(Clone, Debug)]
pub struct Network {
    layers: Vec<Box<dyn Layer>>,
}

impl Network {
    /// Checks that every layer's output shape is the next layer's input shape.
    pub fn new(layers: Vec<Box<dyn Layer>>) -> Result<Network, ShapeError> {
        if layers.is_empty() {
            return Err(ShapeError::EmptyNetwork);
        }

        for (index, pair) in layers.windows(2).enumerate() {
            if pair[0].output_shape() != pair[1].input_shape() {
                return Err(ShapeError::LayerMismatch {
                    index,
                    output: pair[0].output_shape(),
                    input: pair[1].input_shape(),
                });
            }
        }

        let network = Network {
            layers,
        };
        debug!("Built a network of {} layers: {} -> {}", network.layers.len(), network.input_shape(), network.output_shape());
        Ok(network)
    }

    /// Reads a network written by [`to_file`](#method.to_file).
    pub fn from_file<P>(path: P) -> Result<Network, SerializationError> where P: AsRef<Path> {
        let mut reader = BufReader::new(File::open(path.as_ref())?);

        let header = read_string(&mut reader)?;
        if header != Network::identifier() {
            return Err(SerializationError::UnexpectedHeader {
                expected: Network::identifier(),
                found: header,
            });
        }

        let network = Network::read_from(&mut reader)?;
        debug!("Loaded a network of {} layers from {}", network.layers.len(), path.as_ref().display());
        Ok(network)
    }

    pub fn to_file<P>(&self, path: P) -> io::Result<()> where P: AsRef<Path> {
        let mut writer = BufWriter::new(File::create(path)?);

        write_string(&mut writer, &Network::identifier())?;
        self.write_to(&mut writer)?;
        writer.flush()
    }

    pub fn input_shape(&self) -> Shape {
        self.layers[0].input_shape()
    }

    pub fn output_shape(&self) -> Shape {
        self.layers[self.layers.len() - 1].output_shape()
    }

    pub fn layers(&self) -> &[Box<dyn Layer>] {
        &self.layers
    }

    /// Runs every layer in order, returning one tape per layer and the network's outputs.
    ///
    /// # Panics
    /// Panics if `inputs` doesn't have the network's input shape.
    pub fn run_forward(&self, inputs: &Tensor) -> (Vec<Tape>, Tensor) {
        assert!(inputs.shape() == self.input_shape(), "Network expects inputs of shape {}, found {}!", self.input_shape(), inputs.shape());

        let mut tapes = Vec::with_capacity(self.layers.len());
        let mut outputs = inputs.clone();

        for layer in &self.layers {
            let (tape, next_outputs) = layer.feed_forward(outputs);
            tapes.push(tape);
            outputs = next_outputs;
        }

        (tapes, outputs)
    }

    /// Like [`run_forward`](#method.run_forward), but discards the tapes as it goes.
    pub fn run_network(&self, inputs: &Tensor) -> Tensor {
        assert!(inputs.shape() == self.input_shape(), "Network expects inputs of shape {}, found {}!", self.input_shape(), inputs.shape());

        let mut outputs = inputs.clone();
        for layer in &self.layers {
            outputs = layer.feed_forward(outputs).1;
        }
        outputs
    }

    /// Runs every layer backward, in reverse, consuming the tapes from [`run_forward`](#method.run_forward).  Returns
    /// one gradient per layer, in layer order, and the gradient with respect to the network's inputs.
    ///
    /// # Panics
    /// Panics if there isn't one tape per layer, or if `gradients` doesn't have the network's output shape.
    pub fn run_backward(&self, tapes: Vec<Tape>, gradients: &Tensor) -> (Vec<Gradient>, Tensor) {
        assert!(tapes.len() == self.layers.len(), "Expected {} tapes, found {}!", self.layers.len(), tapes.len());
        assert!(gradients.shape() == self.output_shape(), "Network produces {}, but the gradient is {}!", self.output_shape(), gradients.shape());

        let mut layer_gradients = Vec::with_capacity(self.layers.len());
        let mut input_gradients = gradients.clone();

        for (layer, tape) in self.layers.iter().zip(tapes).rev() {
            let (layer_gradient, previous_gradients) = layer.propagate_backward(tape, &input_gradients);
            layer_gradients.push(layer_gradient);
            input_gradients = previous_gradients;
        }

        layer_gradients.reverse();
        (layer_gradients, input_gradients)
    }

    /// Applies one gradient descent step to every layer, pairing layers and gradients by position.
    ///
    /// # Panics
    /// Panics if there isn't one gradient per layer, or if a gradient belongs to a different kind of layer.
    pub fn apply_update(mut self, gradients: &[Gradient], parameters: &LearningParameters) -> Network {
        assert!(gradients.len() == self.layers.len(), "Expected {} gradients, found {}!", self.layers.len(), gradients.len());

        for (layer, gradient) in self.layers.iter_mut().zip(gradients) {
            layer.apply_gradient(gradient, parameters);
        }
        self
    }

    /// Computes the gradients of `L` for one example.
    pub fn backpropagate<L>(&self, inputs: &Tensor, targets: &Tensor) -> Vec<Gradient> where L: LossFunction {
        assert!(targets.shape() == self.output_shape(), "Network produces {}, but the target is {}!", self.output_shape(), targets.shape());

        let (tapes, outputs) = self.run_forward(inputs);

        let mut loss_derivatives = Tensor::zeros(self.output_shape());
        L::l_prime_vector(outputs.as_matrix(), targets.as_matrix(), loss_derivatives.as_matrix_mut());

        self.run_backward(tapes, &loss_derivatives).0
    }

    /// One step of training on a single example.
    pub fn train<L>(self, parameters: &LearningParameters, inputs: &Tensor, targets: &Tensor) -> Network where L: LossFunction {
        let gradients = self.backpropagate::<L>(inputs, targets);
        self.apply_update(&gradients, parameters)
    }

    /// The total loss of the network's outputs for one example.
    pub fn loss<L>(&self, inputs: &Tensor, targets: &Tensor) -> f64 where L: LossFunction {
        assert!(targets.shape() == self.output_shape(), "Network produces {}, but the target is {}!", self.output_shape(), targets.shape());

        let outputs = self.run_network(inputs);

        let mut loss = Tensor::zeros(self.output_shape());
        L::l_vector(outputs.as_matrix(), targets.as_matrix(), loss.as_matrix_mut());
        loss.sum()
    }

    /// Writes every layer's parameters in order.  The network's structure isn't written.
    pub fn write_parameters(&self, writer: &mut dyn Write) -> io::Result<()> {
        for layer in &self.layers {
            layer.write_parameters(writer)?;
        }
        Ok(())
    }

    /// Reads parameters written by [`write_parameters`](#method.write_parameters) into a network of the same structure.
    /// All momentum is reset.  On error the network is left unchanged.
    pub fn read_parameters(&mut self, reader: &mut dyn Read) -> Result<(), SerializationError> {
        let mut layers = self.layers.clone();
        for layer in &mut layers {
            layer.read_parameters(reader)?;
        }

        self.layers = layers;
        debug!("Loaded parameters for {} layers", self.layers.len());
        Ok(())
    }
}

impl Identifiable for Network {
    fn identifier() -> String {
        String::from("Network")
    }

    fn get_identifier(&self) -> String {
        Self::identifier()
    }
}

impl Serializable for Network {
    fn read_from(reader: &mut dyn Read) -> Result<Network, SerializationError> {
        let layer_count = read_usize(reader)?;

        let mut layers = Vec::new();
        for _ in 0..layer_count {
            layers.push(read_layer(reader)?);
        }

        Ok(Network::new(layers)?)
    }

    fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
        write_usize(writer, self.layers.len())?;
        for layer in &self.layers {
            write_string(writer, &layer.get_identifier())?;
            layer.write_to(writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use smallmath::{Matrix, Vector};

    use crate::activation_function::TanHActivationFunction;
    use crate::layer::{ActivationLayer, FullyConnectedLayer, ReshapeLayer};
    use crate::loss_function::MeanSquaredErrorLossFunction;

    use super::*;

    fn network() -> Network {
        Network::new(vec![
            Box::new(ReshapeLayer::new(Shape::D2(1, 2), Shape::D1(2)).unwrap()),
            Box::new(FullyConnectedLayer::from_parameters(
                Matrix::from_vec(2, 2, vec![1.0, 0.5, -1.0, 2.0]),
                Vector::from_vec(vec![0.0, 0.1]),
            ).unwrap()),
            Box::new(ActivationLayer::<TanHActivationFunction>::new(Shape::D1(2)).unwrap()),
        ]).unwrap()
    }

    #[test]
    fn test_rejects_bad_chains() {
        assert_eq!(Network::new(Vec::new()).unwrap_err(), ShapeError::EmptyNetwork);
        assert_eq!(
            Network::new(vec![
                Box::new(ReshapeLayer::new(Shape::D2(2, 2), Shape::D1(4)).unwrap()),
                Box::new(ActivationLayer::<TanHActivationFunction>::new(Shape::D1(3)).unwrap()),
            ]).unwrap_err(),
            ShapeError::LayerMismatch { index: 0, output: Shape::D1(4), input: Shape::D1(3) },
        );
    }

    #[test]
    fn test_run_forward_and_backward() {
        let network = network();
        let inputs = Tensor::new(Shape::D2(1, 2), vec![0.5, -0.5]);

        let (tapes, outputs) = network.run_forward(&inputs);
        assert_eq!(tapes.len(), 3);
        assert_eq!(tapes[0], Tape::Empty);
        assert_eq!(outputs, network.run_network(&inputs));
        assert_eq!(outputs.shape(), Shape::D1(2));

        let (gradients, input_gradients) = network.run_backward(tapes, &Tensor::new(Shape::D1(2), vec![1.0, 0.0]));
        assert_eq!(gradients.len(), 3);
        assert_eq!(gradients[0], Gradient::None);
        assert!(matches!(gradients[1], Gradient::FullyConnected(_)));
        assert_eq!(gradients[2], Gradient::None);
        assert_eq!(input_gradients.shape(), Shape::D2(1, 2));
    }

    #[test]
    fn test_training_reduces_loss() {
        let mut network = network();
        let inputs = Tensor::new(Shape::D2(1, 2), vec![0.5, -0.5]);
        let targets = Tensor::new(Shape::D1(2), vec![-0.25, 0.5]);
        let parameters = LearningParameters::new(0.1, 0.5, 0.0);

        let initial = network.loss::<MeanSquaredErrorLossFunction>(&inputs, &targets);
        for _ in 0..100 {
            network = network.train::<MeanSquaredErrorLossFunction>(&parameters, &inputs, &targets);
        }

        assert!(network.loss::<MeanSquaredErrorLossFunction>(&inputs, &targets) < initial / 10.0);
    }

    #[test]
    fn test_read_parameters_is_all_or_nothing() {
        let network = network();
        let mut bytes = Vec::new();
        network.write_parameters(&mut bytes).unwrap();
        bytes.truncate(bytes.len() - 1);

        let mut loaded = Network::new(vec![
            Box::new(ReshapeLayer::new(Shape::D2(1, 2), Shape::D1(2)).unwrap()),
            Box::new(FullyConnectedLayer::from_parameters(Matrix::zeros(2, 2), Vector::zeros(2)).unwrap()),
            Box::new(ActivationLayer::<TanHActivationFunction>::new(Shape::D1(2)).unwrap()),
        ]).unwrap();

        assert!(loaded.read_parameters(&mut &bytes[..]).is_err());

        let inputs = Tensor::new(Shape::D2(1, 2), vec![0.5, -0.5]);
        assert_eq!(loaded.run_network(&inputs).values(), &[0.0, 0.0]);
    }
}
