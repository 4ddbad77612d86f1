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

use std::fmt::Debug;
use std::io::{self, Read, Write};

use crate::error::SerializationError;
use crate::gradient_descent::LearningParameters;
use crate::serialization::Serializable;
use crate::shape::Shape;
use crate::tensor::Tensor;

pub use self::activation::ActivationLayer;
pub use self::convolutional::{ConvolutionGradient, ConvolutionLayer};
pub use self::crop::CropLayer;
pub use self::fully_connected::{FullyConnectedGradient, FullyConnectedLayer};
pub use self::pad::{PadLayer, Padding};
pub use self::pass_through::PassThroughLayer;
pub use self::pooling::PoolingLayer;
pub use self::reshape::ReshapeLayer;
pub use self::softmax::SoftmaxLayer;

/// One stage of a [`Network`](../struct.Network.html).
///
/// Running a layer never changes it: `feed_forward` returns a [`Tape`](enum.Tape.html) that the matching
/// `propagate_backward` call consumes, and parameters only change through `apply_gradient`.
pub trait Layer: Serializable + Debug + Send + Sync {
    fn input_shape(&self) -> Shape;
    fn output_shape(&self) -> Shape;

    /// # Panics
    /// Panics if `inputs` doesn't have the layer's input shape.
    fn feed_forward(&self, inputs: Tensor) -> (Tape, Tensor);

    /// Returns the gradient of the layer's parameters and the gradient with respect to its inputs.
    ///
    /// # Panics
    /// Panics if `tape` didn't come from this layer's `feed_forward`, or if `gradients` doesn't have the layer's output
    /// shape.
    fn propagate_backward(&self, tape: Tape, gradients: &Tensor) -> (Gradient, Tensor);

    /// Applies one step of momentum gradient descent.  Layers without parameters ignore this.
    fn apply_gradient(&mut self, _gradient: &Gradient, _parameters: &LearningParameters) {}

    /// Writes the layer's parameters, without any structural information.
    fn write_parameters(&self, _writer: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }

    /// Reads parameters written by `write_parameters`, resetting any momentum.  The layer is unchanged on error.
    fn read_parameters(&mut self, _reader: &mut dyn Read) -> Result<(), SerializationError> {
        Ok(())
    }

    fn boxed_clone(&self) -> Box<dyn Layer>;
}

impl Clone for Box<dyn Layer> {
    fn clone(&self) -> Box<dyn Layer> {
        self.boxed_clone()
    }
}

/// What a layer keeps from its forward pass for the backward pass.
#[derive(Clone, Debug, PartialEq)]
pub enum Tape {
    /// Nothing beyond the layer's own configuration is needed.
    Empty,
    Inputs(Tensor),
    Outputs(Tensor),
}

impl Tape {
    /// # Panics
    /// Panics if this isn't a `Tape::Inputs`.
    pub fn into_inputs(self) -> Tensor {
        match self {
            Tape::Inputs(inputs) => inputs,
            _ => panic!("Expected a tape of layer inputs!"),
        }
    }

    /// # Panics
    /// Panics if this isn't a `Tape::Outputs`.
    pub fn into_outputs(self) -> Tensor {
        match self {
            Tape::Outputs(outputs) => outputs,
            _ => panic!("Expected a tape of layer outputs!"),
        }
    }
}

/// The gradient of a layer's parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum Gradient {
    /// The layer has no parameters.
    None,
    Convolution(ConvolutionGradient),
    FullyConnected(FullyConnectedGradient),
}

pub(crate) fn assert_shape(layer: &str, expected: Shape, tensor: &Tensor) {
    assert!(
        tensor.shape() == expected,
        "{} expects a tensor of shape {}, found {}!", layer, expected, tensor.shape(),
    );
}

mod activation;
mod convolutional;
mod crop;
mod fully_connected;
mod pad;
mod pass_through;
mod pooling;
mod reshape;
mod softmax;
