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

//! A small convolutional neural network library.
//!
//! Networks are chains of layers with shapes that are checked once, when the network is built.  Running a network
//! forward returns a tape for each layer, which the backward pass consumes to produce parameter gradients; applying
//! those gradients returns the updated network.
//!
//! # Usage
//!
//! ```toml
//! [dependencies]
//! smallconv = "0.1"
//! ```
//!
//! # Example
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! use smallconv::activation_function::ReLuActivationFunction;
//! use smallconv::layer::{ActivationLayer, ConvolutionLayer, ReshapeLayer};
//! use smallconv::loss_function::MeanSquaredErrorLossFunction;
//! use smallconv::{LearningParameters, Network, Shape, Tensor};
//!
//! let mut rng = StdRng::seed_from_u64(0);
//!
//! let network = Network::new(vec![
//!     Box::new(ConvolutionLayer::new(Shape::D2(4, 4), Shape::D3(2, 2, 3), (3, 3), (1, 1), &mut rng).unwrap()),
//!     Box::new(ActivationLayer::<ReLuActivationFunction>::new(Shape::D3(2, 2, 3)).unwrap()),
//!     Box::new(ReshapeLayer::new(Shape::D3(2, 2, 3), Shape::D1(12)).unwrap()),
//! ]).unwrap();
//!
//! let inputs = Tensor::random(Shape::D2(4, 4), &mut rng);
//! let targets = Tensor::zeros(Shape::D1(12));
//!
//! let network = network.train::<MeanSquaredErrorLossFunction>(&LearningParameters::default(), &inputs, &targets);
//! assert_eq!(network.run_network(&inputs).shape(), Shape::D1(12));
//! ```

pub use smallmath::{matrix, vector, Matrix, Vector};

pub use crate::error::{SerializationError, ShapeError};
pub use crate::gradient_descent::LearningParameters;
pub use crate::network::Network;
pub use crate::serialization::{Identifiable, Serializable};
pub use crate::shape::Shape;
pub use crate::tensor::Tensor;

pub mod activation_function;
mod error;
pub mod gradient_descent;
pub mod im2col;
pub mod layer;
pub mod loss_function;
mod network;
mod serialization;
pub mod shape;
pub mod tensor;
