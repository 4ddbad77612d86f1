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

//! Checks every layer's backward pass against finite differences of its forward pass.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use smallconv::activation_function::{
    ELuActivationFunction,
    LogitActivationFunction,
    ReLuActivationFunction,
    TanHActivationFunction,
};
use smallconv::layer::{
    ActivationLayer,
    ConvolutionLayer,
    CropLayer,
    FullyConnectedLayer,
    Layer,
    PadLayer,
    Padding,
    PassThroughLayer,
    PoolingLayer,
    ReshapeLayer,
    SoftmaxLayer,
};
use smallconv::shape::output_extent;
use smallconv::{Identifiable, Network, Shape, ShapeError, Tensor};

const EPSILON: f64 = 1e-5;
const TOLERANCE: f64 = 2e-4;
const CASES: usize = 1000;

fn random_shape(rng: &mut StdRng) -> Shape {
    loop {
        let shape = match rng.gen_range(0..3) {
            0 => Shape::D1(rng.gen_range(2..=8)),
            1 => Shape::D2(rng.gen_range(1..=6), rng.gen_range(1..=6)),
            _ => Shape::D3(rng.gen_range(1..=6), rng.gen_range(1..=6), rng.gen_range(1..=3)),
        };

        if shape.len() >= 2 {
            return shape;
        }
    }
}

fn random_padding(rng: &mut StdRng) -> Padding {
    Padding::new(rng.gen_range(0..=1), rng.gen_range(0..=1), rng.gen_range(0..=1), rng.gen_range(0..=1))
}

fn random_layer(rng: &mut StdRng, input_shape: Shape) -> Result<Box<dyn Layer>, ShapeError> {
    let layer: Box<dyn Layer> = match rng.gen_range(0..9) {
        0 => {
            let kernel = (rng.gen_range(1..=3), rng.gen_range(1..=3));
            let stride = (rng.gen_range(1..=2), rng.gen_range(1..=2));
            let rows = output_extent(input_shape.rows(), kernel.0, stride.0)?;
            let columns = output_extent(input_shape.columns(), kernel.1, stride.1)?;

            let output_shape = match rng.gen_range(1..=3) {
                1 if rng.gen_bool(0.5) => Shape::D2(rows, columns),
                filters => Shape::D3(rows, columns, filters),
            };

            Box::new(ConvolutionLayer::new(input_shape, output_shape, kernel, stride, rng)?)
        },
        1 => match input_shape {
            Shape::D1(inputs) => {
                let outputs = rng.gen_range(2..=6);
                Box::new(FullyConnectedLayer::new(inputs, outputs, rng)?)
            },
            _ => return Err(ShapeError::UnsupportedShape { layer: "FullyConnectedLayer", shape: input_shape }),
        },
        2 => {
            let kernel = (rng.gen_range(1..=2), rng.gen_range(1..=2));
            let stride = (rng.gen_range(1..=2), rng.gen_range(1..=2));
            Box::new(PoolingLayer::new(input_shape, kernel, stride)?)
        },
        3 => Box::new(PadLayer::new(input_shape, random_padding(rng))?),
        4 => Box::new(CropLayer::new(input_shape, random_padding(rng))?),
        5 => {
            let output_shape = if rng.gen_bool(0.5) {
                Shape::D1(input_shape.len())
            } else {
                Shape::D2(1, input_shape.len())
            };
            Box::new(ReshapeLayer::new(input_shape, output_shape)?)
        },
        6 => Box::new(PassThroughLayer::new(input_shape)?),
        7 => match rng.gen_range(0..4) {
            0 => Box::new(ActivationLayer::<ELuActivationFunction>::new(input_shape)?),
            1 => Box::new(ActivationLayer::<LogitActivationFunction>::new(input_shape)?),
            2 => Box::new(ActivationLayer::<ReLuActivationFunction>::new(input_shape)?),
            _ => Box::new(ActivationLayer::<TanHActivationFunction>::new(input_shape)?),
        },
        _ => Box::new(SoftmaxLayer::new(input_shape)?),
    };

    Ok(layer)
}

/// Builds a random chain of one to four layers, retrying whenever a layer can't follow the previous one.
fn random_network(rng: &mut StdRng) -> Network {
    loop {
        let input_shape = random_shape(rng);
        let depth = rng.gen_range(1..=4);

        let mut layers: Vec<Box<dyn Layer>> = Vec::new();
        let mut shape = input_shape;
        for _ in 0..100 {
            if layers.len() == depth {
                break;
            }

            if let Ok(layer) = random_layer(rng, shape) {
                shape = layer.output_shape();
                layers.push(layer);
            }
        }

        if layers.len() == depth && shape.len() >= 2 {
            return Network::new(layers).unwrap();
        }
    }
}

fn close(expected: f64, result: f64) -> bool {
    (expected - result).abs() <= TOLERANCE * 1.0f64.max(expected.abs()).max(result.abs())
}

/// Compares the backward pass with a forward difference along one input, observed through one output.  Both sides
/// are reduced with `max`, so only their positive parts are compared.
fn check_gradient(network: &Network, inputs: &Tensor, target: &Tensor, tested: &Tensor) -> (f64, f64) {
    let (tapes, outputs) = network.run_forward(inputs);
    let (_, backgrad) = network.run_backward(tapes, target);

    let expected = (&backgrad * tested).max();

    let outputs_diff = network.run_network(&(inputs + &(tested * EPSILON)));
    let result = (&(&outputs_diff * target) - &(&outputs * target)).max() / EPSILON;

    (expected, result)
}

#[test]
fn test_random_networks() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut seen = HashSet::new();

    for case in 0..CASES {
        let network = random_network(&mut rng);
        for layer in network.layers() {
            seen.insert(layer.get_identifier());
        }

        let inputs = Tensor::random(network.input_shape(), &mut rng);
        let target = Tensor::one_hot(network.output_shape(), rng.gen_range(0..network.output_shape().len()));
        let tested = Tensor::one_hot(network.input_shape(), rng.gen_range(0..network.input_shape().len()));

        let (expected, result) = check_gradient(&network, &inputs, &target, &tested);
        assert!(
            close(expected, result),
            "Case {}: backward pass gave {}, finite difference gave {} for {:?}", case, expected, result, network,
        );
    }

    for identifier in &[
        ConvolutionLayer::identifier(),
        CropLayer::identifier(),
        FullyConnectedLayer::identifier(),
        PadLayer::identifier(),
        PassThroughLayer::identifier(),
        PoolingLayer::identifier(),
        ReshapeLayer::identifier(),
        SoftmaxLayer::identifier(),
        ActivationLayer::<ELuActivationFunction>::identifier(),
        ActivationLayer::<LogitActivationFunction>::identifier(),
        ActivationLayer::<ReLuActivationFunction>::identifier(),
        ActivationLayer::<TanHActivationFunction>::identifier(),
    ] {
        assert!(seen.contains(identifier), "{} was never generated!", identifier);
    }
}

/// Checks the full input gradient of a fixed network with central differences, without any reduction.
fn check_every_input(network: &Network, rng: &mut StdRng) {
    let inputs = Tensor::random(network.input_shape(), rng);
    let output_gradients = Tensor::random(network.output_shape(), rng);

    let (tapes, _) = network.run_forward(&inputs);
    let (_, input_gradients) = network.run_backward(tapes, &output_gradients);

    for i in 0..inputs.shape().len() {
        let step = &Tensor::one_hot(inputs.shape(), i) * EPSILON;
        let above = (&network.run_network(&(&inputs + &step)) * &output_gradients).sum();
        let below = (&network.run_network(&(&inputs - &step)) * &output_gradients).sum();
        let numeric = (above - below) / (2.0 * EPSILON);

        assert!(
            close(input_gradients.values()[i], numeric),
            "Input {}: backward pass gave {}, finite difference gave {}", i, input_gradients.values()[i], numeric,
        );
    }
}

#[test]
fn test_convolution_shapes() {
    let mut rng = StdRng::seed_from_u64(1);

    let configurations = [
        (Shape::D2(4, 4), Shape::D2(2, 2), (3, 3), (1, 1)),
        (Shape::D2(5, 5), Shape::D3(2, 2, 3), (3, 3), (2, 2)),
        (Shape::D3(4, 6, 2), Shape::D2(2, 3), (2, 2), (2, 2)),
        (Shape::D3(5, 4, 3), Shape::D3(3, 3, 2), (3, 2), (1, 1)),
    ];

    for &(input_shape, output_shape, kernel, stride) in &configurations {
        let network = Network::new(vec![
            Box::new(ConvolutionLayer::new(input_shape, output_shape, kernel, stride, &mut rng).unwrap()),
        ]).unwrap();

        check_every_input(&network, &mut rng);
    }
}

#[test]
fn test_smooth_layers() {
    let mut rng = StdRng::seed_from_u64(2);

    let network = Network::new(vec![
        Box::new(PadLayer::new(Shape::D3(3, 3, 2), Padding::uniform(1)).unwrap()),
        Box::new(ConvolutionLayer::new(Shape::D3(5, 5, 2), Shape::D3(3, 3, 2), (3, 3), (1, 1), &mut rng).unwrap()),
        Box::new(ActivationLayer::<TanHActivationFunction>::new(Shape::D3(3, 3, 2)).unwrap()),
        Box::new(CropLayer::new(Shape::D3(3, 3, 2), Padding::new(1, 0, 0, 1)).unwrap()),
        Box::new(ReshapeLayer::new(Shape::D3(2, 2, 2), Shape::D1(8)).unwrap()),
        Box::new(FullyConnectedLayer::new(8, 4, &mut rng).unwrap()),
        Box::new(ActivationLayer::<LogitActivationFunction>::new(Shape::D1(4)).unwrap()),
        Box::new(FullyConnectedLayer::new(4, 3, &mut rng).unwrap()),
        Box::new(ActivationLayer::<ELuActivationFunction>::new(Shape::D1(3)).unwrap()),
        Box::new(SoftmaxLayer::new(Shape::D1(3)).unwrap()),
    ]).unwrap();

    check_every_input(&network, &mut rng);
}

#[test]
fn test_pooling() {
    let mut rng = StdRng::seed_from_u64(3);

    let network = Network::new(vec![
        Box::new(PoolingLayer::new(Shape::D3(4, 6, 2), (2, 3), (2, 3)).unwrap()),
        Box::new(PassThroughLayer::new(Shape::D3(2, 2, 2)).unwrap()),
    ]).unwrap();

    check_every_input(&network, &mut rng);
}
