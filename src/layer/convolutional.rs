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

use smallmath::Matrix;

use crate::error::{SerializationError, ShapeError};
use crate::gradient_descent::{self, LearningParameters};
use crate::im2col::{col2im, im2col};
use crate::layer::{assert_shape, Gradient, Layer, Tape};
use crate::serialization::{read_matrix, write_matrix};
use crate::shape::{output_extent, Shape};
use crate::tensor::Tensor;

/// A bank of filters slid over an image.
///
/// The input's channels are the filter depth and the output's channels are the number of filters; a plane counts as a
/// single channel on either side.  Each filter is one column of the weight matrix, laid out by channel, then kernel
/// row, then kernel column.
#[derive(Clone, Debug)]
pub struct ConvolutionLayer {
    pub(crate) input_shape: Shape,
    pub(crate) output_shape: Shape,
    pub(crate) kernel: (usize, usize),
    pub(crate) stride: (usize, usize),

    pub(crate) weights: Matrix,
    momentum: Matrix,
}

/// The gradient of a [`ConvolutionLayer`](struct.ConvolutionLayer.html)'s weights.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvolutionGradient {
    pub weights: Matrix,
}

impl ConvolutionLayer {
    /// Builds a layer with He-initialized weights.
    ///
    /// `kernel` and `stride` are `(rows, columns)`.  The output's rows and columns must be exactly what sliding the
    /// kernel over the input produces.
    pub fn new<R>(
        input_shape: Shape,
        output_shape: Shape,
        kernel: (usize, usize),
        stride: (usize, usize),
        rng: &mut R,
    ) -> Result<ConvolutionLayer, ShapeError> where R: Rng {
        let (rows, columns) = ConvolutionLayer::weight_dimensions(input_shape, output_shape, kernel, stride)?;
        let scale = (2.0 / rows as f64).sqrt();
        let weights = Matrix::from_vec(
            rows,
            columns,
            (0..rows * columns).map(|_| scale * rng.sample::<f64, _>(StandardNormal)).collect(),
        );

        ConvolutionLayer::from_weights(input_shape, output_shape, kernel, stride, weights)
    }

    /// Builds a layer around existing weights, with zero momentum.
    pub fn from_weights(
        input_shape: Shape,
        output_shape: Shape,
        kernel: (usize, usize),
        stride: (usize, usize),
        weights: Matrix,
    ) -> Result<ConvolutionLayer, ShapeError> {
        let (rows, columns) = ConvolutionLayer::weight_dimensions(input_shape, output_shape, kernel, stride)?;
        if weights.rows() != rows || weights.columns() != columns {
            return Err(ShapeError::ParameterMismatch {
                expected_rows: rows,
                expected_columns: columns,
                found_rows: weights.rows(),
                found_columns: weights.columns(),
            });
        }

        Ok(ConvolutionLayer {
            input_shape,
            output_shape,
            kernel,
            stride,
            weights,
            momentum: Matrix::zeros(rows, columns),
        })
    }

    /// Checks a layer's configuration and returns the `(rows, columns)` of its weight matrix.
    pub(crate) fn weight_dimensions(
        input_shape: Shape,
        output_shape: Shape,
        kernel: (usize, usize),
        stride: (usize, usize),
    ) -> Result<(usize, usize), ShapeError> {
        validate(input_shape, output_shape, kernel, stride)?;

        let dimensions = (kernel.0 * kernel.1 * input_shape.channels(), output_shape.channels());
        Shape::D2(dimensions.0, dimensions.1).validate()?;
        Ok(dimensions)
    }

    pub fn kernel(&self) -> (usize, usize) {
        self.kernel
    }

    pub fn stride(&self) -> (usize, usize) {
        self.stride
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn momentum(&self) -> &Matrix {
        &self.momentum
    }

    fn patches(&self, inputs: &Tensor) -> Matrix {
        im2col(
            self.kernel.0, self.kernel.1,
            self.stride.0, self.stride.1,
            self.input_shape.rows(), self.input_shape.columns(),
            inputs.as_matrix(),
        )
    }
}

fn validate(input_shape: Shape, output_shape: Shape, kernel: (usize, usize), stride: (usize, usize)) -> Result<(), ShapeError> {
    input_shape.validate()?;
    output_shape.validate()?;

    for &shape in &[input_shape, output_shape] {
        if !shape.is_image() {
            return Err(ShapeError::UnsupportedShape { layer: "ConvolutionLayer", shape });
        }
    }

    let rows = output_extent(input_shape.rows(), kernel.0, stride.0)?;
    let columns = output_extent(input_shape.columns(), kernel.1, stride.1)?;

    if output_shape.rows() != rows || output_shape.columns() != columns {
        return Err(ShapeError::OutputMismatch {
            layer: "ConvolutionLayer",
            expected: output_shape.with_extents(rows, columns, output_shape.channels()).unwrap_or(output_shape),
            found: output_shape,
        });
    }

    Ok(())
}

impl Layer for ConvolutionLayer {
    fn input_shape(&self) -> Shape {
        self.input_shape
    }

    fn output_shape(&self) -> Shape {
        self.output_shape
    }

    fn feed_forward(&self, inputs: Tensor) -> (Tape, Tensor) {
        assert_shape("ConvolutionLayer", self.input_shape, &inputs);
        trace!("ConvolutionLayer forward: {} -> {}", self.input_shape, self.output_shape);

        // outputs = patches * weights, moved from (positions x filters) into image layout
        let product = &self.patches(&inputs) * &self.weights;
        let outputs = col2im(1, 1, 1, 1, self.output_shape.rows(), self.output_shape.columns(), &product);

        (Tape::Inputs(inputs), Tensor::from_matrix(self.output_shape, outputs))
    }

    fn propagate_backward(&self, tape: Tape, gradients: &Tensor) -> (Gradient, Tensor) {
        assert_shape("ConvolutionLayer", self.output_shape, gradients);
        trace!("ConvolutionLayer backward: {} -> {}", self.output_shape, self.input_shape);

        let inputs = tape.into_inputs();
        assert_shape("ConvolutionLayer", self.input_shape, &inputs);

        let patches = self.patches(&inputs);
        let flat_gradients = im2col(1, 1, 1, 1, self.output_shape.rows(), self.output_shape.columns(), gradients.as_matrix());

        // weight_gradients = patches.transpose() * flat_gradients
        let weight_gradients = &patches.transpose() * &flat_gradients;

        // patch_gradients = flat_gradients * weights.transpose()
        let patch_gradients = &flat_gradients * &self.weights.transpose();
        let input_gradients = col2im(
            self.kernel.0, self.kernel.1,
            self.stride.0, self.stride.1,
            self.input_shape.rows(), self.input_shape.columns(),
            &patch_gradients,
        );

        (
            Gradient::Convolution(ConvolutionGradient { weights: weight_gradients }),
            Tensor::from_matrix(self.input_shape, input_gradients),
        )
    }

    fn apply_gradient(&mut self, gradient: &Gradient, parameters: &LearningParameters) {
        let gradient = match *gradient {
            Gradient::Convolution(ref gradient) => gradient,
            _ => panic!("ConvolutionLayer received a gradient for a different layer!"),
        };

        let (weights, momentum) = gradient_descent::descend(parameters, &self.weights, &gradient.weights, &self.momentum);
        self.weights = weights;
        self.momentum = momentum;
    }

    fn write_parameters(&self, writer: &mut dyn Write) -> io::Result<()> {
        write_matrix(writer, &self.weights)
    }

    fn read_parameters(&mut self, reader: &mut dyn Read) -> Result<(), SerializationError> {
        let weights = read_matrix(reader, self.weights.rows(), self.weights.columns())?;

        self.momentum = Matrix::zeros(weights.rows(), weights.columns());
        self.weights = weights;
        Ok(())
    }

    fn boxed_clone(&self) -> Box<dyn Layer> {
        Box::new(self.clone())
    }
}
