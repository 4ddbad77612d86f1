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

use std::io;

use thiserror::Error;

use crate::shape::Shape;

/// A layer or network was described with dimensions that can't fit together.  These are raised while building a
/// network, never while running one.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Shape {0} has a zero dimension!")]
    ZeroDimension(Shape),

    #[error("Shape {0} holds more values than can be addressed!")]
    TooLarge(Shape),

    #[error("Stride must be at least 1!")]
    ZeroStride,

    #[error("Kernel extent must be at least 1!")]
    ZeroKernel,

    #[error("Kernel extent {kernel} is larger than input extent {input}!")]
    KernelTooLarge { input: usize, kernel: usize },

    #[error("Kernel extent {kernel} with stride {stride} doesn't evenly cover input extent {input}!")]
    UnevenStride { input: usize, kernel: usize, stride: usize },

    #[error("{layer} produces {expected}, but was declared to produce {found}!")]
    OutputMismatch { layer: &'static str, expected: Shape, found: Shape },

    #[error("{layer} doesn't accept shape {shape}!")]
    UnsupportedShape { layer: &'static str, shape: Shape },

    #[error("Cannot reshape {input} ({} values) into {output} ({} values)!", .input.len(), .output.len())]
    LengthMismatch { input: Shape, output: Shape },

    #[error("Cropping {shape} would leave nothing!")]
    CropExceedsInput { shape: Shape },

    #[error("Expected a {expected_rows}x{expected_columns} parameter matrix, found {found_rows}x{found_columns}!")]
    ParameterMismatch {
        expected_rows: usize,
        expected_columns: usize,
        found_rows: usize,
        found_columns: usize,
    },

    #[error("Network must have at least one layer!")]
    EmptyNetwork,

    #[error("Layer {index} outputs {output}, but the next layer expects {input}!")]
    LayerMismatch { index: usize, output: Shape, input: Shape },
}

/// Reading a layer or network from a byte stream failed.  Nothing is partially loaded when this is returned.
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("Expected {expected} parameters, found {found}!")]
    ParameterCount { expected: usize, found: usize },

    #[error("Unknown layer type: {0}!")]
    UnknownLayer(String),

    #[error("Expected a {expected} header, found {found}!")]
    UnexpectedHeader { expected: String, found: String },

    #[error("Identifier is not valid UTF-8!")]
    InvalidIdentifier,

    #[error("Invalid shape tag: {0}!")]
    InvalidShapeTag(u8),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}
