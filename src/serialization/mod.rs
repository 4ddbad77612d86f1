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

//! Binary persistence for layers and networks.
//!
//! Every number is written big-endian: sizes as `u64` and values as IEEE-754 `f64`.  Parameter matrices are written as
//! a length-prefixed list of their values in column-major order.

use std::io::{self, ErrorKind, Read, Write};

use smallmath::{Matrix, Vector};

use crate::activation_function::*;
use crate::error::SerializationError;
use crate::layer::*;
use crate::shape::Shape;

pub use self::identifiable::Identifiable;
pub use self::serializable::Serializable;

#[macro_use]
mod identifiable;
#[macro_use]
mod serializable;

read_layer_types! {
    activation_layers: [
        ActivationLayer<F>,
    ],
    activation_functions: [
        ELuActivationFunction,
        LogitActivationFunction,
        ReLuActivationFunction,
        TanHActivationFunction,
    ],
    other_layers: [
        ConvolutionLayer,
        CropLayer,
        FullyConnectedLayer,
        PadLayer,
        PassThroughLayer,
        PoolingLayer,
        ReshapeLayer,
        SoftmaxLayer,
    ],
}

pub(crate) fn write_u64(writer: &mut dyn Write, value: u64) -> io::Result<()> {
    writer.write_all(&value.to_be_bytes())
}

pub(crate) fn read_u64(reader: &mut dyn Read) -> io::Result<u64> {
    let mut bytes = [0; 8];
    reader.read_exact(&mut bytes)?;
    Ok(u64::from_be_bytes(bytes))
}

pub(crate) fn write_usize(writer: &mut dyn Write, value: usize) -> io::Result<()> {
    write_u64(writer, value as u64)
}

pub(crate) fn read_usize(reader: &mut dyn Read) -> io::Result<usize> {
    let value = read_u64(reader)?;
    usize::try_from(value).map_err(|_| io::Error::new(ErrorKind::InvalidData, "Size doesn't fit in usize!"))
}

pub(crate) fn write_pair(writer: &mut dyn Write, (first, second): (usize, usize)) -> io::Result<()> {
    write_usize(writer, first)?;
    write_usize(writer, second)
}

pub(crate) fn read_pair(reader: &mut dyn Read) -> io::Result<(usize, usize)> {
    Ok((read_usize(reader)?, read_usize(reader)?))
}

pub(crate) fn write_string(writer: &mut dyn Write, string: &str) -> io::Result<()> {
    write_usize(writer, string.len())?;
    writer.write_all(string.as_bytes())
}

pub(crate) fn read_string(reader: &mut dyn Read) -> Result<String, SerializationError> {
    let length = read_u64(reader)?;

    let mut bytes = Vec::new();
    (&mut *reader).take(length).read_to_end(&mut bytes)?;
    if bytes.len() as u64 != length {
        return Err(io::Error::from(ErrorKind::UnexpectedEof).into());
    }

    String::from_utf8(bytes).map_err(|_| SerializationError::InvalidIdentifier)
}

/// Writes a length-prefixed list of values.
pub(crate) fn write_list(writer: &mut dyn Write, values: &[f64]) -> io::Result<()> {
    write_usize(writer, values.len())?;
    for value in values {
        writer.write_all(&value.to_be_bytes())?;
    }
    Ok(())
}

/// Reads a list written by `write_list`, which must hold exactly `expected` values.
pub(crate) fn read_list(reader: &mut dyn Read, expected: usize) -> Result<Vec<f64>, SerializationError> {
    let found = read_usize(reader)?;
    if found != expected {
        return Err(SerializationError::ParameterCount { expected, found });
    }

    let mut values = Vec::new();
    let mut bytes = [0; 8];
    for _ in 0..expected {
        reader.read_exact(&mut bytes)?;
        values.push(f64::from_be_bytes(bytes));
    }
    Ok(values)
}

pub(crate) fn write_matrix(writer: &mut dyn Write, matrix: &Matrix) -> io::Result<()> {
    write_list(writer, &matrix.to_column_major())
}

pub(crate) fn read_matrix(reader: &mut dyn Read, rows: usize, columns: usize) -> Result<Matrix, SerializationError> {
    Shape::D2(rows, columns).validate()?;
    let values = read_list(reader, rows * columns)?;
    Ok(Matrix::from_column_major(rows, columns, &values))
}

pub(crate) fn write_vector(writer: &mut dyn Write, vector: &Vector) -> io::Result<()> {
    write_list(writer, vector)
}

pub(crate) fn read_vector(reader: &mut dyn Read, size: usize) -> Result<Vector, SerializationError> {
    Ok(Vector::from_vec(read_list(reader, size)?))
}

pub(crate) fn write_shape(writer: &mut dyn Write, shape: Shape) -> io::Result<()> {
    match shape {
        Shape::D1(length) => {
            writer.write_all(&[1])?;
            write_usize(writer, length)
        },
        Shape::D2(rows, columns) => {
            writer.write_all(&[2])?;
            write_pair(writer, (rows, columns))
        },
        Shape::D3(rows, columns, channels) => {
            writer.write_all(&[3])?;
            write_pair(writer, (rows, columns))?;
            write_usize(writer, channels)
        },
    }
}

pub(crate) fn read_shape(reader: &mut dyn Read) -> Result<Shape, SerializationError> {
    let mut tag = [0; 1];
    reader.read_exact(&mut tag)?;

    match tag[0] {
        1 => Ok(Shape::D1(read_usize(reader)?)),
        2 => {
            let (rows, columns) = read_pair(reader)?;
            Ok(Shape::D2(rows, columns))
        },
        3 => {
            let (rows, columns) = read_pair(reader)?;
            Ok(Shape::D3(rows, columns, read_usize(reader)?))
        },
        tag => Err(SerializationError::InvalidShapeTag(tag)),
    }
}
