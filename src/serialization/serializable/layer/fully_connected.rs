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

use crate::error::SerializationError;
use crate::layer::{FullyConnectedLayer, Layer};
use crate::serialization::{read_matrix, read_pair, read_vector, write_pair, Serializable};
use crate::shape::Shape;

impl Serializable for FullyConnectedLayer {
    fn read_from(reader: &mut dyn Read) -> Result<FullyConnectedLayer, SerializationError> {
        let (inputs, outputs) = read_pair(reader)?;

        Shape::D2(inputs, outputs).validate()?;

        let weights = read_matrix(reader, inputs, outputs)?;
        let biases = read_vector(reader, outputs)?;

        Ok(FullyConnectedLayer::from_parameters(weights, biases)?)
    }

    fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
        write_pair(writer, (self.weights.rows(), self.weights.columns()))?;
        self.write_parameters(writer)
    }
}
