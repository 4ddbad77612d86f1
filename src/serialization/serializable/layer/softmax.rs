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
use crate::layer::SoftmaxLayer;
use crate::serialization::{read_shape, write_shape, Serializable};
use crate::shape::Shape;

impl Serializable for SoftmaxLayer {
    fn read_from(reader: &mut dyn Read) -> Result<SoftmaxLayer, SerializationError> {
        Ok(SoftmaxLayer::new(read_shape(reader)?)?)
    }

    fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
        write_shape(writer, Shape::D1(self.size))
    }
}
