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
use crate::layer::{CropLayer, PadLayer, Padding};
use crate::serialization::{read_pair, read_shape, write_pair, write_shape, Serializable};

fn read_padding(reader: &mut dyn Read) -> io::Result<Padding> {
    let (left, top) = read_pair(reader)?;
    let (right, bottom) = read_pair(reader)?;
    Ok(Padding::new(left, top, right, bottom))
}

fn write_padding(writer: &mut dyn Write, padding: Padding) -> io::Result<()> {
    write_pair(writer, (padding.left, padding.top))?;
    write_pair(writer, (padding.right, padding.bottom))
}

impl Serializable for PadLayer {
    fn read_from(reader: &mut dyn Read) -> Result<PadLayer, SerializationError> {
        let input_shape = read_shape(reader)?;
        let padding = read_padding(reader)?;

        Ok(PadLayer::new(input_shape, padding)?)
    }

    fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
        write_shape(writer, self.input_shape)?;
        write_padding(writer, self.padding)
    }
}

impl Serializable for CropLayer {
    fn read_from(reader: &mut dyn Read) -> Result<CropLayer, SerializationError> {
        let input_shape = read_shape(reader)?;
        let margins = read_padding(reader)?;

        Ok(CropLayer::new(input_shape, margins)?)
    }

    fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
        write_shape(writer, self.input_shape)?;
        write_padding(writer, self.margins)
    }
}
