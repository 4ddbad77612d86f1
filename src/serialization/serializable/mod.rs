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
use crate::serialization::Identifiable;

/// A type that can write itself to a byte stream and be rebuilt from one.
///
/// `write_to` doesn't include the identifier; whoever writes a value of an unknown type writes that first.
pub trait Serializable: Identifiable {
    fn read_from(reader: &mut dyn Read) -> Result<Self, SerializationError> where Self: Sized;
    fn write_to(&self, writer: &mut dyn Write) -> io::Result<()>;
}

#[macro_use]
mod layer;
