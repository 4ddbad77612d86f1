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

/// Implements `Identifiable` for every listed layer and activation function, and generates `read_layer`, which reads an
/// identifier and dispatches to the matching `Serializable::read_from`.  Every activation function is paired with every
/// activation layer.
macro_rules! read_layer_types {
    (
        activation_layers: [$(
            $activation_layer:ident<F>,
        )*],
        activation_functions: [$(
            $activation_function:ident,
        )*],
        other_layers: [$(
            $layer:ident,
        )*],
    ) => {
        identifiable! {
            $($activation_layer<F>,)*
            $($activation_function,)*
            $($layer,)*
        }

        /// Reads a layer identifier followed by that layer's configuration and parameters.
        pub fn read_layer(reader: &mut dyn Read) -> Result<Box<dyn Layer>, SerializationError> {
            let identifier = read_string(reader)?;

            read_layer_types!(@expand identifier, reader, $($activation_layer),*; ($($activation_function),*));

            $(if identifier == $layer::identifier() {
                return $layer::read_from(reader).map(|l| Box::new(l) as Box<dyn Layer>);
            })*

            Err(SerializationError::UnknownLayer(identifier))
        }
    };
    (@expand $identifier:ident, $reader:ident, $($layer:ident),*; $types:tt) => {
        $(read_layer_types!(@if_layer_per_type $identifier, $reader, $layer, $types);)*
    };
    (@if_layer_per_type $identifier:ident, $reader:ident, $layer:ident, ($($type:ident),*)) => {
        $(if $identifier == $layer::<$type>::identifier() {
            return $layer::<$type>::read_from($reader).map(|l| Box::new(l) as Box<dyn Layer>);
        })*
    };
}

mod convolutional;
mod fully_connected;
mod pad;
mod pass_through;
mod pooling;
mod reshape;
mod softmax;
