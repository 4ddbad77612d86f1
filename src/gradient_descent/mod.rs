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

pub use self::momentum::{descend, descend_vector};

/// The hyper-parameters of a single update.  These are passed to every update rather than stored in the network.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LearningParameters {
    /// Step size applied to the gradient.
    pub rate: f64,
    /// Fraction of the previous step carried into the next one.
    pub momentum: f64,
    /// L2 weight decay coefficient.
    pub regulariser: f64,
}

impl LearningParameters {
    pub fn new(rate: f64, momentum: f64, regulariser: f64) -> LearningParameters {
        LearningParameters {
            rate,
            momentum,
            regulariser,
        }
    }
}

impl Default for LearningParameters {
    fn default() -> LearningParameters {
        LearningParameters::new(0.01, 0.9, 0.0005)
    }
}

mod momentum;
