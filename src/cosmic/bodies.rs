/*
    Nyx, blazing fast astrodynamics
    Copyright (C) 2018-onwards Christopher Rabotin <christopher.rabotin@gmail.com>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use super::{
    GM_JUPITER, GM_MARS, GM_MERCURY, GM_MOON, GM_NEPTUNE, GM_PLUTO, GM_SATURN, GM_SUN, GM_URANUS,
    GM_VENUS,
};
use std::fmt;

/// The bodies tabulated in the DE430 Chebyshev coefficient file, in file order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Bodies {
    Mercury,
    Venus,
    EarthMoonBarycenter,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Moon,
    Sun,
}

/// Location of the Chebyshev coefficients of a body within one DE430 record.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ChebyshevLayout {
    /// Zero-based index of the first coefficient in the record
    pub offset: usize,
    /// Number of coefficients per axis and per sub-interval
    pub num_coeffs: usize,
    /// Number of sub-intervals the record is split into for this body
    pub num_subintervals: usize,
}

impl ChebyshevLayout {
    const fn new(one_based_offset: usize, num_coeffs: usize, num_subintervals: usize) -> Self {
        Self {
            offset: one_based_offset - 1,
            num_coeffs,
            num_subintervals,
        }
    }

    /// Number of values used by this body in each record (three axes for each sub-interval).
    pub const fn len(&self) -> usize {
        3 * self.num_coeffs * self.num_subintervals
    }
}

impl Bodies {
    /// The eight planets other than the Earth, as perturbers of an Earth orbiter.
    pub const PLANETS: [Bodies; 8] = [
        Bodies::Mercury,
        Bodies::Venus,
        Bodies::Mars,
        Bodies::Jupiter,
        Bodies::Saturn,
        Bodies::Uranus,
        Bodies::Neptune,
        Bodies::Pluto,
    ];

    /// All of the bodies of the DE430 record, in record order.
    pub const ALL: [Bodies; 11] = [
        Bodies::Mercury,
        Bodies::Venus,
        Bodies::EarthMoonBarycenter,
        Bodies::Mars,
        Bodies::Jupiter,
        Bodies::Saturn,
        Bodies::Uranus,
        Bodies::Neptune,
        Bodies::Pluto,
        Bodies::Moon,
        Bodies::Sun,
    ];

    /// Returns the layout of this body's coefficients in a DE430 record.
    pub const fn de430_layout(&self) -> ChebyshevLayout {
        match *self {
            Self::Mercury => ChebyshevLayout::new(3, 14, 4),
            Self::Venus => ChebyshevLayout::new(171, 10, 2),
            Self::EarthMoonBarycenter => ChebyshevLayout::new(231, 13, 2),
            Self::Mars => ChebyshevLayout::new(309, 11, 1),
            Self::Jupiter => ChebyshevLayout::new(342, 8, 1),
            Self::Saturn => ChebyshevLayout::new(366, 7, 1),
            Self::Uranus => ChebyshevLayout::new(387, 6, 1),
            Self::Neptune => ChebyshevLayout::new(405, 6, 1),
            Self::Pluto => ChebyshevLayout::new(423, 6, 1),
            Self::Moon => ChebyshevLayout::new(441, 13, 8),
            Self::Sun => ChebyshevLayout::new(753, 11, 2),
        }
    }

    /// Returns the gravitational parameter in m^3/s^2, if this body can be used as a point mass.
    pub const fn gm(&self) -> Option<f64> {
        match *self {
            Self::Mercury => Some(GM_MERCURY),
            Self::Venus => Some(GM_VENUS),
            Self::EarthMoonBarycenter => None,
            Self::Mars => Some(GM_MARS),
            Self::Jupiter => Some(GM_JUPITER),
            Self::Saturn => Some(GM_SATURN),
            Self::Uranus => Some(GM_URANUS),
            Self::Neptune => Some(GM_NEPTUNE),
            Self::Pluto => Some(GM_PLUTO),
            Self::Moon => Some(GM_MOON),
            Self::Sun => Some(GM_SUN),
        }
    }

    /// Returns the human name
    pub fn name(&self) -> &'static str {
        match *self {
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::EarthMoonBarycenter => "Earth Moon Barycenter",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
            Self::Moon => "Moon",
            Self::Sun => "Sun",
        }
    }
}

impl fmt::Display for Bodies {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
