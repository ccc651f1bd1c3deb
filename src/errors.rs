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

use crate::cosmic::{ElementsError, EopError, EphemerisError};
use crate::dynamics::DynamicsError;
use crate::io::{ConfigError, InputOutputError};
use crate::od::ODError;
use crate::propagators::PropagationError;
use snafu::prelude::*;

/// Top level error of a GEOS-3 orbit determination run.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum GeosError {
    #[snafu(display("configuration error: {source}"), context(false))]
    Config { source: ConfigError },
    #[snafu(display("input/output error: {source}"), context(false))]
    InputOutput { source: InputOutputError },
    #[snafu(display("Earth orientation error: {source}"), context(false))]
    EarthOrientation { source: EopError },
    #[snafu(display("ephemeris error: {source}"), context(false))]
    Ephemeris { source: EphemerisError },
    #[snafu(display("orbital elements error: {source}"), context(false))]
    Elements { source: ElementsError },
    #[snafu(display("dynamics error: {source}"), context(false))]
    Dynamics { source: DynamicsError },
    #[snafu(display("propagation error: {source}"), context(false))]
    Propagation { source: PropagationError },
    #[snafu(display("orbit determination error: {source}"), context(false))]
    OrbitDetermination { source: ODError },
}
