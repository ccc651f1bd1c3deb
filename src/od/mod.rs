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

use crate::cosmic::EopError;
use crate::dynamics::DynamicsError;
use crate::propagators::PropagationError;
use snafu::prelude::Snafu;

/// Provides the time and scalar measurement updates of the Extended Kalman Filter.
pub mod filter;
pub use filter::{measurement_update, time_update, KalmanUpdate};

/// Provides the azimuth, elevation and range tracking station.
mod ground_station;
pub use ground_station::GroundStation;

/// Provides the measurement types, the observations and the partials of the measurements.
pub mod measurement;

/// Provides the orbit determination process and its solution.
pub mod process;

#[allow(unused_imports)]
pub mod prelude {
    pub use super::filter::*;
    pub use super::ground_station::*;
    pub use super::measurement::*;
    pub use super::process::*;
    pub use super::ODError;
}

#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ODError {
    #[snafu(display("during an orbit determination, encountered {source}"))]
    ODPropError { source: PropagationError },
    #[snafu(display("during an orbit determination, encountered {source}"))]
    ODDynamicsError { source: DynamicsError },
    #[snafu(display("Earth orientation unavailable for the measurement: {source}"))]
    ODEopError { source: EopError },
    #[snafu(display("Kalman gain is singular: innovation variance is {variance}"))]
    SingularKalmanGain { variance: f64 },
    #[snafu(display("at least {need} measurements required for {action}"))]
    TooFewMeasurements { need: usize, action: &'static str },
    #[snafu(display("seed index {index} is out of the {count} observations"))]
    InvalidSeedIndex { index: usize, count: usize },
}
