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

/*! # geos3-od

Sequential orbit determination of the GEOS-3 satellite from the Kaena Point (Hawaii) tracking station.

The estimator is an Extended Kalman Filter which processes azimuth, elevation and range one scalar at a time.
The dynamics include a 20x20 GGM03S harmonic gravity field, the Sun, the Moon and the planets as point masses
from the JPL DE430 ephemerides, and the IAU 1976/1980 reduction from the mean-of-J2000 frame to the Earth fixed frame.
*/

/// Provides the embedded Runge Kutta propagators.
pub mod propagators;

/// Provides the gravity field, point mass perturbations and variational equations.
pub mod dynamics;

/// Provides the time scales, Earth orientation, reference frames, geodesy and the planetary ephemerides.
pub mod cosmic;

/// Utility functions shared by different modules, and which may be useful to engineers.
pub mod utils;

mod errors;
/// Functions which may fail return an error, and the batch driver stops on the first one.
pub use self::errors::GeosError;

/// All the input/output needs for this library: gravity, ephemeris, EOP and tracking files, scenario configuration.
pub mod io;

/// The Extended Kalman Filter, measurement models and the orbit determination process.
pub mod od;

#[macro_use]
extern crate log;
extern crate hifitime;
extern crate nalgebra as na;

/// Re-export of hifitime
pub mod time {
    pub use hifitime::*;
}

/// Re-export nalgebra
pub mod linalg {
    pub use na::base::*;
}

pub mod prelude {
    pub use crate::cosmic::{EarthFrame, Eop, EopTable, Interpolation, SolarSystemPositions, De430};
    pub use crate::dynamics::{
        ForceModelConfig, HarmonicsMem, OrbitalDynamics, StateAndStm, VariationalDynamics,
    };
    pub use crate::io::estimates::{export_estimates, ExportCfg};
    pub use crate::io::scenario::ScenarioConfig;
    pub use crate::io::tracking_data::TrackingArc;
    pub use crate::io::ConfigRepr;
    pub use crate::od::prelude::*;
    pub use crate::propagators::{CashKarp45, Dormand45, IntegratorKind, PropOpts, Propagator};
    pub use crate::time::{Epoch, TimeScale};
    pub use crate::GeosError;
}
