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

use crate::cosmic::{EarthFrame, EopError, EphemerisError};
use crate::linalg::allocator::Allocator;
use crate::linalg::{DefaultAllocator, DimName, Matrix3, OVector, Vector3};
use serde_derive::{Deserialize, Serialize};
use snafu::prelude::*;
use std::fmt;

/// Orbital dynamics of an Earth orbiter in the mean equator and equinox of J2000.
pub mod orbital;
pub use self::orbital::*;

/// The variational equations, propagating the state transition matrix alongside the state.
pub mod variational;
pub use self::variational::*;

/// Third body perturbations.
pub mod pointmasses;
pub use self::pointmasses::*;

/// Spherical harmonic gravity model of the Earth.
pub mod sph_harmonics;
pub use self::sph_harmonics::*;

pub use crate::io::gravity::HarmonicsMem;

/// Position increment, in meters, of the central difference used for acceleration gradients.
pub const GRADIENT_INCREMENT_M: f64 = 1.0;

/// A trait for models with equations of motion that can be integrated.
///
/// The time argument of `eom` is in seconds past the reference epoch of the dynamics.
pub trait Dynamics: Clone + Sync + Send
where
    DefaultAllocator: Allocator<Self::StateSize>,
{
    /// Number of components of the integrated vector
    type StateSize: DimName;

    /// Defines the equations of motion at `delta_t` seconds past the reference epoch.
    fn eom(
        &self,
        delta_t: f64,
        state: &OVector<f64, Self::StateSize>,
    ) -> Result<OVector<f64, Self::StateSize>, DynamicsError>;
}

/// A trait for immutable dynamics that return an acceleration (e.g. spherical harmonics, third bodies).
pub trait AccelModel: Send + Sync + fmt::Display {
    /// Acceleration in m/s^2 at the inertial position `radius` (m), given the Earth orientation of the epoch.
    fn eom(&self, radius: &Vector3<f64>, frame: &EarthFrame) -> Result<Vector3<f64>, DynamicsError>;

    /// Gradient of the acceleration with respect to the position, computed by central differences
    /// of plus and minus half the increment along each axis.
    fn gradient(
        &self,
        radius: &Vector3<f64>,
        frame: &EarthFrame,
    ) -> Result<Matrix3<f64>, DynamicsError> {
        central_difference(radius, |r| self.eom(r, frame))
    }
}

/// Central difference gradient of `accel` at `radius`, column `i` being the partial along axis `i`.
pub(crate) fn central_difference<F, E>(radius: &Vector3<f64>, mut accel: F) -> Result<Matrix3<f64>, E>
where
    F: FnMut(&Vector3<f64>) -> Result<Vector3<f64>, E>,
{
    let mut grad = Matrix3::zeros();
    for i in 0..3 {
        let mut dr = Vector3::zeros();
        dr[i] = GRADIENT_INCREMENT_M;
        let da = accel(&(radius + dr / 2.0))? - accel(&(radius - dr / 2.0))?;
        grad.set_column(i, &(da / GRADIENT_INCREMENT_M));
    }
    Ok(grad)
}

/// Force model settings: reference epoch of the propagation, gravity field truncation and perturbers.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceModelConfig {
    /// Reference epoch of the propagation time argument, as a UTC MJD
    pub mjd_utc: f64,
    /// The same reference epoch in Terrestrial Time (used by the variational equations)
    pub mjd_tt: f64,
    /// Maximum degree of the gravity field
    pub degree: usize,
    /// Maximum order of the gravity field
    pub order: usize,
    pub sun: bool,
    pub moon: bool,
    pub planets: bool,
}

impl ForceModelConfig {
    /// Returns these settings with a new reference epoch.
    pub fn with_epoch(self, mjd_utc: f64, mjd_tt: f64) -> Self {
        Self {
            mjd_utc,
            mjd_tt,
            ..self
        }
    }
}

impl Default for ForceModelConfig {
    /// A 20x20 field with the Sun, the Moon and the planets.
    fn default() -> Self {
        Self {
            mjd_utc: 0.0,
            mjd_tt: 0.0,
            degree: 20,
            order: 20,
            sun: true,
            moon: true,
            planets: true,
        }
    }
}

impl fmt::Display for ForceModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}x{} gravity field, Sun: {}, Moon: {}, planets: {}",
            self.degree, self.order, self.sun, self.moon, self.planets
        )
    }
}

/// Dynamical model errors.
#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DynamicsError {
    /// Earth orientation unavailable at the requested epoch.
    #[snafu(display("dynamical model issue due to Earth orientation: {source}"))]
    DynamicsEop { source: EopError },
    /// Planetary ephemerides unavailable at the requested epoch.
    #[snafu(display("dynamical model issue due to the ephemerides: {source}"))]
    DynamicsEphemeris { source: EphemerisError },
    /// Requested field is larger than the loaded coefficients.
    #[snafu(display(
        "requested a {degree}x{order} gravity field but only degree {max_degree} is loaded"
    ))]
    GravityFieldTooSmall {
        degree: usize,
        order: usize,
        max_degree: usize,
    },
    #[snafu(display("gravity field order {order} is greater than its degree {degree}"))]
    InvalidTruncation { degree: usize, order: usize },
}
