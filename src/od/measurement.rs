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

use crate::linalg::{Matrix3, Vector3, Vector6};
use crate::time::Epoch;
use crate::utils::between_0_tau;
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// The kinds of scalar measurements of a tracking pass, in the order they are processed at each epoch.
#[derive(Copy, Clone, Debug, Hash, Serialize, Deserialize, PartialEq, Eq)]
pub enum MeasurementType {
    #[serde(rename = "azimuth_rad")]
    Azimuth,
    #[serde(rename = "elevation_rad")]
    Elevation,
    #[serde(rename = "range_m")]
    Range,
}

impl MeasurementType {
    /// Sequential processing order of the measurements of one epoch
    pub const SEQUENCE: [Self; 3] = [Self::Azimuth, Self::Elevation, Self::Range];

    /// Returns the unit of this measurement type
    pub fn unit(self) -> &'static str {
        match self {
            Self::Range => "m",
            Self::Azimuth | Self::Elevation => "rad",
        }
    }
}

impl fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::Azimuth => "azimuth",
            Self::Elevation => "elevation",
            Self::Range => "range",
        };
        write!(f, "{name}")
    }
}

/// One epoch of tracking data: azimuth and elevation in radians, range in meters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Observation {
    pub epoch: Epoch,
    /// Modified Julian Date (UTC) of the epoch
    pub mjd_utc: f64,
    pub azimuth: f64,
    pub elevation: f64,
    pub range: f64,
}

impl Observation {
    /// Returns the observed value of the provided measurement type.
    pub fn value(&self, kind: MeasurementType) -> f64 {
        match kind {
            MeasurementType::Azimuth => self.azimuth,
            MeasurementType::Elevation => self.elevation,
            MeasurementType::Range => self.range,
        }
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}: az = {:.4} deg, el = {:.4} deg, range = {:.3} km",
            self.epoch,
            self.azimuth.to_degrees(),
            self.elevation.to_degrees(),
            self.range * 1e-3
        )
    }
}

/// Azimuth and elevation of a topocentric position, and their partials with respect to that position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AzElPartials {
    /// Azimuth in [0, 2π), measured from North towards East
    pub azimuth: f64,
    pub elevation: f64,
    pub d_az_ds: Vector3<f64>,
    pub d_el_ds: Vector3<f64>,
}

/// Computes the azimuth, elevation and their partials from the topocentric East-North-Zenith position `s`.
pub fn az_el_pa(s: &Vector3<f64>) -> AzElPartials {
    let rho = s.x.hypot(s.y);
    let rho2 = rho * rho;
    let s2 = s.norm_squared();

    AzElPartials {
        azimuth: between_0_tau(s.x.atan2(s.y)),
        elevation: (s.z / rho).atan(),
        d_az_ds: Vector3::new(s.y / rho2, -s.x / rho2, 0.0),
        d_el_ds: Vector3::new(-s.x * s.z / rho, -s.y * s.z / rho, rho) / s2,
    }
}

/// Range of the topocentric position `s`, and its partials with respect to that position.
pub fn range_pa(s: &Vector3<f64>) -> (f64, Vector3<f64>) {
    let range = s.norm();
    (range, s / range)
}

/// Partials of a measurement with respect to the inertial state, from its partials with respect to
/// the topocentric position, the local tangent rotation `ltc` and the Earth rotation `u`.
///
/// Measurements are insensitive to the velocity.
pub fn state_partials(d_ds: &Vector3<f64>, ltc: &Matrix3<f64>, u: &Matrix3<f64>) -> Vector6<f64> {
    let d_dr = (d_ds.transpose() * ltc * u).transpose();
    let mut h = Vector6::zeros();
    h.fixed_rows_mut::<3>(0).copy_from(&d_dr);
    h
}
