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

use super::{AccelModel, DynamicsEphemerisSnafu, DynamicsError};
use crate::cosmic::{Bodies, De430, EarthFrame, SolarSystemPositions};
use crate::linalg::Vector3;
use snafu::ResultExt;
use std::fmt;
use std::sync::Arc;

/// Perturbing acceleration of a point mass at geocentric position `s` on a satellite at geocentric
/// position `r`, both in meters, including the indirect term due to the acceleration of the Earth.
pub fn accel_point_mass(r: &Vector3<f64>, s: &Vector3<f64>, gm: f64) -> Vector3<f64> {
    // Relative position of the satellite with respect to the point mass
    let d = r - s;
    -gm * (d / d.norm().powi(3) + s / s.norm().powi(3))
}

/// Third body perturbations of the listed bodies, positions from the DE430 ephemerides.
#[derive(Clone)]
pub struct PointMasses {
    pub bodies: Vec<Bodies>,
    ephem: Arc<De430>,
}

impl PointMasses {
    /// Initializes the point mass perturbations of the provided bodies. Bodies without a
    /// gravitational parameter are ignored.
    pub fn new(bodies: &[Bodies], ephem: Arc<De430>) -> Arc<Self> {
        Arc::new(Self {
            bodies: bodies.iter().filter(|b| b.gm().is_some()).copied().collect(),
            ephem,
        })
    }

    /// The Sun, the Moon and the planets, each toggled independently, in this order.
    pub fn from_toggles(sun: bool, moon: bool, planets: bool, ephem: Arc<De430>) -> Arc<Self> {
        let mut bodies = Vec::with_capacity(10);
        if sun {
            bodies.push(Bodies::Sun);
        }
        if moon {
            bodies.push(Bodies::Moon);
        }
        if planets {
            bodies.extend_from_slice(&Bodies::PLANETS);
        }
        Self::new(&bodies, ephem)
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Sum of the perturbations given the positions of the bodies.
    pub fn accel_from(&self, radius: &Vector3<f64>, positions: &SolarSystemPositions) -> Vector3<f64> {
        self.bodies
            .iter()
            .filter_map(|body| body.gm().map(|gm| (body, gm)))
            .fold(Vector3::zeros(), |accel, (body, gm)| {
                accel + accel_point_mass(radius, &positions.get(*body), gm)
            })
    }
}

impl fmt::Display for PointMasses {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let names: Vec<&str> = self.bodies.iter().map(|b| b.name()).collect();
        write!(f, "Point masses of {}", names.join(", "))
    }
}

impl AccelModel for PointMasses {
    fn eom(&self, radius: &Vector3<f64>, frame: &EarthFrame) -> Result<Vector3<f64>, DynamicsError> {
        if self.is_empty() {
            return Ok(Vector3::zeros());
        }
        let positions = self
            .ephem
            .positions(frame.mjd_tdb())
            .context(DynamicsEphemerisSnafu)?;
        Ok(self.accel_from(radius, &positions))
    }
}
