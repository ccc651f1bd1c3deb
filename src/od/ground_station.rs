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

use crate::cosmic::{geodetic_to_ecef, ltc, GeodeticPosition};
use crate::io::ConfigRepr;
use crate::linalg::{Matrix3, Vector3};
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// GroundStation defines an azimuth, elevation and range tracking station on the Earth ellipsoid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroundStation {
    pub name: String,
    /// in degrees
    pub latitude_deg: f64,
    /// in degrees
    pub longitude_deg: f64,
    /// in meters
    pub height_m: f64,
}

impl GroundStation {
    /// Initializes a point on the surface of the Earth.
    pub fn from_point(name: String, latitude_deg: f64, longitude_deg: f64, height_m: f64) -> Self {
        Self {
            name,
            latitude_deg,
            longitude_deg,
            height_m,
        }
    }

    /// The Kaena Point station on Oahu, Hawaii, which tracked GEOS-3.
    pub fn kaena_point() -> Self {
        Self::from_point("Kaena Point".to_string(), 21.5748, -158.2706, 300.20)
    }

    /// Geodetic coordinates of this station, angles in radians.
    pub fn geodetic(&self) -> GeodeticPosition {
        GeodeticPosition::from_degrees(self.longitude_deg, self.latitude_deg, self.height_m)
    }

    /// Position of this station in the Earth fixed frame, in meters.
    pub fn position_ecef(&self) -> Vector3<f64> {
        let geod = self.geodetic();
        geodetic_to_ecef(geod.longitude, geod.latitude, geod.height)
    }

    /// Rotation from the Earth fixed frame to the East-North-Zenith frame of this station.
    pub fn ltc(&self) -> Matrix3<f64> {
        let geod = self.geodetic();
        ltc(geod.longitude, geod.latitude)
    }

    /// Topocentric East-North-Zenith position of the inertial position `r_inertial`, where `u` is
    /// the Earth rotation from the inertial frame to the Earth fixed frame.
    pub fn topocentric(&self, r_inertial: &Vector3<f64>, u: &Matrix3<f64>) -> Vector3<f64> {
        self.ltc() * (u * r_inertial - self.position_ecef())
    }
}

impl ConfigRepr for GroundStation {}

impl fmt::Display for GroundStation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} (lat.: {:.4} deg    long.: {:.4} deg    alt.: {:.3} m)",
            self.name, self.latitude_deg, self.longitude_deg, self.height_m,
        )
    }
}
