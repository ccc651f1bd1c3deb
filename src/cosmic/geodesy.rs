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

use super::{EARTH_EQUATORIAL_RADIUS, EARTH_FLATTENING};
use crate::linalg::{Matrix3, Vector3};
use crate::utils::{r2, r3};

const MAX_GEODETIC_ITERATIONS: usize = 100;

/// Geodetic coordinates on the reference ellipsoid: angles in radians, height in meters.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GeodeticPosition {
    pub longitude: f64,
    pub latitude: f64,
    pub height: f64,
}

impl GeodeticPosition {
    pub fn new(longitude: f64, latitude: f64, height: f64) -> Self {
        Self {
            longitude,
            latitude,
            height,
        }
    }

    /// Builds the geodetic position from angles in degrees and a height in meters.
    pub fn from_degrees(longitude_deg: f64, latitude_deg: f64, height_m: f64) -> Self {
        Self::new(longitude_deg.to_radians(), latitude_deg.to_radians(), height_m)
    }

    /// Earth fixed position vector of these geodetic coordinates.
    pub fn to_ecef(&self) -> Vector3<f64> {
        geodetic_to_ecef(self.longitude, self.latitude, self.height)
    }
}

/// Earth fixed position vector in meters from geodetic longitude, latitude (radians) and height (meters).
pub fn geodetic_to_ecef(longitude: f64, latitude: f64, height: f64) -> Vector3<f64> {
    let e2 = EARTH_FLATTENING * (2.0 - EARTH_FLATTENING);
    let (sin_lat, cos_lat) = latitude.sin_cos();
    let (sin_lon, cos_lon) = longitude.sin_cos();

    // Radius of curvature in the prime vertical
    let n = EARTH_EQUATORIAL_RADIUS / (1.0 - e2 * sin_lat * sin_lat).sqrt();

    Vector3::new(
        (n + height) * cos_lat * cos_lon,
        (n + height) * cos_lat * sin_lon,
        ((1.0 - e2) * n + height) * sin_lat,
    )
}

/// Geodetic coordinates of an Earth fixed position vector, solved by fixed point iteration on the
/// height of the point above the equatorial plane.
pub fn ecef_to_geodetic(r: &Vector3<f64>) -> GeodeticPosition {
    if r.norm() == 0.0 {
        return GeodeticPosition::new(0.0, 0.0, -EARTH_EQUATORIAL_RADIUS);
    }

    let e2 = EARTH_FLATTENING * (2.0 - EARTH_FLATTENING);
    let tolerance = f64::EPSILON * EARTH_EQUATORIAL_RADIUS;
    let rho2 = r.x * r.x + r.y * r.y;

    let mut dz = e2 * r.z;
    let mut z_dz;
    let mut nh;
    let mut n;
    let mut iterations = 0;
    loop {
        z_dz = r.z + dz;
        nh = (rho2 + z_dz * z_dz).sqrt();
        let sin_phi = z_dz / nh;
        n = EARTH_EQUATORIAL_RADIUS / (1.0 - e2 * sin_phi * sin_phi).sqrt();
        let dz_new = n * e2 * sin_phi;
        iterations += 1;
        if (dz - dz_new).abs() < tolerance || iterations >= MAX_GEODETIC_ITERATIONS {
            if iterations >= MAX_GEODETIC_ITERATIONS {
                warn!("geodetic conversion of {r:?} stopped after {iterations} iterations");
            }
            break;
        }
        dz = dz_new;
    }

    GeodeticPosition::new(r.y.atan2(r.x), z_dz.atan2(rho2.sqrt()), nh - n)
}

/// Rotation from the Earth fixed frame to the local tangent East-North-Zenith frame.
pub fn ltc(longitude: f64, latitude: f64) -> Matrix3<f64> {
    let m = r2(-latitude) * r3(longitude);
    // R2·R3 yields (Zenith, East, North): reorder the rows as (East, North, Zenith).
    Matrix3::from_rows(&[
        m.row(1).into_owned(),
        m.row(2).into_owned(),
        m.row(0).into_owned(),
    ])
}

#[cfg(test)]
mod ut_geodesy {
    use super::*;
    use approx::assert_abs_diff_eq;

    const KAENA_LON: f64 = -2.762_343_079_106_94;
    const KAENA_LAT: f64 = 0.376_551_295_459_273;

    #[test]
    fn kaena_point_position() {
        let r = geodetic_to_ecef(KAENA_LON, KAENA_LAT, 300.2);
        assert_abs_diff_eq!(
            r,
            Vector3::new(
                -5_512_567.840_036_072_8,
                -2_196_994.446_669_318_2,
                2_330_804.966_146_890_1
            ),
            epsilon = 1e-7
        );
        // Same station from degrees
        let station = GeodeticPosition::from_degrees(-158.2706, 21.5748, 300.2);
        assert_abs_diff_eq!(station.to_ecef(), r, epsilon = 1e-6);
    }

    #[test]
    fn geodetic_inverse() {
        let geod = ecef_to_geodetic(&Vector3::new(5.0, 4.0, 3.0));
        assert_abs_diff_eq!(geod.longitude, 0.674_740_942_223_553, epsilon = 1e-12);
        assert_abs_diff_eq!(geod.latitude, 1.570_646_875_800_39, epsilon = 1e-8);
        assert_abs_diff_eq!(geod.height, -6_356_748.616_113_67, epsilon = 1e-2);

        // Round trip on the station
        let r = geodetic_to_ecef(KAENA_LON, KAENA_LAT, 300.2);
        let geod = ecef_to_geodetic(&r);
        assert_abs_diff_eq!(geod.longitude, KAENA_LON, epsilon = 1e-12);
        assert_abs_diff_eq!(geod.latitude, KAENA_LAT, epsilon = 1e-12);
        assert_abs_diff_eq!(geod.height, 300.2, epsilon = 1e-6);

        let center = ecef_to_geodetic(&Vector3::zeros());
        assert_eq!(center.height, -EARTH_EQUATORIAL_RADIUS);
    }

    #[test]
    fn local_tangent_frame() {
        let expected = Matrix3::new(
            0.370_223_471_399_199,
            -0.928_942_722_252_092,
            0.0,
            0.341_586_711_932_422,
            0.136_136_938_528_208,
            0.929_938_305_587_722,
            -0.863_859_421_119_156,
            -0.344_284_987_681_776,
            0.367_715_580_035_218,
        );
        let lt = ltc(KAENA_LON, KAENA_LAT);
        assert_abs_diff_eq!(lt, expected, epsilon = 1e-14);

        // The zenith row points along the geodetic vertical, close to the radial direction.
        let r = geodetic_to_ecef(KAENA_LON, KAENA_LAT, 300.2);
        let zenith: Vector3<f64> = lt.row(2).transpose();
        assert!(zenith.dot(&r.normalize()) > 0.999);
    }
}
