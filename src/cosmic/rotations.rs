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

use super::{gast, ARCSEC_PER_RAD, DAYS_PER_CENTURY, MJD_J2000};
use crate::linalg::Matrix3;
use crate::utils::{r1, r2, r3};

/// Defines an Euler rotation, angle must be in radians
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EulerRotation {
    R1(f64),
    R2(f64),
    R3(f64),
}

impl EulerRotation {
    /// Get the DCM from this Euler rotation
    pub fn dcm(&self) -> Matrix3<f64> {
        match *self {
            Self::R1(angle) => r1(angle),
            Self::R2(angle) => r2(angle),
            Self::R3(angle) => r3(angle),
        }
    }

    /// Returns the DCM of the sequence, where the first rotation of the slice is applied first.
    pub fn sequence(rotations: &[Self]) -> Matrix3<f64> {
        rotations
            .iter()
            .fold(Matrix3::identity(), |dcm, rot| rot.dcm() * dcm)
    }
}

/// Precession transformation of equatorial coordinates (IAU 1976) from the mean equator and equinox
/// of `mjd_1` to the mean equator and equinox of `mjd_2`, both in Terrestrial Time.
pub fn prec_matrix(mjd_1: f64, mjd_2: f64) -> Matrix3<f64> {
    let t = (mjd_1 - MJD_J2000) / DAYS_PER_CENTURY;
    let dt = (mjd_2 - mjd_1) / DAYS_PER_CENTURY;

    // Precession angles
    let zeta = ((2306.2181 + (1.396_56 - 0.000_139 * t) * t)
        + ((0.301_88 - 0.000_344 * t) + 0.017_998 * dt) * dt)
        * dt
        / ARCSEC_PER_RAD;
    let z = zeta + ((0.792_80 + 0.000_411 * t) + 0.000_205 * dt) * dt * dt / ARCSEC_PER_RAD;
    let theta = ((2004.3109 - (0.853_30 + 0.000_217 * t) * t)
        - ((0.426_65 + 0.000_217 * t) + 0.041_833 * dt) * dt)
        * dt
        / ARCSEC_PER_RAD;

    EulerRotation::sequence(&[
        EulerRotation::R3(-zeta),
        EulerRotation::R2(theta),
        EulerRotation::R3(-z),
    ])
}

/// Polar motion: transformation from the pseudo Earth fixed to the Earth fixed frame.
///
/// Pole coordinates are in radians.
pub fn pole_matrix(x_pole: f64, y_pole: f64) -> Matrix3<f64> {
    r2(-x_pole) * r1(-y_pole)
}

/// Greenwich hour angle: transformation from the true equator and equinox to the pseudo Earth fixed frame.
pub fn gha_matrix(mjd_ut1: f64) -> Matrix3<f64> {
    r3(gast(mjd_ut1))
}
