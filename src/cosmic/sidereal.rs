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

use super::{centuries_since_j2000, nut_angles, DAYS_PER_CENTURY, MJD_J2000, SECONDS_PER_DAY};
use crate::utils::{between_0_tau, frac};
use std::f64::consts::TAU;

/// Mean obliquity of the ecliptic in radians (IAU 1976), from a Terrestrial Time MJD.
pub fn mean_obliquity(mjd_tt: f64) -> f64 {
    let t = centuries_since_j2000(mjd_tt);
    (84_381.448 / 3600.0 - (46.8150 + (0.000_59 - 0.001_813 * t) * t) * t / 3600.0).to_radians()
}

/// Greenwich Mean Sidereal Time in radians (IAU 1982), from a UT1 MJD.
pub fn gmst(mjd_ut1: f64) -> f64 {
    let mjd_0 = mjd_ut1.floor();
    let ut1_s = SECONDS_PER_DAY * (mjd_ut1 - mjd_0);
    let t_0 = (mjd_0 - MJD_J2000) / DAYS_PER_CENTURY;
    let t = (mjd_ut1 - MJD_J2000) / DAYS_PER_CENTURY;

    let gmst_s = 24_110.548_41
        + 8_640_184.812_866 * t_0
        + 1.002_737_909_350_795 * ut1_s
        + (0.093_104 - 6.2e-6 * t) * t * t;

    TAU * frac(gmst_s / SECONDS_PER_DAY)
}

/// Equation of the equinoxes in radians: the nutation in longitude projected on the equator.
pub fn eqn_equinox(mjd_tt: f64) -> f64 {
    let (dpsi, _) = nut_angles(mjd_tt);
    dpsi * mean_obliquity(mjd_tt).cos()
}

/// Greenwich Apparent Sidereal Time in radians, in [0, 2π).
pub fn gast(mjd_ut1: f64) -> f64 {
    between_0_tau(gmst(mjd_ut1) + eqn_equinox(mjd_ut1))
}
