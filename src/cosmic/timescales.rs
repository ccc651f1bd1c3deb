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

use super::{DAYS_PER_CENTURY, JD_MJD_OFFSET, MJD_J2000, SECONDS_PER_DAY};
use crate::time::Epoch;

/// TT - TAI in seconds
pub const TT_TAI_S: f64 = 32.184;
/// GPS - TAI in seconds
pub const GPS_TAI_S: f64 = -19.0;

/// Offsets between the time scales in seconds, computed from UT1-UTC and TAI-UTC.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TimeDifferences {
    pub ut1_tai: f64,
    pub utc_gps: f64,
    pub ut1_gps: f64,
    pub tt_utc: f64,
    pub gps_utc: f64,
}

impl TimeDifferences {
    pub fn new(ut1_utc: f64, tai_utc: f64) -> Self {
        let utc_tai = -tai_utc;
        let ut1_tai = ut1_utc - tai_utc;
        let utc_gps = utc_tai - GPS_TAI_S;
        Self {
            ut1_tai,
            utc_gps,
            ut1_gps: ut1_tai - GPS_TAI_S,
            tt_utc: TT_TAI_S - utc_tai,
            gps_utc: GPS_TAI_S - utc_tai,
        }
    }
}

/// Modified Julian Date from a Gregorian calendar date and time of day.
///
/// Valid for any date after 1900 March 1 and before 2100 February 28.
pub fn mjday(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: f64) -> f64 {
    let (year, month) = (year as f64, month as f64);
    let jd = 367.0 * year - (7.0 * (year + ((month + 9.0) / 12.0).floor()) * 0.25).floor()
        + (275.0 * month / 9.0).floor()
        + day as f64
        + 1_721_013.5
        + ((second / 60.0 + minute as f64) / 60.0 + hour as f64) / 24.0;

    jd - JD_MJD_OFFSET
}

/// Returns the Modified Julian Date in the UTC time scale of the provided epoch.
pub fn mjd_utc(epoch: Epoch) -> f64 {
    epoch.to_mjd_utc_days()
}

/// Julian centuries since J2000 of a Modified Julian Date.
pub fn centuries_since_j2000(mjd: f64) -> f64 {
    (mjd - MJD_J2000) / DAYS_PER_CENTURY
}

/// Barycentric Dynamical Time from Terrestrial Time, both as Modified Julian Dates.
///
/// Uses the leading periodic terms of the TDB - TT series (accurate to about 10 microseconds).
pub fn mjday_tdb(mjd_tt: f64) -> f64 {
    let t_tt = centuries_since_j2000(mjd_tt);

    const TERMS: [(f64, f64, f64); 7] = [
        (0.001_658, 628.307_6, 6.240_1),
        (0.000_022, 575.338_5, 4.297_0),
        (0.000_014, 1_256.615_2, 6.196_9),
        (0.000_005, 606.977_7, 4.021_2),
        (0.000_005, 52.969_1, 0.444_4),
        (0.000_002, 21.329_9, 5.543_1),
        (0.000_010, 628.307_6, 4.249_0),
    ];

    let tdb_tt_s: f64 = TERMS
        .iter()
        .map(|(amplitude, rate, phase)| amplitude * (rate * t_tt + phase).sin())
        .sum();

    mjd_tt + tdb_tt_s / SECONDS_PER_DAY
}
