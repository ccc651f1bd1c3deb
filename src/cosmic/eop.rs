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

use super::ARCSEC_PER_RAD;
use snafu::prelude::*;

/// Earth orientation errors.
#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum EopError {
    #[snafu(display("no Earth orientation record for MJD {mjd_utc} UTC"))]
    EpochNotFound { mjd_utc: f64 },
    #[snafu(display("cannot interpolate Earth orientation at MJD {mjd_utc} UTC: no record for the next day"))]
    NoNextRecord { mjd_utc: f64 },
    #[snafu(display("Earth orientation table is empty"))]
    EmptyTable,
}

/// One daily record of the IERS C04 series, in the units of the file (arcseconds and seconds).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EopRecord {
    /// Modified Julian Date (UTC) at 0h of this record
    pub mjd: f64,
    /// Pole coordinate x in arcseconds
    pub x_pole: f64,
    /// Pole coordinate y in arcseconds
    pub y_pole: f64,
    /// UT1 - UTC in seconds
    pub ut1_utc: f64,
    /// Length of day in seconds
    pub lod: f64,
    /// Nutation correction in longitude in arcseconds
    pub dpsi: f64,
    /// Nutation correction in obliquity in arcseconds
    pub deps: f64,
    /// Celestial pole offset dX in arcseconds
    pub dx_pole: f64,
    /// Celestial pole offset dY in arcseconds
    pub dy_pole: f64,
    /// TAI - UTC in seconds
    pub tai_utc: f64,
}

/// Earth orientation parameters at a given epoch, angles in radians and times in seconds.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Eop {
    pub x_pole: f64,
    pub y_pole: f64,
    pub ut1_utc: f64,
    pub lod: f64,
    pub dpsi: f64,
    pub deps: f64,
    pub dx_pole: f64,
    pub dy_pole: f64,
    pub tai_utc: f64,
}

/// How to compute the parameters between two daily records.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// Linear interpolation between the record of the day and the one of the next day.
    #[default]
    Linear,
    /// Use the record of the day as is.
    Nearest,
}

/// A daily series of Earth orientation parameters, sorted by date.
#[derive(Clone, Debug, Default)]
pub struct EopTable {
    records: Vec<EopRecord>,
}

impl EopTable {
    /// Builds a table from its records, which are sorted by increasing MJD.
    pub fn new(mut records: Vec<EopRecord>) -> Result<Self, EopError> {
        ensure!(!records.is_empty(), EmptyTableSnafu);
        records.sort_by(|a, b| a.mjd.total_cmp(&b.mjd));
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the first and last MJD covered by this table.
    pub fn coverage(&self) -> (f64, f64) {
        match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => (first.mjd, last.mjd),
            _ => (f64::NAN, f64::NAN),
        }
    }

    fn index_of(&self, mjd_day: f64) -> Option<usize> {
        self.records
            .binary_search_by(|rec| rec.mjd.total_cmp(&mjd_day))
            .ok()
    }

    /// Returns the Earth orientation parameters at the provided UTC Modified Julian Date.
    ///
    /// The record of the day is the one whose MJD equals the integer part of `mjd_utc`.
    /// TAI - UTC is never interpolated since it only changes at 0h.
    pub fn query(&self, mjd_utc: f64, interp: Interpolation) -> Result<Eop, EopError> {
        let day = mjd_utc.floor();
        let idx = self
            .index_of(day)
            .context(EpochNotFoundSnafu { mjd_utc })?;
        let this = &self.records[idx];

        let rec = match interp {
            Interpolation::Nearest => *this,
            Interpolation::Linear => {
                let next = self
                    .records
                    .get(idx + 1)
                    .context(NoNextRecordSnafu { mjd_utc })?;
                let fixf = mjd_utc - day;
                let lerp = |a: f64, b: f64| a + (b - a) * fixf;
                EopRecord {
                    mjd: mjd_utc,
                    x_pole: lerp(this.x_pole, next.x_pole),
                    y_pole: lerp(this.y_pole, next.y_pole),
                    ut1_utc: lerp(this.ut1_utc, next.ut1_utc),
                    lod: lerp(this.lod, next.lod),
                    dpsi: lerp(this.dpsi, next.dpsi),
                    deps: lerp(this.deps, next.deps),
                    dx_pole: lerp(this.dx_pole, next.dx_pole),
                    dy_pole: lerp(this.dy_pole, next.dy_pole),
                    tai_utc: this.tai_utc,
                }
            }
        };

        Ok(Eop {
            x_pole: rec.x_pole / ARCSEC_PER_RAD,
            y_pole: rec.y_pole / ARCSEC_PER_RAD,
            ut1_utc: rec.ut1_utc,
            lod: rec.lod,
            dpsi: rec.dpsi / ARCSEC_PER_RAD,
            deps: rec.deps / ARCSEC_PER_RAD,
            dx_pole: rec.dx_pole / ARCSEC_PER_RAD,
            dy_pole: rec.dy_pole / ARCSEC_PER_RAD,
            tai_utc: rec.tai_utc,
        })
    }
}
