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

use super::{
    gha_matrix, mjday_tdb, nut_matrix, pole_matrix, prec_matrix, Eop, EopError, EopTable,
    Interpolation, TimeDifferences, MJD_J2000, SECONDS_PER_DAY,
};
use crate::linalg::Matrix3;

/// The Earth orientation and time scales at one epoch, and the resulting transformation from the
/// mean equator and equinox of J2000 (inertial) to the Earth fixed frame.
///
/// The transformation is `Pole · GHA(UT1) · Nutation(TT) · Precession(J2000 → TT)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EarthFrame {
    /// Epoch of the Earth orientation lookup, as a UTC MJD
    pub mjd_utc: f64,
    /// Terrestrial Time used for precession and nutation
    pub mjd_tt: f64,
    /// UT1 used for the Greenwich hour angle
    pub mjd_ut1: f64,
    /// Interpolated Earth orientation parameters at `mjd_utc`
    pub eop: Eop,
    /// Time scale offsets at `mjd_utc`
    pub time_diffs: TimeDifferences,
    icrf_to_itrf: Matrix3<f64>,
}

impl EarthFrame {
    /// Builds the frame with every quantity evaluated at the provided UTC epoch.
    pub fn at_utc(eop_table: &EopTable, mjd_utc: f64) -> Result<Self, EopError> {
        let eop = eop_table.query(mjd_utc, Interpolation::Linear)?;
        let time_diffs = TimeDifferences::new(eop.ut1_utc, eop.tai_utc);
        let mjd_ut1 = mjd_utc + eop.ut1_utc / SECONDS_PER_DAY;
        let mjd_tt = mjd_utc + time_diffs.tt_utc / SECONDS_PER_DAY;

        Ok(Self::compose(mjd_utc, mjd_tt, mjd_ut1, eop, time_diffs))
    }

    /// Builds the frame where the Earth orientation and UT1 are frozen at a reference epoch
    /// (`ref_mjd_utc` and its Terrestrial Time `ref_mjd_tt`), while precession and nutation are
    /// evaluated at `mjd_tt`.
    ///
    /// This is the frame used by the variational equations: over one propagation step the change of
    /// the Earth orientation parameters is negligible for the state transition matrix.
    pub fn with_frozen_orientation(
        eop_table: &EopTable,
        ref_mjd_utc: f64,
        ref_mjd_tt: f64,
        mjd_tt: f64,
    ) -> Result<Self, EopError> {
        let eop = eop_table.query(ref_mjd_utc, Interpolation::Linear)?;
        let time_diffs = TimeDifferences::new(eop.ut1_utc, eop.tai_utc);
        let mjd_ut1 = ref_mjd_tt + (eop.ut1_utc - time_diffs.tt_utc) / SECONDS_PER_DAY;

        Ok(Self::compose(ref_mjd_utc, mjd_tt, mjd_ut1, eop, time_diffs))
    }

    fn compose(
        mjd_utc: f64,
        mjd_tt: f64,
        mjd_ut1: f64,
        eop: Eop,
        time_diffs: TimeDifferences,
    ) -> Self {
        let precession = prec_matrix(MJD_J2000, mjd_tt);
        let nutation = nut_matrix(mjd_tt);
        let icrf_to_itrf =
            pole_matrix(eop.x_pole, eop.y_pole) * gha_matrix(mjd_ut1) * (nutation * precession);

        Self {
            mjd_utc,
            mjd_tt,
            mjd_ut1,
            eop,
            time_diffs,
            icrf_to_itrf,
        }
    }

    /// Returns the rotation from the inertial frame (mean of J2000) to the Earth fixed frame.
    pub fn icrf_to_itrf(&self) -> Matrix3<f64> {
        self.icrf_to_itrf
    }

    /// Returns the rotation from the Earth fixed frame to the inertial frame (mean of J2000).
    pub fn itrf_to_icrf(&self) -> Matrix3<f64> {
        self.icrf_to_itrf.transpose()
    }

    /// Barycentric Dynamical Time of this frame, as used for the planetary ephemerides.
    pub fn mjd_tdb(&self) -> f64 {
        mjday_tdb(self.mjd_tt)
    }
}
