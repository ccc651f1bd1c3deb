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

use super::{Bodies, EARTH_MOON_MASS_RATIO, JD_MJD_OFFSET};
use crate::linalg::Vector3;
use snafu::prelude::*;

/// Number of values in one DE430 record.
pub const DE430_RECORD_LEN: usize = 1020;

/// Ephemeris lookup errors.
#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum EphemerisError {
    #[snafu(display("epoch {t} outside of the Chebyshev interval [{start}, {end}]"))]
    OutsideInterval { t: f64, start: f64, end: f64 },
    #[snafu(display("no DE430 record covers MJD {mjd_tdb} TDB"))]
    NotCovered { mjd_tdb: f64 },
    #[snafu(display("DE430 record #{index} has {len} values but at least {expected} are needed"))]
    TruncatedRecord {
        index: usize,
        len: usize,
        expected: usize,
    },
    #[snafu(display("no DE430 records loaded"))]
    NoRecords,
}

/// Evaluates the Chebyshev approximation of a 3D vector on [`ta`, `tb`] at `t` with the Clenshaw
/// recursion, using the first `n` coefficients of each axis.
pub fn cheb3d(
    t: f64,
    n: usize,
    ta: f64,
    tb: f64,
    cx: &[f64],
    cy: &[f64],
    cz: &[f64],
) -> Result<Vector3<f64>, EphemerisError> {
    ensure!(
        ta <= t && t <= tb,
        OutsideIntervalSnafu {
            t,
            start: ta,
            end: tb
        }
    );

    let tau = (2.0 * t - ta - tb) / (tb - ta);
    let mut f1 = Vector3::zeros();
    let mut f2 = Vector3::zeros();

    for i in (1..n).rev() {
        let old_f1 = f1;
        f1 = 2.0 * tau * f1 - f2 + Vector3::new(cx[i], cy[i], cz[i]);
        f2 = old_f1;
    }

    Ok(tau * f1 - f2 + Vector3::new(cx[0], cy[0], cz[0]))
}

/// Positions of the Sun, the Moon and the planets in meters, in the mean equator and equinox of J2000.
///
/// Every body is geocentric, except the Earth itself which is relative to the solar system barycenter.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SolarSystemPositions {
    pub mercury: Vector3<f64>,
    pub venus: Vector3<f64>,
    pub earth: Vector3<f64>,
    pub mars: Vector3<f64>,
    pub jupiter: Vector3<f64>,
    pub saturn: Vector3<f64>,
    pub uranus: Vector3<f64>,
    pub neptune: Vector3<f64>,
    pub pluto: Vector3<f64>,
    pub moon: Vector3<f64>,
    pub sun: Vector3<f64>,
}

impl SolarSystemPositions {
    /// Returns the position of the requested body (the barycentric Earth for the Earth Moon barycenter).
    pub fn get(&self, body: Bodies) -> Vector3<f64> {
        match body {
            Bodies::Mercury => self.mercury,
            Bodies::Venus => self.venus,
            Bodies::EarthMoonBarycenter => self.earth,
            Bodies::Mars => self.mars,
            Bodies::Jupiter => self.jupiter,
            Bodies::Saturn => self.saturn,
            Bodies::Uranus => self.uranus,
            Bodies::Neptune => self.neptune,
            Bodies::Pluto => self.pluto,
            Bodies::Moon => self.moon,
            Bodies::Sun => self.sun,
        }
    }

    fn get_mut(&mut self, body: Bodies) -> &mut Vector3<f64> {
        match body {
            Bodies::Mercury => &mut self.mercury,
            Bodies::Venus => &mut self.venus,
            Bodies::EarthMoonBarycenter => &mut self.earth,
            Bodies::Mars => &mut self.mars,
            Bodies::Jupiter => &mut self.jupiter,
            Bodies::Saturn => &mut self.saturn,
            Bodies::Uranus => &mut self.uranus,
            Bodies::Neptune => &mut self.neptune,
            Bodies::Pluto => &mut self.pluto,
            Bodies::Moon => &mut self.moon,
            Bodies::Sun => &mut self.sun,
        }
    }
}

/// The JPL DE430 Chebyshev coefficients, one record per time block.
///
/// Each record starts with the Julian Dates (TDB) of the start and end of its block, followed by
/// the coefficients of each body, see [`Bodies::de430_layout`].
#[derive(Clone, Debug)]
pub struct De430 {
    records: Vec<Vec<f64>>,
}

impl De430 {
    /// Builds the ephemeris from its records, checking that every record holds all of the bodies.
    pub fn new(records: Vec<Vec<f64>>) -> Result<Self, EphemerisError> {
        ensure!(!records.is_empty(), NoRecordsSnafu);
        let expected = Bodies::Sun.de430_layout().offset + Bodies::Sun.de430_layout().len();
        for (index, record) in records.iter().enumerate() {
            ensure!(
                record.len() >= expected,
                TruncatedRecordSnafu {
                    index,
                    len: record.len(),
                    expected
                }
            );
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the first and last Julian Dates (TDB) covered by these records.
    pub fn coverage(&self) -> (f64, f64) {
        match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => (first[0], last[1]),
            _ => (f64::NAN, f64::NAN),
        }
    }

    fn record_at(&self, mjd_tdb: f64) -> Result<&[f64], EphemerisError> {
        let jd = mjd_tdb + JD_MJD_OFFSET;
        self.records
            .iter()
            .find(|rec| rec[0] <= jd && jd <= rec[1])
            .map(|rec| rec.as_slice())
            .context(NotCoveredSnafu { mjd_tdb })
    }

    /// Position of one body in km, as tabulated (barycentric for all but the Moon).
    fn interpolate(
        record: &[f64],
        body: Bodies,
        mjd_tdb: f64,
    ) -> Result<Vector3<f64>, EphemerisError> {
        let layout = body.de430_layout();
        let block_start = record[0] - JD_MJD_OFFSET;
        let sub_len = (record[1] - record[0]) / layout.num_subintervals as f64;
        let dt = mjd_tdb - block_start;

        let sub = ((dt / sub_len).ceil() as i64 - 1).clamp(0, layout.num_subintervals as i64 - 1)
            as usize;
        let n = layout.num_coeffs;
        let base = layout.offset + 3 * n * sub;
        let sub_start = block_start + sub_len * sub as f64;

        cheb3d(
            mjd_tdb,
            n,
            sub_start,
            sub_start + sub_len,
            &record[base..base + n],
            &record[base + n..base + 2 * n],
            &record[base + 2 * n..base + 3 * n],
        )
    }

    /// Computes the positions of the solar system bodies at the provided TDB Modified Julian Date.
    ///
    /// The Earth is derived from the Earth Moon barycenter, then every body but the Moon is made
    /// geocentric.
    pub fn positions(&self, mjd_tdb: f64) -> Result<SolarSystemPositions, EphemerisError> {
        let record = self.record_at(mjd_tdb)?;

        let mut pos = SolarSystemPositions::default();
        for body in Bodies::ALL {
            *pos.get_mut(body) = Self::interpolate(record, body, mjd_tdb)? * 1e3;
        }

        pos.earth -= pos.moon / (1.0 + EARTH_MOON_MASS_RATIO);
        let earth = pos.earth;
        for body in Bodies::PLANETS.into_iter().chain([Bodies::Sun]) {
            *pos.get_mut(body) -= earth;
        }

        Ok(pos)
    }
}

#[cfg(test)]
mod ut_ephemeris {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn clenshaw() {
        let r = cheb3d(
            0.5,
            3,
            0.0,
            10.0,
            &[5.0, 4.0, 3.0],
            &[6.0, 7.0, 8.0],
            &[2.0, 1.0, 0.0],
        )
        .unwrap();
        assert_abs_diff_eq!(r, Vector3::new(3.26, 4.66, 1.1), epsilon = 1e-12);

        // A single coefficient is a constant
        let r = cheb3d(2.0, 1, 1.0, 3.0, &[1.5], &[-2.0], &[0.25]).unwrap();
        assert_eq!(r, Vector3::new(1.5, -2.0, 0.25));

        assert_eq!(
            cheb3d(10.5, 3, 0.0, 10.0, &[0.0; 3], &[0.0; 3], &[0.0; 3]),
            Err(EphemerisError::OutsideInterval {
                t: 10.5,
                start: 0.0,
                end: 10.0
            })
        );
    }

    const JD_START: f64 = 2_449_744.5;

    /// A record where each body has constant positions per sub-interval: the x axis of the
    /// sub-interval `j` equals `100 * (body index + 1) + j`, y and z are zero.
    fn synthetic_record() -> Vec<f64> {
        let mut record = vec![0.0; DE430_RECORD_LEN];
        record[0] = JD_START;
        record[1] = JD_START + 32.0;
        for (idx, body) in Bodies::ALL.iter().enumerate() {
            let layout = body.de430_layout();
            for j in 0..layout.num_subintervals {
                let base = layout.offset + 3 * layout.num_coeffs * j;
                record[base] = 100.0 * (idx + 1) as f64 + j as f64;
            }
        }
        record
    }

    #[test]
    fn sub_intervals_and_geocentric() {
        let de = De430::new(vec![synthetic_record()]).unwrap();
        let mjd_start = JD_START - JD_MJD_OFFSET;

        // 5 days in the block: the Moon is in its second sub-interval, the others in their first one
        let pos = de.positions(mjd_start + 5.0).unwrap();
        assert_abs_diff_eq!(pos.moon.x, 1001e3, epsilon = 1e-6);
        let earth = 300e3 - 1001e3 / (1.0 + EARTH_MOON_MASS_RATIO);
        assert_abs_diff_eq!(pos.earth.x, earth, epsilon = 1e-6);
        assert_abs_diff_eq!(pos.mercury.x, 100e3 - earth, epsilon = 1e-6);
        assert_abs_diff_eq!(pos.sun.x, 1100e3 - earth, epsilon = 1e-6);
        assert_abs_diff_eq!(pos.get(Bodies::Mars).x, 400e3 - earth, epsilon = 1e-6);
        assert_eq!(pos.sun.y, 0.0);

        // Block start is in the first sub-interval, block end in the last one
        let pos = de.positions(mjd_start).unwrap();
        assert_abs_diff_eq!(pos.moon.x, 1000e3, epsilon = 1e-6);
        let pos = de.positions(mjd_start + 32.0).unwrap();
        assert_abs_diff_eq!(pos.moon.x, 1007e3, epsilon = 1e-6);
        let earth = 301e3 - 1007e3 / (1.0 + EARTH_MOON_MASS_RATIO);
        assert_abs_diff_eq!(pos.sun.x, 1101e3 - earth, epsilon = 1e-6);
    }

    #[test]
    fn coverage() {
        let de = De430::new(vec![synthetic_record()]).unwrap();
        assert_eq!(de.coverage(), (JD_START, JD_START + 32.0));
        let mjd = JD_START - JD_MJD_OFFSET - 1.0;
        assert_eq!(
            de.positions(mjd),
            Err(EphemerisError::NotCovered { mjd_tdb: mjd })
        );
        assert_eq!(De430::new(vec![]).err(), Some(EphemerisError::NoRecords));
        assert!(matches!(
            De430::new(vec![vec![0.0; 12]]),
            Err(EphemerisError::TruncatedRecord { index: 0, .. })
        ));
    }
}
