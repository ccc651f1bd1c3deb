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

use super::GM_EARTH;
use crate::linalg::Vector6;
use crate::utils::between_0_tau;
use snafu::prelude::*;
use std::f64::consts::PI;
use std::fmt;

const MAX_KEPLER_ITERATIONS: usize = 15;
const KEPLER_TOLERANCE: f64 = 100.0 * f64::EPSILON;

#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ElementsError {
    #[snafu(display(
        "Kepler's equation did not converge for M = {mean_anomaly} rad and e = {ecc} after {iterations} iterations"
    ))]
    ConvergenceFailure {
        mean_anomaly: f64,
        ecc: f64,
        iterations: usize,
    },
}

/// Solves Kepler's equation `E - e sin E = M` for the eccentric anomaly with Newton's method.
pub fn ecc_anomaly(mean_anomaly: f64, ecc: f64) -> Result<f64, ElementsError> {
    let m = between_0_tau(mean_anomaly);
    let mut ea = if ecc < 0.8 { m } else { PI };

    let kepler = |ea: f64| ea - ecc * ea.sin() - m;
    let mut f = kepler(ea);
    ea -= f / (1.0 - ecc * ea.cos());
    let mut iterations = 1;

    while f.abs() > KEPLER_TOLERANCE || f.is_nan() {
        f = kepler(ea);
        ea -= f / (1.0 - ecc * ea.cos());
        iterations += 1;
        ensure!(
            iterations < MAX_KEPLER_ITERATIONS,
            ConvergenceFailureSnafu {
                mean_anomaly,
                ecc,
                iterations
            }
        );
    }

    Ok(ea)
}

/// Osculating Keplerian elements of an Earth orbit. Angles in radians, distances in meters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KeplerianElements {
    /// Semi-latus rectum
    pub p: f64,
    /// Semi-major axis
    pub a: f64,
    /// Eccentricity
    pub e: f64,
    /// Inclination
    pub i: f64,
    /// Right ascension of the ascending node, in [0, 2π)
    pub raan: f64,
    /// Argument of periapsis, in [0, 2π)
    pub aop: f64,
    /// Mean anomaly, in [0, 2π)
    pub mean_anomaly: f64,
}

impl KeplerianElements {
    /// Computes the elements from an inertial position and velocity (m, m/s).
    pub fn from_state(state: &Vector6<f64>) -> Self {
        Self::from_state_with_gm(state, GM_EARTH)
    }

    /// Computes the elements from an inertial position and velocity with the provided gravitational parameter.
    pub fn from_state_with_gm(state: &Vector6<f64>, gm: f64) -> Self {
        let r = state.fixed_rows::<3>(0);
        let v = state.fixed_rows::<3>(3);

        let h = r.cross(&v);
        let h_norm = h.norm();
        let p = h_norm * h_norm / gm;

        let raan = between_0_tau(h[0].atan2(-h[1]));
        let i = (h[0] * h[0] + h[1] * h[1]).sqrt().atan2(h[2]);
        // Argument of latitude
        let u = (r[2] * h_norm).atan2(-r[0] * h[1] + r[1] * h[0]);

        let r_norm = r.norm();
        let a = 1.0 / (2.0 / r_norm - v.dot(&v) / gm);

        let e_cos_ea = 1.0 - r_norm / a;
        let e_sin_ea = r.dot(&v) / (gm * a).sqrt();
        let e2 = e_cos_ea * e_cos_ea + e_sin_ea * e_sin_ea;
        let e = e2.sqrt();
        let ea = e_sin_ea.atan2(e_cos_ea);

        let mean_anomaly = between_0_tau(ea - e_sin_ea);
        let nu = ((1.0 - e2).sqrt() * e_sin_ea).atan2(e_cos_ea - e2);
        let aop = between_0_tau(u - nu);

        Self {
            p,
            a,
            e,
            i,
            raan,
            aop,
            mean_anomaly,
        }
    }

    /// Returns the eccentric anomaly of these elements.
    pub fn ecc_anomaly(&self) -> Result<f64, ElementsError> {
        ecc_anomaly(self.mean_anomaly, self.e)
    }
}

impl fmt::Display for KeplerianElements {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "sma = {:.3} km\tecc = {:.6}\tinc = {:.4} deg\traan = {:.4} deg\taop = {:.4} deg\tma = {:.4} deg",
            self.a * 1e-3,
            self.e,
            self.i.to_degrees(),
            self.raan.to_degrees(),
            self.aop.to_degrees(),
            self.mean_anomaly.to_degrees()
        )
    }
}

#[cfg(test)]
mod ut_elements {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[test]
    fn eccentric_anomaly() {
        assert_abs_diff_eq!(
            ecc_anomaly(0.5, 1.0).unwrap(),
            1.497_300_389_095_89,
            epsilon = 1e-12
        );
    }

    #[rstest]
    #[case(0.5, 0.1)]
    #[case(4.0, 0.95)]
    #[case(-1.0, 0.3)]
    #[case(0.0, 0.0)]
    fn kepler_equation(#[case] mean_anomaly: f64, #[case] ecc: f64) {
        let ea = ecc_anomaly(mean_anomaly, ecc).unwrap();
        assert_abs_diff_eq!(
            ea - ecc * ea.sin(),
            between_0_tau(mean_anomaly),
            epsilon = 1e-12
        );
    }

    #[test]
    fn kepler_divergence() {
        assert!(matches!(
            ecc_anomaly(1.0, f64::NAN),
            Err(ElementsError::ConvergenceFailure { .. })
        ));
    }

    #[test]
    fn elements_from_state() {
        let kep = KeplerianElements::from_state(&Vector6::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0));
        assert_abs_diff_eq!(kep.p, 1.354_740_115_648_23e-13, epsilon = 1e-25);
        assert_abs_diff_eq!(kep.a, 1.870_828_693_387_65, epsilon = 1e-12);
        assert_abs_diff_eq!(kep.e, 0.999_999_999_999_964, epsilon = 1e-12);
        assert_abs_diff_eq!(kep.i, 1.991_330_662_078_86, epsilon = 1e-12);
        assert_abs_diff_eq!(kep.raan, 3.605_240_262_590_6, epsilon = 1e-12);
        assert_abs_diff_eq!(kep.aop, 5.210_869_417_522_28, epsilon = 1e-12);
        assert_abs_diff_eq!(kep.mean_anomaly, 3.141_590_309_932_65, epsilon = 1e-12);
    }

    #[test]
    fn geos3_like_orbit() {
        let kep = KeplerianElements::from_state(&Vector6::new(
            6_221_397.628_578_69,
            2_867_713.779_657_41,
            3_006_155.985_099_5,
            4_645.047_251_617_5,
            -2_752.215_915_881_82,
            -7_507.999_409_869_39,
        ));
        assert_abs_diff_eq!(kep.a, 18_943_922.660_696_63, epsilon = 1e-3);
        assert_abs_diff_eq!(kep.e, 0.605_361_104_986_651_7, epsilon = 1e-10);
        assert_abs_diff_eq!(kep.i, 2.026_562_955_350_179_6, epsilon = 1e-10);
        // Mean anomaly is consistent with the eccentric anomaly
        let ea = kep.ecc_anomaly().unwrap();
        assert_abs_diff_eq!(ea - kep.e * ea.sin(), kep.mean_anomaly, epsilon = 1e-10);
    }
}
