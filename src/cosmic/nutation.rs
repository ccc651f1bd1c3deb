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

use super::{centuries_since_j2000, mean_obliquity, ARCSEC_PER_RAD};
use crate::linalg::Matrix3;
use crate::utils::{modulo, r1, r3};

/// Arcseconds in one revolution
const REV: f64 = 1_296_000.0;

/// One term of the IAU 1980 nutation series.
///
/// Amplitudes are in units of 0.1 milliarcsecond, and the rates are per Julian century.
struct NutationTerm {
    /// Multipliers of l, l', F, D and Ω
    mult: [i8; 5],
    dpsi: f64,
    dpsi_t: f64,
    deps: f64,
    deps_t: f64,
}

impl NutationTerm {
    const fn new(mult: [i8; 5], dpsi: f64, dpsi_t: f64, deps: f64, deps_t: f64) -> Self {
        Self {
            mult,
            dpsi,
            dpsi_t,
            deps,
            deps_t,
        }
    }
}

/// The 106 terms of the IAU 1980 theory of nutation (Seidelmann, 1982).
#[rustfmt::skip]
const IAU1980_TERMS: [NutationTerm; 106] = [
    NutationTerm::new([0, 0, 0, 0, 1], -171996.0, -174.2, 92025.0, 8.9),
    NutationTerm::new([0, 0, 0, 0, 2], 2062.0, 0.2, -895.0, 0.5),
    NutationTerm::new([-2, 0, 2, 0, 1], 46.0, 0.0, -24.0, 0.0),
    NutationTerm::new([2, 0, -2, 0, 0], 11.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-2, 0, 2, 0, 2], -3.0, 0.0, 1.0, 0.0),
    NutationTerm::new([1, -1, 0, -1, 0], -3.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, -2, 2, -2, 1], -2.0, 0.0, 1.0, 0.0),
    NutationTerm::new([2, 0, -2, 0, 1], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, 2, -2, 2], -13187.0, -1.6, 5736.0, -3.1),
    NutationTerm::new([0, 1, 0, 0, 0], 1426.0, -3.4, 54.0, -0.1),
    NutationTerm::new([0, 1, 2, -2, 2], -517.0, 1.2, 224.0, -0.6),
    NutationTerm::new([0, -1, 2, -2, 2], 217.0, -0.5, -95.0, 0.3),
    NutationTerm::new([0, 0, 2, -2, 1], 129.0, 0.1, -70.0, 0.0),
    NutationTerm::new([2, 0, 0, -2, 0], 48.0, 0.0, 1.0, 0.0),
    NutationTerm::new([0, 0, 2, -2, 0], -22.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 2, 0, 0, 0], 17.0, -0.1, 0.0, 0.0),
    NutationTerm::new([0, 1, 0, 0, 1], -15.0, 0.0, 9.0, 0.0),
    NutationTerm::new([0, 2, 2, -2, 2], -16.0, 0.1, 7.0, 0.0),
    NutationTerm::new([0, -1, 0, 0, 1], -12.0, 0.0, 6.0, 0.0),
    NutationTerm::new([-2, 0, 0, 2, 1], -6.0, 0.0, 3.0, 0.0),
    NutationTerm::new([0, -1, 2, -2, 1], -5.0, 0.0, 3.0, 0.0),
    NutationTerm::new([2, 0, 0, -2, 1], 4.0, 0.0, -2.0, 0.0),
    NutationTerm::new([0, 1, 2, -2, 1], 4.0, 0.0, -2.0, 0.0),
    NutationTerm::new([1, 0, 0, -1, 0], -4.0, 0.0, 0.0, 0.0),
    NutationTerm::new([2, 1, 0, -2, 0], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, -2, 2, 1], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 1, -2, 2, 0], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 1, 0, 0, 2], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-1, 0, 0, 1, 1], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 1, 2, -2, 0], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, 2, 0, 2], -2274.0, -0.2, 977.0, -0.5),
    NutationTerm::new([1, 0, 0, 0, 0], 712.0, 0.1, -7.0, 0.0),
    NutationTerm::new([0, 0, 2, 0, 1], -386.0, -0.4, 200.0, 0.0),
    NutationTerm::new([1, 0, 2, 0, 2], -301.0, 0.0, 129.0, -0.1),
    NutationTerm::new([1, 0, 0, -2, 0], -158.0, 0.0, -1.0, 0.0),
    NutationTerm::new([-1, 0, 2, 0, 2], 123.0, 0.0, -53.0, 0.0),
    NutationTerm::new([0, 0, 0, 2, 0], 63.0, 0.0, -2.0, 0.0),
    NutationTerm::new([1, 0, 0, 0, 1], 63.0, 0.1, -33.0, 0.0),
    NutationTerm::new([-1, 0, 0, 0, 1], -58.0, -0.1, 32.0, 0.0),
    NutationTerm::new([-1, 0, 2, 2, 2], -59.0, 0.0, 26.0, 0.0),
    NutationTerm::new([1, 0, 2, 0, 1], -51.0, 0.0, 27.0, 0.0),
    NutationTerm::new([0, 0, 2, 2, 2], -38.0, 0.0, 16.0, 0.0),
    NutationTerm::new([2, 0, 0, 0, 0], 29.0, 0.0, -1.0, 0.0),
    NutationTerm::new([1, 0, 2, -2, 2], 29.0, 0.0, -12.0, 0.0),
    NutationTerm::new([2, 0, 2, 0, 2], -31.0, 0.0, 13.0, 0.0),
    NutationTerm::new([0, 0, 2, 0, 0], 26.0, 0.0, -1.0, 0.0),
    NutationTerm::new([-1, 0, 2, 0, 1], 21.0, 0.0, -10.0, 0.0),
    NutationTerm::new([-1, 0, 0, 2, 1], 16.0, 0.0, -8.0, 0.0),
    NutationTerm::new([1, 0, 0, -2, 1], -13.0, 0.0, 7.0, 0.0),
    NutationTerm::new([-1, 0, 2, 2, 1], -10.0, 0.0, 5.0, 0.0),
    NutationTerm::new([1, 1, 0, -2, 0], -7.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 1, 2, 0, 2], 7.0, 0.0, -3.0, 0.0),
    NutationTerm::new([0, -1, 2, 0, 2], -7.0, 0.0, 3.0, 0.0),
    NutationTerm::new([1, 0, 2, 2, 2], -8.0, 0.0, 3.0, 0.0),
    NutationTerm::new([1, 0, 0, 2, 0], 6.0, 0.0, 0.0, 0.0),
    NutationTerm::new([2, 0, 2, -2, 2], 6.0, 0.0, -3.0, 0.0),
    NutationTerm::new([0, 0, 0, 2, 1], -6.0, 0.0, 3.0, 0.0),
    NutationTerm::new([0, 0, 2, 2, 1], -7.0, 0.0, 3.0, 0.0),
    NutationTerm::new([1, 0, 2, -2, 1], 6.0, 0.0, -3.0, 0.0),
    NutationTerm::new([0, 0, 0, -2, 1], -5.0, 0.0, 3.0, 0.0),
    NutationTerm::new([1, -1, 0, 0, 0], 5.0, 0.0, 0.0, 0.0),
    NutationTerm::new([2, 0, 2, 0, 1], -5.0, 0.0, 3.0, 0.0),
    NutationTerm::new([0, 1, 0, -2, 0], -4.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 0, -2, 0, 0], 4.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, 0, 1, 0], -4.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 1, 0, 0, 0], -3.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 0, 2, 0, 0], 3.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, -1, 2, 0, 2], -3.0, 0.0, 1.0, 0.0),
    NutationTerm::new([-1, -1, 2, 2, 2], -3.0, 0.0, 1.0, 0.0),
    NutationTerm::new([-2, 0, 0, 0, 1], -2.0, 0.0, 1.0, 0.0),
    NutationTerm::new([3, 0, 2, 0, 2], -3.0, 0.0, 1.0, 0.0),
    NutationTerm::new([0, -1, 2, 2, 2], -3.0, 0.0, 1.0, 0.0),
    NutationTerm::new([1, 1, 2, 0, 2], 2.0, 0.0, -1.0, 0.0),
    NutationTerm::new([-1, 0, 2, -2, 1], -2.0, 0.0, 1.0, 0.0),
    NutationTerm::new([2, 0, 0, 0, 1], 2.0, 0.0, -1.0, 0.0),
    NutationTerm::new([1, 0, 0, 0, 2], -2.0, 0.0, 1.0, 0.0),
    NutationTerm::new([3, 0, 0, 0, 0], 2.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, 2, 1, 2], 2.0, 0.0, -1.0, 0.0),
    NutationTerm::new([-1, 0, 0, 0, 2], 1.0, 0.0, -1.0, 0.0),
    NutationTerm::new([1, 0, 0, -4, 0], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-2, 0, 2, 2, 2], 1.0, 0.0, -1.0, 0.0),
    NutationTerm::new([-1, 0, 2, 4, 2], -2.0, 0.0, 1.0, 0.0),
    NutationTerm::new([2, 0, 0, -4, 0], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 1, 2, -2, 2], 1.0, 0.0, -1.0, 0.0),
    NutationTerm::new([1, 0, 2, 2, 1], -1.0, 0.0, 1.0, 0.0),
    NutationTerm::new([-2, 0, 2, 4, 2], -1.0, 0.0, 1.0, 0.0),
    NutationTerm::new([-1, 0, 4, 0, 2], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, -1, 0, -2, 0], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([2, 0, 2, -2, 1], 1.0, 0.0, -1.0, 0.0),
    NutationTerm::new([2, 0, 2, 2, 2], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 0, 0, 2, 1], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, 4, -2, 2], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([3, 0, 2, -2, 2], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 0, 2, -2, 0], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 1, 2, 0, 1], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-1, -1, 0, 2, 1], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, -2, 0, 1], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, 2, -1, 2], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 1, 0, 2, 0], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 0, -2, -2, 0], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, -1, 2, 0, 1], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 1, 0, -2, 1], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 0, -2, 2, 0], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([2, 0, 0, 2, 0], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, 2, 4, 2], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 1, 0, 1, 0], 1.0, 0.0, 0.0, 0.0),
];

/// Fundamental Delaunay arguments (l, l', F, D, Ω) in arcseconds, reduced to one revolution.
fn delaunay_arguments(t: f64) -> [f64; 5] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        modulo(485_866.733 + (1325.0 * REV + 715_922.633) * t + 31.310 * t2 + 0.064 * t3, REV),
        modulo(1_287_099.804 + (99.0 * REV + 1_292_581.224) * t - 0.577 * t2 - 0.012 * t3, REV),
        modulo(335_778.877 + (1342.0 * REV + 295_263.137) * t - 13.257 * t2 + 0.011 * t3, REV),
        modulo(1_072_261.307 + (1236.0 * REV + 1_105_601.328) * t - 6.891 * t2 + 0.019 * t3, REV),
        modulo(450_160.280 - (5.0 * REV + 482_890.539) * t + 7.455 * t2 + 0.008 * t3, REV),
    ]
}

/// Nutation in longitude and in obliquity, in radians, from the IAU 1980 theory.
///
/// The input is the Terrestrial Time as a Modified Julian Date.
pub fn nut_angles(mjd_tt: f64) -> (f64, f64) {
    let t = centuries_since_j2000(mjd_tt);
    let args = delaunay_arguments(t);

    let (mut dpsi, mut deps) = (0.0, 0.0);
    for term in IAU1980_TERMS.iter() {
        let arg = term
            .mult
            .iter()
            .zip(args.iter())
            .map(|(mult, arg)| f64::from(*mult) * arg)
            .sum::<f64>()
            / ARCSEC_PER_RAD;

        dpsi += (term.dpsi + term.dpsi_t * t) * arg.sin();
        deps += (term.deps + term.deps_t * t) * arg.cos();
    }

    (1e-4 * dpsi / ARCSEC_PER_RAD, 1e-4 * deps / ARCSEC_PER_RAD)
}

/// Transformation from the mean to the true equator and equinox of date.
pub fn nut_matrix(mjd_tt: f64) -> Matrix3<f64> {
    let eps = mean_obliquity(mjd_tt);
    let (dpsi, deps) = nut_angles(mjd_tt);

    r1(-eps - deps) * r3(-dpsi) * r1(eps)
}

#[cfg(test)]
mod ut_nutation {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn nutation_angles() {
        let (dpsi, deps) = nut_angles(49_746.109_722_222_2);
        assert_abs_diff_eq!(dpsi, 6.230_637_362_167_99e-5, epsilon = 1e-15);
        assert_abs_diff_eq!(deps, -3.511_107_088_943_89e-5, epsilon = 1e-15);
    }

    #[test]
    fn nutation_matrix() {
        let expected = Matrix3::new(
            0.999_999_998_058_957_9,
            -5.716_470_314_445_151_5e-5,
            -2.478_469_090_522_575_3e-5,
            5.716_557_332_625_472_3e-5,
            0.999_999_997_749_679_85,
            3.511_036_246_666_723e-5,
            2.478_268_377_600_455_8e-5,
            -3.511_177_922_960_697e-5,
            0.999_999_999_076_490_73,
        );
        let dcm = nut_matrix(49_746.109_722_222_2);
        assert_abs_diff_eq!(dcm, expected, epsilon = 1e-12);
        assert_abs_diff_eq!(dcm * dcm.transpose(), Matrix3::identity(), epsilon = 1e-12);
    }

    #[test]
    fn principal_term_dominates() {
        // The 18.6 year lunar node term is about 17 arcseconds in longitude.
        for mjd in [40_000.0, 49_746.1, 60_000.0] {
            let (dpsi, deps) = nut_angles(mjd);
            assert!(dpsi.abs() * ARCSEC_PER_RAD < 20.0);
            assert!(deps.abs() * ARCSEC_PER_RAD < 11.0);
        }
    }
}
