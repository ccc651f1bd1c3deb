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

use std::fmt;

use crate::time::{Duration, Unit};

use super::ErrorCtrl;
use typed_builder::TypedBuilder;

/// PropOpts stores the integrator options, including the minimum and maximum step sizes, and the
/// relative and absolute tolerances.
///
/// Note that different step sizes and tolerances are only used for adaptive
/// methods. To use a fixed step integrator, initialize the options using `with_fixed_step`, and
/// use whichever adaptive step integrator is desired.  For example, initializing a Dormand45 with
/// fixed step options will only use its fifth order solution.
#[derive(Clone, Copy, Debug, PartialEq, TypedBuilder)]
#[builder(doc)]
pub struct PropOpts {
    #[builder(default_code = "60.0 * Unit::Second")]
    pub init_step: Duration,
    #[builder(default_code = "0.001 * Unit::Second")]
    pub min_step: Duration,
    #[builder(default_code = "2700.0 * Unit::Second")]
    pub max_step: Duration,
    #[builder(default = 1e-13)]
    pub rel_tol: f64,
    #[builder(default = 1e-6)]
    pub abs_tol: f64,
    #[builder(default = 50)]
    pub attempts: u8,
    #[builder(default = false)]
    pub fixed_step: bool,
    #[builder(default)]
    pub error_ctrl: ErrorCtrl,
}

impl PropOpts {
    /// `with_adaptive_step` initializes an `PropOpts` such that the integrator is used with an
    ///  adaptive step size. The number of attempts is currently fixed to 50 (as in GMAT).
    pub fn with_adaptive_step(
        min_step: Duration,
        max_step: Duration,
        rel_tol: f64,
        abs_tol: f64,
    ) -> Self {
        PropOpts {
            init_step: max_step,
            min_step,
            max_step,
            rel_tol,
            abs_tol,
            attempts: 50,
            fixed_step: false,
            error_ctrl: ErrorCtrl::default(),
        }
    }

    pub fn with_adaptive_step_s(min_step: f64, max_step: f64, rel_tol: f64, abs_tol: f64) -> Self {
        Self::with_adaptive_step(
            min_step * Unit::Second,
            max_step * Unit::Second,
            rel_tol,
            abs_tol,
        )
    }

    /// `with_fixed_step` initializes an `PropOpts` such that the integrator is used with a fixed
    ///  step size.
    pub fn with_fixed_step(step: Duration) -> Self {
        PropOpts {
            init_step: step,
            min_step: step,
            max_step: step,
            rel_tol: 0.0,
            abs_tol: 0.0,
            fixed_step: true,
            attempts: 0,
            error_ctrl: ErrorCtrl::default(),
        }
    }

    pub fn with_fixed_step_s(step: f64) -> Self {
        Self::with_fixed_step(step * Unit::Second)
    }

    /// Returns the default options with specific tolerances.
    pub fn with_tolerances(rel_tol: f64, abs_tol: f64) -> Self {
        Self {
            rel_tol,
            abs_tol,
            ..Default::default()
        }
    }

    /// Creates a propagator with the provided max step, and sets the initial step to that value as well.
    #[allow(clippy::field_reassign_with_default)]
    pub fn with_max_step(max_step: Duration) -> Self {
        let mut opts = Self::default();
        opts.set_max_step(max_step);
        opts
    }

    /// Set the maximum step size and sets the initial step to that value if currently greater
    pub fn set_max_step(&mut self, max_step: Duration) {
        if self.init_step > max_step {
            self.init_step = max_step;
        }
        self.max_step = max_step;
    }
}

impl fmt::Display for PropOpts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fixed_step {
            write!(f, "fixed step: {}", self.min_step)
        } else {
            write!(
                f,
                "min_step: {}, max_step: {}, rel. tol: {:e}, abs. tol: {:e}, attempts: {}",
                self.min_step, self.max_step, self.rel_tol, self.abs_tol, self.attempts,
            )
        }
    }
}

impl Default for PropOpts {
    /// Same step bounds as GMAT, with tight tolerances for orbit determination.
    fn default() -> PropOpts {
        PropOpts {
            init_step: 60.0 * Unit::Second,
            min_step: 0.001 * Unit::Second,
            max_step: 2700.0 * Unit::Second,
            rel_tol: 1e-13,
            abs_tol: 1e-6,
            attempts: 50,
            fixed_step: false,
            error_ctrl: ErrorCtrl::MaxScaled,
        }
    }
}

#[test]
fn test_options() {
    let opts = PropOpts::with_fixed_step_s(1e-1);
    assert_eq!(opts.min_step, 1e-1 * Unit::Second);
    assert_eq!(opts.max_step, 1e-1 * Unit::Second);
    assert!(opts.rel_tol.abs() < f64::EPSILON);
    assert!(opts.fixed_step);

    let opts = PropOpts::with_adaptive_step_s(1e-2, 10.0, 1e-12, 1e-3);
    assert_eq!(opts.min_step, 1e-2 * Unit::Second);
    assert_eq!(opts.max_step, 10.0 * Unit::Second);
    assert_eq!(opts.init_step, 10.0 * Unit::Second);
    assert!((opts.rel_tol - 1e-12).abs() < f64::EPSILON);
    assert!((opts.abs_tol - 1e-3).abs() < f64::EPSILON);
    assert!(!opts.fixed_step);

    let opts: PropOpts = Default::default();
    assert_eq!(opts.init_step, 60.0 * Unit::Second);
    assert_eq!(opts.min_step, 0.001 * Unit::Second);
    assert_eq!(opts.max_step, 2700.0 * Unit::Second);
    assert!((opts.rel_tol - 1e-13).abs() < f64::EPSILON);
    assert!((opts.abs_tol - 1e-6).abs() < f64::EPSILON);
    assert_eq!(opts.attempts, 50);
    assert!(!opts.fixed_step);
    // The builder has the same defaults
    assert_eq!(PropOpts::builder().build(), opts);

    let opts = PropOpts::with_max_step(1.0 * Unit::Second);
    assert_eq!(opts.init_step, 1.0 * Unit::Second);
    assert_eq!(opts.min_step, 0.001 * Unit::Second);
    assert_eq!(opts.max_step, 1.0 * Unit::Second);
    assert_eq!(opts.attempts, 50);
    assert!(!opts.fixed_step);

    let opts = PropOpts::builder()
        .rel_tol(1e-10)
        .error_ctrl(ErrorCtrl::RmsScaled)
        .build();
    assert_eq!(opts.error_ctrl, ErrorCtrl::RmsScaled);
    assert_eq!(PropOpts::with_tolerances(1e-10, 1e-6).rel_tol, opts.rel_tol);
}
