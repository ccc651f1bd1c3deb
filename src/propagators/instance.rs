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
    DynamicsSnafu, IntegrationDetails, MaxAttemptsReachedSnafu, PropagationError, Propagator,
    StepSizeTooSmallSnafu,
};
use crate::dynamics::Dynamics;
use crate::linalg::allocator::Allocator;
use crate::linalg::{DefaultAllocator, OVector};
use crate::time::Unit;
use snafu::{ensure, ResultExt};

/// Bounds of the step size change factor from one attempt to the next.
const MIN_STEP_FACTOR: f64 = 0.2;
const MAX_STEP_FACTOR: f64 = 5.0;
const SAFETY_FACTOR: f64 = 0.9;

/// A propagation in progress of a given propagator: the current state and time, and the adapted step size.
pub struct PropInstance<'a, D: Dynamics>
where
    DefaultAllocator: Allocator<D::StateSize>,
{
    /// The state of this propagator instance
    pub state: OVector<f64, D::StateSize>,
    /// Seconds past the reference epoch of the dynamics
    pub t: f64,
    /// The propagator setup (kind, stages, etc.)
    pub prop: &'a Propagator<D>,
    /// Stores the details of the previous integration step
    pub details: IntegrationDetails,
    pub(crate) step_size: f64, // Stores the adapted step for the _next_ call, in seconds
    pub(crate) fixed_step: bool,
    // Allows us to do pre-allocation of the ki vectors
    pub(crate) k: Vec<OVector<f64, D::StateSize>>,
}

impl<D: Dynamics> PropInstance<'_, D>
where
    DefaultAllocator: Allocator<D::StateSize>,
{
    /// Propagates the provided Dynamics until `t_end` seconds past the reference epoch. Returns the end state.
    pub fn until(&mut self, t_end: f64) -> Result<OVector<f64, D::StateSize>, PropagationError> {
        let duration = t_end - self.t;
        if duration == 0.0 {
            return Ok(self.state.clone());
        }
        debug!(
            "Propagating for {} from t = {} s",
            duration * Unit::Second,
            self.t
        );

        let backprop = duration < 0.0;
        // The step size has the sign of the propagation direction
        self.step_size = if backprop {
            -self.step_size.abs()
        } else {
            self.step_size.abs()
        };

        loop {
            let remaining = t_end - self.t;
            // The last step is clamped to land on the stop time, and is still error controlled
            let last = remaining.abs() <= self.step_size.abs();
            let prev_step_size = self.step_size;
            if last {
                self.step_size = remaining;
            }

            let (step, state_vec) = self.derive()?;
            self.state = state_vec;
            trace!("t = {} s\t{}", self.t + step, self.details);

            if last && step == remaining {
                self.t = t_end;
                if self.fixed_step || self.step_size.abs() < prev_step_size.abs() {
                    // Keep the step size of the previous steps for subsequent calls
                    self.step_size = prev_step_size;
                }
                return Ok(self.state.clone());
            }
            self.t += step;
        }
    }

    /// This method integrates the equations of motion of the dynamics. Everything passed to this function is in **seconds**.
    ///
    /// This function returns the step sized used and the new state as y_{n+1} = y_n + \frac{dy_n}{dt}.
    /// To get the integration details, check `self.latest_details`.
    fn derive(&mut self) -> Result<(f64, OVector<f64, D::StateSize>), PropagationError> {
        let state_vec = self.state.clone();
        let prop = self.prop;
        let opts = &prop.opts;
        let min_step = opts.min_step.to_seconds();
        let max_step = opts.max_step.to_seconds();
        // Reset the number of attempts used (we don't reset the error because it's set before it's read)
        self.details.attempts = 1;
        // It's mutable because we may change it below
        let mut step_size = self.step_size;
        loop {
            self.k[0] = self
                .prop
                .dynamics
                .eom(self.t, &state_vec)
                .context(DynamicsSnafu)?;
            let mut a_idx: usize = 0;
            for i in 0..(self.prop.stages - 1) {
                // Let's compute the c_i by summing the relevant items from the list of coefficients.
                // \sum_{j=1}^{i-1} a_ij  ∀ i ∈ [2, s]
                let mut ci: f64 = 0.0;
                // The wi stores the a_{s1} * k_1 + a_{s2} * k_2 + ... + a_{s, s-1} * k_{s-1} +
                let mut wi = OVector::<f64, D::StateSize>::zeros();
                for kj in &self.k[0..i + 1] {
                    let a_ij = self.prop.a_coeffs[a_idx];
                    ci += a_ij;
                    wi += a_ij * kj;
                    a_idx += 1;
                }

                self.k[i + 1] = self
                    .prop
                    .dynamics
                    .eom(self.t + ci * step_size, &(&state_vec + step_size * wi))
                    .context(DynamicsSnafu)?;
            }
            // Compute the next state and the error
            let mut next_state = state_vec.clone();
            let mut error_est = OVector::<f64, D::StateSize>::zeros();
            for (i, ki) in self.k.iter().enumerate() {
                let b_i = self.prop.b_coeffs[i];
                if !self.fixed_step {
                    let b_i_star = self.prop.b_coeffs[i + self.prop.stages];
                    error_est += step_size * (b_i - b_i_star) * ki;
                }
                next_state += step_size * b_i * ki;
            }

            if self.fixed_step {
                // Using a fixed step, no adaptive step necessary
                self.details.step = step_size * Unit::Second;
                return Ok((step_size, next_state));
            }

            let error = opts.error_ctrl.estimate(
                &error_est,
                &next_state,
                &state_vec,
                opts.rel_tol,
                opts.abs_tol,
            );
            self.details.error = error;

            let factor = if error == 0.0 {
                MAX_STEP_FACTOR
            } else {
                (SAFETY_FACTOR * error.powf(-1.0 / f64::from(self.prop.order)))
                    .clamp(MIN_STEP_FACTOR, MAX_STEP_FACTOR)
            };

            if error <= 1.0 {
                self.details.step = step_size * Unit::Second;
                // Adapt the step for the next call, keeping the direction of propagation
                let proposed_step = (step_size.abs() * factor).min(max_step);
                self.step_size = proposed_step.copysign(step_size);
                return Ok((step_size, next_state));
            }

            // Error is too high: shrink the step unless already at the smallest step or out of attempts.
            ensure!(
                step_size.abs() > min_step,
                StepSizeTooSmallSnafu {
                    step_s: step_size,
                    t_s: self.t,
                    error
                }
            );
            ensure!(
                self.details.attempts < opts.attempts,
                MaxAttemptsReachedSnafu {
                    attempts: self.details.attempts,
                    t_s: self.t,
                    error
                }
            );
            self.details.attempts += 1;
            step_size = (step_size.abs() * factor).max(min_step).copysign(step_size);
        }
    }

    /// Copy the details of the latest integration step.
    pub fn latest_details(&self) -> IntegrationDetails {
        self.details
    }
}

#[cfg(test)]
mod ut_propagation {
    use super::*;
    use crate::dynamics::orbital::ut_orbital::two_body;
    use crate::dynamics::DynamicsError;
    use crate::linalg::{Const, Vector2, Vector6};
    use crate::propagators::{ErrorCtrl, PropOpts};
    use approx::assert_abs_diff_eq;
    use std::f64::consts::TAU;

    /// Harmonic oscillator of angular rate one: x'' = -x.
    #[derive(Clone)]
    struct Oscillator;

    impl Dynamics for Oscillator {
        type StateSize = Const<2>;

        fn eom(
            &self,
            _t: f64,
            state: &OVector<f64, Const<2>>,
        ) -> Result<OVector<f64, Const<2>>, DynamicsError> {
            Ok(Vector2::new(state[1], -state[0]))
        }
    }

    #[test]
    fn oscillator_forward_and_backward() {
        for prop in [
            Propagator::dp45(Oscillator, PropOpts::with_tolerances(1e-12, 1e-12)),
            Propagator::cash_karp(Oscillator, PropOpts::with_tolerances(1e-12, 1e-12)),
        ] {
            let x0 = Vector2::new(1.0, 0.0);
            let x1 = prop.propagate(x0, 0.0, 2.5).unwrap();
            assert_abs_diff_eq!(x1, Vector2::new(2.5_f64.cos(), -(2.5_f64.sin())), epsilon = 1e-9);

            // Backward
            let x_back = prop.propagate(x0, 0.0, -2.5).unwrap();
            assert_abs_diff_eq!(x_back, Vector2::new(2.5_f64.cos(), 2.5_f64.sin()), epsilon = 1e-9);

            // Round trip
            let x_rt = prop.propagate(x1, 2.5, 0.0).unwrap();
            assert_abs_diff_eq!(x_rt, x0, epsilon = 1e-9);

            // Nothing to do
            assert_eq!(prop.propagate(x0, 1.0, 1.0).unwrap(), x0);
        }
    }

    #[test]
    fn fixed_step_ends_on_time() {
        let prop = Propagator::dp45(Oscillator, PropOpts::with_tolerances(1e-12, 1e-12));
        let mut opts = PropOpts::with_fixed_step_s(0.01);
        opts.error_ctrl = ErrorCtrl::RmsScaled;
        let fixed = Propagator::dp45(Oscillator, opts);
        let mut instance = fixed.with(Vector2::new(0.0, 1.0), 0.0);
        let x = instance.until(TAU / 4.0 + 0.005).unwrap();
        assert_eq!(instance.t, TAU / 4.0 + 0.005);
        assert_abs_diff_eq!(x[0], (TAU / 4.0 + 0.005).sin(), epsilon = 1e-10);
        assert_abs_diff_eq!(
            x,
            prop.propagate(Vector2::new(0.0, 1.0), 0.0, TAU / 4.0 + 0.005)
                .unwrap(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn step_too_small() {
        let mut opts = PropOpts::with_tolerances(0.0, 1e-30);
        opts.min_step = 0.5 * Unit::Second;
        opts.init_step = 1.0 * Unit::Second;
        let prop = Propagator::dp45(Oscillator, opts);
        let err = prop.propagate(Vector2::new(1.0, 0.0), 0.0, 10.0).unwrap_err();
        assert!(matches!(err, PropagationError::StepSizeTooSmall { .. }));

        let mut opts = PropOpts::with_tolerances(0.0, 1e-30);
        opts.attempts = 2;
        let prop = Propagator::dp45(Oscillator, opts);
        let err = prop.propagate(Vector2::new(1.0, 0.0), 0.0, 1_000.0).unwrap_err();
        assert!(matches!(
            err,
            PropagationError::MaxAttemptsReached { attempts: 2, .. }
        ));
    }

    #[test]
    fn short_arc_within_tolerance() {
        let _ = pretty_env_logger::try_init();
        let state = Vector6::new(
            6_221_397.628_578_69,
            2_867_713.779_657_41,
            3_006_155.985_099_5,
            4_645.047_251_617_5,
            -2_752.215_915_881_82,
            -7_507.999_409_869_39,
        );
        let opts = PropOpts::with_tolerances(1e-13, 1e-6);
        let prop = Propagator::dp45(two_body(), opts);
        let fine = Propagator::dp45(two_body(), PropOpts::with_fixed_step_s(0.5));

        // Shorter than the initial step: the whole arc is the last step
        for delta_t in [30.0, -30.0, 45.5, 600.0] {
            let mut instance = prop.with(state, 0.0);
            let end = instance.until(delta_t).unwrap();
            assert_eq!(instance.t, delta_t);
            assert!(instance.latest_details().error <= 1.0);

            let reference = fine.propagate(state, 0.0, delta_t).unwrap();
            let r_tol = opts.abs_tol + opts.rel_tol * reference.fixed_rows::<3>(0).norm();
            let v_tol = opts.abs_tol + opts.rel_tol * reference.fixed_rows::<3>(3).norm();
            let err = end - reference;
            assert!(
                err.fixed_rows::<3>(0).norm() < r_tol,
                "dt = {delta_t} s: position error {:e} m",
                err.fixed_rows::<3>(0).norm()
            );
            assert!(err.fixed_rows::<3>(3).norm() < v_tol);
        }
    }

    #[test]
    fn two_body_period() {
        let _ = pretty_env_logger::try_init();
        let gm: f64 = 398_600.441_5e9;
        let radius: f64 = 7_000e3;
        let speed = (gm / radius).sqrt();
        let period = TAU * (radius.powi(3) / gm).sqrt();

        let state = Vector6::new(radius, 0.0, 0.0, 0.0, speed, 0.0);
        let prop = Propagator::default(two_body());
        let mut instance = prop.with(state, 0.0);
        let end = instance.until(period).unwrap();
        assert_abs_diff_eq!(end, state, epsilon = 1e-2);
        assert!(instance.latest_details().error <= 1.0);

        // Half a period backward puts the spacecraft on the other side
        let half = prop.propagate(state, 0.0, -period / 2.0).unwrap();
        assert_abs_diff_eq!(
            half,
            Vector6::new(-radius, 0.0, 0.0, 0.0, -speed, 0.0),
            epsilon = 1e-2
        );
    }
}
