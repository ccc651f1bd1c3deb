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
    CashKarp45, Dormand45, IntegrationDetails, IntegratorKind, PropInstance, PropOpts,
    PropagationError, RK,
};
use crate::dynamics::Dynamics;
use crate::linalg::allocator::Allocator;
use crate::linalg::{DefaultAllocator, OVector};

/// A Propagator allows propagating a set of dynamics forward or backward in time.
/// It includes the options and the set of coefficients used for the monomorphic instance.
///
/// The time argument is in seconds past the reference epoch of the dynamics.
#[derive(Clone)]
pub struct Propagator<D: Dynamics>
where
    DefaultAllocator: Allocator<D::StateSize>,
{
    pub dynamics: D, // Stores the dynamics used. *Must* use this to get the latest values
    pub opts: PropOpts, // Stores the integration options (tolerances, min/max step, init step, etc.)
    pub(crate) order: u8, // Order of the integrator
    pub(crate) stages: usize, // Number of stages, i.e. how many times the derivatives will be called
    pub(crate) a_coeffs: &'static [f64],
    pub(crate) b_coeffs: &'static [f64],
}

impl<D: Dynamics> Propagator<D>
where
    DefaultAllocator: Allocator<D::StateSize>,
{
    /// Each propagator must be initialized with `new` which stores propagator information.
    pub fn new<T: RK>(dynamics: D, opts: PropOpts) -> Self {
        Self {
            dynamics,
            opts,
            stages: T::STAGES,
            order: T::ORDER,
            a_coeffs: T::A_COEFFS,
            b_coeffs: T::B_COEFFS,
        }
    }

    /// A Dormand Prince 5(4) propagator (the default) with custom propagator options.
    pub fn dp45(dynamics: D, opts: PropOpts) -> Self {
        Self::new::<Dormand45>(dynamics, opts)
    }

    /// A Cash Karp 5(4) propagator with custom propagator options.
    pub fn cash_karp(dynamics: D, opts: PropOpts) -> Self {
        Self::new::<CashKarp45>(dynamics, opts)
    }

    /// A propagator with the Runge Kutta method selected at runtime.
    pub fn from_kind(dynamics: D, kind: IntegratorKind, opts: PropOpts) -> Self {
        match kind {
            IntegratorKind::Dormand45 => Self::dp45(dynamics, opts),
            IntegratorKind::CashKarp45 => Self::cash_karp(dynamics, opts),
        }
    }

    /// Default propagator is a Dormand45 with the default PropOpts.
    pub fn default(dynamics: D) -> Self {
        Self::dp45(dynamics, PropOpts::default())
    }

    /// Starts a propagation of `state`, given at `t` seconds past the reference epoch of the dynamics.
    pub fn with(&self, state: OVector<f64, D::StateSize>, t: f64) -> PropInstance<'_, D> {
        // Pre-allocate the k used in the propagator
        let mut k = Vec::with_capacity(self.stages + 1);
        for _ in 0..self.stages {
            k.push(OVector::<f64, D::StateSize>::zeros());
        }
        PropInstance {
            state,
            t,
            prop: self,
            details: IntegrationDetails {
                step: self.opts.init_step,
                error: 0.0,
                attempts: 1,
            },
            step_size: self.opts.init_step.to_seconds(),
            fixed_step: self.opts.fixed_step,
            k,
        }
    }

    /// Integrates `state` from `t0` to `t1` (seconds past the reference epoch of the dynamics),
    /// backward if `t1` precedes `t0`.
    ///
    /// Every call starts from the initial step: nothing is carried over from a previous call.
    pub fn propagate(
        &self,
        state: OVector<f64, D::StateSize>,
        t0: f64,
        t1: f64,
    ) -> Result<OVector<f64, D::StateSize>, PropagationError> {
        self.with(state, t0).until(t1)
    }
}
