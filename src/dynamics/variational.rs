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
    Dynamics, DynamicsEopSnafu, DynamicsError, ForceModelConfig, Harmonics, HarmonicsMem,
    OrbitalDynamics,
};
use crate::cosmic::{EarthFrame, EopTable, SECONDS_PER_DAY};
use crate::linalg::{Const, Matrix3, Matrix6, OVector, Vector3, Vector6};
use snafu::ResultExt;
use std::fmt;
use std::sync::Arc;

/// Size of the combined state and state transition matrix vector.
pub type U42 = Const<42>;

/// A state and its state transition matrix, propagated together.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StateAndStm {
    pub state: Vector6<f64>,
    pub stm: Matrix6<f64>,
}

impl StateAndStm {
    /// Initializes the pair with an identity state transition matrix.
    pub fn new(state: Vector6<f64>) -> Self {
        Self {
            state,
            stm: Matrix6::identity(),
        }
    }

    /// Flattens into the integrated vector: the state, then the STM column by column.
    pub fn to_vector(&self) -> OVector<f64, U42> {
        let mut vec = OVector::<f64, U42>::zeros();
        vec.fixed_rows_mut::<6>(0).copy_from(&self.state);
        vec.fixed_rows_mut::<36>(6).copy_from_slice(self.stm.as_slice());
        vec
    }

    /// Rebuilds the pair from an integrated vector.
    pub fn from_vector(vec: &OVector<f64, U42>) -> Self {
        Self {
            state: vec.fixed_rows::<6>(0).into_owned(),
            stm: Matrix6::from_column_slice(&vec.as_slice()[6..]),
        }
    }
}

/// Variational equations of the orbital motion: the state derivative with the harmonic gravity
/// field only, and the derivative of the state transition matrix.
///
/// The Earth orientation parameters and UT1 are frozen at the reference epoch of the force model,
/// while precession and nutation follow the time argument.
#[derive(Clone)]
pub struct VariationalDynamics {
    pub cfg: ForceModelConfig,
    eop: Arc<EopTable>,
    harmonics: Arc<Harmonics>,
}

impl VariationalDynamics {
    pub fn new(
        cfg: ForceModelConfig,
        eop: Arc<EopTable>,
        gravity: Arc<HarmonicsMem>,
    ) -> Result<Self, DynamicsError> {
        let harmonics = Harmonics::from_stor(gravity, cfg.degree, cfg.order)?;
        Ok(Self {
            cfg,
            eop,
            harmonics,
        })
    }

    /// The variational equations of the provided orbital dynamics, sharing its tables and settings.
    pub fn from_orbital(orbital: &OrbitalDynamics) -> Self {
        Self {
            cfg: orbital.cfg,
            eop: orbital.eop.clone(),
            harmonics: orbital.harmonics.clone(),
        }
    }

    /// Returns a copy of these dynamics referenced to another epoch.
    pub fn with_epoch(&self, mjd_utc: f64, mjd_tt: f64) -> Self {
        let mut me = self.clone();
        me.cfg = self.cfg.with_epoch(mjd_utc, mjd_tt);
        me
    }

    /// Jacobian of the state derivative with respect to the state.
    pub fn jacobian(
        &self,
        delta_t: f64,
        radius: &Vector3<f64>,
    ) -> Result<Matrix6<f64>, DynamicsError> {
        let frame = self.frame_at(delta_t)?;
        let grad = self.harmonics.accel_gradient(radius, &frame.icrf_to_itrf());
        Ok(state_jacobian(&grad))
    }

    fn frame_at(&self, delta_t: f64) -> Result<EarthFrame, DynamicsError> {
        EarthFrame::with_frozen_orientation(
            &self.eop,
            self.cfg.mjd_utc,
            self.cfg.mjd_tt,
            self.cfg.mjd_tt + delta_t / SECONDS_PER_DAY,
        )
        .context(DynamicsEopSnafu)
    }
}

/// Jacobian of `[v, a(r)]` given the acceleration gradient: `[[0, I], [G, 0]]`.
fn state_jacobian(grad: &Matrix3<f64>) -> Matrix6<f64> {
    let mut dfdy = Matrix6::zeros();
    dfdy.fixed_view_mut::<3, 3>(0, 3)
        .copy_from(&Matrix3::identity());
    dfdy.fixed_view_mut::<3, 3>(3, 0).copy_from(grad);
    dfdy
}

impl fmt::Display for VariationalDynamics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Variational equations of the {}", self.harmonics)
    }
}

impl Dynamics for VariationalDynamics {
    type StateSize = U42;

    fn eom(
        &self,
        delta_t: f64,
        state: &OVector<f64, U42>,
    ) -> Result<OVector<f64, U42>, DynamicsError> {
        let current = StateAndStm::from_vector(state);
        let radius = current.state.fixed_rows::<3>(0).into_owned();
        let velocity = current.state.fixed_rows::<3>(3).into_owned();

        let frame = self.frame_at(delta_t)?;
        let dcm = frame.icrf_to_itrf();
        let accel = self.harmonics.accel(&radius, &dcm);
        let grad = self.harmonics.accel_gradient(&radius, &dcm);

        let dfdy = state_jacobian(&grad);

        let mut d_state = Vector6::zeros();
        d_state.fixed_rows_mut::<3>(0).copy_from(&velocity);
        d_state.fixed_rows_mut::<3>(3).copy_from(&accel);

        Ok(StateAndStm {
            state: d_state,
            stm: dfdy * current.stm,
        }
        .to_vector())
    }
}
