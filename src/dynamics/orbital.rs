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
    AccelModel, Dynamics, DynamicsEopSnafu, DynamicsError, ForceModelConfig, Harmonics,
    HarmonicsMem, PointMasses,
};
use crate::cosmic::{De430, EarthFrame, EopTable, SECONDS_PER_DAY};
use crate::linalg::{Const, OVector, Vector3, Vector6};
use snafu::ResultExt;
use std::fmt;
use std::sync::Arc;

/// Equations of motion of an Earth orbiter: harmonic gravity field, and optionally the Sun, the
/// Moon and the planets as point masses.
///
/// The time argument is in seconds past `cfg.mjd_utc`, and the Earth orientation, the time scales
/// and the ephemerides are all evaluated at that exact epoch.
#[derive(Clone)]
pub struct OrbitalDynamics {
    pub cfg: ForceModelConfig,
    pub(crate) eop: Arc<EopTable>,
    pub(crate) harmonics: Arc<Harmonics>,
    point_masses: Arc<PointMasses>,
}

impl OrbitalDynamics {
    /// Initializes the dynamics from the loaded tables and the force model settings.
    pub fn new(
        cfg: ForceModelConfig,
        eop: Arc<EopTable>,
        gravity: Arc<HarmonicsMem>,
        ephem: Arc<De430>,
    ) -> Result<Self, DynamicsError> {
        let harmonics = Harmonics::from_stor(gravity, cfg.degree, cfg.order)?;
        let point_masses = PointMasses::from_toggles(cfg.sun, cfg.moon, cfg.planets, ephem);
        Ok(Self {
            cfg,
            eop,
            harmonics,
            point_masses,
        })
    }

    /// Returns a copy of these dynamics referenced to another epoch.
    pub fn with_epoch(&self, mjd_utc: f64, mjd_tt: f64) -> Self {
        let mut me = self.clone();
        me.cfg = self.cfg.with_epoch(mjd_utc, mjd_tt);
        me
    }

    /// The Earth orientation at `delta_t` seconds past the reference epoch.
    pub fn frame_at(&self, delta_t: f64) -> Result<EarthFrame, DynamicsError> {
        EarthFrame::at_utc(&self.eop, self.cfg.mjd_utc + delta_t / SECONDS_PER_DAY)
            .context(DynamicsEopSnafu)
    }

    /// Total acceleration at the inertial position `radius`, `delta_t` seconds past the reference epoch.
    pub fn accel(&self, delta_t: f64, radius: &Vector3<f64>) -> Result<Vector3<f64>, DynamicsError> {
        let frame = self.frame_at(delta_t)?;
        let gravity = self.harmonics.eom(radius, &frame)?;
        let third_bodies = self.point_masses.eom(radius, &frame)?;
        Ok(gravity + third_bodies)
    }
}

impl fmt::Display for OrbitalDynamics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Orbital dynamics with {}", self.cfg)
    }
}

impl Dynamics for OrbitalDynamics {
    type StateSize = Const<6>;

    fn eom(
        &self,
        delta_t: f64,
        state: &OVector<f64, Const<6>>,
    ) -> Result<OVector<f64, Const<6>>, DynamicsError> {
        let radius = state.fixed_rows::<3>(0).into_owned();
        let velocity = state.fixed_rows::<3>(3).into_owned();
        let accel = self.accel(delta_t, &radius)?;

        let mut d_x = Vector6::zeros();
        d_x.fixed_rows_mut::<3>(0).copy_from(&velocity);
        d_x.fixed_rows_mut::<3>(3).copy_from(&accel);
        Ok(d_x)
    }
}
