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

use crate::linalg::{Matrix6, Vector6};
use crate::od::measurement::MeasurementType;
use crate::time::Epoch;
use std::fmt;

/// The filter state right after one scalar measurement update.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Estimate {
    pub epoch: Epoch,
    /// Modified Julian Date (UTC) of the measurement
    pub mjd_utc: f64,
    pub kind: MeasurementType,
    /// Observed value (rad or m)
    pub observed: f64,
    /// Value computed from the state prior to this update
    pub computed: f64,
    /// Standard deviation of this measurement
    pub sigma: f64,
    /// Updated state
    pub state: Vector6<f64>,
    /// Updated covariance
    pub covar: Matrix6<f64>,
}

impl Estimate {
    /// Prefit residual: observed minus computed.
    pub fn residual(&self) -> f64 {
        self.observed - self.computed
    }

    /// Prefit residual divided by the measurement standard deviation.
    pub fn residual_ratio(&self) -> f64 {
        self.residual() / self.sigma
    }

    /// Standard deviations of the state components, from the covariance diagonal.
    pub fn sigmas(&self) -> Vector6<f64> {
        self.covar.diagonal().map(f64::sqrt)
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {}: residual {:.6e} {} (ratio {:.3})",
            self.epoch,
            self.kind,
            self.residual(),
            self.kind.unit(),
            self.residual_ratio()
        )
    }
}

/// The outcome of an orbit determination run.
#[derive(Clone, Debug, PartialEq)]
pub struct ODSolution {
    /// One estimate per scalar measurement update, in processing order
    pub estimates: Vec<Estimate>,
    /// Epoch of the final state, i.e. the first observation
    pub epoch: Epoch,
    /// Estimated state propagated back to `epoch`
    pub final_state: Vector6<f64>,
    /// Covariance after the last measurement update (not propagated)
    pub final_covar: Matrix6<f64>,
}

impl ODSolution {
    /// Difference between the estimated final state and a reference state.
    pub fn error_wrt(&self, truth: &Vector6<f64>) -> Vector6<f64> {
        self.final_state - truth
    }

    /// Root mean square of the prefit residuals of the provided measurement type.
    pub fn rms_prefit_residuals(&self, kind: MeasurementType) -> f64 {
        let (sum, count) = self
            .estimates
            .iter()
            .filter(|est| est.kind == kind)
            .fold((0.0, 0), |(sum, count), est| {
                (sum + est.residual().powi(2), count + 1)
            });
        if count == 0 {
            0.0
        } else {
            (sum / f64::from(count)).sqrt()
        }
    }

    /// Root mean square of the ratios of all of the prefit residuals.
    pub fn rms_residual_ratios(&self) -> f64 {
        if self.estimates.is_empty() {
            return 0.0;
        }
        let sum: f64 = self
            .estimates
            .iter()
            .map(|est| est.residual_ratio().powi(2))
            .sum();
        (sum / self.estimates.len() as f64).sqrt()
    }

    /// The estimation error report against the reference state.
    pub fn report(&self, truth: &Vector6<f64>) -> String {
        let err = self.error_wrt(truth);
        format!(
            "\nError of Position Estimation\n\
             dX\t{:10.1} [m]\n\
             dY\t{:10.1} [m]\n\
             dZ\t{:10.1} [m]\n\
             \nError of Velocity Estimation\n\
             dVx\t{:10.1} [m/s]\n\
             dVy\t{:10.1} [m/s]\n\
             dVz\t{:10.1} [m/s]\n",
            err[0], err[1], err[2], err[3], err[4], err[5]
        )
    }
}

impl fmt::Display for ODSolution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{} measurement updates, estimated state at {}",
            self.estimates.len(),
            self.epoch
        )?;
        writeln!(
            f,
            "r = [{:.3}, {:.3}, {:.3}] m",
            self.final_state[0], self.final_state[1], self.final_state[2]
        )?;
        write!(
            f,
            "v = [{:.6}, {:.6}, {:.6}] m/s",
            self.final_state[3], self.final_state[4], self.final_state[5]
        )
    }
}
