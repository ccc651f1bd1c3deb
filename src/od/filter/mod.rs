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

use super::{ODError, SingularKalmanGainSnafu};
use crate::linalg::{Matrix6, Vector6};
use snafu::ensure;

/// The result of a scalar measurement update.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KalmanUpdate {
    /// Kalman gain
    pub gain: Vector6<f64>,
    /// Updated state
    pub state: Vector6<f64>,
    /// Updated covariance
    pub covar: Matrix6<f64>,
}

/// Time update of the covariance: Φ⋅P⋅Φ^T + Q.
pub fn time_update(covar: &Matrix6<f64>, stm: &Matrix6<f64>, process_noise: &Matrix6<f64>) -> Matrix6<f64> {
    stm * covar * stm.transpose() + process_noise
}

/// Scalar measurement update of the state `state` and covariance `covar` with the observed value
/// `real_obs`, the computed value `computed_obs`, the measurement standard deviation `sigma` and
/// the partials `h_tilde` of the measurement with respect to the state.
///
/// The covariance update is the conventional (I - K⋅H)⋅P form, and it is not symmetrized.
pub fn measurement_update(
    state: &Vector6<f64>,
    real_obs: f64,
    computed_obs: f64,
    sigma: f64,
    h_tilde: &Vector6<f64>,
    covar: &Matrix6<f64>,
) -> Result<KalmanUpdate, ODError> {
    let p_ht = covar * h_tilde;
    // Innovation variance
    let variance = sigma * sigma + h_tilde.dot(&p_ht);
    ensure!(
        variance.is_finite() && variance != 0.0,
        SingularKalmanGainSnafu { variance }
    );

    let gain = p_ht / variance;
    let prefit = real_obs - computed_obs;

    Ok(KalmanUpdate {
        gain,
        state: state + gain * prefit,
        covar: (Matrix6::identity() - gain * h_tilde.transpose()) * covar,
    })
}
