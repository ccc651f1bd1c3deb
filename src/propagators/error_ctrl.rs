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

use crate::linalg::allocator::Allocator;
use crate::linalg::{DefaultAllocator, DimName, OVector};
use serde_derive::{Deserialize, Serialize};

/// How the per-component error estimate of an embedded Runge Kutta step is reduced to one number.
///
/// Each component `e_i` is first scaled by `abs_tol + rel_tol * max(|y_i|, |y_new_i|)`, so that a
/// step is within the tolerance when the reduced error is at most one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCtrl {
    /// Largest scaled component: every component must be within its own tolerance.
    #[default]
    MaxScaled,
    /// Root mean square of the scaled components.
    RmsScaled,
}

impl ErrorCtrl {
    /// Computes the scaled error of the step from `cur_state` to `candidate`.
    pub fn estimate<N: DimName>(
        &self,
        error_est: &OVector<f64, N>,
        candidate: &OVector<f64, N>,
        cur_state: &OVector<f64, N>,
        rel_tol: f64,
        abs_tol: f64,
    ) -> f64
    where
        DefaultAllocator: Allocator<N>,
    {
        let scaled = error_est
            .iter()
            .zip(candidate.iter().zip(cur_state.iter()))
            .map(|(err, (new, old))| err.abs() / (abs_tol + rel_tol * new.abs().max(old.abs())));

        match self {
            Self::MaxScaled => scaled.fold(0.0, f64::max),
            Self::RmsScaled => {
                let sum_sq: f64 = scaled.map(|e| e * e).sum();
                (sum_sq / N::dim() as f64).sqrt()
            }
        }
    }
}
