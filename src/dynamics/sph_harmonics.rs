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

use super::{central_difference, AccelModel, DynamicsError, HarmonicsMem};
use crate::cosmic::EarthFrame;
use crate::linalg::{DMatrix, Matrix3, Vector3};
use snafu::ensure;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

/// Fully normalized associated Legendre functions and their derivatives with respect to the
/// latitude `phi` (radians), up to degree `n` and order `m`.
///
/// Entry `(i, j)` of both matrices is the degree `i` and order `j` function. Orders greater than
/// the degree are zero.
pub fn legendre(n: usize, m: usize, phi: f64) -> (DMatrix<f64>, DMatrix<f64>) {
    let m = m.min(n);
    let (sin_phi, cos_phi) = phi.sin_cos();
    let mut pnm = DMatrix::zeros(n + 1, n + 1);
    let mut dpnm = DMatrix::zeros(n + 1, n + 1);

    pnm[(0, 0)] = 1.0;
    if n > 0 {
        pnm[(1, 1)] = 3.0_f64.sqrt() * cos_phi;
        dpnm[(1, 1)] = -(3.0_f64.sqrt()) * sin_phi;
    }

    // Sectorials
    for i in 2..=n {
        let fi = i as f64;
        let k = ((2.0 * fi + 1.0) / (2.0 * fi)).sqrt();
        pnm[(i, i)] = k * cos_phi * pnm[(i - 1, i - 1)];
        dpnm[(i, i)] = k * (cos_phi * dpnm[(i - 1, i - 1)] - sin_phi * pnm[(i - 1, i - 1)]);
    }

    // First sub-diagonal
    for i in 1..=n {
        let k = (2.0 * i as f64 + 1.0).sqrt();
        pnm[(i, i - 1)] = k * sin_phi * pnm[(i - 1, i - 1)];
        dpnm[(i, i - 1)] = k * (cos_phi * pnm[(i - 1, i - 1)] + sin_phi * dpnm[(i - 1, i - 1)]);
    }

    // Remaining terms, by increasing degree for each order
    for j in 0..=m {
        for i in (j + 2)..=n {
            let (fi, fj) = (i as f64, j as f64);
            let k = ((2.0 * fi + 1.0) / ((fi - fj) * (fi + fj))).sqrt();
            let k1 = (2.0 * fi - 1.0).sqrt();
            let k2 = ((fi + fj - 1.0) * (fi - fj - 1.0) / (2.0 * fi - 3.0)).sqrt();
            pnm[(i, j)] = k * (k1 * sin_phi * pnm[(i - 1, j)] - k2 * pnm[(i - 2, j)]);
            dpnm[(i, j)] = k
                * (k1 * sin_phi * dpnm[(i - 1, j)] + k1 * cos_phi * pnm[(i - 1, j)]
                    - k2 * dpnm[(i - 2, j)]);
        }
    }

    (
        pnm.columns(0, m + 1).into_owned(),
        dpnm.columns(0, m + 1).into_owned(),
    )
}

/// Spherical harmonic gravity field of the Earth, truncated to a given degree and order.
#[derive(Clone)]
pub struct Harmonics {
    stor: Arc<HarmonicsMem>,
    degree: usize,
    order: usize,
}

impl Harmonics {
    /// Create a new Harmonics dynamical model from the provided gravity potential storage instance.
    pub fn from_stor(
        stor: Arc<HarmonicsMem>,
        degree: usize,
        order: usize,
    ) -> Result<Arc<Self>, DynamicsError> {
        ensure!(
            order <= degree,
            super::InvalidTruncationSnafu { degree, order }
        );
        ensure!(
            degree <= stor.max_degree_n() && order <= stor.max_order_m(),
            super::GravityFieldTooSmallSnafu {
                degree,
                order,
                max_degree: stor.max_degree_n()
            }
        );
        Ok(Arc::new(Self {
            stor,
            degree,
            order,
        }))
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Inertial acceleration at the inertial position `radius`, where `dcm` rotates inertial
    /// vectors into the Earth fixed frame.
    pub fn accel(&self, radius: &Vector3<f64>, dcm: &Matrix3<f64>) -> Vector3<f64> {
        let r_ref = self.stor.radius_m();
        let gm = self.stor.gm();

        // Body-fixed position
        let r_bf = dcm * radius;
        let d = r_bf.norm();
        let lat_gc = (r_bf.z / d).asin();
        let lon = r_bf.y.atan2(r_bf.x);

        let (pnm, dpnm) = legendre(self.degree, self.order, lat_gc);

        let mut du_dr = 0.0;
        let mut du_dlat = 0.0;
        let mut du_dlon = 0.0;
        for n in 0..=self.degree {
            let rr = (r_ref / d).powi(n as i32);
            let b1 = (-gm / (d * d)) * rr * (n + 1) as f64;
            let b2 = (gm / d) * rr;

            let mut q1 = 0.0;
            let mut q2 = 0.0;
            let mut q3 = 0.0;
            for m in 0..=n.min(self.order) {
                let (c_nm, s_nm) = self.stor.cs_nm(n, m);
                let (sin_ml, cos_ml) = (m as f64 * lon).sin_cos();
                let d_nm = c_nm * cos_ml + s_nm * sin_ml;
                q1 += pnm[(n, m)] * d_nm;
                q2 += dpnm[(n, m)] * d_nm;
                q3 += m as f64 * pnm[(n, m)] * (s_nm * cos_ml - c_nm * sin_ml);
            }
            du_dr += q1 * b1;
            du_dlat += q2 * b2;
            du_dlon += q3 * b2;
        }

        // Body-fixed acceleration
        let r2xy = r_bf.x * r_bf.x + r_bf.y * r_bf.y;
        let radial = du_dr / d - r_bf.z / (d * d * r2xy.sqrt()) * du_dlat;
        let a_bf = Vector3::new(
            radial * r_bf.x - du_dlon / r2xy * r_bf.y,
            radial * r_bf.y + du_dlon / r2xy * r_bf.x,
            du_dr / d * r_bf.z + r2xy.sqrt() / (d * d) * du_dlat,
        );

        dcm.transpose() * a_bf
    }

    /// Gradient of [`Self::accel`] with respect to the inertial position.
    pub fn accel_gradient(&self, radius: &Vector3<f64>, dcm: &Matrix3<f64>) -> Matrix3<f64> {
        central_difference::<_, Infallible>(radius, |r| Ok(self.accel(r, dcm)))
            .unwrap_or_else(|never| match never {})
    }
}

impl fmt::Display for Harmonics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{} gravity field", self.degree, self.order)
    }
}

impl AccelModel for Harmonics {
    fn eom(&self, radius: &Vector3<f64>, frame: &EarthFrame) -> Result<Vector3<f64>, DynamicsError> {
        Ok(self.accel(radius, &frame.icrf_to_itrf()))
    }

    fn gradient(
        &self,
        radius: &Vector3<f64>,
        frame: &EarthFrame,
    ) -> Result<Matrix3<f64>, DynamicsError> {
        Ok(self.accel_gradient(radius, &frame.icrf_to_itrf()))
    }
}
