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

use super::{data_lines, parse_f64, read_table, InputOutputError, MalformedTableSnafu};
use crate::linalg::DMatrix;
use snafu::ensure;
use std::path::Path;

/// Reference radius of the GGM03S gravity field, in meters
pub const GGM03S_RADIUS_M: f64 = 6378.1363e3;
/// Gravitational parameter of the GGM03S gravity field, in m^3/s^2
pub const GGM03S_GM: f64 = 398600.4415e9;

/// `HarmonicsMem` stores the fully normalized spherical harmonic coefficients of a gravity field in memory.
///
/// Entry `(n, m)` of both matrices is the coefficient of degree `n` and order `m`; entries with `m > n` are zero.
#[derive(Clone, Debug, PartialEq)]
pub struct HarmonicsMem {
    degree: usize,
    order: usize,
    radius_m: f64,
    gm: f64,
    c_nm: DMatrix<f64>,
    s_nm: DMatrix<f64>,
}

impl HarmonicsMem {
    /// A field reduced to its central term: the acceleration is that of a point mass.
    pub fn point_mass(radius_m: f64, gm: f64) -> Self {
        Self {
            degree: 0,
            order: 0,
            radius_m,
            gm,
            c_nm: DMatrix::from_element(1, 1, 1.0),
            s_nm: DMatrix::zeros(1, 1),
        }
    }

    /// Builds the field from square coefficient matrices of the same size.
    pub fn from_coefficients(
        radius_m: f64,
        gm: f64,
        c_nm: DMatrix<f64>,
        s_nm: DMatrix<f64>,
    ) -> Result<Self, InputOutputError> {
        ensure!(
            c_nm.is_square() && c_nm.shape() == s_nm.shape() && c_nm.nrows() > 0,
            MalformedTableSnafu {
                path: "<memory>",
                line: 0_usize,
                msg: format!(
                    "C and S must be square and of the same size, got {:?} and {:?}",
                    c_nm.shape(),
                    s_nm.shape()
                )
            }
        );
        let degree = c_nm.nrows() - 1;
        Ok(Self {
            degree,
            order: degree,
            radius_m,
            gm,
            c_nm,
            s_nm,
        })
    }

    /// Loads a GGM03S file (rows of `n m C S sigma_C sigma_S`), up to the provided degree and order.
    ///
    /// The file may be gzip compressed. Rows which cannot be parsed are skipped with a warning.
    pub fn from_ggm<P: AsRef<Path>>(
        path: P,
        degree: usize,
        order: usize,
    ) -> Result<Self, InputOutputError> {
        let path_str = path.as_ref().display().to_string();
        let contents = read_table(&path)?;
        let mut me = Self::load(&contents, &path_str, degree, order)?;
        me.radius_m = GGM03S_RADIUS_M;
        me.gm = GGM03S_GM;
        Ok(me)
    }

    fn load(
        contents: &str,
        path: &str,
        degree: usize,
        order: usize,
    ) -> Result<Self, InputOutputError> {
        let mut c_nm = DMatrix::zeros(degree + 1, degree + 1);
        let mut s_nm = DMatrix::zeros(degree + 1, degree + 1);
        let mut max_degree = 0;
        let mut max_order = 0;
        let mut loaded = 0;

        for (lno, line) in data_lines(contents) {
            let items: Vec<&str> = line.split_whitespace().collect();
            if items.len() < 4 {
                warn!("{path}:{lno}: expected at least four columns -- ignoring line");
                continue;
            }
            let (n, m) = match (items[0].parse::<usize>(), items[1].parse::<usize>()) {
                (Ok(n), Ok(m)) => (n, m),
                _ => {
                    warn!("{path}:{lno}: could not parse degree and order -- ignoring line");
                    continue;
                }
            };
            let (c, s) = match (parse_f64(items[2]), parse_f64(items[3])) {
                (Some(c), Some(s)) => (c, s),
                _ => {
                    warn!("{path}:{lno}: could not parse C_nm and S_nm -- ignoring line");
                    continue;
                }
            };
            ensure!(
                m <= n,
                MalformedTableSnafu {
                    path,
                    line: lno,
                    msg: format!("order {m} is greater than degree {n}")
                }
            );

            if n > degree {
                // The file is sorted by degree, so nothing else is needed.
                break;
            }
            if m <= order {
                c_nm[(n, m)] = c;
                s_nm[(n, m)] = s;
                max_degree = max_degree.max(n);
                max_order = max_order.max(m);
                loaded += 1;
            }
        }

        ensure!(
            loaded > 0,
            MalformedTableSnafu {
                path,
                line: 0_usize,
                msg: "no gravity coefficient found"
            }
        );

        if max_degree < degree || max_order < order {
            warn!(
                "{path} only contained (degree, order) of ({max_degree}, {max_order}) instead of requested ({degree}, {order})"
            );
        } else {
            info!("{path} loaded with (degree, order) = ({degree}, {order})");
        }

        Ok(Self {
            degree: max_degree,
            order: max_order,
            radius_m: GGM03S_RADIUS_M,
            gm: GGM03S_GM,
            c_nm: c_nm.view((0, 0), (max_degree + 1, max_degree + 1)).into_owned(),
            s_nm: s_nm.view((0, 0), (max_degree + 1, max_degree + 1)).into_owned(),
        })
    }

    /// Maximum degree of the loaded coefficients
    pub fn max_degree_n(&self) -> usize {
        self.degree
    }

    /// Maximum order of the loaded coefficients
    pub fn max_order_m(&self) -> usize {
        self.order
    }

    /// Returns the normalized C_nm and S_nm coefficients, zero outside of the loaded field.
    pub fn cs_nm(&self, degree: usize, order: usize) -> (f64, f64) {
        if degree > self.degree || order > degree {
            (0.0, 0.0)
        } else {
            (self.c_nm[(degree, order)], self.s_nm[(degree, order)])
        }
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    pub fn gm(&self) -> f64 {
        self.gm
    }
}
