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

use crate::linalg::Matrix3;
use std::f64::consts::TAU;

/// Returns the fractional part of the input, always in [0, 1), i.e. `x - floor(x)`.
///
/// Note that this differs from `f64::fract` for negative numbers: `frac(-2.3) = 0.7`.
pub fn frac(x: f64) -> f64 {
    x - x.floor()
}

/// Returns `x` modulo `y`, with the same sign convention as [`frac`], i.e. the result is in [0, y) for positive `y`.
pub fn modulo(x: f64, y: f64) -> f64 {
    y * frac(x / y)
}

/// Wraps the provided angle in radians between 0 and 2π.
pub fn between_0_tau(angle: f64) -> f64 {
    let wrapped = angle % TAU;
    if wrapped < 0.0 {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Elementary rotation about the first (x) axis.
///
/// This is a frame rotation: a positive angle rotates the coordinate frame, not the vector.
pub fn r1(angle_rad: f64) -> Matrix3<f64> {
    let (s, c) = angle_rad.sin_cos();
    Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c)
}

/// Elementary rotation about the second (y) axis.
pub fn r2(angle_rad: f64) -> Matrix3<f64> {
    let (s, c) = angle_rad.sin_cos();
    Matrix3::new(c, 0.0, -s, 0.0, 1.0, 0.0, s, 0.0, c)
}

/// Elementary rotation about the third (z) axis.
pub fn r3(angle_rad: f64) -> Matrix3<f64> {
    let (s, c) = angle_rad.sin_cos();
    Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0)
}
