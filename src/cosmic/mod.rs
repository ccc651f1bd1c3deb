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

/// The solar system bodies available in the DE430 Chebyshev tables, and their gravitational parameters.
pub mod bodies;
pub use self::bodies::Bodies;

/// Piecewise Chebyshev ephemerides of the Sun, the Moon and the planets.
pub mod ephemeris;
pub use self::ephemeris::{cheb3d, De430, EphemerisError, SolarSystemPositions};

/// Earth orientation parameters (polar motion, UT1-UTC, nutation corrections, leap seconds).
pub mod eop;
pub use self::eop::{Eop, EopError, EopTable, Interpolation};

/// Time scale offsets and calendar conversions.
pub mod timescales;
pub use self::timescales::*;

/// Greenwich sidereal time and the obliquity of the ecliptic.
pub mod sidereal;
pub use self::sidereal::*;

/// IAU 1980 nutation theory.
pub mod nutation;
pub use self::nutation::{nut_angles, nut_matrix};

/// Elementary rotations, precession, polar motion and Greenwich hour angle matrices.
pub mod rotations;
pub use self::rotations::*;

/// The inertial to Earth fixed transformation and its time scale bookkeeping.
pub mod frames;
pub use self::frames::EarthFrame;

/// Geodetic coordinates and the local tangent frame of a ground station.
pub mod geodesy;
pub use self::geodesy::*;

/// Osculating Keplerian elements.
pub mod elements;
pub use self::elements::{ecc_anomaly, ElementsError, KeplerianElements};

/// Modified Julian Date of the J2000 epoch (2000 January 1, 12h TT)
pub const MJD_J2000: f64 = 51_544.5;
/// Offset between the Julian Date and the Modified Julian Date
pub const JD_MJD_OFFSET: f64 = 2_400_000.5;
/// Number of days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;
/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;
/// Arcseconds per radian
pub const ARCSEC_PER_RAD: f64 = 3600.0 * 180.0 / std::f64::consts::PI;

/// Equatorial radius of the Earth (WGS84 / IERS 2003) in meters
pub const EARTH_EQUATORIAL_RADIUS: f64 = 6_378.136_3e3;
/// Flattening of the Earth ellipsoid
pub const EARTH_FLATTENING: f64 = 1.0 / 298.257_223_563;
/// Earth to Moon mass ratio of DE430
pub const EARTH_MOON_MASS_RATIO: f64 = 81.300_569_074_190_62;

/// Gravitational parameter of the Earth in m^3/s^2 (DE430)
pub const GM_EARTH: f64 = 398_600.435_436e9;
/// Gravitational parameter of the Sun in m^3/s^2 (DE430)
pub const GM_SUN: f64 = 132_712_440_041.939_4e9;
/// Gravitational parameter of the Moon in m^3/s^2 (DE430)
pub const GM_MOON: f64 = GM_EARTH / EARTH_MOON_MASS_RATIO;
pub const GM_MERCURY: f64 = 22_031.78e9;
pub const GM_VENUS: f64 = 324_858.592e9;
pub const GM_MARS: f64 = 42_828.375_214e9;
pub const GM_JUPITER: f64 = 126_712_764.8e9;
pub const GM_SATURN: f64 = 37_940_585.2e9;
pub const GM_URANUS: f64 = 5_794_548.6e9;
pub const GM_NEPTUNE: f64 = 6_836_527.100_58e9;
pub const GM_PLUTO: f64 = 977.000_000_000_000_9e9;
