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

use super::tracking_data::TrackingArc;
use super::{
    duration_from_str, duration_to_str, ConfigError, ConfigRepr, InputOutputError,
    InvalidConfigSnafu,
};
use crate::cosmic::{mjday, De430, EopTable};
use crate::dynamics::{ForceModelConfig, HarmonicsMem, OrbitalDynamics};
use crate::linalg::{Matrix6, Vector6};
use crate::od::process::{MeasurementNoise, ODProcess};
use crate::od::GroundStation;
use crate::propagators::{IntegratorKind, PropOpts};
use crate::time::{Duration, Epoch, Unit};
use crate::GeosError;
use serde_derive::{Deserialize, Serialize};
use snafu::ensure;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

/// Location of the data tables.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataFiles {
    /// GGM03S gravity field coefficients
    pub gravity: PathBuf,
    /// DE430 Chebyshev coefficients
    pub ephemeris: PathBuf,
    /// IERS Earth orientation parameters
    pub eop: PathBuf,
    /// GEOS-3 tracking data
    pub tracking: PathBuf,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            gravity: PathBuf::from("data/GGM03S.txt"),
            ephemeris: PathBuf::from("data/DE430Coeff.txt"),
            eop: PathBuf::from("data/eop19620101.txt"),
            tracking: PathBuf::from("data/GEOS3.txt"),
        }
    }
}

/// Measurement standard deviations, as written in the configuration file.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NoiseConfig {
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub range_m: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            azimuth_deg: 0.0224,
            elevation_deg: 0.0139,
            range_m: 92.5,
        }
    }
}

impl From<NoiseConfig> for MeasurementNoise {
    fn from(cfg: NoiseConfig) -> Self {
        Self::from_degrees(cfg.azimuth_deg, cfg.elevation_deg, cfg.range_m)
    }
}

/// A priori state of the filter, at the epoch of observation `index`.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SeedConfig {
    pub index: usize,
    /// Position (m) and velocity (m/s) in the mean equator and equinox of J2000
    pub state: [f64; 6],
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            index: 8,
            state: [
                6_221_397.628_578_69,
                2_867_713.779_657_41,
                3_006_155.985_099_5,
                4_645.047_251_617_5,
                -2_752.215_915_881_82,
                -7_507.999_409_869_39,
            ],
        }
    }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PropagatorConfig {
    pub integrator: IntegratorKind,
    pub rel_tol: f64,
    pub abs_tol: f64,
    #[serde(
        serialize_with = "duration_to_str",
        deserialize_with = "duration_from_str"
    )]
    pub init_step: Duration,
    #[serde(
        serialize_with = "duration_to_str",
        deserialize_with = "duration_from_str"
    )]
    pub max_step: Duration,
}

impl Default for PropagatorConfig {
    fn default() -> Self {
        Self {
            integrator: IntegratorKind::Dormand45,
            rel_tol: 1e-13,
            abs_tol: 1e-6,
            init_step: 60.0 * Unit::Second,
            max_step: 2700.0 * Unit::Second,
        }
    }
}

impl From<PropagatorConfig> for PropOpts {
    fn from(cfg: PropagatorConfig) -> Self {
        PropOpts::builder()
            .rel_tol(cfg.rel_tol)
            .abs_tol(cfg.abs_tol)
            .init_step(cfg.init_step)
            .max_step(cfg.max_step)
            .build()
    }
}

/// The configuration of an orbit determination run. Every field is optional, and the defaults
/// reproduce the GEOS-3 solution from the Kaena Point tracking of 1995 January 29.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub data: DataFiles,
    pub station: GroundStation,
    pub noise: NoiseConfig,
    pub seed: SeedConfig,
    /// Diagonal of the initial covariance, in m^2 and m^2/s^2
    pub covar_diag: [f64; 6],
    pub force_model: ForceModelConfig,
    pub propagator: PropagatorConfig,
    /// Reference epoch of the filter, in UTC
    pub reference_epoch: String,
    /// Reference state at the first observation, to report the estimation error
    pub truth: Option<[f64; 6]>,
    /// Path of the CSV export of the estimates
    pub output: Option<PathBuf>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            data: DataFiles::default(),
            station: GroundStation::kaena_point(),
            noise: NoiseConfig::default(),
            seed: SeedConfig::default(),
            covar_diag: [1e8, 1e8, 1e8, 1e3, 1e3, 1e3],
            force_model: ForceModelConfig::default(),
            propagator: PropagatorConfig::default(),
            reference_epoch: "1995-01-29T02:38:00 UTC".to_string(),
            truth: Some([
                5753.173e3, 2673.361e3, 3440.304e3, 4.324207e3, -1.924299e3, -5.728216e3,
            ]),
            output: None,
        }
    }
}

impl ConfigRepr for ScenarioConfig {}

impl ScenarioConfig {
    /// Modified Julian Date (UTC) of the reference epoch.
    pub fn reference_mjd(&self) -> Result<f64, ConfigError> {
        let epoch = Epoch::from_str(&self.reference_epoch).map_err(|e| {
            ConfigError::InvalidConfig {
                msg: format!("reference epoch `{}`: {e}", self.reference_epoch),
            }
        })?;
        let (year, month, day, hour, minute, second, nanos) = epoch.to_gregorian_utc();
        Ok(mjday(
            year,
            month,
            day,
            hour,
            minute,
            f64::from(second) + f64::from(nanos) * 1e-9,
        ))
    }

    pub fn truth_state(&self) -> Option<Vector6<f64>> {
        self.truth.map(|truth| Vector6::from_row_slice(&truth))
    }

    /// Checks the consistency of the settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure!(
            self.force_model.order <= self.force_model.degree,
            InvalidConfigSnafu {
                msg: format!(
                    "gravity order {} greater than its degree {}",
                    self.force_model.order, self.force_model.degree
                )
            }
        );
        ensure!(
            self.noise.azimuth_deg > 0.0 && self.noise.elevation_deg > 0.0 && self.noise.range_m > 0.0,
            InvalidConfigSnafu {
                msg: "measurement noise must be positive"
            }
        );
        ensure!(
            self.covar_diag.iter().all(|v| *v > 0.0),
            InvalidConfigSnafu {
                msg: "initial covariance must be positive definite"
            }
        );
        ensure!(
            self.propagator.rel_tol > 0.0 && self.propagator.abs_tol > 0.0,
            InvalidConfigSnafu {
                msg: "propagator tolerances must be positive"
            }
        );
        self.reference_mjd()?;
        Ok(())
    }

    /// Loads the tracking data of this scenario.
    pub fn load_tracking(&self) -> Result<TrackingArc, InputOutputError> {
        TrackingArc::from_geos3(&self.data.tracking)
    }

    /// Loads the data tables and initializes the orbit determination process.
    pub fn build_process(&self) -> Result<ODProcess, GeosError> {
        self.validate()?;

        let eop = Arc::new(EopTable::from_file(&self.data.eop)?);
        let gravity = Arc::new(HarmonicsMem::from_ggm(
            &self.data.gravity,
            self.force_model.degree,
            self.force_model.order,
        )?);
        let ephem = Arc::new(De430::from_file(&self.data.ephemeris)?);
        let dynamics = OrbitalDynamics::new(self.force_model, eop, gravity, ephem)?;
        info!("{dynamics}");

        Ok(ODProcess::builder()
            .dynamics(dynamics)
            .station(self.station.clone())
            .noise(self.noise.into())
            .seed_state(Vector6::from_row_slice(&self.seed.state))
            .seed_index(self.seed.index)
            .ref_mjd_utc(self.reference_mjd()?)
            .init_covar(Matrix6::from_diagonal(&Vector6::from_row_slice(
                &self.covar_diag,
            )))
            .prop_opts(self.propagator.into())
            .integrator(self.propagator.integrator)
            .build())
    }
}
