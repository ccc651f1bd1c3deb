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

use super::filter::{measurement_update, time_update};
use super::measurement::{az_el_pa, range_pa, state_partials, MeasurementType, Observation};
use super::{
    GroundStation, InvalidSeedIndexSnafu, ODDynamicsSnafu, ODEopSnafu, ODError, ODPropSnafu,
    TooFewMeasurementsSnafu,
};
use crate::cosmic::{gmst, mjday, EarthFrame, SECONDS_PER_DAY};
use crate::dynamics::{Dynamics, OrbitalDynamics, StateAndStm, VariationalDynamics};
use crate::linalg::allocator::Allocator;
use crate::linalg::{DefaultAllocator, Matrix6, Vector6};
use crate::propagators::{IntegratorKind, PropOpts, Propagator};
use crate::utils::r3;
use serde_derive::{Deserialize, Serialize};
use snafu::{ensure, OptionExt, ResultExt};
use std::fmt;
use typed_builder::TypedBuilder;

mod solution;
pub use solution::{Estimate, ODSolution};

/// Standard deviations of the tracking measurements.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeasurementNoise {
    /// in radians
    pub azimuth: f64,
    /// in radians
    pub elevation: f64,
    /// in meters
    pub range: f64,
}

impl MeasurementNoise {
    /// Initializes the noise from angles in degrees and a range in meters.
    pub fn from_degrees(azimuth_deg: f64, elevation_deg: f64, range_m: f64) -> Self {
        Self {
            azimuth: azimuth_deg.to_radians(),
            elevation: elevation_deg.to_radians(),
            range: range_m,
        }
    }

    /// Returns the standard deviation of the provided measurement type.
    pub fn sigma(&self, kind: MeasurementType) -> f64 {
        match kind {
            MeasurementType::Azimuth => self.azimuth,
            MeasurementType::Elevation => self.elevation,
            MeasurementType::Range => self.range,
        }
    }
}

impl Default for MeasurementNoise {
    /// Kaena Point tracking of GEOS-3
    fn default() -> Self {
        Self::from_degrees(0.0224, 0.0139, 92.5)
    }
}

/// Reference epoch of the GEOS-3 solution: 1995-01-29 02:38:00 UTC.
pub fn geos3_reference_mjd() -> f64 {
    mjday(1995, 1, 29, 2, 38, 0.0)
}

/// Initial covariance: 10 km on each position component and 31.6 m/s on each velocity component.
pub fn default_initial_covar() -> Matrix6<f64> {
    Matrix6::from_diagonal(&Vector6::new(1e8, 1e8, 1e8, 1e3, 1e3, 1e3))
}

/// A sequential orbit determination process: an Extended Kalman Filter processing the azimuth,
/// elevation and range of each observation one scalar at a time.
///
/// The state is propagated from one observation to the next, starting from the reference epoch
/// `ref_mjd_utc`, and the final estimate is propagated back to the first observation.
#[derive(Clone, TypedBuilder)]
pub struct ODProcess {
    /// Full dynamics used to propagate the state
    pub dynamics: OrbitalDynamics,
    /// Tracking station of every observation
    #[builder(default = GroundStation::kaena_point())]
    pub station: GroundStation,
    #[builder(default)]
    pub noise: MeasurementNoise,
    /// Seed state, at the epoch of the observation `seed_index`
    pub seed_state: Vector6<f64>,
    #[builder(default = 8)]
    pub seed_index: usize,
    #[builder(default = geos3_reference_mjd())]
    pub ref_mjd_utc: f64,
    #[builder(default = default_initial_covar())]
    pub init_covar: Matrix6<f64>,
    /// State noise added at each time update
    #[builder(default = Matrix6::zeros())]
    pub process_noise: Matrix6<f64>,
    #[builder(default = PropOpts::with_tolerances(1e-13, 1e-6))]
    pub prop_opts: PropOpts,
    #[builder(default)]
    pub integrator: IntegratorKind,
}

impl ODProcess {
    fn propagator<D: Dynamics>(&self, dynamics: D) -> Propagator<D>
    where
        DefaultAllocator: Allocator<D::StateSize>,
    {
        Propagator::from_kind(dynamics, self.integrator, self.prop_opts)
    }

    /// Propagates the state with the full dynamics referenced to `mjd_utc`, from 0 to `delta_t` seconds.
    fn propagate_state(
        &self,
        state: Vector6<f64>,
        mjd_utc: f64,
        mjd_tt: f64,
        delta_t: f64,
    ) -> Result<Vector6<f64>, ODError> {
        let dynamics = self.dynamics.with_epoch(mjd_utc, mjd_tt);
        self.propagator(dynamics)
            .propagate(state, 0.0, delta_t)
            .context(ODPropSnafu)
    }

    /// Propagates the state and an identity STM with the variational equations referenced to
    /// `mjd_utc`, and returns the state transition matrix over `delta_t` seconds.
    fn propagate_stm(
        &self,
        state: Vector6<f64>,
        mjd_utc: f64,
        mjd_tt: f64,
        delta_t: f64,
    ) -> Result<Matrix6<f64>, ODError> {
        let dynamics = VariationalDynamics::from_orbital(&self.dynamics).with_epoch(mjd_utc, mjd_tt);
        let combined = self
            .propagator(dynamics)
            .propagate(StateAndStm::new(state).to_vector(), 0.0, delta_t)
            .context(ODPropSnafu)?;
        Ok(StateAndStm::from_vector(&combined).stm)
    }

    /// Processes all of the observations, and returns the estimates and the final state at the
    /// epoch of the first observation.
    ///
    /// The observations must be sorted by increasing epoch, and all must be covered by the
    /// Earth orientation table.
    pub fn run(&self, observations: &[Observation]) -> Result<ODSolution, ODError> {
        ensure!(
            observations.len() > 1,
            TooFewMeasurementsSnafu {
                need: 2_usize,
                action: "a sequential orbit determination"
            }
        );
        let first = observations[0];
        let last = observations[observations.len() - 1];
        let seed_obs = observations
            .get(self.seed_index)
            .context(InvalidSeedIndexSnafu {
                index: self.seed_index,
                count: observations.len(),
            })?;

        info!(
            "Orbit determination of {} observations from {} to {} with {}",
            observations.len(),
            first.epoch,
            last.epoch,
            self.station
        );

        // Seed state back to the reference epoch
        let seed_frame = self.earth_frame(seed_obs.mjd_utc)?;
        let mut state = self.propagate_state(
            self.seed_state,
            seed_obs.mjd_utc,
            seed_frame.mjd_tt,
            -(seed_obs.mjd_utc - self.ref_mjd_utc) * SECONDS_PER_DAY,
        )?;
        debug!("state at the reference epoch: {:?}", state.as_slice());

        let mut covar = self.init_covar;
        let ltc = self.station.ltc();

        let mut estimates = Vec::with_capacity(3 * observations.len());
        let mut t = 0.0;
        let mut last_mjd_tt = seed_frame.mjd_tt;

        for obs in observations {
            let t_prev = t;
            t = (obs.mjd_utc - self.ref_mjd_utc) * SECONDS_PER_DAY;
            let delta_t = t - t_prev;

            let frame = self.earth_frame(obs.mjd_utc)?;
            last_mjd_tt = frame.mjd_tt;

            // The STM and the state are both integrated with the force models referenced to the
            // epoch of the current observation.
            let stm = self.propagate_stm(state, obs.mjd_utc, frame.mjd_tt, delta_t)?;
            state = self.propagate_state(state, obs.mjd_utc, frame.mjd_tt, delta_t)?;

            let earth_rot = r3(gmst(frame.mjd_ut1));
            covar = time_update(&covar, &stm, &self.process_noise);

            for kind in MeasurementType::SEQUENCE {
                let s = self
                    .station
                    .topocentric(&state.fixed_rows::<3>(0).into_owned(), &earth_rot);
                let (computed, d_ds) = match kind {
                    MeasurementType::Azimuth => {
                        let aep = az_el_pa(&s);
                        (aep.azimuth, aep.d_az_ds)
                    }
                    MeasurementType::Elevation => {
                        let aep = az_el_pa(&s);
                        (aep.elevation, aep.d_el_ds)
                    }
                    MeasurementType::Range => range_pa(&s),
                };
                let h_tilde = state_partials(&d_ds, &ltc, &earth_rot);
                let sigma = self.noise.sigma(kind);
                let observed = obs.value(kind);

                let update =
                    measurement_update(&state, observed, computed, sigma, &h_tilde, &covar)?;
                state = update.state;
                covar = update.covar;

                let est = Estimate {
                    epoch: obs.epoch,
                    mjd_utc: obs.mjd_utc,
                    kind,
                    observed,
                    computed,
                    sigma,
                    state,
                    covar,
                };
                trace!("{est}");
                estimates.push(est);
            }
            debug!("{}: updated state {:?}", obs.epoch, state.as_slice());
        }

        // Back to the first observation
        let final_state = self.propagate_state(
            state,
            last.mjd_utc,
            last_mjd_tt,
            -(last.mjd_utc - first.mjd_utc) * SECONDS_PER_DAY,
        )?;

        let sol = ODSolution {
            estimates,
            epoch: first.epoch,
            final_state,
            final_covar: covar,
        };
        info!(
            "Processed {} measurements (RMS residual ratio {:.3})",
            sol.estimates.len(),
            sol.rms_residual_ratios()
        );
        Ok(sol)
    }

    fn earth_frame(&self, mjd_utc: f64) -> Result<EarthFrame, ODError> {
        EarthFrame::at_utc(&self.dynamics.eop, mjd_utc).context(ODEopSnafu)
    }

    /// Checks that the force models can be evaluated at every observation epoch.
    pub fn validate(&self, observations: &[Observation]) -> Result<(), ODError> {
        for obs in observations {
            let frame = self.earth_frame(obs.mjd_utc)?;
            self.dynamics
                .with_epoch(obs.mjd_utc, frame.mjd_tt)
                .accel(0.0, &self.seed_state.fixed_rows::<3>(0).into_owned())
                .context(ODDynamicsSnafu)?;
        }
        Ok(())
    }
}

impl fmt::Display for ODProcess {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "EKF from {} with {} ({} integrator)",
            self.station, self.dynamics, self.integrator
        )
    }
}

#[cfg(test)]
mod ut_process {
    use super::*;
    use crate::dynamics::orbital::ut_orbital::two_body;
    use crate::linalg::Vector3;
    use crate::od::measurement::az_el_pa;
    use crate::time::Epoch;
    use approx::assert_abs_diff_eq;

    fn state_at_ref() -> Vector6<f64> {
        Vector6::new(
            6_221_397.628_578_69,
            2_867_713.779_657_41,
            3_006_155.985_099_5,
            4_645.047_251_617_5,
            -2_752.215_915_881_82,
            -7_507.999_409_869_39,
        )
    }

    /// Noise free tracking of the two body orbit, and the true states at each observation.
    fn simulate(dynamics: &OrbitalDynamics, count: usize) -> (Vec<Observation>, Vec<Vector6<f64>>) {
        let station = GroundStation::kaena_point();
        let prop = Propagator::dp45(dynamics.clone(), PropOpts::with_tolerances(1e-13, 1e-6));
        let mut observations = Vec::with_capacity(count);
        let mut states = Vec::with_capacity(count);
        for i in 0..count {
            let t = 300.0 + 30.0 * i as f64;
            let mjd_utc = geos3_reference_mjd() + t / SECONDS_PER_DAY;
            let state = prop.propagate(state_at_ref(), 0.0, t).unwrap();
            let frame = EarthFrame::at_utc(&dynamics.eop, mjd_utc).unwrap();
            let radius: Vector3<f64> = state.fixed_rows::<3>(0).into_owned();
            let s = station.topocentric(&radius, &r3(gmst(frame.mjd_ut1)));
            let aep = az_el_pa(&s);
            observations.push(Observation {
                epoch: Epoch::from_mjd_utc(mjd_utc),
                mjd_utc,
                azimuth: aep.azimuth,
                elevation: aep.elevation,
                range: s.norm(),
            });
            states.push(state);
        }
        (observations, states)
    }

    #[test]
    fn exact_seed() {
        let _ = pretty_env_logger::try_init();
        let dynamics = two_body();
        let (observations, states) = simulate(&dynamics, 20);

        let odp = ODProcess::builder()
            .dynamics(dynamics)
            .seed_state(states[8])
            .build();
        odp.validate(&observations).unwrap();
        let sol = odp.run(&observations).unwrap();

        assert_eq!(sol.estimates.len(), 60);
        assert_eq!(sol.epoch, observations[0].epoch);
        assert!(sol.rms_residual_ratios() < 1e-3);
        let err = sol.error_wrt(&states[0]);
        assert_abs_diff_eq!(err.fixed_rows::<3>(0).norm(), 0.0, epsilon = 0.1);
        assert_abs_diff_eq!(err.fixed_rows::<3>(3).norm(), 0.0, epsilon = 1e-3);
        // The covariance shrinks from its initial value
        assert!(sol.final_covar[(0, 0)] < 1e8);
        assert!(sol.final_covar[(3, 3)] < 1e3);
    }

    #[test]
    fn perturbed_seed() {
        let _ = pretty_env_logger::try_init();
        let dynamics = two_body();
        let (observations, states) = simulate(&dynamics, 20);
        let offset = Vector6::new(100.0, -50.0, 80.0, 0.1, 0.0, -0.05);

        let odp = ODProcess::builder()
            .dynamics(dynamics)
            .seed_state(states[8] + offset)
            .integrator(IntegratorKind::CashKarp45)
            .build();
        let sol = odp.run(&observations).unwrap();

        let err = sol.error_wrt(&states[0]);
        assert!(err.fixed_rows::<3>(0).norm() < 0.2 * offset.fixed_rows::<3>(0).norm());
        // Azimuth is processed first at every epoch
        assert_eq!(sol.estimates[0].kind, MeasurementType::Azimuth);
        assert_eq!(sol.estimates[2].kind, MeasurementType::Range);
    }

    #[test]
    fn invalid_inputs() {
        let dynamics = two_body();
        let (observations, states) = simulate(&dynamics, 3);
        let odp = ODProcess::builder()
            .dynamics(dynamics)
            .seed_state(states[0])
            .build();
        assert_eq!(
            odp.run(&observations),
            Err(ODError::InvalidSeedIndex { index: 8, count: 3 })
        );
        assert!(matches!(
            odp.run(&observations[..1]),
            Err(ODError::TooFewMeasurements { need: 2, .. })
        ));

        // Outside of the Earth orientation table
        let mut late = observations.clone();
        late[2].mjd_utc += 2.0;
        let odp = ODProcess { seed_index: 0, ..odp };
        assert!(matches!(odp.run(&late), Err(ODError::ODEopError { .. })));
    }

    #[test]
    fn reference_noise() {
        let noise = MeasurementNoise::default();
        assert_abs_diff_eq!(noise.sigma(MeasurementType::Azimuth), 3.909_537_524_467_3e-4, epsilon = 1e-15);
        assert_abs_diff_eq!(noise.sigma(MeasurementType::Elevation), 0.0139_f64.to_radians());
        assert_eq!(noise.sigma(MeasurementType::Range), 92.5);
        assert_abs_diff_eq!(geos3_reference_mjd(), 49_746.109_722_222_2, epsilon = 1e-9);
    }
}
