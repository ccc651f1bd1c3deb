use crate::synthetic_eop;
use approx::{assert_abs_diff_eq, assert_relative_eq};
use geos3_od::cosmic::{De430, GM_EARTH};
use geos3_od::dynamics::{ForceModelConfig, HarmonicsMem, OrbitalDynamics};
use geos3_od::linalg::Vector6;
use geos3_od::propagators::{IntegratorKind, PropOpts, Propagator};
use rstest::rstest;
use std::f64::consts::TAU;
use std::sync::Arc;

pub fn two_body() -> OrbitalDynamics {
    let gravity = Arc::new(HarmonicsMem::point_mass(6_378.136_3e3, GM_EARTH));
    let ephem = Arc::new(De430::new(vec![vec![0.0; 1020]]).unwrap());
    let cfg = ForceModelConfig {
        degree: 0,
        order: 0,
        sun: false,
        moon: false,
        planets: false,
        ..Default::default()
    };
    OrbitalDynamics::new(cfg, synthetic_eop(), gravity, ephem)
        .unwrap()
        .with_epoch(49_746.1, 49_746.1)
}

fn energy(state: &Vector6<f64>) -> f64 {
    let r = state.fixed_rows::<3>(0).norm();
    let v = state.fixed_rows::<3>(3).norm();
    v * v / 2.0 - GM_EARTH / r
}

#[rstest]
#[case(IntegratorKind::Dormand45)]
#[case(IntegratorKind::CashKarp45)]
fn circular_orbit_period(#[case] kind: IntegratorKind) {
    let _ = pretty_env_logger::try_init();
    let radius = 7_000e3;
    let speed = (GM_EARTH / radius).sqrt();
    let period = TAU * (radius.powi(3) / GM_EARTH).sqrt();
    // Inclined by 60 degrees
    let init = Vector6::new(
        radius,
        0.0,
        0.0,
        0.0,
        speed * 60.0_f64.to_radians().cos(),
        speed * 60.0_f64.to_radians().sin(),
    );

    let prop = Propagator::from_kind(two_body(), kind, PropOpts::with_tolerances(1e-13, 1e-6));
    let half = prop.propagate(init, 0.0, period / 2.0).unwrap();
    let full = prop.propagate(init, 0.0, period).unwrap();

    assert_abs_diff_eq!(half.fixed_rows::<3>(0).norm(), radius, epsilon = 1e-2);
    assert_abs_diff_eq!(half[0], -radius, epsilon = 1e-2);
    assert_abs_diff_eq!(full, init, epsilon = 1e-2);
    assert_relative_eq!(energy(&full), energy(&init), max_relative = 1e-9);
}

#[test]
fn forward_and_back() {
    let init = Vector6::new(
        5_542_555.937,
        3_213_514.867,
        3_990_892.976,
        5_394.068,
        -2_365.213,
        -7_061.846,
    );
    let prop = Propagator::default(two_body());
    let forward = prop.propagate(init, 0.0, 3_600.0).unwrap();
    let back = prop.propagate(forward, 3_600.0, 0.0).unwrap();

    assert!((forward - init).norm() > 1e6);
    assert_abs_diff_eq!(back, init, epsilon = 1e-2);
    // Propagating over no time returns the state
    assert_eq!(prop.propagate(init, 10.0, 10.0).unwrap(), init);
}
