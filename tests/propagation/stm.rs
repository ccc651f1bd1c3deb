use super::two_body::two_body;
use approx::assert_abs_diff_eq;
use geos3_od::dynamics::{StateAndStm, VariationalDynamics};
use geos3_od::linalg::{Matrix6, Vector6};
use geos3_od::propagators::{PropOpts, Propagator};

// Compares the state transition matrix of the variational equations with the one obtained by
// finite differencing of the propagated state.
#[test]
fn stm_vs_finite_differences() {
    let _ = pretty_env_logger::try_init();
    let orbital = two_body();
    let opts = PropOpts::with_tolerances(1e-13, 1e-6);
    let prop = Propagator::dp45(orbital.clone(), opts);
    let var_prop = Propagator::dp45(VariationalDynamics::from_orbital(&orbital), opts);

    let init = Vector6::new(
        5_542_555.937,
        3_213_514.867,
        3_990_892.976,
        5_394.068,
        -2_365.213,
        -7_061.846,
    );
    let duration = 600.0;

    let with_stm = StateAndStm::from_vector(
        &var_prop
            .propagate(StateAndStm::new(init).to_vector(), 0.0, duration)
            .unwrap(),
    );
    let nominal = prop.propagate(init, 0.0, duration).unwrap();
    // Without harmonics, both models integrate the same two body motion
    assert_abs_diff_eq!(with_stm.state, nominal, epsilon = 1e-3);

    let mut stm_fd = Matrix6::zeros();
    for i in 0..6 {
        let pert = if i < 3 { 1.0 } else { 1e-3 };
        let mut this_init = init;
        this_init[i] += pert;
        let this_final = prop.propagate(this_init, 0.0, duration).unwrap();
        stm_fd.set_column(i, &((this_final - nominal) / pert));
    }
    println!("STM = {}", with_stm.stm);
    println!("FD = {}", stm_fd);

    for i in 0..6 {
        let pert = if i < 3 { 1.0 } else { 1e-3 };
        // Difference of the linearized deviation
        let delta = (with_stm.stm.column(i) - stm_fd.column(i)) * pert;
        assert!(delta.norm() < 1e-3, "column {i}: {delta}");
    }
}
