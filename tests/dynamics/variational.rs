use crate::test_tables;
use approx::assert_abs_diff_eq;
use geos3_od::dynamics::{Dynamics, ForceModelConfig, StateAndStm, VariationalDynamics};
use geos3_od::linalg::Vector6;

#[test]
fn stm_derivative() {
    let Some(tables) = test_tables() else {
        return;
    };
    let dynamics = VariationalDynamics::new(ForceModelConfig::default(), tables.eop, tables.gravity)
        .unwrap()
        .with_epoch(49_746.110_150_462_9, 49_746.110_858_611_1);

    let state = Vector6::new(
        5_542_555.937_228_69,
        3_213_514.867_349_19,
        3_990_892.975_876_74,
        5_394.068_421_662_95,
        -2_365.213_378_823_19,
        -7_061.845_542_002_04,
    );
    let d_y = dynamics
        .eom(0.0, &StateAndStm::new(state).to_vector())
        .unwrap();

    let mut expected = [0.0; 42];
    expected[..6].copy_from_slice(&[
        5_394.068_421_662_95,
        -2_365.213_378_823_19,
        -7_061.845_542_002_04,
        -5.134_836_785_408_58,
        -2.977_176_223_536_21,
        -3.705_917_767_141_93,
    ]);
    expected[9..12].copy_from_slice(&[5.700_320_349_077_97e-7, 8.676_515_923_511_37e-7, 1.081_693_539_184_41e-6]);
    expected[15..18].copy_from_slice(&[8.676_515_905_747_81e-7, -4.233_591_077_706_93e-7, 6.271_837_014_182_32e-7]);
    expected[21..24].copy_from_slice(&[1.081_693_540_072_59e-6, 6.271_837_049_709_46e-7, -1.466_729_253_607_47e-7]);
    expected[24] = 1.0;
    expected[31] = 1.0;
    expected[38] = 1.0;

    for (i, (computed, expected)) in d_y.iter().zip(expected.iter()).enumerate() {
        assert!(
            (computed - expected).abs() < 1e-10,
            "component {i}: {computed:e} != {expected:e}"
        );
    }

    // The state part of the derivative depends on the harmonics only
    let d_stm = StateAndStm::from_vector(&d_y);
    assert_abs_diff_eq!(d_stm.state, Vector6::from_row_slice(&expected[..6]), epsilon = 1e-10);
}
