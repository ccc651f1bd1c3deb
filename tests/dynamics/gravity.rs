use crate::test_tables;
use approx::assert_abs_diff_eq;
use geos3_od::cosmic::EarthFrame;
use geos3_od::dynamics::{Dynamics, ForceModelConfig, Harmonics, OrbitalDynamics};
use geos3_od::linalg::{Matrix3, Vector3, Vector6};

fn seed_state() -> Vector6<f64> {
    Vector6::new(
        6_221_397.628_578_69,
        2_867_713.779_657_41,
        3_006_155.985_099_5,
        4_645.047_251_617_5,
        -2_752.215_915_881_82,
        -7_507.999_409_869_39,
    )
}

#[test]
fn ggm03s_acceleration() {
    let Some(tables) = test_tables() else {
        return;
    };
    let harmonics = Harmonics::from_stor(tables.gravity, 20, 20).unwrap();
    let dcm = Matrix3::new(
        -0.978_185_453_896_254,
        0.207_733_066_362_26,
        -0.000_436_950_239_569_363,
        -0.207_733_028_352_522,
        -0.978_185_550_768_511,
        -0.000_131_145_697_267_082,
        -0.000_454_661_708_585_098,
        -3.751_581_690_262_89e-5,
        0.999_999_895_937_642,
    );
    let radius = seed_state().fixed_rows::<3>(0).into_owned();
    assert_abs_diff_eq!(
        harmonics.accel(&radius, &dcm),
        Vector3::new(-5.924_148_565_225_37, -2.730_766_792_968_87, -2.869_335_447_806_86),
        epsilon = 1e-10
    );
}

#[test]
fn ggm03s_gradient() {
    let Some(tables) = test_tables() else {
        return;
    };
    let harmonics = Harmonics::from_stor(tables.gravity, 20, 20).unwrap();
    let dcm = Matrix3::new(
        -0.976_675_972_331_716,
        0.214_718_082_511_189,
        -0.000_436_019_054_674_645,
        -0.214_718_043_811_152,
        -0.976_676_068_937_815,
        -0.000_134_261_271_504_216,
        -0.000_454_677_699_074_514,
        -3.750_859_940_872e-5,
        0.999_999_895_930_642,
    );
    let radius = Vector3::new(5_542_555.937_228_69, 3_213_514.867_349_19, 3_990_892.975_876_74);
    let expected = Matrix3::new(
        5.700_320_349_077_97e-7,
        8.676_515_905_747_81e-7,
        1.081_693_540_072_59e-6,
        8.676_515_923_511_37e-7,
        -4.233_591_077_706_93e-7,
        6.271_837_049_709_46e-7,
        1.081_693_539_184_41e-6,
        6.271_837_014_182_32e-7,
        -1.466_729_253_607_47e-7,
    );
    assert_abs_diff_eq!(harmonics.accel_gradient(&radius, &dcm), expected, epsilon = 1e-12);
}

#[test]
fn full_force_model() {
    let _ = pretty_env_logger::try_init();
    let Some(tables) = test_tables() else {
        return;
    };
    let mjd_utc = 49_746.111_284_722_1;
    let frame = EarthFrame::at_utc(&tables.eop, mjd_utc).unwrap();
    let dynamics = OrbitalDynamics::new(
        ForceModelConfig::default(),
        tables.eop,
        tables.gravity,
        tables.ephem,
    )
    .unwrap()
    .with_epoch(mjd_utc, frame.mjd_tt);

    let d_x = dynamics.eom(0.0, &seed_state()).unwrap();
    let expected = Vector6::new(
        4_645.047_251_617_5,
        -2_752.215_915_881_82,
        -7_507.999_409_869_39,
        -5.924_149_513_140_02,
        -2.730_766_697_881_14,
        -2.869_335_705_562_58,
    );
    assert_abs_diff_eq!(d_x, expected, epsilon = 1e-9);
}
