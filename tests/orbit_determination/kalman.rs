use approx::assert_relative_eq;
use geos3_od::linalg::{Matrix6, Vector6};
use geos3_od::od::{measurement_update, time_update, ODError};

fn predicted_covar() -> Matrix6<f64> {
    Matrix6::from_row_slice(&[
        101453348.207834, 120429.109556826, 148186.1448513, 39372.9209797587, 3284.21675106589, 4014.15727751921,
        120429.109556826, 101309543.076907, 84141.6477758924, 3284.34773933075, 35369.9224513583, 2255.66799781441,
        148186.1448513, 84141.6477758924, 101344434.103469, 4014.41933186659, 2255.72532205054, 36274.7873542153,
        39372.9209797587, 3284.34773933075, 4014.41933186659, 1001.21615369228, 1.320962491756, 1.6045548104278,
        3284.21675106589, 35369.9224513583, 2255.72532205054, 1.320962491756, 999.576829598137, 0.892927375360559,
        4014.15727751921, 2255.66799781441, 36274.7873542153, 1.6045548104278, 0.892927375360559, 999.924178045366,
    ])
}

#[test]
fn azimuth_update() {
    let state = Vector6::new(
        5_738_566.577_691_86,
        3_123_975.340_929_59,
        3_727_114.481_560_55,
        5_199.633_291_810_68,
        -2_474.438_810_446_43,
        -7_195.167_525_538_01,
    );
    let h_tilde = Vector6::new(
        9.591_237_486_030_08e-8,
        2.160_503_452_275_37e-7,
        -3.273_827_709_207_12e-7,
        0.0,
        0.0,
        0.0,
    );

    let update = measurement_update(
        &state,
        1.055_908_489_493_3,
        1.058_929_953_815_17,
        0.000_390_953_752_446_73,
        &h_tilde,
        &predicted_covar(),
    )
    .unwrap();

    assert_relative_eq!(
        update.gain,
        Vector6::new(
            582_691.206_468_25,
            1_312_775.308_420_7,
            -1_989_454.899_791_93,
            190.367_307_502_019,
            433.242_659_522_805,
            -660.433_799_143_302,
        ),
        epsilon = 1e-5,
        max_relative = 1e-8
    );
    assert_relative_eq!(
        update.state,
        Vector6::new(
            5_736_805.997_000_85,
            3_120_008.837_172_57,
            3_733_125.548_560_23,
            5_199.058_103_783_01,
            -2_475.747_837_684_88,
            -7_193.172_048_376_94,
        ),
        epsilon = 1e-5,
        max_relative = 1e-8
    );

    let expected = Matrix6::from_row_slice(&[
        95796502.3074957, -12624173.0726456, 19462086.3185101, 37524.8091307257, -921.762222304672, 10425.7388968351,
        -12624173.0726456, 72596566.3325921, 43597431.3213228, -879.359513633289, 25894.053787673, 16700.6535138616,
        19462086.3185101, 43597431.3213228, 35401902.4365326, 10324.3398053662, 16615.9994846053, 14384.0288763645,
        37524.8091307257, -879.35951363329, 10324.3398053662, 1000.61236892128, -0.0531459273905025, 3.6992415263927,
        -921.762222304671, 25894.053787673, 16615.9994846053, -0.0531459273905022, 996.449599435587, 5.66006757185727,
        10425.7388968351, 16700.6535138616, 14384.0288763645, 3.6992415263927, 5.66006757185727, 992.657163955644,
    ]);
    assert_relative_eq!(update.covar, expected, epsilon = 1e-5, max_relative = 1e-8);
}

#[test]
fn covariance_grows_without_measurements() {
    let covar = Matrix6::from_diagonal(&Vector6::new(1e8, 1e8, 1e8, 1e3, 1e3, 1e3));
    let mut stm = Matrix6::identity();
    for i in 0..3 {
        stm[(i, i + 3)] = 60.0;
    }
    let predicted = time_update(&covar, &stm, &Matrix6::zeros());
    // Position variance picks up the velocity uncertainty over one minute
    assert_relative_eq!(predicted[(0, 0)], 1e8 + 3_600.0 * 1e3, max_relative = 1e-14);
    assert_relative_eq!(predicted[(0, 3)], 60.0 * 1e3, max_relative = 1e-14);
    assert_eq!(predicted, predicted.transpose());

    let noisy = time_update(&covar, &stm, &Matrix6::from_diagonal_element(1.0));
    assert_relative_eq!(noisy - predicted, Matrix6::from_diagonal_element(1.0), epsilon = 1e-6);
}

#[test]
fn degenerate_measurement() {
    let err = measurement_update(
        &Vector6::zeros(),
        1.0,
        1.0,
        0.0,
        &Vector6::zeros(),
        &Matrix6::zeros(),
    )
    .unwrap_err();
    assert_eq!(err, ODError::SingularKalmanGain { variance: 0.0 });
}
