use crate::test_tables;
use approx::assert_relative_eq;
use geos3_od::cosmic::{Bodies, JD_MJD_OFFSET};
use geos3_od::linalg::Vector3;

#[test]
fn de430_geocentric_positions() {
    let _ = pretty_env_logger::try_init();
    let Some(tables) = test_tables() else {
        return;
    };

    let pos = tables.ephem.positions(49_746.111_992_878_5).unwrap();

    let expected = [
        (Bodies::Moon, Vector3::new(89_383_372.312_719_2, -336_603_832.117_946, -114_648_787.751_995)),
        (Bodies::EarthMoonBarycenter, Vector3::new(-92_470_961_229.192_3, 106_394_918_389.493, 46_130_139_909.403_7)),
        (Bodies::Mercury, Vector3::new(83_775_495_895.695_7, -65_291_124_913.446_2, -23_391_312_101.240_8)),
        (Bodies::Venus, Vector3::new(-15_229_665_573.953_3, -110_134_992_637.563, -41_021_803_625.626_6)),
        (Bodies::Mars, Vector3::new(-88_278_413_008.243_2, 46_964_769_778.298_4, 29_071_026_502.671_3)),
        (Bodies::Jupiter, Vector3::new(-298_385_936_466.094, -754_498_258_910.729, -314_410_518_568.228)),
        (Bodies::Saturn, Vector3::new(1_482_033_999_505.12, -453_872_894_236.397, -249_402_247_811.211)),
        (Bodies::Uranus, Vector3::new(1_412_367_984_017.93, -2_511_355_045_786.9, -1_118_108_651_902.6)),
        (Bodies::Neptune, Vector3::new(1_871_250_770_052.33, -3_928_976_313_605.4, -1_655_020_476_718.54)),
        (Bodies::Pluto, Vector3::new(-2_171_414_794_259.54, -3_915_433_128_334.98, -552_716_250_355.845)),
        (Bodies::Sun, Vector3::new(92_298_251_728.476_6, -105_375_196_079.054, -45_686_367_226.353_3)),
    ];

    for (body, r) in expected {
        assert_relative_eq!(pos.get(body), r, max_relative = 1e-12);
    }
}

#[test]
fn de430_coverage() {
    let Some(tables) = test_tables() else {
        return;
    };
    // Julian Dates
    let (start, end) = tables.ephem.coverage();
    assert!(start < 49_746.0 + JD_MJD_OFFSET && end > 49_747.0 + JD_MJD_OFFSET);
    assert!(tables.ephem.positions(start - JD_MJD_OFFSET - 100.0).is_err());
}
