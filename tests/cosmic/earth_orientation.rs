use crate::{synthetic_eop, test_tables};
use approx::assert_abs_diff_eq;
use geos3_od::cosmic::{mjd_utc, mjday, EarthFrame, Interpolation, SECONDS_PER_DAY};
use geos3_od::linalg::Matrix3;
use geos3_od::time::Epoch;

#[test]
fn iers_interpolation() {
    let Some(tables) = test_tables() else {
        return;
    };
    let eop = tables
        .eop
        .query(49_746.110_150_462_9, Interpolation::Linear)
        .unwrap();
    assert_abs_diff_eq!(eop.x_pole, -5.593_861_831_521_89e-7, epsilon = 1e-10);
    assert_abs_diff_eq!(eop.y_pole, 2.335_544_384_403_73e-6, epsilon = 1e-10);
    assert_abs_diff_eq!(eop.ut1_utc, 0.325_764_698_106_523, epsilon = 1e-10);
    assert_abs_diff_eq!(eop.lod, 0.002_726_686_357_638_15, epsilon = 1e-10);
    assert_abs_diff_eq!(eop.dpsi, -1.168_819_606_404_21e-7, epsilon = 1e-10);
    assert_abs_diff_eq!(eop.deps, -2.478_816_804_122_19e-8, epsilon = 1e-10);
    assert_abs_diff_eq!(eop.dx_pole, -8.417_641_506_705_23e-10, epsilon = 1e-10);
    assert_abs_diff_eq!(eop.dy_pole, -1.566_188_801_213_42e-9, epsilon = 1e-10);
    assert_eq!(eop.tai_utc, 29.0);
}

#[test]
fn calendar_and_epoch_agree() {
    let epoch = Epoch::from_gregorian_utc_hms(1995, 1, 29, 2, 38, 37);
    assert_abs_diff_eq!(
        mjd_utc(epoch),
        mjday(1995, 1, 29, 2, 38, 37.0),
        epsilon = 1e-10
    );
}

#[test]
fn earth_rotation_rate() {
    let eop = synthetic_eop();
    let mjd = mjday(1995, 1, 29, 2, 38, 37.0);
    let before = EarthFrame::at_utc(&eop, mjd).unwrap();
    let after = EarthFrame::at_utc(&eop, mjd + 60.0 / SECONDS_PER_DAY).unwrap();

    let delta: Matrix3<f64> = after.icrf_to_itrf() * before.itrf_to_icrf();
    let angle = ((delta.trace() - 1.0) / 2.0).acos();
    assert_abs_diff_eq!(angle, 7.292_115_855e-5 * 60.0, epsilon = 1e-8);
    // Rotation about the pole
    assert_abs_diff_eq!(delta[(2, 2)], 1.0, epsilon = 1e-12);
}
