use crate::data_file;
use geos3_od::io::estimates::{export_estimates, ExportCfg};
use geos3_od::io::scenario::ScenarioConfig;
use geos3_od::od::measurement::MeasurementType;

#[test]
fn geos3_kaena_point() {
    let _ = pretty_env_logger::try_init();
    let cfg = ScenarioConfig::default();
    for file in [
        &cfg.data.gravity,
        &cfg.data.ephemeris,
        &cfg.data.eop,
        &cfg.data.tracking,
    ] {
        let name = file
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        if data_file(name).is_none() {
            return;
        }
    }

    let odp = cfg.build_process().unwrap();
    let arc = cfg.load_tracking().unwrap();
    odp.validate(&arc.observations).unwrap();
    let sol = odp.run(&arc.observations).unwrap();

    assert_eq!(sol.estimates.len(), 3 * arc.len());
    assert_eq!(Some(sol.epoch), arc.start_epoch());

    let truth = cfg.truth_state().unwrap();
    println!("{}", sol.report(&truth));
    let err = sol.error_wrt(&truth);
    // Meter level on the position and mm/s level on the velocity
    for i in 0..3 {
        assert!(err[i].abs() < 10.0, "position error {err}");
        assert!(err[i + 3].abs() < 1e-2, "velocity error {err}");
    }

    for kind in MeasurementType::SEQUENCE {
        println!("RMS {kind} prefit: {:e} {}", sol.rms_prefit_residuals(kind), kind.unit());
    }
    assert!(sol.rms_residual_ratios().is_finite());

    let path = std::env::temp_dir().join("geos3_od_kaena_point.csv");
    let rows = export_estimates(&path, &sol.estimates, &ExportCfg::default()).unwrap();
    assert_eq!(rows, sol.estimates.len());
}
