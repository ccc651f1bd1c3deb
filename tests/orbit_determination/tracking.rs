use crate::data_file;
use flate2::write::GzEncoder;
use flate2::Compression;
use geos3_od::io::tracking_data::TrackingArc;
use geos3_od::io::InputOutputError;
use geos3_od::time::Epoch;
use std::fs;
use std::io::Write;

const PASS: &str = "1995/01/29  02:38:37.000 157.4000   22.8700 2405.3316
1995/01/29  02:39:07.000 163.1500   25.3100 2221.8210
1995/01/29  02:39:37.000 169.8800   27.4700 2072.1770
";

#[test]
fn tracking_files() {
    let _ = pretty_env_logger::try_init();
    let dir = std::env::temp_dir().join("geos3_od_tracking");
    fs::create_dir_all(&dir).unwrap();

    let plain = dir.join("pass.txt");
    fs::write(&plain, PASS).unwrap();
    let arc = TrackingArc::from_geos3(&plain).unwrap();
    assert_eq!(arc.len(), 3);
    assert_eq!(
        arc.start_epoch(),
        Some(Epoch::from_gregorian_utc_hms(1995, 1, 29, 2, 38, 37))
    );
    assert_eq!(
        arc.end_epoch(),
        Some(Epoch::from_gregorian_utc_hms(1995, 1, 29, 2, 39, 37))
    );
    assert!(arc.source.ends_with("pass.txt"));

    let compressed = dir.join("pass.txt.gz");
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(PASS.as_bytes()).unwrap();
    fs::write(&compressed, encoder.finish().unwrap()).unwrap();
    let gz_arc = TrackingArc::from_geos3(&compressed).unwrap();
    assert_eq!(gz_arc.observations, arc.observations);

    assert!(matches!(
        TrackingArc::from_geos3(dir.join("does_not_exist.txt")),
        Err(InputOutputError::StdIOError { .. })
    ));
}

#[test]
fn geos3_tracking_data() {
    let Some(path) = data_file("GEOS3.txt") else {
        return;
    };
    let arc = TrackingArc::from_geos3(path).unwrap();
    assert_eq!(arc.len(), 46);
    for obs in &arc.observations {
        assert!(obs.elevation > 0.0);
        assert!(obs.range > 1e6 && obs.range < 5e6);
    }
    assert_eq!(
        arc.start_epoch(),
        Some(Epoch::from_gregorian_utc_hms(1995, 1, 29, 2, 38, 37))
    );
}
