use std::fs::File;
use std::io::Write;
use tempdir::TempDir;
use travelbar_core::progress::PercentPolicy;
use travelbar_core::TrackerConfig;

#[test]
fn load_from_file() {
    let temp_dir = TempDir::new("travelbar_config").unwrap();
    let path = temp_dir.path().join("config.json");
    let mut file = File::create(&path).unwrap();
    file.write_all(
        br#"{
            "update_interval_ms": 5000,
            "accuracy_threshold_m": 20.0,
            "percent_policy": "mirrored"
        }"#,
    )
    .unwrap();
    drop(file);

    let config = TrackerConfig::load(&path).unwrap();
    assert_eq!(config.update_interval_ms, 5000);
    assert_eq!(config.fastest_interval_ms, 1000);
    assert_eq!(config.accuracy_threshold_m, 20.0);
    assert_eq!(config.percent_policy, PercentPolicy::Mirrored);
    assert!(!config.stop_on_arrival);
}

#[test]
fn missing_file() {
    let temp_dir = TempDir::new("travelbar_config").unwrap();
    let error = TrackerConfig::load(temp_dir.path().join("nope.json")).unwrap_err();
    assert!(error.to_string().contains("failed to read config file"));
}

#[test]
fn round_trip_through_serde() {
    let config = TrackerConfig {
        min_visible_progress: 0,
        stop_on_arrival: true,
        ..TrackerConfig::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(TrackerConfig::from_json(&json).unwrap(), config);
}
