//! End-to-end runs from a YAML configuration and a profile file.

use lospath_runner::{render, run_analysis, AnalysisConfig, OutputFormat, RunnerError};
use std::fs;
use tempfile::TempDir;

fn write_case(dir: &TempDir, profile: &str, extra: &str) -> AnalysisConfig {
    let profile_path = dir.path().join("profile.json");
    fs::write(&profile_path, profile).unwrap();

    let yaml = format!(
        r#"
start: {{ lat: 47.60, lon: -122.33 }}
end: {{ lat: 47.60, lon: -122.20 }}
elevation:
  profile_file: {}
{}
"#,
        profile_path.display(),
        extra
    );
    let config_path = dir.path().join("analysis.yaml");
    fs::write(&config_path, yaml).unwrap();

    AnalysisConfig::from_file(&config_path).unwrap()
}

#[test]
fn test_clear_path_with_radio() {
    let dir = TempDir::new().unwrap();
    let config = write_case(
        &dir,
        "[[0, 10], [2500, 12], [5000, 11], [7500, 12], [10000, 10]]",
        "height_a_m: 40\nheight_b_m: 40\nradio:\n  frequency_mhz: 5800\n",
    );

    let analysis = run_analysis(&config).unwrap();
    assert!(analysis.los.is_clear);
    assert!(analysis.segments.is_empty());

    let link = analysis.link.unwrap();
    assert_eq!(link.distance_km, 10.0);
    assert_eq!(link.path_loss_db, 127.71);
    assert!(link.is_viable);

    let json = render(&analysis, OutputFormat::Json).unwrap();
    assert!(json.contains("\"is_viable\": true"));
}

#[test]
fn test_obstructed_path_report() {
    let dir = TempDir::new().unwrap();
    let config = write_case(
        &dir,
        "[[0, 10], [2500, 12], [5000, 90], [7500, 12], [10000, 10]]",
        "height_a_m: 20\nheight_b_m: 20\nradio: {}\n",
    );

    let analysis = run_analysis(&config).unwrap();
    assert!(!analysis.los.is_clear);
    assert!(analysis.link.is_none());

    let text = render(&analysis, OutputFormat::Text).unwrap();
    assert!(text.contains("OBSTRUCTED"));
    assert!(text.contains("severe_obstruction"));
}

#[test]
fn test_missing_profile_file() {
    let dir = TempDir::new().unwrap();
    let mut config = write_case(&dir, "[[0, 0], [100, 0]]", "");
    config.elevation.profile_file = Some(dir.path().join("absent.json"));

    let err = run_analysis(&config).unwrap_err();
    assert!(matches!(err, RunnerError::Dem(_)));
}

#[test]
fn test_missing_endpoints() {
    let config = AnalysisConfig::default();
    let err = run_analysis(&config).unwrap_err();
    assert!(matches!(err, RunnerError::Config(_)));
}
