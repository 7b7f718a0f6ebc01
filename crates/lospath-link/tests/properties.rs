//! Property checks for the analysis engine over a range of generated profiles.

use approx::assert_relative_eq;
use lospath_link::{
    compute_link_budget, evaluate, segment, Classification, CurvatureModel, GeoPoint,
    RadioSpecs, TerrainSample,
};

const START: GeoPoint = GeoPoint { lat: 47.60, lon: -122.33 };
const END: GeoPoint = GeoPoint { lat: 47.70, lon: -122.20 };

/// Rolling terrain with a deterministic shape.
fn rolling_profile(n: usize, total: f64, amplitude: f64) -> Vec<TerrainSample> {
    (0..=n)
        .map(|i| {
            let d = total * i as f64 / n as f64;
            let e = 200.0 + amplitude * (i as f64 * 0.7).sin() + 0.3 * amplitude * (i as f64 * 2.3).cos();
            TerrainSample::new(d, e)
        })
        .collect()
}

#[test]
fn test_two_sample_profiles_are_always_clear() {
    for (a, b) in [(0.0, 0.0), (-50.0, 3000.0), (8848.0, 0.0)] {
        for total in [1.0, 1_000.0, 150_000.0] {
            let profile = [TerrainSample::new(0.0, a), TerrainSample::new(total, b)];
            for curvature in [CurvatureModel::default(), CurvatureModel::disabled()] {
                let result = evaluate(&profile, total, 0.0, 0.0, curvature).unwrap();
                assert!(result.is_clear);
            }
        }
    }
}

#[test]
fn test_symmetric_flat_profile() {
    let profile: Vec<TerrainSample> = (0..=20)
        .map(|i| TerrainSample::new(i as f64 * 100.0, 75.0))
        .collect();

    let los = evaluate(&profile, 2000.0, 12.0, 12.0, CurvatureModel::disabled()).unwrap();
    assert!(los.is_clear);

    // With zero-height antennas every sample sits exactly on the line.
    let segments = segment(&profile, 2000.0, 0.0, 0.0, CurvatureModel::disabled(), START, END).unwrap();
    for point in segments.iter().flat_map(|s| &s.points) {
        assert_eq!(point.clearance_m, 0.0);
    }
}

#[test]
fn test_ridge_scenario() {
    let profile = [
        TerrainSample::new(0.0, 0.0),
        TerrainSample::new(500.0, 100.0),
        TerrainSample::new(1000.0, 0.0),
    ];
    let result = evaluate(&profile, 1000.0, 1.0, 1.0, CurvatureModel::disabled()).unwrap();

    assert!(!result.is_clear);
    let obstruction = result.obstruction.unwrap();
    assert_eq!(obstruction.distance_m, 500.0);
    assert_relative_eq!(obstruction.line_of_sight_height_m, 1.0);
    assert_relative_eq!(obstruction.effective_terrain_height_m, 100.0);
}

#[test]
fn test_obstruction_present_iff_not_clear() {
    for amplitude in [5.0, 20.0, 60.0, 150.0] {
        let profile = rolling_profile(64, 25_000.0, amplitude);
        for height in [2.0, 30.0, 120.0] {
            let result = evaluate(&profile, 25_000.0, height, height, CurvatureModel::default()).unwrap();
            assert_eq!(result.is_clear, result.obstruction.is_none());
        }
    }
}

#[test]
fn test_los_and_segmenter_agree() {
    // Any interior obstruction found by the evaluator must fall inside an
    // obstruction or severe obstruction segment at the same distance.
    for amplitude in [20.0, 60.0, 150.0] {
        let profile = rolling_profile(80, 30_000.0, amplitude);
        let curvature = CurvatureModel::default();
        let los = evaluate(&profile, 30_000.0, 15.0, 15.0, curvature).unwrap();
        let segments = segment(&profile, 30_000.0, 15.0, 15.0, curvature, START, END).unwrap();

        if let Some(obstruction) = los.obstruction {
            let found = segments.iter().any(|s| {
                s.classification != Classification::Clearance
                    && s.points.iter().any(|p| {
                        p.distance_m == obstruction.distance_m
                            && p.clearance_m < 0.0
                    })
            });
            assert!(found, "obstruction at {} m not segmented", obstruction.distance_m);
        }
    }
}

#[test]
fn test_segments_are_well_formed() {
    for amplitude in [8.0, 25.0, 70.0] {
        let profile = rolling_profile(120, 40_000.0, amplitude);
        let segments = segment(&profile, 40_000.0, 20.0, 20.0, CurvatureModel::default(), START, END).unwrap();

        for s in &segments {
            assert!(s.len() >= 2);
            assert!(s.points.iter().all(|p| p.classification == s.classification));
            assert!(s.points.windows(2).all(|w| w[0].distance_m < w[1].distance_m));
        }
        for pair in segments.windows(2) {
            assert!(pair[0].end_distance_m() <= pair[1].start_distance_m());
        }
    }
}

#[test]
fn test_segmenter_is_deterministic() {
    let profile = rolling_profile(100, 20_000.0, 40.0);
    let runs: Vec<_> = (0..3)
        .map(|_| segment(&profile, 20_000.0, 10.0, 25.0, CurvatureModel::default(), START, END).unwrap())
        .collect();
    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[1], runs[2]);
}

#[test]
fn test_link_budget_worked_example() {
    let specs = RadioSpecs {
        frequency_mhz: 5800.0,
        tx_power_dbm: 20.0,
        tx_antenna_gain_dbi: 12.0,
        rx_antenna_gain_dbi: 12.0,
        rx_sensitivity_dbm: -85.0,
    };
    let result = compute_link_budget(10_000.0, &specs).unwrap();

    assert_relative_eq!(result.path_loss_db, 127.71);
    assert_relative_eq!(result.received_signal_strength_dbm, -83.71);
    assert_relative_eq!(result.link_margin_db, 1.29);
    assert!(result.is_viable);
}
