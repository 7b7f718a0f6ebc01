//! Terrain profiles stored on disk as JSON.
//!
//! Two layouts are accepted:
//!
//! ```text
//! {"samples": [{"distance_m": 0.0, "elevation_m": 12.5}, ...]}
//! [[0.0, 12.5], [250.0, 18.0], ...]
//! ```
//!
//! The stored profile is returned as-is regardless of the requested interval
//! count; the endpoints are only used to locate the analysis on the map.

use crate::{DemError, Result};
use lospath_link::{GeoPoint, TerrainProfile, TerrainProfileProvider, TerrainSample};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Relative mismatch between stored and great-circle distance that is worth
/// a warning.
const DISTANCE_MISMATCH_WARN: f64 = 0.05;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProfileFile {
    Samples { samples: Vec<TerrainSample> },
    Pairs(Vec<(f64, f64)>),
}

/// A fixed profile loaded from a JSON file.
#[derive(Debug, Clone)]
pub struct FileProfileSource {
    profile: TerrainProfile,
}

impl FileProfileSource {
    /// Load a profile from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let source = Self::from_json(&contents)?;
        debug!(
            "Loaded {} samples from {}",
            source.profile.len(),
            path.as_ref().display()
        );
        Ok(source)
    }

    /// Parse a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let samples = match serde_json::from_str::<ProfileFile>(json)? {
            ProfileFile::Samples { samples } => samples,
            ProfileFile::Pairs(pairs) => pairs
                .into_iter()
                .map(|(d, e)| TerrainSample::new(d, e))
                .collect(),
        };
        Ok(Self {
            profile: TerrainProfile::new(samples)?,
        })
    }

    /// Wrap an already validated profile.
    pub fn from_profile(profile: TerrainProfile) -> Self {
        Self { profile }
    }

    /// The stored profile.
    pub fn profile(&self) -> &TerrainProfile {
        &self.profile
    }
}

impl TerrainProfileProvider for FileProfileSource {
    type Error = DemError;

    fn fetch_profile(&self, start: GeoPoint, end: GeoPoint, _intervals: usize) -> Result<TerrainProfile> {
        let stored = self.profile.total_distance_m();
        let expected = start.distance_to(&end);
        if expected > 0.0 && ((stored - expected) / expected).abs() > DISTANCE_MISMATCH_WARN {
            warn!(
                "Stored profile covers {:.0} m but endpoints are {:.0} m apart",
                stored, expected
            );
        }
        Ok(self.profile.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_samples_layout() {
        let json = r#"{"samples": [
            {"distance_m": 0.0, "elevation_m": 10.0},
            {"distance_m": 500.0, "elevation_m": 25.0},
            {"distance_m": 1000.0, "elevation_m": 12.0}
        ]}"#;
        let source = FileProfileSource::from_json(json).unwrap();
        assert_eq!(source.profile().len(), 3);
        assert_eq!(source.profile().total_distance_m(), 1000.0);
    }

    #[test]
    fn test_parse_pairs_layout() {
        let source = FileProfileSource::from_json("[[0, 1.5], [100, 2.5]]").unwrap();
        assert_eq!(
            source.profile().samples(),
            &[TerrainSample::new(0.0, 1.5), TerrainSample::new(100.0, 2.5)]
        );
    }

    #[test]
    fn test_single_sample_rejected() {
        let result = FileProfileSource::from_json("[[0, 1.5]]");
        assert!(matches!(result, Err(DemError::InvalidProfile(_))));
    }

    #[test]
    fn test_not_json_rejected() {
        let result = FileProfileSource::from_json("distance,elevation\n0,1\n");
        assert!(matches!(result, Err(DemError::Json(_))));
    }

    #[test]
    fn test_fetch_returns_stored_profile() {
        let source = FileProfileSource::from_json("[[0, 1.0], [1000, 2.0]]").unwrap();
        let fetched = source
            .fetch_profile(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.009), 50)
            .unwrap();
        assert_eq!(&fetched, source.profile());
    }
}
