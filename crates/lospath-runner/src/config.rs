//! YAML analysis configuration.
//!
//! Every field is optional in the file; anything missing falls back to the
//! engine defaults, and command-line flags are applied on top.
//!
//! ```yaml
//! start: { lat: 47.6062, lon: -122.3321 }
//! end: { lat: 47.6205, lon: -122.3493 }
//! height_a_m: 15
//! height_b_m: 8
//! intervals: 200
//! curvature:
//!   enabled: true
//!   k_factor: 1.3333
//! radio:
//!   frequency_mhz: 5800
//!   tx_power_dbm: 20
//!   tx_antenna_gain_dbi: 12
//!   rx_antenna_gain_dbi: 12
//!   rx_sensitivity_dbm: -85
//! elevation:
//!   service_url: https://api.open-elevation.com
//!   batch_size: 100
//!   timeout_secs: 30
//! ```

use crate::{Result, RunnerError};
use lospath_dem::{DEFAULT_BATCH_SIZE, DEFAULT_SERVICE_URL};
use lospath_link::{
    AnalysisRequest, ClearanceThresholds, CurvatureModel, GeoPoint, RadioSpecs,
    DEFAULT_PROFILE_INTERVALS,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where terrain profiles come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevationConfig {
    /// Base URL of an Open-Elevation compatible service.
    pub service_url: String,
    /// Locations per request.
    pub batch_size: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Read the profile from this JSON file instead of the service.
    pub profile_file: Option<PathBuf>,
}

impl Default for ElevationConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            timeout_secs: 30,
            profile_file: None,
        }
    }
}

/// Complete analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// First endpoint.
    pub start: Option<GeoPoint>,
    /// Second endpoint.
    pub end: Option<GeoPoint>,
    /// Antenna A height above ground (meters).
    pub height_a_m: f64,
    /// Antenna B height above ground (meters).
    pub height_b_m: f64,
    /// Number of profile intervals.
    pub intervals: usize,
    /// Earth curvature correction.
    pub curvature: CurvatureModel,
    /// Clearance classification thresholds.
    pub thresholds: ClearanceThresholds,
    /// Radio specs; the link budget is computed only when present.
    pub radio: Option<RadioSpecs>,
    /// Terrain source settings.
    pub elevation: ElevationConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            height_a_m: 10.0,
            height_b_m: 10.0,
            intervals: DEFAULT_PROFILE_INTERVALS,
            curvature: CurvatureModel::default(),
            thresholds: ClearanceThresholds::default(),
            radio: None,
            elevation: ElevationConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load a configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&contents)
    }

    /// Parse a configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Build the engine request. Both endpoints must be set.
    pub fn to_request(&self) -> Result<AnalysisRequest> {
        let start = self
            .start
            .ok_or_else(|| RunnerError::Config("start point is not set".to_string()))?;
        let end = self
            .end
            .ok_or_else(|| RunnerError::Config("end point is not set".to_string()))?;

        Ok(AnalysisRequest {
            start,
            end,
            height_a_m: self.height_a_m,
            height_b_m: self.height_b_m,
            curvature: self.curvature,
            thresholds: self.thresholds,
            intervals: self.intervals,
            radio: self.radio,
        })
    }
}

/// Parse `"lat,lon"` into a coordinate.
pub fn parse_geo_point(value: &str) -> std::result::Result<GeoPoint, String> {
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| format!("expected \"lat,lon\", got \"{}\"", value))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude \"{}\"", lat.trim()))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude \"{}\"", lon.trim()))?;

    let point = GeoPoint::new(lat, lon);
    if !point.is_valid() {
        return Err(format!("coordinate out of range: {}", value));
    }
    Ok(point)
}
