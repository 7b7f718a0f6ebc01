//! Error types for the terrain provider crate.

use lospath_link::AnalysisError;
use thiserror::Error;

/// Errors that can occur while producing a terrain profile.
#[derive(Debug, Error)]
pub enum DemError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request error when querying the elevation service.
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON could not be parsed.
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    /// The elevation service answered with an error status.
    #[error("Elevation service returned HTTP {status}: {reason}")]
    ServiceStatus {
        /// HTTP status code.
        status: u16,
        /// Response body or status text.
        reason: String,
    },

    /// The service answered, but the payload does not match the request.
    #[error("Malformed elevation response: {0}")]
    MalformedResponse(String),

    /// The service returned no elevations at all.
    #[error("Elevation service returned an empty result set")]
    EmptyResult,

    /// No elevation value available for a coordinate.
    #[error("No elevation data at coordinate ({lat}, {lon})")]
    NoData {
        /// Requested latitude.
        lat: f64,
        /// Requested longitude.
        lon: f64,
    },

    /// Invalid number of profile intervals.
    #[error("Invalid interval count {0} (must be at least 1)")]
    InvalidIntervals(usize),

    /// The samples do not form a valid profile.
    #[error("Invalid profile: {0}")]
    InvalidProfile(#[from] AnalysisError),
}
