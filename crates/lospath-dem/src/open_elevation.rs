//! Client for Open-Elevation compatible lookup services.
//!
//! The service takes a batch of coordinates and answers with one elevation
//! per coordinate, in request order:
//!
//! ```text
//! POST {base}/api/v1/lookup
//! {"locations": [{"latitude": 47.6, "longitude": -122.3}, ...]}
//!
//! {"results": [{"latitude": 47.6, "longitude": -122.3, "elevation": 56.0}, ...]}
//! ```
//!
//! Long profiles are split into batches so a single request stays within
//! the service's payload limits.

use crate::sampling::{sample_points, PathPoint};
use crate::{DemError, Result};
use lospath_link::{GeoPoint, TerrainProfile, TerrainProfileProvider};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Public Open-Elevation instance.
pub const DEFAULT_SERVICE_URL: &str = "https://api.open-elevation.com";

/// Maximum number of locations sent in one request.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct LookupRequest {
    locations: Vec<Location>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Location {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    #[allow(dead_code)]
    latitude: f64,
    #[allow(dead_code)]
    longitude: f64,
    elevation: Option<f64>,
}

/// Request statistics for a client session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryStats {
    /// Number of HTTP requests sent.
    pub requests_sent: usize,
    /// Number of locations looked up.
    pub locations_queried: usize,
}

/// Blocking HTTP terrain profile provider.
pub struct OpenElevationClient {
    base_url: String,
    batch_size: usize,
    client: reqwest::blocking::Client,
    requests_sent: AtomicUsize,
    locations_queried: AtomicUsize,
}

impl std::fmt::Debug for OpenElevationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenElevationClient")
            .field("base_url", &self.base_url)
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

impl OpenElevationClient {
    /// Create a client for the public service.
    pub fn new() -> Result<Self> {
        Self::with_url(DEFAULT_SERVICE_URL)
    }

    /// Create a client for a specific service base URL.
    pub fn with_url(base_url: impl Into<String>) -> Result<Self> {
        Self::with_options(base_url, DEFAULT_BATCH_SIZE, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit batch size and timeout.
    pub fn with_options(
        base_url: impl Into<String>,
        batch_size: usize,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            batch_size: batch_size.max(1),
            client,
            requests_sent: AtomicUsize::new(0),
            locations_queried: AtomicUsize::new(0),
        })
    }

    /// Service base URL (without trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get request statistics for this session.
    pub fn query_stats(&self) -> QueryStats {
        QueryStats {
            requests_sent: self.requests_sent.load(Ordering::Relaxed),
            locations_queried: self.locations_queried.load(Ordering::Relaxed),
        }
    }

    fn lookup_url(&self) -> String {
        format!("{}/api/v1/lookup", self.base_url)
    }

    /// Look up elevations for a batch of points, in order.
    fn lookup(&self, batch: &[PathPoint]) -> Result<Vec<f64>> {
        let request = LookupRequest {
            locations: batch
                .iter()
                .map(|p| Location {
                    latitude: p.position.lat,
                    longitude: p.position.lon,
                })
                .collect(),
        };

        trace!("POST {} with {} locations", self.lookup_url(), batch.len());
        let response = self.client.post(self.lookup_url()).json(&request).send()?;
        self.requests_sent.fetch_add(1, Ordering::Relaxed);
        self.locations_queried.fetch_add(batch.len(), Ordering::Relaxed);

        let status = response.status();
        if !status.is_success() {
            let reason = response
                .text()
                .ok()
                .filter(|body| !body.trim().is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
            warn!("Elevation service returned HTTP {}", status.as_u16());
            return Err(DemError::ServiceStatus {
                status: status.as_u16(),
                reason,
            });
        }

        let body = response.text()?;
        parse_lookup_response(&body, batch)
    }
}

/// Decode a lookup response and match it against the requested points.
pub(crate) fn parse_lookup_response(body: &str, requested: &[PathPoint]) -> Result<Vec<f64>> {
    let response: LookupResponse = serde_json::from_str(body)?;

    if response.results.is_empty() {
        return Err(DemError::EmptyResult);
    }
    if response.results.len() != requested.len() {
        return Err(DemError::MalformedResponse(format!(
            "expected {} elevations, got {}",
            requested.len(),
            response.results.len()
        )));
    }

    response
        .results
        .iter()
        .zip(requested)
        .map(|(result, point)| match result.elevation {
            Some(elevation) if elevation.is_finite() => Ok(elevation),
            _ => Err(DemError::NoData {
                lat: point.position.lat,
                lon: point.position.lon,
            }),
        })
        .collect()
}

impl TerrainProfileProvider for OpenElevationClient {
    type Error = DemError;

    fn fetch_profile(&self, start: GeoPoint, end: GeoPoint, intervals: usize) -> Result<TerrainProfile> {
        let points = sample_points(start, end, intervals)?;

        let mut elevations = Vec::with_capacity(points.len());
        for batch in points.chunks(self.batch_size) {
            elevations.extend(self.lookup(batch)?);
        }

        debug!(
            "Fetched {} elevations from {} ({} requests so far)",
            elevations.len(),
            self.base_url,
            self.query_stats().requests_sent
        );

        let profile = TerrainProfile::from_pairs(
            points
                .iter()
                .zip(elevations)
                .map(|(p, elevation)| (p.distance_m, elevation)),
        )?;
        Ok(profile)
    }
}
