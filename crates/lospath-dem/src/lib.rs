//! # lospath-dem
//!
//! Terrain profile providers for `lospath-link`.
//!
//! This crate implements [`TerrainProfileProvider`](lospath_link::TerrainProfileProvider)
//! for two sources:
//! - An Open-Elevation compatible HTTP lookup service ([`OpenElevationClient`])
//! - A profile stored on disk as JSON ([`FileProfileSource`])
//!
//! ## Examples
//!
//! ```no_run
//! use lospath_dem::OpenElevationClient;
//! use lospath_link::{analyze, AnalysisRequest, GeoPoint};
//!
//! let client = OpenElevationClient::new()?;
//! let request = AnalysisRequest::new(
//!     GeoPoint::new(47.6062, -122.3321),
//!     GeoPoint::new(47.6205, -122.3493),
//! );
//! let result = analyze(&request, &client)?;
//! println!("Clear: {}", result.los.is_clear);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod file_source;
mod open_elevation;
mod sampling;

pub use error::DemError;
pub use file_source::FileProfileSource;
pub use open_elevation::{
    OpenElevationClient, QueryStats, DEFAULT_BATCH_SIZE, DEFAULT_SERVICE_URL, DEFAULT_TIMEOUT,
};
pub use sampling::{sample_points, PathPoint};

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, DemError>;
