//! # lospath-link
//!
//! Terrain line-of-sight and link budget analysis between two ground points.
//!
//! Given an elevation profile along the path and two antenna heights, this
//! crate determines whether the straight ray between the antenna tops clears
//! the terrain (with an optional 4/3-earth curvature correction), classifies
//! the path into clearance-quality segments, and computes a free-space link
//! budget for a set of radio parameters.
//!
//! ## Features
//!
//! - **LOS Evaluation**: first obstruction along the path, if any
//! - **Constraint Segmentation**: contiguous bands of tight clearance,
//!   obstruction and severe obstruction with geographic positions
//! - **Link Budget**: free-space path loss, received signal and link margin
//! - **Provider Seam**: [`TerrainProfileProvider`] abstracts where terrain
//!   profiles come from
//!
//! ## Example
//!
//! ```
//! use lospath_link::{analyze_profile, AnalysisRequest, GeoPoint, RadioSpecs, TerrainProfile};
//!
//! let profile = TerrainProfile::from_elevations(10_000.0, &[120.0, 130.0, 150.0, 128.0, 110.0])?;
//! let request = AnalysisRequest::new(GeoPoint::new(45.50, -122.70), GeoPoint::new(45.59, -122.70))
//!     .with_heights(40.0, 40.0)
//!     .with_radio(RadioSpecs::default());
//!
//! let result = analyze_profile(&request, &profile)?;
//! assert!(result.los.is_clear);
//! assert!(result.link.is_some());
//! # Ok::<(), lospath_link::AnalysisError>(())
//! ```
//!
//! Every function here is pure: no state is kept between calls, so the same
//! inputs always produce the same outputs and calls may run concurrently.

mod analysis;
mod bands;
mod budget;
mod curvature;
mod error;
mod geo;
mod los;
mod profile;
mod segment;

pub use analysis::{
    analyze, analyze_profile, AnalysisRequest, PathAnalysis, TerrainProfileProvider,
    DEFAULT_PROFILE_INTERVALS,
};
pub use bands::{fill_bands, BandQuality, PathBand};
pub use budget::{
    compute_link_budget, free_space_path_loss_db, round2, LinkStatus, RadioLinkResult,
    RadioSpecs, FSPL_CONSTANT_DB,
};
pub use curvature::{CurvatureModel, DEFAULT_K_FACTOR};
pub use error::{AnalysisError, ProviderError, Result};
pub use geo::{haversine_distance, GeoPoint, EARTH_RADIUS_M};
pub use los::{evaluate, LosResult, ObstructionInfo};
pub use profile::{ProfileStats, SightLine, TerrainProfile, TerrainSample};
pub use segment::{
    segment, segment_with_thresholds, Classification, ClearanceThresholds, ConstraintPoint,
    ConstraintSegment,
};
