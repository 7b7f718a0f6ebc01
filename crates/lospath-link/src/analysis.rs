//! Whole-path analysis: LOS, constraint segments and optional link budget.

use crate::bands::{fill_bands, PathBand};
use crate::budget::{compute_link_budget, RadioLinkResult, RadioSpecs};
use crate::curvature::CurvatureModel;
use crate::error::{AnalysisError, Result};
use crate::geo::GeoPoint;
use crate::los::{evaluate, LosResult};
use crate::profile::{ProfileStats, TerrainProfile};
use crate::segment::{segment_with_thresholds, ClearanceThresholds, ConstraintSegment};
use tracing::{debug, info};

/// Default number of intervals requested from the terrain provider.
pub const DEFAULT_PROFILE_INTERVALS: usize = 100;

/// Source of terrain profiles between two endpoints.
///
/// Implementations return `intervals + 1` samples evenly spaced by fraction
/// along the path, the first at distance 0 and the last at the great-circle
/// distance between the endpoints.
pub trait TerrainProfileProvider {
    /// Error reported when a profile cannot be produced.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the elevation profile between `start` and `end`.
    fn fetch_profile(
        &self,
        start: GeoPoint,
        end: GeoPoint,
        intervals: usize,
    ) -> std::result::Result<TerrainProfile, Self::Error>;
}

impl<P: TerrainProfileProvider + ?Sized> TerrainProfileProvider for &P {
    type Error = P::Error;

    fn fetch_profile(
        &self,
        start: GeoPoint,
        end: GeoPoint,
        intervals: usize,
    ) -> std::result::Result<TerrainProfile, Self::Error> {
        (**self).fetch_profile(start, end, intervals)
    }
}

/// Everything needed to analyze one path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisRequest {
    /// First endpoint (antenna A).
    pub start: GeoPoint,
    /// Second endpoint (antenna B).
    pub end: GeoPoint,
    /// Antenna A height above ground (meters).
    pub height_a_m: f64,
    /// Antenna B height above ground (meters).
    pub height_b_m: f64,
    /// Earth curvature correction.
    pub curvature: CurvatureModel,
    /// Clearance classification thresholds.
    pub thresholds: ClearanceThresholds,
    /// Number of intervals to request from the provider.
    pub intervals: usize,
    /// Radio equipment; `None` disables the link budget.
    pub radio: Option<RadioSpecs>,
}

impl AnalysisRequest {
    /// A request with default settings between two endpoints.
    pub fn new(start: GeoPoint, end: GeoPoint) -> Self {
        Self {
            start,
            end,
            height_a_m: 10.0,
            height_b_m: 10.0,
            curvature: CurvatureModel::default(),
            thresholds: ClearanceThresholds::default(),
            intervals: DEFAULT_PROFILE_INTERVALS,
            radio: None,
        }
    }

    /// Set both antenna heights.
    pub fn with_heights(mut self, height_a_m: f64, height_b_m: f64) -> Self {
        self.height_a_m = height_a_m;
        self.height_b_m = height_b_m;
        self
    }

    /// Enable the link budget with the given radio specs.
    pub fn with_radio(mut self, radio: RadioSpecs) -> Self {
        self.radio = Some(radio);
        self
    }

    /// Set the curvature model.
    pub fn with_curvature(mut self, curvature: CurvatureModel) -> Self {
        self.curvature = curvature;
        self
    }

    fn validate(&self) -> Result<()> {
        if !self.start.is_valid() || !self.end.is_valid() {
            return Err(AnalysisError::invalid(format!(
                "endpoints out of range: {} -> {}",
                self.start, self.end
            )));
        }
        if self.intervals == 0 {
            return Err(AnalysisError::invalid("at least one profile interval is required"));
        }
        Ok(())
    }
}

/// Full result of a path analysis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathAnalysis {
    /// Path length in meters.
    pub total_distance_m: f64,
    /// Terrain statistics along the path.
    pub terrain: ProfileStats,
    /// Line-of-sight verdict.
    pub los: LosResult,
    /// Constrained stretches in scan order; empty for an unconstrained path.
    pub segments: Vec<ConstraintSegment>,
    /// Gap-free partition of the path for display.
    pub bands: Vec<PathBand>,
    /// Link budget; present only if radio analysis is enabled and the path
    /// is clear.
    pub link: Option<RadioLinkResult>,
}

/// Analyze a path whose profile is already at hand.
pub fn analyze_profile(request: &AnalysisRequest, profile: &TerrainProfile) -> Result<PathAnalysis> {
    let samples = profile.samples();
    let total_distance_m = profile.total_distance_m();

    let los = evaluate(
        samples,
        total_distance_m,
        request.height_a_m,
        request.height_b_m,
        request.curvature,
    )?;
    let segments = segment_with_thresholds(
        samples,
        total_distance_m,
        request.height_a_m,
        request.height_b_m,
        request.curvature,
        request.start,
        request.end,
        &request.thresholds,
    )?;
    let bands = fill_bands(&segments, total_distance_m);

    let link = match request.radio {
        Some(ref specs) if los.is_clear => Some(compute_link_budget(total_distance_m, specs)?),
        Some(_) => {
            debug!("Skipping link budget: path is obstructed");
            None
        }
        None => None,
    };

    Ok(PathAnalysis {
        total_distance_m,
        terrain: profile.stats(),
        los,
        segments,
        bands,
        link,
    })
}

/// Fetch the profile from `provider` and analyze the path.
///
/// Provider failures surface as [`AnalysisError::UpstreamFailure`]; they are
/// never mistaken for a clear path. No partial result is returned.
pub fn analyze<P>(request: &AnalysisRequest, provider: &P) -> Result<PathAnalysis>
where
    P: TerrainProfileProvider + ?Sized,
{
    request.validate()?;

    let profile = provider
        .fetch_profile(request.start, request.end, request.intervals)
        .map_err(|e| AnalysisError::UpstreamFailure(Box::new(e)))?;

    info!(
        "Analyzing {:.0} m path {} -> {} over {} samples",
        profile.total_distance_m(),
        request.start,
        request.end,
        profile.len()
    );

    analyze_profile(request, &profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bands::BandQuality;
    use crate::segment::Classification;
    use std::fmt;

    #[derive(Debug)]
    struct Offline;

    impl fmt::Display for Offline {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("elevation service unreachable")
        }
    }

    impl std::error::Error for Offline {}

    struct FailingProvider;

    impl TerrainProfileProvider for FailingProvider {
        type Error = Offline;

        fn fetch_profile(&self, _: GeoPoint, _: GeoPoint, _: usize) -> std::result::Result<TerrainProfile, Offline> {
            Err(Offline)
        }
    }

    struct FixedProvider(TerrainProfile);

    impl TerrainProfileProvider for FixedProvider {
        type Error = Offline;

        fn fetch_profile(&self, _: GeoPoint, _: GeoPoint, _: usize) -> std::result::Result<TerrainProfile, Offline> {
            Ok(self.0.clone())
        }
    }

    fn request() -> AnalysisRequest {
        AnalysisRequest::new(GeoPoint::new(45.0, -122.0), GeoPoint::new(45.0, -121.9))
    }

    #[test]
    fn test_upstream_failure_is_not_clear() {
        let err = analyze(&request(), &FailingProvider).unwrap_err();
        assert!(err.is_upstream());
        assert!(err.to_string().contains("unreachable"));
    }

    #[test]
    fn test_link_budget_only_when_clear() {
        let flat = TerrainProfile::from_elevations(10_000.0, &[0.0; 11]).unwrap();
        let req = request()
            .with_heights(30.0, 30.0)
            .with_radio(RadioSpecs::default());

        let result = analyze(&req, &FixedProvider(flat)).unwrap();
        assert!(result.los.is_clear);
        let link = result.link.unwrap();
        assert_eq!(link.path_loss_db, 127.71);

        let ridge = TerrainProfile::from_elevations(10_000.0, &[0.0, 0.0, 0.0, 0.0, 0.0, 200.0, 0.0, 0.0, 0.0, 0.0, 0.0])
            .unwrap();
        let result = analyze(&req, &FixedProvider(ridge)).unwrap();
        assert!(!result.los.is_clear);
        assert!(result.link.is_none());
    }

    #[test]
    fn test_no_link_budget_without_radio() {
        let flat = TerrainProfile::from_elevations(10_000.0, &[0.0; 11]).unwrap();
        let result = analyze(&request().with_heights(30.0, 30.0), &FixedProvider(flat)).unwrap();
        assert!(result.link.is_none());
    }

    #[test]
    fn test_unconstrained_path_has_one_good_band() {
        let flat = TerrainProfile::from_elevations(1_000.0, &[0.0; 5]).unwrap();
        let result = analyze_profile(&request().with_heights(50.0, 50.0), &flat).unwrap();

        assert!(result.segments.is_empty());
        assert_eq!(result.bands.len(), 1);
        assert_eq!(result.bands[0].quality, BandQuality::Good);
    }

    #[test]
    fn test_obstructed_path_reports_segments() {
        let ridge = TerrainProfile::from_pairs([(0.0, 0.0), (500.0, 100.0), (1000.0, 0.0)]).unwrap();
        let req = request()
            .with_heights(1.0, 1.0)
            .with_curvature(CurvatureModel::disabled());
        let result = analyze_profile(&req, &ridge).unwrap();

        assert_eq!(result.los.obstruction.unwrap().distance_m, 500.0);
        // Endpoints have 1 m clearance, the ridge is 99 m deep.
        let kinds: Vec<Classification> = result.segments.iter().map(|s| s.classification).collect();
        assert_eq!(
            kinds,
            vec![Classification::Clearance, Classification::SevereObstruction]
        );
    }

    #[test]
    fn test_invalid_endpoints_are_rejected() {
        let flat = TerrainProfile::from_elevations(1_000.0, &[0.0; 5]).unwrap();
        let mut req = request();
        req.start = GeoPoint::new(120.0, 0.0);
        let err = analyze(&req, &FixedProvider(flat)).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)));
    }
}
