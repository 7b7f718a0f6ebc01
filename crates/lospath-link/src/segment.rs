//! Constraint segmentation.
//!
//! Walks the profile with the same sight line used by the LOS evaluator and
//! partitions it into contiguous runs of clearance quality. Samples with
//! ample clearance are not classified and never appear in the output.
//!
//! Adjacent runs share their transition edge: when a run closes at sample
//! `i`, sample `i` is appended as the closing segment's final point (carrying
//! the closing segment's classification) before the next run starts at `i`.
//! A segment therefore ends on the sample where the quality changes rather
//! than one sample short of it, and two touching polylines render without a
//! gap.

use crate::curvature::CurvatureModel;
use crate::error::Result;
use crate::geo::GeoPoint;
use crate::profile::{SightLine, TerrainSample};
use tracing::debug;

/// Clearance quality of a point on the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Classification {
    /// Clear, but with less margin than the comfort threshold.
    Clearance,
    /// Terrain penetrates the sight line.
    Obstruction,
    /// Terrain penetrates the sight line deeply.
    SevereObstruction,
}

impl Classification {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Clearance => "clearance",
            Classification::Obstruction => "obstruction",
            Classification::SevereObstruction => "severe_obstruction",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clearance thresholds (meters) used to classify samples.
///
/// All comparisons are strict: a clearance of exactly `-10` is an
/// obstruction, and exactly `0` is tight clearance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClearanceThresholds {
    /// Below this clearance a sample is a severe obstruction.
    pub severe_below_m: f64,
    /// Below this clearance a sample is an obstruction.
    pub obstruction_below_m: f64,
    /// Below this clearance a sample is tight clearance.
    pub clearance_below_m: f64,
}

impl Default for ClearanceThresholds {
    fn default() -> Self {
        Self {
            severe_below_m: -10.0,
            obstruction_below_m: 0.0,
            clearance_below_m: 10.0,
        }
    }
}

impl ClearanceThresholds {
    /// Classify a signed clearance value. `None` means the path is good here.
    pub fn classify(&self, clearance_m: f64) -> Option<Classification> {
        if clearance_m < self.severe_below_m {
            Some(Classification::SevereObstruction)
        } else if clearance_m < self.obstruction_below_m {
            Some(Classification::Obstruction)
        } else if clearance_m < self.clearance_below_m {
            Some(Classification::Clearance)
        } else {
            None
        }
    }
}

/// A classified point on the path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintPoint {
    /// Geographic position of the sample.
    pub position: GeoPoint,
    /// Distance from the start of the path (meters).
    pub distance_m: f64,
    /// Classification of the segment holding this point.
    pub classification: Classification,
    /// Signed clearance (meters); negative means terrain penetrates the line.
    pub clearance_m: f64,
    /// True for the transition sample a segment takes from the run that
    /// follows it. Its clearance belongs to that run's classification.
    #[cfg_attr(feature = "serde", serde(default))]
    pub shared_edge: bool,
}

/// A run of at least two points sharing one classification.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintSegment {
    /// Classification shared by every point.
    pub classification: Classification,
    /// Points in increasing distance order.
    pub points: Vec<ConstraintPoint>,
}

impl ConstraintSegment {
    fn open(first: ConstraintPoint) -> Self {
        Self {
            classification: first.classification,
            points: vec![first],
        }
    }

    /// Number of points in the segment.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the segment holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Distance of the first point (meters).
    pub fn start_distance_m(&self) -> f64 {
        self.points.first().map(|p| p.distance_m).unwrap_or(0.0)
    }

    /// Distance of the last point (meters).
    pub fn end_distance_m(&self) -> f64 {
        self.points.last().map(|p| p.distance_m).unwrap_or(0.0)
    }

    /// `(start, end)` distances covered by the segment.
    pub fn span(&self) -> (f64, f64) {
        (self.start_distance_m(), self.end_distance_m())
    }

    /// Smallest clearance among the segment's own samples (meters).
    ///
    /// The shared edge point is left out; its clearance was measured under
    /// the next run's classification.
    pub fn worst_clearance_m(&self) -> f64 {
        self.points
            .iter()
            .filter(|p| !p.shared_edge)
            .map(|p| p.clearance_m)
            .fold(f64::INFINITY, f64::min)
    }

    /// Positions of the points, ready to be drawn as a polyline.
    pub fn polyline(&self) -> Vec<GeoPoint> {
        self.points.iter().map(|p| p.position).collect()
    }
}

/// Partition the path into constraint segments using the default thresholds.
///
/// See [`segment_with_thresholds`].
pub fn segment(
    samples: &[TerrainSample],
    total_distance_m: f64,
    height_a_m: f64,
    height_b_m: f64,
    curvature: CurvatureModel,
    start: GeoPoint,
    end: GeoPoint,
) -> Result<Vec<ConstraintSegment>> {
    segment_with_thresholds(
        samples,
        total_distance_m,
        height_a_m,
        height_b_m,
        curvature,
        start,
        end,
        &ClearanceThresholds::default(),
    )
}

/// Partition the path into constraint segments.
///
/// Every sample, endpoints included, is classified by its clearance. Runs of
/// equal classification become segments; a run closes on the first sample
/// that differs (including a sample with no classification) and takes that
/// sample as its final point, flagged with
/// [`ConstraintPoint::shared_edge`]. Segments with fewer than two points are
/// dropped, which only happens to a single-sample run at the very end of the
/// profile.
///
/// A lone classified sample anywhere else is therefore still reported, as a
/// two-point segment ending on the following sample. Output is in scan order.
///
/// # Errors
///
/// [`AnalysisError::InvalidInput`](crate::AnalysisError::InvalidInput) if the
/// profile has fewer than two samples or `total_distance_m <= 0`.
#[allow(clippy::too_many_arguments)]
pub fn segment_with_thresholds(
    samples: &[TerrainSample],
    total_distance_m: f64,
    height_a_m: f64,
    height_b_m: f64,
    curvature: CurvatureModel,
    start: GeoPoint,
    end: GeoPoint,
    thresholds: &ClearanceThresholds,
) -> Result<Vec<ConstraintSegment>> {
    let line = SightLine::new(samples, total_distance_m, height_a_m, height_b_m, curvature)?;

    let mut segments = Vec::new();
    let mut current: Option<ConstraintSegment> = None;

    for sample in samples {
        let clearance_m = line.clearance(sample);
        let classification = thresholds.classify(clearance_m);
        let point_as = |classification, shared_edge| ConstraintPoint {
            position: start.lerp(&end, line.fraction(sample.distance_m)),
            distance_m: sample.distance_m,
            classification,
            clearance_m,
            shared_edge,
        };

        match current.as_mut() {
            Some(open) if classification == Some(open.classification) => {
                open.points.push(point_as(open.classification, false));
            }
            _ => {
                if let Some(mut closing) = current.take() {
                    closing.points.push(point_as(closing.classification, true));
                    keep_drawable(&mut segments, closing);
                }
                current = classification.map(|c| ConstraintSegment::open(point_as(c, false)));
            }
        }
    }

    if let Some(trailing) = current {
        keep_drawable(&mut segments, trailing);
    }

    debug!(
        "Segmented {} samples into {} constraint segments",
        samples.len(),
        segments.len()
    );
    Ok(segments)
}

fn keep_drawable(segments: &mut Vec<ConstraintSegment>, segment: ConstraintSegment) {
    if segment.len() >= 2 {
        segments.push(segment);
    }
}
