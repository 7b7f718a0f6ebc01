//! Line-of-sight evaluation over a terrain profile.

use crate::curvature::CurvatureModel;
use crate::error::Result;
use crate::profile::{SightLine, TerrainSample};
use tracing::{debug, trace};

/// Where the sight line is blocked.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstructionInfo {
    /// Distance from the start of the path (meters).
    pub distance_m: f64,
    /// Terrain elevation plus curvature bulge at this point (meters).
    pub effective_terrain_height_m: f64,
    /// Height of the sight line at this point (meters).
    pub line_of_sight_height_m: f64,
}

impl ObstructionInfo {
    /// How far the terrain rises above the sight line (meters, positive).
    pub fn penetration_m(&self) -> f64 {
        self.effective_terrain_height_m - self.line_of_sight_height_m
    }
}

/// Outcome of a line-of-sight evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LosResult {
    /// True if no interior sample rises above the sight line.
    pub is_clear: bool,
    /// The first obstruction found; present iff `is_clear` is false.
    pub obstruction: Option<ObstructionInfo>,
}

impl LosResult {
    /// A clear path.
    pub fn clear() -> Self {
        Self {
            is_clear: true,
            obstruction: None,
        }
    }

    /// An obstructed path.
    pub fn obstructed(obstruction: ObstructionInfo) -> Self {
        Self {
            is_clear: false,
            obstruction: Some(obstruction),
        }
    }
}

/// Determine whether the sight line between the two antenna tops clears the
/// effective terrain at every interior sample.
///
/// Samples are scanned in increasing distance and the *first* violation is
/// reported, not the deepest one. Endpoints are never tested, so a profile of
/// exactly two samples is always clear.
///
/// # Errors
///
/// [`AnalysisError::InvalidInput`](crate::AnalysisError::InvalidInput) if the
/// profile has fewer than two samples or `total_distance_m <= 0`.
pub fn evaluate(
    samples: &[TerrainSample],
    total_distance_m: f64,
    height_a_m: f64,
    height_b_m: f64,
    curvature: CurvatureModel,
) -> Result<LosResult> {
    let line = SightLine::new(samples, total_distance_m, height_a_m, height_b_m, curvature)?;

    let interior = &samples[1..samples.len() - 1];
    for sample in interior {
        let los_h = line.los_height(sample.distance_m);
        let terrain_h = line.effective_terrain_height(sample);
        trace!(
            "LOS sample at {:.1}m: terrain {:.2}m, line {:.2}m",
            sample.distance_m,
            terrain_h,
            los_h
        );

        if terrain_h > los_h {
            debug!(
                "Path obstructed at {:.1}m ({:.2}m above sight line)",
                sample.distance_m,
                terrain_h - los_h
            );
            return Ok(LosResult::obstructed(ObstructionInfo {
                distance_m: sample.distance_m,
                effective_terrain_height_m: terrain_h,
                line_of_sight_height_m: los_h,
            }));
        }
    }

    debug!("Path clear over {} interior samples", interior.len());
    Ok(LosResult::clear())
}
