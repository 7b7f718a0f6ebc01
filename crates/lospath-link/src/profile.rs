//! Terrain profiles and the sight line drawn over them.

use crate::curvature::CurvatureModel;
use crate::error::{AnalysisError, Result};

/// One elevation sample along the path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainSample {
    /// Distance from the start of the path (meters).
    pub distance_m: f64,
    /// Elevation above sea level (meters).
    pub elevation_m: f64,
}

impl TerrainSample {
    /// Create a new sample.
    pub fn new(distance_m: f64, elevation_m: f64) -> Self {
        Self {
            distance_m,
            elevation_m,
        }
    }
}

/// Summary statistics about the terrain along the path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileStats {
    /// Number of elevation samples.
    pub sample_count: usize,
    /// Mean spacing between samples (meters).
    pub resolution_m: f64,
    /// Minimum elevation along path (meters).
    pub min_elevation: f64,
    /// Maximum elevation along path (meters).
    pub max_elevation: f64,
    /// Mean elevation along path (meters).
    pub mean_elevation: f64,
    /// Terrain irregularity (max - min) in meters.
    pub delta_h: f64,
}

/// A validated, ordered terrain profile.
///
/// Invariants: at least two samples, all values finite, distances start at
/// or above zero and never decrease. The total path distance is the distance
/// of the last sample. Deserialization goes through the same validation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawProfile"))]
pub struct TerrainProfile {
    samples: Vec<TerrainSample>,
}

/// Unchecked wire form of [`TerrainProfile`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawProfile {
    samples: Vec<TerrainSample>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawProfile> for TerrainProfile {
    type Error = AnalysisError;

    fn try_from(raw: RawProfile) -> Result<Self> {
        Self::new(raw.samples)
    }
}

impl TerrainProfile {
    /// Build a profile from samples, validating the invariants.
    pub fn new(samples: Vec<TerrainSample>) -> Result<Self> {
        validate_samples(&samples)?;
        Ok(Self { samples })
    }

    /// Build a profile from `(distance, elevation)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(d, e)| TerrainSample::new(d, e))
                .collect(),
        )
    }

    /// Build a profile of evenly spaced samples from a list of elevations.
    pub fn from_elevations(total_distance_m: f64, elevations: &[f64]) -> Result<Self> {
        if elevations.len() < 2 {
            return Err(AnalysisError::invalid(format!(
                "profile needs at least 2 samples, got {}",
                elevations.len()
            )));
        }
        let last = (elevations.len() - 1) as f64;
        Self::from_pairs(
            elevations
                .iter()
                .enumerate()
                .map(|(i, &e)| (total_distance_m * i as f64 / last, e)),
        )
    }

    /// The samples, in increasing distance order.
    pub fn samples(&self) -> &[TerrainSample] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; a valid profile holds at least two samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Total path distance in meters.
    pub fn total_distance_m(&self) -> f64 {
        self.samples.last().map(|s| s.distance_m).unwrap_or(0.0)
    }

    /// Compute terrain statistics for the profile.
    pub fn stats(&self) -> ProfileStats {
        let elevations = self.samples.iter().map(|s| s.elevation_m);
        let min_elevation = elevations.clone().fold(f64::INFINITY, f64::min);
        let max_elevation = elevations.clone().fold(f64::NEG_INFINITY, f64::max);
        let mean_elevation = elevations.sum::<f64>() / self.samples.len() as f64;

        ProfileStats {
            sample_count: self.samples.len(),
            resolution_m: self.total_distance_m() / (self.samples.len() - 1) as f64,
            min_elevation,
            max_elevation,
            mean_elevation,
            delta_h: max_elevation - min_elevation,
        }
    }
}

pub(crate) fn validate_samples(samples: &[TerrainSample]) -> Result<()> {
    if samples.len() < 2 {
        return Err(AnalysisError::invalid(format!(
            "profile needs at least 2 samples, got {}",
            samples.len()
        )));
    }

    let mut previous = 0.0;
    for (i, sample) in samples.iter().enumerate() {
        if !sample.distance_m.is_finite() || !sample.elevation_m.is_finite() {
            return Err(AnalysisError::invalid(format!(
                "non-finite value at sample {}: ({}, {})",
                i, sample.distance_m, sample.elevation_m
            )));
        }
        if sample.distance_m < previous {
            return Err(AnalysisError::invalid(format!(
                "distance decreases at sample {}: {} < {}",
                i, sample.distance_m, previous
            )));
        }
        previous = sample.distance_m;
    }

    Ok(())
}

/// The straight ray between the two antenna tops, evaluated over terrain.
///
/// Both the LOS evaluator and the constraint segmenter go through this type so
/// that line-of-sight height and effective terrain height are always computed
/// the same way for the same sample.
#[derive(Debug, Clone, Copy)]
pub struct SightLine {
    start_height_m: f64,
    end_height_m: f64,
    total_distance_m: f64,
    curvature: CurvatureModel,
}

impl SightLine {
    /// Anchor the sight line on the first and last samples of a profile.
    ///
    /// The samples are checked like [`TerrainProfile::new`] does, so raw
    /// slices with non-finite values or decreasing distances are rejected.
    pub fn new(
        samples: &[TerrainSample],
        total_distance_m: f64,
        height_a_m: f64,
        height_b_m: f64,
        curvature: CurvatureModel,
    ) -> Result<Self> {
        validate_samples(samples)?;
        let (first, last) = match (samples.first(), samples.last()) {
            (Some(first), Some(last)) if samples.len() >= 2 => (first, last),
            _ => {
                return Err(AnalysisError::invalid(format!(
                    "profile needs at least 2 samples, got {}",
                    samples.len()
                )))
            }
        };
        if !total_distance_m.is_finite() || total_distance_m <= 0.0 {
            return Err(AnalysisError::invalid(format!(
                "total distance must be positive, got {}",
                total_distance_m
            )));
        }
        if curvature.enabled && !(curvature.k_factor.is_finite() && curvature.k_factor > 0.0) {
            return Err(AnalysisError::invalid(format!(
                "k-factor must be positive, got {}",
                curvature.k_factor
            )));
        }
        if !height_a_m.is_finite() || !height_b_m.is_finite() {
            return Err(AnalysisError::invalid(format!(
                "antenna heights must be finite, got {} and {}",
                height_a_m, height_b_m
            )));
        }

        Ok(Self {
            start_height_m: first.elevation_m + height_a_m,
            end_height_m: last.elevation_m + height_b_m,
            total_distance_m,
            curvature,
        })
    }

    /// Fraction of the path covered at `distance_m`.
    pub fn fraction(&self, distance_m: f64) -> f64 {
        distance_m / self.total_distance_m
    }

    /// Height of the sight line above sea level at `distance_m`.
    pub fn los_height(&self, distance_m: f64) -> f64 {
        self.start_height_m
            + (self.end_height_m - self.start_height_m) * self.fraction(distance_m)
    }

    /// Terrain elevation plus curvature bulge at a sample.
    pub fn effective_terrain_height(&self, sample: &TerrainSample) -> f64 {
        sample.elevation_m
            + self
                .curvature
                .curvature_height(sample.distance_m, self.total_distance_m)
    }

    /// Signed vertical gap between sight line and effective terrain.
    /// Negative means the terrain penetrates the line.
    pub fn clearance(&self, sample: &TerrainSample) -> f64 {
        self.los_height(sample.distance_m) - self.effective_terrain_height(sample)
    }
}
