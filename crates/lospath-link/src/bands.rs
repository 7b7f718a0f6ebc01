//! Gap-free partition of the path for display.
//!
//! The segmenter only reports constrained stretches. Charts and maps usually
//! want the whole path colored, so [`fill_bands`] orders the segments and
//! fills every uncovered span with an implicit good band.

use crate::segment::{Classification, ConstraintSegment};

/// Quality of a band on the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BandQuality {
    /// Ample clearance; nothing reported by the segmenter.
    Good,
    /// Covered by a constraint segment.
    Constrained(Classification),
}

/// A contiguous stretch of the path with one quality.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathBand {
    /// Band quality.
    pub quality: BandQuality,
    /// Start distance (meters).
    pub start_m: f64,
    /// End distance (meters).
    pub end_m: f64,
    /// Worst clearance inside a constrained band; `None` for good bands.
    pub worst_clearance_m: Option<f64>,
}

impl PathBand {
    /// Length of the band (meters).
    pub fn length_m(&self) -> f64 {
        self.end_m - self.start_m
    }
}

/// Sort segments by start distance and fill the gaps between them (and
/// towards both ends of the path) with [`BandQuality::Good`] bands.
///
/// Segments that share a boundary point produce touching bands with no good
/// band in between.
pub fn fill_bands(segments: &[ConstraintSegment], total_distance_m: f64) -> Vec<PathBand> {
    let mut ordered: Vec<&ConstraintSegment> = segments.iter().collect();
    ordered.sort_by(|a, b| a.start_distance_m().total_cmp(&b.start_distance_m()));

    let mut bands = Vec::with_capacity(ordered.len() * 2 + 1);
    let mut cursor = 0.0;

    for segment in ordered {
        let (start, end) = segment.span();
        if start > cursor {
            bands.push(good_band(cursor, start));
        }
        bands.push(PathBand {
            quality: BandQuality::Constrained(segment.classification),
            start_m: start,
            end_m: end,
            worst_clearance_m: Some(segment.worst_clearance_m()),
        });
        cursor = cursor.max(end);
    }

    if total_distance_m > cursor {
        bands.push(good_band(cursor, total_distance_m));
    }

    bands
}

fn good_band(start_m: f64, end_m: f64) -> PathBand {
    PathBand {
        quality: BandQuality::Good,
        start_m,
        end_m,
        worst_clearance_m: None,
    }
}
