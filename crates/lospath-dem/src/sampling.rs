//! Sampling points along the path between two endpoints.

use crate::{DemError, Result};
use lospath_link::GeoPoint;

/// A position to query, with its distance from the start of the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    /// Distance from the start (meters).
    pub distance_m: f64,
    /// Coordinate to query.
    pub position: GeoPoint,
}

/// Split the path into `intervals` equal fractions and return the
/// `intervals + 1` points at their boundaries.
///
/// Coordinates are interpolated linearly in lat/lon; distances are the
/// matching fraction of the haversine distance, so the first point sits at
/// 0 m and the last at the great-circle distance between the endpoints.
pub fn sample_points(start: GeoPoint, end: GeoPoint, intervals: usize) -> Result<Vec<PathPoint>> {
    if intervals == 0 {
        return Err(DemError::InvalidIntervals(intervals));
    }

    let total_distance = start.distance_to(&end);

    Ok((0..=intervals)
        .map(|i| {
            let t = i as f64 / intervals as f64;
            PathPoint {
                distance_m: t * total_distance,
                position: start.lerp(&end, t),
            }
        })
        .collect())
}
