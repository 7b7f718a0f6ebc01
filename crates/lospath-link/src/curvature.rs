//! Earth curvature model.
//!
//! Standard atmospheric refraction bends the ray path slightly towards the
//! ground. It is approximated here by inflating the earth's radius by a
//! k-factor (4/3 by default), which makes the terrain "bulge" between the two
//! endpoints smaller than it would be geometrically.

use crate::geo::EARTH_RADIUS_M;

/// Default k-factor for standard atmosphere.
pub const DEFAULT_K_FACTOR: f64 = 4.0 / 3.0;

/// Earth curvature correction used by both the LOS evaluator and the
/// constraint segmenter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CurvatureModel {
    /// Whether the curvature bulge is added to terrain at all.
    pub enabled: bool,
    /// Effective earth radius multiplier.
    pub k_factor: f64,
}

impl Default for CurvatureModel {
    fn default() -> Self {
        Self {
            enabled: true,
            k_factor: DEFAULT_K_FACTOR,
        }
    }
}

impl CurvatureModel {
    /// A model that always returns zero bulge.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// A model with the default k-factor, enabled or not.
    pub fn with_enabled(enabled: bool) -> Self {
        Self {
            enabled,
            ..Default::default()
        }
    }

    /// Effective earth radius in meters.
    pub fn effective_radius(&self) -> f64 {
        EARTH_RADIUS_M * self.k_factor
    }

    /// Height of the earth bulge at `distance_from_start` along a path of
    /// `total_path_distance` meters.
    ///
    /// `h = d1 * d2 / (2 * R_eff)`, zero at both endpoints and maximal at
    /// the midpoint.
    pub fn curvature_height(&self, distance_from_start: f64, total_path_distance: f64) -> f64 {
        if !self.enabled || total_path_distance == 0.0 {
            return 0.0;
        }

        let d1 = distance_from_start;
        let d2 = total_path_distance - d1;
        (d1 * d2) / (2.0 * self.effective_radius())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_at_endpoints() {
        let model = CurvatureModel::default();
        for total in [1.0, 500.0, 10_000.0, 75_000.0] {
            assert_eq!(model.curvature_height(0.0, total), 0.0);
            assert_eq!(model.curvature_height(total, total), 0.0);
        }
    }

    #[test]
    fn test_maximal_at_midpoint() {
        let model = CurvatureModel::default();
        let total = 20_000.0;
        let mid = model.curvature_height(total / 2.0, total);

        for i in 0..=20 {
            let d = total * i as f64 / 20.0;
            assert!(model.curvature_height(d, total) <= mid);
        }
    }

    #[test]
    fn test_known_bulge() {
        // 10 km path: 5000 * 5000 / (2 * 4/3 * 6371000) ≈ 1.471 m
        let model = CurvatureModel::default();
        assert_relative_eq!(
            model.curvature_height(5_000.0, 10_000.0),
            1.4715,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_disabled_and_zero_length() {
        assert_eq!(CurvatureModel::disabled().curvature_height(500.0, 1000.0), 0.0);
        assert_eq!(CurvatureModel::default().curvature_height(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_effective_radius() {
        let model = CurvatureModel::default();
        assert_relative_eq!(model.effective_radius(), 6_371_000.0 * 4.0 / 3.0);
    }
}
