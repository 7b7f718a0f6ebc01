//! Free-space link budget.

use crate::error::{AnalysisError, Result};
use tracing::debug;

/// Constant term of the free-space path loss formula for distance in km and
/// frequency in MHz.
pub const FSPL_CONSTANT_DB: f64 = 32.44;

/// Radio equipment on both ends of the link.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RadioSpecs {
    /// Carrier frequency in MHz.
    pub frequency_mhz: f64,
    /// TX power in dBm.
    pub tx_power_dbm: f64,
    /// TX antenna gain in dBi.
    pub tx_antenna_gain_dbi: f64,
    /// RX antenna gain in dBi.
    pub rx_antenna_gain_dbi: f64,
    /// Receiver sensitivity in dBm.
    pub rx_sensitivity_dbm: f64,
}

impl Default for RadioSpecs {
    fn default() -> Self {
        Self {
            frequency_mhz: 5800.0,
            tx_power_dbm: 20.0,
            tx_antenna_gain_dbi: 12.0,
            rx_antenna_gain_dbi: 12.0,
            rx_sensitivity_dbm: -85.0,
        }
    }
}

/// Link quality status derived from the margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LinkStatus {
    /// Excellent link with >10 dB margin.
    Excellent,
    /// Good link with >5 dB margin.
    Good,
    /// Marginal link with 0-5 dB margin.
    Marginal,
    /// Unreliable link with no positive margin.
    Unreliable,
}

impl LinkStatus {
    /// Classify a link margin.
    pub fn from_margin(link_margin_db: f64) -> Self {
        if link_margin_db > 10.0 {
            LinkStatus::Excellent
        } else if link_margin_db > 5.0 {
            LinkStatus::Good
        } else if link_margin_db > 0.0 {
            LinkStatus::Marginal
        } else {
            LinkStatus::Unreliable
        }
    }

    /// Returns a human-readable description of the status.
    pub fn description(&self) -> &'static str {
        match self {
            LinkStatus::Excellent => "Excellent (>10 dB margin)",
            LinkStatus::Good => "Good (>5 dB margin)",
            LinkStatus::Marginal => "Marginal (0-5 dB margin)",
            LinkStatus::Unreliable => "UNRELIABLE (no positive margin)",
        }
    }
}

impl std::fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Result of a link budget computation, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadioLinkResult {
    /// True if the link margin is strictly positive.
    pub is_viable: bool,
    /// Path distance in kilometers.
    pub distance_km: f64,
    /// Free-space path loss in dB.
    pub path_loss_db: f64,
    /// Received signal strength in dBm.
    pub received_signal_strength_dbm: f64,
    /// Link margin in dB (RSSI - sensitivity).
    pub link_margin_db: f64,
}

impl RadioLinkResult {
    /// Status classification for the margin.
    pub fn status(&self) -> LinkStatus {
        LinkStatus::from_margin(self.link_margin_db)
    }
}

/// Free-space path loss in dB for a distance in km and frequency in MHz.
///
/// Both arguments must be positive; the caller is responsible for checking.
pub fn free_space_path_loss_db(distance_km: f64, frequency_mhz: f64) -> f64 {
    20.0 * distance_km.log10() + 20.0 * frequency_mhz.log10() + FSPL_CONSTANT_DB
}

/// Round to two decimal places for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute the free-space link budget for a path.
///
/// Intermediate values are kept at full precision; only the reported fields
/// are rounded. A margin of exactly zero is not viable.
///
/// # Errors
///
/// [`AnalysisError::InvalidInput`] if the distance or frequency is not a
/// positive finite number, or any radio parameter is non-finite.
pub fn compute_link_budget(total_distance_m: f64, specs: &RadioSpecs) -> Result<RadioLinkResult> {
    if !total_distance_m.is_finite() || total_distance_m <= 0.0 {
        return Err(AnalysisError::invalid(format!(
            "link distance must be positive, got {} m",
            total_distance_m
        )));
    }
    if !specs.frequency_mhz.is_finite() || specs.frequency_mhz <= 0.0 {
        return Err(AnalysisError::invalid(format!(
            "frequency must be positive, got {} MHz",
            specs.frequency_mhz
        )));
    }
    let gains = [
        specs.tx_power_dbm,
        specs.tx_antenna_gain_dbi,
        specs.rx_antenna_gain_dbi,
        specs.rx_sensitivity_dbm,
    ];
    if gains.iter().any(|v| !v.is_finite()) {
        return Err(AnalysisError::invalid("radio parameters must be finite"));
    }

    let distance_km = total_distance_m / 1000.0;
    let path_loss_db = free_space_path_loss_db(distance_km, specs.frequency_mhz);
    let received_dbm = specs.tx_power_dbm - path_loss_db
        + specs.tx_antenna_gain_dbi
        + specs.rx_antenna_gain_dbi;
    let link_margin_db = received_dbm - specs.rx_sensitivity_dbm;

    debug!(
        "Link budget over {:.3} km at {} MHz: FSPL {:.2} dB, RSSI {:.2} dBm, margin {:.2} dB",
        distance_km, specs.frequency_mhz, path_loss_db, received_dbm, link_margin_db
    );

    Ok(RadioLinkResult {
        is_viable: link_margin_db > 0.0,
        distance_km: round2(distance_km),
        path_loss_db: round2(path_loss_db),
        received_signal_strength_dbm: round2(received_dbm),
        link_margin_db: round2(link_margin_db),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_worked_example() {
        let result = compute_link_budget(10_000.0, &RadioSpecs::default()).unwrap();

        assert_relative_eq!(result.distance_km, 10.0);
        assert_relative_eq!(result.path_loss_db, 127.71);
        assert_relative_eq!(result.received_signal_strength_dbm, -83.71);
        assert_relative_eq!(result.link_margin_db, 1.29);
        assert!(result.is_viable);
        assert_eq!(result.status(), LinkStatus::Marginal);
    }

    #[test]
    fn test_doubling_distance_adds_6db() {
        let near = free_space_path_loss_db(5.0, 900.0);
        let far = free_space_path_loss_db(10.0, 900.0);
        assert_relative_eq!(far - near, 6.0206, epsilon = 1e-3);
    }

    #[test]
    fn test_viability_is_strict() {
        let specs = RadioSpecs {
            frequency_mhz: 1000.0,
            tx_power_dbm: 0.0,
            tx_antenna_gain_dbi: 0.0,
            rx_antenna_gain_dbi: 0.0,
            rx_sensitivity_dbm: -(60.0 + FSPL_CONSTANT_DB),
        };
        // 1 km at 1000 MHz: FSPL = 0 + 60 + 32.44, landing exactly on sensitivity.
        let result = compute_link_budget(1000.0, &specs).unwrap();
        assert_eq!(result.link_margin_db, 0.0);
        assert!(!result.is_viable);
    }

    #[test]
    fn test_zero_distance_is_rejected() {
        let result = compute_link_budget(0.0, &RadioSpecs::default());
        assert!(matches!(result, Err(AnalysisError::InvalidInput(_))));
    }

    #[test]
    fn test_non_positive_frequency_is_rejected() {
        let specs = RadioSpecs {
            frequency_mhz: 0.0,
            ..Default::default()
        };
        assert!(compute_link_budget(1000.0, &specs).is_err());

        let specs = RadioSpecs {
            frequency_mhz: -5.0,
            ..Default::default()
        };
        assert!(compute_link_budget(1000.0, &specs).is_err());
    }

    #[test]
    fn test_non_finite_power_is_rejected() {
        let specs = RadioSpecs {
            tx_power_dbm: f64::NAN,
            ..Default::default()
        };
        assert!(compute_link_budget(1000.0, &specs).is_err());
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.2914), 1.29);
        assert_eq!(round2(-83.7086), -83.71);
        assert_eq!(round2(10.0), 10.0);
    }

    #[test]
    fn test_link_status_from_margin() {
        assert_eq!(LinkStatus::from_margin(15.0), LinkStatus::Excellent);
        assert_eq!(LinkStatus::from_margin(10.0), LinkStatus::Good);
        assert_eq!(LinkStatus::from_margin(5.0), LinkStatus::Marginal);
        assert_eq!(LinkStatus::from_margin(0.0), LinkStatus::Unreliable);
        assert_eq!(LinkStatus::from_margin(-3.0), LinkStatus::Unreliable);
    }
}
