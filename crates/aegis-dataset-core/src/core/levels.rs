// crates/aegis-dataset-core/src/core/levels.rs
// ============================================================================
// Module: Qualitative Levels
// Description: Sensor severity, thermal, and confidence tier vocabularies.
// Purpose: Replace free-form level strings with closed enums.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Sensor readings carry qualitative levels as closed enums, so an unknown
//! label cannot reach a generator. Levels a sensor does not support normalize
//! to the mid-range default instead of failing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Severity
// ============================================================================

/// Risk severity shared by collision, intrusion, blind-spot, and hazard sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    /// Low severity.
    Low,
    /// Medium severity.
    Mid,
    /// High severity.
    High,
    /// Critical severity (intrusion only).
    Critical,
}

impl SeverityLevel {
    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Mid => "mid",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Clamps to the three-level vocabulary used by sensors without `critical`.
    #[must_use]
    pub const fn without_critical(self) -> Self {
        match self {
            Self::Critical => Self::Mid,
            other => other,
        }
    }
}

// ============================================================================
// SECTION: Thermal
// ============================================================================

/// EV battery thermal level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThermalLevel {
    /// Nominal temperature.
    Normal,
    /// Elevated but safe.
    Warm,
    /// Overheating.
    Hot,
    /// Thermal runaway risk.
    Critical,
}

impl ThermalLevel {
    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warm => "warm",
            Self::Hot => "hot",
            Self::Critical => "critical",
        }
    }
}

// ============================================================================
// SECTION: Confidence Tier
// ============================================================================

/// Confidence bucket derived from a detector confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    /// Confidence of at least 0.90.
    Full,
    /// Confidence in [0.75, 0.90).
    Warning,
    /// Confidence in [0.65, 0.75).
    Low,
    /// Confidence below 0.65; never acted on.
    #[serde(rename = "none")]
    Unactionable,
}

impl ConfidenceTier {
    /// Tiers in descending confidence order.
    pub const ALL: [Self; 4] = [Self::Full, Self::Warning, Self::Low, Self::Unactionable];

    /// Classifies a confidence score.
    #[must_use]
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.90 {
            Self::Full
        } else if confidence >= 0.75 {
            Self::Warning
        } else if confidence >= 0.65 {
            Self::Low
        } else {
            Self::Unactionable
        }
    }

    /// Returns the inclusive range generators draw confidences from.
    #[must_use]
    pub const fn sampling_range(self) -> (f64, f64) {
        match self {
            Self::Full => (0.90, 1.00),
            Self::Warning => (0.75, 0.89),
            Self::Low => (0.65, 0.74),
            Self::Unactionable => (0.30, 0.64),
        }
    }

    /// Returns true unless the tier is [`ConfidenceTier::Unactionable`].
    #[must_use]
    pub const fn is_actionable(self) -> bool {
        !matches!(self, Self::Unactionable)
    }

    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Warning => "warning",
            Self::Low => "low",
            Self::Unactionable => "none",
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
