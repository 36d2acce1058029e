// crates/aegis-dataset-core/src/core/risk.rs
// ============================================================================
// Module: Risk Types
// Description: Risk identifiers and the decision record.
// Purpose: Carry the dominant risk from the decision engine to the synthesizer.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`RiskType`] variants are declared in priority order: a lower position
//! wins when several risks are actionable at once.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::levels::ConfidenceTier;

// ============================================================================
// SECTION: Risk Types
// ============================================================================

/// Safety risk the assistant can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskType {
    /// Imminent forward collision.
    ForwardCollision,
    /// Suspected vehicle system intrusion.
    VehicleIntrusion,
    /// Vehicle in the blind spot.
    BlindSpot,
    /// Unintended lane departure.
    LaneDeparture,
    /// Driver drowsiness.
    Drowsiness,
    /// EV battery overheating.
    EvBatteryCritical,
    /// Hazards on the road ahead.
    EnvironmentalHazards,
}

impl RiskType {
    /// Risks in priority order.
    pub const PRIORITY: [Self; 7] = [
        Self::ForwardCollision,
        Self::VehicleIntrusion,
        Self::BlindSpot,
        Self::LaneDeparture,
        Self::Drowsiness,
        Self::EvBatteryCritical,
        Self::EnvironmentalHazards,
    ];

    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ForwardCollision => "forward_collision",
            Self::VehicleIntrusion => "vehicle_intrusion",
            Self::BlindSpot => "blind_spot",
            Self::LaneDeparture => "lane_departure",
            Self::Drowsiness => "drowsiness",
            Self::EvBatteryCritical => "ev_battery_critical",
            Self::EnvironmentalHazards => "environmental_hazards",
        }
    }
}

impl fmt::Display for RiskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Decisions
// ============================================================================

/// Dominant risk selected for a sample.
///
/// # Invariants
/// - `tier` is derived from `confidence`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskDecision {
    /// Selected risk.
    pub risk_type: RiskType,
    /// Detector confidence in [0, 1].
    pub confidence: f64,
    /// Confidence tier.
    pub tier: ConfidenceTier,
}

impl RiskDecision {
    /// Builds a decision, classifying the confidence into its tier.
    #[must_use]
    pub fn new(risk_type: RiskType, confidence: f64) -> Self {
        Self {
            risk_type,
            confidence,
            tier: ConfidenceTier::from_confidence(confidence),
        }
    }
}
