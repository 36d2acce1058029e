// crates/aegis-dataset-core/src/runtime/decision.rs
// ============================================================================
// Module: Risk Decision Engine
// Description: Priority-ordered selection of the dominant risk.
// Purpose: Map a sensor context to at most one risk decision.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Every risk has an actionability predicate over the sensor context. The
//! predicates live in a static table ordered by priority; each one is
//! evaluated independently and the lowest-index actionable rule wins. The
//! winner never depends on confidence, generation order, or magnitude.
//!
//! EV battery readings carry no confidence and are decided at 1.0.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::RiskDecision;
use crate::core::RiskType;
use crate::core::SensorContext;
use crate::core::SeverityLevel;
use crate::core::ThermalLevel;

// ============================================================================
// SECTION: Rule Table
// ============================================================================

/// One row of the priority table.
struct RiskRule {
    /// Risk produced by the rule.
    risk: RiskType,
    /// Returns the detector confidence when the risk is actionable.
    actionable: fn(&SensorContext) -> Option<f64>,
}

/// Rules in priority order; earlier rows win.
const RULES: [RiskRule; 7] = [
    RiskRule {
        risk: RiskType::ForwardCollision,
        actionable: forward_collision,
    },
    RiskRule {
        risk: RiskType::VehicleIntrusion,
        actionable: vehicle_intrusion,
    },
    RiskRule {
        risk: RiskType::BlindSpot,
        actionable: blind_spot,
    },
    RiskRule {
        risk: RiskType::LaneDeparture,
        actionable: lane_departure,
    },
    RiskRule {
        risk: RiskType::Drowsiness,
        actionable: drowsiness,
    },
    RiskRule {
        risk: RiskType::EvBatteryCritical,
        actionable: ev_battery_critical,
    },
    RiskRule {
        risk: RiskType::EnvironmentalHazards,
        actionable: environmental_hazards,
    },
];

/// Confidence assigned to sensors without a confidence field.
const FIXED_CONFIDENCE: f64 = 1.0;

/// Mid or high collision risk.
fn forward_collision(context: &SensorContext) -> Option<f64> {
    let reading = context.forward_collision.as_ref()?;
    matches!(reading.level, SeverityLevel::Mid | SeverityLevel::High).then_some(reading.confidence)
}

/// Detected intrusion at mid level or above.
fn vehicle_intrusion(context: &SensorContext) -> Option<f64> {
    let reading = context.intrusion.as_ref()?;
    let elevated =
        matches!(reading.level, SeverityLevel::Mid | SeverityLevel::High | SeverityLevel::Critical);
    (reading.value && elevated).then_some(reading.confidence)
}

/// Occupied blind spot at mid or high level.
fn blind_spot(context: &SensorContext) -> Option<f64> {
    let reading = context.blind_spot.as_ref()?;
    let elevated = matches!(reading.level, SeverityLevel::Mid | SeverityLevel::High);
    (reading.value && elevated).then_some(reading.confidence)
}

/// Detected lane departure.
fn lane_departure(context: &SensorContext) -> Option<f64> {
    let reading = context.lane_departure.as_ref()?;
    reading.value.then_some(reading.confidence)
}

/// Detected drowsiness.
fn drowsiness(context: &SensorContext) -> Option<f64> {
    let reading = context.drowsiness.as_ref()?;
    reading.value.then_some(reading.confidence)
}

/// Hot or critical battery.
fn ev_battery_critical(context: &SensorContext) -> Option<f64> {
    let reading = context.ev_battery.as_ref()?;
    matches!(reading.level, ThermalLevel::Hot | ThermalLevel::Critical)
        .then_some(FIXED_CONFIDENCE)
}

/// Any mid or high severity hazard.
fn environmental_hazards(context: &SensorContext) -> Option<f64> {
    let reading = context.environmental_hazards.as_ref()?;
    reading
        .hazards
        .iter()
        .any(|hazard| matches!(hazard.severity, SeverityLevel::Mid | SeverityLevel::High))
        .then_some(reading.confidence)
}

// ============================================================================
// SECTION: Decisions
// ============================================================================

/// Returns every actionable risk, highest priority first.
#[must_use]
pub fn candidates(context: &SensorContext) -> Vec<RiskDecision> {
    RULES
        .iter()
        .filter_map(|rule| {
            (rule.actionable)(context).map(|confidence| RiskDecision::new(rule.risk, confidence))
        })
        .collect()
}

/// Selects the dominant risk, or `None` when nothing is actionable.
#[must_use]
pub fn decide(context: &SensorContext) -> Option<RiskDecision> {
    RULES
        .iter()
        .enumerate()
        .filter_map(|(priority, rule)| {
            (rule.actionable)(context)
                .map(|confidence| (priority, RiskDecision::new(rule.risk, confidence)))
        })
        .min_by_key(|(priority, _)| *priority)
        .map(|(_, decision)| decision)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
