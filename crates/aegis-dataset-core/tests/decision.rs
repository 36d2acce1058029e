//! Decision engine tests for aegis-dataset-core.
// crates/aegis-dataset-core/tests/decision.rs
// =============================================================================
// Module: Decision Engine Tests
// Description: Priority selection, tier classification, and predicates.
// Purpose: Ensure exactly one dominant risk is chosen by priority alone.
// =============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only assertions are permitted."
)]

use aegis_dataset_core::ConfidenceTier;
use aegis_dataset_core::FlagReading;
use aegis_dataset_core::ForwardCollisionReading;
use aegis_dataset_core::RiskType;
use aegis_dataset_core::SensorContext;
use aegis_dataset_core::SeverityLevel;
use aegis_dataset_core::candidates;
use aegis_dataset_core::decide;
use aegis_dataset_core::parse_context;
use aegis_dataset_schema::ToolCatalog;
use proptest::prelude::*;
use serde_json::Value;
use serde_json::json;

type TestResult = Result<(), String>;

fn context(value: &Value) -> Result<SensorContext, String> {
    let catalog = ToolCatalog::bundled().map_err(|err| err.to_string())?;
    parse_context(&catalog, value).map_err(|err| err.to_string())
}

// ============================================================================
// SECTION: Scenarios
// ============================================================================

#[test]
fn confident_high_forward_collision_is_full_tier() -> TestResult {
    let ctx = context(&json!({
        "get_forward_collision_risk": { "score": 0.85, "level": "high", "confidence": 0.95 }
    }))?;
    let decision = decide(&ctx).ok_or("expected a decision")?;
    if decision.risk_type != RiskType::ForwardCollision
        || decision.tier != ConfidenceTier::Full
        || (decision.confidence - 0.95).abs() > f64::EPSILON
    {
        return Err(format!("unexpected decision {decision:?}"));
    }
    Ok(())
}

#[test]
fn forward_collision_outranks_lane_departure() -> TestResult {
    let ctx = context(&json!({
        "get_lane_departure_status": { "value": true, "confidence": 0.70 },
        "get_forward_collision_risk": { "score": 0.80, "level": "high", "confidence": 0.95 }
    }))?;
    let decision = decide(&ctx).ok_or("expected a decision")?;
    if decision.risk_type != RiskType::ForwardCollision {
        return Err(format!("expected forward_collision, got {}", decision.risk_type));
    }
    let all: Vec<RiskType> = candidates(&ctx).iter().map(|c| c.risk_type).collect();
    if all != [RiskType::ForwardCollision, RiskType::LaneDeparture] {
        return Err(format!("unexpected candidates {all:?}"));
    }
    Ok(())
}

#[test]
fn negative_drowsiness_yields_no_decision() -> TestResult {
    let ctx = context(&json!({
        "get_driver_drowsiness_status": { "value": false, "confidence": 0.99 }
    }))?;
    match decide(&ctx) {
        None => Ok(()),
        Some(decision) => Err(format!("unexpected decision {decision:?}")),
    }
}

#[test]
fn ev_battery_is_decided_at_full_confidence() -> TestResult {
    let ctx = context(&json!({
        "get_ev_battery_thermal_status": { "temperature": 61.2, "level": "hot", "cooling_active": true }
    }))?;
    let decision = decide(&ctx).ok_or("expected a decision")?;
    if decision.risk_type != RiskType::EvBatteryCritical || decision.tier != ConfidenceTier::Full {
        return Err(format!("unexpected decision {decision:?}"));
    }
    Ok(())
}

#[test]
fn level_gates_filter_candidates() -> TestResult {
    let ctx = context(&json!({
        "get_forward_collision_risk": { "score": 0.2, "level": "low", "confidence": 0.99 },
        "get_vehicle_system_intrusion_status": { "value": true, "level": "low", "confidence": 0.99 },
        "get_blind_spot_collision_risk": { "value": true, "level": "low", "confidence": 0.99 },
        "get_ev_battery_thermal_status": { "temperature": 45.0, "level": "warm", "cooling_active": false },
        "get_external_environmental_hazards": {
            "hazards": [{ "kind": "debris", "severity": "low" }],
            "confidence": 0.99
        }
    }))?;
    if !candidates(&ctx).is_empty() {
        return Err(format!("expected no candidates, got {:?}", candidates(&ctx)));
    }
    Ok(())
}

#[test]
fn any_elevated_hazard_is_actionable() -> TestResult {
    let ctx = context(&json!({
        "get_external_environmental_hazards": {
            "hazards": [
                { "kind": "debris", "severity": "low" },
                { "kind": "accident", "severity": "high" }
            ],
            "confidence": 0.7
        }
    }))?;
    let decision = decide(&ctx).ok_or("expected a decision")?;
    if decision.risk_type != RiskType::EnvironmentalHazards || decision.tier != ConfidenceTier::Low
    {
        return Err(format!("unexpected decision {decision:?}"));
    }
    Ok(())
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    #[test]
    fn priority_ignores_confidence(
        collision_confidence in 0.0f64..=1.0,
        lane_confidence in 0.0f64..=1.0,
        drowsy_confidence in 0.0f64..=1.0,
    ) {
        let ctx = SensorContext {
            forward_collision: Some(ForwardCollisionReading {
                score: 0.5,
                level: SeverityLevel::Mid,
                confidence: collision_confidence,
            }),
            lane_departure: Some(FlagReading { value: true, confidence: lane_confidence }),
            drowsiness: Some(FlagReading { value: true, confidence: drowsy_confidence }),
            ..SensorContext::default()
        };
        let decision = decide(&ctx);
        prop_assert_eq!(decision.map(|d| d.risk_type), Some(RiskType::ForwardCollision));
        prop_assert_eq!(candidates(&ctx).len(), 3);
    }

    #[test]
    fn decision_is_first_candidate(lane in any::<bool>(), drowsy in any::<bool>(), confidence in 0.0f64..=1.0) {
        let ctx = SensorContext {
            lane_departure: Some(FlagReading { value: lane, confidence }),
            drowsiness: Some(FlagReading { value: drowsy, confidence }),
            ..SensorContext::default()
        };
        prop_assert_eq!(decide(&ctx), candidates(&ctx).first().copied());
        if let Some(decision) = decide(&ctx) {
            prop_assert_eq!(decision.tier, ConfidenceTier::from_confidence(confidence));
        }
    }
}
