//! Validator behavior tests for aegis-dataset-schema.
// crates/aegis-dataset-schema/tests/validator.rs
// =============================================================================
// Module: Validator Tests
// Description: Value validation against the bundled and ad-hoc schemas.
// Purpose: Pin path locators, bound inclusivity, and pattern anchoring.
// =============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only assertions are permitted."
)]

use aegis_dataset_schema::Schema;
use aegis_dataset_schema::SchemaViolation;
use aegis_dataset_schema::ToolCatalog;
use aegis_dataset_schema::validate;
use proptest::prelude::*;
use serde_json::Value;
use serde_json::json;

type TestResult = Result<(), String>;

fn parse(value: &Value) -> Result<Schema, String> {
    Schema::from_value(value).map_err(|err| format!("schema did not parse: {err}"))
}

fn context_schema(name: &str) -> Result<Schema, String> {
    let catalog = ToolCatalog::bundled().map_err(|err| err.to_string())?;
    catalog.context().schema(name).cloned().map_err(|err| err.to_string())
}

fn action_schema(name: &str) -> Result<Schema, String> {
    let catalog = ToolCatalog::bundled().map_err(|err| err.to_string())?;
    catalog.action().schema(name).cloned().map_err(|err| err.to_string())
}

// ============================================================================
// SECTION: Objects
// ============================================================================

#[test]
fn missing_required_key_is_reported_at_object_path() -> TestResult {
    let schema = context_schema("get_forward_collision_risk")?;
    let value = json!({ "score": 0.4, "level": "mid" });
    let Err(err) = validate(&value, &schema, "context:get_forward_collision_risk") else {
        return Err("expected missing 'confidence'".to_string());
    };
    if err.path != "context:get_forward_collision_risk" {
        return Err(format!("unexpected path {}", err.path));
    }
    if err.violation
        != (SchemaViolation::MissingRequired {
            key: "confidence".to_string(),
        })
    {
        return Err(format!("unexpected violation {}", err.violation));
    }
    Ok(())
}

#[test]
fn rejected_extra_keys_are_all_listed() -> TestResult {
    let schema = context_schema("get_vehicle_speed")?;
    let value = json!({ "value": 50.0, "unit": "kmh", "source": "gps" });
    let Err(err) = validate(&value, &schema, "context:get_vehicle_speed") else {
        return Err("expected extra keys to be rejected".to_string());
    };
    match err.violation {
        SchemaViolation::UnexpectedKeys {
            keys,
        } if keys == ["unit", "source"] => Ok(()),
        other => Err(format!("unexpected violation {other}")),
    }
}

#[test]
fn nested_array_item_path_uses_index() -> TestResult {
    let schema = context_schema("get_external_environmental_hazards")?;
    let value = json!({
        "hazards": [
            { "kind": "debris", "severity": "low" },
            { "kind": "meteor", "severity": "high" }
        ],
        "confidence": 0.8
    });
    let Err(err) = validate(&value, &schema, "context:get_external_environmental_hazards") else {
        return Err("expected enum violation".to_string());
    };
    if err.path != "context:get_external_environmental_hazards.hazards[1].kind" {
        return Err(format!("unexpected path {}", err.path));
    }
    if !matches!(err.violation, SchemaViolation::NotInEnum { .. }) {
        return Err(format!("unexpected violation {}", err.violation));
    }
    Ok(())
}

#[test]
fn first_invalid_property_follows_value_order() -> TestResult {
    let schema = context_schema("get_forward_collision_risk")?;
    let value = json!({ "level": "extreme", "score": 2.0, "confidence": 0.5 });
    let Err(err) = validate(&value, &schema, "c") else {
        return Err("expected violation".to_string());
    };
    if err.path != "c.level" {
        return Err(format!("expected level to fail first, got {}", err.path));
    }
    Ok(())
}

// ============================================================================
// SECTION: Scalars
// ============================================================================

#[test]
fn integer_bounds_are_inclusive() -> TestResult {
    let schema = action_schema("trigger_steering_vibration")?;
    for duration in [100, 5000] {
        let value = json!({ "level": "high", "duration_ms": duration });
        validate(&value, &schema, "action:trigger_steering_vibration")
            .map_err(|err| format!("{duration} should be accepted: {err}"))?;
    }
    let value = json!({ "level": "high", "duration_ms": 5001 });
    match validate(&value, &schema, "action:trigger_steering_vibration") {
        Err(err) if matches!(err.violation, SchemaViolation::AboveMaximum { .. }) => Ok(()),
        other => Err(format!("expected maximum violation, got {other:?}")),
    }
}

#[test]
fn integer_field_rejects_float_encoding() -> TestResult {
    let schema = action_schema("trigger_steering_vibration")?;
    let value = json!({ "level": "high", "duration_ms": 800.0 });
    match validate(&value, &schema, "a") {
        Err(err)
            if err.violation
                == (SchemaViolation::ExpectedType {
                    expected: "INTEGER",
                }) =>
        {
            Ok(())
        }
        other => Err(format!("expected integer type error, got {other:?}")),
    }
}

#[test]
fn pattern_is_anchored_at_start_only() -> TestResult {
    let schema = action_schema("request_safe_mode")?;
    validate(&json!({ "enabled": true, "reason": "ev_battery-overheat" }), &schema, "a")
        .map_err(|err| format!("prefix match should pass: {err}"))?;
    match validate(&json!({ "enabled": true, "reason": "_ev" }), &schema, "a") {
        Err(err) if matches!(err.violation, SchemaViolation::PatternMismatch { .. }) => Ok(()),
        other => Err(format!("expected pattern mismatch, got {other:?}")),
    }
}

#[test]
fn array_without_items_accepts_any_elements() -> TestResult {
    let schema = parse(&json!({ "type": "ARRAY" }))?;
    validate(&json!([1, "two", { "three": 3 }]), &schema, "a").map_err(|err| err.to_string())
}

#[test]
fn boolean_rejects_number() -> TestResult {
    let schema = parse(&json!({ "type": "BOOLEAN" }))?;
    if validate(&json!(0), &schema, "b").is_ok() {
        return Err("0 accepted as BOOLEAN".to_string());
    }
    Ok(())
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    #[test]
    fn numbers_inside_bounds_are_accepted(score in 0.0f64..=1.0, confidence in 0.0f64..=1.0) {
        let schema = context_schema("get_forward_collision_risk").map_err(TestCaseError::fail)?;
        let value = json!({ "score": score, "level": "low", "confidence": confidence });
        prop_assert!(validate(&value, &schema, "c").is_ok());
    }

    #[test]
    fn speeds_above_maximum_are_rejected(speed in 300.001f64..10_000.0) {
        let schema = context_schema("get_vehicle_speed").map_err(TestCaseError::fail)?;
        let value = json!({ "value": speed });
        prop_assert!(validate(&value, &schema, "c").is_err());
    }
}
