//! Catalog loading tests for aegis-dataset-schema.
// crates/aegis-dataset-schema/tests/catalog.rs
// =============================================================================
// Module: Catalog Tests
// Description: Bundled documents, path overrides, and load-time failures.
// Purpose: Ensure malformed documents fail before any generation starts.
// =============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only assertions are permitted."
)]

use std::fs;

use aegis_dataset_schema::CatalogError;
use aegis_dataset_schema::ToolCatalog;
use aegis_dataset_schema::ToolDocument;
use aegis_dataset_schema::ToolKind;
use serde_json::json;
use tempfile::TempDir;

type TestResult = Result<(), String>;

// ============================================================================
// SECTION: Bundled Documents
// ============================================================================

#[test]
fn bundled_documents_load() -> TestResult {
    let catalog = ToolCatalog::bundled().map_err(|err| err.to_string())?;
    if catalog.context().len() != 25 || catalog.action().len() != 25 {
        return Err(format!(
            "expected 25 tools each, got {} context and {} action",
            catalog.context().len(),
            catalog.action().len()
        ));
    }
    catalog
        .context()
        .require(["get_vehicle_speed", "get_ev_battery_thermal_status", "get_sensor_health_status"])
        .map_err(|err| err.to_string())?;
    catalog
        .action()
        .require(["request_safe_mode", "log_safety_event", "trigger_hud_warning"])
        .map_err(|err| err.to_string())
}

#[test]
fn raw_action_entries_keep_document_key_order() -> TestResult {
    let catalog = ToolCatalog::bundled().map_err(|err| err.to_string())?;
    let first = catalog.action().raw_tools().first().ok_or("empty action document")?;
    let keys: Vec<&str> =
        first.as_object().ok_or("entry is not an object")?.keys().map(String::as_str).collect();
    if keys != ["type", "function"] {
        return Err(format!("unexpected key order {keys:?}"));
    }
    Ok(())
}

#[test]
fn unknown_tool_lookup_is_an_error() -> TestResult {
    let catalog = ToolCatalog::bundled().map_err(|err| err.to_string())?;
    match catalog.action().schema("launch_fireworks") {
        Err(CatalogError::UnknownTool {
            kind: ToolKind::Action,
            name,
        }) if name == "launch_fireworks" => Ok(()),
        other => Err(format!("expected unknown tool, got {other:?}")),
    }
}

// ============================================================================
// SECTION: Load Failures
// ============================================================================

fn tool(name: &str, parameters: &serde_json::Value) -> serde_json::Value {
    json!({ "type": "function", "function": { "name": name, "parameters": parameters } })
}

#[test]
fn unknown_type_tag_fails_at_load() -> TestResult {
    let text = json!([tool("t", &json!({ "type": "TUPLE" }))]).to_string();
    match ToolDocument::from_json_str(ToolKind::Context, &text) {
        Err(CatalogError::UnknownType {
            tag,
        }) if tag == "TUPLE" => Ok(()),
        other => Err(format!("expected unknown type, got {other:?}")),
    }
}

#[test]
fn invalid_pattern_fails_at_load() -> TestResult {
    let text = json!([tool("t", &json!({ "type": "STRING", "pattern": "([a-z" }))]).to_string();
    match ToolDocument::from_json_str(ToolKind::Action, &text) {
        Err(CatalogError::InvalidPattern { .. }) => Ok(()),
        other => Err(format!("expected invalid pattern, got {other:?}")),
    }
}

#[test]
fn duplicate_tool_names_fail_at_load() -> TestResult {
    let parameters = json!({ "type": "BOOLEAN" });
    let text = json!([tool("dup", &parameters), tool("dup", &parameters)]).to_string();
    match ToolDocument::from_json_str(ToolKind::Context, &text) {
        Err(CatalogError::DuplicateTool {
            name, ..
        }) if name == "dup" => Ok(()),
        other => Err(format!("expected duplicate tool, got {other:?}")),
    }
}

#[test]
fn override_path_replaces_bundled_document() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = dir.path().join("context.json");
    let text = json!([tool("get_vehicle_speed", &json!({ "type": "OBJECT" }))]).to_string();
    fs::write(&path, text).map_err(|err| err.to_string())?;

    let catalog = ToolCatalog::load(Some(&path), None).map_err(|err| err.to_string())?;
    if catalog.context().len() != 1 {
        return Err(format!("expected override with 1 tool, got {}", catalog.context().len()));
    }
    if catalog.action().len() != 25 {
        return Err("action document should stay bundled".to_string());
    }
    Ok(())
}

#[test]
fn missing_override_path_is_io_error() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.json");
    match ToolCatalog::load(None, Some(&path)) {
        Err(CatalogError::Io {
            kind: ToolKind::Action,
            ..
        }) => Ok(()),
        other => Err(format!("expected io error, got {other:?}")),
    }
}
