// crates/aegis-dataset-core/src/runtime/context.rs
// ============================================================================
// Module: Context Validation
// Description: Schema gating for sensor contexts and catalog coverage checks.
// Purpose: Validate readings against context schemas before they are used.
// Dependencies: serde_json, aegis-dataset-schema, crate::core
// ============================================================================

//! ## Overview
//! Every reading in a [`SensorContext`] is validated against its context tool
//! schema at locator `context:<tool>`. Catalog coverage is checked once, up
//! front: every sensor the generators emit and every action the synthesizer
//! dispatches must be defined by the loaded documents.

// ============================================================================
// SECTION: Imports
// ============================================================================

use aegis_dataset_schema::CatalogError;
use aegis_dataset_schema::SchemaError;
use aegis_dataset_schema::SchemaViolation;
use aegis_dataset_schema::ToolCatalog;
use aegis_dataset_schema::validate;
use serde_json::Value;

use crate::core::ActionTool;
use crate::core::SensorContext;
use crate::core::SensorKind;
use crate::error::SampleError;

// ============================================================================
// SECTION: Catalog Coverage
// ============================================================================

/// Checks that the catalog defines every sensor and action the generator uses.
///
/// # Errors
///
/// Returns [`CatalogError::UnknownTool`] for the first missing tool.
pub fn require_generator_tools(catalog: &ToolCatalog) -> Result<(), CatalogError> {
    catalog.context().require(SensorKind::ALL.map(SensorKind::tool_name))?;
    catalog.action().require(ActionTool::ALL.map(ActionTool::tool_name))
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates every observed reading against its context schema.
///
/// # Errors
///
/// Returns [`SampleError::Schema`] for the first invalid reading and
/// [`SampleError::Catalog`] when a sensor has no schema.
pub fn validate_context(catalog: &ToolCatalog, context: &SensorContext) -> Result<(), SampleError> {
    for (kind, value) in context.readings()? {
        validate_reading(catalog, kind.tool_name(), &value)?;
    }
    Ok(())
}

/// Validates a raw JSON context and converts it to a [`SensorContext`].
///
/// # Errors
///
/// Returns [`SampleError::Schema`] when the value is not an object or a reading
/// is invalid, and [`SampleError::Catalog`] for tool names without a schema.
pub fn parse_context(catalog: &ToolCatalog, value: &Value) -> Result<SensorContext, SampleError> {
    let Some(map) = value.as_object() else {
        return Err(SchemaError::new(
            "context",
            SchemaViolation::ExpectedType {
                expected: "OBJECT",
            },
        )
        .into());
    };
    for (name, reading) in map {
        validate_reading(catalog, name, reading)?;
    }
    Ok(serde_json::from_value(value.clone())?)
}

/// Validates one reading against the named context schema.
fn validate_reading(catalog: &ToolCatalog, name: &str, value: &Value) -> Result<(), SampleError> {
    let schema = catalog.context().schema(name)?;
    validate(value, schema, &format!("context:{name}"))?;
    Ok(())
}
