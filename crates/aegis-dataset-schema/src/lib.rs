// crates/aegis-dataset-schema/src/lib.rs
// ============================================================================
// Module: Aegis Dataset Schema Library
// Description: Public API surface for tool schemas and their validator.
// Purpose: Expose the schema model, validator, and tool catalog.
// Dependencies: crate::{catalog, error, schema, validator}
// ============================================================================

//! ## Overview
//! Tool schemas describe what a driving-assistant tool accepts: context tools
//! (sensor readings) and action tools (dispatchable assistant actions). This
//! crate parses the two schema documents once into a closed [`Schema`] sum
//! type and validates arbitrary JSON values against it.
//!
//! Malformed documents (unknown type tags, invalid patterns, duplicate tools)
//! fail at load time, so validation itself only reports value violations.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod error;
pub mod schema;
pub mod validator;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::ToolCatalog;
pub use catalog::ToolDefinition;
pub use catalog::ToolDocument;
pub use catalog::ToolKind;
pub use error::CatalogError;
pub use error::SchemaError;
pub use error::SchemaViolation;
pub use schema::AdditionalProperties;
pub use schema::ArraySchema;
pub use schema::NumberSchema;
pub use schema::ObjectSchema;
pub use schema::Schema;
pub use schema::StringSchema;
pub use validator::validate;
