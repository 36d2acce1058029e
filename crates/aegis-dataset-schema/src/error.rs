// crates/aegis-dataset-schema/src/error.rs
// ============================================================================
// Module: Schema Error Definitions
// Description: Validation and catalog loading diagnostics.
// Purpose: Separate recoverable value violations from fatal document defects.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! [`SchemaError`] reports a value that does not satisfy its schema. It is
//! recoverable at the sample level: the generator discards the draft and
//! redraws. [`CatalogError`] reports a defect in the schema documents
//! themselves (or a lookup of a tool the documents do not define) and is
//! always fatal.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::catalog::ToolKind;

// ============================================================================
// SECTION: Validation Errors
// ============================================================================

/// Value validation failure with a path locator.
///
/// # Invariants
/// - `path` is the dotted/bracketed locator built by the caller, e.g.
///   `context:get_external_environmental_hazards.hazards[0].kind`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{path}: {violation}")]
pub struct SchemaError {
    /// Locator of the offending value.
    pub path: String,
    /// What the value violated.
    pub violation: SchemaViolation,
}

impl SchemaError {
    /// Builds a schema error at `path`.
    #[must_use]
    pub fn new(path: impl Into<String>, violation: SchemaViolation) -> Self {
        Self {
            path: path.into(),
            violation,
        }
    }
}

/// Specific schema constraint that a value violated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaViolation {
    /// Value has the wrong JSON type.
    #[error("expected {expected}")]
    ExpectedType {
        /// Schema type tag that was expected.
        expected: &'static str,
    },
    /// A required object key is absent.
    #[error("missing required '{key}'")]
    MissingRequired {
        /// Name of the missing key.
        key: String,
    },
    /// Object carries keys outside the declared properties.
    #[error("additionalProperties=false, extra keys {keys:?}")]
    UnexpectedKeys {
        /// Every unlisted key, in value order.
        keys: Vec<String>,
    },
    /// String is not one of the enumerated literals.
    #[error("value '{value}' not in enum {allowed:?}")]
    NotInEnum {
        /// Offending string.
        value: String,
        /// Allowed literals.
        allowed: Vec<String>,
    },
    /// String does not match the pattern at position 0.
    #[error("value '{value}' does not match pattern '{pattern}'")]
    PatternMismatch {
        /// Offending string.
        value: String,
        /// Pattern as written in the schema document.
        pattern: String,
    },
    /// Number is below the inclusive minimum.
    #[error("{value} < minimum {minimum}")]
    BelowMinimum {
        /// Offending number.
        value: f64,
        /// Declared minimum.
        minimum: f64,
    },
    /// Number is above the inclusive maximum.
    #[error("{value} > maximum {maximum}")]
    AboveMaximum {
        /// Offending number.
        value: f64,
        /// Declared maximum.
        maximum: f64,
    },
}

// ============================================================================
// SECTION: Catalog Errors
// ============================================================================

/// Schema document loading or lookup failure.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Document could not be read.
    #[error("failed to read {kind} schema document {path}: {error}")]
    Io {
        /// Document kind.
        kind: ToolKind,
        /// Path that failed.
        path: String,
        /// Underlying error text.
        error: String,
    },
    /// Document is not valid JSON or does not have the expected layout.
    #[error("failed to parse {kind} schema document: {error}")]
    Parse {
        /// Document kind.
        kind: ToolKind,
        /// Parser error text.
        error: String,
    },
    /// A schema node is not an object with a string `type` tag.
    #[error("malformed schema node: {error}")]
    MalformedSchema {
        /// Deserializer error text.
        error: String,
    },
    /// A schema node carries a type tag outside the supported set.
    #[error("unknown schema type '{tag}'")]
    UnknownType {
        /// Offending tag.
        tag: String,
    },
    /// A string pattern failed to compile.
    #[error("invalid pattern '{pattern}': {error}")]
    InvalidPattern {
        /// Pattern as written.
        pattern: String,
        /// Regex compiler error text.
        error: String,
    },
    /// Two tools in the same document share a name.
    #[error("duplicate {kind} tool '{name}'")]
    DuplicateTool {
        /// Document kind.
        kind: ToolKind,
        /// Duplicated name.
        name: String,
    },
    /// A tool name is not defined by the loaded documents.
    #[error("unknown {kind} tool '{name}'")]
    UnknownTool {
        /// Document kind that was searched.
        kind: ToolKind,
        /// Missing name.
        name: String,
    },
}
