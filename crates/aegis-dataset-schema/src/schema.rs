// crates/aegis-dataset-schema/src/schema.rs
// ============================================================================
// Module: Tool Parameter Schemas
// Description: Closed schema model parsed from tool schema documents.
// Purpose: Give the validator an exhaustive, pre-compiled schema tree.
// Dependencies: regex, serde, serde_json
// ============================================================================

//! ## Overview
//! Tool schema documents use an upper-case, JSON-Schema-like dialect:
//! `OBJECT`, `ARRAY`, `STRING`, `BOOLEAN`, `INTEGER`, `NUMBER`. Each node is
//! parsed once into [`Schema`]; `INTEGER` and `NUMBER` share [`NumberSchema`]
//! with an integer flag. Patterns are compiled at parse time and anchored at
//! the start of the string only, so a pattern matches any string that begins
//! with a match.
//!
//! ## Invariants
//! - Parsing fails on an unknown type tag or an uncompilable pattern; a
//!   parsed [`Schema`] never carries either.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use regex::Regex;
use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;

use crate::error::CatalogError;

// ============================================================================
// SECTION: Schema Model
// ============================================================================

/// Parsed schema node.
#[derive(Debug, Clone)]
pub enum Schema {
    /// Mapping with declared properties.
    Object(ObjectSchema),
    /// Sequence with an optional item schema.
    Array(ArraySchema),
    /// Text with optional enum and pattern.
    String(StringSchema),
    /// Boolean flag.
    Boolean,
    /// Integer or floating-point number with optional bounds.
    Number(NumberSchema),
}

/// Policy for object keys outside the declared properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdditionalProperties {
    /// Unlisted keys may exist; they are not validated.
    Allow,
    /// Unlisted keys are a violation.
    Reject,
}

/// Object schema constraints.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    /// Declared properties by name.
    pub properties: BTreeMap<String, Schema>,
    /// Required keys in document order.
    pub required: Vec<String>,
    /// Policy for unlisted keys.
    pub additional: AdditionalProperties,
}

/// Array schema constraints.
#[derive(Debug, Clone)]
pub struct ArraySchema {
    /// Schema applied to every element, when declared.
    pub items: Option<Box<Schema>>,
}

/// String schema constraints.
#[derive(Debug, Clone, Default)]
pub struct StringSchema {
    /// Allowed literals, when declared.
    pub allowed: Option<Vec<String>>,
    /// Start-anchored pattern, when declared.
    pub pattern: Option<Pattern>,
}

/// Compiled string pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    /// Pattern text as written in the document.
    source: String,
    /// Compiled regex anchored at position 0.
    regex: Regex,
}

impl Pattern {
    /// Compiles a pattern that must match from the start of the string.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidPattern`] when the pattern does not compile.
    pub fn new(source: &str) -> Result<Self, CatalogError> {
        let regex =
            Regex::new(&format!("^(?:{source})")).map_err(|err| CatalogError::InvalidPattern {
                pattern: source.to_string(),
                error: err.to_string(),
            })?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// Returns the pattern as written in the document.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns true when `value` begins with a match.
    #[must_use]
    pub fn matches_start(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

/// Numeric schema constraints.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberSchema {
    /// True for `INTEGER`, false for `NUMBER`.
    pub integer: bool,
    /// Inclusive lower bound.
    pub minimum: Option<f64>,
    /// Inclusive upper bound.
    pub maximum: Option<f64>,
}

impl Schema {
    /// Returns the document type tag for this node.
    #[must_use]
    pub const fn type_tag(&self) -> &'static str {
        match self {
            Self::Object(_) => "OBJECT",
            Self::Array(_) => "ARRAY",
            Self::String(_) => "STRING",
            Self::Boolean => "BOOLEAN",
            Self::Number(number) => {
                if number.integer {
                    "INTEGER"
                } else {
                    "NUMBER"
                }
            }
        }
    }

    /// Parses a schema node (and its children) from a document value.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] for malformed nodes, unknown type tags, and
    /// invalid patterns.
    pub fn from_value(value: &Value) -> Result<Self, CatalogError> {
        let raw = RawSchema::deserialize(value).map_err(|err| CatalogError::MalformedSchema {
            error: err.to_string(),
        })?;
        raw.into_schema()
    }
}

// ============================================================================
// SECTION: Document Parsing
// ============================================================================

/// Wire form of a single schema node.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchema {
    /// Type tag.
    #[serde(rename = "type")]
    kind: String,
    /// Child property schemas (objects).
    #[serde(default)]
    properties: Map<String, Value>,
    /// Required keys (objects).
    #[serde(default)]
    required: Vec<String>,
    /// Additional-properties flag (objects); absent means allow.
    #[serde(default = "default_additional_properties")]
    additional_properties: bool,
    /// Item schema (arrays).
    #[serde(default)]
    items: Option<Value>,
    /// Allowed literals (strings).
    #[serde(default, rename = "enum")]
    allowed: Option<Vec<String>>,
    /// Start-anchored pattern (strings).
    #[serde(default)]
    pattern: Option<String>,
    /// Inclusive lower bound (numbers).
    #[serde(default)]
    minimum: Option<f64>,
    /// Inclusive upper bound (numbers).
    #[serde(default)]
    maximum: Option<f64>,
}

/// Documents allow unlisted keys unless they opt out.
const fn default_additional_properties() -> bool {
    true
}

impl RawSchema {
    /// Converts the wire node into the closed schema model.
    fn into_schema(self) -> Result<Schema, CatalogError> {
        match self.kind.as_str() {
            "OBJECT" => {
                let mut properties = BTreeMap::new();
                for (name, child) in &self.properties {
                    properties.insert(name.clone(), Schema::from_value(child)?);
                }
                let additional = if self.additional_properties {
                    AdditionalProperties::Allow
                } else {
                    AdditionalProperties::Reject
                };
                Ok(Schema::Object(ObjectSchema {
                    properties,
                    required: self.required,
                    additional,
                }))
            }
            "ARRAY" => {
                let items = match &self.items {
                    Some(items) => Some(Box::new(Schema::from_value(items)?)),
                    None => None,
                };
                Ok(Schema::Array(ArraySchema {
                    items,
                }))
            }
            "STRING" => {
                let pattern = self.pattern.as_deref().map(Pattern::new).transpose()?;
                Ok(Schema::String(StringSchema {
                    allowed: self.allowed,
                    pattern,
                }))
            }
            "BOOLEAN" => Ok(Schema::Boolean),
            "INTEGER" | "NUMBER" => Ok(Schema::Number(NumberSchema {
                integer: self.kind == "INTEGER",
                minimum: self.minimum,
                maximum: self.maximum,
            })),
            other => Err(CatalogError::UnknownType {
                tag: other.to_string(),
            }),
        }
    }
}
