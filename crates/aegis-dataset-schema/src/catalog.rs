// crates/aegis-dataset-schema/src/catalog.rs
// ============================================================================
// Module: Tool Catalog
// Description: Loading and lookup of context and action tool documents.
// Purpose: Parse each schema document once and serve read-only lookups.
// Dependencies: serde, serde_json, crate::schema, crate::error
// ============================================================================

//! ## Overview
//! A tool document is a JSON array of
//! `{"type": "function", "function": {"name", "description", "parameters"}}`
//! entries. [`ToolDocument`] keeps both the parsed parameter schemas and the
//! raw entries: the raw action entries are embedded verbatim (key order
//! preserved) in every generated sample.
//!
//! Default documents are bundled with the crate and can be replaced by path.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::CatalogError;
use crate::schema::Schema;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Bundled context tool document.
const BUNDLED_CONTEXT_TOOLS: &str = include_str!("../catalog/context_tools.json");
/// Bundled action tool document.
const BUNDLED_ACTION_TOOLS: &str = include_str!("../catalog/action_tools.json");
/// Maximum accepted size of a schema document.
pub const MAX_DOCUMENT_BYTES: u64 = 4 * 1024 * 1024;

// ============================================================================
// SECTION: Tool Kind
// ============================================================================

/// Which schema document a tool belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    /// Sensor reading tools.
    Context,
    /// Dispatchable assistant actions.
    Action,
}

impl ToolKind {
    /// Returns a stable label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Context => "context",
            Self::Action => "action",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Tool Document
// ============================================================================

/// A parsed tool definition.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    /// Tool name.
    pub name: String,
    /// Optional human description.
    pub description: Option<String>,
    /// Parsed parameter schema.
    pub parameters: Schema,
}

/// Parsed schema document for one tool kind.
///
/// # Invariants
/// - Tool names are unique within the document.
/// - `raw` and `tools` share order and length.
#[derive(Debug, Clone)]
pub struct ToolDocument {
    /// Kind of tools in the document.
    kind: ToolKind,
    /// Parsed definitions in document order.
    tools: Vec<ToolDefinition>,
    /// Raw entries in document order.
    raw: Vec<Value>,
    /// Name to position in `tools`.
    index: BTreeMap<String, usize>,
}

/// Wire form of a document entry.
#[derive(Debug, Deserialize)]
struct RawTool {
    /// Function payload.
    function: RawFunction,
}

/// Wire form of a document entry's function payload.
#[derive(Debug, Deserialize)]
struct RawFunction {
    /// Tool name.
    name: String,
    /// Optional description.
    #[serde(default)]
    description: Option<String>,
    /// Parameter schema node.
    parameters: Value,
}

impl ToolDocument {
    /// Parses a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the text is not a valid tool document.
    pub fn from_json_str(kind: ToolKind, text: &str) -> Result<Self, CatalogError> {
        let entries: Vec<Value> = serde_json::from_str(text).map_err(|err| CatalogError::Parse {
            kind,
            error: err.to_string(),
        })?;
        let mut tools = Vec::with_capacity(entries.len());
        let mut index = BTreeMap::new();
        for entry in &entries {
            let raw = RawTool::deserialize(entry).map_err(|err| CatalogError::Parse {
                kind,
                error: err.to_string(),
            })?;
            let name = raw.function.name;
            if index.insert(name.clone(), tools.len()).is_some() {
                return Err(CatalogError::DuplicateTool {
                    kind,
                    name,
                });
            }
            tools.push(ToolDefinition {
                parameters: Schema::from_value(&raw.function.parameters)?,
                description: raw.function.description,
                name,
            });
        }
        Ok(Self {
            kind,
            tools,
            raw: entries,
            index,
        })
    }

    /// Reads and parses a document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on read failures, oversized files, and
    /// invalid documents.
    pub fn load(kind: ToolKind, path: &Path) -> Result<Self, CatalogError> {
        let io_error = |error: String| CatalogError::Io {
            kind,
            path: path.display().to_string(),
            error,
        };
        let size = fs::metadata(path).map_err(|err| io_error(err.to_string()))?.len();
        if size > MAX_DOCUMENT_BYTES {
            return Err(io_error(format!(
                "document is {size} bytes (limit {MAX_DOCUMENT_BYTES})"
            )));
        }
        let text = fs::read_to_string(path).map_err(|err| io_error(err.to_string()))?;
        Self::from_json_str(kind, &text)
    }

    /// Parses the document bundled with this crate.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the bundled document is invalid.
    pub fn bundled(kind: ToolKind) -> Result<Self, CatalogError> {
        let text = match kind {
            ToolKind::Context => BUNDLED_CONTEXT_TOOLS,
            ToolKind::Action => BUNDLED_ACTION_TOOLS,
        };
        Self::from_json_str(kind, text)
    }

    /// Returns the document kind.
    #[must_use]
    pub const fn kind(&self) -> ToolKind {
        self.kind
    }

    /// Returns the number of tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns true when the document defines no tools.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Returns the parsed definitions in document order.
    #[must_use]
    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Returns the raw entries in document order.
    #[must_use]
    pub fn raw_tools(&self) -> &[Value] {
        &self.raw
    }

    /// Returns true when the document defines `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Looks up the parameter schema for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownTool`] when the document lacks `name`.
    pub fn schema(&self, name: &str) -> Result<&Schema, CatalogError> {
        self.index
            .get(name)
            .and_then(|position| self.tools.get(*position))
            .map(|tool| &tool.parameters)
            .ok_or_else(|| CatalogError::UnknownTool {
                kind: self.kind,
                name: name.to_string(),
            })
    }

    /// Checks that every name in `names` is defined.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownTool`] for the first missing name.
    pub fn require<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<(), CatalogError> {
        for name in names {
            self.schema(name)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Tool Catalog
// ============================================================================

/// Context and action documents loaded together.
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    /// Sensor reading tools.
    context: ToolDocument,
    /// Dispatchable action tools.
    action: ToolDocument,
}

impl ToolCatalog {
    /// Pairs a context document with an action document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] when a document has the wrong kind.
    pub fn new(context: ToolDocument, action: ToolDocument) -> Result<Self, CatalogError> {
        for (document, expected) in [(&context, ToolKind::Context), (&action, ToolKind::Action)] {
            if document.kind() != expected {
                return Err(CatalogError::Parse {
                    kind: expected,
                    error: format!("expected a {expected} document, got {}", document.kind()),
                });
            }
        }
        Ok(Self {
            context,
            action,
        })
    }

    /// Loads both bundled documents.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if a bundled document is invalid.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::load(None, None)
    }

    /// Loads documents from optional paths, falling back to the bundled ones.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when a document cannot be read or parsed.
    pub fn load(context: Option<&Path>, action: Option<&Path>) -> Result<Self, CatalogError> {
        let context = match context {
            Some(path) => ToolDocument::load(ToolKind::Context, path)?,
            None => ToolDocument::bundled(ToolKind::Context)?,
        };
        let action = match action {
            Some(path) => ToolDocument::load(ToolKind::Action, path)?,
            None => ToolDocument::bundled(ToolKind::Action)?,
        };
        Self::new(context, action)
    }

    /// Returns the context tool document.
    #[must_use]
    pub const fn context(&self) -> &ToolDocument {
        &self.context
    }

    /// Returns the action tool document.
    #[must_use]
    pub const fn action(&self) -> &ToolDocument {
        &self.action
    }
}
