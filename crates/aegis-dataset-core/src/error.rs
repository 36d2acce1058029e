// crates/aegis-dataset-core/src/error.rs
// ============================================================================
// Module: Generation Errors
// Description: Per-sample and per-run failure types.
// Purpose: Classify failures as redraw-and-retry or abort-the-run.
// Dependencies: thiserror, aegis-dataset-schema
// ============================================================================

//! ## Overview
//! [`SampleError`] is raised while assembling one sample. Schema violations
//! and record-shape failures are recoverable: the draft is discarded and
//! redrawn. Catalog mismatches, inconsistent decisions, and sampling defects
//! are programming errors and abort immediately. [`GenerationError`] is the
//! run-level failure, always fatal.

// ============================================================================
// SECTION: Imports
// ============================================================================

use aegis_dataset_schema::CatalogError;
use aegis_dataset_schema::SchemaError;
use thiserror::Error;

use crate::core::Bucket;
use crate::core::DatasetSplit;
use crate::core::RiskType;

// ============================================================================
// SECTION: Sample Errors
// ============================================================================

/// Failure while assembling one sample.
#[derive(Debug, Error)]
pub enum SampleError {
    /// A reading or tool call violated its schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// A tool is missing from the loaded documents.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// The decided risk has no matching reading in the context.
    #[error("decision names {risk} but the context has no matching reading")]
    MissingContext {
        /// Decided risk.
        risk: RiskType,
    },
    /// A weighted draw was configured with invalid weights.
    #[error("invalid sampling weights: {error}")]
    Sampling {
        /// Sampler error text.
        error: String,
    },
    /// A value could not be converted to JSON.
    #[error("serialization failed: {error}")]
    Serialization {
        /// Serializer error text.
        error: String,
    },
    /// The rendered record does not carry exactly the expected top-level keys.
    #[error("top-level keys mismatch: {keys:?}")]
    TopLevelKeys {
        /// Keys actually present.
        keys: Vec<String>,
    },
    /// The rendered record contains a raw line break.
    #[error("JSONL line contains newline")]
    EmbeddedNewline,
}

impl SampleError {
    /// Returns true when the sample should be redrawn.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Schema(_) | Self::TopLevelKeys { .. } | Self::EmbeddedNewline)
    }
}

impl From<serde_json::Error> for SampleError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            error: error.to_string(),
        }
    }
}

impl From<rand::distributions::WeightedError> for SampleError {
    fn from(error: rand::distributions::WeightedError) -> Self {
        Self::Sampling {
            error: error.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Generation Errors
// ============================================================================

/// Run-level generation failure.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Every attempt for one sample failed recoverably.
    #[error(
        "failed to generate a valid {split} sample after {attempts} tries (bucket={bucket}): \
         {last_error}"
    )]
    Exhausted {
        /// Split being generated.
        split: DatasetSplit,
        /// Bucket of the failing sample.
        bucket: Bucket,
        /// Attempts made.
        attempts: usize,
        /// Error from the final attempt.
        last_error: SampleError,
    },
    /// A sample failed with a non-recoverable error.
    #[error("fatal error generating {split} sample (bucket={bucket}): {error}")]
    Sample {
        /// Split being generated.
        split: DatasetSplit,
        /// Bucket of the failing sample.
        bucket: Bucket,
        /// Underlying error.
        error: SampleError,
    },
    /// The tool catalog lacks a tool the generator uses.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// Writing a split failed.
    #[error("failed to write {split} dataset: {error}")]
    Io {
        /// Split being written.
        split: DatasetSplit,
        /// Underlying error.
        error: std::io::Error,
    },
}
