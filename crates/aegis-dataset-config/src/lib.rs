// crates/aegis-dataset-config/src/lib.rs
// ============================================================================
// Module: Aegis Dataset Config Library
// Description: Canonical config model, validation, and artifact generation.
// Purpose: Single source of truth for aegis-dataset.toml semantics.
// Dependencies: aegis-dataset-core, serde, toml
// ============================================================================

//! ## Overview
//! `aegis-dataset-config` defines the configuration model for dataset runs:
//! the RNG seed, the per-sample attempt ceiling, split sizes, and output and
//! schema paths. Validation is strict and fails closed. The crate also emits
//! the config JSON Schema and a canonical example file.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
pub use schema::config_schema;
