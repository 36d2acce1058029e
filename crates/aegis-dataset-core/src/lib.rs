// crates/aegis-dataset-core/src/lib.rs
// ============================================================================
// Module: Aegis Dataset Core Library
// Description: Public API surface for the dataset synthesizer core.
// Purpose: Expose the sensor model, decision engine, and generation runtime.
// Dependencies: crate::{core, error, runtime}
// ============================================================================

//! ## Overview
//! Aegis dataset core synthesizes labeled examples for a tool-calling driving
//! assistant. Given simulated sensor readings it decides whether a safety risk
//! exists, which single risk takes priority, and which (at most two) tool calls
//! the assistant should emit, then renders a schema-validated JSON-lines
//! record.
//!
//! All randomness flows through one caller-provided RNG; a fixed seed yields
//! the same records regardless of how many retries occur.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod error;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use error::GenerationError;
pub use error::SampleError;
pub use runtime::Attempt;
pub use runtime::BucketPlan;
pub use runtime::DEFAULT_MAX_ATTEMPTS;
pub use runtime::DatasetWriter;
pub use runtime::MAX_TOOL_CALLS;
pub use runtime::SampleAssembler;
pub use runtime::candidates;
pub use runtime::decide;
pub use runtime::parse_context;
pub use runtime::render_line;
pub use runtime::require_generator_tools;
pub use runtime::retry_bounded;
pub use runtime::synthesize;
pub use runtime::validate_context;
