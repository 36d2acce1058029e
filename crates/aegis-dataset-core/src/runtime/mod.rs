// crates/aegis-dataset-core/src/runtime/mod.rs
// ============================================================================
// Module: Aegis Dataset Runtime
// Description: Generators, decision engine, synthesizer, and dataset writer.
// Purpose: Turn a seeded RNG and a tool catalog into validated dataset splits.
// Dependencies: crate::core, aegis-dataset-schema, rand
// ============================================================================

//! ## Overview
//! Runtime modules follow the sample pipeline: context generators produce
//! readings, the context validator gates them, the decision engine picks the
//! dominant risk, and the synthesizer emits validated tool calls. The
//! assembler shapes each sample by bucket and the dataset writer drives the
//! bounded retry loop per split.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod assembler;
pub mod context;
pub mod dataset;
pub mod decision;
pub mod generators;
pub mod plan;
pub mod synthesizer;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use assembler::SampleAssembler;
pub use assembler::render_line;
pub use context::parse_context;
pub use context::require_generator_tools;
pub use context::validate_context;
pub use dataset::Attempt;
pub use dataset::DEFAULT_MAX_ATTEMPTS;
pub use dataset::DatasetWriter;
pub use dataset::retry_bounded;
pub use decision::candidates;
pub use decision::decide;
pub use plan::BucketPlan;
pub use synthesizer::MAX_TOOL_CALLS;
pub use synthesizer::synthesize;
