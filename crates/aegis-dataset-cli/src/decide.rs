// crates/aegis-dataset-cli/src/decide.rs
// ============================================================================
// Module: Decide Command
// Description: Decision and tool-call report for one sensor context.
// Purpose: Show how the engine treats a hand-written context.
// Dependencies: aegis-dataset-core, aegis-dataset-schema, rand, serde
// ============================================================================

//! ## Overview
//! The context is validated against the catalog, every actionable risk is
//! listed in priority order, and the dominant decision is run through the
//! synthesizer with a seeded RNG.

// ============================================================================
// SECTION: Imports
// ============================================================================

use aegis_dataset_core::RiskDecision;
use aegis_dataset_core::SampleError;
use aegis_dataset_core::ToolCall;
use aegis_dataset_core::candidates;
use aegis_dataset_core::decide;
use aegis_dataset_core::parse_context;
use aegis_dataset_core::require_generator_tools;
use aegis_dataset_core::synthesize;
use aegis_dataset_schema::ToolCatalog;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Report
// ============================================================================

/// Engine output for one context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionReport {
    /// Actionable risks in priority order.
    pub candidates: Vec<RiskDecision>,
    /// Dominant risk, if any.
    pub decision: Option<RiskDecision>,
    /// Calls synthesized for the decision.
    pub tool_calls: Vec<ToolCall>,
}

// ============================================================================
// SECTION: Explain
// ============================================================================

/// Builds the report for `context`.
///
/// # Errors
///
/// Returns [`SampleError`] when the catalog lacks a generated tool or the
/// context fails validation.
pub fn explain(catalog: &ToolCatalog, context: &Value, seed: u64) -> Result<DecisionReport, SampleError> {
    require_generator_tools(catalog)?;
    let context = parse_context(catalog, context)?;
    let decision = decide(&context);
    let tool_calls = match &decision {
        Some(decision) => {
            let mut rng = StdRng::seed_from_u64(seed);
            synthesize(&mut rng, catalog, decision, &context)?
        }
        None => Vec::new(),
    };
    Ok(DecisionReport {
        candidates: candidates(&context),
        decision,
        tool_calls,
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
