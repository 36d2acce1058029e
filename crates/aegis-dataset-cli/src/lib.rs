// crates/aegis-dataset-cli/src/lib.rs
// ============================================================================
// Module: Aegis Dataset CLI Library
// Description: Shared helpers for the aegis-dataset command-line interface.
// Purpose: Keep command logic reusable by the binary and its tests.
// Dependencies: aegis-dataset-core, aegis-dataset-config, tracing-subscriber
// ============================================================================

//! ## Overview
//! This library houses the message catalog, tracing initialization, and the
//! command bodies behind `generate` and `decide`. The binary entry point
//! (`src/main.rs`) parses arguments, calls into these helpers, and routes all
//! user-facing output through [`t!`](crate::t).

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Single-context decision reports.
pub mod decide;
/// Dataset generation runs.
pub mod generate;
/// Internationalization helpers and message catalog.
pub mod i18n;
/// Tracing subscriber setup.
pub mod telemetry;
