// crates/aegis-dataset-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payloads.
// Purpose: Deterministic examples for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for dataset configuration, kept in sync with the schema.

/// Returns a canonical example `aegis-dataset.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[generation]
seed = 42
max_attempts = 30

[splits]
train = 12000
eval_a = 1000
eval_b = 1000

[paths]
out_dir = "DataSet"
# context_schema = "schemas/context_tools.json"
# action_schema = "schemas/action_tools.json"
"#,
    )
}
