// crates/aegis-dataset-config/src/schema.rs
// ============================================================================
// Module: Config Schemas
// Description: JSON schema builders for aegis-dataset.toml.
// Purpose: Provide canonical validation schema for config artifacts.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! The schema mirrors [`crate::DatasetConfig`]: every section is optional,
//! defaults match the built-in values, and unknown keys are rejected.

use serde_json::Value;
use serde_json::json;

use crate::config::DEFAULT_OUT_DIR;
use crate::config::MAX_MAX_ATTEMPTS;
use crate::config::MAX_SPLIT_SAMPLES;
use crate::config::MAX_TOTAL_PATH_LENGTH;
use crate::config::MIN_MAX_ATTEMPTS;
use crate::config::default_eval_samples;
use crate::config::default_max_attempts;
use crate::config::default_seed;
use crate::config::default_train_samples;

/// Returns the JSON schema for `aegis-dataset.toml`.
#[must_use]
pub fn config_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "aegis-dataset://schemas/config.schema.json",
        "title": "Aegis Dataset Configuration",
        "description": "Configuration for synthetic driving-assistant dataset runs.",
        "type": "object",
        "properties": {
            "generation": generation_schema(),
            "splits": splits_schema(),
            "paths": paths_schema()
        },
        "additionalProperties": false
    })
}

/// Schema for the `[generation]` section.
fn generation_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "seed": {
                "type": "integer",
                "minimum": 0,
                "default": default_seed(),
                "description": "Seed for the run RNG; the same seed reproduces the same files."
            },
            "max_attempts": {
                "type": "integer",
                "minimum": MIN_MAX_ATTEMPTS,
                "maximum": MAX_MAX_ATTEMPTS,
                "default": default_max_attempts(),
                "description": "Attempts per sample before the run aborts."
            }
        },
        "additionalProperties": false
    })
}

/// Schema for the `[splits]` section.
fn splits_schema() -> Value {
    let count = |default: usize, description: &str| {
        json!({
            "type": "integer",
            "minimum": 0,
            "maximum": MAX_SPLIT_SAMPLES,
            "default": default,
            "description": description
        })
    };
    json!({
        "type": "object",
        "properties": {
            "train": count(default_train_samples(), "Training split size."),
            "eval_a": count(default_eval_samples(), "Evaluation split size."),
            "eval_b": count(default_eval_samples(), "Degraded-context evaluation split size.")
        },
        "additionalProperties": false
    })
}

/// Schema for the `[paths]` section.
fn paths_schema() -> Value {
    let path = |description: &str| {
        json!({
            "type": "string",
            "minLength": 1,
            "maxLength": MAX_TOTAL_PATH_LENGTH,
            "description": description
        })
    };
    let mut out_dir = path("Directory receiving train.jsonl, eval_a.jsonl, and eval_b.jsonl.");
    if let Some(map) = out_dir.as_object_mut() {
        map.insert("default".to_string(), json!(DEFAULT_OUT_DIR));
    }
    json!({
        "type": "object",
        "properties": {
            "out_dir": out_dir,
            "context_schema": path("Context tool document; the bundled document when omitted."),
            "action_schema": path("Action tool document; the bundled document when omitted.")
        },
        "additionalProperties": false
    })
}
