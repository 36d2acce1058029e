// crates/aegis-dataset-cli/tests/cli_commands.rs
// ============================================================================
// Module: CLI Command Tests
// Description: Integration tests that run the aegis-dataset binary.
// Purpose: Ensure commands write the expected files and fail closed.
// Dependencies: aegis-dataset-cli binary
// ============================================================================

//! ## Overview
//! Runs the binary end to end in temporary directories: generation with
//! reproducible output, decision reports, catalog checks, and config
//! validation.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use serde_json::Value;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

type TestResult = Result<(), String>;

fn aegis_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_aegis-dataset"))
}

fn run(args: &[&str], cwd: &Path) -> Result<Output, String> {
    Command::new(aegis_bin())
        .args(args)
        .current_dir(cwd)
        .env_remove("AEGIS_DATASET_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .map_err(|err| format!("failed to run binary: {err}"))
}

fn stdout_json(output: &Output) -> Result<Value, String> {
    serde_json::from_slice(&output.stdout).map_err(|err| {
        format!("stdout is not JSON ({err}): {}", String::from_utf8_lossy(&output.stdout))
    })
}

fn generate(dir: &Path, out: &str, seed: &str) -> Result<Output, String> {
    run(
        &["generate", "--seed", seed, "--train", "40", "--eval-a", "10", "--eval-b", "10", "--out-dir", out],
        dir,
    )
}

fn split_files(dir: &Path) -> Result<Vec<String>, String> {
    ["train.jsonl", "eval_a.jsonl", "eval_b.jsonl"]
        .iter()
        .map(|name| fs::read_to_string(dir.join(name)).map_err(|err| format!("{name}: {err}")))
        .collect()
}

// ============================================================================
// SECTION: Generate
// ============================================================================

#[test]
fn generate_writes_three_splits_and_summary() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let output = generate(dir.path(), "out", "42")?;
    if !output.status.success() {
        return Err(format!("generate failed: {}", String::from_utf8_lossy(&output.stderr)));
    }
    let summary = stdout_json(&output)?;
    for (split, expected) in [("train", 40), ("eval_a", 10), ("eval_b", 10)] {
        let counts = summary.get(split).and_then(Value::as_object).ok_or(format!("missing {split}"))?;
        let total: u64 = counts.values().filter_map(Value::as_u64).sum();
        if total != expected {
            return Err(format!("{split}: expected {expected} samples, got {total}"));
        }
    }
    let train = summary.pointer("/train/single_action").and_then(Value::as_u64);
    if train != Some(16) {
        return Err(format!("unexpected single_action count {train:?}"));
    }

    let files = split_files(&dir.path().join("out"))?;
    for (text, expected) in files.iter().zip([40, 10, 10]) {
        if text.lines().count() != expected {
            return Err(format!("expected {expected} lines"));
        }
    }
    let eval_line = files.get(1).and_then(|text| text.lines().next()).ok_or("empty eval_a")?;
    let record: Value = serde_json::from_str(eval_line).map_err(|err| err.to_string())?;
    if record.get("metadata").and_then(Value::as_str) != Some("eval") {
        return Err(format!("unexpected eval metadata: {eval_line}"));
    }
    Ok(())
}

#[test]
fn generate_is_reproducible_for_a_seed() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    for out in ["first", "second"] {
        let output = generate(dir.path(), out, "7")?;
        if !output.status.success() {
            return Err(format!("generate failed: {}", String::from_utf8_lossy(&output.stderr)));
        }
    }
    let first = split_files(&dir.path().join("first"))?;
    let second = split_files(&dir.path().join("second"))?;
    if first != second {
        return Err("same seed produced different files".to_string());
    }
    Ok(())
}

#[test]
fn generate_reads_config_and_flags_override_it() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let config = "[generation]\nseed = 3\n\n[splits]\ntrain = 5\neval_a = 2\neval_b = 2\n\n[paths]\nout_dir = \"from-config\"\n";
    fs::write(dir.path().join("aegis-dataset.toml"), config).map_err(|err| err.to_string())?;
    let output = run(&["generate", "--train", "6"], dir.path())?;
    if !output.status.success() {
        return Err(format!("generate failed: {}", String::from_utf8_lossy(&output.stderr)));
    }
    let files = split_files(&dir.path().join("from-config"))?;
    let lines: Vec<usize> = files.iter().map(|text| text.lines().count()).collect();
    if lines != [6, 2, 2] {
        return Err(format!("unexpected line counts {lines:?}"));
    }
    Ok(())
}

#[test]
fn generate_rejects_zero_attempt_ceiling() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let output = run(&["generate", "--max-tries", "0", "--out-dir", "out"], dir.path())?;
    if output.status.success() {
        return Err("zero attempt ceiling was accepted".to_string());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.contains("max_attempts") {
        return Err(format!("unexpected stderr: {stderr}"));
    }
    if dir.path().join("out").exists() {
        return Err("output directory created despite invalid config".to_string());
    }
    Ok(())
}

#[test]
fn generate_fails_on_missing_schema_override() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let output = run(
        &["generate", "--train", "1", "--context-schema", "absent.json", "--out-dir", "out"],
        dir.path(),
    )?;
    if output.status.success() {
        return Err("missing schema document was accepted".to_string());
    }
    Ok(())
}

// ============================================================================
// SECTION: Decide
// ============================================================================

#[test]
fn decide_reports_dominant_risk() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let context = r#"{"get_forward_collision_risk":{"score":0.85,"level":"high","confidence":0.95}}"#;
    fs::write(dir.path().join("context.json"), context).map_err(|err| err.to_string())?;
    let output = run(&["decide", "--context", "context.json"], dir.path())?;
    if !output.status.success() {
        return Err(format!("decide failed: {}", String::from_utf8_lossy(&output.stderr)));
    }
    let report = stdout_json(&output)?;
    if report.pointer("/decision/risk_type") != Some(&Value::from("forward_collision"))
        || report.pointer("/decision/tier") != Some(&Value::from("full"))
    {
        return Err(format!("unexpected decision: {report}"));
    }
    let names: Vec<&str> = report
        .get("tool_calls")
        .and_then(Value::as_array)
        .ok_or("tool_calls missing")?
        .iter()
        .filter_map(|call| call.pointer("/function/name").and_then(Value::as_str))
        .collect();
    if names != ["pre_tension_safety_belts", "trigger_hud_warning"] {
        return Err(format!("unexpected calls {names:?}"));
    }
    Ok(())
}

#[test]
fn decide_rejects_invalid_context() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let context = r#"{"get_forward_collision_risk":{"score":0.85,"level":"high"}}"#;
    fs::write(dir.path().join("context.json"), context).map_err(|err| err.to_string())?;
    let output = run(&["decide", "--context", "context.json"], dir.path())?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    if output.status.success() || !stderr.contains("confidence") {
        return Err(format!("expected a validation failure, got: {stderr}"));
    }
    Ok(())
}

// ============================================================================
// SECTION: Catalog and Config
// ============================================================================

#[test]
fn catalog_check_reports_tool_counts() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let output = run(&["catalog", "check"], dir.path())?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !output.status.success() || !stdout.contains("25 context tools, 25 action tools") {
        return Err(format!("unexpected output: {stdout}"));
    }
    Ok(())
}

#[test]
fn config_validate_accepts_defaults_and_rejects_unknown_keys() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let output = run(&["config", "validate"], dir.path())?;
    if !output.status.success() {
        return Err(format!("defaults rejected: {}", String::from_utf8_lossy(&output.stderr)));
    }
    fs::write(dir.path().join("bad.toml"), "[generation]\nmystery = 1\n")
        .map_err(|err| err.to_string())?;
    let output = run(&["config", "validate", "--config", "bad.toml"], dir.path())?;
    if output.status.success() {
        return Err("unknown key accepted".to_string());
    }
    Ok(())
}
