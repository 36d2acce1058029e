//! Sample assembler tests for aegis-dataset-core.
// crates/aegis-dataset-core/tests/assembler.rs
// =============================================================================
// Module: Sample Assembler Tests
// Description: Record shape, bucket semantics, and seeded determinism.
// Purpose: Ensure every rendered record is a valid single-line training sample.
// =============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only assertions are permitted."
)]

use aegis_dataset_core::Bucket;
use aegis_dataset_core::DatasetSplit;
use aegis_dataset_core::MAX_TOOL_CALLS;
use aegis_dataset_core::Role;
use aegis_dataset_core::SAMPLE_KEYS;
use aegis_dataset_core::SampleAssembler;
use aegis_dataset_core::render_line;
use aegis_dataset_schema::ToolCatalog;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::Value;

type TestResult = Result<(), String>;

fn render_many(seed: u64, bucket: Bucket, split: DatasetSplit, count: usize) -> Result<Vec<String>, String> {
    let catalog = ToolCatalog::bundled().map_err(|err| err.to_string())?;
    let assembler = SampleAssembler::new(&catalog).map_err(|err| err.to_string())?;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut lines = Vec::with_capacity(count);
    for _ in 0..count {
        let sample = assembler.assemble(&mut rng, bucket, split).map_err(|err| err.to_string())?;
        lines.push(render_line(&sample).map_err(|err| err.to_string())?);
    }
    Ok(lines)
}

fn parse(line: &str) -> Result<Value, String> {
    serde_json::from_str(line).map_err(|err| err.to_string())
}

fn assistant(record: &Value) -> Result<&Value, String> {
    record
        .pointer("/messages/2")
        .ok_or_else(|| format!("record has no assistant message: {record}"))
}

// ============================================================================
// SECTION: Record Shape
// ============================================================================

#[test]
fn records_have_exactly_three_top_level_keys() -> TestResult {
    for bucket in Bucket::ALL {
        for line in render_many(7, bucket, DatasetSplit::Train, 20)? {
            if line.contains('\n') {
                return Err(format!("{bucket}: line contains a newline"));
            }
            let record = parse(&line)?;
            let keys: Vec<&str> = record
                .as_object()
                .ok_or("record is not an object")?
                .keys()
                .map(String::as_str)
                .collect();
            if keys != SAMPLE_KEYS {
                return Err(format!("{bucket}: unexpected keys {keys:?}"));
            }
        }
    }
    Ok(())
}

#[test]
fn messages_follow_developer_user_assistant_order() -> TestResult {
    for line in render_many(11, Bucket::MultiAction, DatasetSplit::EvalA, 20)? {
        let record = parse(&line)?;
        let roles: Vec<&str> = record
            .get("messages")
            .and_then(Value::as_array)
            .ok_or("messages missing")?
            .iter()
            .filter_map(|message| message.get("role").and_then(Value::as_str))
            .collect();
        if roles != ["developer", "user", "assistant"] {
            return Err(format!("unexpected roles {roles:?}"));
        }
        let user = record.pointer("/messages/1/content").and_then(Value::as_str).unwrap_or("");
        if !user.contains("[Sensor Context] SENSOR_CONTEXT=") {
            return Err(format!("user message lacks sensor context: {user}"));
        }
    }
    Ok(())
}

#[test]
fn metadata_marks_eval_splits() -> TestResult {
    for (split, expected) in
        [(DatasetSplit::Train, "train"), (DatasetSplit::EvalA, "eval"), (DatasetSplit::EvalB, "eval")]
    {
        for line in render_many(3, Bucket::NoAction, split, 5)? {
            let record = parse(&line)?;
            if record.get("metadata").and_then(Value::as_str) != Some(expected) {
                return Err(format!("{split}: unexpected metadata in {line}"));
            }
        }
    }
    Ok(())
}

#[test]
fn tools_are_the_action_document() -> TestResult {
    let catalog = ToolCatalog::bundled().map_err(|err| err.to_string())?;
    let line = render_many(5, Bucket::GeneralConversation, DatasetSplit::Train, 1)?;
    let record = parse(line.first().ok_or("no line")?)?;
    let tools = record.get("tools").and_then(Value::as_array).ok_or("tools missing")?;
    if tools.as_slice() != catalog.action().raw_tools() {
        return Err("tools differ from the action document".to_string());
    }
    Ok(())
}

// ============================================================================
// SECTION: Bucket Semantics
// ============================================================================

#[test]
fn single_action_always_calls_tools() -> TestResult {
    for line in render_many(21, Bucket::SingleAction, DatasetSplit::Train, 60)? {
        let record = parse(&line)?;
        let turn = assistant(&record)?;
        let calls = turn.get("tool_calls").and_then(Value::as_array).ok_or("no tool calls")?;
        if calls.is_empty() || calls.len() > MAX_TOOL_CALLS {
            return Err(format!("unexpected call count {}", calls.len()));
        }
        if turn.get("content").and_then(Value::as_str) != Some("") {
            return Err(format!("tool-call turn carries content: {turn}"));
        }
    }
    Ok(())
}

#[test]
fn content_and_tool_calls_are_exclusive() -> TestResult {
    for bucket in Bucket::ALL {
        for line in render_many(33, bucket, DatasetSplit::EvalB, 30)? {
            let record = parse(&line)?;
            let turn = assistant(&record)?;
            let content = turn.get("content").and_then(Value::as_str).unwrap_or("");
            let has_calls = turn.get("tool_calls").is_some();
            if has_calls == content.is_empty() {
                continue;
            }
            return Err(format!("{bucket}: malformed assistant turn {turn}"));
        }
    }
    Ok(())
}

#[test]
fn non_action_buckets_never_call_tools() -> TestResult {
    let action_buckets: Vec<Bucket> =
        Bucket::ALL.into_iter().filter(|bucket| bucket.expects_action()).collect();
    if action_buckets != [Bucket::SingleAction, Bucket::MultiAction] {
        return Err(format!("unexpected action buckets {action_buckets:?}"));
    }
    for bucket in Bucket::ALL.into_iter().filter(|bucket| !bucket.expects_action()) {
        for line in render_many(44, bucket, DatasetSplit::Train, 40)? {
            let record = parse(&line)?;
            if assistant(&record)?.get("tool_calls").is_some() {
                return Err(format!("{bucket}: unexpected tool calls in {line}"));
            }
        }
    }
    Ok(())
}

#[test]
fn low_confidence_asks_for_clarification() -> TestResult {
    let hints = [
        "forward_collision",
        "vehicle_intrusion",
        "blind_spot",
        "lane_departure",
        "drowsiness",
        "environmental_hazards",
        "위험",
    ];
    for line in render_many(55, Bucket::LowConfidence, DatasetSplit::Train, 40)? {
        let record = parse(&line)?;
        let content = assistant(&record)?.get("content").and_then(Value::as_str).unwrap_or("");
        if !hints.iter().any(|hint| content.contains(hint)) {
            return Err(format!("clarification names no risk: {content}"));
        }
    }
    Ok(())
}

#[test]
fn assistant_role_is_last() -> TestResult {
    let catalog = ToolCatalog::bundled().map_err(|err| err.to_string())?;
    let assembler = SampleAssembler::new(&catalog).map_err(|err| err.to_string())?;
    let mut rng = StdRng::seed_from_u64(9);
    let sample = assembler
        .assemble(&mut rng, Bucket::SingleAction, DatasetSplit::Train)
        .map_err(|err| err.to_string())?;
    let roles = sample.messages.each_ref().map(|message| message.role);
    if roles != [Role::Developer, Role::User, Role::Assistant] {
        return Err(format!("unexpected roles {roles:?}"));
    }
    Ok(())
}

// ============================================================================
// SECTION: Determinism
// ============================================================================

#[test]
fn same_seed_renders_identical_records() -> TestResult {
    for bucket in Bucket::ALL {
        let first = render_many(1234, bucket, DatasetSplit::EvalB, 10)?;
        let second = render_many(1234, bucket, DatasetSplit::EvalB, 10)?;
        if first != second {
            return Err(format!("{bucket}: records differ between identical seeds"));
        }
    }
    Ok(())
}
