// crates/aegis-dataset-core/src/core/sample.rs
// ============================================================================
// Module: Dataset Samples
// Description: Sample envelope, chat messages, buckets, and splits.
// Purpose: Define the JSON-lines record and the run summary shapes.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`Sample`] is one JSON-lines record: `metadata`, the action `tools`
//! payload, and exactly three `messages` (developer, user, assistant). The
//! assistant message carries either non-empty text or tool calls, never both.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::core::actions::ToolCall;

// ============================================================================
// SECTION: Buckets
// ============================================================================

/// Sample category controlling which generation path produces a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// One actionable risk answered with tool calls.
    SingleAction,
    /// A primary risk plus extra readings, answered with tool calls.
    MultiAction,
    /// Low-risk readings answered in text.
    NoAction,
    /// An uncertain reading answered with a clarification request.
    LowConfidence,
    /// Small talk answered in text.
    GeneralConversation,
}

impl Bucket {
    /// Buckets in plan order.
    pub const ALL: [Self; 5] = [
        Self::SingleAction,
        Self::MultiAction,
        Self::NoAction,
        Self::LowConfidence,
        Self::GeneralConversation,
    ];

    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SingleAction => "single_action",
            Self::MultiAction => "multi_action",
            Self::NoAction => "no_action",
            Self::LowConfidence => "low_confidence",
            Self::GeneralConversation => "general_conversation",
        }
    }

    /// Returns true for buckets answered with tool calls.
    #[must_use]
    pub const fn expects_action(self) -> bool {
        matches!(self, Self::SingleAction | Self::MultiAction)
    }

    /// Returns the position in [`Bucket::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::SingleAction => 0,
            Self::MultiAction => 1,
            Self::NoAction => 2,
            Self::LowConfidence => 3,
            Self::GeneralConversation => 4,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Splits
// ============================================================================

/// Output dataset split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetSplit {
    /// Training split.
    Train,
    /// Evaluation split drawn like training data.
    EvalA,
    /// Evaluation split with degraded sensors and adverse weather.
    EvalB,
}

impl DatasetSplit {
    /// Splits in generation order.
    pub const ALL: [Self; 3] = [Self::Train, Self::EvalA, Self::EvalB];

    /// Returns the split label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::EvalA => "eval_a",
            Self::EvalB => "eval_b",
        }
    }

    /// Returns the output file name.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Train => "train.jsonl",
            Self::EvalA => "eval_a.jsonl",
            Self::EvalB => "eval_b.jsonl",
        }
    }

    /// Returns the `metadata` value written into each record.
    #[must_use]
    pub const fn metadata(self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::EvalA | Self::EvalB => "eval",
        }
    }
}

impl fmt::Display for DatasetSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layout of the user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserFormat {
    /// Sensor context only.
    SensorOnly,
    /// Free-text inquiry followed by the sensor context.
    InquiryPlusSensor,
}

// ============================================================================
// SECTION: Messages
// ============================================================================

/// Chat message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// System-level instruction.
    Developer,
    /// Vehicle occupant.
    User,
    /// The assistant model.
    Assistant,
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    /// Author.
    pub role: Role,
    /// Text content; empty when the message carries tool calls.
    pub content: String,
    /// Tool calls, present only on assistant tool-call turns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl Message {
    /// Builds a developer instruction.
    #[must_use]
    pub fn developer(content: impl Into<String>) -> Self {
        Self::text(Role::Developer, content)
    }

    /// Builds a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::text(Role::User, content)
    }

    /// Builds an assistant text reply.
    #[must_use]
    pub fn assistant_reply(content: impl Into<String>) -> Self {
        Self::text(Role::Assistant, content)
    }

    /// Builds an assistant tool-call turn; `None` when `calls` is empty.
    #[must_use]
    pub fn assistant_calls(calls: Vec<ToolCall>) -> Option<Self> {
        if calls.is_empty() {
            return None;
        }
        Some(Self {
            role: Role::Assistant,
            content: String::new(),
            tool_calls: Some(calls),
        })
    }

    /// Builds a plain text message.
    fn text(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: None,
        }
    }
}

// ============================================================================
// SECTION: Sample
// ============================================================================

/// Top-level keys every record carries, in serialization order.
pub const SAMPLE_KEYS: [&str; 3] = ["metadata", "tools", "messages"];

/// One dataset record.
#[derive(Debug, Clone, Serialize)]
pub struct Sample<'a> {
    /// `train` or `eval`.
    pub metadata: &'static str,
    /// Action tool definitions, verbatim from the action document.
    pub tools: &'a [Value],
    /// Developer, user, and assistant messages.
    pub messages: [Message; 3],
}

// ============================================================================
// SECTION: Summaries
// ============================================================================

/// Per-bucket sample counts for one split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketCounts {
    /// `single_action` samples.
    pub single_action: usize,
    /// `multi_action` samples.
    pub multi_action: usize,
    /// `no_action` samples.
    pub no_action: usize,
    /// `low_confidence` samples.
    pub low_confidence: usize,
    /// `general_conversation` samples.
    pub general_conversation: usize,
}

impl BucketCounts {
    /// Returns the count for `bucket`.
    #[must_use]
    pub const fn get(&self, bucket: Bucket) -> usize {
        match bucket {
            Bucket::SingleAction => self.single_action,
            Bucket::MultiAction => self.multi_action,
            Bucket::NoAction => self.no_action,
            Bucket::LowConfidence => self.low_confidence,
            Bucket::GeneralConversation => self.general_conversation,
        }
    }

    /// Increments the count for `bucket`.
    pub const fn record(&mut self, bucket: Bucket) {
        match bucket {
            Bucket::SingleAction => self.single_action += 1,
            Bucket::MultiAction => self.multi_action += 1,
            Bucket::NoAction => self.no_action += 1,
            Bucket::LowConfidence => self.low_confidence += 1,
            Bucket::GeneralConversation => self.general_conversation += 1,
        }
    }

    /// Returns the sum over all buckets.
    #[must_use]
    pub fn total(&self) -> usize {
        Bucket::ALL.into_iter().map(|bucket| self.get(bucket)).sum()
    }
}

/// Per-split counts for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Training split counts.
    pub train: BucketCounts,
    /// First evaluation split counts.
    pub eval_a: BucketCounts,
    /// Second evaluation split counts.
    pub eval_b: BucketCounts,
}

impl RunSummary {
    /// Stores the counts for `split`.
    pub const fn set(&mut self, split: DatasetSplit, counts: BucketCounts) {
        match split {
            DatasetSplit::Train => self.train = counts,
            DatasetSplit::EvalA => self.eval_a = counts,
            DatasetSplit::EvalB => self.eval_b = counts,
        }
    }
}
