// crates/aegis-dataset-core/src/core/actions.rs
// ============================================================================
// Module: Action Tools
// Description: Action tools the synthesizer dispatches and the tool-call wire form.
// Purpose: Name actions with a closed enum and serialize calls for samples.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`ToolCall`] pairs an [`ActionTool`] with JSON arguments. On the wire a
//! call is `{"function": {"name": ..., "arguments": {...}}}`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde::Serializer;
use serde_json::Value;

// ============================================================================
// SECTION: Action Tools
// ============================================================================

/// Action tools the synthesizer can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionTool {
    /// `pre_tension_safety_belts`.
    PreTensionSafetyBelts,
    /// `trigger_hud_warning`.
    HudWarning,
    /// `trigger_cluster_visual_warning`.
    ClusterVisualWarning,
    /// `request_safe_mode`.
    RequestSafeMode,
    /// `log_safety_event`.
    LogSafetyEvent,
    /// `trigger_steering_vibration`.
    SteeringVibration,
    /// `trigger_drowsiness_alert_sound`.
    DrowsinessAlertSound,
    /// `trigger_rest_recommendation`.
    RestRecommendation,
    /// `activate_hazard_warning_signals`.
    HazardWarningSignals,
    /// `trigger_navigation_notification`.
    NavigationNotification,
}

impl ActionTool {
    /// Every action the synthesizer can emit.
    pub const ALL: [Self; 10] = [
        Self::PreTensionSafetyBelts,
        Self::HudWarning,
        Self::ClusterVisualWarning,
        Self::RequestSafeMode,
        Self::LogSafetyEvent,
        Self::SteeringVibration,
        Self::DrowsinessAlertSound,
        Self::RestRecommendation,
        Self::HazardWarningSignals,
        Self::NavigationNotification,
    ];

    /// Returns the action tool name.
    #[must_use]
    pub const fn tool_name(self) -> &'static str {
        match self {
            Self::PreTensionSafetyBelts => "pre_tension_safety_belts",
            Self::HudWarning => "trigger_hud_warning",
            Self::ClusterVisualWarning => "trigger_cluster_visual_warning",
            Self::RequestSafeMode => "request_safe_mode",
            Self::LogSafetyEvent => "log_safety_event",
            Self::SteeringVibration => "trigger_steering_vibration",
            Self::DrowsinessAlertSound => "trigger_drowsiness_alert_sound",
            Self::RestRecommendation => "trigger_rest_recommendation",
            Self::HazardWarningSignals => "activate_hazard_warning_signals",
            Self::NavigationNotification => "trigger_navigation_notification",
        }
    }
}

// ============================================================================
// SECTION: Argument Vocabularies
// ============================================================================

/// Three-step intensity used by haptic, audio, and restraint actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    /// Low intensity.
    Low,
    /// Medium intensity.
    Mid,
    /// High intensity.
    High,
}

/// Severity of a displayed or logged warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    /// Informational.
    Info,
    /// Warning.
    Warning,
    /// Danger.
    Danger,
}

// ============================================================================
// SECTION: Tool Calls
// ============================================================================

/// One validated tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    /// Invoked action.
    pub tool: ActionTool,
    /// Arguments, validated against the action schema.
    pub arguments: Value,
}

impl ToolCall {
    /// Returns the invoked tool name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.tool.tool_name()
    }
}

/// Wire envelope for a tool call.
#[derive(Serialize)]
struct WireCall<'a> {
    /// Function payload.
    function: WireFunction<'a>,
}

/// Wire function payload.
#[derive(Serialize)]
struct WireFunction<'a> {
    /// Tool name.
    name: &'a str,
    /// Call arguments.
    arguments: &'a Value,
}

impl Serialize for ToolCall {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireCall {
            function: WireFunction {
                name: self.name(),
                arguments: &self.arguments,
            },
        }
        .serialize(serializer)
    }
}
