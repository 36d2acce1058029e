// crates/aegis-dataset-core/src/runtime/synthesizer.rs
// ============================================================================
// Module: Tool-Call Synthesizer
// Description: Per-risk, per-tier dispatch of validated tool calls.
// Purpose: Turn the dominant risk decision into at most two tool calls.
// Dependencies: rand, serde_json, aegis-dataset-schema, crate::core
// ============================================================================

//! ## Overview
//! The synthesizer dispatches on the decided risk and its confidence tier.
//! Every call is validated against its action schema before it is accepted,
//! at locator `action:<name>`. An unactionable tier yields no calls for any
//! risk; the EV battery branch is driven by the reading's level instead of the
//! tier. Output is truncated to [`MAX_TOOL_CALLS`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use aegis_dataset_schema::ToolCatalog;
use aegis_dataset_schema::validate;
use rand::Rng;
use serde_json::Value;
use serde_json::json;

use crate::core::ActionTool;
use crate::core::AlertLevel;
use crate::core::ConfidenceTier;
use crate::core::Intensity;
use crate::core::RiskDecision;
use crate::core::RiskType;
use crate::core::SensorContext;
use crate::core::SeverityLevel;
use crate::core::ThermalLevel;
use crate::core::ToolCall;
use crate::core::phrases;
use crate::error::SampleError;
use crate::runtime::generators::pick;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Hard cap on tool calls per assistant turn.
pub const MAX_TOOL_CALLS: usize = 2;

// ============================================================================
// SECTION: Call Builder
// ============================================================================

/// Accumulates validated calls for one decision.
struct CallBuilder<'a> {
    /// Catalog providing action schemas.
    catalog: &'a ToolCatalog,
    /// Accepted calls in dispatch order.
    calls: Vec<ToolCall>,
}

impl<'a> CallBuilder<'a> {
    /// Starts an empty builder.
    const fn new(catalog: &'a ToolCatalog) -> Self {
        Self {
            catalog,
            calls: Vec::new(),
        }
    }

    /// Validates `arguments` against the action schema and appends the call.
    fn push(&mut self, tool: ActionTool, arguments: Value) -> Result<&mut Self, SampleError> {
        let name = tool.tool_name();
        let schema = self.catalog.action().schema(name)?;
        validate(&arguments, schema, &format!("action:{name}"))?;
        self.calls.push(ToolCall {
            tool,
            arguments,
        });
        Ok(self)
    }

    /// Returns the accepted calls, truncated to [`MAX_TOOL_CALLS`].
    fn finish(mut self) -> Vec<ToolCall> {
        self.calls.truncate(MAX_TOOL_CALLS);
        self.calls
    }
}

// ============================================================================
// SECTION: Synthesis
// ============================================================================

/// Produces the validated tool calls for `decision`.
///
/// # Errors
///
/// Returns [`SampleError::Schema`] when a call violates its schema,
/// [`SampleError::Catalog`] when an action is missing from the catalog, and
/// [`SampleError::MissingContext`] when the context lacks the decided reading.
pub fn synthesize<R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &ToolCatalog,
    decision: &RiskDecision,
    context: &SensorContext,
) -> Result<Vec<ToolCall>, SampleError> {
    let tier = decision.tier;
    if !tier.is_actionable() {
        return Ok(Vec::new());
    }
    let missing = || SampleError::MissingContext {
        risk: decision.risk_type,
    };
    let mut calls = CallBuilder::new(catalog);
    match decision.risk_type {
        RiskType::ForwardCollision => {
            let level = context.forward_collision.as_ref().ok_or_else(missing)?.level;
            forward_collision(rng, &mut calls, tier, level)?;
        }
        RiskType::VehicleIntrusion => {
            let level = context.intrusion.as_ref().ok_or_else(missing)?.level;
            vehicle_intrusion(&mut calls, tier, level)?;
        }
        RiskType::BlindSpot => {
            let level = context.blind_spot.as_ref().ok_or_else(missing)?.level;
            blind_spot(rng, &mut calls, tier, level)?;
        }
        RiskType::LaneDeparture => lane_departure(rng, &mut calls, tier)?,
        RiskType::Drowsiness => drowsiness(rng, &mut calls, tier)?,
        RiskType::EvBatteryCritical => {
            let level = context.ev_battery.as_ref().ok_or_else(missing)?.level;
            ev_battery(&mut calls, level)?;
        }
        RiskType::EnvironmentalHazards => environmental_hazards(rng, &mut calls, tier)?,
    }
    Ok(calls.finish())
}

/// Belts plus HUD for a confident high risk, HUD for warnings, cluster info otherwise.
fn forward_collision<R: Rng + ?Sized>(
    rng: &mut R,
    calls: &mut CallBuilder<'_>,
    tier: ConfidenceTier,
    level: SeverityLevel,
) -> Result<(), SampleError> {
    match tier {
        ConfidenceTier::Full if level == SeverityLevel::High => {
            calls.push(
                ActionTool::PreTensionSafetyBelts,
                json!({ "enabled": true, "level": Intensity::High }),
            )?;
            let message = pick(rng, &phrases::HUD_FORWARD_CRITICAL);
            calls.push(
                ActionTool::HudWarning,
                json!({ "message": message, "level": AlertLevel::Danger }),
            )?;
        }
        ConfidenceTier::Full | ConfidenceTier::Warning => {
            let message = pick(rng, &phrases::HUD_FORWARD_WARNING);
            let severity =
                if level == SeverityLevel::High { AlertLevel::Danger } else { AlertLevel::Warning };
            calls.push(ActionTool::HudWarning, json!({ "message": message, "level": severity }))?;
        }
        ConfidenceTier::Low => {
            let message = pick(rng, &phrases::CLUSTER_FORWARD_INFO);
            calls.push(
                ActionTool::ClusterVisualWarning,
                json!({ "message": message, "level": AlertLevel::Info }),
            )?;
        }
        ConfidenceTier::Unactionable => {}
    }
    Ok(())
}

/// Safe mode plus danger log for a confident severe intrusion, logs otherwise.
fn vehicle_intrusion(
    calls: &mut CallBuilder<'_>,
    tier: ConfidenceTier,
    level: SeverityLevel,
) -> Result<(), SampleError> {
    let log = |message: &str, level: AlertLevel| {
        json!({
            "event_type": phrases::INTRUSION_EVENT_TYPE,
            "message": message,
            "level": level,
        })
    };
    match tier {
        ConfidenceTier::Full
            if matches!(level, SeverityLevel::High | SeverityLevel::Critical) =>
        {
            calls
                .push(
                    ActionTool::RequestSafeMode,
                    json!({ "enabled": true, "reason": phrases::INTRUSION_EVENT_TYPE }),
                )?
                .push(
                    ActionTool::LogSafetyEvent,
                    log(phrases::INTRUSION_SUSPECTED, AlertLevel::Danger),
                )?;
        }
        ConfidenceTier::Full | ConfidenceTier::Warning => {
            calls.push(
                ActionTool::LogSafetyEvent,
                log(phrases::INTRUSION_SUSPECTED, AlertLevel::Warning),
            )?;
        }
        ConfidenceTier::Low => {
            calls.push(
                ActionTool::LogSafetyEvent,
                log(phrases::INTRUSION_LOW_CONFIDENCE, AlertLevel::Info),
            )?;
        }
        ConfidenceTier::Unactionable => {}
    }
    Ok(())
}

/// Steering vibration plus HUD when confident, low vibration otherwise.
fn blind_spot<R: Rng + ?Sized>(
    rng: &mut R,
    calls: &mut CallBuilder<'_>,
    tier: ConfidenceTier,
    level: SeverityLevel,
) -> Result<(), SampleError> {
    match tier {
        ConfidenceTier::Full | ConfidenceTier::Warning => {
            let intensity = if tier == ConfidenceTier::Full && level == SeverityLevel::High {
                Intensity::High
            } else {
                Intensity::Mid
            };
            let duration = pick(rng, &[800, 1200, 1500, 2000]);
            calls.push(
                ActionTool::SteeringVibration,
                json!({ "level": intensity, "duration_ms": duration }),
            )?;
            let message = pick(rng, &phrases::HUD_BLIND_SPOT);
            calls.push(
                ActionTool::HudWarning,
                json!({ "message": message, "level": AlertLevel::Warning }),
            )?;
        }
        ConfidenceTier::Low => {
            let duration = pick(rng, &[600, 800, 1000]);
            calls.push(
                ActionTool::SteeringVibration,
                json!({ "level": Intensity::Low, "duration_ms": duration }),
            )?;
        }
        ConfidenceTier::Unactionable => {}
    }
    Ok(())
}

/// Steering vibration scaled by tier.
fn lane_departure<R: Rng + ?Sized>(
    rng: &mut R,
    calls: &mut CallBuilder<'_>,
    tier: ConfidenceTier,
) -> Result<(), SampleError> {
    let (intensity, duration) = match tier {
        ConfidenceTier::Full => (Intensity::High, pick(rng, &[600, 900, 1200])),
        ConfidenceTier::Warning => (Intensity::Mid, pick(rng, &[600, 900, 1200])),
        ConfidenceTier::Low => (Intensity::Low, pick(rng, &[500, 700, 900])),
        ConfidenceTier::Unactionable => return Ok(()),
    };
    calls.push(
        ActionTool::SteeringVibration,
        json!({ "level": intensity, "duration_ms": duration }),
    )?;
    Ok(())
}

/// Alert sound scaled by tier, plus a rest recommendation when confident.
fn drowsiness<R: Rng + ?Sized>(
    rng: &mut R,
    calls: &mut CallBuilder<'_>,
    tier: ConfidenceTier,
) -> Result<(), SampleError> {
    let intensity = match tier {
        ConfidenceTier::Full => Intensity::High,
        ConfidenceTier::Warning => Intensity::Mid,
        ConfidenceTier::Low => Intensity::Low,
        ConfidenceTier::Unactionable => return Ok(()),
    };
    calls.push(
        ActionTool::DrowsinessAlertSound,
        json!({ "enabled": true, "level": intensity }),
    )?;
    if tier == ConfidenceTier::Full {
        let reason = pick(rng, &phrases::REST_REASONS);
        calls.push(
            ActionTool::RestRecommendation,
            json!({ "reason": reason, "level": Intensity::High }),
        )?;
    }
    Ok(())
}

/// Cluster danger plus safe mode for a critical pack, cluster warning otherwise.
fn ev_battery(calls: &mut CallBuilder<'_>, level: ThermalLevel) -> Result<(), SampleError> {
    if level == ThermalLevel::Critical {
        calls
            .push(
                ActionTool::ClusterVisualWarning,
                json!({ "message": phrases::CLUSTER_BATTERY_CRITICAL, "level": AlertLevel::Danger }),
            )?
            .push(
                ActionTool::RequestSafeMode,
                json!({ "enabled": true, "reason": phrases::SAFE_MODE_BATTERY_REASON }),
            )?;
    } else {
        calls.push(
            ActionTool::ClusterVisualWarning,
            json!({ "message": phrases::CLUSTER_BATTERY_HOT, "level": AlertLevel::Warning }),
        )?;
    }
    Ok(())
}

/// Hazard lights when confident, a navigation notice otherwise.
fn environmental_hazards<R: Rng + ?Sized>(
    rng: &mut R,
    calls: &mut CallBuilder<'_>,
    tier: ConfidenceTier,
) -> Result<(), SampleError> {
    match tier {
        ConfidenceTier::Full | ConfidenceTier::Warning => {
            let duration = pick(rng, &[2000, 3000, 5000, 8000]);
            calls.push(
                ActionTool::HazardWarningSignals,
                json!({ "enabled": true, "duration_ms": duration }),
            )?;
        }
        ConfidenceTier::Low => {
            calls.push(
                ActionTool::NavigationNotification,
                json!({ "message": phrases::NAVIGATION_HAZARD_INFO, "level": AlertLevel::Info }),
            )?;
        }
        ConfidenceTier::Unactionable => {}
    }
    Ok(())
}
