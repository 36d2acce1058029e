// crates/aegis-dataset-core/src/runtime/assembler.rs
// ============================================================================
// Module: Sample Assembler
// Description: Bucket-shaped sample drafting around the decision engine.
// Purpose: Produce one validated dataset record per call.
// Dependencies: rand, serde_json, tracing, aegis-dataset-schema, crate::core
// ============================================================================

//! ## Overview
//! One call to [`SampleAssembler::assemble`] draws, in order: the user message
//! format, the ambient readings (speed, environment, health), the bucket's
//! risk readings, the `eval_b` degradations, the developer instruction, and
//! finally the assistant turn. Readings are validated against their context
//! schemas before the decision engine sees them.
//!
//! [`render_line`] turns a sample into a newline-free JSON line after checking
//! its top-level keys.

// ============================================================================
// SECTION: Imports
// ============================================================================

use aegis_dataset_schema::CatalogError;
use aegis_dataset_schema::ToolCatalog;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::warn;

use crate::core::Bucket;
use crate::core::ConfidenceTier;
use crate::core::DatasetSplit;
use crate::core::Message;
use crate::core::RiskDecision;
use crate::core::RiskType;
use crate::core::SAMPLE_KEYS;
use crate::core::Sample;
use crate::core::SensorContext;
use crate::core::SeverityLevel;
use crate::core::ThermalLevel;
use crate::core::UserFormat;
use crate::core::phrases;
use crate::error::SampleError;
use crate::runtime::context::require_generator_tools;
use crate::runtime::context::validate_context;
use crate::runtime::decision::decide;
use crate::runtime::generators;
use crate::runtime::generators::pick;
use crate::runtime::generators::pick_confidence;
use crate::runtime::generators::uniform2;
use crate::runtime::synthesizer::synthesize;

// ============================================================================
// SECTION: Sampling Weights
// ============================================================================

/// Primary risk weights (percent) for action buckets.
const PRIMARY_RISK_WEIGHTS: [(RiskType, u32); 7] = [
    (RiskType::ForwardCollision, 22),
    (RiskType::VehicleIntrusion, 14),
    (RiskType::BlindSpot, 14),
    (RiskType::LaneDeparture, 14),
    (RiskType::Drowsiness, 16),
    (RiskType::EvBatteryCritical, 10),
    (RiskType::EnvironmentalHazards, 10),
];

/// Primary tier weights (percent) for action buckets.
const PRIMARY_TIER_WEIGHTS: [(ConfidenceTier, u32); 3] =
    [(ConfidenceTier::Full, 45), (ConfidenceTier::Warning, 40), (ConfidenceTier::Low, 15)];

/// Tier weights (percent) for extra readings in multi-action samples.
const EXTRA_TIER_WEIGHTS: [(ConfidenceTier, u32); 4] = [
    (ConfidenceTier::Full, 20),
    (ConfidenceTier::Warning, 35),
    (ConfidenceTier::Low, 25),
    (ConfidenceTier::Unactionable, 20),
];

/// Risks eligible as extra readings in multi-action samples.
const EXTRA_RISKS: [RiskType; 5] = [
    RiskType::LaneDeparture,
    RiskType::Drowsiness,
    RiskType::BlindSpot,
    RiskType::VehicleIntrusion,
    RiskType::EnvironmentalHazards,
];

/// Risks a low-confidence sample can be uncertain about.
const UNCERTAIN_RISKS: [RiskType; 6] = [
    RiskType::ForwardCollision,
    RiskType::BlindSpot,
    RiskType::LaneDeparture,
    RiskType::Drowsiness,
    RiskType::VehicleIntrusion,
    RiskType::EnvironmentalHazards,
];

// ============================================================================
// SECTION: Assembler
// ============================================================================

/// Builds dataset samples against one tool catalog.
#[derive(Debug, Clone, Copy)]
pub struct SampleAssembler<'a> {
    /// Loaded context and action documents.
    catalog: &'a ToolCatalog,
}

impl<'a> SampleAssembler<'a> {
    /// Creates an assembler after checking the catalog covers every generated tool.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownTool`] when a generated tool is missing.
    pub fn new(catalog: &'a ToolCatalog) -> Result<Self, CatalogError> {
        require_generator_tools(catalog)?;
        Ok(Self {
            catalog,
        })
    }

    /// Assembles one sample for `bucket` in `split`.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError`]; check [`SampleError::is_recoverable`] to decide
    /// whether to redraw.
    pub fn assemble<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        bucket: Bucket,
        split: DatasetSplit,
    ) -> Result<Sample<'a>, SampleError> {
        let format =
            if rng.gen_bool(0.5) { UserFormat::SensorOnly } else { UserFormat::InquiryPlusSensor };

        let mut context = SensorContext {
            vehicle_speed: Some(generators::vehicle_speed(rng)),
            ..SensorContext::default()
        };
        if rng.gen_bool(0.5) {
            context.driving_environment = Some(generators::driving_environment(rng));
        }
        if rng.gen_bool(0.35) {
            let ok = rng.gen_bool(0.9);
            context.sensor_health = Some(generators::sensor_health(rng, ok));
        }

        let inquiry = match bucket {
            Bucket::SingleAction => actionable_readings(rng, &mut context, false)?,
            Bucket::MultiAction => actionable_readings(rng, &mut context, true)?,
            Bucket::NoAction => calm_readings(rng, &mut context),
            Bucket::LowConfidence => uncertain_reading(rng, &mut context),
            Bucket::GeneralConversation => {
                if rng.gen_bool(0.5) {
                    let confidence = uniform2(rng, 0.8, 1.0);
                    context.forward_collision =
                        Some(generators::forward_collision(rng, SeverityLevel::Low, confidence));
                }
                pick(rng, &phrases::INQUIRY_GENERAL)
            }
        };

        if split == DatasetSplit::EvalB {
            if rng.gen_bool(0.6) {
                context.sensor_health = Some(generators::sensor_health(rng, false));
            }
            if rng.gen_bool(0.5) {
                context.driving_environment = Some(generators::adverse_driving_environment(rng));
            }
        }

        validate_context(self.catalog, &context)?;

        let user = Message::user(user_message(format, inquiry, &context)?);
        let developer = Message::developer(pick(rng, &phrases::DEVELOPER_MESSAGES));
        let assistant = self.assistant_turn(rng, bucket, decide(&context), &context)?;

        Ok(Sample {
            metadata: split.metadata(),
            tools: self.catalog.action().raw_tools(),
            messages: [developer, user, assistant],
        })
    }

    /// Builds the assistant message for the bucket and decision.
    fn assistant_turn<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        bucket: Bucket,
        decision: Option<RiskDecision>,
        context: &SensorContext,
    ) -> Result<Message, SampleError> {
        match (bucket, decision) {
            (_, Some(decision))
                if bucket.expects_action() && decision.tier.is_actionable() =>
            {
                let calls = synthesize(rng, self.catalog, &decision, context)?;
                if let Some(message) = Message::assistant_calls(calls) {
                    return Ok(message);
                }
                warn!(
                    bucket = bucket.as_str(),
                    risk = decision.risk_type.as_str(),
                    tier = decision.tier.as_str(),
                    "tool-call sample produced no calls; emitting a plain reply"
                );
                Ok(Message::assistant_reply(pick(rng, &phrases::NORMAL_REPLIES)))
            }
            (Bucket::LowConfidence, decision) => {
                let hint =
                    decision.map_or(phrases::GENERIC_RISK_HINT, |decision| decision.risk_type.as_str());
                let template = pick(rng, &phrases::CLARIFICATION_TEMPLATES);
                Ok(Message::assistant_reply(phrases::clarification(template, hint)))
            }
            (Bucket::GeneralConversation, _) => {
                Ok(Message::assistant_reply(pick(rng, &phrases::GENERAL_REPLIES)))
            }
            _ => Ok(Message::assistant_reply(pick(rng, &phrases::NORMAL_REPLIES))),
        }
    }
}

// ============================================================================
// SECTION: Bucket Content
// ============================================================================

/// Adds an actionable primary reading (plus extras when `multi`); returns the inquiry.
fn actionable_readings<R: Rng + ?Sized>(
    rng: &mut R,
    context: &mut SensorContext,
    multi: bool,
) -> Result<&'static str, SampleError> {
    let primary = PRIMARY_RISK_WEIGHTS.choose_weighted(rng, |entry| entry.1)?.0;
    let tier = PRIMARY_TIER_WEIGHTS.choose_weighted(rng, |entry| entry.1)?.0;
    let confidence = pick_confidence(rng, tier);

    let inquiry = match primary {
        RiskType::ForwardCollision => {
            let level = pick(rng, &[SeverityLevel::Mid, SeverityLevel::High]);
            context.forward_collision = Some(generators::forward_collision(rng, level, confidence));
            pick(rng, &phrases::INQUIRY_FORWARD_COLLISION)
        }
        RiskType::VehicleIntrusion => {
            let level =
                pick(rng, &[SeverityLevel::Mid, SeverityLevel::High, SeverityLevel::Critical]);
            context.intrusion = Some(generators::intrusion(rng, level, confidence));
            pick(rng, &phrases::INQUIRY_INTRUSION)
        }
        RiskType::BlindSpot => {
            let level = pick(rng, &[SeverityLevel::Mid, SeverityLevel::High]);
            context.blind_spot = Some(generators::blind_spot(rng, level, confidence));
            pick(rng, &phrases::INQUIRY_BLIND_SPOT)
        }
        RiskType::LaneDeparture => {
            context.lane_departure = Some(generators::lane_departure(true, confidence));
            pick(rng, &phrases::INQUIRY_LANE_DEPARTURE)
        }
        RiskType::Drowsiness => {
            context.drowsiness = Some(generators::drowsiness(true, confidence));
            pick(rng, &phrases::INQUIRY_DROWSINESS)
        }
        RiskType::EvBatteryCritical => {
            let level = if tier == ConfidenceTier::Low {
                ThermalLevel::Hot
            } else {
                pick(rng, &[ThermalLevel::Hot, ThermalLevel::Critical])
            };
            context.ev_battery = Some(generators::ev_battery(rng, level));
            pick(rng, &phrases::INQUIRY_EV_BATTERY)
        }
        RiskType::EnvironmentalHazards => {
            let severity = pick(rng, &[SeverityLevel::Mid, SeverityLevel::High]);
            let count = pick(rng, &[1, 2, 3]);
            context.environmental_hazards =
                Some(generators::environmental_hazards(rng, severity, confidence, count));
            pick(rng, &phrases::INQUIRY_HAZARDS)
        }
    };

    if multi {
        extra_readings(rng, context, primary)?;
    }
    Ok(inquiry)
}

/// Adds one or two lower-priority or noise readings around the primary risk.
fn extra_readings<R: Rng + ?Sized>(
    rng: &mut R,
    context: &mut SensorContext,
    primary: RiskType,
) -> Result<(), SampleError> {
    let extra_count = pick(rng, &[1, 2]);
    let mut pool = EXTRA_RISKS;
    pool.shuffle(rng);
    for extra in pool.into_iter().take(extra_count) {
        if extra == primary {
            continue;
        }
        let tier = EXTRA_TIER_WEIGHTS.choose_weighted(rng, |entry| entry.1)?.0;
        let confidence = pick_confidence(rng, tier);
        match extra {
            RiskType::LaneDeparture if context.lane_departure.is_none() => {
                let value = rng.gen_bool(0.7);
                context.lane_departure = Some(generators::lane_departure(value, confidence));
            }
            RiskType::Drowsiness if context.drowsiness.is_none() => {
                let value = rng.gen_bool(0.6);
                context.drowsiness = Some(generators::drowsiness(value, confidence));
            }
            RiskType::BlindSpot if context.blind_spot.is_none() => {
                let level =
                    pick(rng, &[SeverityLevel::Low, SeverityLevel::Mid, SeverityLevel::High]);
                context.blind_spot = Some(generators::blind_spot(rng, level, confidence));
            }
            RiskType::VehicleIntrusion if context.intrusion.is_none() => {
                let level = pick(
                    rng,
                    &[
                        SeverityLevel::Low,
                        SeverityLevel::Mid,
                        SeverityLevel::High,
                        SeverityLevel::Critical,
                    ],
                );
                context.intrusion = Some(generators::intrusion(rng, level, confidence));
            }
            RiskType::EnvironmentalHazards if context.environmental_hazards.is_none() => {
                let severity =
                    pick(rng, &[SeverityLevel::Low, SeverityLevel::Mid, SeverityLevel::High]);
                let count = pick(rng, &[1, 2]);
                context.environmental_hazards =
                    Some(generators::environmental_hazards(rng, severity, confidence, count));
            }
            _ => {}
        }
    }
    Ok(())
}

/// Adds confident low-risk readings; returns the inquiry.
fn calm_readings<R: Rng + ?Sized>(rng: &mut R, context: &mut SensorContext) -> &'static str {
    if rng.gen_bool(0.6) {
        let confidence = uniform2(rng, 0.85, 1.0);
        context.forward_collision =
            Some(generators::forward_collision(rng, SeverityLevel::Low, confidence));
    }
    if rng.gen_bool(0.5) {
        let confidence = uniform2(rng, 0.8, 1.0);
        context.lane_departure = Some(generators::lane_departure(false, confidence));
    }
    if rng.gen_bool(0.4) {
        let confidence = uniform2(rng, 0.8, 1.0);
        context.drowsiness = Some(generators::drowsiness(false, confidence));
    }
    pick(rng, &phrases::INQUIRY_NO_ACTION)
}

/// Adds one reading at an unactionable confidence; returns the inquiry.
fn uncertain_reading<R: Rng + ?Sized>(rng: &mut R, context: &mut SensorContext) -> &'static str {
    let target = pick(rng, &UNCERTAIN_RISKS);
    let confidence = pick_confidence(rng, ConfidenceTier::Unactionable);
    let elevated = [SeverityLevel::Mid, SeverityLevel::High];
    match target {
        RiskType::ForwardCollision => {
            let level = pick(rng, &elevated);
            context.forward_collision = Some(generators::forward_collision(rng, level, confidence));
            pick(rng, &phrases::UNSURE_FORWARD_COLLISION)
        }
        RiskType::BlindSpot => {
            let level = pick(rng, &elevated);
            context.blind_spot = Some(generators::blind_spot(rng, level, confidence));
            pick(rng, &phrases::UNSURE_BLIND_SPOT)
        }
        RiskType::LaneDeparture => {
            let value = rng.gen_bool(0.7);
            context.lane_departure = Some(generators::lane_departure(value, confidence));
            pick(rng, &phrases::UNSURE_LANE_DEPARTURE)
        }
        RiskType::Drowsiness => {
            let value = rng.gen_bool(0.7);
            context.drowsiness = Some(generators::drowsiness(value, confidence));
            pick(rng, &phrases::UNSURE_DROWSINESS)
        }
        RiskType::VehicleIntrusion => {
            let level = pick(rng, &elevated);
            context.intrusion = Some(generators::intrusion(rng, level, confidence));
            pick(rng, &phrases::UNSURE_INTRUSION)
        }
        RiskType::EnvironmentalHazards | RiskType::EvBatteryCritical => {
            let severity = pick(rng, &elevated);
            let count = pick(rng, &[1, 2]);
            context.environmental_hazards =
                Some(generators::environmental_hazards(rng, severity, confidence, count));
            pick(rng, &phrases::UNSURE_HAZARDS)
        }
    }
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Builds the user message; the inquiry separator is a literal `\n` escape.
fn user_message(
    format: UserFormat,
    inquiry: &str,
    context: &SensorContext,
) -> Result<String, SampleError> {
    let sensor = format!("[Sensor Context] SENSOR_CONTEXT={}", serde_json::to_string(context)?);
    Ok(match format {
        UserFormat::SensorOnly => sensor,
        UserFormat::InquiryPlusSensor => format!("[User Inquiry] {inquiry}\\n{sensor}"),
    })
}

/// Renders a sample as one JSON line.
///
/// # Errors
///
/// Returns [`SampleError::TopLevelKeys`] when the record's keys differ from
/// [`SAMPLE_KEYS`] and [`SampleError::EmbeddedNewline`] when the line contains
/// a raw line break.
pub fn render_line(sample: &Sample<'_>) -> Result<String, SampleError> {
    let value = serde_json::to_value(sample)?;
    let keys: Vec<String> =
        value.as_object().map(|map| map.keys().cloned().collect()).unwrap_or_default();
    let matches = keys.len() == SAMPLE_KEYS.len()
        && SAMPLE_KEYS.iter().all(|expected| keys.iter().any(|key| key == expected));
    if !matches {
        return Err(SampleError::TopLevelKeys {
            keys,
        });
    }
    let line = serde_json::to_string(&value)?;
    if line.contains(['\n', '\r']) {
        return Err(SampleError::EmbeddedNewline);
    }
    Ok(line)
}
