// crates/aegis-dataset-core/src/core/mod.rs
// ============================================================================
// Module: Aegis Dataset Core Types
// Description: Sensor readings, actions, risks, and dataset records.
// Purpose: Provide the typed data model shared by the generation runtime.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Core types model what a sample is made of: typed sensor readings keyed by
//! context tool, the dominant risk decision, validated tool calls, and the
//! three-message record written to each JSON-lines split.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod actions;
pub mod levels;
pub mod phrases;
pub mod risk;
pub mod sample;
pub mod sensors;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use actions::ActionTool;
pub use actions::AlertLevel;
pub use actions::Intensity;
pub use actions::ToolCall;
pub use levels::ConfidenceTier;
pub use levels::SeverityLevel;
pub use levels::ThermalLevel;
pub use risk::RiskDecision;
pub use risk::RiskType;
pub use sample::Bucket;
pub use sample::BucketCounts;
pub use sample::DatasetSplit;
pub use sample::Message;
pub use sample::Role;
pub use sample::RunSummary;
pub use sample::SAMPLE_KEYS;
pub use sample::Sample;
pub use sample::UserFormat;
pub use sensors::BlindSpotReading;
pub use sensors::DrivingEnvironment;
pub use sensors::EvBatteryReading;
pub use sensors::FlagReading;
pub use sensors::ForwardCollisionReading;
pub use sensors::Hazard;
pub use sensors::HazardKind;
pub use sensors::HazardsReading;
pub use sensors::IntrusionReading;
pub use sensors::RoadCondition;
pub use sensors::SensorContext;
pub use sensors::SensorHealth;
pub use sensors::SensorKind;
pub use sensors::VehicleSpeed;
pub use sensors::Visibility;
pub use sensors::Weather;
