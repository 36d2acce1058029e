// crates/aegis-dataset-core/src/core/sensors.rs
// ============================================================================
// Module: Sensor Context
// Description: Typed sensor readings keyed by their context tool.
// Purpose: Model the observed sensor bag as fixed optional fields.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! [`SensorContext`] holds one optional reading per known context tool.
//! Presence means the sensor was observed. Each field serializes under its
//! context tool name, absent readings are omitted, and deserialization rejects
//! tool names outside the known set.
//!
//! Serialized key order is the field order below, independent of the order in
//! which readings were generated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::levels::SeverityLevel;
use crate::core::levels::ThermalLevel;

// ============================================================================
// SECTION: Sensor Kinds
// ============================================================================

/// Known context tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// `get_vehicle_speed`.
    VehicleSpeed,
    /// `get_driving_environment`.
    DrivingEnvironment,
    /// `get_sensor_health_status`.
    SensorHealth,
    /// `get_forward_collision_risk`.
    ForwardCollision,
    /// `get_vehicle_system_intrusion_status`.
    Intrusion,
    /// `get_blind_spot_collision_risk`.
    BlindSpot,
    /// `get_lane_departure_status`.
    LaneDeparture,
    /// `get_driver_drowsiness_status`.
    Drowsiness,
    /// `get_ev_battery_thermal_status`.
    EvBattery,
    /// `get_external_environmental_hazards`.
    EnvironmentalHazards,
}

impl SensorKind {
    /// Every known sensor in serialization order.
    pub const ALL: [Self; 10] = [
        Self::VehicleSpeed,
        Self::DrivingEnvironment,
        Self::SensorHealth,
        Self::ForwardCollision,
        Self::Intrusion,
        Self::BlindSpot,
        Self::LaneDeparture,
        Self::Drowsiness,
        Self::EvBattery,
        Self::EnvironmentalHazards,
    ];

    /// Returns the context tool name.
    #[must_use]
    pub const fn tool_name(self) -> &'static str {
        match self {
            Self::VehicleSpeed => "get_vehicle_speed",
            Self::DrivingEnvironment => "get_driving_environment",
            Self::SensorHealth => "get_sensor_health_status",
            Self::ForwardCollision => "get_forward_collision_risk",
            Self::Intrusion => "get_vehicle_system_intrusion_status",
            Self::BlindSpot => "get_blind_spot_collision_risk",
            Self::LaneDeparture => "get_lane_departure_status",
            Self::Drowsiness => "get_driver_drowsiness_status",
            Self::EvBattery => "get_ev_battery_thermal_status",
            Self::EnvironmentalHazards => "get_external_environmental_hazards",
        }
    }
}

// ============================================================================
// SECTION: Readings
// ============================================================================

/// Forward collision risk reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardCollisionReading {
    /// Risk score in [0, 1].
    pub score: f64,
    /// Qualitative risk level.
    pub level: SeverityLevel,
    /// Detector confidence.
    pub confidence: f64,
}

/// Vehicle system intrusion reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntrusionReading {
    /// Whether an intrusion is suspected.
    pub value: bool,
    /// Qualitative threat level.
    pub level: SeverityLevel,
    /// Detector confidence.
    pub confidence: f64,
}

/// Blind spot collision reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlindSpotReading {
    /// Whether a vehicle occupies the blind spot.
    pub value: bool,
    /// Qualitative risk level.
    pub level: SeverityLevel,
    /// Detector confidence.
    pub confidence: f64,
}

/// Boolean detector reading (lane departure, drowsiness).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagReading {
    /// Detector output.
    pub value: bool,
    /// Detector confidence.
    pub confidence: f64,
}

/// EV battery thermal reading. Carries no confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvBatteryReading {
    /// Pack temperature in degrees Celsius.
    pub temperature: f64,
    /// Qualitative thermal level.
    pub level: ThermalLevel,
    /// Whether active cooling is running.
    pub cooling_active: bool,
}

/// Kind of external hazard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    /// Debris on the road.
    Debris,
    /// Construction zone.
    Construction,
    /// Accident ahead.
    Accident,
    /// Anything else.
    Other,
}

/// One detected hazard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    /// Hazard kind.
    pub kind: HazardKind,
    /// Hazard severity.
    pub severity: SeverityLevel,
}

/// External environmental hazards reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardsReading {
    /// Detected hazards.
    pub hazards: Vec<Hazard>,
    /// Detector confidence.
    pub confidence: f64,
}

/// Weather condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    /// Clear sky.
    Clear,
    /// Rain.
    Rain,
    /// Snow.
    Snow,
    /// Fog.
    Fog,
    /// Storm.
    Storm,
    /// Not determined.
    Unknown,
}

/// Road surface condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadCondition {
    /// Dry surface.
    Dry,
    /// Wet surface.
    Wet,
    /// Icy surface.
    Icy,
    /// Snow-covered surface.
    Snowy,
    /// Not determined.
    Unknown,
}

/// Visibility level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Good visibility.
    Good,
    /// Moderate visibility.
    Moderate,
    /// Low visibility.
    Low,
    /// Poor visibility.
    Poor,
    /// Not determined.
    Unknown,
}

/// Driving environment reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrivingEnvironment {
    /// Weather condition.
    pub weather: Weather,
    /// Road surface condition.
    pub road_condition: RoadCondition,
    /// Visibility level.
    pub visibility_level: Visibility,
}

/// Perception stack health reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorHealth {
    /// True only when every component is healthy.
    pub overall_ok: bool,
    /// Camera health.
    pub camera_ok: bool,
    /// Model health.
    pub model_ok: bool,
}

/// Vehicle speed reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSpeed {
    /// Speed in km/h.
    pub value: f64,
}

// ============================================================================
// SECTION: Sensor Context
// ============================================================================

/// Observed sensor readings for one sample.
///
/// # Invariants
/// - Serializes in field declaration order, independent of the order readings
///   were set. Ambient readings (speed, environment, health) always lead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensorContext {
    /// Vehicle speed.
    #[serde(rename = "get_vehicle_speed", default, skip_serializing_if = "Option::is_none")]
    pub vehicle_speed: Option<VehicleSpeed>,
    /// Driving environment.
    #[serde(rename = "get_driving_environment", default, skip_serializing_if = "Option::is_none")]
    pub driving_environment: Option<DrivingEnvironment>,
    /// Sensor health.
    #[serde(rename = "get_sensor_health_status", default, skip_serializing_if = "Option::is_none")]
    pub sensor_health: Option<SensorHealth>,
    /// Forward collision risk.
    #[serde(
        rename = "get_forward_collision_risk",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub forward_collision: Option<ForwardCollisionReading>,
    /// Vehicle system intrusion.
    #[serde(
        rename = "get_vehicle_system_intrusion_status",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub intrusion: Option<IntrusionReading>,
    /// Blind spot collision risk.
    #[serde(
        rename = "get_blind_spot_collision_risk",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub blind_spot: Option<BlindSpotReading>,
    /// Lane departure.
    #[serde(rename = "get_lane_departure_status", default, skip_serializing_if = "Option::is_none")]
    pub lane_departure: Option<FlagReading>,
    /// Driver drowsiness.
    #[serde(
        rename = "get_driver_drowsiness_status",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub drowsiness: Option<FlagReading>,
    /// EV battery thermal state.
    #[serde(
        rename = "get_ev_battery_thermal_status",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ev_battery: Option<EvBatteryReading>,
    /// External environmental hazards.
    #[serde(
        rename = "get_external_environmental_hazards",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub environmental_hazards: Option<HazardsReading>,
}

impl SensorContext {
    /// Returns true when `kind` has been observed.
    #[must_use]
    pub const fn contains(&self, kind: SensorKind) -> bool {
        match kind {
            SensorKind::VehicleSpeed => self.vehicle_speed.is_some(),
            SensorKind::DrivingEnvironment => self.driving_environment.is_some(),
            SensorKind::SensorHealth => self.sensor_health.is_some(),
            SensorKind::ForwardCollision => self.forward_collision.is_some(),
            SensorKind::Intrusion => self.intrusion.is_some(),
            SensorKind::BlindSpot => self.blind_spot.is_some(),
            SensorKind::LaneDeparture => self.lane_departure.is_some(),
            SensorKind::Drowsiness => self.drowsiness.is_some(),
            SensorKind::EvBattery => self.ev_battery.is_some(),
            SensorKind::EnvironmentalHazards => self.environmental_hazards.is_some(),
        }
    }

    /// Returns the observed sensors in serialization order.
    #[must_use]
    pub fn observed(&self) -> Vec<SensorKind> {
        SensorKind::ALL.into_iter().filter(|kind| self.contains(*kind)).collect()
    }

    /// Serializes each observed reading to JSON, in serialization order.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if a reading cannot be represented as JSON.
    pub fn readings(&self) -> Result<Vec<(SensorKind, Value)>, serde_json::Error> {
        let mut readings = Vec::new();
        for kind in self.observed() {
            let value = match kind {
                SensorKind::VehicleSpeed => serde_json::to_value(&self.vehicle_speed)?,
                SensorKind::DrivingEnvironment => serde_json::to_value(&self.driving_environment)?,
                SensorKind::SensorHealth => serde_json::to_value(&self.sensor_health)?,
                SensorKind::ForwardCollision => serde_json::to_value(&self.forward_collision)?,
                SensorKind::Intrusion => serde_json::to_value(&self.intrusion)?,
                SensorKind::BlindSpot => serde_json::to_value(&self.blind_spot)?,
                SensorKind::LaneDeparture => serde_json::to_value(&self.lane_departure)?,
                SensorKind::Drowsiness => serde_json::to_value(&self.drowsiness)?,
                SensorKind::EvBattery => serde_json::to_value(&self.ev_battery)?,
                SensorKind::EnvironmentalHazards => {
                    serde_json::to_value(&self.environmental_hazards)?
                }
            };
            readings.push((kind, value));
        }
        Ok(readings)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only assertions are permitted."
    )]

    use serde_json::json;

    use super::FlagReading;
    use super::ForwardCollisionReading;
    use super::SensorContext;
    use super::SensorHealth;
    use super::SensorKind;
    use super::VehicleSpeed;
    use crate::core::SeverityLevel;

    #[test]
    fn serializes_in_field_order_under_tool_names() {
        let context = SensorContext {
            drowsiness: Some(FlagReading {
                value: true,
                confidence: 0.9,
            }),
            vehicle_speed: Some(VehicleSpeed {
                value: 42.5,
            }),
            ..SensorContext::default()
        };
        let text = serde_json::to_string(&context).expect("serialize");
        assert_eq!(
            text,
            r#"{"get_vehicle_speed":{"value":42.5},"get_driver_drowsiness_status":{"value":true,"confidence":0.9}}"#
        );
        assert_eq!(context.observed(), vec![SensorKind::VehicleSpeed, SensorKind::Drowsiness]);
    }

    #[test]
    fn late_health_reading_still_leads_risk_readings() {
        let mut context = SensorContext {
            forward_collision: Some(ForwardCollisionReading {
                score: 0.5,
                level: SeverityLevel::Mid,
                confidence: 0.8,
            }),
            ..SensorContext::default()
        };
        context.sensor_health = Some(SensorHealth {
            overall_ok: false,
            camera_ok: false,
            model_ok: true,
        });
        let text = serde_json::to_string(&context).expect("serialize");
        assert_eq!(
            text,
            r#"{"get_sensor_health_status":{"overall_ok":false,"camera_ok":false,"model_ok":true},"get_forward_collision_risk":{"score":0.5,"level":"mid","confidence":0.8}}"#
        );
    }

    #[test]
    fn unknown_tool_names_are_rejected() {
        let value = json!({ "get_cabin_co2_concentration": { "ppm": 900 } });
        assert!(serde_json::from_value::<SensorContext>(value).is_err());
    }
}
