// crates/aegis-dataset-core/src/runtime/generators.rs
// ============================================================================
// Module: Context Generators
// Description: Randomized, schema-conformant sensor readings.
// Purpose: Produce one reading per sensor type at a requested level.
// Dependencies: rand, crate::core
// ============================================================================

//! ## Overview
//! Each generator takes the run RNG plus a target level (or value) and a
//! confidence, and returns a typed reading. Generators never fail: levels a
//! sensor does not support are normalized to the mid-range default. Callers
//! still validate every reading against its context schema.

// ============================================================================
// SECTION: Imports
// ============================================================================

use rand::Rng;

use crate::core::BlindSpotReading;
use crate::core::ConfidenceTier;
use crate::core::DrivingEnvironment;
use crate::core::EvBatteryReading;
use crate::core::FlagReading;
use crate::core::ForwardCollisionReading;
use crate::core::Hazard;
use crate::core::HazardKind;
use crate::core::HazardsReading;
use crate::core::IntrusionReading;
use crate::core::RoadCondition;
use crate::core::SensorHealth;
use crate::core::SeverityLevel;
use crate::core::ThermalLevel;
use crate::core::VehicleSpeed;
use crate::core::Visibility;
use crate::core::Weather;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Rounds to two decimals.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds to one decimal.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Picks one element uniformly.
pub fn pick<T: Copy, R: Rng + ?Sized, const N: usize>(rng: &mut R, items: &[T; N]) -> T {
    items[rng.gen_range(0..N)]
}

/// Draws a value uniformly from `[low, high]` and rounds it to two decimals.
pub fn uniform2<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    round2(rng.gen_range(low..=high))
}

/// Draws a confidence inside the tier's sampling range.
pub fn pick_confidence<R: Rng + ?Sized>(rng: &mut R, tier: ConfidenceTier) -> f64 {
    let (low, high) = tier.sampling_range();
    uniform2(rng, low, high)
}

// ============================================================================
// SECTION: Risk Sensors
// ============================================================================

/// Generates a forward collision reading; `critical` is treated as `mid`.
pub fn forward_collision<R: Rng + ?Sized>(
    rng: &mut R,
    level: SeverityLevel,
    confidence: f64,
) -> ForwardCollisionReading {
    let level = level.without_critical();
    let (low, high) = match level {
        SeverityLevel::Low => (0.05, 0.35),
        SeverityLevel::High => (0.76, 0.99),
        SeverityLevel::Mid | SeverityLevel::Critical => (0.36, 0.75),
    };
    ForwardCollisionReading {
        score: uniform2(rng, low, high),
        level,
        confidence,
    }
}

/// Generates an intrusion reading; `high` and `critical` force a detection.
pub fn intrusion<R: Rng + ?Sized>(
    rng: &mut R,
    level: SeverityLevel,
    confidence: f64,
) -> IntrusionReading {
    let value = matches!(level, SeverityLevel::High | SeverityLevel::Critical) || rng.gen_bool(0.7);
    IntrusionReading {
        value,
        level,
        confidence,
    }
}

/// Generates a blind spot reading; `mid` and `high` force a detection.
pub fn blind_spot<R: Rng + ?Sized>(
    rng: &mut R,
    level: SeverityLevel,
    confidence: f64,
) -> BlindSpotReading {
    let level = level.without_critical();
    let value = matches!(level, SeverityLevel::Mid | SeverityLevel::High) || rng.gen_bool(0.4);
    BlindSpotReading {
        value,
        level,
        confidence,
    }
}

/// Generates a lane departure reading.
#[must_use]
pub const fn lane_departure(value: bool, confidence: f64) -> FlagReading {
    FlagReading {
        value,
        confidence,
    }
}

/// Generates a drowsiness reading.
#[must_use]
pub const fn drowsiness(value: bool, confidence: f64) -> FlagReading {
    FlagReading {
        value,
        confidence,
    }
}

/// Generates an EV battery reading; hot and critical packs always cool.
pub fn ev_battery<R: Rng + ?Sized>(rng: &mut R, level: ThermalLevel) -> EvBatteryReading {
    let (low, high) = match level {
        ThermalLevel::Normal => (20.0, 40.0),
        ThermalLevel::Warm => (40.1, 55.0),
        ThermalLevel::Hot => (55.1, 70.0),
        ThermalLevel::Critical => (70.1, 90.0),
    };
    let temperature = round1(rng.gen_range(low..=high));
    let cooling_active =
        matches!(level, ThermalLevel::Hot | ThermalLevel::Critical) || rng.gen_bool(0.4);
    EvBatteryReading {
        temperature,
        level,
        cooling_active,
    }
}

/// Generates `max(1, count)` hazards sharing one severity.
pub fn environmental_hazards<R: Rng + ?Sized>(
    rng: &mut R,
    severity: SeverityLevel,
    confidence: f64,
    count: usize,
) -> HazardsReading {
    const KINDS: [HazardKind; 4] =
        [HazardKind::Debris, HazardKind::Construction, HazardKind::Accident, HazardKind::Other];
    let severity = severity.without_critical();
    let hazards = (0..count.max(1))
        .map(|_| Hazard {
            kind: pick(rng, &KINDS),
            severity,
        })
        .collect();
    HazardsReading {
        hazards,
        confidence,
    }
}

// ============================================================================
// SECTION: Ambient Sensors
// ============================================================================

/// Generates a driving environment drawn from every condition.
pub fn driving_environment<R: Rng + ?Sized>(rng: &mut R) -> DrivingEnvironment {
    DrivingEnvironment {
        weather: pick(
            rng,
            &[Weather::Clear, Weather::Rain, Weather::Snow, Weather::Fog, Weather::Unknown],
        ),
        road_condition: pick(
            rng,
            &[RoadCondition::Dry, RoadCondition::Wet, RoadCondition::Icy, RoadCondition::Unknown],
        ),
        visibility_level: pick(
            rng,
            &[Visibility::Good, Visibility::Moderate, Visibility::Poor, Visibility::Unknown],
        ),
    }
}

/// Generates an adverse driving environment.
pub fn adverse_driving_environment<R: Rng + ?Sized>(rng: &mut R) -> DrivingEnvironment {
    DrivingEnvironment {
        weather: pick(rng, &[Weather::Rain, Weather::Snow, Weather::Fog]),
        road_condition: pick(rng, &[RoadCondition::Wet, RoadCondition::Icy]),
        visibility_level: pick(rng, &[Visibility::Moderate, Visibility::Poor]),
    }
}

/// Generates a sensor health reading; degraded readings fail components at random.
pub fn sensor_health<R: Rng + ?Sized>(rng: &mut R, ok: bool) -> SensorHealth {
    if ok {
        return SensorHealth {
            overall_ok: true,
            camera_ok: true,
            model_ok: true,
        };
    }
    let camera_ok = rng.gen_bool(0.5);
    let model_ok = rng.gen_bool(0.5);
    SensorHealth {
        overall_ok: camera_ok && model_ok,
        camera_ok,
        model_ok,
    }
}

/// Generates a vehicle speed in [0, 130] km/h.
pub fn vehicle_speed<R: Rng + ?Sized>(rng: &mut R) -> VehicleSpeed {
    VehicleSpeed {
        value: round1(rng.gen_range(0.0..=130.0)),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn forward_collision_scores_stay_in_level_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let high = forward_collision(&mut rng, SeverityLevel::High, 0.95);
            assert!((0.76..=0.99).contains(&high.score));
            let low = forward_collision(&mut rng, SeverityLevel::Low, 0.95);
            assert!((0.05..=0.35).contains(&low.score));
        }
    }

    #[test]
    fn unsupported_levels_fall_back_to_mid() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            forward_collision(&mut rng, SeverityLevel::Critical, 0.9).level,
            SeverityLevel::Mid
        );
        assert_eq!(blind_spot(&mut rng, SeverityLevel::Critical, 0.9).level, SeverityLevel::Mid);
        let hazards = environmental_hazards(&mut rng, SeverityLevel::Critical, 0.9, 0);
        assert_eq!(hazards.hazards.len(), 1);
        assert!(hazards.hazards.iter().all(|hazard| hazard.severity == SeverityLevel::Mid));
    }

    #[test]
    fn elevated_levels_force_detection() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            assert!(intrusion(&mut rng, SeverityLevel::Critical, 0.9).value);
            assert!(blind_spot(&mut rng, SeverityLevel::Mid, 0.9).value);
            let battery = ev_battery(&mut rng, ThermalLevel::Hot);
            assert!(battery.cooling_active);
            assert!((55.1..=70.0).contains(&battery.temperature));
        }
    }

    #[test]
    fn degraded_health_is_consistent() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let health = sensor_health(&mut rng, false);
            assert_eq!(health.overall_ok, health.camera_ok && health.model_ok);
        }
    }

    #[test]
    fn confidences_fall_in_their_tier() {
        let mut rng = StdRng::seed_from_u64(5);
        for tier in ConfidenceTier::ALL {
            for _ in 0..200 {
                let confidence = pick_confidence(&mut rng, tier);
                assert_eq!(ConfidenceTier::from_confidence(confidence), tier);
            }
        }
    }
}
