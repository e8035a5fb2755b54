//! Independent momentum-theory rotor power model (Glauert closed form).
//!
//! This is the physically-grounded cross-check for the empirical sweet-spot
//! curve in `uav_power`. It is not on the production energy path, but it
//! accepts the same `(config, speed, climb rate, density)` inputs so the two
//! models can be compared point for point and the curve calibrated against
//! field data.

use std::f64::consts::PI;

use uav_core::constants::{GRAVITY, GUARD_FALLBACK_W_PER_KG};
use uav_power::{electrical_power, EfficiencyTuning};
use uav_vehicle::{MotorMount, VehicleConfig};

/// Typical rotor-blade profile drag coefficient.
const PROFILE_DRAG_COEFFICIENT: f64 = 0.012;
/// Typical small-rotor tip speed (m/s).
const TIP_SPEED_MS: f64 = 200.0;
/// Typical multirotor solidity ratio.
const SOLIDITY_RATIO: f64 = 0.1;
/// Induced-power penalty of coaxial rotor pairs (rotor-wash interaction).
const COAXIAL_EFFICIENCY: f64 = 0.87;
/// Usable fraction of the nominal battery capacity for range estimates.
pub const DEFAULT_USABLE_BATTERY_FRACTION: f64 = 0.8;

/// Per-term breakdown of a momentum-theory power estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotorPowerBreakdown {
    pub induced_w: f64,
    pub profile_w: f64,
    pub parasitic_w: f64,
    pub climb_w: f64,
    pub mechanical_w: f64,
    pub electrical_w: f64,
    pub hover_induced_velocity_ms: f64,
    /// Forward speed over hover-induced velocity (μ).
    pub advance_ratio: f64,
    pub guard_fallback: bool,
}

/// Momentum-theory electrical power at the given forward speed.
///
/// Induced power uses the Glauert closed form `Pi/Pi0 = √(1+μ²) − μ`; profile
/// and parasitic drag are added separately, and mechanical power is converted
/// to electrical through the full drivetrain efficiency. A non-positive
/// momentum denominator or a non-finite sum falls back to the mass-linear
/// guard estimate, flagged on the result.
pub fn rotor_power(
    config: &VehicleConfig,
    speed_ms: f64,
    climb_rate_ms: f64,
    air_density: f64,
) -> RotorPowerBreakdown {
    let rotor_count = f64::from(config.rotor_count());
    let thrust_per_rotor_n = config.mass_kg * GRAVITY / rotor_count;
    let disk_area_m2 = PI * (config.rotor_diameter_m / 2.0).powi(2);

    let denominator = 2.0 * air_density * disk_area_m2;
    if denominator <= 0.0 {
        return fallback(config);
    }
    let hover_induced_velocity_ms = (thrust_per_rotor_n / denominator).sqrt();
    if !hover_induced_velocity_ms.is_finite() || hover_induced_velocity_ms <= 0.0 {
        return fallback(config);
    }

    let advance_ratio = speed_ms.max(0.0) / hover_induced_velocity_ms;
    let induced_ratio = (1.0 + advance_ratio * advance_ratio).sqrt() - advance_ratio;

    let coaxial_efficiency = match config.motor_mount {
        MotorMount::Coaxial => COAXIAL_EFFICIENCY,
        MotorMount::Single => 1.0,
    };
    let induced_w =
        thrust_per_rotor_n * hover_induced_velocity_ms * induced_ratio * rotor_count
            / coaxial_efficiency;

    let profile_w = PROFILE_DRAG_COEFFICIENT
        * air_density
        * disk_area_m2
        * TIP_SPEED_MS.powi(3)
        * SOLIDITY_RATIO
        / 8.0
        * rotor_count;

    let frontal_area_m2 = config.rotor_diameter_m * config.rotor_diameter_m * PI / 4.0;
    let parasitic_w = if speed_ms > 0.0 {
        0.5 * air_density * config.drag_coefficient * frontal_area_m2 * speed_ms.powi(3)
    } else {
        0.0
    };

    let climb_w = if climb_rate_ms > 0.0 {
        config.mass_kg * GRAVITY * climb_rate_ms / config.motor_efficiency
    } else {
        0.0
    };

    let mechanical_w = induced_w + profile_w + parasitic_w + climb_w;
    let electrical_w = mechanical_w / config.drivetrain_efficiency();
    if !electrical_w.is_finite() || electrical_w < 0.0 {
        return fallback(config);
    }

    RotorPowerBreakdown {
        induced_w,
        profile_w,
        parasitic_w,
        climb_w,
        mechanical_w,
        electrical_w,
        hover_induced_velocity_ms,
        advance_ratio,
        guard_fallback: false,
    }
}

fn fallback(config: &VehicleConfig) -> RotorPowerBreakdown {
    let electrical_w = GUARD_FALLBACK_W_PER_KG * config.mass_kg;
    RotorPowerBreakdown {
        induced_w: 0.0,
        profile_w: 0.0,
        parasitic_w: 0.0,
        climb_w: 0.0,
        mechanical_w: electrical_w,
        electrical_w,
        hover_induced_velocity_ms: 0.0,
        advance_ratio: 0.0,
        guard_fallback: true,
    }
}

/// One point of a primary-vs-Glauert comparison sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub speed_ms: f64,
    pub primary_w: f64,
    pub glauert_w: f64,
    pub difference_w: f64,
    pub difference_percent: f64,
}

/// Evaluate both models over a level, zero-wind speed sweep.
pub fn compare_models(
    config: &VehicleConfig,
    tuning: &EfficiencyTuning,
    speeds_ms: &[f64],
    air_density: f64,
) -> Vec<SweepPoint> {
    speeds_ms
        .iter()
        .map(|&speed_ms| {
            let primary_w =
                electrical_power(config, tuning, speed_ms, 0.0, air_density, None).electrical_w;
            let glauert_w = rotor_power(config, speed_ms, 0.0, air_density).electrical_w;
            let difference_w = glauert_w - primary_w;
            SweepPoint {
                speed_ms,
                primary_w,
                glauert_w,
                difference_w,
                difference_percent: if primary_w > 0.0 {
                    difference_w / primary_w * 100.0
                } else {
                    0.0
                },
            }
        })
        .collect()
}

/// Minimum-power point of a sweep, judged by the Glauert model.
pub fn glauert_sweet_spot(points: &[SweepPoint]) -> Option<(f64, f64)> {
    points
        .iter()
        .min_by(|a, b| a.glauert_w.total_cmp(&b.glauert_w))
        .map(|p| (p.speed_ms, p.glauert_w))
}

/// Minimum-power point of a sweep, judged by the primary model.
pub fn primary_sweet_spot(points: &[SweepPoint]) -> Option<(f64, f64)> {
    points
        .iter()
        .min_by(|a, b| a.primary_w.total_cmp(&b.primary_w))
        .map(|p| (p.speed_ms, p.primary_w))
}

/// Endurance and range at a steady cruise power draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeEstimate {
    pub flight_time_minutes: f64,
    pub range_km: f64,
}

/// Estimate endurance/range from battery capacity at a constant power draw,
/// derating the battery to its usable fraction.
pub fn range_at_cruise(
    config: &VehicleConfig,
    cruise_speed_ms: f64,
    power_w: f64,
    usable_battery_fraction: f64,
) -> RangeEstimate {
    let usable_wh = config.battery_capacity_wh() * usable_battery_fraction.clamp(0.0, 1.0);
    if power_w <= 0.0 {
        return RangeEstimate {
            flight_time_minutes: 0.0,
            range_km: 0.0,
        };
    }
    let hours = usable_wh / power_w;
    RangeEstimate {
        flight_time_minutes: hours * 60.0,
        range_km: hours * cruise_speed_ms * 3.6,
    }
}
