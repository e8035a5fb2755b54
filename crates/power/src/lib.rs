//! Electrical power models for the three supported vehicle classes.
//!
//! Every model implements the same contract: `(config, ground speed, climb
//! rate, air density, optional wind) → electrical power in watts`, clamped to
//! `[0, max_power]`. Arithmetic that would produce a non-finite or negative
//! value is recovered at the model boundary by a mass-proportional fallback
//! estimate and flagged on the returned [`PowerEstimate`], never propagated.

use std::f64::consts::PI;

use uav_core::constants::{GRAVITY, GUARD_FALLBACK_W_PER_KG};
use uav_vehicle::{VehicleClass, VehicleConfig};
use uav_wind::WindComponents;

/// Rotor figure of merit: ratio of ideal to actual hover power.
const FIGURE_OF_MERIT: f64 = 0.7;
/// Ground speed below which a VTOL behaves as a pure rotorcraft (m/s).
const VTOL_TRANSITION_SPEED_MS: f64 = 5.0;
/// Fraction of nominal hover power a VTOL keeps at high forward speed.
const VTOL_HOVER_FLOOR: f64 = 0.3;
/// Default forward-thrust power as a fraction of max power.
const VTOL_FORWARD_POWER_FRACTION: f64 = 0.3;
/// Efficiency improvement reached at the lower edge of the sweet-spot band.
const SLOW_REGIME_IMPROVEMENT: f64 = 0.25;
/// Efficiency penalty per m/s above the sweet-spot band.
const FAST_PENALTY_PER_MS: f64 = 0.03;
/// Cap on the fast-flight efficiency penalty.
const FAST_PENALTY_CAP: f64 = 0.4;
/// Hard cap on the tunable sweet-spot gain.
const EFFICIENCY_GAIN_CAP: f64 = 0.45;
/// Relative drag-coefficient growth per m/s above the sweet-spot band.
const DRAG_CD_GROWTH_PER_MS: f64 = 0.05;
/// Dynamic drag coefficient never exceeds this multiple of the base value.
const DRAG_CD_CAP_FACTOR: f64 = 2.0;
/// Wind-induced extra drag is capped at this fraction of base drag power.
const WIND_DRAG_CAP_FRACTION: f64 = 0.5;
/// Gain of the fixed-wing headwind/tailwind power factor.
const FIXED_WING_WIND_GAIN: f64 = 0.3;
/// Fixed-wing power never drops below this fraction of zero-wind cruise power.
const FIXED_WING_POWER_FLOOR: f64 = 0.5;
/// Simplified span-efficiency divisor for the induced drag coefficient.
const SPAN_EFFICIENCY_DIVISOR: f64 = PI * 8.0;
/// Guard against zero-speed division in the fixed-wing model (m/s).
const MIN_MODEL_SPEED_MS: f64 = 0.1;
/// Floor of the speed-efficiency factor; the base power term never flips sign.
const MIN_EFFICIENCY_FACTOR: f64 = 0.05;

/// Calibration knobs for the empirical sweet-spot efficiency curve.
///
/// The curve is fitted against field data, not derived from physics; the
/// Glauert validator in `uav_glauert` exists to sanity-check it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EfficiencyTuning {
    /// Overall multiplier on the curve's improvements (0.5–1.5 is sensible).
    pub curve_multiplier: f64,
    /// Maximum efficiency gain inside the sweet-spot band. The gain after
    /// `curve_multiplier` is hard-capped at 0.45.
    pub max_efficiency_gain: f64,
}

impl Default for EfficiencyTuning {
    fn default() -> Self {
        Self {
            curve_multiplier: 1.0,
            max_efficiency_gain: 0.35,
        }
    }
}

impl EfficiencyTuning {
    /// Sweet-spot gain with the multiplier applied, then hard-capped.
    fn effective_gain(&self) -> f64 {
        (self.max_efficiency_gain * self.curve_multiplier).clamp(0.0, EFFICIENCY_GAIN_CAP)
    }

    /// Slow-regime improvement with the multiplier applied, capped like the
    /// gain so the in-band base never drops below `1 − cap`.
    fn slow_improvement(&self) -> f64 {
        (SLOW_REGIME_IMPROVEMENT * self.curve_multiplier).clamp(0.0, EFFICIENCY_GAIN_CAP)
    }
}

/// Result of one power-model evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerEstimate {
    /// Electrical power draw in watts, inside `[0, max_power]`.
    pub electrical_w: f64,
    /// True when a numeric guard replaced the computation with the
    /// mass-proportional fallback; exposed for calibration, never an error.
    pub guard_fallback: bool,
}

/// Dispatch to the model matching the configured vehicle class.
pub fn electrical_power(
    config: &VehicleConfig,
    tuning: &EfficiencyTuning,
    ground_speed_ms: f64,
    climb_rate_ms: f64,
    air_density: f64,
    wind: Option<&WindComponents>,
) -> PowerEstimate {
    match config.class {
        VehicleClass::Multirotor => {
            multirotor_power(config, tuning, ground_speed_ms, climb_rate_ms, air_density, wind)
        }
        VehicleClass::Vtol => {
            vtol_power(config, tuning, ground_speed_ms, climb_rate_ms, air_density, wind)
        }
        VehicleClass::FixedWing => {
            fixed_wing_power(config, ground_speed_ms, climb_rate_ms, air_density, wind)
        }
    }
}

/// Rotorcraft model: hover power shaped by the speed-efficiency curve, plus
/// dynamic drag, climb power, and a bounded wind-impact term.
pub fn multirotor_power(
    config: &VehicleConfig,
    tuning: &EfficiencyTuning,
    ground_speed_ms: f64,
    climb_rate_ms: f64,
    air_density: f64,
    wind: Option<&WindComponents>,
) -> PowerEstimate {
    let (hover_w, hover_fallback) = hover_power_w(config, air_density);
    let airspeed_ms = wind
        .map(|w| w.effective_airspeed_ms)
        .unwrap_or(ground_speed_ms)
        .max(0.0);

    let base_w = hover_w * speed_efficiency_factor(config.mass_kg, airspeed_ms, tuning);
    let ground_drag_w = drag_power_w(config, air_density, ground_speed_ms);
    let climb_w = climb_power_w(config, climb_rate_ms);
    let wind_w = match wind {
        Some(_) => {
            let relative_drag_w = drag_power_w(config, air_density, airspeed_ms);
            (relative_drag_w - ground_drag_w).clamp(0.0, WIND_DRAG_CAP_FRACTION * ground_drag_w)
        }
        None => 0.0,
    };

    finish(base_w + ground_drag_w + climb_w + wind_w, hover_fallback, config)
}

/// Hybrid VTOL model: pure rotorcraft below the transition speed, otherwise a
/// linearly unloaded hover term plus a dedicated forward-thrust term.
pub fn vtol_power(
    config: &VehicleConfig,
    tuning: &EfficiencyTuning,
    ground_speed_ms: f64,
    climb_rate_ms: f64,
    air_density: f64,
    wind: Option<&WindComponents>,
) -> PowerEstimate {
    if ground_speed_ms < VTOL_TRANSITION_SPEED_MS {
        return multirotor_power(config, tuning, ground_speed_ms, climb_rate_ms, air_density, wind);
    }

    let (hover_w, hover_fallback) = hover_power_w(config, air_density);
    let unload = 1.0 - (ground_speed_ms / config.max_speed_ms) * (1.0 - VTOL_HOVER_FLOOR);
    let hover_share_w = hover_w * unload.max(VTOL_HOVER_FLOOR);

    let forward_w = config
        .forward_thrust_power_w
        .unwrap_or(VTOL_FORWARD_POWER_FRACTION * config.max_power_w);
    let climb_w = climb_power_w(config, climb_rate_ms);
    let wind_w = match wind {
        Some(w) => {
            let ratio = w.effective_airspeed_ms / ground_speed_ms;
            (forward_w * (ratio - 1.0) * 0.5).clamp(-0.5 * forward_w, 0.5 * forward_w)
        }
        None => 0.0,
    };

    finish(hover_share_w + forward_w + climb_w + wind_w, hover_fallback, config)
}

/// Fixed-wing model: the configured cruise power when present, otherwise
/// induced plus parasitic drag at cruise; then climb power and a signed
/// headwind factor floored at half the zero-wind cruise power.
pub fn fixed_wing_power(
    config: &VehicleConfig,
    ground_speed_ms: f64,
    climb_rate_ms: f64,
    air_density: f64,
    wind: Option<&WindComponents>,
) -> PowerEstimate {
    let v = ground_speed_ms.max(MIN_MODEL_SPEED_MS);

    let cruise_w = match config.cruise_power_w {
        Some(configured) => configured,
        None => {
            let lift_coefficient =
                config.mass_kg * GRAVITY / (0.5 * air_density * v * v * config.wing_area_m2);
            let induced_cd = lift_coefficient * lift_coefficient / SPAN_EFFICIENCY_DIVISOR;
            let total_cd = config.drag_coefficient + induced_cd;
            let drag_force_n = 0.5 * air_density * total_cd * config.wing_area_m2 * v * v;
            drag_force_n * v / (config.motor_efficiency * config.propeller_efficiency)
        }
    };

    let climb_w = climb_power_w(config, climb_rate_ms);
    let wind_factor = match wind {
        Some(w) => (1.0 + (w.headwind_ms / v) * FIXED_WING_WIND_GAIN).clamp(0.5, 1.5),
        None => 1.0,
    };

    let total_w = (cruise_w * wind_factor + climb_w).max(FIXED_WING_POWER_FLOOR * cruise_w);
    finish(total_w, false, config)
}

/// Hover power: the configured value when present, otherwise a momentum-theory
/// estimate divided by the rotor figure of merit.
///
/// Returns `(watts, guard_fallback)`; the fallback fires when the momentum
/// denominator is non-positive or the estimate is non-finite.
pub fn hover_power_w(config: &VehicleConfig, air_density: f64) -> (f64, bool) {
    if let Some(configured) = config.hover_power_w {
        return (configured, false);
    }

    let rotor_count = f64::from(config.rotor_count());
    let thrust_per_rotor_n = config.mass_kg * GRAVITY / rotor_count;
    let disk_area_m2 = PI * (config.rotor_diameter_m / 2.0).powi(2);
    let denominator = 2.0 * air_density * disk_area_m2;
    if denominator <= 0.0 {
        return (GUARD_FALLBACK_W_PER_KG * config.mass_kg, true);
    }

    let induced_velocity_ms = (thrust_per_rotor_n / denominator).sqrt();
    let ideal_per_rotor_w = thrust_per_rotor_n * induced_velocity_ms;
    let total_w = ideal_per_rotor_w / FIGURE_OF_MERIT * rotor_count;
    if total_w.is_finite() {
        (total_w, false)
    } else {
        (GUARD_FALLBACK_W_PER_KG * config.mass_kg, true)
    }
}

/// Lower and upper airspeed bounds of the sweet-spot band (m/s). The band
/// scales with mass and is clamped to sensible minimums.
pub fn sweet_spot_band(mass_kg: f64) -> (f64, f64) {
    ((0.3 * mass_kg).max(2.0), (0.5 * mass_kg).max(4.0))
}

/// Empirical speed-efficiency factor applied to hover power.
///
/// 1.0 at zero airspeed, dipping through the sweet-spot band, rising again in
/// fast flight as the angle of attack grows. Tunable, not a physical law.
/// The in-band base is derived from the same multiplied improvement as the
/// slow branch, so the curve stays continuous at the band edges for any
/// multiplier, and the result is floored strictly above zero.
pub fn speed_efficiency_factor(mass_kg: f64, airspeed_ms: f64, tuning: &EfficiencyTuning) -> f64 {
    let (band_min, band_max) = sweet_spot_band(mass_kg);
    let band_center = (band_min + band_max) / 2.0;
    let improvement = tuning.slow_improvement();
    let band_base = 1.0 - improvement;

    let factor = if airspeed_ms <= 0.0 {
        1.0
    } else if airspeed_ms <= band_min {
        1.0 - (airspeed_ms / band_min) * improvement
    } else if airspeed_ms <= band_max {
        let normalized = (airspeed_ms - band_center) / (band_max - band_center);
        band_base - tuning.effective_gain() * (1.0 - normalized * normalized)
    } else {
        let penalty = ((airspeed_ms - band_max) * FAST_PENALTY_PER_MS).min(FAST_PENALTY_CAP);
        band_base + penalty
    };
    factor.max(MIN_EFFICIENCY_FACTOR)
}

fn dynamic_drag_coefficient(config: &VehicleConfig, airspeed_ms: f64) -> f64 {
    let (_, band_max) = sweet_spot_band(config.mass_kg);
    let excess = (airspeed_ms - band_max).max(0.0);
    (config.drag_coefficient * (1.0 + DRAG_CD_GROWTH_PER_MS * excess))
        .min(config.drag_coefficient * DRAG_CD_CAP_FACTOR)
}

fn drag_power_w(config: &VehicleConfig, air_density: f64, speed_ms: f64) -> f64 {
    if speed_ms <= 0.0 {
        return 0.0;
    }
    let cd = dynamic_drag_coefficient(config, speed_ms);
    let drag_force_n = 0.5 * air_density * cd * config.wing_area_m2 * speed_ms * speed_ms;
    drag_force_n * speed_ms / (config.motor_efficiency * config.propeller_efficiency)
}

fn climb_power_w(config: &VehicleConfig, climb_rate_ms: f64) -> f64 {
    if climb_rate_ms > 0.0 {
        config.mass_kg * GRAVITY * climb_rate_ms / config.motor_efficiency
    } else {
        // Descent recovers nothing; climb power is never negative.
        0.0
    }
}

/// Single guard boundary applied by every model: non-finite or negative sums
/// become the mass-proportional fallback, then everything is clamped to
/// `[0, max_power]`.
fn finish(total_w: f64, upstream_fallback: bool, config: &VehicleConfig) -> PowerEstimate {
    if total_w.is_finite() && total_w >= 0.0 {
        PowerEstimate {
            electrical_w: total_w.min(config.max_power_w),
            guard_fallback: upstream_fallback,
        }
    } else {
        PowerEstimate {
            electrical_w: (GUARD_FALLBACK_W_PER_KG * config.mass_kg).min(config.max_power_w),
            guard_fallback: true,
        }
    }
}
