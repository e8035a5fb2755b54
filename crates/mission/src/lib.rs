//! Mission-level energy integration.
//!
//! The segment integrator walks consecutive waypoint pairs, resolves the
//! speed/climb profile for the vehicle class, projects the segment's wind
//! sample onto the flight bearing, and turns power × time into energy. The
//! aggregator sums segments into a [`MissionResult`] with battery usage and
//! feasibility. The whole path is a pure function of its inputs: identical
//! inputs produce bit-identical results.

use serde::Serialize;
use thiserror::Error;

use uav_core::atmosphere::air_density;
use uav_core::geodesy::{GeoPoint, bearing, distance_3d, horizontal_distance};
use uav_power::{EfficiencyTuning, PowerEstimate, electrical_power};
use uav_vehicle::{VehicleClass, VehicleConfig};
use uav_wind::{WindComponents, WindSample, decompose};

/// Segments shorter than this fly at reduced cruise speed (m).
const SHORT_SEGMENT_M: f64 = 100.0;
/// Cruise-speed factor applied to short VTOL/fixed-wing segments.
const SHORT_SEGMENT_SPEED_FACTOR: f64 = 0.7;

/// One commanded mission waypoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
    /// Commanded ground speed towards the next waypoint; cruise speed if unset.
    pub speed_ms: Option<f64>,
    /// Hover dwell after arriving at this waypoint (s).
    pub hover_seconds: f64,
}

impl Waypoint {
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_m,
            speed_ms: None,
            hover_seconds: 0.0,
        }
    }

    pub fn with_speed(mut self, speed_ms: f64) -> Self {
        self.speed_ms = Some(speed_ms);
        self
    }

    pub fn with_hover(mut self, hover_seconds: f64) -> Self {
        self.hover_seconds = hover_seconds;
        self
    }

    fn geo(&self) -> GeoPoint {
        GeoPoint::new(self.latitude_deg, self.longitude_deg, self.altitude_m)
    }
}

/// Input errors that abort a simulation before any segment is computed.
#[derive(Debug, Error)]
pub enum MissionError {
    #[error("a mission needs at least 2 waypoints, got {found}")]
    TooFewWaypoints { found: usize },
}

/// Wind conditions recorded per segment, in the segment's own bearing frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindInfluence {
    pub speed_ms: f64,
    pub direction_deg: f64,
    /// Positive opposes flight.
    pub headwind_ms: f64,
    pub crosswind_ms: f64,
    pub bearing_deg: f64,
}

impl WindInfluence {
    fn calm(bearing_deg: f64) -> Self {
        Self {
            speed_ms: 0.0,
            direction_deg: 0.0,
            headwind_ms: 0.0,
            crosswind_ms: 0.0,
            bearing_deg,
        }
    }
}

/// Energy bookkeeping for one waypoint pair.
///
/// Invariant: `energy_wh == average_power_w × duration_s / 3600` exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentResult {
    pub index: usize,
    pub distance_m: f64,
    pub duration_s: f64,
    pub energy_wh: f64,
    pub average_speed_ms: f64,
    pub average_power_w: f64,
    pub wind: WindInfluence,
    /// True when a numeric guard substituted the fallback power estimate.
    pub guard_fallback: bool,
}

/// Aggregate statistics derived from the segment totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MissionSummary {
    pub battery_capacity_wh: f64,
    pub remaining_energy_wh: f64,
    pub remaining_battery_percent: f64,
    pub is_feasible: bool,
    pub flight_time_minutes: f64,
    pub energy_per_km_wh: f64,
    pub average_speed_ms: f64,
    /// `capacity / usedEnergy × distanceFlown`; only meaningful when the
    /// simulated route is representative of the full mission.
    pub max_range_estimate_km: f64,
    pub guard_fallback_segments: usize,
}

/// Complete, immutable result of one mission simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionResult {
    pub vehicle: String,
    pub segments: Vec<SegmentResult>,
    pub total_energy_wh: f64,
    pub total_distance_m: f64,
    pub total_time_s: f64,
    pub battery_usage_percent: f64,
    pub summary: MissionSummary,
}

/// Simulate a mission with the default efficiency tuning.
pub fn simulate_mission(
    config: &VehicleConfig,
    waypoints: &[Waypoint],
    wind: &[WindSample],
) -> Result<MissionResult, MissionError> {
    simulate_mission_with_tuning(config, waypoints, wind, &EfficiencyTuning::default())
}

/// Simulate a mission, overriding the sweet-spot calibration knobs.
///
/// `wind` pairs with segments by index; a shorter sequence holds the last
/// sample constant, an empty one means calm air throughout.
pub fn simulate_mission_with_tuning(
    config: &VehicleConfig,
    waypoints: &[Waypoint],
    wind: &[WindSample],
    tuning: &EfficiencyTuning,
) -> Result<MissionResult, MissionError> {
    if waypoints.len() < 2 {
        return Err(MissionError::TooFewWaypoints {
            found: waypoints.len(),
        });
    }

    let mut segments = Vec::with_capacity(waypoints.len() - 1);
    let mut total_energy_wh = 0.0;
    let mut total_distance_m = 0.0;
    let mut total_time_s = 0.0;
    let mut guard_fallback_segments = 0;

    for (index, pair) in waypoints.windows(2).enumerate() {
        let sample = wind_for_segment(wind, index);
        let segment = integrate_segment(config, tuning, index, &pair[0], &pair[1], sample);

        total_energy_wh += segment.energy_wh;
        total_distance_m += segment.distance_m;
        total_time_s += segment.duration_s;
        if segment.guard_fallback {
            guard_fallback_segments += 1;
        }
        segments.push(segment);
    }

    let battery_capacity_wh = config.battery_capacity_wh();
    let battery_usage_percent = if battery_capacity_wh > 0.0 {
        total_energy_wh / battery_capacity_wh * 100.0
    } else {
        0.0
    };

    let summary = MissionSummary {
        battery_capacity_wh,
        remaining_energy_wh: battery_capacity_wh - total_energy_wh,
        remaining_battery_percent: 100.0 - battery_usage_percent,
        is_feasible: total_energy_wh < battery_capacity_wh,
        flight_time_minutes: total_time_s / 60.0,
        energy_per_km_wh: if total_distance_m > 0.0 {
            total_energy_wh / (total_distance_m / 1000.0)
        } else {
            0.0
        },
        average_speed_ms: if total_time_s > 0.0 {
            total_distance_m / total_time_s
        } else {
            0.0
        },
        max_range_estimate_km: if total_energy_wh > 0.0 {
            battery_capacity_wh / total_energy_wh * (total_distance_m / 1000.0)
        } else {
            0.0
        },
        guard_fallback_segments,
    };

    Ok(MissionResult {
        vehicle: config.name.clone(),
        segments,
        total_energy_wh,
        total_distance_m,
        total_time_s,
        battery_usage_percent,
        summary,
    })
}

fn wind_for_segment(wind: &[WindSample], index: usize) -> Option<&WindSample> {
    if wind.is_empty() {
        None
    } else {
        Some(&wind[index.min(wind.len() - 1)])
    }
}

/// Speed and climb profile resolved for one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SegmentProfile {
    duration_s: f64,
    horizontal_speed_ms: f64,
    climb_rate_ms: f64,
}

impl SegmentProfile {
    const STATIONARY: SegmentProfile = SegmentProfile {
        duration_s: 0.0,
        horizontal_speed_ms: 0.0,
        climb_rate_ms: 0.0,
    };
}

/// Resolve the flight profile between two waypoints.
///
/// Rotorcraft couple the horizontal and vertical axes: each axis' distance is
/// divided by its own rate limit and the slower axis governs the segment
/// duration, with the actual speeds back-derived from it. VTOL and fixed-wing
/// segments fly at commanded/cruise speed along the 3-D path, reduced for
/// short hops.
fn resolve_profile(
    config: &VehicleConfig,
    start: &Waypoint,
    horizontal_m: f64,
    altitude_delta_m: f64,
    path_m: f64,
) -> SegmentProfile {
    let commanded_ms = start
        .speed_ms
        .unwrap_or(config.cruise_speed_ms)
        .min(config.max_speed_ms);

    match config.class {
        VehicleClass::Multirotor => {
            let vertical_rate_ms = if altitude_delta_m > 0.0 {
                config.max_climb_rate_ms
            } else {
                config.max_descent_rate_ms
            };
            let horizontal_time_s = safe_div(horizontal_m, commanded_ms);
            let vertical_time_s = safe_div(altitude_delta_m.abs(), vertical_rate_ms);
            let duration_s = horizontal_time_s.max(vertical_time_s);
            if duration_s <= 0.0 {
                return SegmentProfile::STATIONARY;
            }
            SegmentProfile {
                duration_s,
                horizontal_speed_ms: horizontal_m / duration_s,
                climb_rate_ms: altitude_delta_m / duration_s,
            }
        }
        VehicleClass::Vtol | VehicleClass::FixedWing => {
            let speed_ms = if horizontal_m < SHORT_SEGMENT_M {
                commanded_ms * SHORT_SEGMENT_SPEED_FACTOR
            } else {
                commanded_ms
            };
            let duration_s = safe_div(path_m, speed_ms);
            if duration_s <= 0.0 {
                return SegmentProfile::STATIONARY;
            }
            SegmentProfile {
                duration_s,
                horizontal_speed_ms: speed_ms,
                climb_rate_ms: altitude_delta_m / duration_s,
            }
        }
    }
}

fn integrate_segment(
    config: &VehicleConfig,
    tuning: &EfficiencyTuning,
    index: usize,
    start: &Waypoint,
    end: &Waypoint,
    wind: Option<&WindSample>,
) -> SegmentResult {
    let start_geo = start.geo();
    let end_geo = end.geo();
    let horizontal_m = horizontal_distance(&start_geo, &end_geo);
    let path_m = distance_3d(&start_geo, &end_geo);
    let altitude_delta_m = end.altitude_m - start.altitude_m;
    let bearing_deg = bearing(&start_geo, &end_geo);

    let profile = resolve_profile(config, start, horizontal_m, altitude_delta_m, path_m);
    let density = air_density((start.altitude_m + end.altitude_m) / 2.0);

    let components: Option<WindComponents> =
        wind.map(|sample| decompose(sample, bearing_deg, profile.horizontal_speed_ms));

    let cruise = if profile.duration_s > 0.0 {
        electrical_power(
            config,
            tuning,
            profile.horizontal_speed_ms,
            profile.climb_rate_ms,
            density,
            components.as_ref(),
        )
    } else {
        PowerEstimate {
            electrical_w: 0.0,
            guard_fallback: false,
        }
    };

    // Dwell at the arrival waypoint is flown as a zero-airspeed hover.
    let dwell_s = end.hover_seconds.max(0.0);
    let hover = if dwell_s > 0.0 {
        electrical_power(config, tuning, 0.0, 0.0, density, None)
    } else {
        PowerEstimate {
            electrical_w: 0.0,
            guard_fallback: false,
        }
    };

    let duration_s = profile.duration_s + dwell_s;
    let combined_wh =
        (cruise.electrical_w * profile.duration_s + hover.electrical_w * dwell_s) / 3600.0;
    // Re-derive the average so energy == power × duration / 3600 holds exactly.
    let average_power_w = if duration_s > 0.0 {
        combined_wh * 3600.0 / duration_s
    } else {
        0.0
    };
    let energy_wh = average_power_w * duration_s / 3600.0;

    let wind_influence = match (wind, components) {
        (Some(sample), Some(c)) => WindInfluence {
            speed_ms: sample.speed_ms,
            direction_deg: sample.direction_deg,
            headwind_ms: c.headwind_ms,
            crosswind_ms: c.crosswind_ms,
            bearing_deg,
        },
        _ => WindInfluence::calm(bearing_deg),
    };

    SegmentResult {
        index,
        distance_m: path_m,
        duration_s,
        energy_wh,
        average_speed_ms: if duration_s > 0.0 { path_m / duration_s } else { 0.0 },
        average_power_w,
        wind: wind_influence,
        guard_fallback: cruise.guard_fallback || hover.guard_fallback,
    }
}

fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
