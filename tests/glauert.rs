use uav_energy_calculator::core::atmosphere::air_density;
use uav_energy_calculator::glauert::{
    DEFAULT_USABLE_BATTERY_FRACTION, compare_models, glauert_sweet_spot, primary_sweet_spot,
    range_at_cruise, rotor_power,
};
use uav_energy_calculator::power::EfficiencyTuning;
use uav_energy_calculator::vehicle::{FrameType, MotorMount, VehicleClass, VehicleConfig};

fn hexa() -> VehicleConfig {
    VehicleConfig {
        name: "hexa".to_string(),
        class: VehicleClass::Multirotor,
        mass_kg: 10.0,
        max_power_w: 6000.0,
        hover_power_w: None,
        cruise_power_w: None,
        forward_thrust_power_w: None,
        cruise_speed_ms: 12.0,
        max_speed_ms: 20.0,
        max_climb_rate_ms: 8.0,
        max_descent_rate_ms: 5.0,
        horizontal_acceleration_ms2: 3.0,
        vertical_acceleration_ms2: 2.0,
        battery_capacity_mah: 24_000.0,
        battery_voltage_v: 22.2,
        frame: FrameType::Hexa,
        motor_mount: MotorMount::Single,
        rotor_diameter_m: 0.44,
        wing_area_m2: 0.5,
        drag_coefficient: 0.04,
        motor_efficiency: 0.85,
        propeller_efficiency: 0.78,
        transmission_efficiency: 0.95,
    }
}

#[test]
fn sweep_covers_every_requested_speed_with_consistent_deltas() {
    let config = hexa();
    let tuning = EfficiencyTuning::default();
    let speeds: Vec<f64> = (0..=20).map(f64::from).collect();
    let points = compare_models(&config, &tuning, &speeds, air_density(100.0));

    assert_eq!(points.len(), speeds.len());
    for (point, speed) in points.iter().zip(&speeds) {
        assert_eq!(point.speed_ms, *speed);
        assert!((point.difference_w - (point.glauert_w - point.primary_w)).abs() < 1.0e-9);
        assert!(point.primary_w > 0.0 && point.glauert_w > 0.0);
    }
}

#[test]
fn both_models_prefer_forward_flight_over_hover() {
    let config = hexa();
    let tuning = EfficiencyTuning::default();
    let speeds: Vec<f64> = (0..=20).map(f64::from).collect();
    let points = compare_models(&config, &tuning, &speeds, air_density(100.0));

    let (primary_speed, primary_w) = primary_sweet_spot(&points).unwrap();
    let (glauert_speed, glauert_w) = glauert_sweet_spot(&points).unwrap();
    assert!(primary_speed > 0.0 && glauert_speed > 0.0);
    assert!(primary_w < points[0].primary_w);
    assert!(glauert_w < points[0].glauert_w);
}

#[test]
fn glauert_hover_matches_momentum_theory_within_the_figure_of_merit() {
    let config = hexa();
    let breakdown = rotor_power(&config, 0.0, 0.0, 1.225);
    // At hover the induced term dominates; profile drag adds on top.
    assert!(breakdown.induced_w > 0.0);
    assert!(breakdown.profile_w > 0.0);
    assert_eq!(breakdown.parasitic_w, 0.0);
    assert!(breakdown.electrical_w > breakdown.mechanical_w * 0.99);
}

#[test]
fn range_estimate_derates_the_battery() {
    let config = hexa();
    let full = range_at_cruise(&config, 12.0, 1000.0, 1.0);
    let derated = range_at_cruise(&config, 12.0, 1000.0, DEFAULT_USABLE_BATTERY_FRACTION);
    assert!((derated.range_km - full.range_km * 0.8).abs() < 1.0e-9);
    assert!((derated.flight_time_minutes - full.flight_time_minutes * 0.8).abs() < 1.0e-9);

    let degenerate = range_at_cruise(&config, 12.0, 0.0, 1.0);
    assert_eq!(degenerate.range_km, 0.0);
    assert_eq!(degenerate.flight_time_minutes, 0.0);
}
