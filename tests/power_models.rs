use uav_energy_calculator::power::{
    EfficiencyTuning, electrical_power, multirotor_power, sweet_spot_band, vtol_power,
};
use uav_energy_calculator::vehicle::{FrameType, MotorMount, VehicleClass, VehicleConfig};
use uav_energy_calculator::wind::{WindSample, decompose};

fn base(class: VehicleClass) -> VehicleConfig {
    VehicleConfig {
        name: "test".to_string(),
        class,
        mass_kg: 2.5,
        max_power_w: 2000.0,
        hover_power_w: Some(800.0),
        cruise_power_w: None,
        forward_thrust_power_w: None,
        cruise_speed_ms: 10.0,
        max_speed_ms: 15.0,
        max_climb_rate_ms: 5.0,
        max_descent_rate_ms: 3.0,
        horizontal_acceleration_ms2: 3.0,
        vertical_acceleration_ms2: 2.5,
        battery_capacity_mah: 22_000.0,
        battery_voltage_v: 25.2,
        frame: FrameType::Quad,
        motor_mount: MotorMount::Single,
        rotor_diameter_m: 0.3,
        wing_area_m2: 0.5,
        drag_coefficient: 0.03,
        motor_efficiency: 0.85,
        propeller_efficiency: 0.75,
        transmission_efficiency: 0.95,
    }
}

const RHO: f64 = 1.225;

#[test]
fn stationary_multirotor_draws_exactly_hover_power() {
    let config = base(VehicleClass::Multirotor);
    let tuning = EfficiencyTuning::default();
    let estimate = multirotor_power(&config, &tuning, 0.0, 0.0, RHO, None);
    assert!((estimate.electrical_w - 800.0).abs() < 1.0e-9);
    assert!(!estimate.guard_fallback);
}

#[test]
fn sweet_spot_flight_is_cheaper_than_hover_and_fast_flight_dearer() {
    let config = base(VehicleClass::Multirotor);
    let tuning = EfficiencyTuning::default();
    let (band_min, band_max) = sweet_spot_band(config.mass_kg);
    let center = (band_min + band_max) / 2.0;

    let hover = multirotor_power(&config, &tuning, 0.0, 0.0, RHO, None);
    let sweet = multirotor_power(&config, &tuning, center, 0.0, RHO, None);
    let fast = multirotor_power(&config, &tuning, 14.0, 0.0, RHO, None);

    assert!(sweet.electrical_w < hover.electrical_w);
    assert!(fast.electrical_w > sweet.electrical_w);
}

#[test]
fn climbing_costs_more_and_descending_recovers_nothing() {
    let config = base(VehicleClass::Multirotor);
    let tuning = EfficiencyTuning::default();
    let level = multirotor_power(&config, &tuning, 5.0, 0.0, RHO, None);
    let climb = multirotor_power(&config, &tuning, 5.0, 3.0, RHO, None);
    let descent = multirotor_power(&config, &tuning, 5.0, -3.0, RHO, None);
    assert!(climb.electrical_w > level.electrical_w);
    assert!((descent.electrical_w - level.electrical_w).abs() < 1.0e-9);
}

#[test]
fn moderate_headwind_raises_and_moderate_tailwind_lowers_the_draw() {
    let config = base(VehicleClass::Multirotor);
    let tuning = EfficiencyTuning::default();
    let ground_speed = 10.0;

    let headwind = decompose(
        &WindSample::from_meteorological(52.5, 13.4, 100.0, 5.0, 0.0),
        0.0,
        ground_speed,
    );
    let tailwind = decompose(
        &WindSample::from_meteorological(52.5, 13.4, 100.0, 5.0, 180.0),
        0.0,
        ground_speed,
    );

    let calm = multirotor_power(&config, &tuning, ground_speed, 0.0, RHO, None);
    let against = multirotor_power(&config, &tuning, ground_speed, 0.0, RHO, Some(&headwind));
    let with = multirotor_power(&config, &tuning, ground_speed, 0.0, RHO, Some(&tailwind));

    assert!(against.electrical_w > calm.electrical_w);
    assert!(with.electrical_w < calm.electrical_w);
}

#[test]
fn vtol_behaves_as_a_rotorcraft_below_the_transition_speed() {
    let config = base(VehicleClass::Vtol);
    let tuning = EfficiencyTuning::default();
    let as_vtol = vtol_power(&config, &tuning, 3.0, 0.0, RHO, None);
    let as_rotor = multirotor_power(&config, &tuning, 3.0, 0.0, RHO, None);
    assert_eq!(as_vtol, as_rotor);
}

#[test]
fn vtol_cruise_unloads_the_rotors_but_keeps_the_hover_floor() {
    let mut config = base(VehicleClass::Vtol);
    config.forward_thrust_power_w = Some(500.0);
    let tuning = EfficiencyTuning::default();

    // At max speed the hover share bottoms out at 30% of hover power.
    let at_max = vtol_power(&config, &tuning, config.max_speed_ms, 0.0, RHO, None);
    let expected = 0.3 * 800.0 + 500.0;
    assert!((at_max.electrical_w - expected).abs() < 1.0e-9);

    // Without a configured forward-thrust power the model assumes a fraction
    // of max power.
    config.forward_thrust_power_w = None;
    let defaulted = vtol_power(&config, &tuning, config.max_speed_ms, 0.0, RHO, None);
    assert!((defaulted.electrical_w - (0.3 * 800.0 + 0.3 * 2000.0)).abs() < 1.0e-9);
}

#[test]
fn fixed_wing_power_grows_past_cruise_and_is_floored_in_strong_tailwind() {
    let mut config = base(VehicleClass::FixedWing);
    config.hover_power_w = None;
    config.cruise_speed_ms = 22.0;
    config.max_speed_ms = 30.0;
    config.wing_area_m2 = 0.4;
    config.drag_coefficient = 0.025;
    config.mass_kg = 3.0;
    let tuning = EfficiencyTuning::default();

    let cruise = electrical_power(&config, &tuning, 22.0, 0.0, RHO, None);
    let fast = electrical_power(&config, &tuning, 30.0, 0.0, RHO, None);
    assert!(fast.electrical_w > cruise.electrical_w);

    let strong_tailwind = decompose(
        &WindSample::from_meteorological(52.5, 13.4, 100.0, 40.0, 180.0),
        0.0,
        22.0,
    );
    let floored = electrical_power(&config, &tuning, 22.0, 0.0, RHO, Some(&strong_tailwind));
    // The wind factor clamps at 0.5, so the draw never halves below cruise.
    assert!(floored.electrical_w >= 0.5 * cruise.electrical_w - 1.0e-9);
}

#[test]
fn configured_cruise_power_overrides_the_drag_estimate() {
    let mut config = base(VehicleClass::FixedWing);
    config.hover_power_w = None;
    config.cruise_speed_ms = 22.0;
    config.max_speed_ms = 30.0;
    let tuning = EfficiencyTuning::default();

    config.cruise_power_w = None;
    let derived = electrical_power(&config, &tuning, 22.0, 0.0, RHO, None);

    config.cruise_power_w = Some(300.0);
    let configured = electrical_power(&config, &tuning, 22.0, 0.0, RHO, None);
    assert!((configured.electrical_w - 300.0).abs() < 1.0e-9);
    assert!((configured.electrical_w - derived.electrical_w).abs() > 1.0);

    // The configured value still passes through the wind factor.
    let headwind = decompose(
        &WindSample::from_meteorological(52.5, 13.4, 100.0, 10.0, 0.0),
        0.0,
        22.0,
    );
    let against = electrical_power(&config, &tuning, 22.0, 0.0, RHO, Some(&headwind));
    let expected = 300.0 * (1.0 + (10.0 / 22.0) * 0.3);
    assert!((against.electrical_w - expected).abs() < 1.0e-9);
}
