//! Vehicle descriptions consumed by the power models and the mission engine.

/// Closed set of supported vehicle classes. Power estimation dispatches on
/// this tag; anything else is rejected at the configuration boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleClass {
    /// Tri/quad/hexa/octo rotorcraft with no dedicated forward-thrust unit.
    Multirotor,
    /// Hybrid airframe: hover motors plus a separate forward-thrust motor.
    Vtol,
    /// Conventional fixed wing cruising on lift.
    FixedWing,
}

/// Airframe arm count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    Tri,
    Quad,
    Hexa,
    Octo,
}

impl FrameType {
    /// Number of arms carrying hover motors.
    pub fn arm_count(self) -> u32 {
        match self {
            FrameType::Tri => 3,
            FrameType::Quad => 4,
            FrameType::Hexa => 6,
            FrameType::Octo => 8,
        }
    }
}

/// Motor mounting per arm. Coaxial stacks two motors on each arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorMount {
    Single,
    Coaxial,
}

impl MotorMount {
    pub fn rotors_per_arm(self) -> u32 {
        match self {
            MotorMount::Single => 1,
            MotorMount::Coaxial => 2,
        }
    }
}

/// Immutable description of one vehicle instance.
///
/// Optional fields (`hover_power_w`, `cruise_power_w`,
/// `forward_thrust_power_w`) are resolved by the power models through
/// documented estimation logic rather than treated as errors.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleConfig {
    pub name: String,
    pub class: VehicleClass,
    pub mass_kg: f64,
    pub max_power_w: f64,
    pub hover_power_w: Option<f64>,
    pub cruise_power_w: Option<f64>,
    pub forward_thrust_power_w: Option<f64>,
    pub cruise_speed_ms: f64,
    pub max_speed_ms: f64,
    pub max_climb_rate_ms: f64,
    pub max_descent_rate_ms: f64,
    pub horizontal_acceleration_ms2: f64,
    pub vertical_acceleration_ms2: f64,
    pub battery_capacity_mah: f64,
    pub battery_voltage_v: f64,
    pub frame: FrameType,
    pub motor_mount: MotorMount,
    pub rotor_diameter_m: f64,
    pub wing_area_m2: f64,
    pub drag_coefficient: f64,
    pub motor_efficiency: f64,
    pub propeller_efficiency: f64,
    pub transmission_efficiency: f64,
}

impl VehicleConfig {
    /// Total hover rotor count, derived from the airframe topology.
    ///
    /// Always recomputed from `frame` and `motor_mount`; there is no stored
    /// count to fall out of sync. The smallest frame yields 3, so the result
    /// is always ≥ 1.
    pub fn rotor_count(&self) -> u32 {
        self.frame.arm_count() * self.motor_mount.rotors_per_arm()
    }

    /// Battery capacity in watt-hours: `mAh × V / 1000`.
    pub fn battery_capacity_wh(&self) -> f64 {
        self.battery_capacity_mah * self.battery_voltage_v / 1000.0
    }

    /// Combined motor × propeller × transmission efficiency.
    pub fn drivetrain_efficiency(&self) -> f64 {
        self.motor_efficiency * self.propeller_efficiency * self.transmission_efficiency
    }
}
