//! Configuration models and loaders for the UAV Energy Calculator.
//!
//! Vehicle catalogs and mission plans live in YAML (lists) or TOML (single
//! records). Records are parsed into permissive serde types first, then
//! converted into the strict domain types; an unrecognized `vehicle_type`
//! survives parsing and is rejected during conversion so one bad catalog
//! entry produces a precise error instead of a serde failure.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use uav_mission::Waypoint;
use uav_vehicle::{FrameType, MotorMount, VehicleClass, VehicleConfig};
use uav_wind::WindSample;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FrameTypeConfig {
    Tri,
    Quad,
    Hexa,
    Octo,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MotorMountConfig {
    Single,
    Coaxial,
}

/// One vehicle catalog entry as written on disk.
#[derive(Debug, Deserialize, Clone)]
pub struct VehicleRecord {
    pub name: String,
    /// Class tag; validated during conversion so one bad entry fails with
    /// the offending vehicle's name. `quadcopter` is a legacy alias for
    /// `multirotor`, `fixed_wing` for `plane`.
    pub vehicle_type: String,
    pub mass_kg: f64,
    pub max_power_w: f64,
    #[serde(default)]
    pub hover_power_w: Option<f64>,
    #[serde(default)]
    pub cruise_power_w: Option<f64>,
    #[serde(default)]
    pub forward_thrust_power_w: Option<f64>,
    pub cruise_speed_ms: f64,
    pub max_speed_ms: f64,
    pub max_climb_rate_ms: f64,
    pub max_descent_rate_ms: f64,
    #[serde(default = "default_horizontal_acceleration")]
    pub horizontal_acceleration_ms2: f64,
    #[serde(default = "default_vertical_acceleration")]
    pub vertical_acceleration_ms2: f64,
    pub battery_capacity_mah: f64,
    pub battery_voltage_v: f64,
    #[serde(default = "default_frame")]
    pub frame: FrameTypeConfig,
    #[serde(default = "default_motor_mount")]
    pub motor_mount: MotorMountConfig,
    #[serde(default = "default_rotor_diameter")]
    pub rotor_diameter_m: f64,
    #[serde(default = "default_wing_area")]
    pub wing_area_m2: f64,
    #[serde(default = "default_drag_coefficient")]
    pub drag_coefficient: f64,
    #[serde(default = "default_motor_efficiency")]
    pub motor_efficiency: f64,
    #[serde(default = "default_propeller_efficiency")]
    pub propeller_efficiency: f64,
    #[serde(default = "default_transmission_efficiency")]
    pub transmission_efficiency: f64,
}

fn default_horizontal_acceleration() -> f64 {
    3.0
}

fn default_vertical_acceleration() -> f64 {
    2.5
}

fn default_frame() -> FrameTypeConfig {
    FrameTypeConfig::Quad
}

fn default_motor_mount() -> MotorMountConfig {
    MotorMountConfig::Single
}

fn default_rotor_diameter() -> f64 {
    0.3
}

fn default_wing_area() -> f64 {
    0.5
}

fn default_drag_coefficient() -> f64 {
    0.03
}

fn default_motor_efficiency() -> f64 {
    0.85
}

fn default_propeller_efficiency() -> f64 {
    0.75
}

fn default_transmission_efficiency() -> f64 {
    0.95
}

/// One waypoint of a mission plan as written on disk.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct WaypointRecord {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
    #[serde(default)]
    pub speed_ms: Option<f64>,
    #[serde(default)]
    pub hover_seconds: f64,
}

/// Wind specification of a mission plan.
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WindConfig {
    /// One uniform wind applied along the whole route.
    Manual { speed_ms: f64, direction_deg: f64 },
    /// Explicit per-position samples, paired with segments by index.
    Samples { samples: Vec<WindSampleRecord> },
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct WindSampleRecord {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
    pub speed_ms: f64,
    pub direction_deg: f64,
}

/// A mission plan file: named route plus optional wind.
#[derive(Debug, Deserialize, Clone)]
pub struct MissionPlanConfig {
    pub name: String,
    pub waypoints: Vec<WaypointRecord>,
    #[serde(default)]
    pub wind: Option<WindConfig>,
}

impl MissionPlanConfig {
    /// The route as domain waypoints.
    pub fn waypoints(&self) -> Vec<Waypoint> {
        self.waypoints
            .iter()
            .map(|record| {
                let mut waypoint =
                    Waypoint::new(record.latitude_deg, record.longitude_deg, record.altitude_m);
                if let Some(speed_ms) = record.speed_ms {
                    waypoint = waypoint.with_speed(speed_ms);
                }
                waypoint.with_hover(record.hover_seconds)
            })
            .collect()
    }

    /// Resolve the plan's wind specification into per-position samples.
    ///
    /// Manual wind is instantiated once per segment, anchored at the segment's
    /// departure waypoint; no specification means calm air (an empty
    /// sequence).
    pub fn resolve_wind(&self) -> Vec<WindSample> {
        let segment_starts = self.waypoints.len().saturating_sub(1);
        match &self.wind {
            None => Vec::new(),
            Some(WindConfig::Manual {
                speed_ms,
                direction_deg,
            }) => self.waypoints[..segment_starts]
                .iter()
                .map(|wp| {
                    WindSample::from_meteorological(
                        wp.latitude_deg,
                        wp.longitude_deg,
                        wp.altitude_m,
                        *speed_ms,
                        *direction_deg,
                    )
                })
                .collect(),
            Some(WindConfig::Samples { samples }) => samples
                .iter()
                .map(|s| {
                    WindSample::from_meteorological(
                        s.latitude_deg,
                        s.longitude_deg,
                        s.altitude_m,
                        s.speed_ms,
                        s.direction_deg,
                    )
                })
                .collect(),
        }
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("vehicle '{name}' has an unsupported vehicle_type")]
    UnsupportedVehicleClass { name: String },
    #[error("no vehicle named '{name}' in the catalog")]
    UnknownVehicle { name: String },
    #[error("vehicle catalog is empty")]
    EmptyCatalog,
}

impl TryFrom<VehicleRecord> for VehicleConfig {
    type Error = ConfigError;

    fn try_from(record: VehicleRecord) -> Result<Self, Self::Error> {
        let class = match record.vehicle_type.as_str() {
            "multirotor" | "quadcopter" => VehicleClass::Multirotor,
            "vtol" => VehicleClass::Vtol,
            "plane" | "fixed_wing" => VehicleClass::FixedWing,
            _ => {
                return Err(ConfigError::UnsupportedVehicleClass { name: record.name });
            }
        };
        let frame = match record.frame {
            FrameTypeConfig::Tri => FrameType::Tri,
            FrameTypeConfig::Quad => FrameType::Quad,
            FrameTypeConfig::Hexa => FrameType::Hexa,
            FrameTypeConfig::Octo => FrameType::Octo,
        };
        let motor_mount = match record.motor_mount {
            MotorMountConfig::Single => MotorMount::Single,
            MotorMountConfig::Coaxial => MotorMount::Coaxial,
        };

        Ok(VehicleConfig {
            name: record.name,
            class,
            mass_kg: record.mass_kg,
            max_power_w: record.max_power_w,
            hover_power_w: record.hover_power_w,
            cruise_power_w: record.cruise_power_w,
            forward_thrust_power_w: record.forward_thrust_power_w,
            cruise_speed_ms: record.cruise_speed_ms,
            max_speed_ms: record.max_speed_ms,
            max_climb_rate_ms: record.max_climb_rate_ms,
            max_descent_rate_ms: record.max_descent_rate_ms,
            horizontal_acceleration_ms2: record.horizontal_acceleration_ms2,
            vertical_acceleration_ms2: record.vertical_acceleration_ms2,
            battery_capacity_mah: record.battery_capacity_mah,
            battery_voltage_v: record.battery_voltage_v,
            frame,
            motor_mount,
            rotor_diameter_m: record.rotor_diameter_m,
            wing_area_m2: record.wing_area_m2,
            drag_coefficient: record.drag_coefficient,
            motor_efficiency: record.motor_efficiency,
            propeller_efficiency: record.propeller_efficiency,
            transmission_efficiency: record.transmission_efficiency,
        })
    }
}

/// Load a vehicle catalog and convert every entry to the domain type.
pub fn load_vehicles<P: AsRef<Path>>(path: P) -> Result<Vec<VehicleConfig>, ConfigError> {
    let records: Vec<VehicleRecord> = load_records(path)?;
    records.into_iter().map(VehicleConfig::try_from).collect()
}

/// Load a mission plan from a YAML or TOML file.
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<MissionPlanConfig, ConfigError> {
    load_record(path)
}

/// Pick a vehicle from the catalog by name, or the first entry when no name
/// is given.
pub fn select_vehicle<'a>(
    catalog: &'a [VehicleConfig],
    name: Option<&str>,
) -> Result<&'a VehicleConfig, ConfigError> {
    match name {
        Some(name) => catalog
            .iter()
            .find(|vehicle| vehicle.name == name)
            .ok_or_else(|| ConfigError::UnknownVehicle {
                name: name.to_string(),
            }),
        None => catalog.first().ok_or(ConfigError::EmptyCatalog),
    }
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn load_record<T, P>(path: P) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
- name: inspector
  vehicle_type: multirotor
  mass_kg: 2.5
  max_power_w: 2000
  hover_power_w: 800
  cruise_speed_ms: 12
  max_speed_ms: 15
  max_climb_rate_ms: 5
  max_descent_rate_ms: 3
  battery_capacity_mah: 22000
  battery_voltage_v: 25.2
"#;

    #[test]
    fn catalog_entry_fills_documented_defaults() {
        let records: Vec<VehicleRecord> = serde_yaml::from_str(CATALOG).unwrap();
        let vehicle = VehicleConfig::try_from(records[0].clone()).unwrap();
        assert_eq!(vehicle.class, VehicleClass::Multirotor);
        assert_eq!(vehicle.frame, FrameType::Quad);
        assert_eq!(vehicle.motor_mount, MotorMount::Single);
        assert_eq!(vehicle.rotor_diameter_m, 0.3);
        assert_eq!(vehicle.drag_coefficient, 0.03);
        assert_eq!(vehicle.motor_efficiency, 0.85);
    }

    #[test]
    fn unsupported_vehicle_type_is_rejected_by_name() {
        let yaml = CATALOG.replace("multirotor", "ornithopter");
        let records: Vec<VehicleRecord> = serde_yaml::from_str(&yaml).unwrap();
        let error = VehicleConfig::try_from(records[0].clone()).unwrap_err();
        assert!(matches!(
            error,
            ConfigError::UnsupportedVehicleClass { ref name } if name == "inspector"
        ));
    }

    #[test]
    fn manual_wind_is_instantiated_once_per_segment() {
        let plan: MissionPlanConfig = serde_yaml::from_str(
            r#"
name: square
waypoints:
  - { latitude_deg: 52.5, longitude_deg: 13.4, altitude_m: 100 }
  - { latitude_deg: 52.6, longitude_deg: 13.4, altitude_m: 120, hover_seconds: 30 }
wind:
  mode: manual
  speed_ms: 15
  direction_deg: 0
"#,
        )
        .unwrap();

        // Two waypoints make one segment, anchored at the departure point.
        let samples = plan.resolve_wind();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].latitude_deg, 52.5);
        assert!((samples[0].north_ms + 15.0).abs() < 1.0e-9);

        let waypoints = plan.waypoints();
        assert_eq!(waypoints[1].hover_seconds, 30.0);
        assert_eq!(waypoints[0].speed_ms, None);
    }

    #[test]
    fn missing_wind_means_calm_air() {
        let plan: MissionPlanConfig = serde_yaml::from_str(
            r#"
name: hop
waypoints:
  - { latitude_deg: 0.0, longitude_deg: 0.0, altitude_m: 50 }
  - { latitude_deg: 0.01, longitude_deg: 0.0, altitude_m: 50 }
"#,
        )
        .unwrap();
        assert!(plan.resolve_wind().is_empty());
    }

    #[test]
    fn select_vehicle_by_name_or_first() {
        let records: Vec<VehicleRecord> = serde_yaml::from_str(CATALOG).unwrap();
        let catalog: Vec<VehicleConfig> = records
            .into_iter()
            .map(|r| VehicleConfig::try_from(r).unwrap())
            .collect();
        assert_eq!(select_vehicle(&catalog, None).unwrap().name, "inspector");
        assert_eq!(
            select_vehicle(&catalog, Some("inspector")).unwrap().name,
            "inspector"
        );
        assert!(matches!(
            select_vehicle(&catalog, Some("ghost")),
            Err(ConfigError::UnknownVehicle { .. })
        ));
    }
}
