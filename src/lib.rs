//! UAV mission energy estimation.
//!
//! The physics and aggregation logic live in the workspace crates; this
//! library re-exports them under one roof so the CLI binaries and external
//! callers share a single import surface.

pub mod core {
    pub use uav_core::atmosphere;
    pub use uav_core::constants;
    pub use uav_core::geodesy;
}

pub mod vehicle {
    pub use uav_vehicle::*;
}

pub mod wind {
    pub use uav_wind::*;
}

pub mod power {
    pub use uav_power::*;
}

pub mod mission {
    pub use uav_mission::*;
}

pub mod glauert {
    pub use uav_glauert::*;
}

pub mod config {
    pub use uav_config::*;
}

pub mod export {
    pub use uav_export::*;
}

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
