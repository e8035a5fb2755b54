//! Wind samples and their projection onto a flight bearing.
//!
//! A `WindSample` carries both the meteorological description (speed plus the
//! direction the wind blows *from*) and a precomputed east/north/vertical
//! velocity decomposition. The decomposition stores where the air actually
//! moves, so a 0° (north) wind has a negative north component.

/// Smallest effective airspeed returned by the decomposition (m/s).
pub const MIN_EFFECTIVE_AIRSPEED_MS: f64 = 0.1;

/// One resolved wind observation, tagged with the position it applies to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindSample {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
    /// Scalar wind speed, ≥ 0 (m/s).
    pub speed_ms: f64,
    /// Meteorological direction the wind blows from, `[0, 360)` degrees.
    pub direction_deg: f64,
    /// Eastward air-velocity component (m/s).
    pub east_ms: f64,
    /// Northward air-velocity component (m/s).
    pub north_ms: f64,
    /// Vertical air-velocity component (m/s), usually negligible.
    pub vertical_ms: f64,
}

impl WindSample {
    /// Build a sample from meteorological speed/direction, precomputing the
    /// velocity decomposition consistent with that direction.
    pub fn from_meteorological(
        latitude_deg: f64,
        longitude_deg: f64,
        altitude_m: f64,
        speed_ms: f64,
        direction_deg: f64,
    ) -> Self {
        let speed_ms = speed_ms.max(0.0);
        let direction_deg = direction_deg.rem_euclid(360.0);
        let direction_rad = direction_deg.to_radians();
        Self {
            latitude_deg,
            longitude_deg,
            altitude_m,
            speed_ms,
            direction_deg,
            // The air moves away from the reported direction.
            east_ms: -speed_ms * direction_rad.sin(),
            north_ms: -speed_ms * direction_rad.cos(),
            vertical_ms: 0.0,
        }
    }

    /// A zero-wind sample at the given position.
    pub fn calm(latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Self {
        Self::from_meteorological(latitude_deg, longitude_deg, altitude_m, 0.0, 0.0)
    }
}

/// Wind projected onto a specific flight bearing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindComponents {
    /// Component parallel to the bearing; positive opposes flight.
    pub headwind_ms: f64,
    /// Component perpendicular to the bearing.
    pub crosswind_ms: f64,
    /// Airspeed the vehicle actually works against, floored above zero.
    pub effective_airspeed_ms: f64,
}

/// Project a wind sample onto the segment's flight bearing.
///
/// Must be recomputed per segment with that segment's own bearing; a
/// vehicle-relative "forward = X axis" shortcut is only acceptable when no
/// bearing exists.
pub fn decompose(wind: &WindSample, bearing_deg: f64, ground_speed_ms: f64) -> WindComponents {
    let bearing_rad = bearing_deg.to_radians();
    let headwind_ms = -(wind.east_ms * bearing_rad.sin() + wind.north_ms * bearing_rad.cos());
    let crosswind_ms = wind.east_ms * (-bearing_rad.cos()) + wind.north_ms * bearing_rad.sin();
    // Headwind is positive-opposing, so it adds to the airspeed the airframe
    // sees; a tailwind (negative headwind) reduces it.
    let effective_airspeed_ms = (ground_speed_ms + headwind_ms).max(MIN_EFFECTIVE_AIRSPEED_MS);
    WindComponents {
        headwind_ms,
        crosswind_ms,
        effective_airspeed_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn north_wind_opposes_northbound_flight() {
        let wind = WindSample::from_meteorological(52.5, 13.4, 100.0, 15.0, 0.0);
        let components = decompose(&wind, 0.0, 10.0);
        assert!((components.headwind_ms - 15.0).abs() < 1.0e-9);
        assert!((components.effective_airspeed_ms - 25.0).abs() < 1.0e-9);
    }

    #[test]
    fn aligned_tailwind_is_negative_headwind() {
        // Wind from the south while flying north.
        let wind = WindSample::from_meteorological(52.5, 13.4, 100.0, 10.0, 180.0);
        let components = decompose(&wind, 0.0, 15.0);
        assert!((components.headwind_ms + 10.0).abs() < 1.0e-9);
        assert!((components.effective_airspeed_ms - 5.0).abs() < 1.0e-9);
    }

    #[test]
    fn effective_airspeed_is_floored() {
        let wind = WindSample::from_meteorological(0.0, 0.0, 0.0, 30.0, 180.0);
        let components = decompose(&wind, 0.0, 5.0);
        assert_eq!(components.effective_airspeed_ms, MIN_EFFECTIVE_AIRSPEED_MS);
    }
}
