//! Core constants, geodesy utilities, and the clamped atmosphere model shared
//! across the UAV energy calculator workspace.

/// Physical and numeric constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Gravitational acceleration at the Earth's surface (m/s²).
    pub const GRAVITY: f64 = 9.81;
    /// Air density at sea level under standard conditions (kg/m³).
    pub const SEA_LEVEL_AIR_DENSITY: f64 = 1.225;
    /// Standard sea-level temperature (K).
    pub const SEA_LEVEL_TEMPERATURE_K: f64 = 288.15;
    /// Tropospheric temperature lapse rate (K per metre of altitude).
    pub const TEMPERATURE_LAPSE_K_PER_M: f64 = 0.0065;
    /// Exponent of the simplified barometric pressure formula.
    pub const BAROMETRIC_EXPONENT: f64 = 5.255;
    /// Temperature floor keeping the barometric formula finite (K).
    pub const MIN_TEMPERATURE_K: f64 = 200.0;
    /// Pressure-ratio floor keeping the returned density strictly positive.
    pub const MIN_PRESSURE_RATIO: f64 = 0.01;
    /// Mean Earth radius used by the haversine formula (m).
    pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
    /// Mass-proportional electrical power substituted when a numeric guard
    /// trips inside a power model (W per kg of vehicle mass).
    pub const GUARD_FALLBACK_W_PER_KG: f64 = 15.0;
}

/// Great-circle and 3-D distance helpers over WGS84 waypoints.
pub mod geodesy {
    use super::constants::EARTH_RADIUS_M;

    /// A point on (or above) the WGS84 ellipsoid.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct GeoPoint {
        pub latitude_deg: f64,
        pub longitude_deg: f64,
        pub altitude_m: f64,
    }

    impl GeoPoint {
        pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Self {
            Self {
                latitude_deg,
                longitude_deg,
                altitude_m,
            }
        }
    }

    /// Haversine great-circle distance in metres, ignoring altitude.
    ///
    /// The squared half-chord term is clamped to `[0, 1]` so floating-point
    /// overshoot at identical or antipodal points cannot reach `asin` with an
    /// out-of-domain argument.
    pub fn horizontal_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
        let lat1 = a.latitude_deg.to_radians();
        let lat2 = b.latitude_deg.to_radians();
        let dlat = lat2 - lat1;
        let dlon = (b.longitude_deg - a.longitude_deg).to_radians();

        let half_chord = (dlat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let half_chord = half_chord.clamp(0.0, 1.0);

        2.0 * EARTH_RADIUS_M * half_chord.sqrt().asin()
    }

    /// Combined 3-D distance in metres: `sqrt(horizontal² + Δaltitude²)`.
    pub fn distance_3d(a: &GeoPoint, b: &GeoPoint) -> f64 {
        let horizontal = horizontal_distance(a, b);
        let vertical = b.altitude_m - a.altitude_m;
        (horizontal * horizontal + vertical * vertical).sqrt()
    }

    /// Initial forward azimuth from `a` to `b` in degrees, `[0, 360)`.
    ///
    /// Coincident points yield 0 (atan2 of two zeros), which is stable.
    pub fn bearing(a: &GeoPoint, b: &GeoPoint) -> f64 {
        let lat1 = a.latitude_deg.to_radians();
        let lat2 = b.latitude_deg.to_radians();
        let dlon = (b.longitude_deg - a.longitude_deg).to_radians();

        let y = dlon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

        y.atan2(x).to_degrees().rem_euclid(360.0)
    }
}

/// Altitude-dependent air density via a clamped barometric approximation.
pub mod atmosphere {
    use super::constants::{
        BAROMETRIC_EXPONENT, MIN_PRESSURE_RATIO, MIN_TEMPERATURE_K, SEA_LEVEL_AIR_DENSITY,
        SEA_LEVEL_TEMPERATURE_K, TEMPERATURE_LAPSE_K_PER_M,
    };

    /// Air density (kg/m³) at the given altitude above mean sea level.
    ///
    /// Temperature is floored at 200 K and the pressure ratio at 0.01, so the
    /// result is strictly positive and finite for any finite altitude.
    /// Unclamped variants of this formula produced non-finite intermediates
    /// at extreme inputs that corrupted downstream power calculations.
    pub fn air_density(altitude_m: f64) -> f64 {
        let temperature =
            (SEA_LEVEL_TEMPERATURE_K - TEMPERATURE_LAPSE_K_PER_M * altitude_m).max(MIN_TEMPERATURE_K);
        let pressure_ratio = (temperature / SEA_LEVEL_TEMPERATURE_K)
            .powf(BAROMETRIC_EXPONENT)
            .max(MIN_PRESSURE_RATIO);
        SEA_LEVEL_AIR_DENSITY * pressure_ratio
    }
}
