use uav_energy_calculator::core::atmosphere::air_density;
use uav_energy_calculator::core::constants::{EARTH_RADIUS_M, SEA_LEVEL_AIR_DENSITY};
use uav_energy_calculator::core::geodesy::{GeoPoint, bearing, distance_3d, horizontal_distance};

#[test]
fn one_degree_of_latitude_matches_the_great_circle() {
    let south = GeoPoint::new(52.0, 13.4, 0.0);
    let north = GeoPoint::new(53.0, 13.4, 0.0);
    let expected = EARTH_RADIUS_M * 1.0_f64.to_radians();
    let distance = horizontal_distance(&south, &north);
    assert!((distance - expected).abs() < 1.0e-6 * expected);
    assert!((bearing(&south, &north)).abs() < 1.0e-9);
    assert!((bearing(&north, &south) - 180.0).abs() < 1.0e-9);
}

#[test]
fn slant_distance_includes_the_altitude_change() {
    let low = GeoPoint::new(52.5, 13.4, 100.0);
    let high = GeoPoint::new(52.5, 13.4, 400.0);
    assert_eq!(horizontal_distance(&low, &high), 0.0);
    assert!((distance_3d(&low, &high) - 300.0).abs() < 1.0e-9);
}

#[test]
fn air_density_thins_with_altitude_and_stays_floored() {
    assert!((air_density(0.0) - SEA_LEVEL_AIR_DENSITY).abs() < 1.0e-12);
    let d100 = air_density(100.0);
    let d3000 = air_density(3000.0);
    assert!(d100 < SEA_LEVEL_AIR_DENSITY);
    assert!(d3000 < d100);
    // The clamps keep extreme altitudes physical instead of NaN.
    let extreme = air_density(80_000.0);
    assert!(extreme > 0.0 && extreme.is_finite());
}
