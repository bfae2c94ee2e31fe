//! Great-circle distance math

use super::models::Coordinate;

/// Earth's mean radius in meters
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two coordinates, in meters.
///
/// `a = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlong/2)`, then
/// `d = 2·R·atan2(√a, √(1−a))`. Identical coordinates yield exactly 0.
pub fn haversine_meters(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_long = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_long / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, long: f64) -> Coordinate {
        Coordinate::new(lat, long).unwrap()
    }

    #[test]
    fn test_distance_same_point_is_zero() {
        let p = coord(55.6761, 12.5683);
        assert_eq!(haversine_meters(p, p), 0.0);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = coord(55.6761, 12.5683);
        let b = coord(55.6800, 12.5683);
        assert_eq!(haversine_meters(a, b), haversine_meters(b, a));
    }

    #[test]
    fn test_known_distance_copenhagen() {
        // ~0.0039 degrees of latitude, longitude fixed: ~433 meters
        let a = coord(55.6761, 12.5683);
        let b = coord(55.6800, 12.5683);

        let distance = haversine_meters(a, b);
        assert!(distance > 400.0);
        assert!(distance < 500.0);
    }

    #[test]
    fn test_antipodal_points() {
        // Half the Earth's circumference, within a meter
        let a = coord(0.0, 0.0);
        let b = coord(0.0, 180.0);

        let distance = haversine_meters(a, b);
        let half_circumference = std::f64::consts::PI * 6_371_000.0;
        assert!((distance - half_circumference).abs() < 1.0);
    }
}
