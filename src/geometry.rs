pub mod merge;
pub mod segment;
pub mod stations;

use crate::model::line_model::Coordinate;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Two fragment endpoints closer than this are considered physically joined.
pub const CONNECTION_THRESHOLD_M: f64 = 100.0;
/// A station closer than this to an existing path point is merged into it.
pub const SNAP_THRESHOLD_M: f64 = 50.0;
/// A station at this distance or more from every path point is discarded.
pub const MATCH_THRESHOLD_M: f64 = 500.0;

/// Great-circle distance between two points in meters (haversine).
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lon: f64, lat: f64) -> Coordinate {
        Coordinate { lon, lat }
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = coord(120.21, 30.25);
        assert_eq!(haversine_distance(p, p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = coord(120.21, 30.25);
        let b = coord(120.17, 30.28);
        let forward = haversine_distance(a, b);
        let backward = haversine_distance(b, a);
        assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude() {
        // 1 degree of latitude is about 111,194 m on a 6,371 km sphere.
        let d = haversine_distance(coord(0.0, 0.0), coord(0.0, 1.0));
        assert!((d - 111_194.0).abs() < 111_194.0 * 0.01, "got {d}");
    }
}
