//! Responsible for station-to-station sub-range queries over a stitched path
use crate::model::line_model::PathPoint;
use tracing::{info, warn};

/// Index of the first station point carrying the given name.
pub fn find_station_index(path_points: &[PathPoint], station_name: &str) -> Option<usize> {
    path_points
        .iter()
        .position(|p| p.is_station && p.station_name.as_deref() == Some(station_name))
}

/// The inclusive sub-range between two named stations.
///
/// Direction-agnostic: when the names are given against path order the
/// indices are swapped, so the result always runs in path direction. A
/// missing station name yields an empty result.
pub fn extract_segment(
    path_points: &[PathPoint],
    start_station: &str,
    end_station: &str,
) -> Vec<PathPoint> {
    let Some(mut start_index) = find_station_index(path_points, start_station) else {
        warn!("start station {start_station} not found on the path");
        return vec![];
    };

    let Some(mut end_index) = find_station_index(path_points, end_station) else {
        warn!("end station {end_station} not found on the path");
        return vec![];
    };

    if start_index > end_index {
        std::mem::swap(&mut start_index, &mut end_index);
        info!("swapped query order: {end_station} -> {start_station}");
    }

    let segment = path_points[start_index..=end_index].to_vec();
    info!(
        "segment {start_station} -> {end_station} has {} points",
        segment.len()
    );

    segment
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, station_name: Option<&str>) -> PathPoint {
        PathPoint {
            lat,
            lon: 0.0,
            is_station: station_name.is_some(),
            station_name: station_name.map(str::to_string),
        }
    }

    fn annotated_path() -> Vec<PathPoint> {
        vec![
            point(0.0, None),
            point(1.0, Some("alpha")),
            point(2.0, None),
            point(3.0, Some("beta")),
            point(4.0, None),
        ]
    }

    #[test]
    fn extracts_the_inclusive_range_between_two_stations() {
        let path = annotated_path();
        let segment = extract_segment(&path, "alpha", "beta");

        assert_eq!(segment, path[1..=3].to_vec());
    }

    #[test]
    fn reversed_station_order_returns_the_same_range() {
        let path = annotated_path();

        let forward = extract_segment(&path, "alpha", "beta");
        let backward = extract_segment(&path, "beta", "alpha");

        // Same points in the same (path) direction, not reversed.
        assert_eq!(forward, backward);
    }

    #[test]
    fn unknown_station_yields_an_empty_segment() {
        let path = annotated_path();

        assert!(extract_segment(&path, "alpha", "gamma").is_empty());
        assert!(extract_segment(&path, "gamma", "beta").is_empty());
    }

    #[test]
    fn unmarked_points_are_never_treated_as_stations() {
        let mut path = annotated_path();
        // A name on a point that lost its station flag must not match.
        path[2].station_name = Some("ghost".to_string());

        assert!(extract_segment(&path, "alpha", "ghost").is_empty());
    }
}
