//! Responsible for placing named stops onto the merged chain
use crate::geometry::{MATCH_THRESHOLD_M, SNAP_THRESHOLD_M, haversine_distance};
use crate::model::line_model::{Coordinate, PathPoint, Station};
use tracing::{info, warn};

/// The annotated path plus the names of stations that matched nothing.
#[derive(Debug)]
pub struct InsertOutcome {
    pub path_points: Vec<PathPoint>,
    pub unmatched: Vec<String>,
}

/// Maps each station onto the chain, in input order.
///
/// Under 50 m the nearest existing point is marked as the station; between
/// 50 m and 500 m a new point is inserted next to it; at 500 m or more the
/// station is dropped and reported. Each nearest-point search runs over the
/// current point list, so earlier insertions shift what later stations see.
pub fn insert_stations(coordinates: &[Coordinate], stations: &[Station]) -> InsertOutcome {
    if coordinates.is_empty() || stations.is_empty() {
        return InsertOutcome {
            path_points: vec![],
            unmatched: vec![],
        };
    }

    info!("inserting {} stations into the path", stations.len());

    let mut path_points: Vec<PathPoint> = coordinates
        .iter()
        .copied()
        .map(PathPoint::from_coordinate)
        .collect();
    let mut unmatched = vec![];

    for station in stations {
        let (nearest, min_distance) = nearest_point(&path_points, station.coordinate);

        if min_distance >= MATCH_THRESHOLD_M {
            warn!(
                "station {} is {:.1}m from the path, skipping it",
                station.name, min_distance
            );
            unmatched.push(station.name.clone());
            continue;
        }

        if min_distance < SNAP_THRESHOLD_M {
            path_points[nearest].is_station = true;
            path_points[nearest].station_name = Some(station.name.clone());
            info!(
                "station {} snapped onto point {} ({:.1}m)",
                station.name, nearest, min_distance
            );
            continue;
        }

        let insert_index = if nearest == 0 {
            0
        } else if nearest == path_points.len() - 1 {
            path_points.len()
        } else {
            let before = haversine_distance(station.coordinate, path_points[nearest - 1].coordinate());
            let after = haversine_distance(station.coordinate, path_points[nearest + 1].coordinate());
            if before < after { nearest } else { nearest + 1 }
        };

        path_points.insert(
            insert_index,
            PathPoint {
                lat: station.coordinate.lat,
                lon: station.coordinate.lon,
                is_station: true,
                station_name: Some(station.name.clone()),
            },
        );
        info!(
            "station {} inserted at index {} ({:.1}m)",
            station.name, insert_index, min_distance
        );
    }

    info!("path has {} points after insertion", path_points.len());

    InsertOutcome {
        path_points,
        unmatched,
    }
}

fn nearest_point(path_points: &[PathPoint], target: Coordinate) -> (usize, f64) {
    let mut best_index = 0;
    let mut min_distance = f64::INFINITY;

    for (i, point) in path_points.iter().enumerate() {
        let distance = haversine_distance(target, point.coordinate());
        if distance < min_distance {
            min_distance = distance;
            best_index = i;
        }
    }

    (best_index, min_distance)
}
