use serde::{Deserialize, Serialize};

/// A (longitude, latitude) pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

/// One raw, disjoint piece of a line's geometry as returned by the Overpass
/// query. Has at least 2 points. Orientation is not guaranteed to match the
/// line's overall direction.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub id: i64,
    pub coordinates: Vec<Coordinate>,
}

/// A named stop location to be placed onto the merged path.
#[derive(Debug, Clone)]
pub struct Station {
    pub id: i64,
    pub name: String,
    pub coordinate: Coordinate,
}

/// Display name and colour of a line, independent of its geometry.
#[derive(Debug, Clone)]
pub struct LineMetadata {
    pub name: String,
    pub colour: String,
}

impl Default for LineMetadata {
    fn default() -> Self {
        LineMetadata {
            name: "unknown line".to_string(),
            colour: "#000000".to_string(),
        }
    }
}

/// One element of the annotated path.
///
/// The field names are the on-disk contract with downstream renderers and
/// must stay stable.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PathPoint {
    pub lat: f64,
    pub lon: f64,
    pub is_station: bool,
    pub station_name: Option<String>,
}

impl PathPoint {
    pub fn from_coordinate(coordinate: Coordinate) -> Self {
        PathPoint {
            lat: coordinate.lat,
            lon: coordinate.lon,
            is_station: false,
            station_name: None,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            lon: self.lon,
            lat: self.lat,
        }
    }
}

/// The persisted per-line artifact, written to `metro_line_<relation_id>.json`.
#[derive(Debug, Deserialize, Serialize)]
pub struct LineArtifact {
    pub relation_id: i64,
    pub name: String,
    pub colour: String,
    pub total_points: usize,
    pub station_count: usize,
    pub path_points: Vec<PathPoint>,
}

impl LineArtifact {
    pub fn new(relation_id: i64, metadata: LineMetadata, path_points: Vec<PathPoint>) -> Self {
        LineArtifact {
            relation_id,
            name: metadata.name,
            colour: metadata.colour,
            total_points: path_points.len(),
            station_count: path_points.iter().filter(|p| p.is_station).count(),
            path_points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_counts_stations() {
        let path_points = vec![
            PathPoint {
                lat: 30.0,
                lon: 120.0,
                is_station: false,
                station_name: None,
            },
            PathPoint {
                lat: 30.1,
                lon: 120.0,
                is_station: true,
                station_name: Some("example stop".to_string()),
            },
        ];

        let artifact = LineArtifact::new(1, LineMetadata::default(), path_points);

        assert_eq!(artifact.total_points, 2);
        assert_eq!(artifact.station_count, 1);
        assert_eq!(artifact.name, "unknown line");
        assert_eq!(artifact.colour, "#000000");
    }

    #[test]
    fn artifact_json_shape_round_trips() -> Result<(), anyhow::Error> {
        let artifact = LineArtifact::new(
            4627561,
            LineMetadata {
                name: "line 1".to_string(),
                colour: "#ff0000".to_string(),
            },
            vec![PathPoint {
                lat: 30.0,
                lon: 120.0,
                is_station: true,
                station_name: Some("example stop".to_string()),
            }],
        );

        let json = serde_json::to_string(&artifact)?;

        // These names are read by downstream plotting tools.
        assert!(json.contains("\"relation_id\""));
        assert!(json.contains("\"colour\""));
        assert!(json.contains("\"total_points\""));
        assert!(json.contains("\"station_count\""));
        assert!(json.contains("\"path_points\""));
        assert!(json.contains("\"is_station\""));
        assert!(json.contains("\"station_name\""));

        let read_back: LineArtifact = serde_json::from_str(&json)?;
        assert_eq!(read_back.path_points, artifact.path_points);
        assert_eq!(read_back.relation_id, artifact.relation_id);

        Ok(())
    }
}
