use crate::model::line_model::LineArtifact;
use std::backtrace::Backtrace;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// On-disk location of a line's artifact inside `out_dir`.
pub fn artifact_path(out_dir: &Path, relation_id: i64) -> PathBuf {
    out_dir.join(format!("metro_line_{relation_id}.json"))
}

/// Writes the artifact as pretty-printed JSON.
#[tracing::instrument(err, skip(artifact))]
pub fn save_line(artifact: &LineArtifact, path: &Path) -> Result<(), ArtifactError> {
    let json = serde_json::to_string_pretty(artifact)?;
    fs::write(path, json)?;

    info!(
        "saved {} ({} points, {} stations) to {}",
        artifact.name,
        artifact.total_points,
        artifact.station_count,
        path.display()
    );

    Ok(())
}

/// Reads an artifact back. An artifact without path points is unusable and
/// rejected so the caller regenerates it.
#[tracing::instrument(err)]
pub fn load_line(path: &Path) -> Result<LineArtifact, ArtifactError> {
    let json = fs::read_to_string(path)?;
    let artifact: LineArtifact = serde_json::from_str(&json)?;

    if artifact.path_points.is_empty() {
        return Err(ArtifactError::EmptyArtifact {
            path: path.to_path_buf(),
        });
    }

    Ok(artifact)
}

#[derive(thiserror::Error, Debug)]
pub enum ArtifactError {
    #[error("error reading or writing the artifact file \n{} \n{}", source, backtrace)]
    Io {
        #[from]
        source: std::io::Error,
        backtrace: Backtrace,
    },

    #[error("error serializing the artifact \n{} \n{}", source, backtrace)]
    Json {
        #[from]
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    #[error("artifact {} has no path points", path.display())]
    EmptyArtifact { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::line_model::{LineMetadata, PathPoint};
    use std::env::temp_dir;

    #[test]
    fn save_and_load_round_trip() -> Result<(), anyhow::Error> {
        let artifact = LineArtifact::new(
            424242,
            LineMetadata {
                name: "line 1".to_string(),
                colour: "#e4002b".to_string(),
            },
            vec![PathPoint {
                lat: 30.25,
                lon: 120.21,
                is_station: true,
                station_name: Some("example stop".to_string()),
            }],
        );

        let dir = temp_dir();
        let path = artifact_path(&dir, artifact.relation_id);

        save_line(&artifact, &path)?;
        let read_back = load_line(&path)?;
        fs::remove_file(&path)?;

        assert_eq!(read_back.relation_id, 424242);
        assert_eq!(read_back.name, "line 1");
        assert_eq!(read_back.path_points, artifact.path_points);

        Ok(())
    }

    #[test]
    fn artifact_without_points_is_rejected() -> Result<(), anyhow::Error> {
        let artifact = LineArtifact::new(434343, LineMetadata::default(), vec![]);

        let dir = temp_dir();
        let path = artifact_path(&dir, artifact.relation_id);

        save_line(&artifact, &path)?;
        let result = load_line(&path);
        fs::remove_file(&path)?;

        assert!(matches!(result, Err(ArtifactError::EmptyArtifact { .. })));

        Ok(())
    }
}
