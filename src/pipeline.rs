//! Responsible for turning one relation into a persisted line artifact
use crate::dal::{artifact_path, load_line, save_line};
use crate::geometry::merge::merge_fragments;
use crate::geometry::stations::insert_stations;
use crate::model::line_model::LineArtifact;
use crate::overpass::{extract_line_geometry, extract_line_info, fetch_line_data};
use anyhow::{Context, bail};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Builds (or reuses) the artifact for one relation and returns its path.
///
/// An existing valid artifact is reused unless `force` is set. The merge and
/// station insertion themselves never fail; a relation with no usable way
/// geometry is an error at this layer since there is nothing to persist.
#[tracing::instrument(err)]
pub async fn process_line(
    relation_id: i64,
    out_dir: &Path,
    force: bool,
) -> Result<PathBuf, anyhow::Error> {
    let path = artifact_path(out_dir, relation_id);

    if !force && path.exists() {
        match load_line(&path) {
            Ok(artifact) => {
                info!(
                    "reusing {} ({} points, {} stations)",
                    artifact.name, artifact.total_points, artifact.station_count
                );
                return Ok(path);
            }
            Err(e) => warn!(
                "existing artifact {} is not usable, regenerating: {e}",
                path.display()
            ),
        }
    }

    let data = fetch_line_data(relation_id)
        .await
        .context("error fetching the relation")?;

    let metadata = extract_line_info(&data);
    let (stations, fragments) = extract_line_geometry(&data);

    if fragments.is_empty() {
        bail!("relation {relation_id} has no way geometry");
    }

    let merged = merge_fragments(&fragments);
    if merged.coordinates.is_empty() {
        bail!("relation {relation_id} produced an empty merged path");
    }

    let inserted = insert_stations(&merged.coordinates, &stations);

    let artifact = LineArtifact::new(relation_id, metadata, inserted.path_points);
    save_line(&artifact, &path).context("error saving the line artifact")?;

    Ok(path)
}
