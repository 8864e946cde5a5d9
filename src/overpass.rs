//! Responsible for fetching and parsing line relations from the Overpass API
use crate::model::line_model::{Coordinate, Fragment, LineMetadata, Station};
use crate::model::overpass_api_model::OverpassResponse;
use itertools::Itertools;
use std::backtrace::Backtrace;
use std::collections::HashMap;
use tracing::{Instrument, info, info_span};

const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

fn overpass_url() -> String {
    dotenvy::var("OVERPASS_URL").unwrap_or_else(|_| DEFAULT_OVERPASS_URL.to_string())
}

/// Fetches the full relation (member ways with geometry, member nodes, tags)
/// for one line.
#[tracing::instrument(err)]
pub async fn fetch_line_data(relation_id: i64) -> Result<OverpassResponse, FetchLineError> {
    let query = format!(
        "[out:json][timeout:25];\n(\n  relation({relation_id});\n);\n(._;>;);\nout geom;"
    );

    let client = reqwest::Client::new();
    let response = client
        .post(overpass_url())
        .body(query)
        .send()
        .instrument(info_span!("Fetching relation"))
        .await?
        .error_for_status()?;

    let body = response
        .text()
        .instrument(info_span!("Reading body of response"))
        .await?;

    let data: OverpassResponse =
        serde_json::from_str(&body).map_err(|e| FetchLineError::ParsingError {
            source: e,
            backtrace: Backtrace::capture(),
            body,
        })?;

    info!(
        "got {} elements for relation {}",
        data.elements.len(),
        relation_id
    );

    Ok(data)
}

/// Line name and colour from the first tagged relation element. The name
/// falls back through `name`, `name:zh`, `name:en`.
pub fn extract_line_info(data: &OverpassResponse) -> LineMetadata {
    let Some(relation) = data
        .elements
        .iter()
        .find(|e| e.element_type == "relation" && !e.tags.is_empty())
    else {
        return LineMetadata::default();
    };

    let metadata = LineMetadata {
        name: display_name(&relation.tags).unwrap_or_else(|| "unknown line".to_string()),
        colour: relation
            .tags
            .get("colour")
            .cloned()
            .unwrap_or_else(|| "#000000".to_string()),
    };

    info!("line {}, colour {}", metadata.name, metadata.colour);

    metadata
}

/// Stations (nodes tagged `railway=stop` or `railway=station`) and way
/// fragments from the response, in response order.
pub fn extract_line_geometry(data: &OverpassResponse) -> (Vec<Station>, Vec<Fragment>) {
    let mut stations = vec![];
    let mut fragments = vec![];

    for element in &data.elements {
        match element.element_type.as_str() {
            "node" => {
                let railway = element.tags.get("railway").map(String::as_str);
                if !matches!(railway, Some("stop") | Some("station")) {
                    continue;
                }
                let (Some(lat), Some(lon)) = (element.lat, element.lon) else {
                    continue;
                };

                let name = display_name(&element.tags)
                    .unwrap_or_else(|| format!("stop {}", element.id));
                stations.push(Station {
                    id: element.id,
                    name,
                    coordinate: Coordinate { lon, lat },
                });
            }
            "way" => {
                if element.geometry.is_empty() {
                    continue;
                }
                let coordinates = element
                    .geometry
                    .iter()
                    .map(|p| Coordinate {
                        lon: p.lon,
                        lat: p.lat,
                    })
                    .collect_vec();
                fragments.push(Fragment {
                    id: element.id,
                    coordinates,
                });
            }
            _ => {}
        }
    }

    info!(
        "extracted {} stations and {} fragments",
        stations.len(),
        fragments.len()
    );

    (stations, fragments)
}

fn display_name(tags: &HashMap<String, String>) -> Option<String> {
    tags.get("name")
        .or_else(|| tags.get("name:zh"))
        .or_else(|| tags.get("name:en"))
        .cloned()
}

#[derive(thiserror::Error, Debug)]
pub enum FetchLineError {
    #[error("error fetching the relation \n{} \n{}", source, backtrace)]
    HttpRequestError {
        #[from]
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    #[error("error parsing the relation \n{} \n{} \n {}", source, body, backtrace)]
    ParsingError {
        source: serde_json::Error,
        backtrace: Backtrace,
        body: String,
    },
}
