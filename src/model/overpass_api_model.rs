use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Deserialize, Serialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

/// One element of an `out geom` response. Nodes carry `lat`/`lon`, ways carry
/// a `geometry` point list, relations carry only tags we care about.
#[derive(Debug, Deserialize, Serialize)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    pub element_type: String,
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    #[serde(default)]
    pub geometry: Vec<OverpassGeometryPoint>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct OverpassGeometryPoint {
    pub lat: f64,
    pub lon: f64,
}
