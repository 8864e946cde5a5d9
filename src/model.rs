pub mod line_model;
pub mod overpass_api_model;
