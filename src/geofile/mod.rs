pub mod feature;
pub mod geojson;
