//! Data export formats

pub mod geojson;

pub use geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry};
