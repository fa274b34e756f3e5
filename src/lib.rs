//! # tripmap
//!
//! Turns one day of a generated travel itinerary into a renderable map.
//!
//! The pipeline has three stages: activities lacking coordinates are geocoded
//! through a [`GeoBackend`] with a session [`GeocodeCache`], every activity is
//! placed on the map by the [`ActivityPlacer`] (falling back to synthetic
//! positions near the destination center), and the [`MapRenderer`] builds a
//! headless [`MapScene`] with a basemap, numbered markers, a route line and a
//! viewport fitted to the markers. [`MapView`] ties the stages together and
//! discards results from superseded runs.

pub mod core;
pub mod data;
pub mod geocoding;
pub mod itinerary;
pub mod layers;
pub mod placement;
pub mod prelude;
pub mod rendering;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{PipelineOptions, PipelineProfile},
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    viewport::Viewport,
};

pub use geocoding::{
    cache::GeocodeCache, nominatim::NominatimBackend, resolver::GeocodeResolver, GeoBackend,
    GeocodeResult,
};

pub use itinerary::{Activity, DayPlan, Itinerary};

pub use placement::{
    offset::OffsetScheme,
    placer::{ActivityPlacer, PlacedActivity, PlacementOutcome, PlacementSource},
};

pub use rendering::{
    renderer::MapRenderer,
    scene::{MapScene, SceneState},
    view::{MapView, ViewState},
};

pub use data::geojson::GeoJson;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Error type alias for convenience
pub type Error = MapError;
