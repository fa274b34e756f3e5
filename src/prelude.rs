//! Prelude module for common tripmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use tripmap::prelude::*;`

pub use crate::core::{
    config::{GeocoderConfig, PipelineOptions, PipelineProfile, PlacementConfig, RenderConfig},
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    viewport::Viewport,
};

pub use crate::geocoding::{
    cache::GeocodeCache, nominatim::NominatimBackend, resolver::GeocodeResolver, GeoBackend,
    GeocodeResult,
};

pub use crate::itinerary::{Activity, DayPlan, Itinerary};

pub use crate::placement::{
    offset::OffsetScheme,
    placer::{ActivityPlacer, PlacedActivity, PlacementOutcome, PlacementSource},
};

pub use crate::layers::{
    base::Layer, marker::ActivityMarker, tile::TileSource, vector::RoutePolyline,
};

pub use crate::ui::style::{MarkerStyle, MarkerStyleTable, StylePredicate, TimeIcon};

pub use crate::rendering::{MapRenderer, MapScene, MapView, SceneState, ViewState};

pub use crate::data::geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry};

pub use crate::{Error as MapError, Result};

pub use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
