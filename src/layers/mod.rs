pub mod base;
pub mod marker;
pub mod tile;
pub mod vector;

pub use base::{Layer, LayerProperties, LayerType};
pub use marker::{ActivityMarker, MarkerIcon};
pub use tile::{CartoVoyagerSource, OpenStreetMapSource, TileLayer, TileRef, TileSource};
pub use vector::{LineStyle, RoutePolyline, SerializableColor};
