use crate::{
    core::{config::TileProvider, geo::TileCoord, viewport::Viewport},
    layers::base::{Layer, LayerProperties, LayerType},
};
use serde::{Deserialize, Serialize};

/// A raster basemap provider
pub trait TileSource: Send + Sync {
    /// Leaflet-style template with `{s}`, `{z}`, `{x}`, `{y}` and optionally `{r}`
    fn url_template(&self) -> &str;

    /// Credit line the provider's terms require next to the map
    fn attribution(&self) -> &str;

    fn subdomains(&self) -> &[&'static str];

    fn max_zoom(&self) -> u8 {
        crate::core::constants::MAX_TILE_ZOOM
    }

    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String {
        let subdomains = self.subdomains();
        let sub = if subdomains.is_empty() {
            ""
        } else {
            subdomains[((coord.x + coord.y) % subdomains.len() as u32) as usize]
        };

        self.url_template()
            .replace("{s}", sub)
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
            .replace("{r}", "")
    }
}

/// CARTO Voyager raster tiles
#[derive(Debug, Clone, Default)]
pub struct CartoVoyagerSource;

impl TileSource for CartoVoyagerSource {
    fn url_template(&self) -> &str {
        "https://{s}.basemaps.cartocdn.com/rastertiles/voyager/{z}/{x}/{y}{r}.png"
    }

    fn attribution(&self) -> &str {
        "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>"
    }

    fn subdomains(&self) -> &[&'static str] {
        &["a", "b", "c", "d"]
    }

    fn max_zoom(&self) -> u8 {
        20
    }
}

/// The default OpenStreetMap tile server
#[derive(Debug, Clone, Default)]
pub struct OpenStreetMapSource;

impl TileSource for OpenStreetMapSource {
    fn url_template(&self) -> &str {
        "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png"
    }

    fn attribution(&self) -> &str {
        "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
    }

    fn subdomains(&self) -> &[&'static str] {
        &["a", "b", "c"]
    }
}

impl TileProvider {
    pub fn source(&self) -> Box<dyn TileSource> {
        match self {
            TileProvider::CartoVoyager => Box::new(CartoVoyagerSource),
            TileProvider::OpenStreetMap => Box::new(OpenStreetMapSource),
        }
    }
}

/// One basemap tile the scene needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRef {
    pub coord: TileCoord,
    pub url: String,
}

/// Basemap layer description: what a client needs to fetch and credit the tiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayer {
    pub properties: LayerProperties,
    pub url_template: String,
    pub subdomains: Vec<String>,
    pub attribution: String,
    pub max_zoom: u8,
    /// Tiles covering the viewport, empty unless requested
    pub tiles: Vec<TileRef>,
}

impl TileLayer {
    pub fn new(source: &dyn TileSource) -> Self {
        let mut properties =
            LayerProperties::new("basemap".to_string(), "Basemap".to_string(), LayerType::Tile);
        properties.z_index = -1;

        Self {
            properties,
            url_template: source.url_template().to_string(),
            subdomains: source.subdomains().iter().map(|s| s.to_string()).collect(),
            attribution: source.attribution().to_string(),
            max_zoom: source.max_zoom(),
            tiles: Vec::new(),
        }
    }

    /// Lists the tiles covering `viewport`
    pub fn with_visible_tiles(mut self, source: &dyn TileSource, viewport: &Viewport) -> Self {
        self.tiles = viewport
            .visible_tiles()
            .into_iter()
            .filter(|coord| coord.z <= source.max_zoom())
            .map(|coord| TileRef {
                coord,
                url: source.url(coord),
            })
            .collect();
        self
    }
}

impl Layer for TileLayer {
    fn properties(&self) -> &LayerProperties {
        &self.properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::{LatLng, Point};

    #[test]
    fn test_carto_url() {
        let source = CartoVoyagerSource;
        let url = source.url(TileCoord::new(1, 2, 3));

        assert_eq!(url, "https://d.basemaps.cartocdn.com/rastertiles/voyager/3/1/2.png");
        assert!(source.attribution().contains("CARTO"));
        assert!(source.attribution().contains("OpenStreetMap"));
    }

    #[test]
    fn test_osm_url_rotates_subdomains() {
        let source = OpenStreetMapSource;
        assert_eq!(
            source.url(TileCoord::new(0, 0, 1)),
            "https://a.tile.openstreetmap.org/1/0/0.png"
        );
        assert_eq!(
            source.url(TileCoord::new(1, 0, 1)),
            "https://b.tile.openstreetmap.org/1/1/0.png"
        );
    }

    #[test]
    fn test_tile_layer_lists_visible_tiles() {
        let source = TileProvider::CartoVoyager.source();
        let viewport = Viewport::new(LatLng::new(31.6295, -7.9811), 14.0, Point::new(800.0, 500.0));

        let bare = TileLayer::new(source.as_ref());
        assert!(bare.tiles.is_empty());
        assert_eq!(bare.subdomains, vec!["a", "b", "c", "d"]);
        assert_eq!(bare.layer_type(), LayerType::Tile);

        let layer = bare.with_visible_tiles(source.as_ref(), &viewport);
        assert!(!layer.tiles.is_empty());
        assert!(layer
            .tiles
            .iter()
            .all(|t| t.coord.z == 14 && t.url.ends_with(".png") && !t.url.contains('{')));
    }
}
