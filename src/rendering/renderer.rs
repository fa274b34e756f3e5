use crate::{
    core::{
        config::RenderConfig,
        constants::DEFAULT_CENTER,
        geo::{LatLng, LatLngBounds, Point},
        viewport::Viewport,
    },
    layers::{
        marker::ActivityMarker,
        tile::{TileLayer, TileSource},
        vector::{LineStyle, RoutePolyline},
    },
    placement::placer::{PlacedActivity, PlacementOutcome},
    rendering::scene::{EmptyState, MapContent, MapScene, SceneOverlays, SceneState},
    ui::style::MarkerStyleTable,
};

/// Identity of a marker set: numbers and exact positions
type MarkerSignature = Vec<(usize, u64, u64)>;

/// Builds [`MapScene`]s from placement outcomes.
///
/// The renderer keeps its viewport between renders and only re-fits it when
/// the set of markers changes, so re-rendering the same day leaves the
/// user's view alone.
pub struct MapRenderer {
    config: RenderConfig,
    styles: MarkerStyleTable,
    route_style: LineStyle,
    tile_source: Box<dyn TileSource>,
    viewport: Viewport,
    last_markers: Option<MarkerSignature>,
}

impl MapRenderer {
    pub fn new(config: RenderConfig) -> Self {
        let viewport = Viewport::new(
            LatLng::from(DEFAULT_CENTER),
            config.default_zoom,
            Point::new(config.viewport_width, config.viewport_height),
        );

        Self {
            tile_source: config.tile_provider.source(),
            styles: MarkerStyleTable::default(),
            route_style: LineStyle::route(),
            viewport,
            last_markers: None,
            config,
        }
    }

    pub fn with_styles(mut self, styles: MarkerStyleTable) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_tile_source(mut self, source: Box<dyn TileSource>) -> Self {
        self.tile_source = source;
        self
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn render(&mut self, outcome: &PlacementOutcome) -> MapScene {
        if outcome.placed.is_empty() {
            self.last_markers = None;
            return MapScene {
                day: None,
                viewport: self.viewport.clone(),
                refitted: false,
                state: SceneState::Empty(EmptyState::default()),
            };
        }

        let refitted = self.refit_if_changed(&outcome.placed);

        let markers: Vec<ActivityMarker> = outcome
            .placed
            .iter()
            .map(|placed| ActivityMarker::new(placed, &self.styles))
            .collect();

        let route = RoutePolyline::new(
            markers.iter().map(|m| m.position()).collect(),
            self.route_style.clone(),
        );

        let mut basemap = TileLayer::new(self.tile_source.as_ref());
        if self.config.include_tiles {
            basemap = basemap.with_visible_tiles(self.tile_source.as_ref(), &self.viewport);
        }

        let overlays = SceneOverlays::new(markers.len(), outcome.approximate_count());

        log::debug!(
            "rendered {} markers (route: {}, refitted: {})",
            markers.len(),
            route.is_some(),
            refitted
        );

        MapScene {
            day: None,
            viewport: self.viewport.clone(),
            refitted,
            state: SceneState::Map(MapContent {
                basemap,
                markers,
                route,
                overlays,
            }),
        }
    }

    /// Fits the viewport to `placed` unless the same markers were fitted last time
    fn refit_if_changed(&mut self, placed: &[PlacedActivity]) -> bool {
        let signature: MarkerSignature = placed
            .iter()
            .map(|p| (p.sequence_number, p.lat.to_bits(), p.lng.to_bits()))
            .collect();

        if self.last_markers.as_ref() == Some(&signature) {
            return false;
        }

        let positions: Vec<LatLng> = placed.iter().map(|p| p.position()).collect();
        if let Some(bounds) = LatLngBounds::from_points(&positions) {
            self.viewport
                .fit_bounds(&bounds, self.config.fit_padding, self.config.fit_max_zoom);
        }
        self.last_markers = Some(signature);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::Activity;
    use crate::placement::placer::PlacementSource;

    fn placed(n: usize, lat: f64, lng: f64, time: &str, approximate: bool) -> PlacedActivity {
        PlacedActivity {
            activity: Activity::new(format!("Stop {}", n), format!("Place {}", n), time),
            lat,
            lng,
            sequence_number: n,
            is_approximate: approximate,
            source: if approximate {
                PlacementSource::Fallback
            } else {
                PlacementSource::Authoritative
            },
        }
    }

    fn outcome(placed: Vec<PlacedActivity>) -> PlacementOutcome {
        PlacementOutcome {
            placed,
            omitted: Vec::new(),
            center: None,
        }
    }

    #[test]
    fn test_empty_outcome_renders_empty_state() {
        let mut renderer = MapRenderer::new(RenderConfig::default());
        let scene = renderer.render(&PlacementOutcome::default());

        assert!(scene.is_empty());
        assert!(!scene.refitted);
        assert!(scene.route().is_none());
        assert_eq!(scene.viewport.center, LatLng::from(DEFAULT_CENTER));
    }

    #[test]
    fn test_single_marker_has_no_route_and_max_zoom() {
        let mut renderer = MapRenderer::new(RenderConfig::default());
        let scene = renderer.render(&outcome(vec![placed(1, 33.59, -7.61, "Morning", false)]));

        assert_eq!(scene.markers().len(), 1);
        assert!(scene.route().is_none());
        assert!(scene.refitted);
        assert_eq!(scene.viewport.zoom, 14.0);
        assert_eq!(scene.overlays().unwrap().location_badge, "1 location");
    }

    #[test]
    fn test_full_scene() {
        let mut renderer = MapRenderer::new(RenderConfig::default());
        let scene = renderer.render(&outcome(vec![
            placed(1, 33.5951, -7.6187, "Morning", false),
            placed(3, 33.6083, -7.6325, "Lunch", false),
            placed(4, 33.5731, -7.5898, "Evening", true),
        ]));

        let numbers: Vec<usize> = scene.markers().iter().map(|m| m.number).collect();
        assert_eq!(numbers, vec![1, 3, 4]);

        let route = scene.route().unwrap();
        assert_eq!(route.points.len(), 3);
        assert_eq!(route.points[1], scene.markers()[1].position());
        assert!(route.length_meters > 0.0);

        let overlays = scene.overlays().unwrap();
        assert_eq!(overlays.location_badge, "3 locations");
        assert!(overlays.approximate_notice.is_some());

        let visible = scene.viewport.bounds();
        assert!(scene.markers().iter().all(|m| visible.contains(&m.position())));
        assert!(scene.viewport.zoom <= 14.0);

        let content = scene.content().unwrap();
        assert!(!content.basemap.tiles.is_empty());
        assert!(content.basemap.attribution.contains("CARTO"));

        // Basemap, route and three markers, basemap first
        let layers = scene.layers();
        assert_eq!(layers.len(), 5);
        assert_eq!(layers[0].id(), "basemap");
    }

    #[test]
    fn test_refit_only_when_markers_change() {
        let mut renderer = MapRenderer::new(RenderConfig::default());
        let day_one = outcome(vec![
            placed(1, 48.8584, 2.2945, "Morning", false),
            placed(2, 48.8606, 2.3376, "Afternoon", false),
        ]);

        assert!(renderer.render(&day_one).refitted);
        assert!(!renderer.render(&day_one).refitted);

        let day_two = outcome(vec![placed(1, 45.764, 4.8357, "Morning", false)]);
        let scene = renderer.render(&day_two);
        assert!(scene.refitted);
        assert!(scene.viewport.bounds().contains(&LatLng::new(45.764, 4.8357)));

        // Going through the empty state forces a refit of the same markers
        renderer.render(&PlacementOutcome::default());
        assert!(renderer.render(&day_two).refitted);
    }

    #[test]
    fn test_tiles_can_be_skipped() {
        let config = RenderConfig {
            include_tiles: false,
            ..RenderConfig::default()
        };
        let mut renderer = MapRenderer::new(config);
        let scene = renderer.render(&outcome(vec![placed(1, 35.0, 135.0, "Night", false)]));

        assert!(scene.content().unwrap().basemap.tiles.is_empty());
    }
}
