use crate::{
    core::viewport::Viewport,
    layers::{
        base::Layer, marker::ActivityMarker, tile::TileLayer, vector::RoutePolyline,
    },
};
use serde::{Deserialize, Serialize};

/// Placeholder shown instead of a map when there is nothing to plot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyState {
    pub title: String,
    pub message: String,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            title: "No location data available".to_string(),
            message: "Locations will appear when coordinates are available".to_string(),
        }
    }
}

/// Text overlays drawn on top of the map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneOverlays {
    /// Marker count badge, e.g. "5 locations"
    pub location_badge: String,
    /// Present when some markers sit at synthetic positions
    pub approximate_notice: Option<String>,
}

impl SceneOverlays {
    pub fn new(marker_count: usize, approximate_count: usize) -> Self {
        let locations = |n: usize| if n == 1 { "location" } else { "locations" };

        Self {
            location_badge: format!("{} {}", marker_count, locations(marker_count)),
            approximate_notice: (approximate_count > 0).then(|| {
                format!(
                    "{} {} shown at approximate position",
                    approximate_count,
                    locations(approximate_count)
                )
            }),
        }
    }
}

/// Everything drawn when at least one activity was placed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapContent {
    pub basemap: TileLayer,
    pub markers: Vec<ActivityMarker>,
    /// Present when there are two or more markers
    pub route: Option<RoutePolyline>,
    pub overlays: SceneOverlays,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SceneState {
    Empty(EmptyState),
    Map(MapContent),
}

/// A headless, serializable description of one rendered map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapScene {
    /// Itinerary day the scene was built for, when known
    pub day: Option<u32>,
    pub viewport: Viewport,
    /// Whether this render moved the viewport to fit a new marker set
    pub refitted: bool,
    #[serde(flatten)]
    pub state: SceneState,
}

impl MapScene {
    pub fn is_empty(&self) -> bool {
        matches!(self.state, SceneState::Empty(_))
    }

    pub fn content(&self) -> Option<&MapContent> {
        match &self.state {
            SceneState::Map(content) => Some(content),
            SceneState::Empty(_) => None,
        }
    }

    pub fn markers(&self) -> &[ActivityMarker] {
        self.content()
            .map(|c| c.markers.as_slice())
            .unwrap_or(&[])
    }

    pub fn route(&self) -> Option<&RoutePolyline> {
        self.content().and_then(|c| c.route.as_ref())
    }

    pub fn overlays(&self) -> Option<&SceneOverlays> {
        self.content().map(|c| &c.overlays)
    }

    /// Visible layers in drawing order (lowest z-index first)
    pub fn layers(&self) -> Vec<&dyn Layer> {
        let Some(content) = self.content() else {
            return Vec::new();
        };

        let mut layers: Vec<&dyn Layer> = Vec::with_capacity(content.markers.len() + 2);
        layers.push(&content.basemap);
        if let Some(route) = &content.route {
            layers.push(route);
        }
        layers.extend(content.markers.iter().map(|m| m as &dyn Layer));
        layers.retain(|l| l.is_visible());
        layers.sort_by_key(|l| l.z_index());
        layers
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_texts() {
        let overlays = SceneOverlays::new(5, 2);
        assert_eq!(overlays.location_badge, "5 locations");
        assert_eq!(
            overlays.approximate_notice.as_deref(),
            Some("2 locations shown at approximate position")
        );

        let single = SceneOverlays::new(1, 1);
        assert_eq!(single.location_badge, "1 location");
        assert_eq!(
            single.approximate_notice.as_deref(),
            Some("1 location shown at approximate position")
        );

        assert!(SceneOverlays::new(3, 0).approximate_notice.is_none());
    }

    #[test]
    fn test_empty_scene_serializes_state() {
        let scene = MapScene {
            day: Some(2),
            viewport: Viewport::default(),
            refitted: false,
            state: SceneState::Empty(EmptyState::default()),
        };

        assert!(scene.is_empty());
        assert!(scene.markers().is_empty());
        assert!(scene.layers().is_empty());

        let json: serde_json::Value = serde_json::from_str(&scene.to_json().unwrap()).unwrap();
        assert_eq!(json["state"], "empty");
        assert_eq!(json["title"], "No location data available");
        assert_eq!(json["day"], 2);
    }
}
