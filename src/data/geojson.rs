use crate::core::geo::{LatLng, LatLngBounds};
use crate::rendering::scene::MapScene;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// GeoJSON geometry types used by itinerary maps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point { coordinates: [f64; 2] },
    LineString { coordinates: Vec<[f64; 2]> },
}

impl GeoJsonGeometry {
    pub fn point(position: LatLng) -> Self {
        GeoJsonGeometry::Point {
            coordinates: [position.lng, position.lat],
        }
    }

    pub fn line(positions: &[LatLng]) -> Self {
        GeoJsonGeometry::LineString {
            coordinates: positions.iter().map(|p| [p.lng, p.lat]).collect(),
        }
    }

    /// Converts GeoJSON `[lng, lat]` pairs back to coordinates
    pub fn to_lat_lng_points(&self) -> Vec<LatLng> {
        match self {
            GeoJsonGeometry::Point { coordinates } => {
                vec![LatLng::new(coordinates[1], coordinates[0])]
            }
            GeoJsonGeometry::LineString { coordinates } => coordinates
                .iter()
                .map(|c| LatLng::new(c[1], c[0]))
                .collect(),
        }
    }
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(rename = "type", default = "feature_type")]
    pub feature_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

fn feature_type() -> String {
    "Feature".to_string()
}

impl GeoJsonFeature {
    pub fn new(id: impl Into<Value>, geometry: GeoJsonGeometry, properties: Map<String, Value>) -> Self {
        Self {
            feature_type: feature_type(),
            id: Some(id.into()),
            geometry: Some(geometry),
            properties: Some(properties),
        }
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref().and_then(|p| p.get(key))
    }
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    FeatureCollection { features: Vec<GeoJsonFeature> },
}

impl GeoJson {
    pub fn from_str(geojson_str: &str) -> crate::Result<Self> {
        serde_json::from_str(geojson_str)
            .map_err(|e| crate::Error::ParseError(format!("Invalid GeoJSON: {}", e)).into())
    }

    /// Exports a scene's markers as points and its route as a line string,
    /// styled with simplestyle properties (`marker-color`, `stroke`, ...).
    ///
    /// An empty scene exports an empty collection.
    pub fn from_scene(scene: &MapScene) -> Self {
        let mut features: Vec<GeoJsonFeature> = scene
            .markers()
            .iter()
            .map(|marker| {
                let popup = &marker.popup;
                let properties = json!({
                    "number": marker.number,
                    "description": popup.description,
                    "location": popup.location,
                    "tooltip": marker.tooltip.text,
                    "is_approximate": marker.is_approximate,
                    "marker-color": marker.style.color.to_hex(),
                    "marker-symbol": marker.number.to_string(),
                });
                GeoJsonFeature::new(
                    marker.properties.id.clone(),
                    GeoJsonGeometry::point(marker.position),
                    into_map(properties),
                )
            })
            .collect();

        if let Some(route) = scene.route() {
            let mut properties = json!({
                "name": route.properties.name,
                "length_meters": route.length_meters,
                "stroke": route.style.color.to_hex(),
                "stroke-width": route.style.width,
                "stroke-opacity": route.style.opacity,
            });
            if let (Some(dash), Some(map)) = (route.style.dash_array(), properties.as_object_mut()) {
                map.insert("stroke-dasharray".to_string(), Value::String(dash));
            }
            features.push(GeoJsonFeature::new(
                route.properties.id.clone(),
                GeoJsonGeometry::line(&route.points),
                into_map(properties),
            ));
        }

        GeoJson::FeatureCollection { features }
    }

    pub fn features(&self) -> Vec<&GeoJsonFeature> {
        match self {
            GeoJson::FeatureCollection { features } => features.iter().collect(),
        }
    }

    /// Gets the bounding box of all features
    pub fn bounds(&self) -> Option<LatLngBounds> {
        let points: Vec<LatLng> = self
            .features()
            .into_iter()
            .filter_map(|f| f.geometry.as_ref())
            .flat_map(|g| g.to_lat_lng_points())
            .collect();
        LatLngBounds::from_points(&points)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RenderConfig;
    use crate::itinerary::Activity;
    use crate::placement::placer::{PlacedActivity, PlacementOutcome, PlacementSource};
    use crate::rendering::renderer::MapRenderer;

    fn scene(points: &[(f64, f64)]) -> MapScene {
        let placed = points
            .iter()
            .enumerate()
            .map(|(i, (lat, lng))| PlacedActivity {
                activity: Activity::new(format!("Stop {}", i + 1), "", "Afternoon"),
                lat: *lat,
                lng: *lng,
                sequence_number: i + 1,
                is_approximate: false,
                source: PlacementSource::Authoritative,
            })
            .collect();
        MapRenderer::new(RenderConfig::default()).render(&PlacementOutcome {
            placed,
            omitted: Vec::new(),
            center: None,
        })
    }

    #[test]
    fn test_geojson_parsing() {
        let geojson_str = r#"
        {
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"name": "Test Point"},
                    "geometry": {
                        "type": "Point",
                        "coordinates": [-74.0060, 40.7128]
                    }
                }
            ]
        }
        "#;

        let geojson = GeoJson::from_str(geojson_str).unwrap();
        let features = geojson.features();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].property("name"), Some(&json!("Test Point")));
        assert!(GeoJson::from_str("{\"type\": \"Topology\"}").is_err());
    }

    #[test]
    fn test_scene_export() {
        let scene = scene(&[(40.7128, -74.0060), (40.7489, -73.9857)]);
        let geojson = GeoJson::from_scene(&scene);
        let features = geojson.features();

        // Two markers and the route
        assert_eq!(features.len(), 3);
        assert_eq!(
            features[0].geometry,
            Some(GeoJsonGeometry::Point {
                coordinates: [-74.0060, 40.7128]
            })
        );
        assert_eq!(features[1].property("marker-color"), Some(&json!("#f97316")));
        assert_eq!(features[2].property("stroke-dasharray"), Some(&json!("8, 8")));

        let bounds = geojson.bounds().unwrap();
        assert_eq!(bounds.south_west.lat, 40.7128);
        assert_eq!(bounds.north_east.lat, 40.7489);

        let text = geojson.to_json().unwrap();
        assert!(text.contains("\"type\": \"Feature\""));
        assert_eq!(GeoJson::from_str(&text).unwrap(), geojson);
    }

    #[test]
    fn test_empty_scene_exports_no_features() {
        let geojson = GeoJson::from_scene(&scene(&[]));
        assert!(geojson.features().is_empty());
        assert!(geojson.bounds().is_none());
    }
}
