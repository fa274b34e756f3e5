use crate::core::geo::LatLngBounds;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerType {
    Tile,
    Vector,
    Marker,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Tile => write!(f, "tile"),
            LayerType::Vector => write!(f, "vector"),
            LayerType::Marker => write!(f, "marker"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerProperties {
    pub id: String,
    pub name: String,
    pub layer_type: LayerType,
    pub z_index: i32,
    pub opacity: f32,
    pub visible: bool,
    pub interactive: bool,
}

impl LayerProperties {
    pub fn new(id: String, name: String, layer_type: LayerType) -> Self {
        Self {
            id,
            name,
            layer_type,
            z_index: 0,
            opacity: 1.0,
            visible: true,
            interactive: layer_type == LayerType::Marker,
        }
    }
}

/// Common view over everything a scene draws
pub trait Layer {
    fn properties(&self) -> &LayerProperties;

    fn id(&self) -> &str {
        &self.properties().id
    }

    fn layer_type(&self) -> LayerType {
        self.properties().layer_type
    }

    fn z_index(&self) -> i32 {
        self.properties().z_index
    }

    fn is_visible(&self) -> bool {
        self.properties().visible
    }

    /// Geographic extent, if the layer has one
    fn bounds(&self) -> Option<LatLngBounds> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain(LayerProperties);

    impl Layer for Plain {
        fn properties(&self) -> &LayerProperties {
            &self.0
        }
    }

    #[test]
    fn test_layer_properties() {
        let props = LayerProperties::new(
            "test".to_string(),
            "Test Layer".to_string(),
            LayerType::Vector,
        );

        assert_eq!(props.id, "test");
        assert_eq!(props.name, "Test Layer");
        assert_eq!(props.layer_type, LayerType::Vector);
        assert_eq!(props.z_index, 0);
        assert_eq!(props.opacity, 1.0);
        assert!(props.visible);
        assert!(!props.interactive);
    }

    #[test]
    fn test_layer_defaults() {
        let layer = Plain(LayerProperties::new(
            "m".to_string(),
            "Marker".to_string(),
            LayerType::Marker,
        ));

        assert_eq!(layer.id(), "m");
        assert!(layer.properties().interactive);
        assert!(layer.bounds().is_none());
    }

    #[test]
    fn test_layer_type_display() {
        assert_eq!(LayerType::Tile.to_string(), "tile");
        assert_eq!(LayerType::Vector.to_string(), "vector");
        assert_eq!(LayerType::Marker.to_string(), "marker");
    }
}
