use crate::{
    core::geo::{LatLng, LatLngBounds},
    layers::base::{Layer, LayerProperties, LayerType},
    MapError, Result,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// RGBA color, serialized as a CSS hex string (`#rrggbb` or `#rrggbbaa`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        let channel = |i: usize| -> Result<u8> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|e| MapError::ParseError(format!("bad color {:?}: {}", hex, e)).into())
        };

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(MapError::ParseError(format!("bad color {:?}", hex)).into());
        }

        match digits.len() {
            3 => {
                let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
                Self::from_hex(&expanded)
            }
            6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(MapError::ParseError(format!("bad color {:?}", hex)).into()),
        }
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl std::fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for SerializableColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SerializableColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

/// Style for line features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: SerializableColor,
    pub width: f32,
    /// Opacity (0.0 to 1.0)
    pub opacity: f32,
    /// Dash and gap lengths in pixels; empty for a solid line
    pub dash_pattern: Vec<f32>,
}

impl LineStyle {
    /// Dashed blue line joining a day's stops
    pub fn route() -> Self {
        Self {
            color: SerializableColor::rgb(0x3b, 0x82, 0xf6),
            width: 3.0,
            opacity: 0.6,
            dash_pattern: vec![8.0, 8.0],
        }
    }

    /// Dash pattern in SVG `stroke-dasharray` form, e.g. `"8, 8"`
    pub fn dash_array(&self) -> Option<String> {
        if self.dash_pattern.is_empty() {
            return None;
        }
        Some(
            self.dash_pattern
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: SerializableColor::rgb(0, 0, 255),
            width: 2.0,
            opacity: 1.0,
            dash_pattern: Vec::new(),
        }
    }
}

/// The route connecting a day's markers in visiting order.
///
/// It is a straight-segment sketch of the sequence, not a travel route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePolyline {
    pub properties: LayerProperties,
    pub points: Vec<LatLng>,
    pub style: LineStyle,
    /// Sum of great-circle segment lengths in meters
    pub length_meters: f64,
}

impl RoutePolyline {
    /// Builds the route, or `None` when fewer than two points are given
    pub fn new(points: Vec<LatLng>, style: LineStyle) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let length_meters = Self::path_length(&points);
        let mut properties =
            LayerProperties::new("route".to_string(), "Route".to_string(), LayerType::Vector);
        properties.z_index = 10;
        properties.opacity = style.opacity;

        Some(Self {
            properties,
            points,
            style,
            length_meters,
        })
    }

    pub fn path_length(points: &[LatLng]) -> f64 {
        points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
    }
}

impl Layer for RoutePolyline {
    fn properties(&self) -> &LayerProperties {
        &self.properties
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::from_points(&self.points)
    }
}
