use crate::{
    core::{
        constants::{MARKER_ICON_ANCHOR, MARKER_ICON_SIZE, MARKER_POPUP_ANCHOR, MARKER_TOOLTIP_OFFSET},
        geo::{LatLng, LatLngBounds},
    },
    layers::base::{Layer, LayerProperties, LayerType},
    placement::placer::PlacedActivity,
    ui::{
        popup::{Popup, Tooltip},
        style::{MarkerStyle, MarkerStyleTable},
    },
};
use serde::{Deserialize, Serialize};

/// Numbered pin graphic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerIcon {
    pub size: (u32, u32),
    /// Hot-spot inside the icon that sits on the coordinate
    pub anchor: (u32, u32),
    pub popup_anchor: (i32, i32),
}

impl Default for MarkerIcon {
    fn default() -> Self {
        Self {
            size: MARKER_ICON_SIZE,
            anchor: MARKER_ICON_ANCHOR,
            popup_anchor: MARKER_POPUP_ANCHOR,
        }
    }
}

/// A placed activity drawn as a numbered, color-coded pin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityMarker {
    pub properties: LayerProperties,
    pub position: LatLng,
    /// The activity's 1-based sequence number
    pub number: usize,
    pub style: MarkerStyle,
    pub icon: MarkerIcon,
    pub tooltip: Tooltip,
    pub popup: Popup,
    pub is_approximate: bool,
}

impl ActivityMarker {
    pub fn new(placed: &PlacedActivity, styles: &MarkerStyleTable) -> Self {
        let style = styles.style_for(&placed.activity.time_of_day);
        let icon = MarkerIcon::default();
        let mut properties = LayerProperties::new(
            format!("marker-{}", placed.sequence_number),
            placed.activity.description.clone(),
            LayerType::Marker,
        );
        properties.z_index = 100 + placed.sequence_number as i32;

        Self {
            properties,
            position: placed.position(),
            number: placed.sequence_number,
            style,
            tooltip: Tooltip::for_time_of_day(
                style.icon,
                &placed.activity.time_of_day,
                MARKER_TOOLTIP_OFFSET,
            ),
            popup: Popup::for_activity(placed, &style, icon.popup_anchor),
            icon,
            is_approximate: placed.is_approximate,
        }
    }

    pub fn position(&self) -> LatLng {
        self.position
    }
}

impl Layer for ActivityMarker {
    fn properties(&self) -> &LayerProperties {
        &self.properties
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        Some(LatLngBounds::new(self.position, self.position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::Activity;
    use crate::placement::placer::PlacementSource;
    use crate::ui::style::TimeIcon;

    #[test]
    fn test_marker_from_placed_activity() {
        let placed = PlacedActivity {
            activity: Activity::new("Sunset at the Oudaya", "Kasbah of the Udayas", "Evening"),
            lat: 34.0335,
            lng: -6.8365,
            sequence_number: 4,
            is_approximate: false,
            source: PlacementSource::Geocoded {
                display_name: "Kasbah des Oudaïas, Rabat".to_string(),
            },
        };

        let marker = ActivityMarker::new(&placed, &MarkerStyleTable::default());

        assert_eq!(marker.number, 4);
        assert_eq!(marker.id(), "marker-4");
        assert_eq!(marker.position(), LatLng::new(34.0335, -6.8365));
        assert_eq!(marker.style.icon, TimeIcon::Moon);
        assert_eq!(marker.icon.size, (36, 36));
        assert_eq!(marker.icon.anchor, (18, 36));
        assert_eq!(marker.tooltip.offset, (0, -40));
        assert_eq!(marker.popup.anchor, (0, -36));
        assert_eq!(marker.bounds().unwrap().center(), marker.position());
    }
}
