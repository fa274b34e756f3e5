use crate::ui::style::{MarkerStyle, TimeIcon};
use crate::layers::vector::SerializableColor;
use crate::placement::placer::PlacedActivity;
use serde::{Deserialize, Serialize};

/// Popup opened by clicking a marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Popup {
    /// Time-of-day badge text, e.g. "☀️ Morning"
    pub badge: String,
    pub badge_color: SerializableColor,
    pub description: String,
    /// Omitted when the activity has no location text
    pub location: Option<String>,
    /// Set when the marker sits at a synthetic position
    pub note: Option<String>,
    pub anchor: (i32, i32),
}

impl Popup {
    pub fn for_activity(placed: &PlacedActivity, style: &MarkerStyle, anchor: (i32, i32)) -> Self {
        let activity = &placed.activity;
        let location = activity.location.trim();

        Self {
            badge: label_with_icon(style.icon, activity.time_of_day.trim()),
            badge_color: style.color,
            description: activity.description.clone(),
            location: (!location.is_empty()).then(|| location.to_string()),
            note: placed
                .is_approximate
                .then(|| "Approximate location".to_string()),
            anchor,
        }
    }
}

/// Always-visible label above a marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tooltip {
    pub text: String,
    pub offset: (i32, i32),
    pub permanent: bool,
}

impl Tooltip {
    /// Icon plus the first word of the time of day ("Late afternoon" shows "Late")
    pub fn for_time_of_day(icon: TimeIcon, time_of_day: &str, offset: (i32, i32)) -> Self {
        let first_word = time_of_day.split_whitespace().next().unwrap_or("");
        Self {
            text: label_with_icon(icon, first_word),
            offset,
            permanent: true,
        }
    }
}

fn label_with_icon(icon: TimeIcon, label: &str) -> String {
    if label.is_empty() {
        icon.emoji().to_string()
    } else {
        format!("{} {}", icon.emoji(), label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::Activity;
    use crate::placement::placer::PlacementSource;
    use crate::ui::style::MarkerStyleTable;

    fn placed(location: &str, time: &str, approximate: bool) -> PlacedActivity {
        PlacedActivity {
            activity: Activity::new("Mint tea on the terrace", location, time),
            lat: 31.63,
            lng: -7.99,
            sequence_number: 1,
            is_approximate: approximate,
            source: if approximate {
                PlacementSource::Fallback
            } else {
                PlacementSource::Authoritative
            },
        }
    }

    #[test]
    fn test_tooltip_first_word() {
        let tooltip = Tooltip::for_time_of_day(TimeIcon::CloudSun, "Late afternoon", (0, -40));
        assert_eq!(tooltip.text, "🌤️ Late");
        assert!(tooltip.permanent);

        assert_eq!(Tooltip::for_time_of_day(TimeIcon::Pin, "  ", (0, -40)).text, "📍");
    }

    #[test]
    fn test_popup_content() {
        let table = MarkerStyleTable::default();
        let activity = placed("Café de France", "Evening", false);
        let popup = Popup::for_activity(&activity, &table.style_for("Evening"), (0, -36));

        assert_eq!(popup.badge, "🌙 Evening");
        assert_eq!(popup.badge_color.to_hex(), "#6366f1");
        assert_eq!(popup.location.as_deref(), Some("Café de France"));
        assert!(popup.note.is_none());
    }

    #[test]
    fn test_popup_approximate_without_location() {
        let table = MarkerStyleTable::default();
        let activity = placed("", "Morning", true);
        let popup = Popup::for_activity(&activity, &table.style_for("Morning"), (0, -36));

        assert!(popup.location.is_none());
        assert_eq!(popup.note.as_deref(), Some("Approximate location"));
    }
}
