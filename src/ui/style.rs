use crate::layers::vector::SerializableColor;
use serde::{Deserialize, Serialize};

/// Glyph shown in a marker's tooltip and popup badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeIcon {
    Sun,
    CloudSun,
    Moon,
    Utensils,
    Pin,
}

impl TimeIcon {
    pub fn emoji(&self) -> &'static str {
        match self {
            TimeIcon::Sun => "☀️",
            TimeIcon::CloudSun => "🌤️",
            TimeIcon::Moon => "🌙",
            TimeIcon::Utensils => "🍽️",
            TimeIcon::Pin => "📍",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub color: SerializableColor,
    pub icon: TimeIcon,
}

impl MarkerStyle {
    pub const fn new(color: SerializableColor, icon: TimeIcon) -> Self {
        Self { color, icon }
    }
}

/// Test applied to an activity's time-of-day label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "keywords", rename_all = "snake_case")]
pub enum StylePredicate {
    /// Case-insensitive substring match against any keyword
    ContainsAny(Vec<String>),
}

impl StylePredicate {
    pub fn contains_any(keywords: &[&str]) -> Self {
        StylePredicate::ContainsAny(keywords.iter().map(|k| k.to_lowercase()).collect())
    }

    pub fn matches(&self, time_of_day: &str) -> bool {
        let label = time_of_day.to_lowercase();
        match self {
            StylePredicate::ContainsAny(keywords) => keywords
                .iter()
                .any(|k| !k.is_empty() && label.contains(k.as_str())),
        }
    }
}

/// Ordered `(predicate, style)` rules; the first matching rule wins and
/// `default` applies when none does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyleTable {
    pub rules: Vec<(StylePredicate, MarkerStyle)>,
    pub default: MarkerStyle,
}

impl MarkerStyleTable {
    pub fn new(default: MarkerStyle) -> Self {
        Self {
            rules: Vec::new(),
            default,
        }
    }

    pub fn with_rule(mut self, predicate: StylePredicate, style: MarkerStyle) -> Self {
        self.rules.push((predicate, style));
        self
    }

    pub fn style_for(&self, time_of_day: &str) -> MarkerStyle {
        self.rules
            .iter()
            .find(|(predicate, _)| predicate.matches(time_of_day))
            .map(|(_, style)| *style)
            .unwrap_or(self.default)
    }
}

impl Default for MarkerStyleTable {
    /// Morning amber, afternoon orange, evening and night indigo, lunch red,
    /// anything else blue
    fn default() -> Self {
        MarkerStyleTable::new(MarkerStyle::new(SerializableColor::rgb(0x3b, 0x82, 0xf6), TimeIcon::Pin))
            .with_rule(
                StylePredicate::contains_any(&["morning"]),
                MarkerStyle::new(SerializableColor::rgb(0xf5, 0x9e, 0x0b), TimeIcon::Sun),
            )
            .with_rule(
                StylePredicate::contains_any(&["afternoon"]),
                MarkerStyle::new(SerializableColor::rgb(0xf9, 0x73, 0x16), TimeIcon::CloudSun),
            )
            .with_rule(
                StylePredicate::contains_any(&["evening", "night"]),
                MarkerStyle::new(SerializableColor::rgb(0x63, 0x66, 0xf1), TimeIcon::Moon),
            )
            .with_rule(
                StylePredicate::contains_any(&["lunch"]),
                MarkerStyle::new(SerializableColor::rgb(0xef, 0x44, 0x44), TimeIcon::Utensils),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let table = MarkerStyleTable::default();

        assert_eq!(table.style_for("Morning").color.to_hex(), "#f59e0b");
        assert_eq!(table.style_for("AFTERNOON").icon, TimeIcon::CloudSun);
        assert_eq!(table.style_for("Late night").color.to_hex(), "#6366f1");
        assert_eq!(table.style_for("evening").icon, TimeIcon::Moon);
        assert_eq!(table.style_for("Lunch").color.to_hex(), "#ef4444");
        assert_eq!(table.style_for("").icon, TimeIcon::Pin);
        assert_eq!(table.style_for("All day").color.to_hex(), "#3b82f6");
    }

    #[test]
    fn test_rule_order_decides() {
        let table = MarkerStyleTable::default();
        // Both "morning" and "lunch" match; the earlier rule wins
        assert_eq!(table.style_for("Late morning lunch").icon, TimeIcon::Sun);
    }

    #[test]
    fn test_custom_table() {
        let green = MarkerStyle::new(SerializableColor::rgb(0, 128, 0), TimeIcon::Pin);
        let table = MarkerStyleTable::new(MarkerStyleTable::default().default)
            .with_rule(StylePredicate::contains_any(&["Hike", "Trek"]), green);

        assert_eq!(table.style_for("Sunrise trek"), green);
        assert_eq!(table.style_for("Morning").icon, TimeIcon::Pin);
    }
}
