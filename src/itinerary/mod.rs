//! Itinerary input model
//!
//! Itineraries come from a trip-generation backend whose payloads drift
//! between versions: days may arrive as `day_plans` or `days`, coordinates as
//! numbers, numeric strings or `null`. Deserialization absorbs all of that so
//! malformed fields degrade to "no value" instead of failing the whole trip.

use crate::core::geo::LatLng;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single scheduled item within a day plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
    #[serde(default, alias = "time", deserialize_with = "null_as_empty")]
    pub time_of_day: String,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub longitude: Option<f64>,
}

impl Activity {
    pub fn new(
        description: impl Into<String>,
        location: impl Into<String>,
        time_of_day: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            location: location.into(),
            time_of_day: time_of_day.into(),
            latitude: None,
            longitude: None,
        }
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Authoritative position, if the backend supplied a usable one.
    ///
    /// Zero is the backend's "unknown" marker for either axis, so a zero
    /// latitude or longitude is treated as absent.
    pub fn coordinates(&self) -> Option<LatLng> {
        let (lat, lng) = (self.latitude?, self.longitude?);
        if lat == 0.0 || lng == 0.0 {
            return None;
        }
        let position = LatLng::new(lat, lng);
        position.is_valid().then_some(position)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(default, alias = "day", deserialize_with = "lenient_day")]
    pub day_number: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default, alias = "days", deserialize_with = "null_as_default")]
    pub day_plans: Vec<DayPlan>,
}

impl Itinerary {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn day(&self, day_number: u32) -> Option<&DayPlan> {
        self.day_plans.iter().find(|d| d.day_number == day_number)
    }

    /// Activities scheduled for `day_number`; empty when the day is missing
    pub fn activities_for_day(&self, day_number: u32) -> &[Activity] {
        self.day(day_number)
            .map(|d| d.activities.as_slice())
            .unwrap_or(&[])
    }

    /// Destination with surrounding whitespace removed, if any is left
    pub fn destination(&self) -> Option<&str> {
        self.destination
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_like).filter(|v| v.is_finite()))
}

fn lenient_day<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(number_like)
        .filter(|v| *v >= 0.0 && v.fract() == 0.0 && *v <= u32::MAX as f64)
        .map(|v| v as u32)
        .unwrap_or_default())
}

/// Reads a JSON number or a string holding one
pub(crate) fn number_like(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_activity_fields() {
        let activity: Activity = serde_json::from_str(
            r#"{
                "description": "Hassan II Mosque",
                "location": null,
                "time": "Morning",
                "latitude": "33.6083",
                "longitude": -7.6325
            }"#,
        )
        .unwrap();

        assert_eq!(activity.location, "");
        assert_eq!(activity.time_of_day, "Morning");
        assert_eq!(activity.latitude, Some(33.6083));
        assert_eq!(activity.coordinates(), Some(LatLng::new(33.6083, -7.6325)));
    }

    #[test]
    fn test_malformed_coordinates_become_none() {
        let activity: Activity = serde_json::from_str(
            r#"{ "description": "Souk", "latitude": "", "longitude": "east-ish" }"#,
        )
        .unwrap();

        assert_eq!(activity.latitude, None);
        assert_eq!(activity.longitude, None);
        assert_eq!(activity.coordinates(), None);

        let activity: Activity =
            serde_json::from_str(r#"{ "latitude": [1], "longitude": { "x": 2 } }"#).unwrap();
        assert_eq!(activity.coordinates(), None);
    }

    #[test]
    fn test_coordinates_validity() {
        let base = Activity::new("a", "b", "Morning");

        assert!(base.clone().with_coordinates(48.85, 2.35).coordinates().is_some());
        assert!(base.clone().with_coordinates(0.0, 2.35).coordinates().is_none());
        assert!(base.clone().with_coordinates(48.85, 0.0).coordinates().is_none());
        assert!(base.clone().with_coordinates(95.0, 2.35).coordinates().is_none());
        assert!(base.clone().with_coordinates(48.85, 200.0).coordinates().is_none());

        let mut half = base;
        half.latitude = Some(48.85);
        assert!(half.coordinates().is_none());
    }

    #[test]
    fn test_itinerary_aliases() {
        let itinerary = Itinerary::from_json(
            r#"{
                "destination": "  Marrakech ",
                "days": [
                    { "day": 1, "activities": [ { "description": "Jemaa el-Fnaa" } ] },
                    { "day": "2", "activities": null }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(itinerary.destination(), Some("Marrakech"));
        assert_eq!(itinerary.activities_for_day(1).len(), 1);
        assert!(itinerary.day(2).is_some());
        assert!(itinerary.activities_for_day(2).is_empty());
        assert!(itinerary.activities_for_day(7).is_empty());
    }

    #[test]
    fn test_blank_destination() {
        let itinerary = Itinerary {
            destination: Some("   ".to_string()),
            day_plans: Vec::new(),
        };
        assert_eq!(itinerary.destination(), None);
    }
}
