use super::offset::OffsetScheme;
use crate::core::config::PlacementConfig;
use crate::core::geo::LatLng;
use crate::geocoding::resolver::GeocodeResolver;
use crate::itinerary::Activity;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where a placed coordinate came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlacementSource {
    /// Coordinates supplied with the itinerary
    Authoritative,
    Geocoded { display_name: String },
    /// Synthetic position around the destination center
    Fallback,
}

/// An activity pinned to a concrete map coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedActivity {
    #[serde(flatten)]
    pub activity: Activity,
    pub lat: f64,
    pub lng: f64,
    /// 1-based position in the day's activity list
    pub sequence_number: usize,
    pub is_approximate: bool,
    pub source: PlacementSource,
}

impl PlacedActivity {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// Result of one placement run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementOutcome {
    /// Placed activities in input order
    pub placed: Vec<PlacedActivity>,
    /// Input indices that could not be mapped at all
    pub omitted: Vec<usize>,
    pub center: Option<LatLng>,
}

impl PlacementOutcome {
    pub fn approximate_count(&self) -> usize {
        self.placed.iter().filter(|p| p.is_approximate).count()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }
}

/// Pins every activity of a day to a coordinate.
///
/// Lookups run one after another with a pause between geocoding requests,
/// which keeps the pipeline within the public geocoder's rate limits.
#[derive(Debug, Clone)]
pub struct ActivityPlacer {
    resolver: GeocodeResolver,
    offsets: OffsetScheme,
    inter_request_delay: Duration,
}

impl ActivityPlacer {
    pub fn new(resolver: GeocodeResolver, config: &PlacementConfig) -> Self {
        Self {
            resolver,
            offsets: OffsetScheme::from(config),
            inter_request_delay: config.inter_request_delay(),
        }
    }

    pub fn resolver(&self) -> &GeocodeResolver {
        &self.resolver
    }

    pub fn offsets(&self) -> &OffsetScheme {
        &self.offsets
    }

    pub async fn place(&self, activities: &[Activity], destination: &str) -> PlacementOutcome {
        if activities.is_empty() {
            return PlacementOutcome::default();
        }

        let total = activities.len();
        let center = self.resolver.resolve_destination_center(destination).await;
        let mut outcome = PlacementOutcome {
            placed: Vec::with_capacity(total),
            omitted: Vec::new(),
            center,
        };
        let mut lookups = 0usize;

        for (index, activity) in activities.iter().enumerate() {
            let placed = |position: LatLng, is_approximate: bool, source: PlacementSource| {
                PlacedActivity {
                    activity: activity.clone(),
                    lat: position.lat,
                    lng: position.lng,
                    sequence_number: index + 1,
                    is_approximate,
                    source,
                }
            };

            if let Some(position) = activity.coordinates() {
                let position = self.offsets.near(position, index, total);
                outcome
                    .placed
                    .push(placed(position, false, PlacementSource::Authoritative));
                continue;
            }

            if lookups > 0 && !self.inter_request_delay.is_zero() {
                tokio::time::sleep(self.inter_request_delay).await;
            }
            lookups += 1;

            if let Some(result) = self.resolver.resolve(&activity.location, destination).await {
                let position = self.offsets.near(result.position(), index, total);
                outcome.placed.push(placed(
                    position,
                    false,
                    PlacementSource::Geocoded {
                        display_name: result.display_name,
                    },
                ));
            } else if let Some(center) = center {
                let position = self.offsets.fallback(center, index, total);
                outcome
                    .placed
                    .push(placed(position, true, PlacementSource::Fallback));
            } else {
                log::warn!(
                    "activity {} ({:?}) could not be placed",
                    index + 1,
                    activity.description
                );
                outcome.omitted.push(index);
            }
        }

        log::info!(
            "placed {}/{} activities ({} approximate, {} lookups)",
            outcome.placed.len(),
            total,
            outcome.approximate_count(),
            lookups
        );

        outcome
    }
}
