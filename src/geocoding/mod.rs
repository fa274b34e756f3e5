//! Geocoding: turning place names into coordinates
//!
//! [`GeoBackend`] abstracts the external lookup service, [`cache::GeocodeCache`]
//! remembers answers for a session and [`resolver::GeocodeResolver`] layers
//! candidate queries and retries on top of both.

pub mod cache;
pub mod nominatim;
pub mod resolver;

use crate::core::geo::LatLng;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A geocoded location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub lat: f64,
    pub lng: f64,
    /// Address or description reported by the service
    pub display_name: String,
}

impl GeocodeResult {
    pub fn new(lat: f64, lng: f64, display_name: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            display_name: display_name.into(),
        }
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// An external forward-geocoding service
#[async_trait]
pub trait GeoBackend: Send + Sync {
    /// Looks `query` up, returning at most `limit` matches, best first.
    ///
    /// An empty list means the service answered but found nothing.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<GeocodeResult>>;

    fn name(&self) -> &str {
        "geocoder"
    }
}

#[async_trait]
impl<T: GeoBackend + ?Sized> GeoBackend for Arc<T> {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<GeocodeResult>> {
        (**self).search(query, limit).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
