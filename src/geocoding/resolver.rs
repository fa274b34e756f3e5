use super::cache::GeocodeCache;
use super::{GeoBackend, GeocodeResult};
use crate::core::config::GeocoderConfig;
use crate::core::geo::LatLng;
use std::sync::Arc;
use std::time::Duration;

/// Resolves activity locations through a [`GeoBackend`], most specific query first.
///
/// Failures never escape: a location that cannot be resolved is simply `None`.
#[derive(Clone)]
pub struct GeocodeResolver {
    backend: Arc<dyn GeoBackend>,
    cache: GeocodeCache,
    retries: u32,
    retry_delay: Duration,
    result_limit: usize,
}

impl GeocodeResolver {
    pub fn new(backend: Arc<dyn GeoBackend>, cache: GeocodeCache, config: &GeocoderConfig) -> Self {
        Self {
            backend,
            cache,
            retries: config.retries,
            retry_delay: config.retry_delay(),
            result_limit: config.result_limit.max(1),
        }
    }

    pub fn cache(&self) -> &GeocodeCache {
        &self.cache
    }

    /// Query strings tried for an activity, most specific first.
    ///
    /// Blank parts are skipped, so an activity without a location still gets
    /// the destination-only query.
    pub fn candidates(location: &str, destination: &str) -> Vec<String> {
        let location = location.trim();
        let destination = destination.trim();

        let mut candidates: Vec<String> = Vec::with_capacity(3);
        let mut push = |query: String| {
            if !query.is_empty() && !candidates.contains(&query) {
                candidates.push(query);
            }
        };

        if !location.is_empty() && !destination.is_empty() {
            push(format!("{}, {}", location, destination));
        }
        push(location.to_string());
        push(destination.to_string());

        candidates
    }

    /// Resolves `location` within `destination`.
    ///
    /// Each candidate is answered from the cache when possible; otherwise it
    /// gets `retries + 1` lookups before the next candidate is tried.
    pub async fn resolve(&self, location: &str, destination: &str) -> Option<GeocodeResult> {
        let candidates = Self::candidates(location, destination);
        if candidates.is_empty() {
            log::debug!("nothing to geocode: location and destination are blank");
            return None;
        }

        for query in candidates {
            if let Some(hit) = self.cache.get(&query) {
                log::debug!("geocode cache hit for {:?}", query);
                return Some(hit);
            }

            if let Some(result) = self.lookup(&query).await {
                self.cache.insert(query, result.clone());
                return Some(result);
            }
            log::warn!("no geocoding result for {:?}", query);
        }

        None
    }

    /// Center of `destination`, cached under its own `center_` key
    pub async fn resolve_destination_center(&self, destination: &str) -> Option<LatLng> {
        let destination = destination.trim();
        if destination.is_empty() {
            return None;
        }

        let key = GeocodeCache::center_key(destination);
        if let Some(hit) = self.cache.get(&key) {
            return Some(hit.position());
        }

        match self.lookup(destination).await {
            Some(result) => {
                let center = result.position();
                self.cache.insert(key, result);
                log::info!(
                    "destination {:?} centered at ({:.5}, {:.5})",
                    destination,
                    center.lat,
                    center.lng
                );
                Some(center)
            }
            None => {
                log::warn!("could not locate destination {:?}", destination);
                None
            }
        }
    }

    /// Asks the backend up to `retries + 1` times; errors and empty answers
    /// both use up an attempt.
    async fn lookup(&self, query: &str) -> Option<GeocodeResult> {
        let attempts = self.retries.saturating_add(1);

        for attempt in 1..=attempts {
            if attempt > 1 && !self.retry_delay.is_zero() {
                tokio::time::sleep(self.retry_delay).await;
            }

            match self.backend.search(query, self.result_limit).await {
                Ok(results) => match results.into_iter().next() {
                    Some(result) => {
                        log::debug!(
                            "{} resolved {:?} on attempt {}/{}",
                            self.backend.name(),
                            query,
                            attempt,
                            attempts
                        );
                        return Some(result);
                    }
                    None => log::debug!(
                        "{} found nothing for {:?} (attempt {}/{})",
                        self.backend.name(),
                        query,
                        attempt,
                        attempts
                    ),
                },
                Err(e) => log::warn!(
                    "{} lookup for {:?} failed (attempt {}/{}): {}",
                    self.backend.name(),
                    query,
                    attempt,
                    attempts,
                    e
                ),
            }
        }

        None
    }
}

impl std::fmt::Debug for GeocodeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodeResolver")
            .field("backend", &self.backend.name())
            .field("cache", &self.cache)
            .field("retries", &self.retries)
            .field("retry_delay", &self.retry_delay)
            .finish()
    }
}
