//! OpenStreetMap Nominatim backend

use super::{GeoBackend, GeocodeResult};
use crate::core::config::GeocoderConfig;
use crate::itinerary::number_like;
use crate::{MapError, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Shared async HTTP client; identification headers are set per request
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .tcp_keepalive(Duration::from_secs(30))
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
});

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: Value,
    lon: Value,
    #[serde(default)]
    display_name: Option<String>,
}

impl NominatimPlace {
    fn into_result(self) -> Option<GeocodeResult> {
        let lat = number_like(&self.lat)?;
        let lng = number_like(&self.lon)?;
        let result = GeocodeResult::new(lat, lng, self.display_name.unwrap_or_default());
        result.position().is_valid().then_some(result)
    }
}

/// Forward geocoding against a Nominatim `/search` endpoint
#[derive(Debug, Clone)]
pub struct NominatimBackend {
    base_url: String,
    user_agent: String,
    accept_language: String,
    timeout: Duration,
}

impl NominatimBackend {
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(MapError::Config(format!("invalid geocoder base url: {}", config.base_url)).into());
        }
        if config.user_agent.trim().is_empty() {
            return Err(MapError::Config("Nominatim requires an identifying User-Agent".to_string()).into());
        }

        Ok(Self {
            base_url,
            user_agent: config.user_agent.clone(),
            accept_language: config.accept_language.clone(),
            timeout: config.request_timeout(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }

    /// Parses a `/search?format=json` payload, skipping unusable entries
    pub fn parse_response(body: &str) -> Result<Vec<GeocodeResult>> {
        let places: Vec<NominatimPlace> = serde_json::from_str(body).map_err(MapError::from)?;
        Ok(places
            .into_iter()
            .filter_map(NominatimPlace::into_result)
            .collect())
    }
}

#[async_trait]
impl GeoBackend for NominatimBackend {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<GeocodeResult>> {
        let limit = limit.max(1).to_string();
        let response = HTTP_CLIENT
            .get(self.search_url())
            .query(&[("format", "json"), ("q", query), ("limit", limit.as_str())])
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .header(reqwest::header::ACCEPT_LANGUAGE, &self.accept_language)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(MapError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(MapError::Geocoding(format!("HTTP {} for {:?}", status, query)).into());
        }

        let body = response.text().await.map_err(MapError::from)?;
        Self::parse_response(&body)
    }

    fn name(&self) -> &str {
        "nominatim"
    }
}
