//! Configuration system for geocoding politeness and scene rendering
//!
//! Presets cover the usual deployments (the shared public Nominatim instance,
//! a self-hosted geocoder, tests); `Custom` carries hand-tuned options. Every
//! options struct deserializes with defaults, so a partial JSON file is enough
//! to override a single knob.

use crate::core::constants::*;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineProfile {
    /// Rate-limit friendly settings for the public Nominatim instance
    Polite,
    /// Shorter pauses for self-hosted or paid geocoders
    Fast,
    /// No pauses at all
    Testing,
    Custom(PipelineOptions),
}

impl PipelineProfile {
    pub fn resolve(&self) -> PipelineOptions {
        match self {
            Self::Polite => PipelineOptions {
                geocoder: GeocoderConfig::default(),
                placement: PlacementConfig::default(),
                render: RenderConfig::default(),
            },
            Self::Fast => PipelineOptions {
                geocoder: GeocoderConfig {
                    retries: 1,
                    retry_delay_ms: 250,
                    ..GeocoderConfig::default()
                },
                placement: PlacementConfig {
                    inter_request_delay_ms: 100,
                    ..PlacementConfig::default()
                },
                render: RenderConfig::default(),
            },
            Self::Testing => PipelineOptions {
                geocoder: GeocoderConfig {
                    retry_delay_ms: 0,
                    request_timeout_ms: 1_000,
                    ..GeocoderConfig::default()
                },
                placement: PlacementConfig {
                    inter_request_delay_ms: 0,
                    ..PlacementConfig::default()
                },
                render: RenderConfig {
                    include_tiles: false,
                    ..RenderConfig::default()
                },
            },
            Self::Custom(options) => options.clone(),
        }
    }

    /// Looks a preset up by its command-line name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "polite" => Some(Self::Polite),
            "fast" => Some(Self::Fast),
            "testing" => Some(Self::Testing),
            _ => None,
        }
    }
}

impl Default for PipelineProfile {
    fn default() -> Self {
        Self::Polite
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    pub geocoder: GeocoderConfig,
    pub placement: PlacementConfig,
    pub render: RenderConfig,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineProfile::default().resolve()
    }
}

impl PipelineOptions {
    /// Parses options from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let options: PipelineOptions = serde_json::from_str(json).map_err(MapError::from)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        let placement = &self.placement;
        if !(placement.near_offset_step > 0.0
            && placement.fallback_offset_base > 0.0
            && placement.fallback_offset_step >= 0.0)
        {
            return Err(MapError::Config(
                "placement offsets must be positive so markers never overlap".to_string(),
            )
            .into());
        }

        let render = &self.render;
        if !(0.0..=MAX_TILE_ZOOM as f64).contains(&render.fit_max_zoom) {
            return Err(MapError::Config(format!(
                "fit_max_zoom {} outside 0..={}",
                render.fit_max_zoom, MAX_TILE_ZOOM
            ))
            .into());
        }

        if render.viewport_width <= 2.0 * render.fit_padding
            || render.viewport_height <= 2.0 * render.fit_padding
        {
            return Err(MapError::Config("viewport smaller than its fit padding".to_string()).into());
        }

        if self.geocoder.retries > MAX_GEOCODE_RETRIES {
            return Err(MapError::Config(format!(
                "geocoder retries {} exceeds {}",
                self.geocoder.retries, MAX_GEOCODE_RETRIES
            ))
            .into());
        }

        if self.geocoder.user_agent.trim().is_empty() {
            return Err(MapError::Config("geocoder user_agent must not be empty".to_string()).into());
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub user_agent: String,
    pub accept_language: String,
    pub retries: u32,
    pub retry_delay_ms: u64,
    pub result_limit: usize,
    pub request_timeout_ms: u64,
}

impl GeocoderConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Total lookups allowed per query candidate
    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: NOMINATIM_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: "en".to_string(),
            retries: DEFAULT_GEOCODE_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            result_limit: DEFAULT_RESULT_LIMIT,
            request_timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub inter_request_delay_ms: u64,
    pub near_offset_step: f64,
    pub fallback_offset_base: f64,
    pub fallback_offset_step: f64,
}

impl PlacementConfig {
    pub fn inter_request_delay(&self) -> Duration {
        Duration::from_millis(self.inter_request_delay_ms)
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            inter_request_delay_ms: DEFAULT_INTER_REQUEST_DELAY_MS,
            near_offset_step: NEAR_OFFSET_STEP,
            fallback_offset_base: FALLBACK_OFFSET_BASE,
            fallback_offset_step: FALLBACK_OFFSET_STEP,
        }
    }
}

/// Basemap provider used for the scene's tile layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileProvider {
    CartoVoyager,
    OpenStreetMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub fit_padding: f64,
    pub fit_max_zoom: f64,
    pub default_zoom: f64,
    /// List the basemap tiles covering the fitted viewport
    pub include_tiles: bool,
    pub tile_provider: TileProvider,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_SIZE.0,
            viewport_height: DEFAULT_VIEWPORT_SIZE.1,
            fit_padding: FIT_PADDING,
            fit_max_zoom: FIT_MAX_ZOOM,
            default_zoom: DEFAULT_ZOOM,
            include_tiles: true,
            tile_provider: TileProvider::CartoVoyager,
        }
    }
}
