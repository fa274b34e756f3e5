//! Core constants for geocoding, placement and scene rendering.
//! Keeping them in a single place makes it easier to tweak pipeline-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Highest zoom level a tile provider serves.
pub const MAX_TILE_ZOOM: u8 = 18;

/// Extra lookups after the first failed one, per query candidate.
pub const DEFAULT_GEOCODE_RETRIES: u32 = 2;
pub const MAX_GEOCODE_RETRIES: u32 = 10;

/// Pause before each retry of the same query.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1_000;

/// Pause between successive activity lookups in one placement run.
pub const DEFAULT_INTER_REQUEST_DELAY_MS: u64 = 300;

/// Candidates requested from the geocoding service per query.
pub const DEFAULT_RESULT_LIMIT: usize = 1;

/// Public OpenStreetMap Nominatim endpoint.
pub const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Client identifier sent with every geocoding request.
pub const DEFAULT_USER_AGENT: &str = "tripmap/0.1 (+https://github.com/tripmap/tripmap)";

/// Prefix of cache keys for destination-center lookups.
pub const CENTER_KEY_PREFIX: &str = "center_";

/// Radius step (degrees, ~100 m) for exact and geocoded placements.
pub const NEAR_OFFSET_STEP: f64 = 0.001;

/// Base radius (degrees) for fallback placements around the destination center.
pub const FALLBACK_OFFSET_BASE: f64 = 0.005;

/// Per-index radius growth (degrees) for fallback placements.
pub const FALLBACK_OFFSET_STEP: f64 = 0.002;

/// Padding in pixels kept around the markers when fitting the viewport.
pub const FIT_PADDING: f64 = 60.0;

/// Zoom cap when fitting the viewport to markers.
pub const FIT_MAX_ZOOM: f64 = 14.0;

/// Zoom used before any marker has been placed.
pub const DEFAULT_ZOOM: f64 = 13.0;

/// Center used before any marker or destination is known (Casablanca).
pub const DEFAULT_CENTER: (f64, f64) = (33.5731, -7.5898);

/// Viewport size assumed when the host does not report one.
pub const DEFAULT_VIEWPORT_SIZE: (f64, f64) = (800.0, 500.0);

/// Numbered marker icon size in pixels.
pub const MARKER_ICON_SIZE: (u32, u32) = (36, 36);

/// Anchor inside the marker icon (hot-spot) in pixel coords.
pub const MARKER_ICON_ANCHOR: (u32, u32) = (18, 36);

/// Popup anchor relative to the marker hot-spot.
pub const MARKER_POPUP_ANCHOR: (i32, i32) = (0, -36);

/// Tooltip offset above the marker.
pub const MARKER_TOOLTIP_OFFSET: (i32, i32) = (0, -40);
