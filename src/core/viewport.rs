use crate::core::constants::{MAX_TILE_ZOOM, TILE_SIZE};
use crate::core::geo::{LatLng, LatLngBounds, Point, TileCoord};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// The visible part of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        let max_zoom = MAX_TILE_ZOOM as f64;
        Self {
            center,
            zoom: zoom.clamp(0.0, max_zoom),
            size,
            min_zoom: 0.0,
            max_zoom,
        }
    }

    pub fn set_center(&mut self, center: LatLng) {
        self.center = LatLng::new(
            LatLng::clamp_lat(center.lat),
            center.lng.clamp(-180.0, 180.0),
        );
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Projects a LatLng to world pixel coordinates (Web Mercator, EPSG:3857)
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let world = TILE_SIZE as f64 * 2_f64.powf(zoom.unwrap_or(self.zoom));
        let lat_rad = LatLng::clamp_lat(lat_lng.lat).to_radians();

        let x = (lat_lng.lng + 180.0) / 360.0 * world;
        let y = (1.0 - (PI / 4.0 + lat_rad / 2.0).tan().ln() / PI) / 2.0 * world;

        Point::new(x, y)
    }

    /// Inverse of [`Viewport::project`]
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> LatLng {
        let world = TILE_SIZE as f64 * 2_f64.powf(zoom.unwrap_or(self.zoom));

        let lng = pixel.x / world * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * pixel.y / world)).sinh().atan().to_degrees();

        LatLng::new(lat, lng)
    }

    /// World pixel of the top-left screen corner
    pub fn pixel_origin(&self) -> Point {
        let center = self.project(&self.center, None);
        center.subtract(&Point::new(self.size.x / 2.0, self.size.y / 2.0))
    }

    /// Converts screen pixel coordinates back to geographical coordinates
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        self.unproject(&pixel.add(&self.pixel_origin()), None)
    }

    /// Gets the current viewport bounds in geographical coordinates
    pub fn bounds(&self) -> LatLngBounds {
        let nw = self.pixel_to_lat_lng(&Point::new(0.0, 0.0));
        let se = self.pixel_to_lat_lng(&self.size);

        LatLngBounds::new(LatLng::new(se.lat, nw.lng), LatLng::new(nw.lat, se.lng))
    }

    /// Centers on `bounds` and picks the highest whole zoom, up to `max_zoom`,
    /// at which the bounds fit inside the viewport shrunk by `padding` on each side.
    ///
    /// Degenerate bounds (a single point) always fit, so they land on `max_zoom`.
    /// Returns the chosen zoom.
    pub fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: f64, max_zoom: f64) -> f64 {
        self.set_center(bounds.center());

        let available = Point::new(
            (self.size.x - 2.0 * padding).max(0.0),
            (self.size.y - 2.0 * padding).max(0.0),
        );
        let ceiling = max_zoom.min(self.max_zoom);

        let mut best_zoom = self.min_zoom;
        for test_zoom in (self.min_zoom as i32)..=(ceiling as i32) {
            let zoom = test_zoom as f64;

            let nw = self.project(&bounds.north_west(), Some(zoom));
            let se = self.project(&bounds.south_east(), Some(zoom));

            let bounds_width = (se.x - nw.x).abs();
            let bounds_height = (se.y - nw.y).abs();

            if bounds_width <= available.x && bounds_height <= available.y {
                best_zoom = zoom;
            } else {
                break;
            }
        }

        log::debug!(
            "fit_bounds: center ({:.5}, {:.5}) zoom {}",
            self.center.lat,
            self.center.lng,
            best_zoom
        );

        self.set_zoom(best_zoom);
        self.zoom
    }

    /// Tiles covering the viewport at the current (rounded) zoom, row by row
    pub fn visible_tiles(&self) -> Vec<TileCoord> {
        let z = self.zoom.round().clamp(0.0, MAX_TILE_ZOOM as f64) as u8;
        let bounds = self.bounds();

        let nw = TileCoord::from_lat_lng(&bounds.north_west(), z);
        let se = TileCoord::from_lat_lng(&bounds.south_east(), z);

        let mut tiles = Vec::new();
        for y in nw.y..=se.y {
            for x in nw.x..=se.x {
                tiles.push(TileCoord::new(x, y, z));
            }
        }
        tiles
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::new(0.0, 0.0), 0.0, Point::new(800.0, 600.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_creation() {
        let viewport = Viewport::new(
            LatLng::new(40.7128, -74.0060),
            10.0,
            Point::new(800.0, 600.0),
        );

        assert_eq!(viewport.zoom, 10.0);
        assert_eq!(viewport.center.lat, 40.7128);
        assert_eq!(viewport.size.x, 800.0);
    }

    #[test]
    fn test_coordinate_conversion() {
        let viewport = Viewport::new(LatLng::new(0.0, 0.0), 1.0, Point::new(512.0, 512.0));

        let center_lat_lng = viewport.pixel_to_lat_lng(&Point::new(256.0, 256.0));
        assert!(center_lat_lng.lat.abs() < 0.01);
        assert!(center_lat_lng.lng.abs() < 0.01);

        let casablanca = LatLng::new(33.5731, -7.5898);
        let back = viewport.unproject(&viewport.project(&casablanca, Some(12.0)), Some(12.0));
        assert!((back.lat - casablanca.lat).abs() < 1e-9);
        assert!((back.lng - casablanca.lng).abs() < 1e-9);
    }

    #[test]
    fn test_fit_bounds_single_point_uses_cap() {
        let mut viewport = Viewport::new(LatLng::default(), 3.0, Point::new(800.0, 500.0));
        let point = LatLng::new(33.5731, -7.5898);
        let zoom = viewport.fit_bounds(&LatLngBounds::new(point, point), 60.0, 14.0);

        assert_eq!(zoom, 14.0);
        assert_eq!(viewport.center, point);
    }

    #[test]
    fn test_fit_bounds_contains_points() {
        let mut viewport = Viewport::new(LatLng::default(), 3.0, Point::new(800.0, 500.0));
        let bounds = LatLngBounds::new(LatLng::new(33.50, -7.70), LatLng::new(33.62, -7.50));
        let zoom = viewport.fit_bounds(&bounds, 60.0, 14.0);

        assert!(zoom < 14.0);
        assert!(zoom >= 8.0);

        let visible = viewport.bounds();
        assert!(visible.contains(&bounds.south_west));
        assert!(visible.contains(&bounds.north_east));
    }

    #[test]
    fn test_visible_tiles_cover_viewport() {
        let viewport = Viewport::new(LatLng::new(33.5731, -7.5898), 13.0, Point::new(800.0, 500.0));
        let tiles = viewport.visible_tiles();
        let center_tile = TileCoord::from_lat_lng(&viewport.center, 13);

        assert!(!tiles.is_empty());
        assert!(tiles.iter().all(|t| t.z == 13 && t.is_valid()));
        assert!(tiles.contains(&center_tile));
        // 800x500 px spans at most 5x3 tiles
        assert!(tiles.len() <= 15);
    }
}
