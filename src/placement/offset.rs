use crate::core::config::PlacementConfig;
use crate::core::geo::LatLng;
use std::f64::consts::PI;

/// Deterministic spreading of markers so that activities sharing a position
/// stay distinguishable.
///
/// Activity `i` of `n` is pushed along the angle `i / n * 2π`. Known positions
/// (authoritative or geocoded) move by `near_step * (i + 1)` degrees; fallback
/// positions ring the destination center at `fallback_base + i * fallback_step`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetScheme {
    pub near_step: f64,
    pub fallback_base: f64,
    pub fallback_step: f64,
}

impl OffsetScheme {
    pub fn new(near_step: f64, fallback_base: f64, fallback_step: f64) -> Self {
        Self {
            near_step,
            fallback_base,
            fallback_step,
        }
    }

    pub fn angle(index: usize, total: usize) -> f64 {
        if total == 0 {
            return 0.0;
        }
        index as f64 / total as f64 * 2.0 * PI
    }

    pub fn near_radius(&self, index: usize) -> f64 {
        self.near_step * (index + 1) as f64
    }

    pub fn fallback_radius(&self, index: usize) -> f64 {
        self.fallback_base + index as f64 * self.fallback_step
    }

    /// Known `position` nudged for activity `index` of `total`
    pub fn near(&self, position: LatLng, index: usize, total: usize) -> LatLng {
        position.offset_polar(Self::angle(index, total), self.near_radius(index))
    }

    /// Synthetic position around `center` for activity `index` of `total`
    pub fn fallback(&self, center: LatLng, index: usize, total: usize) -> LatLng {
        center.offset_polar(Self::angle(index, total), self.fallback_radius(index))
    }
}

impl Default for OffsetScheme {
    fn default() -> Self {
        Self::from(&PlacementConfig::default())
    }
}

impl From<&PlacementConfig> for OffsetScheme {
    fn from(config: &PlacementConfig) -> Self {
        Self::new(
            config.near_offset_step,
            config.fallback_offset_base,
            config.fallback_offset_step,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_offset_first_index() {
        let scheme = OffsetScheme::default();
        let placed = scheme.near(LatLng::new(33.0, -7.0), 0, 4);

        // Angle 0 moves east only
        assert!((placed.lat - 33.0).abs() < 1e-12);
        assert!((placed.lng - -6.999).abs() < 1e-12);
    }

    #[test]
    fn test_fallback_ring_is_distinct() {
        let scheme = OffsetScheme::default();
        let center = LatLng::new(31.63, -7.98);

        let ring: Vec<LatLng> = (0..5).map(|i| scheme.fallback(center, i, 5)).collect();
        for (i, a) in ring.iter().enumerate() {
            let expected = scheme.fallback_radius(i);
            let actual = ((a.lat - center.lat).powi(2) + (a.lng - center.lng).powi(2)).sqrt();
            assert!((actual - expected).abs() < 1e-12);

            for b in ring.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_same_position_different_index_separates() {
        let scheme = OffsetScheme::default();
        let spot = LatLng::new(48.8584, 2.2945);

        let a = scheme.near(spot, 0, 2);
        let b = scheme.near(spot, 1, 2);
        assert!(a.distance_to(&b) > 100.0);
    }

    #[test]
    fn test_zero_total_angle() {
        assert_eq!(OffsetScheme::angle(0, 0), 0.0);
        assert!((OffsetScheme::angle(1, 4) - PI / 2.0).abs() < 1e-12);
    }
}
