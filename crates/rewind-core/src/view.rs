//! Display-side state derived on every transform and replay.

use crate::config::BoundsConfig;
use crate::geometry::Size;

/// Scroll position (in displayed pixels) the viewport should move to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    /// Display scale; 1.0 shows one image pixel per screen pixel.
    pub scale_factor: f64,
    /// Rotation applied to the rotation checkpoint, in (-360, 360).
    pub cumulative_rotation: f64,
    /// Set by zoom-to-region so the viewport can center the region.
    pub scroll: Option<ScrollOffset>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            cumulative_rotation: 0.0,
            scroll: None,
        }
    }
}

impl ViewState {
    pub fn with_scale(self, scale_factor: f64) -> Self {
        Self {
            scale_factor,
            scroll: None,
            ..self
        }
    }

    /// Add `delta` degrees to the cumulative rotation.
    pub fn rotated_by(self, delta: f64) -> Self {
        Self {
            cumulative_rotation: normalize_angle(self.cumulative_rotation + delta),
            ..self
        }
    }
}

/// Fold an angle into (-360, 360) with truncating division:
/// `raw - trunc(raw / 360) * 360`. Negative input stays negative.
pub fn normalize_angle(raw: f64) -> f64 {
    raw - (raw / 360.0).trunc() * 360.0
}

/// Area in screen pixels of `size` drawn at `scale`.
pub fn displayed_area(size: Size, scale: f64) -> f64 {
    size.area() * scale * scale
}

/// Area-bound policy shared by every scale-changing operation.
#[derive(Clone, Copy, Debug)]
pub struct AreaBounds {
    pub max_area: f64,
    pub min_area: f64,
}

impl AreaBounds {
    pub fn from_config(config: &BoundsConfig) -> Self {
        Self {
            max_area: config.max_display_area,
            min_area: config.min_display_area,
        }
    }

    pub fn allows_zoom_in(&self, size: Size, scale: f64, step: f64) -> bool {
        displayed_area(size, scale) * step * step < self.max_area
    }

    pub fn allows_zoom_out(&self, size: Size, scale: f64) -> bool {
        displayed_area(size, scale) > self.min_area
    }

    /// Largest scale whose displayed area stays within `max_area`.
    pub fn max_scale(&self, size: Size) -> f64 {
        let area = size.area();
        if area <= 0.0 {
            return f64::INFINITY;
        }
        (self.max_area / area).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normalize_keeps_small_angles() {
        assert_relative_eq!(normalize_angle(30.0), 30.0);
        assert_relative_eq!(normalize_angle(-90.0), -90.0);
    }

    #[test]
    fn normalize_truncates_toward_zero() {
        assert_relative_eq!(normalize_angle(450.0), 90.0);
        assert_relative_eq!(normalize_angle(-450.0), -90.0);
        assert_relative_eq!(normalize_angle(720.0), 0.0);
        assert_relative_eq!(normalize_angle(-360.0), 0.0);
    }

    #[test]
    fn rotated_by_accumulates() {
        let view = ViewState::default().rotated_by(300.0).rotated_by(100.0);
        assert_relative_eq!(view.cumulative_rotation, 40.0);
    }

    #[test]
    fn zoom_in_rejected_at_max_area() {
        let bounds = AreaBounds {
            max_area: 10_000.0,
            min_area: 100.0,
        };
        let size = Size::new(100, 100);
        assert!(!bounds.allows_zoom_in(size, 1.0, 1.25));
        assert!(bounds.allows_zoom_in(size, 0.5, 1.25));
    }

    #[test]
    fn max_scale_matches_area() {
        let bounds = AreaBounds {
            max_area: 40_000.0,
            min_area: 100.0,
        };
        assert_relative_eq!(bounds.max_scale(Size::new(100, 100)), 2.0);
    }
}
