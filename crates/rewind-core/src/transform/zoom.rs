use crate::geometry::{ImageRect, Size};
use crate::view::{AreaBounds, ScrollOffset};

/// Scale at which `rect` fills `viewport` along its dominant axis, capped by
/// the area bound for an image of size `image`.
pub fn region_scale(rect: &ImageRect, viewport: Size, image: Size, bounds: &AreaBounds) -> f64 {
    let wanted = if rect.width > rect.height {
        viewport.width as f64 / rect.width as f64
    } else {
        viewport.height as f64 / rect.height as f64
    };
    wanted.min(bounds.max_scale(image))
}

/// Scroll position that shows `rect` at `scale`, centred along its short axis.
pub fn region_scroll(rect: &ImageRect, viewport: Size, scale: f64) -> ScrollOffset {
    let mut x = rect.x as f64;
    let mut y = rect.y as f64;
    if rect.width < rect.height {
        let margin = (viewport.width as f64 - rect.width as f64 * scale) / 2.0;
        x = (x - margin / scale).max(0.0);
    } else {
        let margin = (viewport.height as f64 - rect.height as f64 * scale) / 2.0;
        y = (y - margin / scale).max(0.0);
    }
    ScrollOffset {
        x: x * scale,
        y: y * scale,
    }
}

/// Largest scale that shows the whole image inside `viewport`, capped by the area bound.
pub fn fit_scale(image: Size, viewport: Size, bounds: &AreaBounds) -> f64 {
    let sx = viewport.width as f64 / image.width as f64;
    let sy = viewport.height as f64 / image.height as f64;
    sx.min(sy).min(bounds.max_scale(image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn loose() -> AreaBounds {
        AreaBounds {
            max_area: f64::MAX,
            min_area: 0.0,
        }
    }

    #[test]
    fn wide_region_fills_width() {
        let rect = ImageRect::new(0, 0, 200, 50);
        let s = region_scale(&rect, Size::new(800, 600), Size::new(1000, 1000), &loose());
        assert_relative_eq!(s, 4.0);
    }

    #[test]
    fn region_scale_capped_by_area() {
        let rect = ImageRect::new(0, 0, 10, 10);
        let bounds = AreaBounds {
            max_area: 90_000.0,
            min_area: 0.0,
        };
        let s = region_scale(&rect, Size::new(800, 600), Size::new(100, 100), &bounds);
        assert_relative_eq!(s, 3.0);
    }

    #[test]
    fn tall_region_centres_horizontally() {
        let rect = ImageRect::new(100, 40, 50, 100);
        let scroll = region_scroll(&rect, Size::new(400, 300), 2.0);
        // margin = (400 - 100) / 2 = 150 screen px = 75 image px
        assert_relative_eq!(scroll.x, 50.0);
        assert_relative_eq!(scroll.y, 80.0);
    }

    #[test]
    fn fit_uses_tighter_axis() {
        let s = fit_scale(Size::new(400, 100), Size::new(200, 200), &loose());
        assert_relative_eq!(s, 0.5);
    }
}
