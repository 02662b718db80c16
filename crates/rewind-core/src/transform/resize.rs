use image::{imageops, RgbaImage};

use crate::config::ResampleFilter;
use crate::error::{EditorError, Result};
use crate::geometry::Size;
use crate::operation::{ResizeParams, ResizeUnit};

/// Turn resize parameters into a pixel target for an image of size `current`,
/// enforcing the pixel ceiling. Percentages must be within 1..=100.
pub fn resolve_target(params: &ResizeParams, current: Size, ceiling: u32) -> Result<Size> {
    let target = match params.unit {
        ResizeUnit::Pixels => Size::new(params.width, params.height),
        ResizeUnit::Percentage => {
            for pct in [params.width, params.height] {
                if pct == 0 || pct > 100 {
                    return Err(EditorError::InvalidPercentage(pct));
                }
            }
            Size::new(
                percent_of(current.width, params.width),
                percent_of(current.height, params.height),
            )
        }
    };

    if target.width == 0 || target.height == 0 {
        return Err(EditorError::InvalidDimensions {
            width: target.width,
            height: target.height,
        });
    }

    let requested = target.width.max(target.height);
    if requested > ceiling {
        return Err(EditorError::ResizeTooLarge { requested, ceiling });
    }

    Ok(target)
}

fn percent_of(len: u32, pct: u32) -> u32 {
    ((len as f64 * pct as f64 / 100.0).round() as u32).max(1)
}

/// Largest size with `src`'s aspect ratio that fits inside `bound`.
pub fn fit_within(src: Size, bound: Size) -> Size {
    let ratio = (bound.width as f64 / src.width as f64).min(bound.height as f64 / src.height as f64);
    Size::new(
        ((src.width as f64 * ratio).round() as u32).max(1),
        ((src.height as f64 * ratio).round() as u32).max(1),
    )
}

/// Resample `src` to `target`. With `proportional`, `target` is a bounding box.
pub fn scale_image(
    src: &RgbaImage,
    target: Size,
    proportional: bool,
    filter: ResampleFilter,
) -> RgbaImage {
    let src_size = Size::new(src.width(), src.height());
    let out = if proportional {
        fit_within(src_size, target)
    } else {
        target
    };
    if out == src_size {
        return src.clone();
    }
    imageops::resize(src, out.width, out.height, filter.filter_type())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_is_relative_to_current() {
        let target =
            resolve_target(&ResizeParams::percent(50, 25, false), Size::new(200, 80), 10_000)
                .unwrap();
        assert_eq!(target, Size::new(100, 20));
    }

    #[test]
    fn percentage_above_hundred_rejected() {
        let err = resolve_target(&ResizeParams::percent(150, 50, false), Size::new(10, 10), 100);
        assert!(matches!(err, Err(EditorError::InvalidPercentage(150))));
    }

    #[test]
    fn ceiling_enforced_on_longest_edge() {
        let err = resolve_target(&ResizeParams::pixels(50, 200, false), Size::new(10, 10), 100);
        assert!(matches!(
            err,
            Err(EditorError::ResizeTooLarge {
                requested: 200,
                ceiling: 100
            })
        ));
    }

    #[test]
    fn fit_within_keeps_ratio() {
        assert_eq!(fit_within(Size::new(400, 200), Size::new(100, 100)), Size::new(100, 50));
    }

    #[test]
    fn scale_image_proportional() {
        let img = RgbaImage::new(40, 20);
        let out = scale_image(&img, Size::new(10, 10), true, ResampleFilter::Nearest);
        assert_eq!(out.dimensions(), (10, 5));
    }
}
