use serde::{Deserialize, Serialize};

use crate::error::{EditorError, Result};

/// Width and height in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }
}

/// A point in widget (screen) coordinates, as reported by the selection widget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in image coordinates, used by crop and zoom-to-region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ImageRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Reject empty rects and rects that reach outside a `src_w` x `src_h` image.
    pub fn validated(&self, src_w: u32, src_h: u32) -> Result<ImageRect> {
        if self.is_degenerate() {
            return Err(EditorError::InvalidCrop(
                "width and height must be > 0".into(),
            ));
        }

        let right = self.x as u64 + self.width as u64;
        let bottom = self.y as u64 + self.height as u64;
        if right > src_w as u64 || bottom > src_h as u64 {
            return Err(EditorError::InvalidCrop(format!(
                "region ({},{} {}x{}) exceeds image dimensions ({src_w}x{src_h})",
                self.x, self.y, self.width, self.height
            )));
        }

        Ok(*self)
    }

    /// Map a rubber-band selection from widget coordinates to image coordinates.
    ///
    /// `image_origin` is where the top-left pixel of the displayed image sits in
    /// widget space and `scale` the current display scale. Corners may be given
    /// in any order; parts left of or above the image are clamped to 0.
    pub fn from_selection(
        start: ScreenPoint,
        end: ScreenPoint,
        image_origin: ScreenPoint,
        scale: f64,
    ) -> ImageRect {
        let to_image = |p: ScreenPoint| {
            let x = (p.x - image_origin.x) as f64 / scale;
            let y = (p.y - image_origin.y) as f64 / scale;
            (x.max(0.0).floor() as u32, y.max(0.0).floor() as u32)
        };
        let (ax, ay) = to_image(start);
        let (bx, by) = to_image(end);

        let (left, right) = (ax.min(bx), ax.max(bx));
        let (top, bottom) = (ay.min(by), ay.max(by));
        ImageRect::new(left, top, right - left, bottom - top)
    }
}
