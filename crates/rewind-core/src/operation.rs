use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{ImageRect, Size};

/// A recorded, replayable edit. Each case carries every parameter needed to
/// re-execute it; viewport geometry is captured at record time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// Rotate by a relative angle in degrees (positive = clockwise).
    Rotate { degrees: f64 },
    Crop { rect: ImageRect },
    ZoomToRegion { rect: ImageRect, viewport: Size },
    ZoomIn,
    ZoomOut,
    FitToWindow { viewport: Size },
    NormalSize,
    Resize(ResizeParams),
    CloseFile,
}

impl Operation {
    /// Whether the operation edits pixels (as opposed to only the view).
    pub fn edits_pixels(&self) -> bool {
        matches!(
            self,
            Self::Rotate { .. } | Self::Crop { .. } | Self::Resize(_) | Self::CloseFile
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rotate { degrees } => write!(f, "Rotate {degrees}°"),
            Self::Crop { rect } => write!(
                f,
                "Crop ({},{} {}x{})",
                rect.x, rect.y, rect.width, rect.height
            ),
            Self::ZoomToRegion { rect, .. } => write!(
                f,
                "Zoom to region ({},{} {}x{})",
                rect.x, rect.y, rect.width, rect.height
            ),
            Self::ZoomIn => write!(f, "Zoom in"),
            Self::ZoomOut => write!(f, "Zoom out"),
            Self::FitToWindow { .. } => write!(f, "Fit to window"),
            Self::NormalSize => write!(f, "Normal size"),
            Self::Resize(p) => write!(f, "Resize {p}"),
            Self::CloseFile => write!(f, "Close file"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeUnit {
    #[default]
    Pixels,
    /// Relative to the current image dimensions, 1..=100.
    Percentage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeParams {
    pub width: u32,
    pub height: u32,
    pub unit: ResizeUnit,
    /// Keep the aspect ratio, fitting inside `width` x `height`.
    pub proportional: bool,
}

impl ResizeParams {
    pub fn pixels(width: u32, height: u32, proportional: bool) -> Self {
        Self {
            width,
            height,
            unit: ResizeUnit::Pixels,
            proportional,
        }
    }

    pub fn percent(width: u32, height: u32, proportional: bool) -> Self {
        Self {
            width,
            height,
            unit: ResizeUnit::Percentage,
            proportional,
        }
    }
}

impl fmt::Display for ResizeParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.unit {
            ResizeUnit::Pixels => "px",
            ResizeUnit::Percentage => "%",
        };
        write!(f, "{}x{}{suffix}", self.width, self.height)?;
        if self.proportional {
            write!(f, " (keep ratio)")?;
        }
        Ok(())
    }
}
