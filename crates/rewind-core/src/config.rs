use std::fmt;
use std::path::Path;

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_MAX_DISPLAY_AREA, DEFAULT_MIN_DISPLAY_AREA, DEFAULT_RESIZE_PIXEL_CEILING,
    DEFAULT_ROTATION_FILL, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, DEFAULT_ZOOM_STEP,
};
use crate::error::{EditorError, Result};
use crate::geometry::Size;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub bounds: BoundsConfig,
    #[serde(default)]
    pub zoom: ZoomConfig,
    #[serde(default)]
    pub rotation: RotationConfig,
    #[serde(default)]
    pub resize: ResizeConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
}

impl EditorConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Reject settings the zoom and resize paths cannot work with.
    pub fn validate(&self) -> Result<()> {
        let step = self.zoom.step;
        if !step.is_finite() || step <= 1.0 {
            return Err(EditorError::InvalidConfig(format!(
                "zoom.step must be greater than 1, got {step}"
            )));
        }

        let BoundsConfig {
            max_display_area: max,
            min_display_area: min,
            resize_pixel_ceiling,
        } = self.bounds;
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min >= max {
            return Err(EditorError::InvalidConfig(format!(
                "display area bounds need 0 <= min < max, got min {min} max {max}"
            )));
        }
        if resize_pixel_ceiling == 0 {
            return Err(EditorError::InvalidConfig(
                "bounds.resize_pixel_ceiling must be > 0".into(),
            ));
        }

        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(EditorError::InvalidConfig(format!(
                "viewport must not be empty, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        Ok(())
    }
}

/// Resource limits applied to every scale-changing operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsConfig {
    /// Zoom stops before the displayed area (scaled w * scaled h) reaches this.
    pub max_display_area: f64,
    /// Zoom-out stops once the displayed area is at or below this.
    pub min_display_area: f64,
    /// Largest edge a resize may produce, in pixels.
    pub resize_pixel_ceiling: u32,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            max_display_area: DEFAULT_MAX_DISPLAY_AREA,
            min_display_area: DEFAULT_MIN_DISPLAY_AREA,
            resize_pixel_ceiling: DEFAULT_RESIZE_PIXEL_CEILING,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Zoom-in multiplier (> 1.0). Zoom-out applies the reciprocal.
    pub step: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_ZOOM_STEP,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    pub interpolation: Interpolation,
    /// RGBA fill for corners uncovered by the rotation.
    pub fill: [u8; 4],
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            interpolation: Interpolation::Bilinear,
            fill: DEFAULT_ROTATION_FILL,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    pub filter: ResampleFilter,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            filter: ResampleFilter::Triangle,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl ViewportConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

/// Sampling used when rotating by an angle that is not a multiple of 90 degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpolation {
    Nearest,
    #[default]
    Bilinear,
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nearest => write!(f, "Nearest"),
            Self::Bilinear => write!(f, "Bilinear"),
        }
    }
}

/// Resampling filter for resize, mirroring `image::imageops::FilterType`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResampleFilter {
    Nearest,
    #[default]
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl ResampleFilter {
    pub fn filter_type(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Gaussian => FilterType::Gaussian,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nearest => write!(f, "Nearest"),
            Self::Triangle => write!(f, "Triangle"),
            Self::CatmullRom => write!(f, "Catmull-Rom"),
            Self::Gaussian => write!(f, "Gaussian"),
            Self::Lanczos3 => write!(f, "Lanczos3"),
        }
    }
}
