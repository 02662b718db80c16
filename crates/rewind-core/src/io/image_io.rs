use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbaImage};
use tracing::info;

use crate::collab::ImageSink;
use crate::error::{EditorError, Result};

/// Load any format the `image` crate can decode as 8-bit RGBA.
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path)?;
    let rgba = img.to_rgba8();
    info!(
        path = %path.display(),
        width = rgba.width(),
        height = rgba.height(),
        "Image loaded"
    );
    Ok(rgba)
}

/// Save an image, choosing the format from the file extension (PNG otherwise).
pub fn save_image(image: &RgbaImage, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => {
            // JPEG has no alpha channel.
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            rgb.save_with_format(path, ImageFormat::Jpeg)?;
        }
        Some("bmp") => image.save_with_format(path, ImageFormat::Bmp)?,
        Some("tiff" | "tif") => image.save_with_format(path, ImageFormat::Tiff)?,
        _ => image.save_with_format(path, ImageFormat::Png)?,
    }
    Ok(())
}

/// Saves to a fixed path on disk.
#[derive(Clone, Debug)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSink for FileSink {
    fn save(&mut self, image: &RgbaImage) -> Result<()> {
        save_image(image, &self.path).map_err(|e| {
            EditorError::SaveFailed(format!("{}: {e}", self.path.display()))
        })?;
        info!(path = %self.path.display(), "Image saved");
        Ok(())
    }
}
