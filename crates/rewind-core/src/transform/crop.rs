use image::{imageops, RgbaImage};

use crate::error::Result;
use crate::geometry::ImageRect;

/// Copy the `rect` region out of `src`. The rect must lie inside the image.
pub fn subregion(src: &RgbaImage, rect: &ImageRect) -> Result<RgbaImage> {
    let rect = rect.validated(src.width(), src.height())?;
    Ok(imageops::crop_imm(src, rect.x, rect.y, rect.width, rect.height).to_image())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn subregion_copies_pixels() {
        let img = RgbaImage::from_fn(4, 4, |x, y| Rgba([(y * 16 + x) as u8, 0, 0, 255]));
        let out = subregion(&img, &ImageRect::new(1, 1, 2, 2)).unwrap();
        let reds: Vec<u8> = out.pixels().map(|p| p.0[0]).collect();
        assert_eq!(reds, vec![17, 18, 33, 34]);
    }

    #[test]
    fn subregion_rejects_out_of_bounds() {
        let img = RgbaImage::new(4, 4);
        assert!(subregion(&img, &ImageRect::new(3, 3, 2, 2)).is_err());
    }
}
