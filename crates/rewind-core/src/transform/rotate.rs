use image::{imageops, Rgba, RgbaImage};
use rayon::prelude::*;

use crate::config::{Interpolation, RotationConfig};
use crate::consts::{EPSILON, PARALLEL_PIXEL_THRESHOLD};

/// Rotate `src` clockwise by `degrees` into a canvas large enough to hold it.
///
/// Multiples of 90 degrees are exact pixel permutations. Other angles are
/// inverse-mapped around the image centre; uncovered corners get `config.fill`.
pub fn rotate_image(src: &RgbaImage, degrees: f64, config: &RotationConfig) -> RgbaImage {
    let quarter_turns = degrees / 90.0;
    if (quarter_turns - quarter_turns.round()).abs() < EPSILON {
        return match (quarter_turns.round() as i64).rem_euclid(4) {
            1 => imageops::rotate90(src),
            2 => imageops::rotate180(src),
            3 => imageops::rotate270(src),
            _ => src.clone(),
        };
    }
    rotate_free(src, degrees.to_radians(), config)
}

fn rotate_free(src: &RgbaImage, theta: f64, config: &RotationConfig) -> RgbaImage {
    let (src_w, src_h) = (src.width() as f64, src.height() as f64);
    let (sin, cos) = theta.sin_cos();

    let dst_w = canvas_edge(src_w * cos.abs() + src_h * sin.abs());
    let dst_h = canvas_edge(src_w * sin.abs() + src_h * cos.abs());

    let src_cx = src_w / 2.0;
    let src_cy = src_h / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;
    let fill = Rgba(config.fill);

    let render_row = |y: usize, row: &mut [u8]| {
        let dy = y as f64 + 0.5 - dst_cy;
        for (x, px) in row.chunks_exact_mut(4).enumerate() {
            let dx = x as f64 + 0.5 - dst_cx;
            // Inverse of the clockwise rotation in y-down coordinates.
            let sx = dx * cos + dy * sin + src_cx;
            let sy = -dx * sin + dy * cos + src_cy;
            let value = match config.interpolation {
                Interpolation::Nearest => sample_nearest(src, sx, sy, fill),
                Interpolation::Bilinear => sample_bilinear(src, sx, sy, fill),
            };
            px.copy_from_slice(&value.0);
        }
    };

    let mut dst = RgbaImage::new(dst_w, dst_h);
    let stride = dst_w as usize * 4;
    if stride == 0 {
        return dst;
    }
    let buf: &mut [u8] = &mut dst;
    if (dst_w as usize) * (dst_h as usize) >= PARALLEL_PIXEL_THRESHOLD {
        buf.par_chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| render_row(y, row));
    } else {
        buf.chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| render_row(y, row));
    }
    dst
}

/// Round a floating canvas edge up, ignoring float noise just above an integer.
fn canvas_edge(len: f64) -> u32 {
    ((len - 1e-6).ceil().max(1.0)) as u32
}

fn pixel_or(src: &RgbaImage, x: i64, y: i64, fill: Rgba<u8>) -> Rgba<u8> {
    if x < 0 || y < 0 || x >= src.width() as i64 || y >= src.height() as i64 {
        fill
    } else {
        *src.get_pixel(x as u32, y as u32)
    }
}

fn sample_nearest(src: &RgbaImage, sx: f64, sy: f64, fill: Rgba<u8>) -> Rgba<u8> {
    pixel_or(src, sx.floor() as i64, sy.floor() as i64, fill)
}

fn sample_bilinear(src: &RgbaImage, sx: f64, sy: f64, fill: Rgba<u8>) -> Rgba<u8> {
    let fx = sx - 0.5;
    let fy = sy - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let p00 = pixel_or(src, x0, y0, fill);
    let p10 = pixel_or(src, x0 + 1, y0, fill);
    let p01 = pixel_or(src, x0, y0 + 1, fill);
    let p11 = pixel_or(src, x0 + 1, y0 + 1, fill);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = p00.0[c] as f64 * (1.0 - tx) + p10.0[c] as f64 * tx;
        let bottom = p01.0[c] as f64 * (1.0 - tx) + p11.0[c] as f64 * tx;
        out[c] = (top * (1.0 - ty) + bottom * ty).round().clamp(0.0, 255.0) as u8;
    }
    Rgba(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| Rgba([x as u8, y as u8, 0, 255]))
    }

    #[test]
    fn quarter_turn_is_clockwise() {
        let img = gradient(4, 2);
        let rotated = rotate_image(&img, 90.0, &RotationConfig::default());
        assert_eq!(rotated.dimensions(), (2, 4));
        // Bottom-left source pixel lands top-left after a clockwise turn.
        assert_eq!(rotated.get_pixel(0, 0), img.get_pixel(0, 1));
    }

    #[test]
    fn negative_quarter_turn_matches_270() {
        let img = gradient(5, 3);
        let cfg = RotationConfig::default();
        assert_eq!(rotate_image(&img, -90.0, &cfg), rotate_image(&img, 270.0, &cfg));
    }

    #[test]
    fn zero_and_full_turn_are_identity() {
        let img = gradient(3, 3);
        let cfg = RotationConfig::default();
        assert_eq!(rotate_image(&img, 0.0, &cfg), img);
        assert_eq!(rotate_image(&img, 360.0, &cfg), img);
    }

    #[test]
    fn free_rotation_grows_canvas() {
        let img = gradient(10, 10);
        let rotated = rotate_image(&img, 45.0, &RotationConfig::default());
        assert_eq!(rotated.dimensions(), (15, 15));
        assert_eq!(rotated.get_pixel(0, 0).0, RotationConfig::default().fill);
    }
}
