//! # Image Preparation
//!
//! Normalizes a decoded bitmap for the thermal printer:
//!
//! 1. Resample to the printer's fixed dot width, preserving aspect ratio.
//!    Lanczos3 is used rather than nearest-neighbor: at 203 DPI aliasing
//!    artifacts are very visible on paper.
//! 2. Rotate 180° to compensate for the printer's physical mounting
//!    orientation (the receipt reads correctly as it exits the mechanism).
//! 3. Reduce to single-channel luminance with perceptual (BT.601) weights so
//!    mid-tones survive thresholding legibly.
//!
//! The output [`GrayImage`] is the pipeline's intensity map: one byte per
//! pixel, width exactly equal to the printer width, height derived from the
//! source aspect ratio. The source image is never mutated.

use image::{imageops::FilterType, DynamicImage, GrayImage};

use crate::error::PapelitoError;

/// Decode raw image bytes (JPEG, PNG, ...) into a bitmap.
///
/// Format sniffing is handled by the `image` crate; undecodable input
/// surfaces as [`PapelitoError::InvalidImage`].
pub fn load(bytes: &[u8]) -> Result<DynamicImage, PapelitoError> {
    image::load_from_memory(bytes)
        .map_err(|e| PapelitoError::InvalidImage(format!("Failed to decode image: {}", e)))
}

/// Prepare a bitmap for printing at `target_width` dots.
///
/// Returns a grayscale intensity map whose width is exactly `target_width`
/// and whose height is `round(target_width * src_height / src_width)`,
/// clamped to at least one row so extreme aspect ratios still produce a
/// printable frame. There is no cap on the resulting height; downstream
/// components must cope with arbitrarily tall maps (the rasterizer rejects
/// anything beyond the protocol's header capacity).
///
/// ## Errors
///
/// Fails with [`PapelitoError::InvalidImage`] when the source has zero area
/// or `target_width` is zero.
pub fn prepare(source: &DynamicImage, target_width: u16) -> Result<GrayImage, PapelitoError> {
    if target_width == 0 {
        return Err(PapelitoError::InvalidImage(
            "Target width must be positive".to_string(),
        ));
    }

    let (src_width, src_height) = (source.width(), source.height());
    if src_width == 0 || src_height == 0 {
        return Err(PapelitoError::InvalidImage(format!(
            "Source image has zero area ({}x{})",
            src_width, src_height
        )));
    }

    let target_width = target_width as u32;
    let target_height = ((target_width as f64 * src_height as f64 / src_width as f64).round()
        as u32)
        .max(1);

    let resized = source.resize_exact(target_width, target_height, FilterType::Lanczos3);
    let rotated = resized.rotate180();

    Ok(rotated.to_luma8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use pretty_assertions::assert_eq;

    fn gradient_image(width: u32, height: u32) -> DynamicImage {
        let mut img = RgbImage::new(width, height);
        for y in 0..height {
            for x in 0..width {
                img.put_pixel(x, y, Rgb([x as u8, y as u8, 128]));
            }
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_width_is_exact() {
        let img = gradient_image(200, 100);
        let map = prepare(&img, 560).unwrap();
        assert_eq!(map.width(), 560);
    }

    #[test]
    fn test_height_preserves_aspect_ratio() {
        let img = gradient_image(200, 100);
        let map = prepare(&img, 560).unwrap();
        // round(560 * 100 / 200) = 280
        assert_eq!(map.height(), 280);
    }

    #[test]
    fn test_height_rounds() {
        let img = gradient_image(300, 100);
        let map = prepare(&img, 560).unwrap();
        // 560 * 100 / 300 = 186.67 -> 187
        assert_eq!(map.height(), 187);
    }

    #[test]
    fn test_extreme_wide_source_clamps_to_one_row() {
        let img = gradient_image(4000, 1);
        let map = prepare(&img, 560).unwrap();
        // 560 * 1 / 4000 rounds to 0; clamped to a single row
        assert_eq!(map.height(), 1);
    }

    #[test]
    fn test_tall_sources_are_not_capped() {
        let img = gradient_image(10, 1000);
        let map = prepare(&img, 560).unwrap();
        assert_eq!(map.height(), 56_000);
    }

    #[test]
    fn test_rotation_180() {
        // One black pixel in the top-left corner of a white image must end
        // up in the bottom-right corner after preparation.
        let mut img = RgbImage::from_pixel(8, 8, Rgb([255, 255, 255]));
        img.put_pixel(0, 0, Rgb([0, 0, 0]));
        let img = DynamicImage::ImageRgb8(img);

        let map = prepare(&img, 8).unwrap();
        assert_eq!(map.height(), 8);
        assert!(map.get_pixel(7, 7).0[0] < 128, "corner pixel should be dark");
        assert!(map.get_pixel(0, 0).0[0] > 128, "origin should be light");
    }

    #[test]
    fn test_zero_target_width_rejected() {
        let img = gradient_image(10, 10);
        let err = prepare(&img, 0).unwrap_err();
        assert!(matches!(err, PapelitoError::InvalidImage(_)));
    }

    #[test]
    fn test_undecodable_bytes_rejected() {
        let err = load(b"definitely not an image").unwrap_err();
        assert!(matches!(err, PapelitoError::InvalidImage(_)));
    }

    #[test]
    fn test_source_not_mutated() {
        let img = gradient_image(100, 50);
        let before = img.clone();
        let _ = prepare(&img, 560).unwrap();
        assert_eq!(img.to_rgb8().as_raw(), before.to_rgb8().as_raw());
    }
}
