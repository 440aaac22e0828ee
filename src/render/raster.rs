//! # Monochrome Rasterization
//!
//! Reduces an 8-bit intensity map to the printer's 1-bit raster form.
//!
//! ## Thresholding
//!
//! Each pixel's luminance is compared against a fixed midpoint threshold:
//! anything darker than 128 prints as ink. A fixed global threshold was
//! chosen over ordered dithering for predictability — the same input always
//! produces the same dots, and line art / text (the dominant use case for a
//! receipt printer) reproduces crisply. This trades away mid-tone fidelity
//! on photographs; it is a documented policy choice, not an invariant.
//!
//! ## Packing
//!
//! Eight consecutive dots pack into one byte, most-significant bit first
//! (bit 7 = leftmost dot). When the width is not a multiple of 8 the final
//! byte's low bits are padded with 0 — padding must never be sent as ink,
//! or every row would end with a black smear at the paper edge.

use image::GrayImage;

use crate::error::PapelitoError;

/// Luminance values below this print as ink.
pub const INK_THRESHOLD: u8 = 128;

/// Packed 1-bit raster encoding of an intensity map.
///
/// Invariants, enforced at construction by [`encode`]:
/// - `data.len() == row_bytes as usize * rows as usize` — every row is
///   present in full; there is no silent truncation.
/// - `row_bytes == ceil(width_dots / 8)` for the source map's width.
/// - Both dimensions fit the raster command's 16-bit header fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterFrame {
    /// Width of the source map in dots.
    pub width_dots: u16,
    /// Bytes per packed row (`ceil(width_dots / 8)`).
    pub row_bytes: u16,
    /// Number of rows (source map height).
    pub rows: u16,
    /// Row-major packed dot data, MSB = leftmost dot, 1 = ink.
    pub data: Vec<u8>,
}

/// Encode an intensity map into a [`RasterFrame`].
///
/// ## Errors
///
/// Fails with [`PapelitoError::ImageTooLarge`] when the row count or the
/// row byte width exceeds 65535 — the raster header cannot represent it,
/// and truncating or wrapping would desynchronize the printer.
pub fn encode(map: &GrayImage) -> Result<RasterFrame, PapelitoError> {
    let width = map.width() as usize;
    let height = map.height() as usize;
    let row_bytes = width.div_ceil(8);

    if height > u16::MAX as usize || row_bytes > u16::MAX as usize {
        return Err(PapelitoError::ImageTooLarge {
            rows: height,
            row_bytes,
        });
    }

    let mut data = vec![0u8; row_bytes * height];
    for y in 0..height {
        let row = &mut data[y * row_bytes..(y + 1) * row_bytes];
        for x in 0..width {
            if map.get_pixel(x as u32, y as u32).0[0] < INK_THRESHOLD {
                row[x / 8] |= 0x80 >> (x % 8);
            }
        }
    }

    Ok(RasterFrame {
        width_dots: width as u16,
        row_bytes: row_bytes as u16,
        rows: height as u16,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use pretty_assertions::assert_eq;

    fn solid(width: u32, height: u32, luma: u8) -> GrayImage {
        GrayImage::from_pixel(width, height, Luma([luma]))
    }

    #[test]
    fn test_all_white_is_all_zero() {
        let frame = encode(&solid(560, 40, 255)).unwrap();
        assert_eq!(frame.row_bytes, 70);
        assert_eq!(frame.rows, 40);
        assert!(frame.data.iter().all(|&b| b == 0x00));
    }

    #[test]
    fn test_all_black_is_all_ones() {
        let frame = encode(&solid(560, 40, 0)).unwrap();
        assert!(frame.data.iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_padding_bits_stay_blank() {
        // 12 dots -> 2 bytes per row, 4 padding bits in the second byte.
        let frame = encode(&solid(12, 3, 0)).unwrap();
        assert_eq!(frame.row_bytes, 2);
        for row in frame.data.chunks(2) {
            assert_eq!(row[0], 0xFF);
            assert_eq!(row[1], 0xF0, "low 4 bits are padding, never ink");
        }
    }

    #[test]
    fn test_msb_is_leftmost_dot() {
        let mut map = solid(8, 1, 255);
        map.put_pixel(0, 0, Luma([0]));
        let frame = encode(&map).unwrap();
        assert_eq!(frame.data, vec![0b1000_0000]);

        let mut map = solid(8, 1, 255);
        map.put_pixel(7, 0, Luma([0]));
        let frame = encode(&map).unwrap();
        assert_eq!(frame.data, vec![0b0000_0001]);
    }

    #[test]
    fn test_midpoint_threshold() {
        // 127 prints, 128 does not.
        let frame = encode(&solid(8, 1, 127)).unwrap();
        assert_eq!(frame.data, vec![0xFF]);
        let frame = encode(&solid(8, 1, 128)).unwrap();
        assert_eq!(frame.data, vec![0x00]);
    }

    #[test]
    fn test_row_count_matches_height_exactly() {
        let frame = encode(&solid(33, 517, 255)).unwrap();
        assert_eq!(frame.rows, 517);
        assert_eq!(frame.row_bytes, 5); // ceil(33/8)
        assert_eq!(frame.data.len(), 5 * 517);
    }

    #[test]
    fn test_too_many_rows_rejected() {
        let map = solid(8, u16::MAX as u32 + 1, 255);
        let err = encode(&map).unwrap_err();
        assert!(matches!(
            err,
            PapelitoError::ImageTooLarge {
                rows: 65536,
                row_bytes: 1
            }
        ));
    }

    #[test]
    fn test_max_rows_accepted() {
        let map = solid(8, u16::MAX as u32, 255);
        let frame = encode(&map).unwrap();
        assert_eq!(frame.rows, u16::MAX);
    }

    #[test]
    fn test_too_wide_rejected() {
        // ceil(width/8) must also fit in 16 bits: 524281 dots -> 65536 bytes.
        let map = solid(65536 * 8 + 1, 1, 255);
        let err = encode(&map).unwrap_err();
        assert!(matches!(err, PapelitoError::ImageTooLarge { .. }));
    }
}
