//! # ESC/POS Raster Graphics
//!
//! Wire framing for the raster bit image command (`GS v 0`) used to print
//! packed monochrome image data.
//!
//! ## Bit Packing
//!
//! Image data is packed as bytes where each bit represents one dot:
//! - Bit 7 (MSB) = leftmost dot
//! - Bit 0 (LSB) = rightmost dot
//! - 1 = black (print), 0 = white (no print)
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0x0F = 00001111 = ░░░░████
//! Byte value 0xAA = 10101010 = █░█░█░█░
//! ```
//!
//! ## Framing
//!
//! The command is length-prefixed, not delimiter-based: the header states
//! exactly `row_bytes × rows` payload bytes and the printer consumes exactly
//! that many. A wrong count desynchronizes the device's command parser, so
//! the header fields are an exact contract, never an approximation.

use super::commands::{u16_le, GS};
use crate::render::raster::RasterFrame;

/// # Print Raster Bit Image (GS v 0 m xL xH yL yH d1...dk)
///
/// Prints a monochrome raster image of arbitrary height.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS v 0 m xL xH yL yH d1...dk |
/// | Hex     | 1D 76 30 m xL xH yL yH d1...dk |
///
/// ## Parameters
///
/// - `m`: Mode (0 = normal, 1 dot per bit)
/// - `xL, xH`: Width in **bytes**, little-endian (1-65535)
/// - `yL, yH`: Height in **dots**, little-endian (1-65535)
/// - `d1...dk`: Image data, k = row_bytes × rows, row-major, MSB = left dot
///
/// ## Example
///
/// ```
/// use papelito::protocol::graphics;
///
/// // 560 dots wide (70 bytes), 100 rows, all black
/// let cmd = graphics::raster_raw(70, 100, &vec![0xFF; 70 * 100]);
///
/// assert_eq!(&cmd[0..3], &[0x1D, 0x76, 0x30]); // GS v 0
/// assert_eq!(cmd[3], 0);   // m = normal
/// assert_eq!(cmd[4], 70);  // xL
/// assert_eq!(cmd[5], 0);   // xH
/// assert_eq!(cmd[6], 100); // yL
/// assert_eq!(cmd[7], 0);   // yH
/// ```
pub fn raster_raw(row_bytes: u16, rows: u16, data: &[u8]) -> Vec<u8> {
    let expected_len = row_bytes as usize * rows as usize;

    debug_assert!(
        data.len() == expected_len,
        "Raster data length mismatch. Expected {} ({} bytes x {} rows), got {}",
        expected_len,
        row_bytes,
        rows,
        data.len()
    );

    let [xl, xh] = u16_le(row_bytes);
    let [yl, yh] = u16_le(rows);

    let mut cmd = Vec::with_capacity(8 + data.len());
    cmd.push(GS);
    cmd.push(b'v');
    cmd.push(b'0');
    cmd.push(0); // m = 0 (normal density)
    cmd.push(xl);
    cmd.push(xh);
    cmd.push(yl);
    cmd.push(yh);
    cmd.extend_from_slice(data);
    cmd
}

/// Frame an encoded [`RasterFrame`] as a `GS v 0` command.
///
/// The frame's dimensions already fit the 16-bit header fields; the
/// rasterizer rejects anything larger at encode time.
#[inline]
pub fn raster(frame: &RasterFrame) -> Vec<u8> {
    raster_raw(frame.row_bytes, frame.rows, &frame.data)
}

/// Decode the `(row_bytes, rows)` pair from a `GS v 0` header.
///
/// Used by tests to assert the header round-trips exactly; returns `None`
/// if the buffer is shorter than a full header or is not a raster command.
pub fn decode_raster_header(cmd: &[u8]) -> Option<(u16, u16)> {
    if cmd.len() < 8 || cmd[0] != GS || cmd[1] != b'v' || cmd[2] != b'0' {
        return None;
    }
    let row_bytes = u16::from_le_bytes([cmd[4], cmd[5]]);
    let rows = u16::from_le_bytes([cmd[6], cmd[7]]);
    Some((row_bytes, rows))
}

// ============================================================================
// TESTS
// ============================================================================
