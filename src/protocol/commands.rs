//! # ESC/POS Control Commands
//!
//! This module implements the ESC/POS commands used by Epson thermal receipt
//! printers (TM-T20III and similar TM-series models).
//!
//! ## Escape Sequence Structure
//!
//! Commands are byte sequences starting with a prefix byte:
//! - `ESC` (0x1B) for classic commands: `ESC @`, `ESC d n`, `ESC a n`
//! - `GS` (0x1D) for extended commands: `GS V`, `GS v 0`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`
//!
//! ## Reference
//!
//! Based on the Epson "ESC/POS Command Reference for TM Printers".

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
///
/// Most ESC/POS commands begin with ESC (0x1B). This byte signals the start
/// of a control sequence rather than printable text.
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for cutter control and raster graphics:
/// - Hex: 0x1D, Decimal: 29
pub const GS: u8 = 0x1D;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets the printer to its power-on default state: clears the print
/// buffer, restores default alignment, line spacing, and print modes.
/// Issued unconditionally when a device session is opened, and again at the
/// end of every job so the device is idle for the next one.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
///
/// ## Example
///
/// ```
/// use papelito::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// PAPER FEED
// ============================================================================

/// # Print and Feed n Lines (ESC d n)
///
/// Prints any data in the line buffer and feeds the paper forward by `n`
/// lines at the current line spacing.
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC d n  |
/// | Hex     | 1B 64 n  |
///
/// The print job feeds a few lines before and after each image so the
/// thermal head clears the previous output and the image does not butt up
/// against the next one.
///
/// ## Example
///
/// ```
/// use papelito::protocol::commands;
///
/// assert_eq!(commands::feed_lines(8), vec![0x1B, 0x64, 8]);
/// ```
#[inline]
pub fn feed_lines(n: u8) -> Vec<u8> {
    vec![ESC, b'd', n]
}

// ============================================================================
// ALIGNMENT
// ============================================================================

/// Horizontal alignment for subsequent print data (ESC a n).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    /// The `n` parameter byte for ESC a.
    #[inline]
    pub const fn as_byte(self) -> u8 {
        match self {
            Alignment::Left => 0,
            Alignment::Center => 1,
            Alignment::Right => 2,
        }
    }
}

/// # Select Justification (ESC a n)
///
/// Sets horizontal alignment for everything that follows, including raster
/// images narrower than the print area.
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC a n  |
/// | Hex     | 1B 61 n  |
///
/// `n`: 0 = left, 1 = center, 2 = right.
///
/// ## Example
///
/// ```
/// use papelito::protocol::commands::{self, Alignment};
///
/// assert_eq!(commands::align(Alignment::Center), vec![0x1B, 0x61, 1]);
/// ```
#[inline]
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment.as_byte()]
}

// ============================================================================
// CUTTER CONTROL
// ============================================================================

/// # Full Cut at Current Position (GS V 0)
///
/// Cuts the paper at the current position without feeding first. May cut
/// through printed content; prefer [`cut_full_feed`] at the end of a receipt.
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | GS V 0   |
/// | Hex     | 1D 56 00 |
#[inline]
pub fn cut_full() -> Vec<u8> {
    vec![GS, b'V', 0]
}

/// # Partial Cut at Current Position (GS V 1)
///
/// Leaves a small uncut "hinge" so the receipt hangs from the roll instead
/// of falling.
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | GS V 1   |
/// | Hex     | 1D 56 01 |
#[inline]
pub fn cut_partial() -> Vec<u8> {
    vec![GS, b'V', 1]
}

/// # Feed to Cut Position, Then Full Cut (GS V 65 0)
///
/// Function A: feeds the paper so the last printed line is past the cutter,
/// then performs a full cut. This is the cut issued by the `/cut-paper`
/// endpoint and the `Cut` device command.
///
/// | Format  | Bytes       |
/// |---------|-------------|
/// | ASCII   | GS V A 0    |
/// | Hex     | 1D 56 41 00 |
#[inline]
pub fn cut_full_feed() -> Vec<u8> {
    vec![GS, b'V', 65, 0]
}

/// # Feed to Cut Position, Then Partial Cut (GS V 66 0)
///
/// Function B: same as [`cut_full_feed`] but leaves a small uncut portion.
#[inline]
pub fn cut_partial_feed() -> Vec<u8> {
    vec![GS, b'V', 66, 0]
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ESC/POS uses little-endian encoding for all multi-byte integers.
///
/// ## Example
///
/// ```
/// use papelito::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(560), [0x30, 0x02]); // 560 = 0x0230
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        assert_eq!(init(), vec![0x1B, 0x40]);
    }

    #[test]
    fn test_feed_lines() {
        assert_eq!(feed_lines(0), vec![0x1B, 0x64, 0x00]);
        assert_eq!(feed_lines(8), vec![0x1B, 0x64, 0x08]);
        assert_eq!(feed_lines(255), vec![0x1B, 0x64, 0xFF]);
    }

    #[test]
    fn test_align() {
        assert_eq!(align(Alignment::Left), vec![0x1B, 0x61, 0]);
        assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 1]);
        assert_eq!(align(Alignment::Right), vec![0x1B, 0x61, 2]);
    }

    #[test]
    fn test_cut_full() {
        assert_eq!(cut_full(), vec![0x1D, 0x56, 0x00]);
    }

    #[test]
    fn test_cut_partial() {
        assert_eq!(cut_partial(), vec![0x1D, 0x56, 0x01]);
    }

    #[test]
    fn test_cut_full_feed() {
        assert_eq!(cut_full_feed(), vec![0x1D, 0x56, 0x41, 0x00]);
    }

    #[test]
    fn test_cut_partial_feed() {
        assert_eq!(cut_partial_feed(), vec![0x1D, 0x56, 0x42, 0x00]);
    }

    #[test]
    fn test_u16_le() {
        assert_eq!(u16_le(0x0000), [0x00, 0x00]);
        assert_eq!(u16_le(0x00FF), [0xFF, 0x00]);
        assert_eq!(u16_le(0xFF00), [0x00, 0xFF]);
        assert_eq!(u16_le(0x1234), [0x34, 0x12]);
        assert_eq!(u16_le(560), [0x30, 0x02]); // Common width: 560 dots
    }
}
