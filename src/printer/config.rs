//! # Printer Configuration
//!
//! This module defines hardware specifications for supported thermal
//! printers.
//!
//! ## Supported Printers
//!
//! | Model | Width (dots) | Resolution | USB VID:PID |
//! |-------|--------------|------------|-------------|
//! | Epson TM-T20III | 560 | 203 DPI | 04B8:0E28 |
//!
//! ## Usage
//!
//! ```
//! use papelito::printer::PrinterConfig;
//!
//! let config = PrinterConfig::TM_T20III;
//! println!("Print width: {} dots ({} bytes)",
//!          config.width_dots,
//!          config.width_bytes);
//! ```

/// # Printer Configuration
///
/// Defines the hardware characteristics of one thermal printer model.
///
/// - **width_dots**: addressable print positions across the paper, fixed by
///   the physical printhead. Every prepared image has exactly this width.
/// - **width_bytes**: `width_dots / 8`, the packed row width.
/// - **vendor_id / product_id**: USB identifiers used to locate the device.
#[derive(Debug, Clone, Copy)]
pub struct PrinterConfig {
    /// Printer model name
    pub name: &'static str,

    /// Maximum print width in dots (pixels)
    pub width_dots: u16,

    /// Print width in bytes (width_dots / 8)
    pub width_bytes: u16,

    /// Resolution in dots per inch
    pub dpi: u16,

    /// USB vendor identifier
    pub vendor_id: u16,

    /// USB product identifier
    pub product_id: u16,
}

impl PrinterConfig {
    /// # Epson TM-T20III Configuration
    ///
    /// 80mm paper width ESC/POS thermal receipt printer.
    ///
    /// | Property | Value |
    /// |----------|-------|
    /// | Paper width | 80mm |
    /// | Print width | ~70mm (560 dots) |
    /// | Resolution | 203 DPI |
    /// | Interface | USB |
    /// | Cutter | Auto-cutter (full/partial) |
    pub const TM_T20III: Self = Self {
        name: "Epson TM-T20III",
        width_dots: 560,
        width_bytes: 70,
        dpi: 203,
        vendor_id: 0x04B8,
        product_id: 0x0E28,
    };

    /// Build a configuration with overridden identifiers or width.
    ///
    /// Used by the CLI so a different TM-class printer can be driven without
    /// a code change; the command set is identical across the family.
    pub fn custom(width_dots: u16, vendor_id: u16, product_id: u16) -> Self {
        Self {
            name: "Custom ESC/POS printer",
            width_dots,
            width_bytes: width_dots.div_ceil(8),
            dpi: 203,
            vendor_id,
            product_id,
        }
    }

    /// Calculate dots per millimeter
    #[inline]
    pub fn dots_per_mm(&self) -> f32 {
        self.dpi as f32 / 25.4
    }

    /// Calculate print width in millimeters
    #[inline]
    pub fn width_mm(&self) -> f32 {
        self.width_dots as f32 / self.dots_per_mm()
    }
}
