//! # Image Rendering Pipeline
//!
//! The pure, stateless half of the print pipeline: [`prepare`] normalizes an
//! arbitrary bitmap into a printer-width grayscale intensity map, and
//! [`raster`] reduces that map to packed 1-bit rows ready for wire framing.
//! Neither touches the device; both may run concurrently across jobs.

pub mod prepare;
pub mod raster;
