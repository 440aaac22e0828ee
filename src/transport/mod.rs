//! # Transport Layer
//!
//! Byte-stream communication with the physical printer.
//!
//! The device accepts writes serially and never acknowledges individual
//! raster lines, so the only operation a transport needs is an ordered,
//! complete write. [`Transport`] is the seam between the session logic and
//! the hardware: production code uses [`UsbTransport`], tests substitute an
//! in-memory capture.

pub mod usb;

pub use usb::UsbTransport;

use crate::error::PapelitoError;

/// An exclusive, ordered byte sink connected to one printer.
pub trait Transport: Send {
    /// Write every byte of `data` to the device, in order.
    ///
    /// Returns only after the full buffer has been handed to the device (or
    /// its driver); a short write is an error.
    fn write_all(&mut self, data: &[u8]) -> Result<(), PapelitoError>;
}
