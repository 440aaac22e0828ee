//! # ESC/POS Protocol
//!
//! Command builders for the Epson ESC/POS command set used by TM-series
//! thermal receipt printers. Every function returns the exact byte sequence
//! to put on the wire; nothing here touches the device.

pub mod commands;
pub mod graphics;
