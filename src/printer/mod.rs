//! # Printer Configurations
//!
//! Hardware specifications for supported thermal printers.

pub mod config;

pub use config::PrinterConfig;
