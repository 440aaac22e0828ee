//! # Papelito - Thermal Image Print Server
//!
//! Papelito accepts remote image URLs over HTTP and renders each image on an
//! ESC/POS thermal receipt printer over USB. It provides:
//!
//! - **Rendering pipeline**: width-fitting, rotation, and perceptual
//!   grayscale reduction, then 1-bit raster encoding
//! - **Protocol implementation**: ESC/POS command builders (feed, align,
//!   cut, reset, raster bit image)
//! - **Device session**: exclusive, paced, ordered access to the printer
//! - **HTTP surface**: axum server with `/print-images` and `/cut-paper`
//!
//! ## Quick Start
//!
//! ```no_run
//! use papelito::{
//!     printer::PrinterConfig,
//!     render::{prepare, raster},
//!     session::DeviceSession,
//!     transport::UsbTransport,
//! };
//!
//! let config = PrinterConfig::TM_T20III;
//!
//! // Open connection to the printer (resets it to a known state)
//! let transport = UsbTransport::open(config.vendor_id, config.product_id)?;
//! let mut session = DeviceSession::open(transport)?;
//!
//! // Run one image through the pipeline
//! let bitmap = prepare::load(&std::fs::read("photo.jpg")?)?;
//! let map = prepare::prepare(&bitmap, config.width_dots)?;
//! let frame = raster::encode(&map)?;
//!
//! session.print_frame(&frame)?;
//! session.cut()?;
//! # Ok::<(), papelito::PapelitoError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`render`] | Image preparation and raster encoding |
//! | [`protocol`] | ESC/POS command builders |
//! | [`session`] | Device session and command sequencing |
//! | [`job`] | Per-job orchestration and failure policy |
//! | [`transport`] | USB communication backend |
//! | [`fetch`] | Remote image download |
//! | [`server`] | HTTP surface |
//! | [`printer`] | Printer hardware profiles |
//! | [`error`] | Error types |
//!
//! ## Supported Printers
//!
//! Tested with the Epson TM-T20III (80mm paper, 203 DPI, USB). Other
//! ESC/POS printers with raster bit image support should work with an
//! appropriate [`printer::PrinterConfig`].

pub mod error;
pub mod fetch;
pub mod job;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod server;
pub mod session;
pub mod transport;

// Re-exports for convenience
pub use error::PapelitoError;
pub use printer::PrinterConfig;
pub use session::DeviceSession;
pub use transport::UsbTransport;
