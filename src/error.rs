//! # Error Types
//!
//! This module defines error types used throughout the papelito crate.

use thiserror::Error;

/// Main error type for papelito operations
#[derive(Debug, Error)]
pub enum PapelitoError {
    /// Malformed, undecodable, or zero-area source image
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Image dimensions exceed the raster header's 16-bit fields
    #[error(
        "Image too large for raster header: {rows} rows x {row_bytes} bytes/row (max 65535 each)"
    )]
    ImageTooLarge { rows: usize, row_bytes: usize },

    /// Image download failed (network error or non-2xx status)
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Transport-level errors (connection, USB I/O)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Device write failure that aborted a print job.
    ///
    /// `printed` is the number of images fully transmitted before the
    /// failure; those are on paper and cannot be rolled back.
    #[error("Device error after {printed} image(s): {message}")]
    Device { printed: usize, message: String },

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
