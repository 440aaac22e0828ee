//! # Print Jobs
//!
//! A job is one ordered batch of images printed sequentially to one device.
//! Each image runs the full pipeline (prepare -> rasterize -> transmit ->
//! settle) before the next begins; the caller holds the session for the
//! whole job so no other job's bytes interleave.
//!
//! ## Failure Semantics
//!
//! - A failed **fetch** skips that image and continues; the skip is recorded
//!   in the [`JobReport`] rather than silently swallowed.
//! - A failed **decode or encode** aborts the remainder of the job.
//! - A failed **device write** aborts immediately and surfaces as
//!   [`PapelitoError::Device`] carrying how many images made it onto paper.
//!   Printing is physically irreversible, so there is no rollback.
//!
//! The trailing `Reset` is issued even for an empty job so the device is
//! always left idle. Cutting is never implied; callers request it.

use crate::error::PapelitoError;
use crate::printer::PrinterConfig;
use crate::render::{prepare, raster};
use crate::session::DeviceSession;

/// One source image for a job: its URL (or path) and the fetch outcome.
///
/// Fetching happens before the device lock is taken, so a job arrives at the
/// runner as a list of per-image results.
pub struct JobImage {
    pub source: String,
    pub payload: Result<Vec<u8>, PapelitoError>,
}

/// A skipped image and why it was skipped.
#[derive(Debug, Clone)]
pub struct SkippedImage {
    pub index: usize,
    pub source: String,
    pub reason: String,
}

/// Outcome of a completed job.
#[derive(Debug, Clone, Default)]
pub struct JobReport {
    /// Images fully transmitted to the device.
    pub printed: usize,
    /// Images skipped because their fetch failed.
    pub skipped: Vec<SkippedImage>,
}

/// Run a print job to completion or first fatal failure.
///
/// The session is held exclusively by the caller for the duration; the
/// settle delay runs between every pair of consecutively printed images and
/// a `Reset` always terminates the job.
pub fn run(
    session: &mut DeviceSession,
    config: &PrinterConfig,
    images: Vec<JobImage>,
) -> Result<JobReport, PapelitoError> {
    let mut report = JobReport::default();

    for (index, image) in images.into_iter().enumerate() {
        let bytes = match image.payload {
            Ok(bytes) => bytes,
            Err(e) => {
                println!("[job] Skipping {}: {}", image.source, e);
                report.skipped.push(SkippedImage {
                    index,
                    source: image.source,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let bitmap = prepare::load(&bytes)?;
        let map = prepare::prepare(&bitmap, config.width_dots)?;
        let frame = raster::encode(&map)?;

        if report.printed > 0 {
            session.settle();
        }

        session.print_frame(&frame).map_err(|e| {
            PapelitoError::Device {
                printed: report.printed,
                message: e.to_string(),
            }
        })?;
        report.printed += 1;

        println!(
            "[job] Printed {} ({}x{} dots)",
            image.source, frame.width_dots, frame.rows
        );
    }

    session.reset().map_err(|e| PapelitoError::Device {
        printed: report.printed,
        message: e.to_string(),
    })?;

    Ok(report)
}
