//! Server state and configuration.

use std::sync::{Arc, Mutex};

use crate::error::PapelitoError;
use crate::fetch::ImageFetcher;
use crate::printer::PrinterConfig;
use crate::session::DeviceSession;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:5500")
    pub listen_addr: String,
    /// Hardware profile of the attached printer
    pub printer: PrinterConfig,
    /// When true, a job with any skipped fetch responds 500 instead of 200.
    ///
    /// Off by default: the historical behavior is to log the skip and report
    /// success for whatever did print.
    pub strict_fetch: bool,
}

/// Application state shared across handlers.
///
/// The device session lives behind a std mutex and is only locked from the
/// blocking thread pool; holding it for a whole job is what serializes
/// device access (spec: no two jobs may interleave bytes on the wire).
pub struct AppState {
    pub config: ServerConfig,
    pub fetcher: ImageFetcher,
    pub session: Arc<Mutex<DeviceSession>>,
}

impl AppState {
    pub fn new(config: ServerConfig, session: DeviceSession) -> Result<Self, PapelitoError> {
        Ok(Self {
            config,
            fetcher: ImageFetcher::new()?,
            session: Arc::new(Mutex::new(session)),
        })
    }
}
