//! # HTTP Print Server
//!
//! Exposes the print pipeline over HTTP.
//!
//! ## Routes
//!
//! | Route | Method | Description |
//! |-------|--------|-------------|
//! | `/` | GET | Liveness probe |
//! | `/print-images` | POST | Fetch and print a batch of image URLs |
//! | `/cut-paper` | POST | Cut the paper (cut command only) |
//!
//! ## Usage
//!
//! ```bash
//! papelito serve --listen 0.0.0.0:5500
//! ```

mod handlers;
mod state;

pub use state::{AppState, ServerConfig};

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::error::PapelitoError;
use crate::session::DeviceSession;

/// Build the application router around shared state.
///
/// Split out of [`serve`] so tests can drive the router without a socket.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/print-images", post(handlers::print_images))
        .route("/cut-paper", post(handlers::cut_paper))
        .with_state(state)
}

/// Start the HTTP server over an already-open device session.
///
/// The session was opened (and the device reset) at startup; it is shared by
/// every request for the lifetime of the process and never reopened.
pub async fn serve(config: ServerConfig, session: DeviceSession) -> Result<(), PapelitoError> {
    let listen_addr = config.listen_addr.clone();
    let state = Arc::new(AppState::new(config, session)?);
    let app = router(state.clone());

    println!("Papelito HTTP server starting...");
    println!("Listening on: {}", listen_addr);
    println!("Printer: {}", state.config.printer.name);
    println!();

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .map_err(|e| {
            PapelitoError::Transport(format!("Failed to bind to {}: {}", listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| PapelitoError::Transport(format!("Server error: {}", e)))?;

    Ok(())
}
