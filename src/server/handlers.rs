//! Print and cutter API handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::state::AppState;
use crate::error::PapelitoError;
use crate::job::{self, JobImage, JobReport};

/// Request body for `POST /print-images`.
///
/// The schema is strict: `image_urls` is required and must be an array of
/// strings. Anything else is rejected before the pipeline runs.
#[derive(Debug, Deserialize)]
pub struct PrintImagesRequest {
    pub image_urls: Vec<String>,
}

type JsonError = (StatusCode, Json<serde_json::Value>);

fn bad_request(message: String) -> JsonError {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message })),
    )
}

fn server_error(message: String) -> JsonError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": message })),
    )
}

/// GET / - liveness probe.
pub async fn index() -> &'static str {
    "papelito is running\n"
}

/// POST /print-images - fetch each URL and print it.
///
/// Fetching happens up front, before the device lock is taken, so a slow
/// remote host never holds the printer hostage for other callers. The job
/// itself (decode, rasterize, transmit, settle) runs on the blocking pool
/// with the session locked end to end.
pub async fn print_images(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PrintImagesRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, JsonError> {
    // Explicit 400 for a missing/malformed body (axum's default is 422)
    let Json(request) = payload.map_err(|e| bad_request(format!("No image URLs provided: {}", e)))?;

    println!("[print] Job with {} image(s)", request.image_urls.len());

    let mut images = Vec::with_capacity(request.image_urls.len());
    for url in request.image_urls {
        let payload = state.fetcher.fetch(&url).await;
        images.push(JobImage {
            source: url,
            payload,
        });
    }

    let session = state.session.clone();
    let printer = state.config.printer;
    let result = tokio::task::spawn_blocking(move || {
        let mut session = session
            .lock()
            .map_err(|_| PapelitoError::Transport("session mutex poisoned".to_string()))?;

        let result = job::run(&mut session, &printer, images);

        // Leave the device usable for the next job even after a failure;
        // a failed reset here is reported with the original error.
        if result.is_err() {
            let _ = session.reset();
        }
        result
    })
    .await
    .map_err(|e| server_error(format!("Task error: {}", e)))?;

    let report = result.map_err(|e| server_error(e.to_string()))?;

    if state.config.strict_fetch && !report.skipped.is_empty() {
        return Err(server_error(describe_skips(&report)));
    }

    Ok(Json(serde_json::json!({
        "message": "Images printed successfully",
        "printed": report.printed,
        "skipped": report
            .skipped
            .iter()
            .map(|s| s.source.clone())
            .collect::<Vec<_>>(),
    })))
}

/// POST /cut-paper - cut the paper, nothing else.
pub async fn cut_paper(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, JsonError> {
    let session = state.session.clone();
    tokio::task::spawn_blocking(move || {
        let mut session = session
            .lock()
            .map_err(|_| PapelitoError::Transport("session mutex poisoned".to_string()))?;
        session.cut()
    })
    .await
    .map_err(|e| server_error(format!("Task error: {}", e)))?
    .map_err(|e| server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "message": "Paper cut successfully"
    })))
}

fn describe_skips(report: &JobReport) -> String {
    let sources: Vec<&str> = report.skipped.iter().map(|s| s.source.as_str()).collect();
    format!(
        "{} printed, {} failed to fetch: {}",
        report.printed,
        sources.len(),
        sources.join(", ")
    )
}
