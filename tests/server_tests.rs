//! # HTTP API Tests
//!
//! Drives the axum router end to end against an in-memory transport,
//! asserting both the HTTP contract and the exact bytes that reach the
//! "device". No hardware and no network are required: fetch failures are
//! produced with unreachable loopback URLs.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use papelito::error::PapelitoError;
use papelito::server::{AppState, ServerConfig};
use papelito::session::DeviceSession;
use papelito::transport::Transport;
use papelito::{server, PrinterConfig};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

/// In-memory transport capturing everything written to the device.
#[derive(Clone, Default)]
struct CaptureTransport {
    writes: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl CaptureTransport {
    fn wire_bytes(&self) -> Vec<u8> {
        self.writes.lock().unwrap().concat()
    }
}

impl Transport for CaptureTransport {
    fn write_all(&mut self, data: &[u8]) -> Result<(), PapelitoError> {
        self.writes.lock().unwrap().push(data.to_vec());
        Ok(())
    }
}

fn test_state(strict_fetch: bool) -> (Arc<AppState>, CaptureTransport) {
    let transport = CaptureTransport::default();
    let mut session = DeviceSession::new(transport.clone());
    session.set_settle_delay(Duration::ZERO);

    let config = ServerConfig {
        listen_addr: "127.0.0.1:0".to_string(),
        printer: PrinterConfig::TM_T20III,
        strict_fetch,
    };
    let state = Arc::new(AppState::new(config, session).unwrap());
    (state, transport)
}

fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn liveness_probe_responds() {
    let (state, _transport) = test_state(false);
    let response = server::router(state)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_image_urls_is_bad_request() {
    let (state, transport) = test_state(false);
    let response = server::router(state)
        .oneshot(json_post("/print-images", r#"{"urls": []}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body.get("error").is_some());
    // Nothing reached the device
    assert!(transport.wire_bytes().is_empty());
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let (state, _transport) = test_state(false);
    let response = server::router(state)
        .oneshot(json_post("/print-images", "not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_job_succeeds_with_only_a_reset() {
    let (state, transport) = test_state(false);
    let response = server::router(state)
        .oneshot(json_post("/print-images", r#"{"image_urls": []}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["printed"], 0);

    // Zero device writes for images, but the trailing reset still lands
    assert_eq!(transport.wire_bytes(), vec![0x1B, 0x40]);
}

#[tokio::test]
async fn unreachable_urls_are_skipped_and_job_succeeds() {
    let (state, transport) = test_state(false);
    // Port 1 on loopback refuses connections immediately
    let body = r#"{"image_urls": ["http://127.0.0.1:1/a.jpg", "http://127.0.0.1:1/b.jpg"]}"#;
    let response = server::router(state)
        .oneshot(json_post("/print-images", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["printed"], 0);
    assert_eq!(body["skipped"].as_array().unwrap().len(), 2);

    // No image sequences on the wire, only the trailing reset
    assert_eq!(transport.wire_bytes(), vec![0x1B, 0x40]);
}

#[tokio::test]
async fn strict_fetch_downgrades_skips_to_errors() {
    let (state, _transport) = test_state(true);
    let body = r#"{"image_urls": ["http://127.0.0.1:1/a.jpg"]}"#;
    let response = server::router(state)
        .oneshot(json_post("/print-images", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn cut_paper_emits_only_the_cut_command() {
    let (state, transport) = test_state(false);
    let response = server::router(state)
        .oneshot(json_post("/cut-paper", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    // Feed-to-cutter + full cut; never a reset or feed-lines command
    assert_eq!(transport.wire_bytes(), vec![0x1D, 0x56, 0x41, 0x00]);
}
