//! # Remote Image Fetching
//!
//! Downloads source images for a print job. The fetcher is deliberately
//! dumb: it returns raw bytes or a [`PapelitoError::Fetch`], and never looks
//! inside the payload — format sniffing and decoding belong to the image
//! preparer.

use std::time::Duration;

use crate::error::PapelitoError;

/// Request timeout for a single image download.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client wrapper for downloading source images.
#[derive(Clone)]
pub struct ImageFetcher {
    client: reqwest::Client,
}

impl ImageFetcher {
    /// Build a fetcher with the crate's user agent and a request timeout.
    pub fn new() -> Result<Self, PapelitoError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("papelito/", env!("CARGO_PKG_VERSION")))
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| PapelitoError::Fetch(format!("HTTP client error: {}", e)))?;
        Ok(Self { client })
    }

    /// Download one image, returning its raw encoded bytes.
    ///
    /// Non-2xx statuses, network failures, and timeouts all surface as
    /// [`PapelitoError::Fetch`]; the job runner decides whether that skips
    /// the image or fails the job.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, PapelitoError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PapelitoError::Fetch(format!("Failed to download {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(PapelitoError::Fetch(format!(
                "Failed to download {}: HTTP {}",
                url,
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PapelitoError::Fetch(format!("Failed to read body of {}: {}", url, e)))?;

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() {
        let fetcher = ImageFetcher::new().unwrap();
        // Port 1 on loopback refuses immediately; no external network needed.
        let err = fetcher.fetch("http://127.0.0.1:1/a.jpg").await.unwrap_err();
        assert!(matches!(err, PapelitoError::Fetch(_)));
    }

    #[test]
    fn test_client_builds() {
        assert!(ImageFetcher::new().is_ok());
    }
}
