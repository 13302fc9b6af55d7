use async_trait::async_trait;
use pulse_core::{PageFetcher, PulseError};

use crate::http;

/// Plain `GET` page fetcher.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    http: reqwest::Client,
}

impl HttpPageFetcher {
    /// # Errors
    /// Fails only if the HTTP client cannot be built.
    pub fn new() -> Result<Self, PulseError> {
        Ok(Self {
            http: http::client()?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, PulseError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| PulseError::source("fetch", e.to_string()))?;
        if !resp.status().is_success() {
            return Err(PulseError::source("fetch", http::failure(resp).await));
        }
        let body = resp
            .text()
            .await
            .map_err(|e| PulseError::source("fetch", e.to_string()))?;
        tracing::debug!(url, bytes = body.len(), "fetched page");
        Ok(body)
    }
}
