use async_trait::async_trait;
use serde::Serialize;

use pulse_core::{Notifier, PulseError, Stage};

use crate::http;

#[derive(Serialize)]
struct Notification<'a> {
    subject: &'a str,
    message: &'a str,
}

/// Posts `{"subject", "message"}` JSON to a webhook.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    http: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    /// # Errors
    /// Returns `PulseError::InvalidArg` for a malformed URL.
    pub fn new(url: &str) -> Result<Self, PulseError> {
        Ok(Self {
            http: http::client()?,
            url: http::base_url(url)?,
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), PulseError> {
        let resp = self
            .http
            .post(&self.url)
            .json(&Notification { subject, message })
            .send()
            .await
            .map_err(|e| PulseError::service(Stage::Notify, e.to_string()))?;
        if !resp.status().is_success() {
            return Err(PulseError::service(Stage::Notify, http::failure(resp).await));
        }
        tracing::info!(subject, "notification published");
        Ok(())
    }
}
