use async_trait::async_trait;
use serde::Deserialize;

use pulse_core::{JobDispatcher, JobReceipt, JobSpec, PulseError, Stage};

use crate::http;

#[derive(Deserialize)]
struct Ack {
    #[serde(default)]
    id: Option<String>,
}

/// Submits jobs as JSON to `POST {base}/jobs`.
#[derive(Debug, Clone)]
pub struct HttpJobDispatcher {
    http: reqwest::Client,
    base: String,
}

impl HttpJobDispatcher {
    /// # Errors
    /// Returns `PulseError::InvalidArg` for a malformed URL.
    pub fn new(base: &str) -> Result<Self, PulseError> {
        Ok(Self {
            http: http::client()?,
            base: http::base_url(base)?,
        })
    }
}

#[async_trait]
impl JobDispatcher for HttpJobDispatcher {
    async fn dispatch(&self, spec: &JobSpec) -> Result<JobReceipt, PulseError> {
        let resp = self
            .http
            .post(format!("{}/jobs", self.base))
            .json(spec)
            .send()
            .await
            .map_err(|e| PulseError::service(Stage::Dispatch, e.to_string()))?;
        if !resp.status().is_success() {
            return Err(PulseError::service(Stage::Dispatch, http::failure(resp).await));
        }
        // Some services acknowledge with an empty body.
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| PulseError::service(Stage::Dispatch, e.to_string()))?;
        let id = serde_json::from_slice::<Ack>(&bytes).ok().and_then(|a| a.id);
        Ok(JobReceipt {
            name: spec.name.clone(),
            id,
        })
    }
}
