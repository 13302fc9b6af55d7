//! Messages-API summarizer.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use pulse_core::{PulseError, Stage, Summarizer, SummaryRequest};

use crate::http;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1";
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: [WireMessage<'a>; 1],
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Single-turn summarizer over the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicSummarizer {
    http: reqwest::Client,
    headers: HeaderMap,
    base_url: String,
}

impl AnthropicSummarizer {
    /// # Errors
    /// Returns `PulseError::InvalidArg` if the key is not a valid header value.
    pub fn new(api_key: &str) -> Result<Self, PulseError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key)
                .map_err(|_| PulseError::InvalidArg("api key is not a valid header value".into()))?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static(ANTHROPIC_VERSION));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(Self {
            http: http::client()?,
            headers,
            base_url: ANTHROPIC_API_URL.to_string(),
        })
    }

    /// Point at a different API root (proxies, tests).
    ///
    /// # Errors
    /// Returns `PulseError::InvalidArg` for a malformed URL.
    pub fn with_base_url(mut self, url: &str) -> Result<Self, PulseError> {
        self.base_url = http::base_url(url)?;
        Ok(self)
    }
}

#[async_trait]
impl Summarizer for AnthropicSummarizer {
    async fn summarize(&self, req: &SummaryRequest) -> Result<String, PulseError> {
        let body = MessagesRequest {
            model: &req.model,
            max_tokens: req.max_tokens,
            temperature: req.temperature,
            messages: [WireMessage {
                role: "user",
                content: &req.prompt,
            }],
        };
        tracing::debug!(model = %req.model, prompt_chars = req.prompt.len(), "summary request");

        let resp = self
            .http
            .post(format!("{}/messages", self.base_url))
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| PulseError::service(Stage::Summarize, e.to_string()))?;
        if !resp.status().is_success() {
            return Err(PulseError::service(Stage::Summarize, http::failure(resp).await));
        }
        let parsed: MessagesResponse = resp
            .json()
            .await
            .map_err(|e| PulseError::service(Stage::Summarize, e.to_string()))?;

        parsed
            .content
            .into_iter()
            .find(|b| b.kind == "text")
            .map(|b| b.text)
            .ok_or_else(|| PulseError::service(Stage::Summarize, "response carried no text"))
    }
}
