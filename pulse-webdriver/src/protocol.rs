//! Wire shapes and request plumbing for the W3C WebDriver HTTP protocol.

use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::error::DriverError;

/// Key under which element references are serialized.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

#[derive(Deserialize)]
struct Envelope<T> {
    value: T,
}

#[derive(Deserialize)]
struct WireError {
    error: String,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
pub(crate) struct NewSession {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

#[derive(Deserialize)]
pub(crate) struct ElementRef {
    #[serde(rename = "element-6066-11e4-a52e-4f735466cecf")]
    pub id: String,
}

/// Capabilities requesting a Firefox session.
pub(crate) fn firefox_capabilities(headless: bool) -> Value {
    let args: Vec<&str> = if headless { vec!["-headless"] } else { Vec::new() };
    json!({
        "capabilities": {
            "alwaysMatch": {
                "browserName": "firefox",
                "moz:firefoxOptions": { "args": args }
            }
        }
    })
}

/// Locator body for a CSS selector lookup.
pub(crate) fn css(selector: &str) -> Value {
    json!({ "using": "css selector", "value": selector })
}

/// HTTP client bound to one driver endpoint.
#[derive(Clone, Debug)]
pub(crate) struct Transport {
    http: reqwest::Client,
    base: String,
}

impl Transport {
    pub(crate) fn new(http: reqwest::Client, base: &str) -> Self {
        Self {
            http,
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn base(&self) -> &str {
        &self.base
    }

    /// Issue a command and unwrap the `value` member of the reply.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, DriverError> {
        let url = format!("{}{path}", self.base);
        let mut req = self.http.request(method, &url);
        if let Some(body) = body {
            req = req.json(&body);
        }
        let resp = req.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            return Err(match serde_json::from_slice::<Envelope<WireError>>(&bytes) {
                Ok(env) => DriverError::Protocol {
                    status: status.as_u16(),
                    error: env.value.error,
                    message: env.value.message,
                },
                Err(_) => DriverError::Protocol {
                    status: status.as_u16(),
                    error: "unknown error".to_string(),
                    message: String::from_utf8_lossy(&bytes).into_owned(),
                },
            });
        }

        serde_json::from_slice::<Envelope<T>>(&bytes)
            .map(|env| env.value)
            .map_err(|e| DriverError::Decode(e.to_string()))
    }

    /// Send a command whose reply carries no useful value.
    pub(crate) async fn command(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<(), DriverError> {
        self.call::<Value>(method, path, body).await.map(|_| ())
    }
}
