use std::time::Duration;

use pulse_core::PulseError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const ERROR_BODY_LIMIT: usize = 300;

/// Shared HTTP client with the workspace request timeout.
pub(crate) fn client() -> Result<reqwest::Client, PulseError> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("pulse/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| PulseError::Other(format!("http client: {e}")))
}

/// Validate and normalize a base URL (no trailing slash).
pub(crate) fn base_url(raw: &str) -> Result<String, PulseError> {
    url::Url::parse(raw).map_err(|e| PulseError::InvalidArg(format!("endpoint {raw:?}: {e}")))?;
    Ok(raw.trim_end_matches('/').to_string())
}

/// `status: body` for a failed response, body cut short.
pub(crate) async fn failure(resp: reqwest::Response) -> String {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let body: String = body.chars().take(ERROR_BODY_LIMIT).collect();
    format!("status {status}: {body}")
}
