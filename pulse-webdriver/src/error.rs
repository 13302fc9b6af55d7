use pulse_core::PulseError;
use thiserror::Error;

/// Failures talking to a WebDriver endpoint.
#[derive(Debug, Error)]
pub(crate) enum DriverError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The driver answered with a WebDriver error object.
    #[error("driver error (status {status}): {error}: {message}")]
    Protocol {
        /// HTTP status code.
        status: u16,
        /// WebDriver error code, e.g. `no such window`.
        error: String,
        /// Human-readable detail.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for DriverError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl DriverError {
    /// Map into the workspace error, labelled with the page operation.
    pub(crate) fn into_source(self, operation: &str) -> PulseError {
        PulseError::source(operation, self.to_string())
    }
}
