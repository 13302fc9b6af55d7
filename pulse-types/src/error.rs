use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Stage;

/// Unified error type for the pulse workspace.
///
/// Covers source/session failures, storage and table problems, downstream
/// service failures, and configuration validation.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PulseError {
    /// The browser session could not be acquired at all.
    #[error("session unavailable: {0}")]
    Session(String),

    /// The data source (page load, script execution, element query) failed.
    #[error("source failed during {operation}: {msg}")]
    Source {
        /// Operation label, e.g. "open" or "read_visible_records".
        operation: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A single record's fields could not be located or read.
    #[error("record extraction failed: {0}")]
    Extraction(String),

    /// Object storage rejected or failed a transfer.
    #[error("storage {operation} failed for {bucket}/{key}: {msg}")]
    Storage {
        /// Operation label ("put", "get").
        operation: String,
        /// Target bucket.
        bucket: String,
        /// Target object key.
        key: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Local filesystem failure.
    #[error("io error: {0}")]
    Io(String),

    /// Delimited-table encode/decode failure.
    #[error("table error: {0}")]
    Table(String),

    /// A table lacked columns required by the consumer.
    #[error("missing columns: {0:?}")]
    MissingColumns(Vec<String>),

    /// An external service (LLM, notifier, job dispatcher) failed.
    #[error("{stage} service failed: {msg}")]
    Service {
        /// Pipeline stage that issued the call.
        stage: Stage,
        /// Human-readable error message.
        msg: String,
    },

    /// A bounded wait elapsed before the awaited condition held.
    #[error("timed out waiting for {what}")]
    Timeout {
        /// Description of the awaited condition.
        what: String,
    },

    /// Invalid input argument or configuration value.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl PulseError {
    /// Helper: build a `Source` error for an operation label.
    pub fn source(operation: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Source {
            operation: operation.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Storage` error.
    pub fn storage(
        operation: impl Into<String>,
        bucket: impl Into<String>,
        key: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Storage {
            operation: operation.into(),
            bucket: bucket.into(),
            key: key.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Service` error tagged with the calling stage.
    pub fn service(stage: Stage, msg: impl Into<String>) -> Self {
        Self::Service {
            stage,
            msg: msg.into(),
        }
    }

    /// Helper: build a `Timeout` error.
    pub fn timeout(what: impl Into<String>) -> Self {
        Self::Timeout { what: what.into() }
    }

    /// Returns true if the process cannot continue after this error.
    ///
    /// Only session acquisition and configuration problems are fatal; every
    /// other failure is logged and the run proceeds best-effort.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Session(_) | Self::InvalidArg(_))
    }

    /// Render the error for logs, cut to `max` characters.
    #[must_use]
    pub fn truncated(&self, max: usize) -> String {
        let full = self.to_string();
        if full.chars().count() <= max {
            return full;
        }
        let mut out: String = full.chars().take(max).collect();
        out.push('…');
        out
    }
}

impl From<std::io::Error> for PulseError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
