use core::fmt;
use serde::{Deserialize, Serialize};

/// Pipeline stage labels for errors, reports, and telemetry.
///
/// These map one-to-one with the steps the orchestrator runs and allow
/// consistent Display formatting across crates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Stage {
    /// Loading the source page or document.
    Fetch,
    /// Incremental record collection.
    Collect,
    /// Writing records to a delimited table.
    Serialize,
    /// Transferring an artifact to object storage.
    Upload,
    /// Removing local artifacts after transfer.
    Cleanup,
    /// Reading an artifact back from object storage.
    Download,
    /// LLM summarization of analyzed rows.
    Summarize,
    /// Subscriber notification.
    Notify,
    /// Batch-job submission.
    Dispatch,
}

impl Stage {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Collect => "collect",
            Self::Serialize => "serialize",
            Self::Upload => "upload",
            Self::Cleanup => "cleanup",
            Self::Download => "download",
            Self::Summarize => "summarize",
            Self::Notify => "notify",
            Self::Dispatch => "dispatch",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
