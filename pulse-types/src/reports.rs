//! Report envelopes produced by the orchestrator.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::PulseError;

/// Why the collector left the `Collecting` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The accepted record count reached the target.
    TargetReached,
    /// The time budget elapsed first.
    BudgetExhausted,
}

/// Outcome of staging one local artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactReport {
    /// Local copy written before transfer.
    pub local_path: PathBuf,
    /// Destination bucket.
    pub bucket: String,
    /// Destination key.
    pub key: String,
    /// Whether the transfer succeeded.
    pub uploaded: bool,
    /// Whether the local copy was removed afterwards.
    pub local_removed: bool,
}

/// Summary of a forum comment harvest.
///
/// Carries collection statistics, the staged table when one was written, and
/// any non-fatal warnings encountered along the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentsReport {
    /// Unique records accepted.
    pub records: usize,
    /// Sampling passes performed.
    pub passes: usize,
    /// Entries whose fields could not be read.
    pub skipped: usize,
    /// Collector exit reason.
    pub stop: StopReason,
    /// Staged table, absent if serialization failed.
    pub table: Option<ArtifactReport>,
    /// Non-fatal issues encountered while building the report.
    pub warnings: Vec<PulseError>,
}

/// Summary of a news listing harvest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NewsReport {
    /// Items extracted from the listing.
    pub items: usize,
    /// Saved page artifact.
    pub page: Option<ArtifactReport>,
    /// Staged table artifact.
    pub table: Option<ArtifactReport>,
    /// Non-fatal issues encountered while building the report.
    pub warnings: Vec<PulseError>,
}

/// Summary of a completed daily digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestReport {
    /// Analyzed rows folded into the prompt.
    pub rows: usize,
    /// Bucket holding the stored summary.
    pub bucket: String,
    /// Key of the stored summary.
    pub key: String,
    /// Generated summary text.
    pub summary: String,
}

/// A batch processing job request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    /// Unique job name.
    pub name: String,
    /// Container image.
    pub image_uri: String,
    /// Execution role.
    pub role_arn: String,
    /// Instance type label.
    pub instance_type: String,
    /// Number of instances.
    pub instance_count: u32,
    /// Volume size in GB.
    pub volume_gb: u32,
    /// Input prefix URI and container mount path.
    pub input: JobChannel,
    /// Output prefix URI and container source path.
    pub output: JobChannel,
}

/// A storage prefix bound to a path inside the job container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobChannel {
    /// Channel name ("input", "output").
    pub name: String,
    /// Storage prefix URI.
    pub uri: String,
    /// Container path.
    pub local_path: String,
}

/// Acknowledgement returned by a job dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobReceipt {
    /// Submitted job name.
    pub name: String,
    /// Service-assigned identifier, if any.
    pub id: Option<String>,
}
