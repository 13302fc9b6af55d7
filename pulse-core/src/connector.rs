use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tokio::time::Instant;

use crate::PulseError;
use crate::digest::SummaryRequest;
use pulse_types::{JobReceipt, JobSpec, RawRecord};

/// Result of locating one record's fields on the page.
///
/// `Err` means the record's fields could not be located at all; the collector
/// skips such entries without aborting the pass.
pub type Extracted = Result<RawRecord, PulseError>;

/// Role trait for an append-only, re-sampled record source.
#[async_trait]
pub trait SourceReader: Send + Sync {
    /// Ask the source to make more records visible (e.g. scroll to the bottom).
    async fn reveal_more(&self) -> Result<(), PulseError>;

    /// Re-read every currently visible record from scratch.
    ///
    /// The outer `Err` reports that the listing itself could not be read.
    async fn read_visible_records(&self) -> Result<Vec<Extracted>, PulseError>;
}

/// A browser-backed page that can be loaded, awaited, and photographed.
#[async_trait]
pub trait ForumPage: SourceReader {
    /// Navigate to `url`.
    async fn open(&self, url: &str) -> Result<(), PulseError>;

    /// Wait until at least one record container is present.
    ///
    /// # Errors
    /// Returns `PulseError::Timeout` if nothing appeared within `timeout`.
    async fn wait_for_records(&self, timeout: Duration) -> Result<(), PulseError>;

    /// Save a diagnostic artifact (screenshot) of the current page to `path`.
    async fn capture_diagnostic(&self, path: &Path) -> Result<(), PulseError>;
}

/// Wall-clock and monotonic time source.
pub trait Clock: Send + Sync {
    /// Current wall-clock time.
    fn now_utc(&self) -> DateTime<Utc>;

    /// Current wall-clock time expressed in `zone`.
    fn now_in(&self, zone: Tz) -> DateTime<Tz> {
        self.now_utc().with_timezone(&zone)
    }

    /// Monotonic instant used for time budgets.
    ///
    /// Defaults to Tokio's clock so paused-time tests advance it.
    fn instant(&self) -> Instant {
        Instant::now()
    }
}

/// The host's clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Durable bucket/key object storage.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Store `body` at `bucket/key`, replacing any existing object.
    async fn put(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), PulseError>;

    /// Load the object at `bucket/key`.
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, PulseError>;

    /// Transfer a local file to `bucket/key`.
    async fn upload_file(&self, path: &Path, bucket: &str, key: &str) -> Result<(), PulseError> {
        let body = tokio::fs::read(path).await?;
        self.put(bucket, key, body).await
    }
}

/// One-shot document fetcher for static pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the body of `url`.
    ///
    /// # Errors
    /// Returns `PulseError::Source` on transport failure or non-success status.
    async fn fetch(&self, url: &str) -> Result<String, PulseError>;
}

/// Managed LLM used for the daily digest.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Produce summary text for the request.
    async fn summarize(&self, req: &SummaryRequest) -> Result<String, PulseError>;
}

/// Subscriber notification channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Publish `message` under `subject`.
    async fn publish(&self, subject: &str, message: &str) -> Result<(), PulseError>;
}

/// Managed batch-processing service.
#[async_trait]
pub trait JobDispatcher: Send + Sync {
    /// Submit the job and return the service acknowledgement.
    async fn dispatch(&self, spec: &JobSpec) -> Result<JobReceipt, PulseError>;
}
