//! Pulse harvests finance forum comments and news headlines, stages them in
//! object storage, and turns analyzed results into a daily digest.
//!
//! Overview
//! - `harvest_comments` drives a `ForumPage` through load, readiness wait,
//!   incremental deduplicating collection, CSV export, upload, and cleanup.
//! - `harvest_news` fetches the listing page, saves it, extracts headlines,
//!   and stages both the page and the table.
//! - `digest` reads an analyzed table, asks the summarizer for a subscriber
//!   email, stores it, and publishes it through the notifier.
//! - `dispatch_analysis` submits the batch sentiment job.
//!
//! Failure policy
//! - Harvests are best-effort: load, wait, upload, and cleanup failures are
//!   logged and collected as report warnings. A failed upload keeps the
//!   local copy.
//! - Digest and dispatch abort on the first failing step.
//!
//! ```rust,ignore
//! let pulse = pulse::Pulse::builder()
//!     .with_store(store)
//!     .with_fetcher(fetcher)
//!     .build()?;
//! let session = client.start_session(&pulse.config().forum).await?;
//! let report = pulse.harvest_comments(&session).await;
//! session.quit().await?;
//! ```
#![warn(missing_docs)]

mod core;
mod pipeline;

pub use crate::core::{Pulse, PulseBuilder};

pub use pulse_types::{
    ArtifactReport, CommentsReport, DigestReport, JobReceipt, NewsReport, PulseConfig, PulseError,
    StopReason,
};
