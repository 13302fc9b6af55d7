//! pulse-core
//!
//! Core traits and algorithms shared across the pulse workspace.
//!
//! - `connector`: port traits for the page source, clock, object storage,
//!   page fetching, summarization, notification, and job dispatch.
//! - `timestamp`: display-timestamp normalization into the fixed zone.
//! - `collect`: the incremental, deduplicating collector.
//! - `table`, `news`, `digest`, `naming`: table codecs, listing extraction,
//!   digest request assembly, and artifact naming.
//!
//! Async runtime (Tokio)
//! ---------------------
//! The collector waits between passes with `tokio::time::sleep` and measures
//! its budget with `tokio::time::Instant`, so it must run under a Tokio 1.x
//! runtime. Tests can pause Tokio's clock to exercise budgets instantly.
#![warn(missing_docs)]

/// Incremental deduplicating collection.
pub mod collect;
/// Port traits implemented by adapters and test doubles.
pub mod connector;
/// Daily digest request assembly.
pub mod digest;
/// Artifact and job naming.
pub mod naming;
/// News listing extraction.
pub mod news;
/// Delimited-table codecs.
pub mod table;
/// Display-timestamp normalization.
pub mod timestamp;

pub use collect::{Accumulator, Collection, collect, extract_record};
pub use connector::{
    Clock, Extracted, ForumPage, JobDispatcher, Notifier, ObjectStore, PageFetcher, SourceReader,
    Summarizer, SystemClock,
};
pub use digest::SummaryRequest;
pub use timestamp::normalize_timestamp;

pub use pulse_types::{
    ArtifactReport, CollectorConfig, CommentRecord, CommentsReport, DedupKey, DigestConfig,
    DigestReport, DispatchConfig, ForumConfig, ForumSelectors, JobChannel, JobReceipt, JobSpec,
    NewsConfig, NewsItem, NewsReport, NewsSelectors, PostedAt, PulseConfig, PulseError, RawRecord,
    SentimentRow, Stage, StopReason, StorageConfig, records,
};
