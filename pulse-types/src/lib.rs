//! Pulse-specific records, configuration primitives, reports, and errors.
#![warn(missing_docs)]

mod config;
mod error;
pub mod records;
mod reports;
mod stage;

pub use config::{
    CollectorConfig, DigestConfig, DispatchConfig, ForumConfig, ForumSelectors, NewsConfig,
    NewsSelectors, PulseConfig, StorageConfig,
};
pub use error::PulseError;
pub use records::{CommentRecord, DedupKey, NewsItem, PostedAt, RawRecord, SentimentRow};
pub use reports::{
    ArtifactReport, CommentsReport, DigestReport, JobChannel, JobReceipt, JobSpec, NewsReport,
    StopReason,
};
pub use stage::Stage;
