//! Deterministic test doubles for the pulse workspace.
//!
//! [`ScriptedPage`] stands in for a live browser session; the remaining
//! doubles replace the storage, fetch, summarization, notification, and
//! dispatch services. All of them record the calls they receive.

mod clock;
pub mod fixtures;
mod page;
mod services;

pub use clock::FixedClock;
pub use page::{MockBehavior, PageLog, ScriptedPage};
pub use services::{
    CannedSummarizer, MemoryStore, RecordingDispatcher, RecordingNotifier, StaticFetcher,
};
