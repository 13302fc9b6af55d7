//! pulse-services
//!
//! Production adapters for the service ports in `pulse-core`:
//! object storage (local directory or path-style HTTP), page fetching,
//! LLM summarization, webhook notification, and batch job dispatch.
#![warn(missing_docs)]

mod dispatch;
mod fetch;
mod http;
mod notify;
mod store;
mod summarize;

pub use dispatch::HttpJobDispatcher;
pub use fetch::HttpPageFetcher;
pub use notify::WebhookNotifier;
pub use store::{FsObjectStore, HttpObjectStore};
pub use summarize::AnthropicSummarizer;
