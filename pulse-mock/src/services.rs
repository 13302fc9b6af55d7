use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use pulse_core::{
    JobDispatcher, JobReceipt, JobSpec, Notifier, ObjectStore, PageFetcher, PulseError,
    Summarizer, SummaryRequest,
};

/// In-memory object store keyed by `(bucket, key)`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
    failing_prefixes: Vec<String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every `put` whose key starts with `prefix`.
    #[must_use]
    pub fn fail_puts_under(mut self, prefix: impl Into<String>) -> Self {
        self.failing_prefixes.push(prefix.into());
        self
    }

    /// Seed an object before the run.
    pub async fn insert(&self, bucket: &str, key: &str, body: impl Into<Vec<u8>>) {
        self.objects
            .lock()
            .await
            .insert((bucket.to_string(), key.to_string()), body.into());
    }

    pub async fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .await
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// All stored `(bucket, key)` pairs, sorted.
    pub async fn keys(&self) -> Vec<(String, String)> {
        let mut keys: Vec<_> = self.objects.lock().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    fn name(&self) -> &'static str {
        "pulse-mock"
    }

    async fn put(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), PulseError> {
        if self.failing_prefixes.iter().any(|p| key.starts_with(p)) {
            return Err(PulseError::storage("put", bucket, key, "forced failure"));
        }
        self.objects
            .lock()
            .await
            .insert((bucket.to_string(), key.to_string()), body);
        Ok(())
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, PulseError> {
        self.object(bucket, key)
            .await
            .ok_or_else(|| PulseError::storage("get", bucket, key, "no such key"))
    }
}

/// Fetcher that serves a fixed body, or fails.
#[derive(Debug, Clone)]
pub struct StaticFetcher {
    body: Result<String, PulseError>,
}

impl StaticFetcher {
    #[must_use]
    pub fn serving(body: impl Into<String>) -> Self {
        Self {
            body: Ok(body.into()),
        }
    }

    #[must_use]
    pub const fn failing(err: PulseError) -> Self {
        Self { body: Err(err) }
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, _url: &str) -> Result<String, PulseError> {
        self.body.clone()
    }
}

/// Summarizer returning canned text and remembering each request.
#[derive(Debug)]
pub struct CannedSummarizer {
    reply: Result<String, PulseError>,
    requests: Mutex<Vec<SummaryRequest>>,
}

impl CannedSummarizer {
    #[must_use]
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn failing(err: PulseError) -> Self {
        Self {
            reply: Err(err),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub async fn requests(&self) -> Vec<SummaryRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl Summarizer for CannedSummarizer {
    async fn summarize(&self, req: &SummaryRequest) -> Result<String, PulseError> {
        self.requests.lock().await.push(req.clone());
        self.reply.clone()
    }
}

/// Notifier that records `(subject, message)` pairs.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), PulseError> {
        self.sent
            .lock()
            .await
            .push((subject.to_string(), message.to_string()));
        Ok(())
    }
}

/// Dispatcher that records submitted jobs and acknowledges them.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    jobs: Mutex<Vec<JobSpec>>,
}

impl RecordingDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn jobs(&self) -> Vec<JobSpec> {
        self.jobs.lock().await.clone()
    }
}

#[async_trait]
impl JobDispatcher for RecordingDispatcher {
    async fn dispatch(&self, spec: &JobSpec) -> Result<JobReceipt, PulseError> {
        let mut jobs = self.jobs.lock().await;
        jobs.push(spec.clone());
        Ok(JobReceipt {
            name: spec.name.clone(),
            id: Some(format!("mock-job-{}", jobs.len())),
        })
    }
}
