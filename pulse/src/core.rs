use std::sync::Arc;

use pulse_core::{
    Clock, CollectorConfig, DigestConfig, DispatchConfig, ForumConfig, JobDispatcher, NewsConfig,
    Notifier, ObjectStore, PageFetcher, PulseConfig, PulseError, StorageConfig, Summarizer,
    SystemClock,
};

/// Orchestrator that runs the harvest, digest, and dispatch pipelines against
/// registered service adapters.
pub struct Pulse {
    pub(crate) store: Arc<dyn ObjectStore>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) fetcher: Option<Arc<dyn PageFetcher>>,
    pub(crate) summarizer: Option<Arc<dyn Summarizer>>,
    pub(crate) notifier: Option<Arc<dyn Notifier>>,
    pub(crate) dispatcher: Option<Arc<dyn JobDispatcher>>,
    pub(crate) cfg: PulseConfig,
}

/// Builder for constructing a `Pulse` orchestrator with custom configuration.
pub struct PulseBuilder {
    store: Option<Arc<dyn ObjectStore>>,
    clock: Arc<dyn Clock>,
    fetcher: Option<Arc<dyn PageFetcher>>,
    summarizer: Option<Arc<dyn Summarizer>>,
    notifier: Option<Arc<dyn Notifier>>,
    dispatcher: Option<Arc<dyn JobDispatcher>>,
    cfg: PulseConfig,
}

impl Default for PulseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PulseBuilder {
    /// Create a builder with default configuration and the system clock.
    ///
    /// An object store is required; every other adapter is only needed by the
    /// pipeline that uses it.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: None,
            clock: Arc::new(SystemClock),
            fetcher: None,
            summarizer: None,
            notifier: None,
            dispatcher: None,
            cfg: PulseConfig::default(),
        }
    }

    /// Register the object store that receives staged artifacts.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn ObjectStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the clock used for timestamps, names, and budgets.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Register the fetcher used by the news harvest.
    #[must_use]
    pub fn with_fetcher(mut self, fetcher: Arc<dyn PageFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Register the summarizer used by the digest.
    #[must_use]
    pub fn with_summarizer(mut self, summarizer: Arc<dyn Summarizer>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    /// Register the notifier used by the digest.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Register the dispatcher used to submit analysis jobs.
    #[must_use]
    pub fn with_dispatcher(mut self, dispatcher: Arc<dyn JobDispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: PulseConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the collector bounds.
    #[must_use]
    pub const fn collector(mut self, cfg: CollectorConfig) -> Self {
        self.cfg.collector = cfg;
        self
    }

    /// Set forum page settings.
    #[must_use]
    pub fn forum(mut self, cfg: ForumConfig) -> Self {
        self.cfg.forum = cfg;
        self
    }

    /// Set news listing settings.
    #[must_use]
    pub fn news(mut self, cfg: NewsConfig) -> Self {
        self.cfg.news = cfg;
        self
    }

    /// Set artifact staging locations.
    #[must_use]
    pub fn storage(mut self, cfg: StorageConfig) -> Self {
        self.cfg.storage = cfg;
        self
    }

    /// Set digest settings.
    #[must_use]
    pub fn digest(mut self, cfg: DigestConfig) -> Self {
        self.cfg.digest = cfg;
        self
    }

    /// Set analysis job settings.
    #[must_use]
    pub fn dispatch(mut self, cfg: DispatchConfig) -> Self {
        self.cfg.dispatch = cfg;
        self
    }

    /// Build the `Pulse` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no object store was registered, the collector
    /// target is zero, or the staging bucket is empty.
    pub fn build(self) -> Result<Pulse, PulseError> {
        let Some(store) = self.store else {
            return Err(PulseError::InvalidArg(
                "no object store registered; add one via with_store(...)".to_string(),
            ));
        };
        if self.cfg.collector.target == 0 {
            return Err(PulseError::InvalidArg(
                "collector.target must be at least 1".to_string(),
            ));
        }
        if self.cfg.storage.bucket.trim().is_empty() {
            return Err(PulseError::InvalidArg(
                "storage.bucket must not be empty".to_string(),
            ));
        }
        Ok(Pulse {
            store,
            clock: self.clock,
            fetcher: self.fetcher,
            summarizer: self.summarizer,
            notifier: self.notifier,
            dispatcher: self.dispatcher,
            cfg: self.cfg,
        })
    }
}

impl Pulse {
    /// Start building a new `Pulse` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use pulse_services::FsObjectStore;
    ///
    /// let pulse = pulse::Pulse::builder()
    ///     .with_store(Arc::new(FsObjectStore::new("/var/lib/pulse")))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> PulseBuilder {
        PulseBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &PulseConfig {
        &self.cfg
    }

    pub(crate) fn require<'a, T: ?Sized>(
        slot: Option<&'a Arc<T>>,
        what: &str,
    ) -> Result<&'a T, PulseError> {
        slot.map(AsRef::as_ref)
            .ok_or_else(|| PulseError::InvalidArg(format!("no {what} registered")))
    }
}
