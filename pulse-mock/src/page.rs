use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use pulse_core::{Extracted, ForumPage, PulseError, SourceReader};

/// Instruction for how a call should behave.
#[derive(Clone, Debug)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(PulseError),
    /// Hang indefinitely (simulate a stalled driver).
    Hang,
}

impl<T: Clone> MockBehavior<T> {
    async fn resolve(&self) -> Result<T, PulseError> {
        match self {
            Self::Return(v) => Ok(v.clone()),
            Self::Fail(e) => Err(e.clone()),
            Self::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

type Generator = Box<dyn Fn(usize) -> Vec<Extracted> + Send + Sync>;

enum Listing {
    /// Consumed one per read; the final entry repeats forever.
    Scripted(VecDeque<MockBehavior<Vec<Extracted>>>),
    /// Called with the 1-based read number.
    Generated(Generator),
}

/// Calls observed by a [`ScriptedPage`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLog {
    /// URLs passed to `open`.
    pub opened: Vec<String>,
    /// Number of `wait_for_records` calls.
    pub waits: usize,
    /// Number of `reveal_more` calls.
    pub reveals: usize,
    /// Number of `read_visible_records` calls.
    pub reads: usize,
    /// Paths passed to `capture_diagnostic`.
    pub diagnostics: Vec<PathBuf>,
}

struct State {
    listing: Listing,
    log: PageLog,
}

/// Scripted forum page for collector and pipeline tests.
///
/// Reads are answered from a queue of snapshots (the last one repeats) or
/// from a generator keyed by read number. Lifecycle calls succeed unless
/// configured otherwise.
pub struct ScriptedPage {
    state: Mutex<State>,
    open: MockBehavior<()>,
    wait: MockBehavior<()>,
    reveal: MockBehavior<()>,
    diagnostic: MockBehavior<()>,
}

impl ScriptedPage {
    fn with_listing(listing: Listing) -> Self {
        Self {
            state: Mutex::new(State {
                listing,
                log: PageLog::default(),
            }),
            open: MockBehavior::Return(()),
            wait: MockBehavior::Return(()),
            reveal: MockBehavior::Return(()),
            diagnostic: MockBehavior::Return(()),
        }
    }

    /// Answer reads with `snapshots` in order, repeating the last one.
    #[must_use]
    pub fn with_snapshots(snapshots: Vec<Vec<Extracted>>) -> Self {
        Self::with_listing(Listing::Scripted(
            snapshots.into_iter().map(MockBehavior::Return).collect(),
        ))
    }

    /// Answer reads with per-read behaviors, repeating the last one.
    #[must_use]
    pub fn with_reads(reads: Vec<MockBehavior<Vec<Extracted>>>) -> Self {
        Self::with_listing(Listing::Scripted(reads.into()))
    }

    /// Answer the n-th read (1-based) with `f(n)`.
    #[must_use]
    pub fn generated(f: impl Fn(usize) -> Vec<Extracted> + Send + Sync + 'static) -> Self {
        Self::with_listing(Listing::Generated(Box::new(f)))
    }

    /// Override the behavior of `open`.
    #[must_use]
    pub fn open_behavior(mut self, b: MockBehavior<()>) -> Self {
        self.open = b;
        self
    }

    /// Override the behavior of `wait_for_records`.
    #[must_use]
    pub fn wait_behavior(mut self, b: MockBehavior<()>) -> Self {
        self.wait = b;
        self
    }

    /// Override the behavior of `reveal_more`.
    #[must_use]
    pub fn reveal_behavior(mut self, b: MockBehavior<()>) -> Self {
        self.reveal = b;
        self
    }

    /// Override the behavior of `capture_diagnostic`.
    #[must_use]
    pub fn diagnostic_behavior(mut self, b: MockBehavior<()>) -> Self {
        self.diagnostic = b;
        self
    }

    /// Snapshot of the calls observed so far.
    pub async fn log(&self) -> PageLog {
        self.state.lock().await.log.clone()
    }
}

#[async_trait]
impl SourceReader for ScriptedPage {
    async fn reveal_more(&self) -> Result<(), PulseError> {
        self.state.lock().await.log.reveals += 1;
        self.reveal.resolve().await
    }

    async fn read_visible_records(&self) -> Result<Vec<Extracted>, PulseError> {
        // Pick the behavior without holding the lock across a possible hang.
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.log.reads += 1;
            let n = guard.log.reads;
            match &mut guard.listing {
                Listing::Generated(f) => MockBehavior::Return(f(n)),
                Listing::Scripted(queue) => {
                    if queue.len() > 1 {
                        queue.pop_front().unwrap_or(MockBehavior::Return(Vec::new()))
                    } else {
                        queue
                            .front()
                            .cloned()
                            .unwrap_or(MockBehavior::Return(Vec::new()))
                    }
                }
            }
        };
        behavior.resolve().await
    }
}

#[async_trait]
impl ForumPage for ScriptedPage {
    async fn open(&self, url: &str) -> Result<(), PulseError> {
        self.state.lock().await.log.opened.push(url.to_string());
        self.open.resolve().await
    }

    async fn wait_for_records(&self, _timeout: Duration) -> Result<(), PulseError> {
        self.state.lock().await.log.waits += 1;
        self.wait.resolve().await
    }

    async fn capture_diagnostic(&self, path: &Path) -> Result<(), PulseError> {
        self.state
            .lock()
            .await
            .log
            .diagnostics
            .push(path.to_path_buf());
        self.diagnostic.resolve().await
    }
}
