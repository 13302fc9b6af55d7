use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use reqwest::Method;
use tokio::time::Instant;

use pulse_core::{Extracted, ForumConfig, ForumPage, ForumSelectors, PulseError, RawRecord, SourceReader};

use crate::error::DriverError;
use crate::protocol::{ElementRef, NewSession, Transport, css, firefox_capabilities};

const DEFAULT_POLL: Duration = Duration::from_millis(500);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Entry point for opening browser sessions on a WebDriver endpoint
/// (geckodriver, a Selenium grid, or any W3C-compliant remote end).
#[derive(Debug, Clone)]
pub struct WebDriverClient {
    transport: Transport,
    headless: bool,
    poll_interval: Duration,
}

impl WebDriverClient {
    /// Client for the driver listening at `endpoint`.
    ///
    /// # Errors
    /// Returns `PulseError::InvalidArg` for a malformed endpoint URL and
    /// `PulseError::Session` if the HTTP client cannot be built.
    pub fn new(endpoint: &str) -> Result<Self, PulseError> {
        url::Url::parse(endpoint)
            .map_err(|e| PulseError::InvalidArg(format!("webdriver endpoint {endpoint:?}: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PulseError::Session(e.to_string()))?;
        Ok(Self {
            transport: Transport::new(http, endpoint),
            headless: true,
            poll_interval: DEFAULT_POLL,
        })
    }

    /// Run the browser without a visible window (default: on).
    #[must_use]
    pub const fn headless(mut self, on: bool) -> Self {
        self.headless = on;
        self
    }

    /// Interval between presence checks while waiting for records.
    #[must_use]
    pub const fn poll_interval(mut self, every: Duration) -> Self {
        self.poll_interval = every;
        self
    }

    /// Start a browser session configured for the forum page in `forum`.
    ///
    /// The window is maximized on a best-effort basis.
    ///
    /// # Errors
    /// Returns `PulseError::Session` when the driver refuses the session.
    #[tracing::instrument(
        name = "pulse::webdriver::start_session",
        skip_all,
        fields(endpoint = %self.transport.base(), headless = self.headless),
    )]
    pub async fn start_session(&self, forum: &ForumConfig) -> Result<WebDriverSession, PulseError> {
        let created: NewSession = self
            .transport
            .call(
                Method::POST,
                "/session",
                Some(firefox_capabilities(self.headless)),
            )
            .await
            .map_err(|e| PulseError::Session(e.to_string()))?;
        tracing::info!(session = %created.session_id, "browser session started");

        let session = WebDriverSession {
            transport: self.transport.clone(),
            id: created.session_id,
            selectors: forum.selectors.clone(),
            reveal_script: forum.reveal_script.clone(),
            poll_interval: self.poll_interval,
            closed: AtomicBool::new(false),
        };
        if let Err(e) = session
            .transport
            .command(Method::POST, &session.path("/window/maximize"), Some(serde_json::json!({})))
            .await
        {
            tracing::warn!(error = %e, "could not maximize window");
        }
        Ok(session)
    }
}

/// A live browser session driving one forum page.
///
/// Call [`WebDriverSession::quit`] when done. A session dropped without
/// quitting is released in the background if a Tokio runtime is available.
#[derive(Debug)]
pub struct WebDriverSession {
    transport: Transport,
    id: String,
    selectors: ForumSelectors,
    reveal_script: String,
    poll_interval: Duration,
    closed: AtomicBool,
}

impl WebDriverSession {
    /// Driver-assigned session id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    fn path(&self, suffix: &str) -> String {
        format!("/session/{}{suffix}", self.id)
    }

    /// End the session and close the browser. Idempotent.
    ///
    /// # Errors
    /// Returns `PulseError::Source` if the driver rejects the delete.
    pub async fn quit(&self) -> Result<(), PulseError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        self.transport
            .command(Method::DELETE, &self.path(""), None)
            .await
            .map_err(|e| e.into_source("quit"))?;
        tracing::info!(session = %self.id, "browser session closed");
        Ok(())
    }

    /// Run `script` synchronously in the page.
    ///
    /// # Errors
    /// Returns `PulseError::Source` if the script throws or the call fails.
    pub async fn execute(&self, script: &str) -> Result<serde_json::Value, PulseError> {
        self.transport
            .call(
                Method::POST,
                &self.path("/execute/sync"),
                Some(serde_json::json!({ "script": script, "args": [] })),
            )
            .await
            .map_err(|e| e.into_source("execute"))
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<ElementRef>, DriverError> {
        self.transport
            .call(Method::POST, &self.path("/elements"), Some(css(selector)))
            .await
    }

    /// Text of the first match of `selector` under `record`, if any.
    async fn field_text(&self, record: &str, selector: &str) -> Result<Option<String>, DriverError> {
        let found: Vec<ElementRef> = self
            .transport
            .call(
                Method::POST,
                &self.path(&format!("/element/{record}/elements")),
                Some(css(selector)),
            )
            .await?;
        let Some(first) = found.into_iter().next() else {
            return Ok(None);
        };
        let text: String = self
            .transport
            .call(
                Method::GET,
                &self.path(&format!("/element/{}/text", first.id)),
                None,
            )
            .await?;
        Ok(Some(text))
    }

    async fn read_record(&self, record: &str) -> Result<RawRecord, DriverError> {
        Ok(RawRecord {
            username_text: self.field_text(record, &self.selectors.username).await?,
            content_text: self.field_text(record, &self.selectors.content).await?,
            timestamp_text: self.field_text(record, &self.selectors.timestamp).await?,
        })
    }
}

#[async_trait]
impl SourceReader for WebDriverSession {
    async fn reveal_more(&self) -> Result<(), PulseError> {
        self.execute(&self.reveal_script).await.map(|_| ())
    }

    async fn read_visible_records(&self) -> Result<Vec<Extracted>, PulseError> {
        let records = self
            .find_all(&self.selectors.record)
            .await
            .map_err(|e| e.into_source("read_visible_records"))?;
        let mut out = Vec::with_capacity(records.len());
        for record in &records {
            out.push(
                self.read_record(&record.id)
                    .await
                    .map_err(|e| PulseError::Extraction(e.to_string())),
            );
        }
        Ok(out)
    }
}

#[async_trait]
impl ForumPage for WebDriverSession {
    async fn open(&self, url: &str) -> Result<(), PulseError> {
        self.transport
            .command(
                Method::POST,
                &self.path("/url"),
                Some(serde_json::json!({ "url": url })),
            )
            .await
            .map_err(|e| e.into_source("open"))
    }

    async fn wait_for_records(&self, timeout: Duration) -> Result<(), PulseError> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.find_all(&self.selectors.record).await {
                Ok(found) if !found.is_empty() => return Ok(()),
                Ok(_) => {}
                Err(e) => tracing::debug!(error = %e, "presence check failed"),
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(PulseError::timeout("record container"));
            }
            tokio::time::sleep(self.poll_interval.min(deadline - now)).await;
        }
    }

    async fn capture_diagnostic(&self, path: &Path) -> Result<(), PulseError> {
        let encoded: String = self
            .transport
            .call(Method::GET, &self.path("/screenshot"), None)
            .await
            .map_err(|e| e.into_source("screenshot"))?;
        let png = base64::engine::general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| PulseError::source("screenshot", e.to_string()))?;
        tokio::fs::write(path, png).await?;
        tracing::info!(path = %path.display(), "saved diagnostic screenshot");
        Ok(())
    }
}

impl Drop for WebDriverSession {
    fn drop(&mut self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(session = %self.id, "session dropped outside a runtime; browser left open");
            return;
        };
        let transport = self.transport.clone();
        let path = self.path("");
        let id = self.id.clone();
        handle.spawn(async move {
            match transport.command(Method::DELETE, &path, None).await {
                Ok(()) => tracing::debug!(session = %id, "released dropped session"),
                Err(e) => tracing::warn!(session = %id, error = %e, "failed to release dropped session"),
            }
        });
    }
}
