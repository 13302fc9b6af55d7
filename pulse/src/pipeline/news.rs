use pulse_core::naming::artifact_name;
use pulse_core::news::extract_news;
use pulse_core::records::FIXED_ZONE;
use pulse_core::table::news_table;
use pulse_core::{NewsReport, PulseError};

use super::LOG_ERROR_CHARS;
use crate::Pulse;

impl Pulse {
    /// Harvest the news listing: save the page, extract headlines, and stage
    /// both the page and the table.
    ///
    /// # Errors
    /// Returns an error if no fetcher is registered, the page cannot be
    /// fetched, or a configured selector is invalid. Staging failures are
    /// reported as warnings.
    #[tracing::instrument(name = "pulse::harvest_news", skip_all, fields(url = %self.cfg.news.url))]
    pub async fn harvest_news(&self) -> Result<NewsReport, PulseError> {
        let fetcher = Self::require(self.fetcher.as_ref(), "page fetcher")?;
        let news = &self.cfg.news;
        let csv_prefix = &self.cfg.storage.csv_prefix;
        let html_prefix = &self.cfg.storage.html_prefix;

        let html = fetcher.fetch(&news.url).await.inspect_err(|e| {
            tracing::error!(operation = "fetch", error = %e.truncated(LOG_ERROR_CHARS), "failed to retrieve page");
        })?;

        let now = self.clock.now_in(FIXED_ZONE);
        let mut report = NewsReport::default();

        let page_name = artifact_name(&news.file_prefix, &now, "html");
        report.page = self
            .stage_artifact(&page_name, html.clone().into_bytes(), html_prefix, &mut report.warnings)
            .await;

        let items = extract_news(&html, &news.selectors)?;
        report.items = items.len();
        tracing::info!(count = items.len(), "extracted news items");

        let table_name = artifact_name(&news.file_prefix, &now, "csv");
        report.table = match news_table(&items) {
            Ok(bytes) => {
                self.stage_artifact(&table_name, bytes, csv_prefix, &mut report.warnings)
                    .await
            }
            Err(e) => {
                tracing::error!(operation = "serialize", error = %e.truncated(LOG_ERROR_CHARS), "writing table failed");
                report.warnings.push(e);
                None
            }
        };
        Ok(report)
    }
}
