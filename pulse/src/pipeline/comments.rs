use pulse_core::naming::artifact_name;
use pulse_core::records::FIXED_ZONE;
use pulse_core::table::comments_table;
use pulse_core::{CommentsReport, ForumPage, collect};

use super::LOG_ERROR_CHARS;
use crate::Pulse;

impl Pulse {
    /// Harvest forum comments from an already acquired page.
    ///
    /// Runs load, readiness wait, collection, serialization, upload, and
    /// cleanup. A failed load triggers a diagnostic capture into the work dir
    /// and a failed readiness wait is logged; collection runs either way.
    /// The caller owns the page and releases it afterwards.
    #[tracing::instrument(
        name = "pulse::harvest_comments",
        skip_all,
        fields(url = %self.cfg.forum.url, target = self.cfg.collector.target),
    )]
    pub async fn harvest_comments(&self, page: &dyn ForumPage) -> CommentsReport {
        let forum = &self.cfg.forum;
        let mut warnings = Vec::new();

        tracing::info!("loading forum page");
        if let Err(e) = page.open(&forum.url).await {
            tracing::error!(operation = "open", error = %e.truncated(LOG_ERROR_CHARS), "error loading page");
            warnings.push(e);
            let shot = self.cfg.storage.work_dir.join(&forum.diagnostic_file);
            if let Err(e) = page.capture_diagnostic(&shot).await {
                tracing::warn!(error = %e.truncated(LOG_ERROR_CHARS), "could not capture diagnostic");
                warnings.push(e);
            }
        }

        if let Err(e) = page.wait_for_records(forum.ready_timeout).await {
            tracing::error!(operation = "wait_for_records", error = %e.truncated(LOG_ERROR_CHARS), "records did not appear");
            warnings.push(e);
        } else {
            tracing::info!("comments section loaded");
        }

        let collection = collect(page, self.clock.as_ref(), &self.cfg.collector).await;
        warnings.extend(collection.warnings);

        let now = self.clock.now_in(FIXED_ZONE);
        let file_name = artifact_name(&forum.file_prefix, &now, "csv");
        let table = match comments_table(&collection.records) {
            Ok(bytes) => {
                self.stage_artifact(&file_name, bytes, &self.cfg.storage.csv_prefix, &mut warnings)
                    .await
            }
            Err(e) => {
                tracing::error!(operation = "serialize", error = %e.truncated(LOG_ERROR_CHARS), "writing table failed");
                warnings.push(e);
                None
            }
        };

        CommentsReport {
            records: collection.records.len(),
            passes: collection.passes,
            skipped: collection.skipped,
            stop: collection.stop,
            table,
            warnings,
        }
    }
}
