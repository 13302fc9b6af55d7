use pulse_core::digest::summary_request;
use pulse_core::naming::summary_key;
use pulse_core::table::read_sentiment_rows;
use pulse_core::{DigestReport, PulseError, Stage};

use crate::Pulse;

impl Pulse {
    /// Summarize an analyzed sentiment table and notify subscribers.
    ///
    /// Reads `bucket/key`, builds the digest prompt from its rows, stores the
    /// generated summary under the digest output prefix, and publishes it.
    ///
    /// # Errors
    /// Any failing step aborts the digest. Storage failures are tagged with
    /// their stage; a table without the required columns yields
    /// `MissingColumns`.
    #[tracing::instrument(name = "pulse::digest", skip_all, fields(bucket = %bucket, key = %key))]
    pub async fn digest(&self, bucket: &str, key: &str) -> Result<DigestReport, PulseError> {
        let summarizer = Self::require(self.summarizer.as_ref(), "summarizer")?;
        let notifier = Self::require(self.notifier.as_ref(), "notifier")?;
        let cfg = &self.cfg.digest;

        let bytes = self
            .store
            .get(bucket, key)
            .await
            .map_err(|e| PulseError::service(Stage::Download, e.to_string()))?;
        let rows = read_sentiment_rows(&bytes)?;
        tracing::info!(rows = rows.len(), "loaded analyzed rows");

        let summary = summarizer.summarize(&summary_request(&rows, cfg)).await?;

        let out_key = summary_key(&cfg.output_prefix, key);
        self.store
            .put(&cfg.output_bucket, &out_key, summary.clone().into_bytes())
            .await
            .map_err(|e| PulseError::service(Stage::Upload, e.to_string()))?;
        tracing::info!(bucket = %cfg.output_bucket, key = %out_key, "summary stored");

        notifier.publish(&cfg.subject, &summary).await?;

        Ok(DigestReport {
            rows: rows.len(),
            bucket: cfg.output_bucket.clone(),
            key: out_key,
            summary,
        })
    }
}
