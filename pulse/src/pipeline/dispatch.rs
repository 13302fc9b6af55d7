use pulse_core::naming::job_spec;
use pulse_core::records::FIXED_ZONE;
use pulse_core::{JobReceipt, PulseError};

use crate::Pulse;

impl Pulse {
    /// Submit the sentiment-analysis batch job for the staged tables.
    ///
    /// # Errors
    /// Returns `InvalidArg` when no dispatcher is registered or the job
    /// image/role is not configured, and the dispatcher's error otherwise.
    #[tracing::instrument(name = "pulse::dispatch_analysis", skip_all)]
    pub async fn dispatch_analysis(&self) -> Result<JobReceipt, PulseError> {
        let dispatcher = Self::require(self.dispatcher.as_ref(), "job dispatcher")?;
        let spec = job_spec(&self.cfg.dispatch, &self.clock.now_in(FIXED_ZONE))?;
        tracing::info!(job = %spec.name, "submitting analysis job");
        let receipt = dispatcher.dispatch(&spec).await?;
        tracing::info!(job = %receipt.name, id = ?receipt.id, "analysis job accepted");
        Ok(receipt)
    }
}
