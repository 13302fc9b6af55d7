mod comments;
mod digest;
mod dispatch;
mod news;

use pulse_core::naming::object_key;
use pulse_core::{ArtifactReport, PulseError};

use crate::Pulse;

const LOG_ERROR_CHARS: usize = 200;

impl Pulse {
    /// Write `body` to the work dir, transfer it under `key_prefix`, and
    /// remove the local copy once the transfer succeeded.
    ///
    /// Returns `None` when the local write itself failed. Every failure is
    /// logged and appended to `warnings`.
    pub(crate) async fn stage_artifact(
        &self,
        file_name: &str,
        body: Vec<u8>,
        key_prefix: &str,
        warnings: &mut Vec<PulseError>,
    ) -> Option<ArtifactReport> {
        let storage = &self.cfg.storage;
        let local_path = storage.work_dir.join(file_name);
        if let Err(e) = tokio::fs::write(&local_path, body).await {
            let e = PulseError::from(e);
            tracing::error!(path = %local_path.display(), error = %e.truncated(LOG_ERROR_CHARS), "writing local artifact failed");
            warnings.push(e);
            return None;
        }

        let key = object_key(key_prefix, file_name);
        let uploaded = match self
            .store
            .upload_file(&local_path, &storage.bucket, &key)
            .await
        {
            Ok(()) => {
                tracing::info!(store = self.store.name(), bucket = %storage.bucket, key = %key, "artifact uploaded");
                true
            }
            Err(e) => {
                tracing::error!(bucket = %storage.bucket, key = %key, error = %e.truncated(LOG_ERROR_CHARS), "upload failed; keeping local copy");
                warnings.push(e);
                false
            }
        };

        let mut local_removed = false;
        if uploaded {
            match tokio::fs::remove_file(&local_path).await {
                Ok(()) => {
                    tracing::info!(path = %local_path.display(), "deleted local file");
                    local_removed = true;
                }
                Err(e) => {
                    let e = PulseError::from(e);
                    tracing::warn!(path = %local_path.display(), error = %e.truncated(LOG_ERROR_CHARS), "deleting local file failed");
                    warnings.push(e);
                }
            }
        }

        Some(ArtifactReport {
            local_path,
            bucket: storage.bucket.clone(),
            key,
            uploaded,
            local_removed,
        })
    }
}
