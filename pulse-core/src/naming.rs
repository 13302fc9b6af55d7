//! Artifact file names, object keys, and job names.

use chrono::DateTime;
use chrono_tz::Tz;

use pulse_types::{DispatchConfig, JobChannel, JobSpec, PulseError};

/// Compact run stamp, `YYYYMMDDHHMMSS`.
#[must_use]
pub fn run_stamp(now: &DateTime<Tz>) -> String {
    now.format("%Y%m%d%H%M%S").to_string()
}

/// `<prefix>_<stamp>.<ext>`
#[must_use]
pub fn artifact_name(prefix: &str, now: &DateTime<Tz>, ext: &str) -> String {
    format!("{prefix}_{}.{ext}", run_stamp(now))
}

/// Join a key prefix and a file name.
#[must_use]
pub fn object_key(prefix: &str, file_name: &str) -> String {
    format!("{prefix}{file_name}")
}

/// Key of the summary derived from an analyzed table's key: the table's base
/// name with `.csv` replaced by `.txt`, under `prefix`.
#[must_use]
pub fn summary_key(prefix: &str, source_key: &str) -> String {
    let base = source_key.rsplit('/').next().unwrap_or(source_key);
    format!("{prefix}{}", base.replace(".csv", ".txt"))
}

/// `<prefix>-<YYYYMMDD-HHMMSS>`
#[must_use]
pub fn job_name(prefix: &str, now: &DateTime<Tz>) -> String {
    format!("{prefix}-{}", now.format("%Y%m%d-%H%M%S"))
}

/// Build the analysis job request for `now`.
///
/// # Errors
/// Returns `PulseError::InvalidArg` when the image or role is not configured.
pub fn job_spec(cfg: &DispatchConfig, now: &DateTime<Tz>) -> Result<JobSpec, PulseError> {
    if cfg.image_uri.trim().is_empty() {
        return Err(PulseError::InvalidArg("dispatch.image_uri is empty".into()));
    }
    if cfg.role_arn.trim().is_empty() {
        return Err(PulseError::InvalidArg("dispatch.role_arn is empty".into()));
    }
    Ok(JobSpec {
        name: job_name(&cfg.job_prefix, now),
        image_uri: cfg.image_uri.clone(),
        role_arn: cfg.role_arn.clone(),
        instance_type: cfg.instance_type.clone(),
        instance_count: cfg.instance_count,
        volume_gb: cfg.volume_gb,
        input: JobChannel {
            name: "input".to_string(),
            uri: cfg.input_uri.clone(),
            local_path: cfg.input_path.clone(),
        },
        output: JobChannel {
            name: "output".to_string(),
            uri: cfg.output_uri.clone(),
            local_path: cfg.output_path.clone(),
        },
    })
}
