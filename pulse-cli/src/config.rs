use std::path::Path;

use anyhow::{Context, Result};
use pulse::PulseConfig;

/// Load the configuration file, or defaults when none is given.
pub fn load(path: Option<&Path>) -> Result<PulseConfig> {
    let Some(path) = path else {
        return Ok(PulseConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}
