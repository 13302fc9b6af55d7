// Shared fixtures for orchestrator tests; `use helpers::*;`
#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use pulse::{Pulse, PulseBuilder};
use pulse_core::StorageConfig;
use pulse_mock::{FixedClock, MemoryStore};

/// Wall time every orchestrator test runs at: 2024-12-03 21:29:32 IST.
pub const STAMP: &str = "20241203212932";

pub fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::ist(2024, 12, 3, 21, 29, 32))
}

/// Builder wired to `store`, the fixed clock, and `work_dir` for local copies.
pub fn builder(store: Arc<MemoryStore>, work_dir: &Path) -> PulseBuilder {
    Pulse::builder()
        .with_store(store)
        .with_clock(clock())
        .storage(StorageConfig {
            work_dir: work_dir.to_path_buf(),
            ..StorageConfig::default()
        })
}

pub fn text(bytes: &[u8]) -> String {
    String::from_utf8(bytes.to_vec()).expect("utf-8 artifact")
}
