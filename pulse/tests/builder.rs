mod helpers;

use std::sync::Arc;

use helpers::*;
use pulse::{Pulse, PulseConfig, PulseError};
use pulse_core::{CollectorConfig, StorageConfig};
use pulse_mock::MemoryStore;

#[test]
fn store_is_required() {
    let err = Pulse::builder().build().err().unwrap();
    assert!(matches!(err, PulseError::InvalidArg(m) if m.contains("with_store")));
}

#[test]
fn zero_target_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let res = builder(Arc::new(MemoryStore::new()), dir.path())
        .collector(CollectorConfig {
            target: 0,
            ..CollectorConfig::default()
        })
        .build();
    assert!(matches!(res, Err(PulseError::InvalidArg(_))));
}

#[test]
fn empty_bucket_is_rejected() {
    let res = Pulse::builder()
        .with_store(Arc::new(MemoryStore::new()))
        .storage(StorageConfig {
            bucket: " ".into(),
            ..StorageConfig::default()
        })
        .build();
    assert!(matches!(res, Err(PulseError::InvalidArg(_))));
}

#[test]
fn section_setters_override_whole_config() {
    let mut cfg = PulseConfig::default();
    cfg.collector.target = 25;
    cfg.storage.bucket = "staging".into();
    let pulse = Pulse::builder()
        .with_store(Arc::new(MemoryStore::new()))
        .config(cfg)
        .collector(CollectorConfig {
            target: 50,
            ..CollectorConfig::default()
        })
        .build()
        .unwrap();
    assert_eq!(pulse.config().collector.target, 50);
    assert_eq!(pulse.config().storage.bucket, "staging");
}
