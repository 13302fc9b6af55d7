use pulse_types::{CollectorConfig, PulseConfig, PulseError, Stage};

#[test]
fn defaults_match_collector_constants() {
    let cfg = CollectorConfig::default();
    assert_eq!(cfg.target, 100);
    assert_eq!(cfg.time_budget.as_secs(), 240);
    assert_eq!(cfg.sample_delay.as_secs(), 5);
}

#[test]
fn partial_config_fills_remaining_defaults() {
    let json = r#"{
        "collector": { "target": 25 },
        "storage": { "bucket": "staging-bucket" }
    }"#;
    let cfg: PulseConfig = serde_json::from_str(json).expect("deserialize partial config");

    assert_eq!(cfg.collector.target, 25);
    assert_eq!(cfg.collector.time_budget.as_secs(), 240);
    assert_eq!(cfg.storage.bucket, "staging-bucket");
    assert_eq!(cfg.storage.csv_prefix, "csv/");
    assert_eq!(cfg.forum.ready_timeout.as_secs(), 10);
    assert_eq!(cfg.digest.max_tokens, 1024);
    assert_eq!(cfg.dispatch.instance_type, "ml.t3.medium");
}

#[test]
fn pulse_config_roundtrip() {
    let mut cfg = PulseConfig::default();
    cfg.collector.sample_delay = std::time::Duration::from_millis(1500);
    cfg.dispatch.image_uri = "registry.local/analyzer:latest".to_string();

    let json = serde_json::to_string(&cfg).expect("serialize config");
    let de: PulseConfig = serde_json::from_str(&json).expect("deserialize config");

    assert_eq!(de, cfg);
}

#[test]
fn error_roundtrip_keeps_stage_tag() {
    let err = PulseError::service(Stage::Notify, "topic missing");
    let json = serde_json::to_string(&err).expect("serialize error");
    let de: PulseError = serde_json::from_str(&json).expect("deserialize error");
    assert_eq!(de, err);
    assert_eq!(de.to_string(), "notify service failed: topic missing");
}

#[test]
fn only_session_and_config_errors_are_fatal() {
    assert!(PulseError::Session("driver refused".into()).is_fatal());
    assert!(PulseError::InvalidArg("target must be positive".into()).is_fatal());
    assert!(!PulseError::source("open", "dns").is_fatal());
    assert!(!PulseError::storage("put", "b", "k", "denied").is_fatal());
}

#[test]
fn truncated_caps_long_messages() {
    let err = PulseError::Other("x".repeat(500));
    let short = err.truncated(40);
    assert_eq!(short.chars().count(), 41);
    assert!(short.ends_with('…'));

    let small = PulseError::Other("tiny".into());
    assert_eq!(small.truncated(40), "unknown error: tiny");
}
