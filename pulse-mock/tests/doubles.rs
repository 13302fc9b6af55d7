use std::path::Path;
use std::time::Duration;

use chrono::TimeDelta;
use pulse_core::{Clock, ForumPage, ObjectStore, PulseError, SourceReader};
use pulse_mock::{FixedClock, MemoryStore, MockBehavior, ScriptedPage, fixtures};

#[tokio::test]
async fn test_snapshots_advance_then_repeat_last() {
    let page = ScriptedPage::with_snapshots(vec![fixtures::listing(1), fixtures::listing(3)]);
    assert_eq!(page.read_visible_records().await.unwrap().len(), 1);
    assert_eq!(page.read_visible_records().await.unwrap().len(), 3);
    assert_eq!(page.read_visible_records().await.unwrap().len(), 3);
    assert_eq!(page.log().await.reads, 3);
}

#[tokio::test]
async fn test_generated_listing_sees_read_number() {
    let page = ScriptedPage::generated(|n| fixtures::listing(n * 2));
    assert_eq!(page.read_visible_records().await.unwrap().len(), 2);
    assert_eq!(page.read_visible_records().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_scripted_read_failure() {
    let err = PulseError::source("read", "session lost");
    let page = ScriptedPage::with_reads(vec![
        MockBehavior::Fail(err.clone()),
        MockBehavior::Return(fixtures::listing(2)),
    ]);
    assert_eq!(page.read_visible_records().await.unwrap_err(), err);
    assert_eq!(page.read_visible_records().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_lifecycle_calls_are_logged() {
    let page = ScriptedPage::with_snapshots(vec![])
        .open_behavior(MockBehavior::Fail(PulseError::source("open", "dns")));
    assert!(page.open("https://forum.example.test/nifty").await.is_err());
    page.wait_for_records(Duration::from_secs(1)).await.unwrap();
    page.reveal_more().await.unwrap();
    page.capture_diagnostic(Path::new("shot.png")).await.unwrap();
    assert!(page.read_visible_records().await.unwrap().is_empty());

    let log = page.log().await;
    assert_eq!(log.opened, vec!["https://forum.example.test/nifty".to_string()]);
    assert_eq!(log.waits, 1);
    assert_eq!(log.reveals, 1);
    assert_eq!(log.diagnostics, vec![Path::new("shot.png").to_path_buf()]);
}

#[tokio::test]
async fn test_memory_store_put_get_and_forced_failure() {
    let store = MemoryStore::new().fail_puts_under("html/");
    store.put("b", "csv/a.csv", b"x".to_vec()).await.unwrap();
    assert_eq!(store.get("b", "csv/a.csv").await.unwrap(), b"x".to_vec());
    assert!(matches!(
        store.put("b", "html/a.html", Vec::new()).await,
        Err(PulseError::Storage { .. })
    ));
    assert!(store.get("b", "missing").await.is_err());
    assert_eq!(store.keys().await, vec![("b".to_string(), "csv/a.csv".to_string())]);
}

#[test]
fn test_fixed_clock_advances() {
    let clock = FixedClock::ist(2024, 1, 1, 10, 0, 0);
    assert_eq!(clock.now_utc().to_rfc3339(), "2024-01-01T04:30:00+00:00");
    clock.advance(TimeDelta::minutes(90));
    assert_eq!(clock.now_utc().to_rfc3339(), "2024-01-01T06:00:00+00:00");
}
