use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use proptest::prelude::*;
use pulse_core::{
    Accumulator, CollectorConfig, PulseError, RawRecord, StopReason, collect, extract_record,
};
use pulse_mock::{FixedClock, MockBehavior, ScriptedPage, fixtures};

fn cfg(target: usize) -> CollectorConfig {
    CollectorConfig {
        target,
        ..CollectorConfig::default()
    }
}

#[tokio::test(start_paused = true)]
async fn stops_exactly_at_target_mid_pass() {
    let page = ScriptedPage::generated(|n| fixtures::listing(n * 2));
    let clock = FixedClock::ist(2024, 1, 1, 10, 0, 0);

    let out = collect(&page, &clock, &cfg(5)).await;

    assert_eq!(out.records.len(), 5);
    assert_eq!(out.stop, StopReason::TargetReached);
    assert_eq!(out.passes, 3);
    let users: Vec<_> = out.records.iter().map(|r| r.username.as_str()).collect();
    assert_eq!(users, ["trader1", "trader2", "trader3", "trader4", "trader5"]);
}

#[tokio::test(start_paused = true)]
async fn budget_bounds_a_short_listing() {
    let page = ScriptedPage::with_snapshots(vec![fixtures::listing(30)]);
    let clock = FixedClock::ist(2024, 1, 1, 10, 0, 0);
    let started = tokio::time::Instant::now();

    let out = collect(&page, &clock, &cfg(100)).await;

    assert_eq!(out.records.len(), 30);
    assert_eq!(out.stop, StopReason::BudgetExhausted);
    // 240s budget with 5s per pass; one pass may start just before expiry.
    assert!((48..=49).contains(&out.passes), "passes = {}", out.passes);
    assert!(started.elapsed() <= Duration::from_secs(245));
    assert_eq!(page.log().await.reveals, out.passes);
}

#[tokio::test(start_paused = true)]
async fn repeated_reads_do_not_duplicate() {
    let page = ScriptedPage::with_snapshots(vec![
        fixtures::listing(3),
        fixtures::listing(3),
        fixtures::listing(4),
    ]);
    let clock = FixedClock::ist(2024, 1, 1, 10, 0, 0);

    let out = collect(&page, &clock, &cfg(4)).await;

    assert_eq!(out.records.len(), 4);
    assert_eq!(out.passes, 3);
}

#[tokio::test(start_paused = true)]
async fn malformed_entries_are_skipped() {
    let page = ScriptedPage::with_snapshots(vec![vec![
        fixtures::comment(1),
        fixtures::broken(),
        fixtures::comment(2),
    ]]);
    let clock = FixedClock::ist(2024, 1, 1, 10, 0, 0);

    let out = collect(&page, &clock, &cfg(2)).await;

    assert_eq!(out.records.len(), 2);
    assert_eq!(out.skipped, 1);
    assert_eq!(out.stop, StopReason::TargetReached);
}

#[tokio::test(start_paused = true)]
async fn pass_failures_are_logged_and_retried() {
    let lost = PulseError::source("read_visible_records", "stale page");
    let page = ScriptedPage::with_reads(vec![
        MockBehavior::Fail(lost.clone()),
        MockBehavior::Return(fixtures::listing(3)),
    ])
    .reveal_behavior(MockBehavior::Fail(PulseError::source("reveal_more", "script error")));
    let clock = FixedClock::ist(2024, 1, 1, 10, 0, 0);

    let out = collect(&page, &clock, &cfg(3)).await;

    assert_eq!(out.records.len(), 3);
    assert_eq!(out.passes, 2);
    // two failed reveals and one failed read
    assert_eq!(out.warnings.len(), 3);
    assert!(out.warnings.contains(&lost));
}

#[tokio::test(start_paused = true)]
async fn zero_budget_still_runs_one_pass() {
    let page = ScriptedPage::with_snapshots(vec![fixtures::listing(2)]);
    let clock = FixedClock::ist(2024, 1, 1, 10, 0, 0);
    let cfg = CollectorConfig {
        target: 10,
        time_budget: Duration::ZERO,
        sample_delay: Duration::from_secs(5),
    };

    let out = collect(&page, &clock, &cfg).await;

    assert_eq!(out.passes, 1);
    assert_eq!(out.records.len(), 2);
    assert_eq!(out.stop, StopReason::BudgetExhausted);
}

#[tokio::test(start_paused = true)]
async fn relative_times_drift_with_the_clock() {
    let clock = Arc::new(FixedClock::ist(2024, 1, 1, 10, 0, 0));
    let ticking = Arc::clone(&clock);
    let page = ScriptedPage::generated(move |_| {
        ticking.advance(TimeDelta::minutes(1));
        vec![Ok(RawRecord::new("bull", "same words", "5 mins ago"))]
    });

    let out = collect(&page, clock.as_ref(), &cfg(3)).await;

    // Same display text re-read a minute later normalizes to a new triple.
    assert_eq!(out.records.len(), 3);
    assert_ne!(out.records[0].timestamp, out.records[1].timestamp);
}

proptest! {
    #[test]
    fn offering_twice_equals_offering_once(ids in proptest::collection::vec(0usize..20, 0..60)) {
        let clock = FixedClock::ist(2024, 1, 1, 10, 0, 0);
        let records: Vec<_> = ids
            .iter()
            .map(|&i| extract_record(RawRecord::new(format!("u{i}"), "c", "1 min ago"), &clock))
            .collect();

        let mut once = Accumulator::new(1_000);
        for r in records.iter().cloned() {
            once.offer(r);
        }
        let mut twice = Accumulator::new(1_000);
        for r in records.iter().chain(records.iter()).cloned() {
            twice.offer(r);
        }

        let once = once.into_records();
        let mut distinct = ids.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(once.len(), distinct.len());
        prop_assert_eq!(once, twice.into_records());
    }
}
