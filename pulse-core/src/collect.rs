//! Incremental, deduplicating collection from a re-sampled source.

use std::collections::HashSet;

use crate::connector::{Clock, SourceReader};
use crate::timestamp::normalize_timestamp;
use pulse_types::records::{ANONYMOUS_USER, NO_CONTENT, UNKNOWN_TIMESTAMP_TEXT};
use pulse_types::{CollectorConfig, CommentRecord, DedupKey, PulseError, RawRecord, StopReason};

/// Upper bound on up-front record storage; larger targets grow on demand.
const PREALLOCATED_RECORDS: usize = 1024;

/// Ordered, deduplicated record set for one run.
///
/// Append-only: records are accepted in discovery order and never removed.
#[derive(Debug)]
pub struct Accumulator {
    records: Vec<CommentRecord>,
    seen: HashSet<DedupKey>,
    target: usize,
}

impl Accumulator {
    /// Create an empty accumulator that is full at `target` records.
    #[must_use]
    pub fn new(target: usize) -> Self {
        Self {
            records: Vec::with_capacity(target.min(PREALLOCATED_RECORDS)),
            seen: HashSet::new(),
            target,
        }
    }

    /// Accept `record` if its triple was not seen this run and the target is
    /// not yet met. Returns whether it was accepted.
    pub fn offer(&mut self, record: CommentRecord) -> bool {
        if self.is_full() || !self.seen.insert(record.dedup_key()) {
            return false;
        }
        self.records.push(record);
        true
    }

    /// True once the target count has been reached.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.records.len() >= self.target
    }

    /// Number of accepted records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if nothing has been accepted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Accepted records in discovery order.
    #[must_use]
    pub fn into_records(self) -> Vec<CommentRecord> {
        self.records
    }
}

/// Build a normalized record from raw field text, substituting sentinels for
/// missing fields.
pub fn extract_record(raw: RawRecord, clock: &dyn Clock) -> CommentRecord {
    let trimmed = |s: Option<String>| s.map(|v| v.trim().to_string());
    let username = trimmed(raw.username_text).unwrap_or_else(|| ANONYMOUS_USER.to_string());
    let comment_content = trimmed(raw.content_text).unwrap_or_else(|| NO_CONTENT.to_string());
    let display_timestamp_raw =
        trimmed(raw.timestamp_text).unwrap_or_else(|| UNKNOWN_TIMESTAMP_TEXT.to_string());
    let timestamp = normalize_timestamp(&display_timestamp_raw, clock);
    CommentRecord {
        timestamp,
        username,
        comment_content,
        display_timestamp_raw,
    }
}

/// Result of one collection run.
#[derive(Debug)]
pub struct Collection {
    /// Accepted records in discovery order.
    pub records: Vec<CommentRecord>,
    /// Sampling passes performed.
    pub passes: usize,
    /// Records whose fields could not be extracted.
    pub skipped: usize,
    /// Why collection stopped.
    pub stop: StopReason,
    /// Pass-level source failures, in order of occurrence.
    pub warnings: Vec<PulseError>,
}

/// Collect unique records until the target is met or the budget is spent.
///
/// Each pass checks the budget, triggers `reveal_more`, waits
/// `sample_delay`, then re-reads every visible record and offers each one to
/// the accumulator. The budget is checked only at the top of a pass, so a run
/// can overrun it by at most one pass.
///
/// Failures never abort the run: an unreadable record is skipped, and a pass
/// whose reveal or read fails is logged and followed by the next pass.
#[tracing::instrument(
    name = "pulse::collect",
    skip(source, clock, cfg),
    fields(
        target = cfg.target,
        budget_ms = u64::try_from(cfg.time_budget.as_millis()).unwrap_or(u64::MAX),
    ),
)]
pub async fn collect<S>(source: &S, clock: &dyn Clock, cfg: &CollectorConfig) -> Collection
where
    S: SourceReader + ?Sized,
{
    let started = clock.instant();
    let mut acc = Accumulator::new(cfg.target);
    let mut passes = 0usize;
    let mut skipped = 0usize;
    let mut warnings = Vec::new();

    let stop = loop {
        if acc.is_full() {
            break StopReason::TargetReached;
        }
        let elapsed = clock.instant().saturating_duration_since(started);
        if elapsed > cfg.time_budget {
            tracing::info!(count = acc.len(), "time budget exhausted; stopping collection");
            break StopReason::BudgetExhausted;
        }

        passes += 1;
        if let Err(e) = source.reveal_more().await {
            tracing::warn!(pass = passes, error = %e.truncated(200), "reveal trigger failed");
            warnings.push(e);
        }
        tracing::debug!(pass = passes, count = acc.len(), "revealed more records");
        tokio::time::sleep(cfg.sample_delay).await;

        let visible = match source.read_visible_records().await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(pass = passes, error = %e.truncated(200), "reading visible records failed");
                warnings.push(e);
                continue;
            }
        };

        for item in visible {
            match item {
                Ok(raw) => {
                    acc.offer(extract_record(raw, clock));
                    if acc.is_full() {
                        break;
                    }
                }
                Err(e) => {
                    skipped += 1;
                    tracing::warn!(pass = passes, error = %e.truncated(200), "error extracting record");
                }
            }
        }
    };

    tracing::info!(count = acc.len(), passes, skipped, ?stop, "finished collection");
    Collection {
        records: acc.into_records(),
        passes,
        skipped,
        stop,
        warnings,
    }
}
