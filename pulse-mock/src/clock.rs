use std::sync::Mutex;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use pulse_core::Clock;
use pulse_core::records::FIXED_ZONE;

/// Settable wall clock. The monotonic side stays on Tokio's clock so
/// paused-time tests still drive budgets.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    /// Clock frozen at `now`.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Clock frozen at the given wall time in the fixed zone.
    ///
    /// # Panics
    /// Panics if the components do not name a valid local time.
    #[must_use]
    pub fn ist(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Self {
        let local = FIXED_ZONE
            .with_ymd_and_hms(year, month, day, hour, min, sec)
            .single()
            .expect("valid IST wall time");
        Self::new(local.with_timezone(&Utc))
    }

    /// Move the wall clock to `now`.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock() = now;
    }

    /// Move the wall clock forward by `by`.
    pub fn advance(&self, by: TimeDelta) {
        let mut guard = self.lock();
        *guard += by;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        self.now
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        *self.lock()
    }
}
