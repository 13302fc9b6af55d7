use chrono::{NaiveDate, TimeDelta};
use proptest::prelude::*;
use pulse_core::{PostedAt, normalize_timestamp};
use pulse_mock::FixedClock;

fn ten_am() -> FixedClock {
    FixedClock::ist(2024, 1, 1, 10, 0, 0)
}

#[test]
fn relative_hours_and_minutes() {
    let got = normalize_timestamp("2 hours 15 mins ago", &ten_am());
    assert_eq!(got.to_string(), "2024-01-01 07:45:00 IST");
}

#[test]
fn relative_without_suffix_or_prefix() {
    assert_eq!(
        normalize_timestamp("5 mins", &ten_am()).to_string(),
        "2024-01-01 09:55:00 IST"
    );
    assert_eq!(
        normalize_timestamp("schedule 45 secs ago", &ten_am()).to_string(),
        "2024-01-01 09:59:15 IST"
    );
}

#[test]
fn relative_crosses_midnight() {
    let clock = FixedClock::ist(2024, 3, 1, 0, 30, 0);
    assert_eq!(
        normalize_timestamp("1 hour ago", &clock).to_string(),
        "2024-02-29 23:30:00 IST"
    );
}

#[test]
fn absolute_uses_current_year() {
    let clock = FixedClock::ist(2024, 12, 3, 21, 0, 0);
    assert_eq!(
        normalize_timestamp("schedule 9:37 AM Nov 29th", &clock).to_string(),
        "2024-11-29 09:37:00 IST"
    );
    assert_eq!(
        normalize_timestamp("12:05 PM Dec 1st", &clock).to_string(),
        "2024-12-01 12:05:00 IST"
    );
}

#[test]
fn absolute_leap_day_depends_on_year() {
    let leap = FixedClock::ist(2024, 3, 1, 9, 0, 0);
    let plain = FixedClock::ist(2023, 3, 1, 9, 0, 0);
    assert_eq!(
        normalize_timestamp("8:00 AM Feb 29th", &leap).to_string(),
        "2024-02-29 08:00:00 IST"
    );
    assert_eq!(
        normalize_timestamp("8:00 AM Feb 29th", &plain),
        PostedAt::Unavailable
    );
}

#[test]
fn unrecognized_and_malformed_yield_sentinel() {
    let clock = ten_am();
    for raw in ["yesterday", "", "Unknown", "a few mins ago", "25:99 XM Nov 40th"] {
        assert_eq!(
            normalize_timestamp(raw, &clock).to_string(),
            "Timestamp not available",
            "input {raw:?}"
        );
    }
}

proptest! {
    #[test]
    fn normalization_never_panics(raw in "\\PC{0,40}") {
        let _ = normalize_timestamp(&raw, &ten_am());
    }

    #[test]
    fn relative_subtracts_exact_duration(h in 0u32..48, m in 0u32..60, s in 0u32..60) {
        let raw = format!("schedule {h} hours {m} mins {s} secs ago");
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
            - TimeDelta::seconds(i64::from(h) * 3600 + i64::from(m) * 60 + i64::from(s));
        prop_assert_eq!(normalize_timestamp(&raw, &ten_am()), PostedAt::At(expected));
    }
}
