//! Normalization of display timestamps into absolute times in the fixed zone.
//!
//! Two display forms are recognized, checked in order:
//! - relative: "2 hours 15 mins ago", "45 secs ago", "1 hour ago";
//! - absolute without a year: "9:37 AM Nov 29th".
//!
//! Anything else, and any failure while parsing a recognized form, yields
//! [`PostedAt::Unavailable`]. Normalization never returns an error.

use chrono::{Datelike, NaiveDateTime, TimeDelta};

use crate::connector::Clock;
use pulse_types::PostedAt;
use pulse_types::records::FIXED_ZONE;

/// Decorative prefix some sources render before the timestamp text.
pub const DISPLAY_PREFIX: &str = "schedule";

const RELATIVE_UNITS: [&str; 3] = ["hour", "min", "sec"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const ORDINAL_SUFFIXES: [&str; 4] = ["th", "st", "nd", "rd"];
const ABSOLUTE_FORMAT: &str = "%I:%M %p %b %d %Y";

/// Shape of a display timestamp, decided before any numeric parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampForm {
    /// Mentions hours, minutes, or seconds.
    Relative,
    /// Mentions a three-letter month abbreviation.
    Absolute,
    /// Neither.
    Unrecognized,
}

/// Remove the display prefix and surrounding whitespace.
#[must_use]
pub fn strip_display_prefix(raw: &str) -> String {
    raw.replace(DISPLAY_PREFIX, "").trim().to_string()
}

/// Classify already-stripped text. Relative wins over absolute.
#[must_use]
pub fn classify(text: &str) -> TimestampForm {
    if RELATIVE_UNITS.iter().any(|u| text.contains(u)) {
        TimestampForm::Relative
    } else if MONTHS.iter().any(|m| text.contains(m)) {
        TimestampForm::Absolute
    } else {
        TimestampForm::Unrecognized
    }
}

/// Parse the elapsed duration of a relative display timestamp.
///
/// Each unit's count is the last whitespace token in front of the unit word,
/// looking only past the preceding larger unit. Units that are absent, or
/// whose segment is empty, count as zero. Returns `None` when a count is not
/// a non-negative integer.
#[must_use]
pub fn parse_relative(text: &str) -> Option<TimeDelta> {
    let mut hours = 0;
    let mut minutes = 0;
    let mut seconds = 0;

    if text.contains("hour") {
        hours = count_before(text, "hour")?;
    }
    if text.contains("min") {
        minutes = count_before(after_last(text, "hour"), "min")?;
    }
    if text.contains("sec") {
        seconds = count_before(after_last(text, "min"), "sec")?;
    }

    TimeDelta::try_hours(hours)?
        .checked_add(&TimeDelta::try_minutes(minutes)?)?
        .checked_add(&TimeDelta::try_seconds(seconds)?)
}

fn after_last<'a>(text: &'a str, unit: &str) -> &'a str {
    if text.contains(unit) {
        text.rsplit(unit).next().unwrap_or("")
    } else {
        text
    }
}

fn count_before(segment: &str, unit: &str) -> Option<i64> {
    let head = segment.split(unit).next().unwrap_or("").trim();
    match head.split_whitespace().last() {
        None => Some(0),
        Some(token) => token.parse::<u32>().ok().map(i64::from),
    }
}

/// Parse an absolute `h:mm AM/PM Mon D[suffix]` display time in `year`.
///
/// Ordinal suffixes are removed first; text without them is unaffected.
#[must_use]
pub fn parse_absolute(text: &str, year: i32) -> Option<NaiveDateTime> {
    let mut cleaned = text.to_string();
    for suffix in ORDINAL_SUFFIXES {
        cleaned = cleaned.replace(suffix, "");
    }
    let with_year = format!("{} {year}", cleaned.trim());
    NaiveDateTime::parse_from_str(&with_year, ABSOLUTE_FORMAT).ok()
}

/// Normalize a raw display timestamp against `clock`.
///
/// "Now" is sampled from the clock on every call, so two relative records
/// normalized moments apart may differ by the elapsed time between them.
/// Absolute times are taken as already expressed in the fixed zone, and the
/// year is the clock's current year there.
pub fn normalize_timestamp(raw: &str, clock: &dyn Clock) -> PostedAt {
    let text = strip_display_prefix(raw);
    match classify(&text) {
        TimestampForm::Relative => {
            let Some(elapsed) = parse_relative(&text) else {
                tracing::debug!(text = %text, "unparseable relative timestamp");
                return PostedAt::Unavailable;
            };
            let now = clock.now_in(FIXED_ZONE).naive_local();
            now.checked_sub_signed(elapsed)
                .map_or(PostedAt::Unavailable, PostedAt::At)
        }
        TimestampForm::Absolute => {
            let year = clock.now_in(FIXED_ZONE).year();
            match parse_absolute(&text, year) {
                Some(t) => PostedAt::At(t),
                None => {
                    tracing::debug!(text = %text, "unparseable absolute timestamp");
                    PostedAt::Unavailable
                }
            }
        }
        TimestampForm::Unrecognized => PostedAt::Unavailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_prefers_relative_units() {
        assert_eq!(classify("2 hours 15 mins ago"), TimestampForm::Relative);
        assert_eq!(classify("1 min ago"), TimestampForm::Relative);
        assert_eq!(classify("30 secs ago"), TimestampForm::Relative);
        assert_eq!(classify("9:37 AM Nov 29th"), TimestampForm::Absolute);
        assert_eq!(classify("yesterday"), TimestampForm::Unrecognized);
        assert_eq!(classify(""), TimestampForm::Unrecognized);
    }

    #[test]
    fn relative_units_default_to_zero() {
        assert_eq!(parse_relative("1 hour ago"), TimeDelta::try_hours(1));
        assert_eq!(parse_relative("5 mins"), TimeDelta::try_minutes(5));
        assert_eq!(parse_relative("1 min ago"), TimeDelta::try_minutes(1));
        assert_eq!(parse_relative("40 secs ago"), TimeDelta::try_seconds(40));
    }

    #[test]
    fn relative_combines_units() {
        let expected = TimeDelta::try_seconds(2 * 3600 + 15 * 60).unwrap();
        assert_eq!(parse_relative("2 hours 15 mins ago"), Some(expected));

        let expected = TimeDelta::try_seconds(60 + 30).unwrap();
        assert_eq!(parse_relative("1 min 30 secs ago"), Some(expected));

        let expected = TimeDelta::try_seconds(3 * 3600 + 4 * 60 + 5).unwrap();
        assert_eq!(parse_relative("3 hours 4 mins 5 secs ago"), Some(expected));
    }

    #[test]
    fn relative_with_empty_segment_counts_zero() {
        assert_eq!(parse_relative("hour ago"), Some(TimeDelta::zero()));
    }

    #[test]
    fn relative_with_words_for_counts_is_rejected() {
        assert_eq!(parse_relative("an hour ago"), None);
        assert_eq!(parse_relative("a few mins ago"), None);
        assert_eq!(parse_relative("-5 mins ago"), None);
    }

    #[test]
    fn absolute_strips_ordinals() {
        let t = parse_absolute("9:37 AM Nov 29th", 2024).unwrap();
        assert_eq!(t.to_string(), "2024-11-29 09:37:00");
        let t = parse_absolute("11:05 PM Aug 1st", 2023).unwrap();
        assert_eq!(t.to_string(), "2023-08-01 23:05:00");
        let t = parse_absolute("12:00 PM Mar 22nd", 2024).unwrap();
        assert_eq!(t.to_string(), "2024-03-22 12:00:00");
        let t = parse_absolute("7:15 AM Oct 3rd", 2024).unwrap();
        assert_eq!(t.to_string(), "2024-10-03 07:15:00");
    }

    #[test]
    fn absolute_without_suffix_is_a_noop_strip() {
        let t = parse_absolute("9:37 AM Nov 29", 2024).unwrap();
        assert_eq!(t.to_string(), "2024-11-29 09:37:00");
    }

    #[test]
    fn absolute_rejects_impossible_dates() {
        assert!(parse_absolute("9:37 AM Feb 30th", 2024).is_none());
        assert!(parse_absolute("Nov 29th", 2024).is_none());
    }

    #[test]
    fn display_prefix_is_removed() {
        assert_eq!(strip_display_prefix("schedule 5 mins ago"), "5 mins ago");
        assert_eq!(strip_display_prefix("  9:37 AM Nov 29th "), "9:37 AM Nov 29th");
    }
}
