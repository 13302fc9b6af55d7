//! Record types produced by the harvesters and written to delimited tables.

use core::fmt;
use core::str::FromStr;

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical output zone for every normalized timestamp.
pub const FIXED_ZONE: Tz = chrono_tz::Asia::Kolkata;
/// Label appended to formatted timestamps in [`FIXED_ZONE`].
pub const ZONE_LABEL: &str = "IST";
/// Wall-clock layout used before the zone label.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sentinel written when a timestamp cannot be normalized.
pub const TIMESTAMP_UNAVAILABLE: &str = "Timestamp not available";
/// Sentinel for a record without a display name.
pub const ANONYMOUS_USER: &str = "Anonymous";
/// Sentinel for a record without body text.
pub const NO_CONTENT: &str = "No content available";
/// Placeholder used when the source showed no timestamp text at all.
pub const UNKNOWN_TIMESTAMP_TEXT: &str = "Unknown";

/// Sentinel for a news item without a headline.
pub const NO_TITLE: &str = "No title available";
/// Sentinel for a news item without a link.
pub const NO_URL: &str = "No URL available";
/// Sentinel for a news item without a summary paragraph.
pub const NO_DESCRIPTION: &str = "No description available";

/// An as-displayed comment entry before normalization.
///
/// Each field is `None` when the source rendered no text for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// Display name text.
    pub username_text: Option<String>,
    /// Body text.
    pub content_text: Option<String>,
    /// Timestamp text exactly as shown (e.g. "schedule 2 hours 15 mins ago").
    pub timestamp_text: Option<String>,
}

impl RawRecord {
    /// Convenience constructor with every field present.
    pub fn new(
        username: impl Into<String>,
        content: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            username_text: Some(username.into()),
            content_text: Some(content.into()),
            timestamp_text: Some(timestamp.into()),
        }
    }
}

/// Absolute posting time in [`FIXED_ZONE`], or the explicit sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostedAt {
    /// Wall-clock time in the fixed zone.
    At(NaiveDateTime),
    /// The display text could not be normalized.
    Unavailable,
}

impl PostedAt {
    /// Returns the wall-clock time when available.
    #[must_use]
    pub const fn wall_time(&self) -> Option<NaiveDateTime> {
        match self {
            Self::At(t) => Some(*t),
            Self::Unavailable => None,
        }
    }
}

impl fmt::Display for PostedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(t) => write!(f, "{} {ZONE_LABEL}", t.format(TIMESTAMP_FORMAT)),
            Self::Unavailable => f.write_str(TIMESTAMP_UNAVAILABLE),
        }
    }
}

impl FromStr for PostedAt {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == TIMESTAMP_UNAVAILABLE {
            return Ok(Self::Unavailable);
        }
        let wall = s.strip_suffix(ZONE_LABEL).unwrap_or(s).trim_end();
        NaiveDateTime::parse_from_str(wall, TIMESTAMP_FORMAT).map(Self::At)
    }
}

impl Serialize for PostedAt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PostedAt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A normalized forum comment.
///
/// Serialized field order matches the exported table header
/// `timestamp,username,comment_content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    /// Normalized posting time.
    pub timestamp: PostedAt,
    /// Display name, or [`ANONYMOUS_USER`].
    pub username: String,
    /// Body text, or [`NO_CONTENT`].
    pub comment_content: String,
    /// Timestamp text as shown by the source.
    #[serde(skip)]
    pub display_timestamp_raw: String,
}

impl CommentRecord {
    /// Identity used to drop repeats within one run.
    #[must_use]
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            username: self.username.clone(),
            comment_content: self.comment_content.clone(),
            timestamp: self.timestamp,
        }
    }
}

/// The `(username, comment_content, normalized timestamp)` uniqueness triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    /// Display name.
    pub username: String,
    /// Body text.
    pub comment_content: String,
    /// Normalized posting time.
    pub timestamp: PostedAt,
}

/// A headline from the news listing page.
///
/// Serialized field order matches `timestamp,title,url,description`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Publication time text as embedded in the listing.
    pub timestamp: String,
    /// Headline.
    pub title: String,
    /// Article link.
    pub url: String,
    /// Teaser paragraph.
    pub description: String,
}

/// One analyzed row consumed by the daily digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentRow {
    /// Posting or publication time.
    pub timestamp: String,
    /// Text that was scored.
    pub text_for_analysis: String,
    /// Sentiment label assigned downstream.
    pub sentiment: String,
}
