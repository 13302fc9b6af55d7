//! Delimited-table encoding for harvested records and decoding for analyzed rows.

use serde::Serialize;

use pulse_types::{CommentRecord, NewsItem, PulseError, SentimentRow};

/// Header of the exported comment table.
pub const COMMENT_COLUMNS: [&str; 3] = ["timestamp", "username", "comment_content"];
/// Header of the exported news table.
pub const NEWS_COLUMNS: [&str; 4] = ["timestamp", "title", "url", "description"];
/// Columns the daily digest requires in an analyzed table.
pub const SENTIMENT_COLUMNS: [&str; 3] = ["timestamp", "text_for_analysis", "sentiment"];

fn table_err(e: impl std::fmt::Display) -> PulseError {
    PulseError::Table(e.to_string())
}

/// Encode `rows` under `header`. The header row is written even when `rows`
/// is empty.
///
/// # Errors
/// Returns `PulseError::Table` if a row cannot be serialized.
pub fn write_table<T: Serialize>(header: &[&str], rows: &[T]) -> Result<Vec<u8>, PulseError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(header).map_err(table_err)?;
    for row in rows {
        wtr.serialize(row).map_err(table_err)?;
    }
    wtr.into_inner().map_err(table_err)
}

/// Encode comment records as `timestamp,username,comment_content`.
///
/// # Errors
/// Returns `PulseError::Table` on serialization failure.
pub fn comments_table(records: &[CommentRecord]) -> Result<Vec<u8>, PulseError> {
    write_table(&COMMENT_COLUMNS, records)
}

/// Encode news items as `timestamp,title,url,description`.
///
/// # Errors
/// Returns `PulseError::Table` on serialization failure.
pub fn news_table(items: &[NewsItem]) -> Result<Vec<u8>, PulseError> {
    write_table(&NEWS_COLUMNS, items)
}

/// Decode an analyzed table, checking the required columns first.
///
/// Extra columns are ignored.
///
/// # Errors
/// Returns `PulseError::MissingColumns` (sorted) when a required column is
/// absent, or `PulseError::Table` for malformed content.
pub fn read_sentiment_rows(bytes: &[u8]) -> Result<Vec<SentimentRow>, PulseError> {
    let mut rdr = csv::Reader::from_reader(bytes);
    let headers = rdr.headers().map_err(table_err)?.clone();
    let mut missing: Vec<String> = SENTIMENT_COLUMNS
        .iter()
        .filter(|c| !headers.iter().any(|h| h.trim() == **c))
        .map(|c| (*c).to_string())
        .collect();
    if !missing.is_empty() {
        missing.sort();
        return Err(PulseError::MissingColumns(missing));
    }
    rdr.deserialize::<SentimentRow>()
        .map(|r| r.map_err(table_err))
        .collect()
}
