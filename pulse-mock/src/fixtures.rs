//! Canned page snapshots, listings, and tables.

use pulse_core::{Extracted, PulseError, RawRecord};

/// A forum entry shown with a relative timestamp, numbered for uniqueness.
#[must_use]
pub fn comment(n: usize) -> Extracted {
    Ok(RawRecord::new(
        format!("trader{n}"),
        format!("Nifty view #{n}"),
        format!("schedule {} mins ago", n % 50 + 1),
    ))
}

/// An entry whose fields could not be located.
#[must_use]
pub fn broken() -> Extracted {
    Err(PulseError::Extraction("stale element reference".into()))
}

/// The first `visible` entries of an append-only listing.
#[must_use]
pub fn listing(visible: usize) -> Vec<Extracted> {
    (1..=visible).map(comment).collect()
}

/// Snapshot seen on the first read of a typical session.
#[must_use]
pub fn forum_snapshot() -> Vec<Extracted> {
    vec![
        Ok(RawRecord::new(
            "bullrun",
            "Nifty holding 24k support",
            "schedule 2 hours 15 mins ago",
        )),
        Ok(RawRecord::new("optionwala", "Buying 24500 CE", "5 mins")),
        Ok(RawRecord::new(
            "longterm",
            "Results season ahead",
            "schedule 9:37 AM Nov 29th",
        )),
        Ok(RawRecord {
            username_text: None,
            content_text: Some("Who else is short?".into()),
            timestamp_text: None,
        }),
    ]
}

/// A news listing page in the layout the news harvester expects.
pub const NEWS_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<div class="topictabpane" id="t_top">
  <ul>
    <li class="clearfix">
      <!-- <span>December 03, 2024 09:12 PM IST</span> -->
      <h2><a href="https://news.example.test/markets/nifty-ends-higher">Nifty ends higher as banks rally</a></h2>
      <p>Private lenders led gains in the final hour.</p>
    </li>
    <li class="clearfix">
      <!-- <span>December 03, 2024 08:40 PM IST</span> -->
      <h2><a href="https://news.example.test/markets/rupee">Rupee slips against dollar</a></h2>
      <p>Importer demand weighed on the currency.</p>
    </li>
  </ul>
</div>
</body></html>
"#;

/// An analyzed sentiment table.
pub const SENTIMENT_CSV: &str = "\
timestamp,text_for_analysis,sentiment,score
2024-12-03 21:12:00 IST,Nifty ends higher as banks rally,positive,0.91
2024-12-03 20:40:00 IST,Rupee slips against dollar,negative,0.77
";
