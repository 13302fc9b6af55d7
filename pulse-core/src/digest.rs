//! Assembly of the daily digest request from analyzed rows.

use serde::{Deserialize, Serialize};

use pulse_types::{DigestConfig, SentimentRow};

/// A single-turn summarization request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// Model identifier.
    pub model: String,
    /// Full user prompt.
    pub prompt: String,
    /// Completion length cap.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Fold analyzed rows into the block quoted inside the prompt.
#[must_use]
pub fn combine_rows(rows: &[SentimentRow]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&format!("DateTime: {}\n", row.timestamp));
        out.push_str(&format!("Text: {}\n", row.text_for_analysis));
        out.push_str(&format!("Sentiment: {}\n\n", row.sentiment));
    }
    out
}

/// Wrap the combined rows in the subscriber-email instruction.
#[must_use]
pub fn build_prompt(combined: &str) -> String {
    format!(
        "You are a great stock market analyzer and you are tasked with generating a comprehensive \
         daily summary of the market for our subscribed users from the following daily sentiment \
         analysis results:\n\n{combined}\n\
         Output only in the format below and do not add any preamble.\n\n\
         Output:\n\n\
         Dear Subscriber,\n\n\
         Here is your daily summary of market sentiments and key events:\n\n\
         <Put Your Summary Here>\n\n\
         Best regards,\nYour Market Insights Team"
    )
}

/// Build the summarization request for `rows` under `cfg`.
#[must_use]
pub fn summary_request(rows: &[SentimentRow], cfg: &DigestConfig) -> SummaryRequest {
    SummaryRequest {
        model: cfg.model.clone(),
        prompt: build_prompt(&combine_rows(rows)),
        max_tokens: cfg.max_tokens,
        temperature: cfg.temperature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(ts: &str, text: &str, sentiment: &str) -> SentimentRow {
        SentimentRow {
            timestamp: ts.into(),
            text_for_analysis: text.into(),
            sentiment: sentiment.into(),
        }
    }

    #[test]
    fn rows_are_folded_in_order() {
        let combined = combine_rows(&[
            row("2024-11-29 09:37:00 IST", "Nifty opens flat", "neutral"),
            row("2024-11-29 10:02:00 IST", "Banks rally", "positive"),
        ]);
        assert_eq!(
            combined,
            "DateTime: 2024-11-29 09:37:00 IST\nText: Nifty opens flat\nSentiment: neutral\n\n\
             DateTime: 2024-11-29 10:02:00 IST\nText: Banks rally\nSentiment: positive\n\n"
        );
    }

    #[test]
    fn request_carries_config_and_rows() {
        let cfg = DigestConfig::default();
        let req = summary_request(&[row("t", "Banks rally", "positive")], &cfg);
        assert_eq!(req.max_tokens, 1024);
        assert_eq!(req.model, cfg.model);
        assert!(req.prompt.contains("Text: Banks rally"));
        assert!(req.prompt.starts_with("You are a great stock market analyzer"));
        assert!(req.prompt.ends_with("Your Market Insights Team"));
    }
}
