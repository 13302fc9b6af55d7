//! Headline extraction from a saved news listing page.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use pulse_types::records::{NO_DESCRIPTION, NO_TITLE, NO_URL, TIMESTAMP_UNAVAILABLE};
use pulse_types::{NewsItem, NewsSelectors, PulseError};

static MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("static regex"));

fn selector(css: &str) -> Result<Selector, PulseError> {
    Selector::parse(css).map_err(|e| PulseError::InvalidArg(format!("selector {css:?}: {e}")))
}

fn stripped_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).collect::<String>()
}

/// The listing embeds each item's publication time in an HTML comment.
fn comment_timestamp(item: ElementRef<'_>) -> Option<String> {
    item.descendants()
        .find_map(|node| {
            node.value().as_comment().map(|c| {
                let text: &str = &c.comment;
                text.to_string()
            })
        })
        .map(|c| MARKUP.replace_all(c.trim(), "").trim().to_string())
}

/// Extract headline items from a listing page.
///
/// Items without a headline anchor, link, or teaser paragraph are kept with
/// sentinel values rather than dropped.
///
/// # Errors
/// Returns `PulseError::InvalidArg` if a configured selector does not parse.
pub fn extract_news(html: &str, selectors: &NewsSelectors) -> Result<Vec<NewsItem>, PulseError> {
    let item_sel = selector(&selectors.item)?;
    let headline_sel = selector(&selectors.headline)?;
    let description_sel = selector(&selectors.description)?;

    let document = Html::parse_document(html);
    let items = document
        .select(&item_sel)
        .map(|item| {
            let headline = item.select(&headline_sel).next();
            let title = headline.map_or_else(|| NO_TITLE.to_string(), stripped_text);
            let url = headline
                .and_then(|a| a.value().attr("href"))
                .map_or_else(|| NO_URL.to_string(), str::to_string);
            let description = item
                .select(&description_sel)
                .next()
                .map_or_else(|| NO_DESCRIPTION.to_string(), stripped_text);
            let timestamp =
                comment_timestamp(item).unwrap_or_else(|| TIMESTAMP_UNAVAILABLE.to_string());
            NewsItem {
                timestamp,
                title,
                url,
                description,
            }
        })
        .collect();
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <div class="topictabpane" id="t_top">
          <ul>
            <li class="clearfix">
              <!-- <span>November 29, 2024 09:37 AM IST</span> -->
              <h2><a href="https://example.test/a1">Nifty ends higher</a></h2>
              <p>Banks led the rally.</p>
            </li>
            <li class="clearfix">
              <h2>No anchor here</h2>
            </li>
          </ul>
        </div>
        <div class="topictabpane" id="t_other">
          <ul><li class="clearfix"><h2><a href="/ignored">Other tab</a></h2></li></ul>
        </div>
        </body></html>
    "#;

    #[test]
    fn extracts_items_from_the_top_tab_only() {
        let items = extract_news(PAGE, &NewsSelectors::default()).unwrap();
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].title, "Nifty ends higher");
        assert_eq!(items[0].url, "https://example.test/a1");
        assert_eq!(items[0].description, "Banks led the rally.");
        assert_eq!(items[0].timestamp, "November 29, 2024 09:37 AM IST");

        assert_eq!(items[1].title, NO_TITLE);
        assert_eq!(items[1].url, NO_URL);
        assert_eq!(items[1].description, NO_DESCRIPTION);
        assert_eq!(items[1].timestamp, TIMESTAMP_UNAVAILABLE);
    }

    #[test]
    fn bad_selector_is_rejected() {
        let sel = NewsSelectors {
            item: "li[".to_string(),
            ..NewsSelectors::default()
        };
        assert!(matches!(extract_news(PAGE, &sel), Err(PulseError::InvalidArg(_))));
    }
}
