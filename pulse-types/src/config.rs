//! Configuration types shared across the orchestrator and adapters.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Bounds for the incremental comment collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Stop once this many unique records were accepted.
    pub target: usize,
    /// Stop once the run has been collecting longer than this.
    pub time_budget: Duration,
    /// Pause between the reveal trigger and re-reading the visible records.
    pub sample_delay: Duration,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            target: 100,
            time_budget: Duration::from_secs(240),
            sample_delay: Duration::from_secs(5),
        }
    }
}

/// CSS selectors locating forum records and their fields.
///
/// Field selectors are resolved relative to each record container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForumSelectors {
    /// One element per visible comment.
    pub record: String,
    /// Display name inside a record.
    pub username: String,
    /// Body text inside a record.
    pub content: String,
    /// Timestamp text inside a record.
    pub timestamp: String,
}

impl Default for ForumSelectors {
    fn default() -> Self {
        Self {
            record: "div.topicPage_read_list__14okt".to_string(),
            username: "div.postItem_user_area__28qZr div.postItem_user_name__ixoND div.postItem_username__2r1i_".to_string(),
            content: "div.postItem_text_paragraph__3XhZQ span".to_string(),
            timestamp: "div.postItem_price__1yXow".to_string(),
        }
    }
}

/// Forum topic page settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForumConfig {
    /// Topic page to harvest.
    pub url: String,
    /// Maximum wait for the first record container after loading.
    pub ready_timeout: Duration,
    /// Script executed once per pass to make more records visible.
    pub reveal_script: String,
    /// Record and field selectors.
    pub selectors: ForumSelectors,
    /// File name (inside the work dir) for the load-failure screenshot.
    pub diagnostic_file: String,
    /// Prefix of the exported table's file name.
    pub file_prefix: String,
}

impl Default for ForumConfig {
    fn default() -> Self {
        Self {
            url: "https://mmb.moneycontrol.com/forum-topics/stocks/nifty-50-244399.html".to_string(),
            ready_timeout: Duration::from_secs(10),
            reveal_script: "window.scrollTo(0, document.body.scrollHeight);".to_string(),
            selectors: ForumSelectors::default(),
            diagnostic_file: "error_screenshot.png".to_string(),
            file_prefix: "nifty_forum_comments".to_string(),
        }
    }
}

/// CSS selectors for the news listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsSelectors {
    /// One element per headline.
    pub item: String,
    /// Anchor carrying title and link, relative to an item.
    pub headline: String,
    /// Teaser paragraph, relative to an item.
    pub description: String,
}

impl Default for NewsSelectors {
    fn default() -> Self {
        Self {
            item: "div.topictabpane#t_top li.clearfix".to_string(),
            headline: "h2 a".to_string(),
            description: "p".to_string(),
        }
    }
}

/// News listing page settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    /// Listing page to harvest.
    pub url: String,
    /// Prefix shared by the saved page and the exported table.
    pub file_prefix: String,
    /// Item and field selectors.
    pub selectors: NewsSelectors,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            url: "https://www.moneycontrol.com/news/tags/nifty.html/news/".to_string(),
            file_prefix: "moneycontrol_news".to_string(),
            selectors: NewsSelectors::default(),
        }
    }
}

/// Staging locations for harvested artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Destination bucket for raw artifacts.
    pub bucket: String,
    /// Key prefix for delimited tables.
    pub csv_prefix: String,
    /// Key prefix for saved pages.
    pub html_prefix: String,
    /// Directory for local copies before transfer.
    pub work_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: "news-scraped-data".to_string(),
            csv_prefix: "csv/".to_string(),
            html_prefix: "html/".to_string(),
            work_dir: PathBuf::from("."),
        }
    }
}

/// Daily digest settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    /// Bucket receiving generated summaries.
    pub output_bucket: String,
    /// Key prefix for generated summaries.
    pub output_prefix: String,
    /// Subject line of the subscriber notification.
    pub subject: String,
    /// Model identifier passed to the summarizer.
    pub model: String,
    /// Completion length cap.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            output_bucket: "llm-summary".to_string(),
            output_prefix: "txt/".to_string(),
            subject: "Your Daily Market Sentiment Summary".to_string(),
            model: "claude-3-5-sonnet-20241022".to_string(),
            max_tokens: 1024,
            temperature: 0.7,
        }
    }
}

/// Batch analysis job settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Job names are `<prefix>-<YYYYMMDD-HHMMSS>`.
    pub job_prefix: String,
    /// Container image run by the job.
    pub image_uri: String,
    /// Execution role granted to the job.
    pub role_arn: String,
    /// Instance type label.
    pub instance_type: String,
    /// Number of instances.
    pub instance_count: u32,
    /// Attached volume size in GB.
    pub volume_gb: u32,
    /// Prefix URI mounted as job input.
    pub input_uri: String,
    /// Mount path for the input inside the container.
    pub input_path: String,
    /// Prefix URI receiving job output.
    pub output_uri: String,
    /// Container path whose contents are uploaded at the end of the job.
    pub output_path: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            job_prefix: "scheduled-news-analyzer".to_string(),
            image_uri: String::new(),
            role_arn: String::new(),
            instance_type: "ml.t3.medium".to_string(),
            instance_count: 1,
            volume_gb: 2,
            input_uri: "s3://news-scraped-data/csv/".to_string(),
            input_path: "/opt/ml/processing/input".to_string(),
            output_uri: "s3://sentiment-analyzed-data/csv/".to_string(),
            output_path: "/opt/ml/processing/output".to_string(),
        }
    }
}

/// Global configuration for the `Pulse` orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// Collector bounds.
    pub collector: CollectorConfig,
    /// Forum page settings.
    pub forum: ForumConfig,
    /// News listing settings.
    pub news: NewsConfig,
    /// Artifact staging.
    pub storage: StorageConfig,
    /// Daily digest.
    pub digest: DigestConfig,
    /// Batch analysis job.
    pub dispatch: DispatchConfig,
}
