use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pulse")]
#[command(about = "Harvest finance forum comments and news, and produce daily digests")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file; missing sections use defaults
    #[arg(short, long, global = true, env = "PULSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory for local copies before upload
    #[arg(long, global = true, env = "PULSE_WORK_DIR")]
    pub work_dir: Option<PathBuf>,

    #[command(flatten)]
    pub store: StoreArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Object store selection. An endpoint URL wins over a local root.
#[derive(Args, Debug)]
pub struct StoreArgs {
    /// Local directory used as the object store
    #[arg(long, global = true, env = "PULSE_STORE_ROOT", default_value = "object-store")]
    pub store_root: PathBuf,

    /// Path-style HTTP object store endpoint
    #[arg(long, global = true, env = "PULSE_STORE_URL")]
    pub store_url: Option<String>,

    /// Bearer token for the HTTP object store
    #[arg(long, global = true, env = "PULSE_STORE_TOKEN", hide_env_values = true)]
    pub store_token: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Harvest forum comments through a WebDriver browser session
    Comments {
        /// WebDriver endpoint (geckodriver or a Selenium grid)
        #[arg(long, env = "PULSE_WEBDRIVER_URL", default_value = "http://localhost:4444")]
        webdriver: String,

        /// Show the browser window
        #[arg(long)]
        headed: bool,

        /// Override the target record count
        #[arg(long)]
        target: Option<usize>,

        /// Override the collection time budget, in seconds
        #[arg(long)]
        budget_secs: Option<u64>,
    },

    /// Harvest the news listing page
    News,

    /// Summarize an analyzed table and notify subscribers
    Digest {
        /// Bucket holding the analyzed table
        #[arg(long)]
        bucket: String,

        /// Key of the analyzed table
        #[arg(long)]
        key: String,

        /// Messages API key
        #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Messages API root
        #[arg(long, env = "ANTHROPIC_BASE_URL")]
        api_url: Option<String>,

        /// Webhook receiving the summary
        #[arg(long, env = "PULSE_WEBHOOK_URL")]
        webhook: Option<String>,
    },

    /// Submit the sentiment-analysis batch job
    Dispatch {
        /// Batch job service endpoint
        #[arg(long, env = "PULSE_JOBS_URL")]
        jobs_url: Option<String>,
    },
}
