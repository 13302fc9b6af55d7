//! `pulse` command-line runner.

mod cli;
mod config;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use pulse::{Pulse, PulseConfig};
use pulse_core::ObjectStore;
use pulse_services::{
    AnthropicSummarizer, FsObjectStore, HttpJobDispatcher, HttpObjectStore, HttpPageFetcher,
    WebhookNotifier,
};
use pulse_webdriver::WebDriverClient;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, StoreArgs};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn object_store(args: &StoreArgs) -> Result<Arc<dyn ObjectStore>> {
    if let Some(url) = &args.store_url {
        let mut store = HttpObjectStore::new(url)?;
        if let Some(token) = &args.store_token {
            store = store.with_token(token);
        }
        return Ok(Arc::new(store));
    }
    Ok(Arc::new(FsObjectStore::new(&args.store_root)))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let mut cfg: PulseConfig = config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.work_dir {
        cfg.storage.work_dir = dir;
    }
    let builder = Pulse::builder().with_store(object_store(&cli.store)?);

    match cli.command {
        Command::Comments {
            webdriver,
            headed,
            target,
            budget_secs,
        } => {
            if let Some(t) = target {
                cfg.collector.target = t;
            }
            if let Some(s) = budget_secs {
                cfg.collector.time_budget = Duration::from_secs(s);
            }
            let pulse = builder.config(cfg).build()?;
            let client = WebDriverClient::new(&webdriver)?.headless(!headed);
            let session = client
                .start_session(&pulse.config().forum)
                .await
                .context("starting browser session")?;

            let report = pulse.harvest_comments(&session).await;
            if let Err(e) = session.quit().await {
                tracing::warn!(error = %e, "closing browser session failed");
            }
            print_json(&report)
        }
        Command::News => {
            let pulse = builder
                .with_fetcher(Arc::new(HttpPageFetcher::new()?))
                .config(cfg)
                .build()?;
            match pulse.harvest_news().await {
                Ok(report) => print_json(&report),
                Err(e) if e.is_fatal() => Err(e.into()),
                Err(e) => {
                    tracing::error!(error = %e.truncated(200), "news harvest skipped");
                    Ok(())
                }
            }
        }
        Command::Digest {
            bucket,
            key,
            api_key,
            api_url,
            webhook,
        } => {
            let api_key = api_key.ok_or_else(|| anyhow!("ANTHROPIC_API_KEY is not set"))?;
            let webhook = webhook.ok_or_else(|| anyhow!("PULSE_WEBHOOK_URL is not set"))?;
            let mut summarizer = AnthropicSummarizer::new(&api_key)?;
            if let Some(url) = api_url {
                summarizer = summarizer.with_base_url(&url)?;
            }
            let pulse = builder
                .with_summarizer(Arc::new(summarizer))
                .with_notifier(Arc::new(WebhookNotifier::new(&webhook)?))
                .config(cfg)
                .build()?;
            let report = pulse.digest(&bucket, &key).await?;
            print_json(&report)
        }
        Command::Dispatch { jobs_url } => {
            let jobs_url = jobs_url.ok_or_else(|| anyhow!("PULSE_JOBS_URL is not set"))?;
            let pulse = builder
                .with_dispatcher(Arc::new(HttpJobDispatcher::new(&jobs_url)?))
                .config(cfg)
                .build()?;
            let receipt = pulse.dispatch_analysis().await?;
            print_json(&receipt)
        }
    }
}
