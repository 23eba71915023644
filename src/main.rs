//! dm-scrape main entry point
//!
//! This is the command-line interface for the dm-scrape comment scraper.

use anyhow::{Context, Result};
use clap::Parser;
use dm_scrape::config::{load_config_or_default, validate, Config};
use dm_scrape::output::{comments_to_csv, output_path, save_comments};
use dm_scrape::render::ChromiumRenderClient;
use dm_scrape::{scrape, ArticleResolver};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// dm-scrape: pull reader comments from a Daily Mail article
///
/// The comment API only answers a real browser, so dm-scrape drives a
/// headless Chromium to fetch it and saves the comments as CSV.
#[derive(Parser, Debug)]
#[command(name = "dm-scrape")]
#[command(version)]
#[command(about = "Scrape Daily Mail reader comments to CSV", long_about = None)]
#[command(after_help = "Comments are saved to <slug>-comments.csv, where <slug> is the \
article name at the end of the URL.")]
struct Cli {
    /// Daily Mail article URL
    #[arg(value_name = "DAILY MAIL URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of comments to request
    #[arg(long, value_name = "N")]
    max_comments: Option<u32>,

    /// Seconds to wait for the comment page to load
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Retries after a malformed comment payload
    #[arg(long, value_name = "N")]
    retries: Option<u32>,

    /// Directory to write the CSV file to
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Accept article URLs on any host
    #[arg(long)]
    no_host_check: bool,

    /// Show the browser window
    #[arg(long)]
    headful: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(max_comments) = self.max_comments {
            config.scrape.max_comments = max_comments;
        }
        if let Some(timeout) = self.timeout {
            config.scrape.timeout_secs = timeout;
        }
        if let Some(retries) = self.retries {
            config.scrape.max_retries = retries;
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory = dir.clone();
        }
        if self.no_host_check {
            config.scrape.validate_host = false;
        }
        if self.headful {
            config.browser.headless = false;
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match run(&cli).await {
        Ok(path) => {
            tracing::info!("scrape successful!");
            if !cli.quiet {
                println!("{}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to scrape, {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the output path.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("dm_scrape=info,warn"),
            1 => EnvFilter::new("dm_scrape=debug,info"),
            2 => EnvFilter::new("dm_scrape=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Runs the whole pipeline and returns the path of the written CSV file
///
/// Nothing is written unless a complete response was decoded.
async fn run(cli: &Cli) -> Result<PathBuf> {
    let mut config =
        load_config_or_default(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply_overrides(&mut config);
    validate(&config).context("invalid configuration")?;

    let resolver =
        ArticleResolver::from_config(&config.scrape).context("invalid url pattern")?;
    let article = resolver
        .resolve(&cli.url)
        .context("failed to parse article info")?;
    tracing::info!(article_id = article.id, slug = %article.slug, "article resolved");

    let client = ChromiumRenderClient::launch(&config.browser)
        .await
        .context("failed to launch browser")?;

    let outcome = scrape(&article, &config.scrape, &client, config.scrape.max_retries).await;
    client.shutdown().await;
    let outcome = outcome.context("failed to scrape comments")?;

    tracing::info!("saving comments as csv");
    let csv = comments_to_csv(outcome.response.comments())
        .context("failed to format comments as CSV")?;

    let path = output_path(&config.output.directory, &article.slug, &config.output.suffix);
    save_comments(&path, &csv).context("failed to save comments to file")?;

    Ok(path)
}
