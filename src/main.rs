//! Quote-Ripple main entry point
//!
//! This is the command-line interface for the Quote-Ripple quote harvester.

use anyhow::Context;
use clap::Parser;
use quote_ripple::config::{load_config_with_hash, validate, Config, CrawlStrategy};
use quote_ripple::crawler::Pipeline;
use quote_ripple::logging::LogLineFormat;
use quote_ripple::output::print_summary;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Quote-Ripple: a paginated quote harvester
///
/// Quote-Ripple walks the paginated listings of a quotes site, extracts the
/// quote text, author and tags of every entry, and saves them as a
/// spreadsheet (or CSV) file.
#[derive(Parser, Debug)]
#[command(name = "quote-ripple")]
#[command(version)]
#[command(about = "A paginated quote harvester", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Crawl strategy (overrides the config file)
    #[arg(short, long, value_enum)]
    strategy: Option<CrawlStrategy>,

    /// Base URL of the site
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Number of pages fetched by the fixed-range strategy
    #[arg(long, value_name = "N")]
    pages: Option<u32>,

    /// Worker pool width of the fixed-range strategy
    #[arg(long, value_name = "N")]
    concurrency: Option<u32>,

    /// Delay between sequential page fetches, in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Output file (.xlsx or .csv)
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Run log file, truncated at start
    #[arg(long, value_name = "FILE")]
    log_file: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate the configuration and show what would be crawled
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(strategy) = self.strategy {
            config.crawler.strategy = strategy;
        }
        if let Some(base_url) = &self.base_url {
            config.site.base_url = base_url.clone();
        }
        if let Some(pages) = self.pages {
            config.site.page_count = pages;
        }
        if let Some(concurrency) = self.concurrency {
            config.crawler.max_concurrency = concurrency;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.crawler.delay_ms = delay_ms;
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(log_file) = &self.log_file {
            config.output.log_path = log_file.clone();
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    cli.apply_overrides(&mut config);
    validate(&config).context("Invalid configuration")?;

    setup_logging(cli.verbose, cli.quiet, Path::new(&config.output.log_path))?;

    match (&cli.config, &config_hash) {
        (Some(path), Some(hash)) => {
            tracing::info!("Configuration loaded from {} (hash: {})", path.display(), hash)
        }
        _ => tracing::info!("Using built-in configuration"),
    }

    let span = tracing::info_span!("run", strategy = %config.crawler.strategy);
    let pipeline = Pipeline::new(config, span)?;

    if cli.dry_run {
        handle_dry_run(&pipeline)?;
        return Ok(ExitCode::SUCCESS);
    }

    tracing::info!(
        "Starting {} crawl of {}",
        pipeline.strategy(),
        pipeline.config().site.base_url
    );

    let report = pipeline.run().await?;

    if !cli.quiet {
        print_summary(&report);
    }

    Ok(ExitCode::from(report.exit_code()))
}

/// Sets up the logging/tracing subscriber
///
/// Log lines go to stderr and to `log_path`; the log file is truncated so it
/// only ever holds the latest run.
fn setup_logging(verbose: u8, quiet: bool, log_path: &Path) -> anyhow::Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("quote_ripple=info,warn"),
            1 => EnvFilter::new("quote_ripple=debug,info"),
            2 => EnvFilter::new("quote_ripple=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let log_file = File::create(log_path)
        .with_context(|| format!("Failed to create log file {}", log_path.display()))?;

    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .event_format(LogLineFormat);

    let file = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .event_format(LogLineFormat);

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .context("Logging was already initialized")?;

    Ok(())
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(pipeline: &Pipeline) -> anyhow::Result<()> {
    let config = pipeline.config();

    println!("=== Quote-Ripple Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Strategy: {}", config.crawler.strategy);

    println!("\nCrawler Configuration:");
    println!("  Timeout: {}s", config.crawler.timeout_secs);
    println!("  User agent: {}", config.crawler.user_agent);

    match config.crawler.strategy {
        CrawlStrategy::Sequential => {
            println!("  Delay between pages: {}ms", config.crawler.delay_ms);
            println!("  Max pages: {}", config.crawler.max_pages);
            println!("\nWould start at: {}", pipeline.start_url()?);
        }
        CrawlStrategy::ParallelFixedRange => {
            println!("  Max concurrency: {}", config.crawler.max_concurrency);
            let urls = pipeline.fixed_range()?;
            println!("\nWould fetch {} pages:", urls.len());
            for url in urls {
                println!("  - {}", url);
            }
        }
    }

    println!("\nOutput:");
    println!("  Records: {}", config.output.path);
    println!("  Log: {}", config.output.log_path);

    println!("\n✓ Configuration is valid");

    Ok(())
}
