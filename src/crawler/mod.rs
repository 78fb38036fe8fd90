//! Crawler module for page fetching and record extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with timeout and error classification
//! - Quote extraction and pagination lookup
//! - The link-following and fixed-range crawl strategies
//! - The pipeline that selects a strategy and persists the result

mod coordinator;
mod fetcher;
mod parallel;
mod parser;
mod sequential;

pub use coordinator::{Pipeline, RunReport};
pub use fetcher::{build_http_client, FetchedPage, Fetcher};
pub use parallel::ParallelCrawler;
pub use parser::{Extraction, PageParser};
pub use sequential::SequentialCrawler;

use crate::config::Config;
use crate::ScrapeError;

/// Runs a complete crawl operation
///
/// This is the main entry point for a run. It will:
/// 1. Build the HTTP client and compile the selectors
/// 2. Crawl with the configured strategy
/// 3. Persist the collected records
///
/// # Example
///
/// ```no_run
/// use quote_ripple::config::Config;
/// use quote_ripple::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = crawl(Config::default()).await?;
/// println!("{} quotes", report.outcome.records.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: Config) -> Result<RunReport, ScrapeError> {
    let span = tracing::info_span!("run", strategy = %config.crawler.strategy);
    Pipeline::new(config, span)?.run().await
}
