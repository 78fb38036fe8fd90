//! Crawl pipeline - strategy selection and persistence
//!
//! This module ties the pieces of a run together:
//! - Building the fetcher and the page parser from the configuration
//! - Running the configured crawl strategy
//! - Handing the collected records to the persister

use crate::config::{validate, Config, CrawlStrategy};
use crate::crawler::{Fetcher, PageParser, ParallelCrawler, SequentialCrawler};
use crate::output::{persist, PersistError, PersistStatus};
use crate::state::CrawlOutcome;
use crate::url::{page_urls, parse_base, resolve_reference};
use crate::ScrapeError;
use std::path::Path;
use tracing::{Instrument, Span};
use url::Url;

/// Result of a complete run: crawl plus persistence
#[derive(Debug)]
pub struct RunReport {
    /// Strategy the run used
    pub strategy: CrawlStrategy,

    /// Everything the crawl collected
    pub outcome: CrawlOutcome,

    /// Destination file
    pub destination: String,

    /// Persistence result; a failure here does not invalidate the crawl
    pub persisted: Result<PersistStatus, PersistError>,
}

impl RunReport {
    /// Process exit code for this run
    ///
    /// | Condition | Code |
    /// |-----------|------|
    /// | Records written (including partial crawls) | 0 |
    /// | No records collected | 1 |
    /// | Writing the output failed | 1 |
    pub fn exit_code(&self) -> u8 {
        match &self.persisted {
            Ok(PersistStatus::Written { .. }) => 0,
            Ok(PersistStatus::Skipped) | Err(_) => 1,
        }
    }
}

/// One configured crawl pipeline
///
/// The pipeline shares one fetcher, one page parser and one persister between
/// both strategies. Its logging span is injected at construction and wraps
/// every log line the run produces.
pub struct Pipeline {
    config: Config,
    base: Url,
    fetcher: Fetcher,
    parser: PageParser,
    span: Span,
}

impl Pipeline {
    /// Creates a pipeline from a configuration
    ///
    /// # Arguments
    ///
    /// * `config` - The run configuration; validated again here
    /// * `span` - Logging span every crawl future is instrumented with
    ///
    /// # Returns
    ///
    /// * `Ok(Pipeline)` - Ready to run
    /// * `Err(ScrapeError)` - Invalid configuration or HTTP client failure
    pub fn new(config: Config, span: Span) -> Result<Self, ScrapeError> {
        validate(&config)?;

        let base = parse_base(&config.site.base_url)?;
        let fetcher = Fetcher::from_config(&config.crawler)?;
        let parser = PageParser::new(&config.selectors)?;

        Ok(Self {
            config,
            base,
            fetcher,
            parser,
            span,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn strategy(&self) -> CrawlStrategy {
        self.config.crawler.strategy
    }

    /// Page URLs the fixed-range strategy would fetch
    pub fn fixed_range(&self) -> Result<Vec<Url>, ScrapeError> {
        let site = &self.config.site;
        Ok(page_urls(&self.base, &site.page_pattern, site.page_count)?)
    }

    /// First page of the link-following strategy
    pub fn start_url(&self) -> Result<Url, ScrapeError> {
        Ok(resolve_reference(&self.base, &self.config.site.start_path)?)
    }

    /// Runs the configured strategy and returns what it collected
    pub async fn crawl(&self) -> Result<CrawlOutcome, ScrapeError> {
        let crawler = &self.config.crawler;

        let outcome = match crawler.strategy {
            CrawlStrategy::Sequential => {
                let start = self.start_url()?;
                SequentialCrawler::new(
                    self.fetcher.clone(),
                    self.parser.clone(),
                    self.base.clone(),
                    start,
                )
                .with_delay(crawler.delay())
                .with_max_pages(crawler.max_pages as usize)
                .run()
                .instrument(self.span.clone())
                .await
            }
            CrawlStrategy::ParallelFixedRange => {
                let urls = self.fixed_range()?;
                ParallelCrawler::new(
                    self.fetcher.clone(),
                    self.parser.clone(),
                    crawler.max_concurrency as usize,
                )
                .crawl(urls)
                .instrument(self.span.clone())
                .await
            }
        };

        Ok(outcome)
    }

    /// Crawls, then persists whatever was collected
    ///
    /// Persistence is attempted after partial failures too; it is skipped only
    /// when no record was collected at all.
    pub async fn run(&self) -> Result<RunReport, ScrapeError> {
        let outcome = self.crawl().await?;
        let destination = self.config.output.path.clone();

        let persisted = {
            let _entered = self.span.enter();
            let result = persist(&outcome.records, Path::new(&destination));
            if let Err(e) = &result {
                tracing::error!("Failed to write {}: {:?}", destination, e);
            }
            result
        };

        Ok(RunReport {
            strategy: self.strategy(),
            outcome,
            destination,
            persisted,
        })
    }
}
