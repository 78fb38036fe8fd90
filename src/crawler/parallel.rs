//! Fixed-range crawl strategy
//!
//! Every page URL is known before the crawl starts, so pages are fetched and
//! extracted by a bounded pool of tokio tasks. Each task owns one input index
//! and returns its own result slot; slots are concatenated in input order, not
//! completion order. No polite delay is applied in this mode.

use crate::crawler::{Fetcher, PageParser};
use crate::state::{CrawlOutcome, CrawlState, PageResult};
use crate::FetchError;
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::Instrument;
use url::Url;

/// Crawler that fetches a precomputed list of pages concurrently
pub struct ParallelCrawler {
    fetcher: Fetcher,
    parser: PageParser,
    max_concurrency: usize,
}

impl ParallelCrawler {
    /// Creates a crawler with at most `max_concurrency` pages in flight
    pub fn new(fetcher: Fetcher, parser: PageParser, max_concurrency: usize) -> Self {
        Self {
            fetcher,
            parser,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Fetches and extracts every URL, preserving input order in the outcome
    ///
    /// A URL that fails contributes no records and is counted as failed; it
    /// never affects its siblings. A worker that panics is treated the same
    /// way.
    pub async fn crawl(&self, urls: Vec<Url>) -> CrawlOutcome {
        tracing::info!(
            "Starting parallel crawl of {} pages ({} workers)",
            urls.len(),
            self.max_concurrency
        );

        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut handles = Vec::with_capacity(urls.len());

        for (index, url) in urls.iter().enumerate() {
            // Acquired before spawning so at most `max_concurrency` tasks exist
            let permit = semaphore.clone().acquire_owned().await.ok();
            let fetcher = self.fetcher.clone();
            let parser = self.parser.clone();
            let url = url.clone();

            let task = async move {
                let _permit = permit;
                fetch_and_extract(&fetcher, &parser, index, &url).await
            };
            handles.push(tokio::spawn(task.in_current_span()));
        }

        let slots = join_all(handles).await;

        let mut outcome = CrawlOutcome::new();
        for (url, slot) in urls.iter().zip(slots) {
            match slot {
                Ok(Ok(page)) => outcome.absorb(page),
                Ok(Err(_)) => outcome.record_failure(),
                Err(e) => {
                    tracing::error!("Worker for {} stopped unexpectedly: {:?}", url, e);
                    outcome.record_failure();
                }
            }
        }
        outcome.final_state = CrawlState::Done;

        tracing::info!(
            "Parallel crawl done: {} pages visited, {} failed, {} quotes",
            outcome.pages_visited,
            outcome.pages_failed,
            outcome.records.len()
        );

        outcome
    }
}

/// Fetches one page and extracts its records
async fn fetch_and_extract(
    fetcher: &Fetcher,
    parser: &PageParser,
    index: usize,
    url: &Url,
) -> Result<PageResult, FetchError> {
    let page = fetcher.fetch(url).await.map_err(|e| {
        tracing::warn!("Page {} unreachable: {}", index + 1, e);
        e
    })?;

    let mut result = parser.parse_page(&page.body, url.as_str());
    // Pagination links are not followed in this mode
    result.next_reference = None;

    if result.records.is_empty() {
        tracing::info!("Page {} ({}) has no quotes", index + 1, url);
    } else {
        tracing::info!(
            "Page {}: {} quotes from {}",
            index + 1,
            result.records.len(),
            url
        );
    }

    Ok(result)
}
