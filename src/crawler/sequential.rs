//! Link-following crawl strategy
//!
//! One page is in flight at a time. Each cycle fetches the current page,
//! extracts its records, looks up the next page reference and sleeps for the
//! polite delay before fetching it. The crawl ends in `Done` when no next
//! page exists and in `Aborted` when a page cannot be fetched; in both cases
//! the records collected so far are kept.

use crate::crawler::{Fetcher, PageParser};
use crate::state::{CrawlOutcome, CrawlState};
use crate::url::resolve_reference;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Crawler that discovers pages by following "next" links
pub struct SequentialCrawler {
    fetcher: Fetcher,
    parser: PageParser,
    base: Url,
    start: Url,
    delay: Duration,
    max_pages: usize,
}

impl SequentialCrawler {
    /// Creates a crawler starting at `start`
    ///
    /// Next references are resolved against `base`. The polite delay defaults
    /// to one second and the page cap to 100.
    pub fn new(fetcher: Fetcher, parser: PageParser, base: Url, start: Url) -> Self {
        Self {
            fetcher,
            parser,
            base,
            start,
            delay: Duration::from_secs(1),
            max_pages: 100,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Runs the crawl to a terminal state
    pub async fn run(&self) -> CrawlOutcome {
        let mut outcome = CrawlOutcome::new();
        let mut state = CrawlState::Start;
        let mut visited: HashSet<Url> = HashSet::new();
        let mut current = self.start.clone();

        tracing::info!("Starting sequential crawl at {}", current);

        while !state.is_terminal() {
            advance(&mut state, CrawlState::Fetching);
            visited.insert(current.clone());

            let page = match self.fetcher.fetch(&current).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::error!("Aborting crawl: {}", e);
                    outcome.record_failure();
                    advance(&mut state, CrawlState::Aborted);
                    continue;
                }
            };

            advance(&mut state, CrawlState::Extracting);
            let mut result = self.parser.parse_page(&page.body, current.as_str());
            let next_reference = result.next_reference.take();

            tracing::info!(
                "Page {}: {} quotes from {}",
                outcome.pages_visited + 1,
                result.records.len(),
                current
            );
            outcome.absorb(result);

            advance(&mut state, CrawlState::Navigating);

            let Some(reference) = next_reference else {
                tracing::info!("No next page after {}", current);
                advance(&mut state, CrawlState::Done);
                continue;
            };

            let next = match resolve_reference(&self.base, &reference) {
                Ok(next) => next,
                Err(e) => {
                    tracing::warn!("Unusable next reference on {}: {}", current, e);
                    advance(&mut state, CrawlState::Done);
                    continue;
                }
            };

            if visited.contains(&next) {
                tracing::warn!("Next page {} was already visited, stopping", next);
                advance(&mut state, CrawlState::Done);
                continue;
            }

            if outcome.pages_visited >= self.max_pages {
                tracing::warn!(
                    "Reached the limit of {} pages, not following {}",
                    self.max_pages,
                    next
                );
                advance(&mut state, CrawlState::Done);
                continue;
            }

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            current = next;
        }

        tracing::info!(
            "Sequential crawl {}: {} pages, {} quotes",
            state,
            outcome.pages_visited,
            outcome.records.len()
        );

        outcome.final_state = state;
        outcome
    }
}

fn advance(state: &mut CrawlState, next: CrawlState) {
    debug_assert!(
        state.can_transition_to(next),
        "invalid crawl transition {} -> {}",
        state,
        next
    );
    tracing::trace!("Crawl state {} -> {}", state, next);
    *state = next;
}
