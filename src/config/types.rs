use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Main configuration structure for Quote-Ripple
///
/// Every section is optional in the TOML file; missing sections and keys fall
/// back to values targeting the public quotes demo site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    pub selectors: SelectorConfig,
    pub output: OutputConfig,
}

/// Traversal mode of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CrawlStrategy {
    /// Follow the "next page" link until it disappears
    #[default]
    Sequential,

    /// Fetch a precomputed range of page URLs concurrently
    ParallelFixedRange,
}

impl fmt::Display for CrawlStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::ParallelFixedRange => write!(f, "parallel-fixed-range"),
        }
    }
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL every relative reference is resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Relative path of the first page in sequential mode
    #[serde(rename = "start-path")]
    pub start_path: String,

    /// Relative path pattern for fixed-range mode; `{}` is the page number
    #[serde(rename = "page-pattern")]
    pub page_pattern: String,

    /// Number of pages generated in fixed-range mode (not discovered from the site)
    #[serde(rename = "page-count")]
    pub page_count: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://quotes.toscrape.com".to_string(),
            start_path: "/".to_string(),
            page_pattern: "/page/{}/".to_string(),
            page_count: 10,
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Traversal strategy
    pub strategy: CrawlStrategy,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Polite delay between sequential page fetches (milliseconds)
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,

    /// Worker pool width in fixed-range mode
    #[serde(rename = "max-concurrency")]
    pub max_concurrency: u32,

    /// Upper bound on pages visited in sequential mode
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// User agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl CrawlerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            strategy: CrawlStrategy::Sequential,
            timeout_secs: 15,
            delay_ms: 1000,
            max_concurrency: 10,
            max_pages: 100,
            user_agent: format!("QuoteRipple/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// CSS selectors used by the extractor and the navigator
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// One element per quote
    pub quote: String,

    /// Quote text, relative to the quote container
    pub text: String,

    /// Author name, relative to the quote container
    pub author: String,

    /// Tag list wrapper, relative to the quote container
    pub tags: String,

    /// Single tag label, relative to the tag list
    pub tag: String,

    /// Anchor of the "next page" control
    pub next: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            quote: "div.quote".to_string(),
            text: "span.text".to_string(),
            author: "small.author".to_string(),
            tags: "div.tags".to_string(),
            tag: "a.tag".to_string(),
            next: "li.next > a".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination file; the extension selects xlsx or csv
    pub path: String,

    /// Run log file, truncated at the start of every run
    #[serde(rename = "log-path")]
    pub log_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "citas.xlsx".to_string(),
            log_path: "scraper.log".to_string(),
        }
    }
}
