use crate::state::CrawlState;

/// One extracted quote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The quote text, trimmed
    pub text: String,

    /// The author name, trimmed
    pub author: String,

    /// Tag labels in document order
    pub tags: Vec<String>,
}

impl Record {
    pub fn new(text: impl Into<String>, author: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
            tags,
        }
    }

    /// Tags as written to the tags column
    pub fn joined_tags(&self) -> String {
        self.tags.join(", ")
    }
}

/// What one page contributed: its records and the pagination reference
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageResult {
    /// Records in document order
    pub records: Vec<Record>,

    /// Number of quote containers skipped as malformed
    pub skipped: usize,

    /// Site-relative reference of the next page, if any
    pub next_reference: Option<String>,
}

/// Aggregated result of a crawl run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOutcome {
    /// Every record collected, in page order then document order
    pub records: Vec<Record>,

    /// Pages fetched and parsed
    pub pages_visited: usize,

    /// Pages that could not be fetched or processed
    pub pages_failed: usize,

    /// Malformed containers skipped across all pages
    pub records_skipped: usize,

    /// Terminal state the run ended in
    pub final_state: CrawlState,
}

impl CrawlOutcome {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            pages_visited: 0,
            pages_failed: 0,
            records_skipped: 0,
            final_state: CrawlState::Start,
        }
    }

    /// Appends one page's contribution
    pub fn absorb(&mut self, page: PageResult) {
        self.pages_visited += 1;
        self.records_skipped += page.skipped;
        self.records.extend(page.records);
    }

    pub fn record_failure(&mut self) {
        self.pages_failed += 1;
    }
}

impl Default for CrawlOutcome {
    fn default() -> Self {
        Self::new()
    }
}
