//! HTML parser for extracting quote records and the pagination link
//!
//! This module handles parsing a listing page to extract:
//! - Quote records (text, author, tags), skipping malformed containers
//! - The relative reference of the next page, if any

use crate::config::SelectorConfig;
use crate::state::{PageResult, Record};
use crate::{ParseFieldError, ScrapeError};
use scraper::{ElementRef, Html, Selector};

/// Records extracted from one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Well-formed records in document order
    pub records: Vec<Record>,

    /// Containers skipped because a required field was missing
    pub skipped: usize,
}

/// Compiled selectors for the extractor and the navigator
///
/// Selectors are compiled once per run and shared by every page.
#[derive(Debug, Clone)]
pub struct PageParser {
    quote: Selector,
    text: Selector,
    author: Selector,
    tags: Selector,
    tag: Selector,
    next: Selector,
}

impl PageParser {
    /// Compiles the configured selectors
    ///
    /// # Returns
    ///
    /// * `Ok(PageParser)` - All selectors compiled
    /// * `Err(ScrapeError::Selector)` - A selector is not valid CSS
    pub fn new(config: &SelectorConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            quote: compile(&config.quote)?,
            text: compile(&config.text)?,
            author: compile(&config.author)?,
            tags: compile(&config.tags)?,
            tag: compile(&config.tag)?,
            next: compile(&config.next)?,
        })
    }

    /// Parses a page body into a queryable document
    pub fn parse(&self, body: &str) -> Html {
        Html::parse_document(body)
    }

    /// Parses a page body and runs both the extractor and the navigator
    ///
    /// The parsed document is dropped before returning, so the result can be
    /// moved across tasks.
    pub fn parse_page(&self, body: &str, page_url: &str) -> PageResult {
        let document = self.parse(body);
        let extraction = self.extract(&document, page_url);
        let next_reference = self.next_link(&document);

        PageResult {
            records: extraction.records,
            skipped: extraction.skipped,
            next_reference,
        }
    }

    /// Extracts every well-formed quote record from the document
    ///
    /// # Extraction Rules
    ///
    /// Each quote container must hold a non-empty text, a non-empty author and
    /// a tag list (which may be empty). A container missing any of them is
    /// skipped with a warning naming the page and the container index; the
    /// remaining containers are still extracted. A page with no containers
    /// yields an empty extraction.
    ///
    /// # Example
    ///
    /// ```
    /// use quote_ripple::config::SelectorConfig;
    /// use quote_ripple::crawler::PageParser;
    ///
    /// let parser = PageParser::new(&SelectorConfig::default()).unwrap();
    /// let html = r#"<div class="quote">
    ///     <span class="text">“Hello”</span>
    ///     <small class="author">Ada</small>
    ///     <div class="tags"><a class="tag">greeting</a></div>
    /// </div>"#;
    /// let document = parser.parse(html);
    /// let extraction = parser.extract(&document, "https://example.com/");
    /// assert_eq!(extraction.records[0].author, "Ada");
    /// ```
    pub fn extract(&self, document: &Html, page_url: &str) -> Extraction {
        let mut extraction = Extraction::default();

        for (index, container) in document.select(&self.quote).enumerate() {
            match self.extract_record(container) {
                Ok(record) => extraction.records.push(record),
                Err(e) => {
                    tracing::warn!(
                        "Skipping quote #{} on {}: {}",
                        index,
                        page_url,
                        e
                    );
                    extraction.skipped += 1;
                }
            }
        }

        if extraction.records.is_empty() && extraction.skipped == 0 {
            tracing::debug!("No quote containers found on {}", page_url);
        }

        extraction
    }

    /// Extracts a single record from one quote container
    fn extract_record(&self, container: ElementRef<'_>) -> Result<Record, ParseFieldError> {
        let text = first_text(container, &self.text).ok_or(ParseFieldError::MissingText)?;
        let author = first_text(container, &self.author).ok_or(ParseFieldError::MissingAuthor)?;

        let tag_list = container
            .select(&self.tags)
            .next()
            .ok_or(ParseFieldError::MissingTags)?;

        let tags = tag_list
            .select(&self.tag)
            .map(element_text)
            .filter(|label| !label.is_empty())
            .collect();

        Ok(Record { text, author, tags })
    }

    /// Returns the reference of the "next page" control, if present
    ///
    /// The reference is returned as written in the page (usually a
    /// site-relative path); resolving and fetching it is the crawler's job.
    /// An indicator without a usable `href` counts as absent.
    pub fn next_link(&self, document: &Html) -> Option<String> {
        document
            .select(&self.next)
            .next()
            .and_then(|element| element.value().attr("href"))
            .map(|href| href.trim().to_string())
            .filter(|href| !href.is_empty())
    }
}

fn compile(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// Trimmed text of the first match of `selector` inside `container`, if non-empty
fn first_text(container: ElementRef<'_>, selector: &Selector) -> Option<String> {
    container
        .select(selector)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
