//! State module for crawl data and progress
//!
//! # Components
//!
//! - `Record`: one extracted quote (text, author, tags)
//! - `PageResult`: what a single page contributed
//! - `CrawlOutcome`: the ordered records and page counters of a whole run
//! - `CrawlState`: the link-following state machine

mod crawl_state;
mod record;

// Re-export main types
pub use crawl_state::CrawlState;
pub use record::{CrawlOutcome, PageResult, Record};
