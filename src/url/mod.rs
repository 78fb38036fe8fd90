//! URL handling module for Quote-Ripple
//!
//! This module resolves the site-relative references produced by the
//! pagination navigator and generates the fixed page range for the parallel
//! strategy.

mod range;
mod resolve;

// Re-export main functions
pub use range::page_urls;
pub use resolve::{parse_base, resolve_reference};
