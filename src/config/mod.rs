//! Configuration module for Quote-Ripple
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A run without a configuration file uses [`Config::default`].
//!
//! # Example
//!
//! ```no_run
//! use quote_ripple::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("quotes.toml")).unwrap();
//! println!("Crawling {} with {}", config.site.base_url, config.crawler.strategy);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlStrategy, CrawlerConfig, OutputConfig, SelectorConfig, SiteConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
