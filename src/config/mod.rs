//! Configuration module for webwalk
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. The command line can override every file-provided value; a crawl
//! ultimately runs off one immutable [`Config`].
//!
//! # Example
//!
//! ```no_run
//! use webwalk::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("webwalk.toml")).unwrap();
//! println!("Crawl will stop after {} URLs", config.crawler.max_urls_count);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlConfig, FetcherConfig};

// Re-export parser functions
pub use parser::load_config;

// Re-export validation for callers assembling a config from CLI flags
pub use validation::validate;
