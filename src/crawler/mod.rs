//! Crawler module for bounded breadth-first traversal
//!
//! This module contains the core crawling logic:
//! - The frontier queue with dedup sets and bound tracking
//! - The controller state machine driving the traversal
//! - The page fetcher boundary and its HTTP implementation
//! - HTML link extraction

mod controller;
mod fetcher;
mod frontier;
mod parser;

pub use controller::{CrawlStats, Crawler, HaltReason, StepOutcome};
pub use fetcher::{HttpFetcher, PageFetcher};
pub use frontier::{Admission, Frontier, FrontierEntry};
pub use parser::extract_links;

use crate::config::Config;
use crate::WebwalkError;

/// Runs a complete crawl from a root URL with no snapshot involvement
///
/// Builds the HTTP fetcher from the configuration, seeds the controller,
/// and drives it until the crawl halts.
///
/// # Arguments
///
/// * `config` - The crawl and fetcher configuration
/// * `root_url` - The URL to start from
///
/// # Returns
///
/// * `Ok(CrawlStats)` - The crawl halted; statistics for it
/// * `Err(WebwalkError)` - The root URL was invalid or the HTTP client
///   could not be built
pub async fn crawl(config: Config, root_url: &str) -> Result<CrawlStats, WebwalkError> {
    let fetcher = HttpFetcher::new(&config.fetcher)?;
    let mut crawler = Crawler::new(config.crawler, root_url, fetcher)?;
    Ok(crawler.run().await)
}
