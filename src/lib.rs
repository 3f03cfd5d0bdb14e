//! Webwalk: a bounded, resumable breadth-first web crawler
//!
//! This crate discovers reachable pages starting from a root URL by following
//! hyperlinks, bounded by traversal depth and total discovered-URL count,
//! with allow/exclude prefix filtering. A crawl can be suspended to a
//! snapshot and resumed later.

pub mod config;
pub mod crawler;
pub mod snapshot;
pub mod url;

use thiserror::Error;

/// Main error type for webwalk operations
#[derive(Debug, Error)]
pub enum WebwalkError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] snapshot::SnapshotError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Result type alias for webwalk operations
pub type Result<T> = std::result::Result<T, WebwalkError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::{CrawlStats, Crawler, HaltReason};
pub use snapshot::{CrawlSnapshot, SnapshotStore};
pub use url::{canonicalize_url, PrefixFilter};
