use serde::Deserialize;

/// Main configuration structure for webwalk
///
/// Every field can come from a TOML file; command-line flags override the
/// file values in `main`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
}

/// Crawl bounds and prefix filtering configuration
///
/// This struct is threaded, immutable, into the controller and the frontier
/// at construction; nothing reads a process-wide constant.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Maximum depth to traverse from the root URL
    #[serde(rename = "depth-limit", default = "default_depth_limit")]
    pub depth_limit: u32,

    /// Maximum number of distinct URLs to discover, root included
    #[serde(rename = "max-urls-count", default = "default_max_urls_count")]
    pub max_urls_count: u64,

    /// URL prefixes a discovered URL must start with to be admitted
    #[serde(rename = "allowed-prefixes", default)]
    pub allowed_prefixes: Vec<String>,

    /// URL prefixes that reject a discovered URL
    #[serde(rename = "excluded-prefixes", default)]
    pub excluded_prefixes: Vec<String>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            depth_limit: default_depth_limit(),
            max_urls_count: default_max_urls_count(),
            allowed_prefixes: Vec::new(),
            excluded_prefixes: Vec::new(),
        }
    }
}

/// Page fetcher configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Content types whose bodies are parsed for links; anything else is
    /// skipped
    #[serde(rename = "accept-mimetypes", default = "default_accept_mimetypes")]
    pub accept_mimetypes: Vec<String>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            accept_mimetypes: default_accept_mimetypes(),
        }
    }
}

pub(crate) fn default_depth_limit() -> u32 {
    5
}

pub(crate) fn default_max_urls_count() -> u64 {
    1000
}

pub(crate) fn default_user_agent() -> String {
    format!("webwalk/{}", env!("CARGO_PKG_VERSION"))
}

pub(crate) fn default_timeout_secs() -> u64 {
    30
}

pub(crate) fn default_accept_mimetypes() -> Vec<String> {
    vec!["text/html".to_string()]
}
