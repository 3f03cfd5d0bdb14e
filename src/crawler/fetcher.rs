//! Page fetcher boundary and its HTTP implementation
//!
//! The controller only ever sees [`PageFetcher::fetch_links`]: given a URL,
//! produce the set of absolute link targets on that page. Implementations
//! absorb every failure mode into an empty result set; a bad page must never
//! abort the crawl.

use crate::config::FetcherConfig;
use crate::crawler::parser::extract_links;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;

/// Collaborator that fetches a page and returns the URLs linked from it
///
/// Implementations must resolve discovered links to absolute form relative
/// to the fetched URL and must never fail: network, HTTP-status, mimetype,
/// and parse errors degrade to an empty set, logged by the implementation.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    /// Fetches the page at `url` and returns the set of link-target URLs
    async fn fetch_links(&self, url: &str) -> HashSet<String>;
}

/// HTTP implementation of [`PageFetcher`] on reqwest and scraper
pub struct HttpFetcher {
    client: Client,
    accept_mimetypes: Vec<String>,
}

impl HttpFetcher {
    /// Builds an HTTP fetcher from the fetcher configuration
    ///
    /// The underlying client sends the configured User-Agent, applies the
    /// configured timeout, and transparently decompresses gzip/brotli
    /// bodies.
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            accept_mimetypes: config.accept_mimetypes.clone(),
        })
    }

    /// Whether a Content-Type header value names an accepted mimetype
    ///
    /// Only the essence part is compared; parameters like charset are
    /// ignored.
    fn is_accepted_mimetype(&self, content_type: &str) -> bool {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        self.accept_mimetypes
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(&essence))
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch_links(&self, url: &str) -> HashSet<String> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("There was an error opening page at {}: {}", url, e);
                return HashSet::new();
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("There was an error opening page at {}: HTTP {}", url, status);
            return HashSet::new();
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !self.is_accepted_mimetype(&content_type) {
            tracing::warn!(
                "Ignoring content from {} because its mimetype '{}' is not accepted",
                url,
                content_type
            );
            return HashSet::new();
        }

        // Links are resolved against the final URL so pages reached through
        // a redirect resolve their relative hrefs correctly.
        let base_url = response.url().clone();

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("There was an error reading page at {}: {}", url, e);
                return HashSet::new();
            }
        };

        extract_links(&body, &base_url)
    }
}
