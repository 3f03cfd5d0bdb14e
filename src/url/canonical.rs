use crate::UrlError;
use url::Url;

/// Canonicalizes a URL into the form used as the dedup key for the crawl
///
/// # Canonicalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Validate the scheme (only HTTP and HTTPS are crawlable)
/// 3. Remove the fragment (everything after #)
///
/// Canonicalization is idempotent: feeding the output back in yields the
/// same string.
///
/// # Arguments
///
/// * `url_str` - The URL string to canonicalize
///
/// # Returns
///
/// * `Ok(String)` - Canonical URL string
/// * `Err(UrlError)` - Failed to parse the URL or unsupported scheme
///
/// # Examples
///
/// ```
/// use webwalk::url::canonicalize_url;
///
/// let url = canonicalize_url("http://example.com/page#section").unwrap();
/// assert_eq!(url, "http://example.com/page");
/// ```
pub fn canonicalize_url(url_str: &str) -> Result<String, UrlError> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    url.set_fragment(None);

    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_fragment() {
        let result = canonicalize_url("https://example.com/page#section").unwrap();
        assert_eq!(result, "https://example.com/page");
    }

    #[test]
    fn test_fragment_only_difference_collapses() {
        let a = canonicalize_url("https://example.com/page#one").unwrap();
        let b = canonicalize_url("https://example.com/page#two").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_fragment_unchanged() {
        let result = canonicalize_url("https://example.com/page?q=1").unwrap();
        assert_eq!(result, "https://example.com/page?q=1");
    }

    #[test]
    fn test_idempotent() {
        let once = canonicalize_url("http://Example.com/a/b#frag").unwrap();
        let twice = canonicalize_url(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_host_only_gets_root_path() {
        let result = canonicalize_url("https://example.com").unwrap();
        assert_eq!(result, "https://example.com/");
    }

    #[test]
    fn test_invalid_scheme() {
        let result = canonicalize_url("ftp://example.com/file");
        assert!(matches!(result, Err(UrlError::InvalidScheme(_))));
    }

    #[test]
    fn test_malformed_url() {
        let result = canonicalize_url("not a url");
        assert!(matches!(result, Err(UrlError::Parse(_))));
    }
}
