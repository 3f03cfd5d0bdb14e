/// Allow/exclude prefix filter deciding which discovered URLs may enter the
/// crawl frontier
///
/// The filter holds two plain string-prefix lists. Exclusion wins over
/// allowance, and an empty allow list admits every non-excluded URL.
#[derive(Debug, Clone, Default)]
pub struct PrefixFilter {
    allowed: Vec<String>,
    excluded: Vec<String>,
}

impl PrefixFilter {
    /// Creates a filter from allow and exclude prefix lists
    pub fn new(allowed: Vec<String>, excluded: Vec<String>) -> Self {
        Self { allowed, excluded }
    }

    /// Checks whether a URL is eligible to enter the frontier
    ///
    /// A URL is rejected when it starts with any excluded prefix. When the
    /// allow list is non-empty, the URL must start with every allowed prefix
    /// to pass; a URL matching only some of them is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use webwalk::url::PrefixFilter;
    ///
    /// let filter = PrefixFilter::new(
    ///     vec!["http://a.test/".to_string()],
    ///     vec!["http://a.test/private/".to_string()],
    /// );
    /// assert!(filter.is_admissible("http://a.test/x"));
    /// assert!(!filter.is_admissible("http://a.test/private/x"));
    /// assert!(!filter.is_admissible("http://b.test/y"));
    /// ```
    pub fn is_admissible(&self, url: &str) -> bool {
        if self.excluded.iter().any(|prefix| url.starts_with(prefix)) {
            return false;
        }

        self.allowed.iter().all(|prefix| url.starts_with(prefix))
    }
}
