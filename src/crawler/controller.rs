//! Crawl controller - the main traversal loop
//!
//! The controller drives breadth-first traversal one step at a time: pop the
//! frontier head, fetch its page, filter and admit children, mark the page
//! visited. Every step reports whether the crawl continues or has halted,
//! and a halted crawl can be captured into a snapshot for later resumption.

use crate::config::CrawlConfig;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::frontier::{Admission, Frontier};
use crate::snapshot::{CrawlSnapshot, SnapshotError, SnapshotStore};
use crate::url::{canonicalize_url, PrefixFilter};
use crate::UrlError;

/// Why a crawl stopped
///
/// Hitting a bound is an expected termination condition, not a defect; none
/// of these variants is ever surfaced as a process failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// The frontier drained; normal successful completion
    QueueExhausted,

    /// A child's depth would exceed the configured depth limit
    DepthExceeded,

    /// Admitting another URL would exceed the configured maximum count
    CountExceeded,
}

impl std::fmt::Display for HaltReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QueueExhausted => write!(f, "queue exhausted"),
            Self::DepthExceeded => write!(f, "depth limit reached"),
            Self::CountExceeded => write!(f, "URL count limit reached"),
        }
    }
}

/// Result of a single crawl step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step completed and the crawl can take another
    Continue,

    /// The crawl reached a terminal state
    Halted(HaltReason),
}

/// Final statistics reported when a crawl halts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlStats {
    /// Distinct URLs ever admitted, root included
    pub discovered_count: u64,

    /// URLs popped and fully processed
    pub visited_count: u64,

    /// Why the crawl stopped
    pub reason: HaltReason,
}

/// Breadth-first crawl controller
///
/// Holds the immutable crawl configuration, the prefix filter, the frontier,
/// and the page fetcher collaborator. All state mutation happens inside
/// [`Crawler::step`]; there is exactly one logical thread of control.
pub struct Crawler<F> {
    config: CrawlConfig,
    filter: PrefixFilter,
    frontier: Frontier,
    fetcher: F,
    root_url: String,
    halted: Option<HaltReason>,
    can_dump: bool,
}

impl<F: PageFetcher> Crawler<F> {
    /// Creates a controller seeded with the canonicalized root URL at depth 0
    pub fn new(config: CrawlConfig, root_url: &str, fetcher: F) -> Result<Self, UrlError> {
        let root_url = canonicalize_url(root_url)?;
        let frontier = Frontier::seed(root_url.clone(), config.max_urls_count);
        let filter = PrefixFilter::new(
            config.allowed_prefixes.clone(),
            config.excluded_prefixes.clone(),
        );

        Ok(Self {
            config,
            filter,
            frontier,
            fetcher,
            root_url,
            halted: None,
            can_dump: true,
        })
    }

    /// Executes one crawl step
    ///
    /// 1. Pop the frontier head; an empty frontier halts with
    ///    [`HaltReason::QueueExhausted`].
    /// 2. Fetch the page's links (failures arrive as an empty set).
    /// 3. Halt with [`HaltReason::DepthExceeded`] when the children's depth
    ///    would exceed the limit; no child is admitted.
    /// 4. Otherwise admit each child; an impending count overflow halts with
    ///    [`HaltReason::CountExceeded`], keeping children admitted earlier
    ///    in the iteration.
    /// 5. The popped URL is marked visited in every case, including halts.
    pub async fn step(&mut self) -> StepOutcome {
        if let Some(reason) = self.halted {
            return StepOutcome::Halted(reason);
        }

        let Some(entry) = self.frontier.pop() else {
            return self.halt(HaltReason::QueueExhausted);
        };

        tracing::info!("Visiting URL '{}' at depth {}", entry.url, entry.depth);

        let links = self.fetcher.fetch_links(&entry.url).await;

        let child_depth = entry.depth + 1;
        let mut outcome = StepOutcome::Continue;

        if child_depth > self.config.depth_limit {
            tracing::debug!(
                "Child depth {} exceeds maximum allowed depth {}",
                child_depth,
                self.config.depth_limit
            );
            outcome = StepOutcome::Halted(HaltReason::DepthExceeded);
        } else {
            for link in links {
                let canonical = match canonicalize_url(&link) {
                    Ok(url) => url,
                    Err(e) => {
                        tracing::debug!("Dropping unparseable link {}: {}", link, e);
                        continue;
                    }
                };

                if let Admission::WouldExceedCount =
                    self.frontier.admit(canonical, child_depth, &self.filter)
                {
                    tracing::debug!("Already found {} URLs", self.frontier.discovered_count());
                    outcome = StepOutcome::Halted(HaltReason::CountExceeded);
                    break;
                }
            }
        }

        self.frontier.mark_visited(&entry.url);

        if let StepOutcome::Halted(reason) = outcome {
            self.halt(reason)
        } else {
            StepOutcome::Continue
        }
    }

    /// Runs crawl steps until the crawl halts, then reports final statistics
    pub async fn run(&mut self) -> CrawlStats {
        let reason = loop {
            match self.step().await {
                StepOutcome::Continue => continue,
                StepOutcome::Halted(reason) => break reason,
            }
        };

        let stats = self.stats(reason);
        tracing::info!(
            "Crawl halted ({}): {} URLs found, {} visited",
            reason,
            stats.discovered_count,
            stats.visited_count
        );

        stats
    }

    fn halt(&mut self, reason: HaltReason) -> StepOutcome {
        self.halted = Some(reason);
        StepOutcome::Halted(reason)
    }

    fn stats(&self, reason: HaltReason) -> CrawlStats {
        CrawlStats {
            discovered_count: self.frontier.discovered_count(),
            visited_count: self.frontier.visited_count(),
            reason,
        }
    }

    /// Whether the controller reached a terminal state, and why
    pub fn halted(&self) -> Option<HaltReason> {
        self.halted
    }

    /// The canonical root URL of this crawl
    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    /// Read-only view of the traversal state
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Iterates over all distinct URLs discovered so far
    pub fn iter_urls(&self) -> impl Iterator<Item = &String> {
        self.frontier.iter_urls()
    }

    /// Dumps crawl state to a snapshot store and resets the controller
    ///
    /// Only a halted controller may dump; a running crawl is skipped with a
    /// warning because its in-flight state would be corrupt on restore. The
    /// capture itself is a read-only traversal of the frontier. On a
    /// successful write the traversal state is reset and further dumps are
    /// disabled until a load re-arms them.
    pub fn dump(&mut self, store: &dyn SnapshotStore) -> Result<(), SnapshotError> {
        if self.halted.is_none() {
            tracing::warn!("Snapshot dump skipped: crawl is still running");
            return Ok(());
        }

        if !self.can_dump {
            tracing::debug!("Snapshot dump skipped: state was already dumped");
            return Ok(());
        }

        let snapshot = CrawlSnapshot::capture(&self.root_url, &self.frontier);
        store.dump(&snapshot)?;

        self.frontier.reset();
        self.can_dump = false;

        Ok(())
    }

    /// Replaces the controller's state with one loaded from a snapshot store
    ///
    /// On success the controller is ready to resume: frontier order and
    /// counters are restored, the queued set is recomputed from the restored
    /// frontier, and the running state is re-entered. On failure the
    /// existing state is left untouched so the caller can fall back to it.
    pub fn load(&mut self, store: &dyn SnapshotStore) -> Result<(), SnapshotError> {
        let snapshot = store.load()?;

        self.frontier = snapshot.into_frontier(self.config.max_urls_count);
        self.halted = None;
        self.can_dump = true;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CrawlConfig;
    use std::collections::{HashMap, HashSet};

    /// Fetcher scripted with a fixed page -> links map; unknown pages fetch
    /// as empty, the same shape a failed fetch takes.
    struct ScriptedFetcher {
        pages: HashMap<String, Vec<String>>,
    }

    impl ScriptedFetcher {
        fn new(pages: &[(&str, &[&str])]) -> Self {
            let pages = pages
                .iter()
                .map(|(url, links)| {
                    (
                        url.to_string(),
                        links.iter().map(|l| l.to_string()).collect(),
                    )
                })
                .collect();
            Self { pages }
        }
    }

    impl PageFetcher for ScriptedFetcher {
        async fn fetch_links(&self, url: &str) -> HashSet<String> {
            self.pages
                .get(url)
                .map(|links| links.iter().cloned().collect())
                .unwrap_or_default()
        }
    }

    fn config(depth_limit: u32, max_urls_count: u64) -> CrawlConfig {
        CrawlConfig {
            depth_limit,
            max_urls_count,
            allowed_prefixes: vec![],
            excluded_prefixes: vec![],
        }
    }

    #[tokio::test]
    async fn test_empty_page_exhausts_queue() {
        let fetcher = ScriptedFetcher::new(&[("http://a.test/", &[])]);
        let mut crawler = Crawler::new(config(5, 100), "http://a.test/", fetcher).unwrap();

        let stats = crawler.run().await;

        assert_eq!(stats.reason, HaltReason::QueueExhausted);
        assert_eq!(stats.discovered_count, 1);
        assert_eq!(stats.visited_count, 1);
    }

    #[tokio::test]
    async fn test_prefix_filter_scenario() {
        // Root links cross-host; only the same-host child is admitted.
        let fetcher = ScriptedFetcher::new(&[(
            "http://a.test/",
            &["http://a.test/x", "http://b.test/y"] as &[&str],
        )]);
        let mut cfg = config(5, 100);
        cfg.allowed_prefixes = vec!["http://a.test/".to_string()];
        let mut crawler = Crawler::new(cfg, "http://a.test/", fetcher).unwrap();

        let outcome = crawler.step().await;
        assert_eq!(outcome, StepOutcome::Continue);
        assert_eq!(crawler.frontier().discovered_count(), 2);
        assert_eq!(crawler.frontier().visited_count(), 1);

        let queued: Vec<_> = crawler.frontier().iter_entries().cloned().collect();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].url, "http://a.test/x");
        assert_eq!(queued[0].depth, 1);
    }

    #[tokio::test]
    async fn test_depth_limit_zero_halts_after_root() {
        let fetcher = ScriptedFetcher::new(&[(
            "http://a.test/",
            &["http://a.test/x"] as &[&str],
        )]);
        let mut crawler = Crawler::new(config(0, 100), "http://a.test/", fetcher).unwrap();

        let stats = crawler.run().await;

        assert_eq!(stats.reason, HaltReason::DepthExceeded);
        assert_eq!(stats.visited_count, 1);
        assert_eq!(stats.discovered_count, 1);
        assert!(crawler.frontier().is_empty());
    }

    #[tokio::test]
    async fn test_count_bound_halts_crawl() {
        let fetcher = ScriptedFetcher::new(&[(
            "http://a.test/",
            &[
                "http://a.test/1",
                "http://a.test/2",
                "http://a.test/3",
            ] as &[&str],
        )]);
        let mut crawler = Crawler::new(config(5, 2), "http://a.test/", fetcher).unwrap();

        let stats = crawler.run().await;

        assert_eq!(stats.reason, HaltReason::CountExceeded);
        // Root plus exactly one admitted child.
        assert_eq!(stats.discovered_count, 2);
        assert_eq!(stats.visited_count, 1);
    }

    #[tokio::test]
    async fn test_bfs_pop_depths_non_decreasing() {
        let fetcher = ScriptedFetcher::new(&[
            (
                "http://a.test/",
                &["http://a.test/1", "http://a.test/2"] as &[&str],
            ),
            ("http://a.test/1", &["http://a.test/1/a"] as &[&str]),
            ("http://a.test/2", &["http://a.test/2/a"] as &[&str]),
        ]);
        let mut crawler = Crawler::new(config(5, 100), "http://a.test/", fetcher).unwrap();

        let mut last_depth = 0;
        loop {
            let next_depth = match crawler.frontier().iter_entries().next() {
                Some(entry) => entry.depth,
                None => break,
            };
            assert!(next_depth >= last_depth);
            last_depth = next_depth;

            if let StepOutcome::Halted(_) = crawler.step().await {
                break;
            }
        }

        assert_eq!(crawler.frontier().visited_count(), 5);
    }

    #[tokio::test]
    async fn test_cycles_do_not_revisit() {
        let fetcher = ScriptedFetcher::new(&[
            ("http://a.test/", &["http://a.test/x"] as &[&str]),
            ("http://a.test/x", &["http://a.test/"] as &[&str]),
        ]);
        let mut crawler = Crawler::new(config(5, 100), "http://a.test/", fetcher).unwrap();

        let stats = crawler.run().await;

        assert_eq!(stats.reason, HaltReason::QueueExhausted);
        assert_eq!(stats.discovered_count, 2);
        assert_eq!(stats.visited_count, 2);
    }

    #[tokio::test]
    async fn test_fragments_deduplicate_to_one_url() {
        let fetcher = ScriptedFetcher::new(&[(
            "http://a.test/",
            &["http://a.test/x#one", "http://a.test/x#two"] as &[&str],
        )]);
        let mut crawler = Crawler::new(config(5, 100), "http://a.test/", fetcher).unwrap();

        let stats = crawler.run().await;

        // Both fragments canonicalize to the same URL.
        assert_eq!(stats.discovered_count, 2);
        assert_eq!(stats.visited_count, 2);
    }

    #[tokio::test]
    async fn test_step_after_halt_keeps_reporting_halted() {
        let fetcher = ScriptedFetcher::new(&[("http://a.test/", &[])]);
        let mut crawler = Crawler::new(config(5, 100), "http://a.test/", fetcher).unwrap();

        crawler.run().await;
        assert_eq!(
            crawler.step().await,
            StepOutcome::Halted(HaltReason::QueueExhausted)
        );
        assert_eq!(crawler.halted(), Some(HaltReason::QueueExhausted));
    }

    #[tokio::test]
    async fn test_unparseable_links_dropped() {
        let fetcher = ScriptedFetcher::new(&[(
            "http://a.test/",
            &["not a url", "ftp://a.test/file", "http://a.test/ok"] as &[&str],
        )]);
        let mut crawler = Crawler::new(config(5, 100), "http://a.test/", fetcher).unwrap();

        let stats = crawler.run().await;

        assert_eq!(stats.discovered_count, 2);
        assert_eq!(stats.reason, HaltReason::QueueExhausted);
    }

    #[tokio::test]
    async fn test_root_url_canonicalized_at_seed() {
        let fetcher = ScriptedFetcher::new(&[]);
        let crawler =
            Crawler::new(config(5, 100), "http://a.test/page#frag", fetcher).unwrap();
        assert_eq!(crawler.root_url(), "http://a.test/page");
    }

    #[test]
    fn test_invalid_root_rejected() {
        let fetcher = ScriptedFetcher::new(&[]);
        assert!(Crawler::new(config(5, 100), "not a url", fetcher).is_err());
    }
}
