//! Snapshot persistence for suspending and resuming a crawl
//!
//! A snapshot captures everything needed to resume traversal exactly where
//! it stopped: the root URL, the visited set, the frontier in FIFO order,
//! and both counters. The [`SnapshotStore`] trait is the storage capability;
//! JSON files and SQLite databases are the two conforming backends.

mod json;
mod sqlite;
mod traits;

pub use json::JsonSnapshotStore;
pub use sqlite::SqliteSnapshotStore;
pub use traits::{SnapshotError, SnapshotResult, SnapshotStore};

use crate::crawler::{Frontier, FrontierEntry};
use serde::{Deserialize, Serialize};

/// Serializable copy of crawl state, sufficient to resume traversal
///
/// Field names are the wire schema shared by every backend. Counters absent
/// from a stored snapshot default the way a freshly seeded crawl starts:
/// one discovered URL (the root), zero visited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlSnapshot {
    /// Root URL the captured crawl was started from
    pub root_url: String,

    /// Fully processed URLs; order carries no meaning
    #[serde(default)]
    pub urls_visited: Vec<String>,

    /// Frontier contents as `[url, depth]` pairs, FIFO order preserved
    #[serde(default)]
    pub queue_data: Vec<(String, u32)>,

    /// Distinct URLs discovered, root included
    #[serde(default = "default_urls_count")]
    pub urls_count: u64,

    /// URLs popped and fully processed
    #[serde(default)]
    pub urls_visited_count: u64,
}

fn default_urls_count() -> u64 {
    1
}

impl CrawlSnapshot {
    /// Captures crawl state by read-only traversal of the live frontier
    ///
    /// The frontier is never mutated; entries are copied out in FIFO order.
    pub fn capture(root_url: &str, frontier: &Frontier) -> Self {
        Self {
            root_url: root_url.to_string(),
            urls_visited: frontier.visited().iter().cloned().collect(),
            queue_data: frontier
                .iter_entries()
                .map(|entry| (entry.url.clone(), entry.depth))
                .collect(),
            urls_count: frontier.discovered_count(),
            urls_visited_count: frontier.visited_count(),
        }
    }

    /// Rebuilds a frontier from this snapshot
    ///
    /// Frontier order is preserved; the queued set is recomputed as the set
    /// of URLs present in the restored queue.
    pub fn into_frontier(self, max_urls_count: u64) -> Frontier {
        let entries = self
            .queue_data
            .into_iter()
            .map(|(url, depth)| FrontierEntry { url, depth })
            .collect();

        Frontier::from_parts(
            entries,
            self.urls_visited.into_iter().collect(),
            self.urls_count,
            self.urls_visited_count,
            max_urls_count,
        )
    }
}
