//! Frontier queue, deduplication, and bound tracking
//!
//! This module owns the breadth-first traversal state:
//! - FIFO queue of (URL, depth) entries awaiting a fetch
//! - Queued/visited sets used as the dedup key space
//! - Discovered/visited counters and the discovered-URL bound

use crate::url::PrefixFilter;
use std::collections::{HashSet, VecDeque};

/// A URL awaiting processing, tagged with its depth from the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// Canonical URL
    pub url: String,

    /// Distance from the root entry (root is 0)
    pub depth: u32,
}

/// Outcome of attempting to admit a discovered URL into the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// URL entered the frontier; the discovered count was incremented
    Admitted,

    /// URL is already queued or visited
    Duplicate,

    /// URL was rejected by the prefix filter
    Filtered,

    /// Admitting one more URL would push the discovered count past the
    /// configured maximum; the crawl must halt
    WouldExceedCount,
}

/// Breadth-first crawl frontier with dedup sets and counters
///
/// A URL belongs to at most one of the queued and visited sets, except
/// between [`Frontier::pop`] and [`Frontier::mark_visited`] where the popped
/// URL is still in the queued set while its page is processed.
#[derive(Debug, Clone)]
pub struct Frontier {
    entries: VecDeque<FrontierEntry>,
    queued: HashSet<String>,
    visited: HashSet<String>,
    discovered_count: u64,
    visited_count: u64,
    max_urls_count: u64,
}

impl Frontier {
    /// Creates a frontier seeded with the root URL at depth 0
    ///
    /// The root counts as discovered, so the discovered count starts at 1.
    pub fn seed(root_url: String, max_urls_count: u64) -> Self {
        let mut entries = VecDeque::new();
        let mut queued = HashSet::new();
        queued.insert(root_url.clone());
        entries.push_back(FrontierEntry {
            url: root_url,
            depth: 0,
        });

        Self {
            entries,
            queued,
            visited: HashSet::new(),
            discovered_count: 1,
            visited_count: 0,
            max_urls_count,
        }
    }

    /// Reconstructs a frontier from restored snapshot parts
    ///
    /// The queued set is recomputed as the set of URLs present in the
    /// restored entries; counters are taken as stored.
    pub fn from_parts(
        entries: Vec<FrontierEntry>,
        visited: HashSet<String>,
        discovered_count: u64,
        visited_count: u64,
        max_urls_count: u64,
    ) -> Self {
        let queued = entries.iter().map(|e| e.url.clone()).collect();

        Self {
            entries: entries.into(),
            queued,
            visited,
            discovered_count,
            visited_count,
            max_urls_count,
        }
    }

    /// Removes and returns the head entry, in FIFO order
    ///
    /// The popped URL stays in the queued set until [`Frontier::mark_visited`]
    /// is called for it.
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.entries.pop_front()
    }

    /// Attempts to admit a discovered URL at the given depth
    ///
    /// The impending-overflow check runs before dedup and filtering, so a
    /// full frontier reports [`Admission::WouldExceedCount`] even for a URL
    /// that would otherwise have been rejected as a duplicate. On admission
    /// the entry is pushed at the tail, the URL joins the queued set, and the
    /// discovered count is incremented.
    pub fn admit(&mut self, url: String, depth: u32, filter: &PrefixFilter) -> Admission {
        if self.discovered_count + 1 > self.max_urls_count {
            return Admission::WouldExceedCount;
        }

        if !filter.is_admissible(&url) {
            return Admission::Filtered;
        }

        if self.visited.contains(&url) || self.queued.contains(&url) {
            return Admission::Duplicate;
        }

        self.queued.insert(url.clone());
        self.entries.push_back(FrontierEntry { url, depth });
        self.discovered_count += 1;

        Admission::Admitted
    }

    /// Moves a popped URL from the queued set into the visited set
    ///
    /// The URL may already be absent from the queued set (a restored root is
    /// one such case); it is added to the visited set regardless and the
    /// visited count is incremented.
    pub fn mark_visited(&mut self, url: &str) {
        self.queued.remove(url);
        self.visited.insert(url.to_string());
        self.visited_count += 1;
    }

    /// Returns whether the frontier has no pending entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of pending entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Count of distinct URLs ever admitted, root included
    pub fn discovered_count(&self) -> u64 {
        self.discovered_count
    }

    /// Count of URLs popped and fully processed
    pub fn visited_count(&self) -> u64 {
        self.visited_count
    }

    /// Read-only view of the visited set
    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    /// Read-only traversal of pending entries in FIFO order
    ///
    /// Used for snapshot capture; never mutates the frontier.
    pub fn iter_entries(&self) -> impl Iterator<Item = &FrontierEntry> {
        self.entries.iter()
    }

    /// Iterates over all distinct URLs discovered so far, queued and visited
    pub fn iter_urls(&self) -> impl Iterator<Item = &String> {
        self.queued.union(&self.visited)
    }

    /// Clears all traversal state and zeroes the counters
    pub fn reset(&mut self) {
        self.entries.clear();
        self.queued.clear();
        self.visited.clear();
        self.discovered_count = 0;
        self.visited_count = 0;
    }

    #[cfg(test)]
    pub(crate) fn queued(&self) -> &HashSet<String> {
        &self.queued
    }
}
