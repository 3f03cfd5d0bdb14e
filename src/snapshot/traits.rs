//! Snapshot store trait and error types

use crate::snapshot::CrawlSnapshot;
use thiserror::Error;

/// Errors that can occur during snapshot operations
///
/// A root mismatch is its own variant so callers can tell "this snapshot
/// belongs to a different crawl" apart from plain storage failures.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot root URL '{found}' does not match the current root URL '{expected}'")]
    RootMismatch { expected: String, found: String },

    #[error("snapshot IO error: {0}")]
    StorageIo(#[from] std::io::Error),

    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("snapshot database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type for snapshot operations
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Capability for persisting and restoring crawl snapshots
///
/// A store is keyed by the root URL it was constructed with: loading a
/// snapshot stored under a different root fails with
/// [`SnapshotError::RootMismatch`] rather than silently resuming someone
/// else's crawl.
pub trait SnapshotStore {
    /// Writes a snapshot, replacing any previously stored one
    fn dump(&self, snapshot: &CrawlSnapshot) -> SnapshotResult<()>;

    /// Reads back the stored snapshot
    ///
    /// Fails with [`SnapshotError::RootMismatch`] when the stored root URL
    /// differs from the store's expected root; any read or parse failure
    /// surfaces as the corresponding storage variant.
    fn load(&self) -> SnapshotResult<CrawlSnapshot>;
}
