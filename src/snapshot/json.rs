//! JSON file snapshot backend

use crate::snapshot::traits::{SnapshotError, SnapshotResult, SnapshotStore};
use crate::snapshot::CrawlSnapshot;
use std::path::{Path, PathBuf};

/// Snapshot store backed by a single pretty-printed JSON file
pub struct JsonSnapshotStore {
    root_url: String,
    path: PathBuf,
}

impl JsonSnapshotStore {
    /// Creates a store for the given crawl root, writing to `path`
    pub fn new(root_url: &str, path: &Path) -> Self {
        Self {
            root_url: root_url.to_string(),
            path: path.to_path_buf(),
        }
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn dump(&self, snapshot: &CrawlSnapshot) -> SnapshotResult<()> {
        let json = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn load(&self) -> SnapshotResult<CrawlSnapshot> {
        let content = std::fs::read_to_string(&self.path)?;
        let snapshot: CrawlSnapshot = serde_json::from_str(&content)?;

        if snapshot.root_url != self.root_url {
            return Err(SnapshotError::RootMismatch {
                expected: self.root_url.clone(),
                found: snapshot.root_url,
            });
        }

        Ok(snapshot)
    }
}
