//! SQLite snapshot backend
//!
//! Stores the same logical schema as the JSON backend in three tables: a
//! single-row header with the root URL and counters, the visited set, and
//! the frontier queue keyed by position so FIFO order survives the round
//! trip.

use crate::snapshot::traits::{SnapshotError, SnapshotResult, SnapshotStore};
use crate::snapshot::CrawlSnapshot;
use rusqlite::{params, Connection};
use std::path::Path;

/// Snapshot store backed by a SQLite database file
pub struct SqliteSnapshotStore {
    root_url: String,
    conn: Connection,
}

impl SqliteSnapshotStore {
    /// Opens or creates the database at `path` for the given crawl root
    pub fn new(root_url: &str, path: &Path) -> SnapshotResult<Self> {
        let conn = Connection::open(path)?;
        initialize_schema(&conn)?;

        Ok(Self {
            root_url: root_url.to_string(),
            conn,
        })
    }

    /// Creates an in-memory store (for testing)
    #[cfg(test)]
    pub fn new_in_memory(root_url: &str) -> SnapshotResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;

        Ok(Self {
            root_url: root_url.to_string(),
            conn,
        })
    }
}

fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS snapshot (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            root_url TEXT NOT NULL,
            urls_count INTEGER NOT NULL,
            urls_visited_count INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS visited_urls (
            url TEXT PRIMARY KEY
        );

        CREATE TABLE IF NOT EXISTS queue_entries (
            position INTEGER PRIMARY KEY,
            url TEXT NOT NULL,
            depth INTEGER NOT NULL
        );
        ",
    )
}

impl SnapshotStore for SqliteSnapshotStore {
    fn dump(&self, snapshot: &CrawlSnapshot) -> SnapshotResult<()> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute("DELETE FROM snapshot", [])?;
        tx.execute("DELETE FROM visited_urls", [])?;
        tx.execute("DELETE FROM queue_entries", [])?;

        tx.execute(
            "INSERT INTO snapshot (id, root_url, urls_count, urls_visited_count)
             VALUES (1, ?1, ?2, ?3)",
            params![
                snapshot.root_url,
                snapshot.urls_count as i64,
                snapshot.urls_visited_count as i64
            ],
        )?;

        for url in &snapshot.urls_visited {
            tx.execute(
                "INSERT OR IGNORE INTO visited_urls (url) VALUES (?1)",
                params![url],
            )?;
        }

        for (position, (url, depth)) in snapshot.queue_data.iter().enumerate() {
            tx.execute(
                "INSERT INTO queue_entries (position, url, depth) VALUES (?1, ?2, ?3)",
                params![position as i64, url, depth],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    fn load(&self) -> SnapshotResult<CrawlSnapshot> {
        let (root_url, urls_count, urls_visited_count) = self.conn.query_row(
            "SELECT root_url, urls_count, urls_visited_count FROM snapshot WHERE id = 1",
            [],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            },
        )?;

        if root_url != self.root_url {
            return Err(SnapshotError::RootMismatch {
                expected: self.root_url.clone(),
                found: root_url,
            });
        }

        let mut stmt = self.conn.prepare("SELECT url FROM visited_urls")?;
        let urls_visited = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt = self
            .conn
            .prepare("SELECT url, depth FROM queue_entries ORDER BY position")?;
        let queue_data = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(CrawlSnapshot {
            root_url,
            urls_visited,
            queue_data,
            urls_count: urls_count as u64,
            urls_visited_count: urls_visited_count as u64,
        })
    }
}
