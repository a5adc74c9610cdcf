//! # lode-store
//!
//! Persistent query cache and concept index for Lodestar.
//!
//! Backed by a local libSQL database file with three tables: cached query
//! results, the facts behind each result, and a popularity-ranked index of
//! concepts learned from answers. Every operation opens its own connection
//! and runs inside a single transaction. Operations on one store take turns
//! through a gate, so concurrent pipeline runs queue instead of failing on a
//! locked database. Other processes sharing the file are waited on for up to
//! [`BUSY_TIMEOUT_MS`].

mod concepts;
pub mod error;
pub mod helpers;
mod migrations;
mod queries;
mod stats;

use std::ops::Deref;
use std::path::{Path, PathBuf};

use libsql::Builder;
use tokio::sync::{Mutex, MutexGuard};

pub use error::StoreError;
pub use helpers::QueryKey;

/// How long a connection waits on a lock held by another process.
pub const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Handle to the knowledge database.
pub struct KnowledgeStore {
    db: libsql::Database,
    path: PathBuf,
    gate: Mutex<()>,
}

/// A connection that holds the store's gate until dropped.
pub(crate) struct Session<'a> {
    conn: libsql::Connection,
    _turn: MutexGuard<'a, ()>,
}

impl Deref for Session<'_> {
    type Target = libsql::Connection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl KnowledgeStore {
    /// Open (creating if needed) the database at `path` and apply the schema.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the directory cannot be created, the file
    /// cannot be opened, or migrations fail.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let db = Builder::new_local(&path).build().await?;
        let store = Self {
            db,
            path,
            gate: Mutex::new(()),
        };
        store.enable_wal().await?;
        store.run_migrations().await?;
        tracing::debug!(path = %store.path.display(), "knowledge store opened");
        Ok(store)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Wait for this store's turn, then open a fresh connection with foreign
    /// keys enforced and a busy timeout set.
    pub(crate) async fn connect(&self) -> Result<Session<'_>, StoreError> {
        let turn = self.gate.lock().await;
        let conn = self.db.connect()?;
        // Both must be set per connection in SQLite.
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| StoreError::Migration(format!("PRAGMA foreign_keys: {e}")))?;
        conn.query(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}"), ())
            .await
            .map_err(|e| StoreError::Migration(format!("PRAGMA busy_timeout: {e}")))?;
        Ok(Session { conn, _turn: turn })
    }

    /// Readers stop blocking the writer once the file is in WAL mode. The
    /// setting persists in the file.
    async fn enable_wal(&self) -> Result<(), StoreError> {
        let conn = self.connect().await?;
        let mut rows = conn
            .query("PRAGMA journal_mode = WAL", ())
            .await
            .map_err(|e| StoreError::Migration(format!("PRAGMA journal_mode: {e}")))?;
        if let Some(row) = rows.next().await? {
            let mode = row.get::<String>(0)?;
            tracing::debug!(%mode, "journal mode set");
        }
        Ok(())
    }
}

impl std::fmt::Debug for KnowledgeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn open_creates_schema() {
        let dir = TempDir::new().unwrap();
        let store = KnowledgeStore::open(dir.path().join("nested/kb.db")).await.unwrap();
        let conn = store.connect().await.unwrap();

        for table in ["queries", "facts", "knowledge_base"] {
            let mut rows = conn
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                )
                .await
                .unwrap();
            assert!(rows.next().await.unwrap().is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn reopening_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kb.db");
        drop(KnowledgeStore::open(&path).await.unwrap());
        let store = KnowledgeStore::open(&path).await.unwrap();
        assert_eq!(store.path(), path.as_path());
    }

    #[tokio::test]
    async fn file_uses_write_ahead_log() {
        let dir = TempDir::new().unwrap();
        let store = KnowledgeStore::open(dir.path().join("kb.db")).await.unwrap();
        let conn = store.connect().await.unwrap();
        let mut rows = conn.query("PRAGMA journal_mode", ()).await.unwrap();
        let mode = rows.next().await.unwrap().unwrap().get::<String>(0).unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }
}
