//! Read-only view over the SQLite corpus written by ingestion.

pub mod queries;
pub mod schema;

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use quarry_core::errors::{QuarryResult, StorageError};
use quarry_core::models::{Chunk, EmbeddedChunk, EmbeddingChannel};
use quarry_core::traits::ICorpusStore;

use crate::to_storage_err;

/// A single read-only connection to the corpus database.
///
/// `rusqlite::Connection` is `Send` but not `Sync`, so concurrent callers go
/// through [`crate::SharedCorpus`].
pub struct SqliteCorpusStore {
    conn: Connection,
    path: PathBuf,
}

impl SqliteCorpusStore {
    /// Open an existing corpus. Never creates the file.
    pub fn open(path: impl AsRef<Path>) -> QuarryResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StorageError::OpenFailed {
                path: path.display().to_string(),
                reason: "file does not exist".to_string(),
            }
            .into());
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| StorageError::OpenFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let store = Self::from_connection(conn, path.to_path_buf())?;
        debug!(path = %store.path.display(), "opened corpus");
        Ok(store)
    }

    /// Wrap an already-open connection. The schema is checked but not created.
    pub fn from_connection(conn: Connection, path: PathBuf) -> QuarryResult<Self> {
        conn.execute_batch("PRAGMA query_only = ON;")
            .map_err(|e| to_storage_err(e.to_string()))?;
        schema::verify(&conn)?;
        Ok(Self { conn, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ICorpusStore for SqliteCorpusStore {
    fn fetch_embeddings(&self, channel: &EmbeddingChannel) -> QuarryResult<Vec<EmbeddedChunk>> {
        queries::embeddings_for_channel(&self.conn, channel)
    }

    fn fetch_all_chunks(&self) -> QuarryResult<Vec<Chunk>> {
        queries::all_chunks(&self.conn)
    }

    fn chunk_count(&self) -> QuarryResult<usize> {
        queries::chunk_count(&self.conn)
    }

    fn channels(&self) -> QuarryResult<Vec<EmbeddingChannel>> {
        queries::channels(&self.conn)
    }
}

impl std::fmt::Debug for SqliteCorpusStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteCorpusStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
