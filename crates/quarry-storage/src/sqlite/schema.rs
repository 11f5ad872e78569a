//! Corpus tables as written by ingestion.

use rusqlite::Connection;

use quarry_core::errors::{QuarryResult, StorageError};

use crate::to_storage_err;

/// DDL for the corpus. Embeddings are little-endian `f32` blobs.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS docs (
    id          INTEGER PRIMARY KEY,
    source      TEXT NOT NULL,
    chunk_text  TEXT NOT NULL,
    chunk_index INTEGER NOT NULL DEFAULT 0,
    metadata    TEXT
);
CREATE TABLE IF NOT EXISTS embeddings (
    doc_id         INTEGER NOT NULL REFERENCES docs(id),
    embedding_type TEXT NOT NULL,
    embedding      BLOB NOT NULL,
    PRIMARY KEY (doc_id, embedding_type)
);
CREATE INDEX IF NOT EXISTS idx_embeddings_type ON embeddings(embedding_type);
";

const REQUIRED_TABLES: [&str; 2] = ["docs", "embeddings"];

/// Fail with `ReadFailed` if any corpus table is missing.
pub fn verify(conn: &Connection) -> QuarryResult<()> {
    for table in REQUIRED_TABLES {
        let present: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
                [table],
                |row| row.get(0),
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        if !present {
            return Err(StorageError::ReadFailed {
                reason: format!("corpus is missing table '{table}'"),
            }
            .into());
        }
    }
    Ok(())
}
