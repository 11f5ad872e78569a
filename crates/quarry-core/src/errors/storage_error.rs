use crate::models::ChunkId;

/// Corpus store read errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("cannot open corpus at {path}: {reason}")]
    OpenFailed { path: String, reason: String },

    #[error("malformed embedding for chunk {chunk_id}: {len} bytes is not a whole number of f32 values")]
    MalformedEmbedding { chunk_id: ChunkId, len: usize },

    #[error("corpus read failed: {reason}")]
    ReadFailed { reason: String },
}
