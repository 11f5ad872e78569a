//! # quarry-storage
//!
//! Read-only corpus access. Ingestion writes the corpus; this crate only reads it.
//!
//! - [`SqliteCorpusStore`]: the on-disk corpus produced by ingestion.
//! - [`MemoryCorpusStore`]: an in-memory snapshot, for tests and small corpora.
//! - [`SharedCorpus`]: one store shared across fan-out workers behind a lock held
//!   only for the duration of each read.

pub mod blob;
pub mod memory;
pub mod shared;
pub mod sqlite;

pub use memory::MemoryCorpusStore;
pub use shared::SharedCorpus;
pub use sqlite::SqliteCorpusStore;

use quarry_core::errors::{QuarryError, StorageError};

/// Convert a string message into a corpus error.
pub(crate) fn to_storage_err(msg: String) -> QuarryError {
    StorageError::SqliteError { message: msg }.into()
}
