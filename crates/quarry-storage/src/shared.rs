//! One corpus store shared by every fan-out worker.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{trace, warn};

use quarry_core::errors::QuarryResult;
use quarry_core::models::{Chunk, EmbeddedChunk, EmbeddingChannel};
use quarry_core::traits::ICorpusStore;

/// A corpus store behind a mutex.
///
/// The store is not assumed safe for concurrent use, so every read takes the
/// lock for exactly the duration of the store call. Scoring over the returned
/// rows happens after the lock is released. Cloning shares the same store.
#[derive(Clone)]
pub struct SharedCorpus {
    store: Arc<Mutex<Box<dyn ICorpusStore>>>,
}

impl SharedCorpus {
    pub fn new<S: ICorpusStore + 'static>(store: S) -> Self {
        Self::from_boxed(Box::new(store))
    }

    pub fn from_boxed(store: Box<dyn ICorpusStore>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Run one read against the store while holding the lock.
    ///
    /// Stores are read-only, so a reader that panicked mid-call leaves nothing
    /// half-written; a poisoned lock is cleared and the read proceeds.
    pub fn with_store<F, T>(&self, f: F) -> QuarryResult<T>
    where
        F: FnOnce(&dyn ICorpusStore) -> QuarryResult<T>,
    {
        let guard = self.store.lock().unwrap_or_else(|poisoned| {
            warn!("corpus reader panicked while holding the lock; recovering");
            self.store.clear_poison();
            PoisonError::into_inner(poisoned)
        });
        f(&**guard)
    }

    pub fn fetch_embeddings(&self, channel: &EmbeddingChannel) -> QuarryResult<Vec<EmbeddedChunk>> {
        let rows = self.with_store(|store| store.fetch_embeddings(channel))?;
        trace!(%channel, rows = rows.len(), "fetched embeddings");
        Ok(rows)
    }

    pub fn fetch_all_chunks(&self) -> QuarryResult<Vec<Chunk>> {
        let chunks = self.with_store(|store| store.fetch_all_chunks())?;
        trace!(chunks = chunks.len(), "fetched chunks");
        Ok(chunks)
    }

    pub fn chunk_count(&self) -> QuarryResult<usize> {
        self.with_store(|store| store.chunk_count())
    }

    pub fn channels(&self) -> QuarryResult<Vec<EmbeddingChannel>> {
        self.with_store(|store| store.channels())
    }
}

impl std::fmt::Debug for SharedCorpus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedCorpus").finish_non_exhaustive()
    }
}
