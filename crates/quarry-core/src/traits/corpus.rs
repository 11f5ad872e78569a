use crate::errors::QuarryResult;
use crate::models::{Chunk, EmbeddedChunk, EmbeddingChannel};

/// Read-only access to the chunk corpus and its precomputed embeddings.
///
/// Implementations are not required to be safe for concurrent use. The
/// pipeline shares a single store behind a lock held only for the duration of
/// each call.
pub trait ICorpusStore: Send {
    /// Every chunk that has a vector on `channel`, joined with that vector.
    fn fetch_embeddings(&self, channel: &EmbeddingChannel) -> QuarryResult<Vec<EmbeddedChunk>>;

    /// Every chunk in the corpus.
    fn fetch_all_chunks(&self) -> QuarryResult<Vec<Chunk>>;

    fn chunk_count(&self) -> QuarryResult<usize> {
        Ok(self.fetch_all_chunks()?.len())
    }

    /// Channels that have at least one vector.
    fn channels(&self) -> QuarryResult<Vec<EmbeddingChannel>>;
}
