//! In-memory corpus snapshot.

use std::collections::{BTreeMap, HashMap};

use quarry_core::errors::{QuarryResult, StorageError};
use quarry_core::models::{Chunk, ChunkId, EmbeddedChunk, EmbeddingChannel, EmbeddingRecord};
use quarry_core::traits::ICorpusStore;

/// A corpus held entirely in memory. Rows are returned in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpusStore {
    chunks: Vec<Chunk>,
    positions: HashMap<ChunkId, usize>,
    /// channel -> chunk position -> vector
    vectors: BTreeMap<EmbeddingChannel, BTreeMap<usize, Vec<f32>>>,
}

impl MemoryCorpusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from chunks. Later chunks with a repeated id are ignored.
    pub fn from_chunks(chunks: impl IntoIterator<Item = Chunk>) -> Self {
        let mut store = Self::new();
        for chunk in chunks {
            store.insert_chunk(chunk);
        }
        store
    }

    /// Add a chunk. Returns false if a chunk with the same id already exists.
    pub fn insert_chunk(&mut self, chunk: Chunk) -> bool {
        if self.positions.contains_key(&chunk.id) {
            return false;
        }
        self.positions.insert(chunk.id, self.chunks.len());
        self.chunks.push(chunk);
        true
    }

    /// Attach a vector to an existing chunk, replacing any previous vector on
    /// the same channel.
    pub fn insert_record(&mut self, record: EmbeddingRecord) -> QuarryResult<()> {
        let position = *self
            .positions
            .get(&record.chunk_id)
            .ok_or_else(|| StorageError::ReadFailed {
                reason: format!("no chunk with id {}", record.chunk_id),
            })?;
        self.vectors
            .entry(record.channel)
            .or_default()
            .insert(position, record.vector);
        Ok(())
    }

    pub fn with_record(mut self, record: EmbeddingRecord) -> QuarryResult<Self> {
        self.insert_record(record)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl ICorpusStore for MemoryCorpusStore {
    fn fetch_embeddings(&self, channel: &EmbeddingChannel) -> QuarryResult<Vec<EmbeddedChunk>> {
        let Some(vectors) = self.vectors.get(channel) else {
            return Ok(Vec::new());
        };
        Ok(vectors
            .iter()
            .map(|(&position, vector)| EmbeddedChunk {
                chunk: self.chunks[position].clone(),
                vector: vector.clone(),
            })
            .collect())
    }

    fn fetch_all_chunks(&self) -> QuarryResult<Vec<Chunk>> {
        Ok(self.chunks.clone())
    }

    fn chunk_count(&self) -> QuarryResult<usize> {
        Ok(self.chunks.len())
    }

    fn channels(&self) -> QuarryResult<Vec<EmbeddingChannel>> {
        Ok(self
            .vectors
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(c, _)| c.clone())
            .collect())
    }
}
