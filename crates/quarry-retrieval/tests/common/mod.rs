//! Shared setup: fixture corpora embedded with the hashing embedder.

#![allow(dead_code)]

use std::sync::Arc;

use quarry_core::config::RetrievalConfig;
use quarry_core::models::{Chunk, EmbeddingChannel, EmbeddingRecord};
use quarry_core::traits::IEmbeddingProvider;
use quarry_embeddings::{HashingEmbedder, OverlapReranker};
use quarry_retrieval::RetrievalEngine;
use quarry_storage::{MemoryCorpusStore, SharedCorpus};

pub const DIMS: usize = 256;

pub fn fixture_chunks(name: &str) -> Vec<Chunk> {
    test_fixtures::load_corpus(name)
        .chunks
        .into_iter()
        .map(|v| serde_json::from_value(v).expect("fixture chunk"))
        .collect()
}

/// In-memory store with `full` and `first_sentence` vectors for every chunk.
pub fn memory_store(chunks: Vec<Chunk>, embedder: &dyn IEmbeddingProvider) -> MemoryCorpusStore {
    let mut store = MemoryCorpusStore::from_chunks(chunks.clone());
    for chunk in &chunks {
        let first = chunk.text.split('.').next().unwrap_or_default();
        for (channel, text) in [
            (EmbeddingChannel::full(), chunk.text.as_str()),
            (EmbeddingChannel::first_sentence(), first),
        ] {
            store
                .insert_record(EmbeddingRecord {
                    chunk_id: chunk.id,
                    channel,
                    vector: embedder.embed(text).unwrap(),
                })
                .unwrap();
        }
    }
    store
}

pub fn shared_corpus(name: &str) -> SharedCorpus {
    let embedder = HashingEmbedder::new(DIMS);
    SharedCorpus::new(memory_store(fixture_chunks(name), &embedder))
}

pub fn engine_with(corpus: SharedCorpus, config: RetrievalConfig) -> RetrievalEngine {
    RetrievalEngine::new(
        corpus,
        Arc::new(HashingEmbedder::new(DIMS)),
        Arc::new(OverlapReranker::new()),
        config,
    )
    .expect("engine")
}

pub fn engine(name: &str) -> RetrievalEngine {
    engine_with(shared_corpus(name), RetrievalConfig::default())
}

pub fn empty_engine() -> RetrievalEngine {
    engine_with(
        SharedCorpus::new(MemoryCorpusStore::new()),
        RetrievalConfig::default(),
    )
}
