use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quarry_core::config::{CandidateKey, RetrievalConfig};
use quarry_core::models::{Chunk, EmbeddingChannel, EmbeddingRecord, ScoredCandidate, SearchMode};
use quarry_core::traits::IEmbeddingProvider;
use quarry_embeddings::{HashingEmbedder, OverlapReranker};
use quarry_retrieval::search::rrf_fusion::fuse;
use quarry_retrieval::RetrievalEngine;
use quarry_storage::{MemoryCorpusStore, SharedCorpus};

const TOPICS: &[&str] = &[
    "gradient descent updates weights to reduce the loss",
    "an inverted index maps terms to the documents containing them",
    "a write ahead log makes database commits durable",
    "the borrow checker prevents dangling references",
    "compost turns kitchen scraps into rich soil",
];

fn engine(size: usize) -> RetrievalEngine {
    let embedder = HashingEmbedder::new(256);
    let mut store = MemoryCorpusStore::new();
    for i in 0..size {
        let text = format!(
            "Passage {i}. {}. It also mentions {}.",
            TOPICS[i % TOPICS.len()],
            TOPICS[(i * 7 + 3) % TOPICS.len()]
        );
        store.insert_chunk(Chunk::new(i as i64, format!("doc{}.md", i / 10), text.clone()));
        store
            .insert_record(EmbeddingRecord {
                chunk_id: i as i64,
                channel: EmbeddingChannel::full(),
                vector: embedder.embed(&text).unwrap(),
            })
            .unwrap();
    }
    RetrievalEngine::new(
        SharedCorpus::new(store),
        Arc::new(embedder),
        Arc::new(OverlapReranker::new()),
        RetrievalConfig::default(),
    )
    .unwrap()
}

fn bench_modes(c: &mut Criterion) {
    let engine = engine(500);
    for mode in [SearchMode::Fast, SearchMode::Standard, SearchMode::Thorough] {
        c.bench_function(&format!("search_{mode}_500"), |b| {
            b.iter(|| {
                engine
                    .search(black_box("How does the borrow checker prevent dangling references?"), 10, mode)
                    .unwrap()
            })
        });
    }
}

fn bench_fusion(c: &mut Criterion) {
    let lists: Vec<Vec<ScoredCandidate>> = (0..10)
        .map(|l| {
            (0..50)
                .map(|i| {
                    let id = (i * (l + 1)) % 200;
                    ScoredCandidate::new(Arc::new(Chunk::new(id, "p.md", format!("chunk {id}"))))
                })
                .collect()
        })
        .collect();
    c.bench_function("rrf_fuse_10x50", |b| {
        b.iter(|| fuse(black_box(&lists), 60, CandidateKey::ChunkId))
    });
}

criterion_group!(benches, bench_modes, bench_fusion);
criterion_main!(benches);
