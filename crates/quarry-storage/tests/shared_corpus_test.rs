//! SharedCorpus under concurrent readers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use quarry_core::errors::{QuarryResult, StorageError};
use quarry_core::models::{Chunk, EmbeddedChunk, EmbeddingChannel, EmbeddingRecord};
use quarry_core::traits::ICorpusStore;
use quarry_storage::{MemoryCorpusStore, SharedCorpus};

/// Fails the test if two reads ever overlap.
struct ExclusiveStore {
    inner: MemoryCorpusStore,
    active: Arc<AtomicUsize>,
    max_seen: Arc<AtomicUsize>,
}

impl ExclusiveStore {
    fn enter(&self) {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_seen.fetch_max(now, Ordering::SeqCst);
        thread::sleep(std::time::Duration::from_millis(2));
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ICorpusStore for ExclusiveStore {
    fn fetch_embeddings(&self, channel: &EmbeddingChannel) -> QuarryResult<Vec<EmbeddedChunk>> {
        self.enter();
        self.inner.fetch_embeddings(channel)
    }

    fn fetch_all_chunks(&self) -> QuarryResult<Vec<Chunk>> {
        self.enter();
        self.inner.fetch_all_chunks()
    }

    fn channels(&self) -> QuarryResult<Vec<EmbeddingChannel>> {
        self.inner.channels()
    }
}

fn small_store() -> MemoryCorpusStore {
    MemoryCorpusStore::from_chunks([Chunk::new(1, "a", "alpha"), Chunk::new(2, "b", "beta")])
        .with_record(EmbeddingRecord {
            chunk_id: 1,
            channel: EmbeddingChannel::full(),
            vector: vec![1.0, 0.0],
        })
        .unwrap()
}

#[test]
fn reads_never_overlap() {
    let max_seen = Arc::new(AtomicUsize::new(0));
    let shared = SharedCorpus::new(ExclusiveStore {
        inner: small_store(),
        active: Arc::new(AtomicUsize::new(0)),
        max_seen: Arc::clone(&max_seen),
    });

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let shared = shared.clone();
            thread::spawn(move || {
                if i % 2 == 0 {
                    shared.fetch_all_chunks().unwrap().len()
                } else {
                    shared.fetch_embeddings(&EmbeddingChannel::full()).unwrap().len()
                }
            })
        })
        .collect();
    let sizes: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    for (i, size) in sizes.into_iter().enumerate() {
        assert_eq!(size, if i % 2 == 0 { 2 } else { 1 });
    }
}

#[test]
fn store_recovers_after_a_reader_panics() {
    let shared = SharedCorpus::new(small_store());
    let crashing = shared.clone();
    let joined = thread::spawn(move || {
        let _: QuarryResult<()> = crashing.with_store(|_| panic!("reader crashed"));
    })
    .join();
    assert!(joined.is_err());

    assert_eq!(shared.fetch_all_chunks().unwrap().len(), 2);
    assert_eq!(shared.fetch_embeddings(&EmbeddingChannel::full()).unwrap().len(), 1);
    assert_eq!(shared.chunk_count().unwrap(), 2);
}

#[test]
fn store_errors_pass_through() {
    let shared = SharedCorpus::new(small_store());
    let err = shared
        .with_store(|_| -> QuarryResult<()> {
            Err(StorageError::ReadFailed {
                reason: "disk gone".into(),
            }
            .into())
        })
        .unwrap_err();
    assert!(err.to_string().contains("disk gone"));
}
