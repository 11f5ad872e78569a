//! A failing sub-search is dropped with a diagnostic; the search still answers.

mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use quarry_core::config::RetrievalConfig;
use quarry_core::errors::{QuarryError, QuarryResult, RetrievalError, ScorerError};
use quarry_core::models::{Chunk, EmbeddedChunk, EmbeddingChannel, SearchMode, SearchRequest};
use quarry_core::traits::{ICorpusStore, IEmbeddingProvider, ILexicalScorer};
use quarry_embeddings::{HashingEmbedder, OverlapReranker};
use quarry_retrieval::RetrievalEngine;
use quarry_storage::{MemoryCorpusStore, SharedCorpus};

struct FailingScorer;

impl ILexicalScorer for FailingScorer {
    fn score(&self, _query: &[String], _corpus: &[Vec<String>]) -> QuarryResult<Vec<f64>> {
        Err(ScorerError::LexicalFailed {
            reason: "index offline".into(),
        }
        .into())
    }

    fn name(&self) -> &str {
        "failing"
    }
}

struct PanickingScorer;

impl ILexicalScorer for PanickingScorer {
    fn score(&self, _query: &[String], _corpus: &[Vec<String>]) -> QuarryResult<Vec<f64>> {
        panic!("scorer bug");
    }

    fn name(&self) -> &str {
        "panicking"
    }
}

struct BrokenEmbedder;

impl IEmbeddingProvider for BrokenEmbedder {
    fn embed(&self, _text: &str) -> QuarryResult<Vec<f32>> {
        Err(ScorerError::EmbeddingFailed {
            reason: "model unavailable".into(),
        }
        .into())
    }

    fn embed_batch(&self, _texts: &[String]) -> QuarryResult<Vec<Vec<f32>>> {
        Err(ScorerError::EmbeddingFailed {
            reason: "model unavailable".into(),
        }
        .into())
    }

    fn dimensions(&self) -> usize {
        common::DIMS
    }

    fn name(&self) -> &str {
        "broken"
    }
}

/// Panics inside the first chunk read, while the corpus lock is held.
struct CrashesOnceStore {
    inner: MemoryCorpusStore,
    crashed: AtomicBool,
}

impl ICorpusStore for CrashesOnceStore {
    fn fetch_embeddings(&self, channel: &EmbeddingChannel) -> QuarryResult<Vec<EmbeddedChunk>> {
        self.inner.fetch_embeddings(channel)
    }

    fn fetch_all_chunks(&self) -> QuarryResult<Vec<Chunk>> {
        if !self.crashed.swap(true, Ordering::SeqCst) {
            panic!("store read crashed");
        }
        self.inner.fetch_all_chunks()
    }

    fn channels(&self) -> QuarryResult<Vec<EmbeddingChannel>> {
        self.inner.channels()
    }
}

fn engine_without_dense() -> RetrievalEngine {
    RetrievalEngine::new(
        common::shared_corpus("ml_basics"),
        Arc::new(BrokenEmbedder),
        Arc::new(OverlapReranker::new()),
        RetrievalConfig::default(),
    )
    .unwrap()
}

#[test]
fn standard_mode_survives_a_failing_lexical_branch() {
    let engine = common::engine("ml_basics").with_lexical_scorer(Arc::new(FailingScorer));
    let response = engine
        .search_detailed(&SearchRequest::new(
            "How are neural networks trained with backpropagation?",
            3,
            SearchMode::Standard,
        ))
        .unwrap();

    assert_eq!(response.results.len(), 3);
    assert_eq!(response.results[0].chunk_id, 5);
    assert!(response.results.iter().all(|r| r.stage_scores.lexical.is_none()));
    assert_eq!(response.diagnostics.len(), 1);
    assert_eq!(response.diagnostics[0].stage, "standard.fanout");
    assert_eq!(response.diagnostics[0].branch, "lexical");
    assert!(response.diagnostics[0].message.contains("index offline"));
}

#[test]
fn panicking_branch_is_isolated() {
    let engine = common::engine("ml_basics").with_lexical_scorer(Arc::new(PanickingScorer));
    let response = engine
        .search_detailed(&SearchRequest::new(
            "reciprocal rank fusion of ranked lists",
            3,
            SearchMode::Standard,
        ))
        .unwrap();
    assert!(!response.results.is_empty());
    assert_eq!(response.diagnostics.len(), 1);
    assert!(response.diagnostics[0].message.contains("panicked"));

    // The engine stays usable afterwards.
    assert!(!engine
        .search("reciprocal rank fusion", 3, SearchMode::Fast)
        .unwrap()
        .is_empty());
}

#[test]
fn store_panic_does_not_disable_later_searches() {
    let store = CrashesOnceStore {
        inner: common::memory_store(
            common::fixture_chunks("ml_basics"),
            &HashingEmbedder::new(common::DIMS),
        ),
        crashed: AtomicBool::new(false),
    };
    let engine = common::engine_with(SharedCorpus::new(store), RetrievalConfig::default());
    let request = SearchRequest::new(
        "How are neural networks trained with backpropagation?",
        3,
        SearchMode::Standard,
    );

    let first = engine.search_detailed(&request).unwrap();
    assert!(!first.results.is_empty());
    assert_eq!(first.diagnostics.len(), 1);
    assert_eq!(first.diagnostics[0].branch, "lexical");
    assert!(first.diagnostics[0].message.contains("panicked"));

    let second = engine.search_detailed(&request).unwrap();
    assert!(second.diagnostics.is_empty());
    assert!(second.results.iter().any(|r| r.stage_scores.lexical.is_some()));

    assert!(!engine
        .search("backpropagation", 3, SearchMode::Fast)
        .unwrap()
        .is_empty());
}

#[test]
fn thorough_mode_drops_only_the_lexical_branches() {
    let engine = common::engine("ml_basics").with_lexical_scorer(Arc::new(FailingScorer));
    let response = engine
        .search_detailed(&SearchRequest::new(
            "How much sunlight do tomatoes need?",
            3,
            SearchMode::Thorough,
        ))
        .unwrap();

    assert!(!response.results.is_empty());
    assert!(!response.diagnostics.is_empty());
    assert!(response
        .diagnostics
        .iter()
        .all(|d| d.stage == "thorough.fanout" && d.branch.starts_with("lexical")));
}

#[test]
fn standard_mode_answers_from_lexical_when_dense_fails() {
    let response = engine_without_dense()
        .search_detailed(&SearchRequest::new(
            "How much sunlight do tomatoes need?",
            3,
            SearchMode::Standard,
        ))
        .unwrap();
    assert_eq!(response.results[0].chunk_id, 10);
    assert_eq!(response.diagnostics.len(), 1);
    assert_eq!(response.diagnostics[0].branch, "dense");
}

#[test]
fn every_branch_failing_is_an_error() {
    let engine = engine_without_dense().with_lexical_scorer(Arc::new(FailingScorer));
    let err = engine
        .search("How much sunlight do tomatoes need?", 3, SearchMode::Standard)
        .unwrap_err();
    match err {
        QuarryError::Retrieval(RetrievalError::AllBranchesFailed {
            stage,
            failures,
            last,
        }) => {
            assert_eq!(stage, "standard.fanout");
            assert_eq!(failures, 2);
            assert!(last.contains("index offline") || last.contains("model unavailable"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn fast_mode_surfaces_the_dense_failure() {
    let err = engine_without_dense()
        .search("anything", 3, SearchMode::Fast)
        .unwrap_err();
    assert!(matches!(
        err,
        QuarryError::ScorerFailure(ScorerError::EmbeddingFailed { .. })
    ));
}
