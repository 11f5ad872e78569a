//! RetrievalEngine: the single entry point, dispatching to a per-mode pipeline.
//!
//! fast:     dense(root, top_k)
//! standard: {dense, lexical}(root, 20) in parallel → RRF → top 15 → rerank → top_k
//! thorough: plan (≤7 variants) → {dense, lexical} × first 5 variants in
//!           parallel → dedup → late interaction (≤50 → 30) → rerank (20)
//!           → diversity → top_k

mod deadline;
mod fast;
mod standard;
mod thorough;

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use quarry_core::config::{QuarryConfig, RetrievalConfig};
use quarry_core::errors::QuarryResult;
use quarry_core::models::{
    Diagnostic, QueryPlan, ResponseMode, ScoredCandidate, SearchMode, SearchRequest,
    SearchResponse, SearchResult,
};
use quarry_core::traits::{IEmbeddingProvider, ILexicalScorer, IReranker};
use quarry_embeddings::{create_provider, create_reranker};
use quarry_storage::{SharedCorpus, SqliteCorpusStore};

use crate::executor::FanOutExecutor;
use crate::expansion::QueryEnhancer;
use crate::search::{Bm25Plus, DenseSearcher, LexicalSearcher, Signal};

pub use deadline::search_with_timeout;

/// One sub-search of a fan-out stage.
#[derive(Debug, Clone)]
pub(crate) struct Probe {
    signal: Signal,
    text: String,
    k: usize,
}

impl Probe {
    pub(crate) fn new(signal: Signal, text: impl Into<String>, k: usize) -> Self {
        Self {
            signal,
            text: text.into(),
            k,
        }
    }
}

/// What a mode pipeline hands back to the dispatcher.
pub(crate) struct PipelineRun {
    candidates: Vec<ScoredCandidate>,
    plan: QueryPlan,
    diagnostics: Vec<Diagnostic>,
}

/// The retrieval pipeline over one corpus.
///
/// Collaborators are injected as trait objects. The engine is `Send + Sync`
/// and meant to be shared (e.g. behind an `Arc`) by concurrent callers.
pub struct RetrievalEngine {
    corpus: SharedCorpus,
    embedder: Arc<dyn IEmbeddingProvider>,
    reranker: Arc<dyn IReranker>,
    dense: DenseSearcher,
    lexical: LexicalSearcher,
    enhancer: QueryEnhancer,
    executor: FanOutExecutor,
    config: RetrievalConfig,
}

impl RetrievalEngine {
    pub fn new(
        corpus: SharedCorpus,
        embedder: Arc<dyn IEmbeddingProvider>,
        reranker: Arc<dyn IReranker>,
        config: RetrievalConfig,
    ) -> QuarryResult<Self> {
        config.validate()?;
        let executor = FanOutExecutor::new(config.worker_threads)?;
        let dense = DenseSearcher::new(
            corpus.clone(),
            Arc::clone(&embedder),
            config.dense_channel.clone(),
        );
        let lexical = LexicalSearcher::new(corpus.clone(), Arc::new(Bm25Plus::default()));
        Ok(Self {
            corpus,
            embedder,
            reranker,
            dense,
            lexical,
            enhancer: QueryEnhancer::new(config.thorough_max_variants),
            executor,
            config,
        })
    }

    /// Replace the default BM25+ scorer.
    pub fn with_lexical_scorer(mut self, scorer: Arc<dyn ILexicalScorer>) -> Self {
        self.lexical = LexicalSearcher::new(self.corpus.clone(), scorer);
        self
    }

    /// Open the configured SQLite corpus and build collaborators from config.
    pub fn from_config(config: &QuarryConfig) -> QuarryResult<Self> {
        config.validate()?;
        let store = SqliteCorpusStore::open(&config.storage.db_path)?;
        let embedder = create_provider(&config.embedding)?;
        let reranker = create_reranker(&config.embedding)?;
        info!(
            db = %config.storage.db_path.display(),
            embedder = embedder.name(),
            reranker = reranker.name(),
            "retrieval engine ready"
        );
        Self::new(
            SharedCorpus::new(store),
            embedder,
            reranker,
            config.retrieval.clone(),
        )
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn corpus(&self) -> &SharedCorpus {
        &self.corpus
    }

    pub fn enhancer(&self) -> &QueryEnhancer {
        &self.enhancer
    }

    /// Ranked results for `query`, at most `top_k`.
    pub fn search(
        &self,
        query: &str,
        top_k: usize,
        mode: SearchMode,
    ) -> QuarryResult<Vec<SearchResult>> {
        Ok(self
            .search_detailed(&SearchRequest::new(query, top_k, mode))?
            .results)
    }

    /// Like [`search`](Self::search) with the mode given by name.
    pub fn search_named(
        &self,
        query: &str,
        top_k: usize,
        mode: &str,
    ) -> QuarryResult<Vec<SearchResult>> {
        let request = SearchRequest::parse(query, top_k, mode)?;
        Ok(self.search_detailed(&request)?.results)
    }

    /// Search with the mode and result count implied by an answer verbosity.
    pub fn search_for_response(
        &self,
        query: &str,
        response: ResponseMode,
    ) -> QuarryResult<Vec<SearchResult>> {
        self.search(query, response.num_docs(), response.search_mode())
    }

    /// Results together with the query plan and any dropped branches.
    pub fn search_detailed(&self, request: &SearchRequest) -> QuarryResult<SearchResponse> {
        request.validate()?;
        let span = crate::retrieval_span!(request.mode, request.top_k);
        let _entered = span.enter();
        let started = Instant::now();

        let query = request.query.trim();
        let run = match request.mode {
            SearchMode::Fast => self.run_fast(query, request.top_k)?,
            SearchMode::Standard => self.run_standard(query, request.top_k)?,
            SearchMode::Thorough => self.run_thorough(query, request.top_k)?,
        };

        let results: Vec<SearchResult> = run
            .candidates
            .iter()
            .take(request.top_k)
            .map(SearchResult::from)
            .collect();
        let elapsed_ms = started.elapsed().as_millis() as u64;
        info!(
            mode = %request.mode,
            results = results.len(),
            dropped_branches = run.diagnostics.len(),
            elapsed_ms,
            "search complete"
        );
        Ok(SearchResponse {
            results,
            plan: run.plan,
            diagnostics: run.diagnostics,
            elapsed_ms,
        })
    }

    /// Run one sub-search. Called from fan-out workers.
    pub(crate) fn probe(&self, probe: Probe) -> QuarryResult<Vec<ScoredCandidate>> {
        match probe.signal {
            Signal::Dense => self.dense.search(&probe.text, probe.k),
            Signal::Lexical => self.lexical.search(&probe.text, probe.k),
        }
    }
}

impl std::fmt::Debug for RetrievalEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrievalEngine")
            .field("embedder", &self.embedder.name())
            .field("reranker", &self.reranker.name())
            .field("lexical", &self.lexical.scorer_name())
            .field("executor", &self.executor)
            .finish_non_exhaustive()
    }
}
