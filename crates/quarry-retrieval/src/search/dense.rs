//! Embedding-similarity search on one channel.

use std::sync::Arc;

use tracing::{debug, warn};

use quarry_core::errors::QuarryResult;
use quarry_core::models::{EmbeddingChannel, ScoredCandidate};
use quarry_core::similarity::cosine_similarity;
use quarry_core::traits::IEmbeddingProvider;
use quarry_storage::SharedCorpus;

use super::by_score_desc;

/// Brute-force cosine ranking over every stored vector of a channel.
#[derive(Clone)]
pub struct DenseSearcher {
    corpus: SharedCorpus,
    embedder: Arc<dyn IEmbeddingProvider>,
    channel: EmbeddingChannel,
}

impl DenseSearcher {
    pub fn new(
        corpus: SharedCorpus,
        embedder: Arc<dyn IEmbeddingProvider>,
        channel: EmbeddingChannel,
    ) -> Self {
        Self {
            corpus,
            embedder,
            channel,
        }
    }

    pub fn channel(&self) -> &EmbeddingChannel {
        &self.channel
    }

    pub fn search(&self, query: &str, k: usize) -> QuarryResult<Vec<ScoredCandidate>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        let query_vector = self.embedder.embed(query)?;
        self.search_by_vector(&query_vector, k)
    }

    /// Rank against an already embedded query. Records whose dimensionality
    /// differs from the query's are skipped.
    pub fn search_by_vector(&self, query: &[f32], k: usize) -> QuarryResult<Vec<ScoredCandidate>> {
        let rows = self.corpus.fetch_embeddings(&self.channel)?;

        let mut skipped = 0usize;
        let mut scored: Vec<(usize, f64)> = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            if row.vector.len() != query.len() {
                skipped += 1;
                continue;
            }
            scored.push((i, cosine_similarity(query, &row.vector)));
        }
        if skipped > 0 {
            warn!(
                channel = %self.channel,
                skipped,
                expected = query.len(),
                "skipped embeddings with mismatched dimensions"
            );
        }

        scored.sort_by(|a, b| by_score_desc(a.1, b.1));
        scored.truncate(k);

        let mut rows: Vec<Option<_>> = rows.into_iter().map(Some).collect();
        let results: Vec<ScoredCandidate> = scored
            .into_iter()
            .filter_map(|(i, sim)| {
                rows[i]
                    .take()
                    .map(|row| ScoredCandidate::dense(Arc::new(row.chunk), sim))
            })
            .collect();
        debug!(channel = %self.channel, k, hits = results.len(), "dense search");
        Ok(results)
    }
}
