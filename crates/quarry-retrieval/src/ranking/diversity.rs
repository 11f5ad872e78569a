//! Greedy near-duplicate suppression.

use tracing::debug;

use quarry_core::errors::{QuarryResult, ScorerError};
use quarry_core::models::ScoredCandidate;
use quarry_core::similarity::cosine_similarity;
use quarry_core::traits::IEmbeddingProvider;

/// Walk `candidates` in rank order and keep each one whose similarity to every
/// already-kept candidate is below `threshold`. The first candidate is always
/// kept. Stops at `max_results`.
pub fn filter(
    candidates: Vec<ScoredCandidate>,
    threshold: f64,
    max_results: usize,
    embedder: &dyn IEmbeddingProvider,
) -> QuarryResult<Vec<ScoredCandidate>> {
    filter_by(candidates, ScoredCandidate::text, threshold, max_results, embedder)
}

/// [`filter`] over any ranked items, compared by the text `text_of` returns.
pub fn filter_by<T>(
    items: Vec<T>,
    text_of: impl Fn(&T) -> &str,
    threshold: f64,
    max_results: usize,
    embedder: &dyn IEmbeddingProvider,
) -> QuarryResult<Vec<T>> {
    if items.len() <= 1 || max_results <= 1 {
        let mut out = items;
        out.truncate(max_results);
        return Ok(out);
    }

    let texts: Vec<String> = items.iter().map(|item| text_of(item).to_string()).collect();
    let vectors = embedder.embed_batch(&texts)?;
    if vectors.len() != texts.len() {
        return Err(ScorerError::BatchSizeMismatch {
            scorer: embedder.name().to_string(),
            expected: texts.len(),
            actual: vectors.len(),
        }
        .into());
    }

    let mut kept: Vec<usize> = vec![0];
    for i in 1..items.len() {
        if kept.len() >= max_results {
            break;
        }
        let distinct = kept
            .iter()
            .all(|&j| cosine_similarity(&vectors[i], &vectors[j]) < threshold);
        if distinct {
            kept.push(i);
        }
    }

    debug!(
        inputs = items.len(),
        kept = kept.len(),
        threshold,
        "diversity filter"
    );
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    Ok(kept.into_iter().filter_map(|i| slots[i].take()).collect())
}
