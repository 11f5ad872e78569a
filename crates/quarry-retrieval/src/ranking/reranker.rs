//! Pairwise rerank adapter.

use tracing::debug;

use quarry_core::errors::{QuarryResult, ScorerError};
use quarry_core::models::ScoredCandidate;
use quarry_core::traits::IReranker;

use crate::search::by_score_desc;

/// Score every (query, text) pair in one call, sort descending (stable), keep
/// `top_k`, and stamp `rerank`.
pub fn rerank(
    reranker: &dyn IReranker,
    query: &str,
    candidates: Vec<ScoredCandidate>,
    top_k: usize,
) -> QuarryResult<Vec<ScoredCandidate>> {
    if candidates.is_empty() {
        return Ok(Vec::new());
    }
    let texts: Vec<String> = candidates.iter().map(|c| c.text().to_string()).collect();
    let scores = reranker.score_pairs(query, &texts)?;
    if scores.len() != texts.len() {
        return Err(ScorerError::BatchSizeMismatch {
            scorer: reranker.name().to_string(),
            expected: texts.len(),
            actual: scores.len(),
        }
        .into());
    }

    let mut ranked: Vec<(ScoredCandidate, f64)> = candidates
        .into_iter()
        .zip(scores.into_iter().map(f64::from))
        .collect();
    ranked.sort_by(|a, b| by_score_desc(a.1, b.1));
    ranked.truncate(top_k);
    debug!(reranker = reranker.name(), kept = ranked.len(), "reranked");

    Ok(ranked
        .into_iter()
        .map(|(mut c, score)| {
            c.scores.rerank = Some(score);
            c
        })
        .collect())
}
