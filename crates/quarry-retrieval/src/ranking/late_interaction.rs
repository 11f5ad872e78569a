//! Sentence-level rescoring.
//!
//! A candidate scores as its best-matching sentence, so one relevant sentence
//! is not diluted by unrelated text around it. All sentences of all
//! candidates are embedded in a single batch call.

use tracing::debug;

use quarry_core::errors::{QuarryResult, ScorerError};
use quarry_core::models::ScoredCandidate;
use quarry_core::similarity::cosine_similarity;
use quarry_core::traits::IEmbeddingProvider;

use super::sentences::split_sentences;
use crate::search::by_score_desc;

/// Rescore `candidates` against `query_vector`, keep the best `k`.
///
/// Candidates without any sentence of `min_sentence_chars` score 0.0 and sort
/// after every candidate that has sentences. Equal scores keep input order.
pub fn rescore(
    query_vector: &[f32],
    candidates: Vec<ScoredCandidate>,
    k: usize,
    min_sentence_chars: usize,
    embedder: &dyn IEmbeddingProvider,
) -> QuarryResult<Vec<ScoredCandidate>> {
    if candidates.is_empty() || k == 0 {
        return Ok(Vec::new());
    }

    let mut owners = Vec::new();
    let mut sentences = Vec::new();
    for (i, candidate) in candidates.iter().enumerate() {
        for sentence in split_sentences(candidate.text(), min_sentence_chars) {
            owners.push(i);
            sentences.push(sentence.to_string());
        }
    }

    let vectors = if sentences.is_empty() {
        Vec::new()
    } else {
        embedder.embed_batch(&sentences)?
    };
    if vectors.len() != sentences.len() {
        return Err(ScorerError::BatchSizeMismatch {
            scorer: embedder.name().to_string(),
            expected: sentences.len(),
            actual: vectors.len(),
        }
        .into());
    }

    let mut best: Vec<Option<f64>> = vec![None; candidates.len()];
    for (&owner, vector) in owners.iter().zip(&vectors) {
        let sim = cosine_similarity(query_vector, vector);
        best[owner] = Some(best[owner].map_or(sim, |b| b.max(sim)));
    }

    let mut scored: Vec<(ScoredCandidate, bool, f64)> = candidates
        .into_iter()
        .zip(best)
        .map(|(c, b)| (c, b.is_some(), b.unwrap_or(0.0)))
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1).then(by_score_desc(a.2, b.2)));
    scored.truncate(k);

    debug!(
        sentences = sentences.len(),
        kept = scored.len(),
        "late interaction rescored"
    );
    Ok(scored
        .into_iter()
        .map(|(mut c, _, score)| {
            c.scores.multi_vector = Some(score);
            c
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use quarry_core::models::Chunk;
    use quarry_embeddings::HashingEmbedder;

    use super::*;

    fn cand(id: i64, text: &str) -> ScoredCandidate {
        ScoredCandidate::new(Arc::new(Chunk::new(id, "s", text)))
    }

    struct BatchCounter {
        inner: HashingEmbedder,
        calls: AtomicUsize,
    }

    impl IEmbeddingProvider for BatchCounter {
        fn embed(&self, text: &str) -> QuarryResult<Vec<f32>> {
            self.inner.embed(text)
        }
        fn embed_batch(&self, texts: &[String]) -> QuarryResult<Vec<Vec<f32>>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.embed_batch(texts)
        }
        fn dimensions(&self) -> usize {
            self.inner.dimensions()
        }
        fn name(&self) -> &str {
            "batch-counter"
        }
    }

    #[test]
    fn best_sentence_wins_and_one_batch_call() {
        let embedder = BatchCounter {
            inner: HashingEmbedder::new(256),
            calls: AtomicUsize::new(0),
        };
        let query = embedder.embed("sourdough starter feeding").unwrap();
        let out = rescore(
            &query,
            vec![
                cand(1, "Compilers translate source code. They also optimize loops."),
                cand(2, "Unrelated filler sentence here. Feed the sourdough starter daily."),
            ],
            10,
            10,
            &embedder,
        )
        .unwrap();
        assert_eq!(out[0].id(), 2);
        assert!(out[0].scores.multi_vector.unwrap() > out[1].scores.multi_vector.unwrap());
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn sentenceless_candidates_score_zero_and_sort_last() {
        let embedder = HashingEmbedder::new(64);
        let query = embedder.embed("rust").unwrap();
        let out = rescore(
            &query,
            vec![cand(1, "Ok."), cand(2, "Completely unrelated words about baking.")],
            10,
            10,
            &embedder,
        )
        .unwrap();
        assert_eq!(out[1].id(), 1);
        assert_eq!(out[1].scores.multi_vector, Some(0.0));
    }

    #[test]
    fn truncates_to_k() {
        let embedder = HashingEmbedder::new(64);
        let query = embedder.embed("alpha").unwrap();
        let candidates = (0..5).map(|i| cand(i, "alpha beta gamma delta.")).collect();
        let out = rescore(&query, candidates, 2, 10, &embedder).unwrap();
        assert_eq!(out.iter().map(|c| c.id()).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn empty_input_is_empty() {
        let embedder = HashingEmbedder::new(8);
        assert!(rescore(&[0.0; 8], Vec::new(), 5, 10, &embedder).unwrap().is_empty());
    }
}
