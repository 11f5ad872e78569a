//! Keyword search over the whole corpus.

use std::sync::Arc;

use tracing::debug;

use quarry_core::errors::{QuarryResult, ScorerError};
use quarry_core::models::ScoredCandidate;
use quarry_core::traits::ILexicalScorer;
use quarry_storage::SharedCorpus;

use super::by_score_desc;

/// Lowercase and split on anything that is not a letter or digit.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Scores every chunk with an [`ILexicalScorer`] and keeps the top `k`.
#[derive(Clone)]
pub struct LexicalSearcher {
    corpus: SharedCorpus,
    scorer: Arc<dyn ILexicalScorer>,
}

impl LexicalSearcher {
    pub fn new(corpus: SharedCorpus, scorer: Arc<dyn ILexicalScorer>) -> Self {
        Self { corpus, scorer }
    }

    pub fn search(&self, query: &str, k: usize) -> QuarryResult<Vec<ScoredCandidate>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        let chunks = self.corpus.fetch_all_chunks()?;
        if chunks.is_empty() {
            return Ok(Vec::new());
        }

        let tokenized: Vec<Vec<String>> = chunks.iter().map(|c| tokenize(&c.text)).collect();
        let scores = self.scorer.score(&tokenize(query), &tokenized)?;
        if scores.len() != chunks.len() {
            return Err(ScorerError::BatchSizeMismatch {
                scorer: self.scorer.name().to_string(),
                expected: chunks.len(),
                actual: scores.len(),
            }
            .into());
        }

        let mut ranked: Vec<(usize, f64)> = scores.into_iter().enumerate().collect();
        ranked.sort_by(|a, b| by_score_desc(a.1, b.1));
        ranked.truncate(k);

        let mut chunks: Vec<Option<_>> = chunks.into_iter().map(Some).collect();
        let results: Vec<ScoredCandidate> = ranked
            .into_iter()
            .filter_map(|(i, score)| {
                chunks[i]
                    .take()
                    .map(|chunk| ScoredCandidate::lexical(Arc::new(chunk), score))
            })
            .collect();
        debug!(scorer = self.scorer.name(), k, hits = results.len(), "lexical search");
        Ok(results)
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }
}
