//! Deterministic lexical-coverage reranker.
//!
//! Scores each passage by the share of distinct query terms it contains, plus
//! a smaller bonus for query bigrams it contains in order. Scores lie in
//! `[0, 1.5]`. Used when no cross-encoder model is configured and in tests.

use std::collections::HashSet;

use quarry_core::errors::QuarryResult;
use quarry_core::traits::IReranker;

use crate::text::terms;

const BIGRAM_WEIGHT: f32 = 0.5;

#[derive(Debug, Default, Clone, Copy)]
pub struct OverlapReranker;

impl OverlapReranker {
    pub fn new() -> Self {
        Self
    }

    fn score(query_terms: &HashSet<String>, query_bigrams: &HashSet<(String, String)>, text: &str) -> f32 {
        if query_terms.is_empty() {
            return 0.0;
        }
        let passage = terms(text);
        let present: HashSet<&str> = passage.iter().map(String::as_str).collect();
        let covered = query_terms.iter().filter(|t| present.contains(t.as_str())).count();
        let mut score = covered as f32 / query_terms.len() as f32;

        if !query_bigrams.is_empty() {
            let passage_bigrams: HashSet<(&str, &str)> = passage
                .windows(2)
                .map(|w| (w[0].as_str(), w[1].as_str()))
                .collect();
            let matched = query_bigrams
                .iter()
                .filter(|(a, b)| passage_bigrams.contains(&(a.as_str(), b.as_str())))
                .count();
            score += BIGRAM_WEIGHT * matched as f32 / query_bigrams.len() as f32;
        }
        score
    }
}

impl IReranker for OverlapReranker {
    fn score_pairs(&self, query: &str, texts: &[String]) -> QuarryResult<Vec<f32>> {
        let q = terms(query);
        let query_bigrams: HashSet<(String, String)> = q
            .windows(2)
            .map(|w| (w[0].clone(), w[1].clone()))
            .collect();
        let query_terms: HashSet<String> = q.into_iter().collect();
        Ok(texts
            .iter()
            .map(|t| Self::score(&query_terms, &query_bigrams, t))
            .collect())
    }

    fn name(&self) -> &str {
        "overlap"
    }
}
