//! BM25+ lexical scoring.
//!
//! `score(d, q) = Σ_t idf(t) · (δ + tf·(k1+1) / (k1·(1 − b + b·|d|/avgdl) + tf))`
//! with `idf(t) = ln((N+1)/df(t))`. Terms absent from the corpus contribute
//! nothing. The index is rebuilt from the tokenized corpus on every call.

use std::collections::HashMap;

use quarry_core::constants::{BM25_B, BM25_DELTA, BM25_K1};
use quarry_core::errors::QuarryResult;
use quarry_core::traits::ILexicalScorer;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Plus {
    pub k1: f64,
    pub b: f64,
    pub delta: f64,
}

impl Default for Bm25Plus {
    fn default() -> Self {
        Self {
            k1: BM25_K1,
            b: BM25_B,
            delta: BM25_DELTA,
        }
    }
}

impl ILexicalScorer for Bm25Plus {
    fn score(&self, query: &[String], corpus: &[Vec<String>]) -> QuarryResult<Vec<f64>> {
        let n = corpus.len();
        if n == 0 {
            return Ok(Vec::new());
        }

        let term_freqs: Vec<HashMap<&str, f64>> = corpus
            .iter()
            .map(|doc| {
                let mut tf: HashMap<&str, f64> = HashMap::new();
                for term in doc {
                    *tf.entry(term.as_str()).or_default() += 1.0;
                }
                tf
            })
            .collect();

        let mut df: HashMap<&str, usize> = HashMap::new();
        for tf in &term_freqs {
            for term in tf.keys() {
                *df.entry(*term).or_default() += 1;
            }
        }

        let total_len: usize = corpus.iter().map(Vec::len).sum();
        let avgdl = if total_len == 0 {
            1.0
        } else {
            total_len as f64 / n as f64
        };

        let idf: Vec<f64> = query
            .iter()
            .map(|t| match df.get(t.as_str()) {
                Some(&d) => ((n as f64 + 1.0) / d as f64).ln(),
                None => 0.0,
            })
            .collect();

        Ok(corpus
            .iter()
            .zip(&term_freqs)
            .map(|(doc, tf)| {
                let norm = self.k1 * (1.0 - self.b + self.b * doc.len() as f64 / avgdl);
                query
                    .iter()
                    .zip(&idf)
                    .map(|(term, &idf)| {
                        let f = tf.get(term.as_str()).copied().unwrap_or(0.0);
                        idf * (self.delta + f * (self.k1 + 1.0) / (norm + f))
                    })
                    .sum()
            })
            .collect())
    }

    fn name(&self) -> &str {
        "bm25plus"
    }
}
