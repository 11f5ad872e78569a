use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{ConfigError, QuarryResult};
use crate::models::{EmbeddingChannel, IdentityKey, ScoredCandidate};

/// How candidates from different branches are recognized as the same chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKey {
    /// Stable chunk id. Identical text in two sources stays two candidates.
    #[default]
    ChunkId,
    /// Exact chunk text. Identical text from different sources collapses into one.
    Text,
}

impl CandidateKey {
    pub fn of<'a>(&self, candidate: &'a ScoredCandidate) -> IdentityKey<'a> {
        match self {
            CandidateKey::ChunkId => IdentityKey::Id(candidate.id()),
            CandidateKey::Text => IdentityKey::Text(candidate.text()),
        }
    }
}

/// Pipeline tuning: fan-out widths, pool sizes, and thresholds per mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Width of the fan-out worker pool.
    pub worker_threads: usize,
    /// RRF smoothing constant.
    pub rrf_k: u32,
    /// Embedding channel used for dense search.
    pub dense_channel: EmbeddingChannel,
    pub candidate_key: CandidateKey,

    /// Standard mode: results per signal.
    pub standard_fanout_k: usize,
    /// Standard mode: fused candidates handed to the reranker.
    pub standard_rerank_pool: usize,

    /// Thorough mode: variants kept in the query plan.
    pub thorough_max_variants: usize,
    /// Thorough mode: leading variants that get searched.
    pub thorough_fanout_variants: usize,
    /// Thorough mode: results per (variant, signal) branch.
    pub thorough_fanout_k: usize,
    /// Thorough mode: unique candidates rescored by late interaction.
    pub late_interaction_pool: usize,
    pub late_interaction_keep: usize,
    pub rerank_keep: usize,
    /// Candidates at or above this similarity to a kept one are dropped.
    pub diversity_threshold: f64,
    /// Sentences shorter than this (after trimming) are ignored by late interaction.
    pub min_sentence_chars: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            worker_threads: defaults::DEFAULT_WORKER_THREADS,
            rrf_k: defaults::DEFAULT_RRF_K,
            dense_channel: EmbeddingChannel::new(defaults::DEFAULT_DENSE_CHANNEL),
            candidate_key: CandidateKey::default(),
            standard_fanout_k: defaults::DEFAULT_STANDARD_FANOUT_K,
            standard_rerank_pool: defaults::DEFAULT_STANDARD_RERANK_POOL,
            thorough_max_variants: defaults::DEFAULT_THOROUGH_MAX_VARIANTS,
            thorough_fanout_variants: defaults::DEFAULT_THOROUGH_FANOUT_VARIANTS,
            thorough_fanout_k: defaults::DEFAULT_THOROUGH_FANOUT_K,
            late_interaction_pool: defaults::DEFAULT_LATE_INTERACTION_POOL,
            late_interaction_keep: defaults::DEFAULT_LATE_INTERACTION_KEEP,
            rerank_keep: defaults::DEFAULT_RERANK_KEEP,
            diversity_threshold: defaults::DEFAULT_DIVERSITY_THRESHOLD,
            min_sentence_chars: defaults::DEFAULT_MIN_SENTENCE_CHARS,
        }
    }
}

impl RetrievalConfig {
    pub fn validate(&self) -> QuarryResult<()> {
        if self.worker_threads == 0 {
            return Err(out_of_range("worker_threads", "must be at least 1"));
        }
        if self.rrf_k == 0 {
            return Err(out_of_range("rrf_k", "must be positive"));
        }
        if !(self.diversity_threshold > 0.0 && self.diversity_threshold <= 1.0) {
            return Err(out_of_range(
                "diversity_threshold",
                format!("must be in (0, 1], got {}", self.diversity_threshold),
            ));
        }
        if self.thorough_max_variants == 0 || self.thorough_fanout_variants == 0 {
            return Err(out_of_range(
                "thorough_max_variants/thorough_fanout_variants",
                "must be at least 1",
            ));
        }
        for (field, value) in [
            ("standard_fanout_k", self.standard_fanout_k),
            ("standard_rerank_pool", self.standard_rerank_pool),
            ("thorough_fanout_k", self.thorough_fanout_k),
            ("late_interaction_pool", self.late_interaction_pool),
            ("late_interaction_keep", self.late_interaction_keep),
            ("rerank_keep", self.rerank_keep),
            ("min_sentence_chars", self.min_sentence_chars),
        ] {
            if value == 0 {
                return Err(out_of_range(field, "must be at least 1"));
            }
        }
        Ok(())
    }
}

fn out_of_range(field: &str, reason: impl Into<String>) -> crate::errors::QuarryError {
    ConfigError::OutOfRange {
        field: field.to_string(),
        reason: reason.into(),
    }
    .into()
}
