use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{ConfigError, QuarryResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingProviderKind {
    /// Deterministic hashed term vectors. No model download.
    #[default]
    Hashing,
    /// ONNX sentence embedding model via fastembed.
    Fastembed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RerankerKind {
    /// Deterministic query-term coverage.
    #[default]
    Overlap,
    /// ONNX cross-encoder via fastembed.
    Fastembed,
}

/// Embedding and reranking collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProviderKind,
    /// Must match the dimensionality of the stored corpus vectors.
    pub dimensions: usize,
    /// Entries in the query embedding cache. 0 disables caching.
    pub query_cache_size: u64,
    pub reranker: RerankerKind,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderKind::default(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            query_cache_size: defaults::DEFAULT_QUERY_CACHE_SIZE,
            reranker: RerankerKind::default(),
        }
    }
}

impl EmbeddingConfig {
    pub fn validate(&self) -> QuarryResult<()> {
        if self.dimensions == 0 {
            return Err(ConfigError::OutOfRange {
                field: "dimensions".to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
