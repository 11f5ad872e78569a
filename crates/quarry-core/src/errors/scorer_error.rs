/// Errors raised by the embedding, lexical, and pairwise scoring collaborators.
#[derive(Debug, thiserror::Error)]
pub enum ScorerError {
    #[error("embedding failed: {reason}")]
    EmbeddingFailed { reason: String },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("lexical scoring failed: {reason}")]
    LexicalFailed { reason: String },

    #[error("rerank failed: {reason}")]
    RerankFailed { reason: String },

    #[error("{scorer} returned {actual} scores for {expected} inputs")]
    BatchSizeMismatch {
        scorer: String,
        expected: usize,
        actual: usize,
    },

    #[error("failed to load model {model}: {reason}")]
    ModelLoadFailed { model: String, reason: String },
}
