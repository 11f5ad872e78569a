mod config_error;
mod retrieval_error;
mod scorer_error;
mod storage_error;

pub use config_error::ConfigError;
pub use retrieval_error::RetrievalError;
pub use scorer_error::ScorerError;
pub use storage_error::StorageError;

/// Result alias used across every Quarry crate.
pub type QuarryResult<T> = Result<T, QuarryError>;

/// Top-level error for the retrieval pipeline.
///
/// `CorpusUnavailable` and `ScorerFailure` are local to one fan-out branch and
/// are recovered at the join point. `InvalidArgument` is raised before any stage
/// runs. An empty corpus is not an error.
#[derive(Debug, thiserror::Error)]
pub enum QuarryError {
    #[error("corpus unavailable: {0}")]
    CorpusUnavailable(#[from] StorageError),

    #[error("scorer failure: {0}")]
    ScorerFailure(#[from] ScorerError),

    #[error("retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl QuarryError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}
