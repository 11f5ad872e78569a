//! Pairwise rerankers and the factory that picks one from config.

pub mod overlap;

#[cfg(feature = "fastembed")]
pub mod fastembed_reranker;

use std::sync::Arc;

use quarry_core::config::{EmbeddingConfig, RerankerKind};
use quarry_core::errors::QuarryResult;
use quarry_core::traits::IReranker;

pub use overlap::OverlapReranker;

pub fn create_reranker(config: &EmbeddingConfig) -> QuarryResult<Arc<dyn IReranker>> {
    match config.reranker {
        RerankerKind::Overlap => Ok(Arc::new(OverlapReranker::new())),
        RerankerKind::Fastembed => fastembed_backend(),
    }
}

#[cfg(feature = "fastembed")]
fn fastembed_backend() -> QuarryResult<Arc<dyn IReranker>> {
    Ok(Arc::new(fastembed_reranker::FastembedReranker::try_new()?))
}

#[cfg(not(feature = "fastembed"))]
fn fastembed_backend() -> QuarryResult<Arc<dyn IReranker>> {
    Err(quarry_core::errors::ScorerError::ModelLoadFailed {
        model: "fastembed-reranker".to_string(),
        reason: "built without the `fastembed` feature".to_string(),
    }
    .into())
}
