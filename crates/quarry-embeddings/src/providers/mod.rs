//! Embedding providers and the factory that picks one from config.

pub mod hashing;

#[cfg(feature = "fastembed")]
pub mod fastembed_provider;

use std::sync::Arc;

use tracing::info;

use quarry_core::config::{EmbeddingConfig, EmbeddingProviderKind};
use quarry_core::errors::QuarryResult;
use quarry_core::traits::IEmbeddingProvider;

pub use hashing::HashingEmbedder;

use crate::cache::CachedEmbedder;

/// Build the configured provider, wrapped in a query cache unless the cache
/// size is zero.
pub fn create_provider(config: &EmbeddingConfig) -> QuarryResult<Arc<dyn IEmbeddingProvider>> {
    let base: Arc<dyn IEmbeddingProvider> = match config.provider {
        EmbeddingProviderKind::Hashing => Arc::new(HashingEmbedder::new(config.dimensions)),
        EmbeddingProviderKind::Fastembed => fastembed_backend(config)?,
    };
    info!(
        provider = base.name(),
        dimensions = base.dimensions(),
        cache = config.query_cache_size,
        "embedding provider ready"
    );
    if config.query_cache_size == 0 {
        return Ok(base);
    }
    Ok(Arc::new(CachedEmbedder::new(base, config.query_cache_size)))
}

#[cfg(feature = "fastembed")]
fn fastembed_backend(config: &EmbeddingConfig) -> QuarryResult<Arc<dyn IEmbeddingProvider>> {
    let provider = fastembed_provider::FastembedProvider::try_new()?;
    if provider.dimensions() != config.dimensions {
        return Err(quarry_core::errors::ScorerError::DimensionMismatch {
            expected: config.dimensions,
            actual: provider.dimensions(),
        }
        .into());
    }
    Ok(Arc::new(provider))
}

#[cfg(not(feature = "fastembed"))]
fn fastembed_backend(_config: &EmbeddingConfig) -> QuarryResult<Arc<dyn IEmbeddingProvider>> {
    Err(quarry_core::errors::ScorerError::ModelLoadFailed {
        model: "fastembed".to_string(),
        reason: "built without the `fastembed` feature".to_string(),
    }
    .into())
}
