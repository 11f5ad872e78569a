//! Query-vector cache in front of any embedding provider.
//!
//! Thorough mode embeds several variants per request and the diversity filter
//! re-embeds candidate texts, so the same strings reach the provider often.
//! Entries are keyed by the blake3 hash of the text.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use tracing::trace;

use quarry_core::errors::{QuarryResult, ScorerError};
use quarry_core::traits::IEmbeddingProvider;

pub struct CachedEmbedder {
    inner: Arc<dyn IEmbeddingProvider>,
    cache: Cache<String, Vec<f32>>,
}

impl CachedEmbedder {
    pub fn new(inner: Arc<dyn IEmbeddingProvider>, max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .time_to_live(Duration::from_secs(86400))
            .build();
        Self { inner, cache }
    }

    fn key(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

impl IEmbeddingProvider for CachedEmbedder {
    fn embed(&self, text: &str) -> QuarryResult<Vec<f32>> {
        let key = Self::key(text);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }
        let vector = self.inner.embed(text)?;
        self.cache.insert(key, vector.clone());
        Ok(vector)
    }

    /// Misses are embedded in one inner batch call.
    fn embed_batch(&self, texts: &[String]) -> QuarryResult<Vec<Vec<f32>>> {
        let keys: Vec<String> = texts.iter().map(|t| Self::key(t)).collect();
        let mut out: Vec<Option<Vec<f32>>> = keys.iter().map(|k| self.cache.get(k)).collect();

        let missing: Vec<usize> = out
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_none())
            .map(|(i, _)| i)
            .collect();
        trace!(
            batch = texts.len(),
            misses = missing.len(),
            "embedding cache lookup"
        );

        if !missing.is_empty() {
            let miss_texts: Vec<String> = missing.iter().map(|&i| texts[i].clone()).collect();
            let fresh = self.inner.embed_batch(&miss_texts)?;
            if fresh.len() != miss_texts.len() {
                return Err(ScorerError::BatchSizeMismatch {
                    scorer: self.inner.name().to_string(),
                    expected: miss_texts.len(),
                    actual: fresh.len(),
                }
                .into());
            }
            for (&i, vector) in missing.iter().zip(fresh) {
                self.cache.insert(keys[i].clone(), vector.clone());
                out[i] = Some(vector);
            }
        }

        Ok(out.into_iter().flatten().collect())
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
