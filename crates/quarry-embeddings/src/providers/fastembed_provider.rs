//! Sentence embeddings from a local ONNX model via fastembed.

use std::sync::Mutex;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::debug;

use quarry_core::errors::{QuarryResult, ScorerError};
use quarry_core::traits::IEmbeddingProvider;

const MODEL_NAME: &str = "all-MiniLM-L6-v2";
const DIMENSIONS: usize = 384;

/// `TextEmbedding::embed` needs `&mut self`, so the model sits behind a mutex.
pub struct FastembedProvider {
    model: Mutex<TextEmbedding>,
}

impl FastembedProvider {
    pub fn try_new() -> QuarryResult<Self> {
        let model = TextEmbedding::try_new(InitOptions::new(EmbeddingModel::AllMiniLML6V2))
            .map_err(|e| ScorerError::ModelLoadFailed {
                model: MODEL_NAME.to_string(),
                reason: e.to_string(),
            })?;
        debug!(model = MODEL_NAME, "loaded embedding model");
        Ok(Self {
            model: Mutex::new(model),
        })
    }

    fn run(&self, texts: Vec<String>) -> QuarryResult<Vec<Vec<f32>>> {
        let expected = texts.len();
        let mut model = self.model.lock().map_err(|_| ScorerError::EmbeddingFailed {
            reason: "embedding model lock poisoned".to_string(),
        })?;
        let vectors = model
            .embed(texts, None)
            .map_err(|e| ScorerError::EmbeddingFailed {
                reason: e.to_string(),
            })?;
        if vectors.len() != expected {
            return Err(ScorerError::BatchSizeMismatch {
                scorer: MODEL_NAME.to_string(),
                expected,
                actual: vectors.len(),
            }
            .into());
        }
        Ok(vectors)
    }
}

impl IEmbeddingProvider for FastembedProvider {
    fn embed(&self, text: &str) -> QuarryResult<Vec<f32>> {
        let mut vectors = self.run(vec![text.to_string()])?;
        vectors.pop().ok_or_else(|| {
            ScorerError::EmbeddingFailed {
                reason: "model returned no vector".to_string(),
            }
            .into()
        })
    }

    fn embed_batch(&self, texts: &[String]) -> QuarryResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.run(texts.to_vec())
    }

    fn dimensions(&self) -> usize {
        DIMENSIONS
    }

    fn name(&self) -> &str {
        MODEL_NAME
    }
}
