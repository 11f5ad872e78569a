//! Cross-encoder reranking via fastembed.

use std::sync::Mutex;

use fastembed::{RerankInitOptions, RerankerModel, TextRerank};
use tracing::debug;

use quarry_core::errors::{QuarryResult, ScorerError};
use quarry_core::traits::IReranker;

const MODEL_NAME: &str = "bge-reranker-base";

pub struct FastembedReranker {
    model: Mutex<TextRerank>,
}

impl FastembedReranker {
    pub fn try_new() -> QuarryResult<Self> {
        let model = TextRerank::try_new(RerankInitOptions::new(RerankerModel::BGERerankerBase))
            .map_err(|e| ScorerError::ModelLoadFailed {
                model: MODEL_NAME.to_string(),
                reason: e.to_string(),
            })?;
        debug!(model = MODEL_NAME, "loaded reranker model");
        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

impl IReranker for FastembedReranker {
    /// fastembed returns results sorted by score; they are put back in input order.
    fn score_pairs(&self, query: &str, texts: &[String]) -> QuarryResult<Vec<f32>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let mut model = self.model.lock().map_err(|_| ScorerError::RerankFailed {
            reason: "reranker model lock poisoned".to_string(),
        })?;
        let results = model
            .rerank(query.to_string(), texts.to_vec(), false, None)
            .map_err(|e| ScorerError::RerankFailed {
                reason: e.to_string(),
            })?;
        if results.len() != texts.len() {
            return Err(ScorerError::BatchSizeMismatch {
                scorer: MODEL_NAME.to_string(),
                expected: texts.len(),
                actual: results.len(),
            }
            .into());
        }

        let mut scores = vec![0.0f32; texts.len()];
        for result in results {
            if let Some(slot) = scores.get_mut(result.index) {
                *slot = result.score;
            }
        }
        Ok(scores)
    }

    fn name(&self) -> &str {
        MODEL_NAME
    }
}
