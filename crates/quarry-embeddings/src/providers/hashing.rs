//! Hashed term-frequency embeddings.
//!
//! Terms are hashed into fixed buckets and weighted by frequency, with longer
//! terms weighted up. Deterministic and dependency-free; cosine similarity
//! between two vectors tracks their shared vocabulary.

use std::collections::HashMap;

use quarry_core::errors::QuarryResult;
use quarry_core::traits::IEmbeddingProvider;

use crate::text::{bucket, terms};

pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let tokens = terms(text);
        let mut vec = vec![0.0f32; self.dimensions];
        if tokens.is_empty() {
            return vec;
        }

        let mut tf: HashMap<&str, f32> = HashMap::new();
        for tok in &tokens {
            *tf.entry(tok.as_str()).or_default() += 1.0;
        }

        let total = tokens.len() as f32;
        for (term, count) in tf {
            let weight = 1.0 + (term.chars().count() as f32).ln();
            vec[bucket(term, self.dimensions)] += (count / total) * weight;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl IEmbeddingProvider for HashingEmbedder {
    fn embed(&self, text: &str) -> QuarryResult<Vec<f32>> {
        Ok(self.vector(text))
    }

    fn embed_batch(&self, texts: &[String]) -> QuarryResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashing"
    }
}
