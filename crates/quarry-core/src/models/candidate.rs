use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::chunk::{Chunk, ChunkId};

/// Per-stage scores. A `None` means the candidate never reached that stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StageScores {
    pub lexical: Option<f64>,
    pub dense: Option<f64>,
    pub fusion: Option<f64>,
    pub multi_vector: Option<f64>,
    pub rerank: Option<f64>,
}

impl StageScores {
    /// Fill every missing score from `other`. Present scores are never overwritten.
    pub fn absorb(&mut self, other: &StageScores) {
        self.lexical = self.lexical.or(other.lexical);
        self.dense = self.dense.or(other.dense);
        self.fusion = self.fusion.or(other.fusion);
        self.multi_vector = self.multi_vector.or(other.multi_vector);
        self.rerank = self.rerank.or(other.rerank);
    }

    /// The score of the furthest stage reached.
    pub fn latest(&self) -> Option<f64> {
        self.rerank
            .or(self.multi_vector)
            .or(self.fusion)
            .or(self.dense)
            .or(self.lexical)
    }
}

/// A chunk moving through the pipeline together with the scores it has gathered.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub chunk: Arc<Chunk>,
    pub scores: StageScores,
}

impl ScoredCandidate {
    pub fn new(chunk: Arc<Chunk>) -> Self {
        Self {
            chunk,
            scores: StageScores::default(),
        }
    }

    pub fn lexical(chunk: Arc<Chunk>, score: f64) -> Self {
        let mut candidate = Self::new(chunk);
        candidate.scores.lexical = Some(score);
        candidate
    }

    pub fn dense(chunk: Arc<Chunk>, score: f64) -> Self {
        let mut candidate = Self::new(chunk);
        candidate.scores.dense = Some(score);
        candidate
    }

    pub fn id(&self) -> ChunkId {
        self.chunk.id
    }

    pub fn text(&self) -> &str {
        &self.chunk.text
    }

    /// Merge another sighting of the same chunk into this one.
    pub fn absorb(&mut self, other: &ScoredCandidate) {
        self.scores.absorb(&other.scores);
    }

    pub fn final_score(&self) -> f64 {
        self.scores.latest().unwrap_or(0.0)
    }
}

/// Key used to decide whether two candidates are the same chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityKey<'a> {
    Id(ChunkId),
    Text(&'a str),
}
