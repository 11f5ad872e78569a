use serde::{Deserialize, Serialize};

use super::candidate::{ScoredCandidate, StageScores};
use super::chunk::ChunkId;
use super::diagnostic::Diagnostic;
use super::query_plan::QueryPlan;
use super::search_mode::SearchMode;
use crate::errors::{QuarryError, QuarryResult};

/// A validated `search` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub top_k: usize,
    pub mode: SearchMode,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, top_k: usize, mode: SearchMode) -> Self {
        Self {
            query: query.into(),
            top_k,
            mode,
        }
    }

    /// Build a request from an untyped mode name, rejecting unknown modes.
    pub fn parse(query: impl Into<String>, top_k: usize, mode: &str) -> QuarryResult<Self> {
        let request = Self::new(query, top_k, mode.parse()?);
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> QuarryResult<()> {
        if self.query.trim().is_empty() {
            return Err(QuarryError::invalid_argument("query must not be empty"));
        }
        if self.top_k < 1 {
            return Err(QuarryError::invalid_argument(format!(
                "top_k must be at least 1, got {}",
                self.top_k
            )));
        }
        Ok(())
    }
}

/// One returned passage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub chunk_id: ChunkId,
    pub source: String,
    pub text: String,
    pub metadata: serde_json::Value,
    /// Score of the last stage this passage went through.
    pub score: f64,
    pub stage_scores: StageScores,
}

impl From<&ScoredCandidate> for SearchResult {
    fn from(candidate: &ScoredCandidate) -> Self {
        Self {
            chunk_id: candidate.chunk.id,
            source: candidate.chunk.source.clone(),
            text: candidate.chunk.text.clone(),
            metadata: candidate.chunk.metadata.clone(),
            score: candidate.final_score(),
            stage_scores: candidate.scores,
        }
    }
}

/// Full outcome of a search, including the plan and any dropped branches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub plan: QueryPlan,
    pub diagnostics: Vec<Diagnostic>,
    pub elapsed_ms: u64,
}
