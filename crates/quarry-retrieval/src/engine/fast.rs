use quarry_core::errors::QuarryResult;
use quarry_core::models::{QueryPlan, SearchMode};

use super::{PipelineRun, RetrievalEngine};
use crate::observability::spans::stages;

impl RetrievalEngine {
    /// One dense lookup, no fusion or rerank. Its failure is the search's failure.
    pub(super) fn run_fast(&self, query: &str, top_k: usize) -> QuarryResult<PipelineRun> {
        let _stage = crate::stage_span!(stages::DENSE, 1).entered();
        let candidates = self.dense.search(query, top_k)?;
        Ok(PipelineRun {
            candidates,
            plan: QueryPlan::single(query, SearchMode::Fast),
            diagnostics: Vec::new(),
        })
    }
}
