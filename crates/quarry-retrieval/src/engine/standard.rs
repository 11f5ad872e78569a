use tracing::debug;

use quarry_core::errors::QuarryResult;
use quarry_core::models::{QueryPlan, SearchMode};

use super::{PipelineRun, Probe, RetrievalEngine};
use crate::executor::Branch;
use crate::observability::spans::stages;
use crate::ranking::reranker::rerank;
use crate::search::rrf_fusion::fuse;
use crate::search::Signal;

impl RetrievalEngine {
    pub(super) fn run_standard(&self, query: &str, top_k: usize) -> QuarryResult<PipelineRun> {
        let cfg = &self.config;
        let branches = [Signal::Dense, Signal::Lexical]
            .into_iter()
            .map(|signal| {
                Branch::new(
                    signal.as_str(),
                    Probe::new(signal, query, cfg.standard_fanout_k),
                )
            })
            .collect::<Vec<_>>();

        let survivors = {
            let _stage = crate::stage_span!(stages::STANDARD_FANOUT, branches.len()).entered();
            self.executor
                .join_all(stages::STANDARD_FANOUT, branches, |p| self.probe(p))
                .into_survivors()?
        };

        let mut fused = {
            let _stage = crate::stage_span!(stages::FUSION, survivors.results.len()).entered();
            fuse(&survivors.results, cfg.rrf_k, cfg.candidate_key)
        };
        debug!(fused = fused.len(), pool = cfg.standard_rerank_pool, "fused");
        fused.truncate(cfg.standard_rerank_pool);

        let candidates = {
            let _stage = crate::stage_span!(stages::RERANK, fused.len()).entered();
            rerank(self.reranker.as_ref(), query, fused, top_k)?
        };

        Ok(PipelineRun {
            candidates,
            plan: QueryPlan::single(query, SearchMode::Standard),
            diagnostics: survivors.diagnostics,
        })
    }
}
