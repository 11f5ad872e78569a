use tracing::debug;

use quarry_core::errors::QuarryResult;
use quarry_core::models::{SearchMode, VariantKind};

use super::{PipelineRun, Probe, RetrievalEngine};
use crate::executor::Branch;
use crate::observability::spans::stages;
use crate::ranking::{diversity, late_interaction, reranker::rerank};
use crate::search::{merge_unique, Signal};

impl RetrievalEngine {
    pub(super) fn run_thorough(&self, query: &str, top_k: usize) -> QuarryResult<PipelineRun> {
        let cfg = &self.config;
        let plan = self.enhancer.plan(query, SearchMode::Thorough);

        // The hypothetical answer is only a dense probe.
        let mut branches = Vec::new();
        let searched = plan.variants.iter().take(cfg.thorough_fanout_variants);
        for (i, variant) in searched.enumerate() {
            branches.push(Branch::new(
                format!("dense[{i}]"),
                Probe::new(Signal::Dense, &variant.text, cfg.thorough_fanout_k),
            ));
            if variant.kind != VariantKind::Hypothetical {
                branches.push(Branch::new(
                    format!("lexical[{i}]"),
                    Probe::new(Signal::Lexical, &variant.text, cfg.thorough_fanout_k),
                ));
            }
        }

        let survivors = {
            let _stage = crate::stage_span!(stages::THOROUGH_FANOUT, branches.len()).entered();
            self.executor
                .join_all(stages::THOROUGH_FANOUT, branches, |p| self.probe(p))
                .into_survivors()?
        };

        let mut pool = merge_unique(survivors.results, cfg.candidate_key);
        debug!(unique = pool.len(), "fan-out merged");
        pool.truncate(cfg.late_interaction_pool);

        let candidates = if pool.is_empty() {
            pool
        } else {
            let rescored = {
                let _stage = crate::stage_span!(stages::LATE_INTERACTION, pool.len()).entered();
                let query_vector = self.embedder.embed(query)?;
                late_interaction::rescore(
                    &query_vector,
                    pool,
                    cfg.late_interaction_keep,
                    cfg.min_sentence_chars,
                    self.embedder.as_ref(),
                )?
            };
            let reranked = {
                let _stage = crate::stage_span!(stages::RERANK, rescored.len()).entered();
                rerank(self.reranker.as_ref(), query, rescored, cfg.rerank_keep)?
            };
            let _stage = crate::stage_span!(stages::DIVERSITY, reranked.len()).entered();
            diversity::filter(
                reranked,
                cfg.diversity_threshold,
                top_k,
                self.embedder.as_ref(),
            )?
        };

        Ok(PipelineRun {
            candidates,
            plan,
            diagnostics: survivors.diagnostics,
        })
    }
}
