//! Fixed-width fan-out with join-all semantics.
//!
//! Every branch of a stage runs to completion (or failure) before the stage
//! consumes anything. Results come back in submission order whatever the
//! completion order was. A branch that returns an error or panics is dropped
//! and reported; the stage fails only when every branch failed.

use std::panic::{catch_unwind, AssertUnwindSafe};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, warn};

use quarry_core::errors::{QuarryError, QuarryResult, RetrievalError};
use quarry_core::models::Diagnostic;

/// One unit of fan-out work.
#[derive(Debug, Clone)]
pub struct Branch<T> {
    pub label: String,
    pub input: T,
}

impl<T> Branch<T> {
    pub fn new(label: impl Into<String>, input: T) -> Self {
        Self {
            label: label.into(),
            input,
        }
    }
}

/// How one branch ended.
#[derive(Debug)]
pub struct BranchOutcome<R> {
    pub label: String,
    pub result: QuarryResult<R>,
}

/// Every branch outcome of one stage, in submission order.
#[derive(Debug)]
pub struct StageOutcome<R> {
    pub stage: String,
    pub branches: Vec<BranchOutcome<R>>,
}

/// Surviving branch results plus a diagnostic per dropped branch.
#[derive(Debug)]
pub struct Survivors<R> {
    pub results: Vec<R>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<R> StageOutcome<R> {
    pub fn failures(&self) -> usize {
        self.branches.iter().filter(|b| b.result.is_err()).count()
    }

    /// Split into survivors and diagnostics. A stage with branches, all of
    /// which failed, is `AllBranchesFailed`. A stage with no branches yields
    /// nothing and is not an error.
    pub fn into_survivors(self) -> QuarryResult<Survivors<R>> {
        let total = self.branches.len();
        let mut results = Vec::with_capacity(total);
        let mut diagnostics = Vec::new();
        let mut last_error: Option<QuarryError> = None;

        for branch in self.branches {
            match branch.result {
                Ok(r) => results.push(r),
                Err(e) => {
                    warn!(stage = %self.stage, branch = %branch.label, error = %e, "branch dropped");
                    diagnostics.push(Diagnostic::new(&self.stage, &branch.label, e.to_string()));
                    last_error = Some(e);
                }
            }
        }

        if total > 0 && results.is_empty() {
            return Err(RetrievalError::AllBranchesFailed {
                stage: self.stage,
                failures: total,
                last: last_error.map(|e| e.to_string()).unwrap_or_default(),
            }
            .into());
        }
        Ok(Survivors {
            results,
            diagnostics,
        })
    }
}

/// A rayon pool owned by one engine.
pub struct FanOutExecutor {
    pool: ThreadPool,
    width: usize,
}

impl FanOutExecutor {
    pub fn new(width: usize) -> QuarryResult<Self> {
        let width = width.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(width)
            .thread_name(|i| format!("quarry-fanout-{i}"))
            .build()
            .map_err(|e| RetrievalError::PoolUnavailable {
                reason: e.to_string(),
            })?;
        Ok(Self { pool, width })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Run every branch on the pool and wait for all of them.
    pub fn join_all<T, R, F>(&self, stage: &str, branches: Vec<Branch<T>>, run: F) -> StageOutcome<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> QuarryResult<R> + Send + Sync,
    {
        debug!(stage, branches = branches.len(), width = self.width, "fan-out");
        let outcomes = self.pool.install(|| {
            branches
                .into_par_iter()
                .map(|branch| {
                    let Branch { label, input } = branch;
                    let result = catch_unwind(AssertUnwindSafe(|| run(input))).unwrap_or_else(|_| {
                        Err(RetrievalError::TaskPanicked {
                            task: label.clone(),
                        }
                        .into())
                    });
                    BranchOutcome { label, result }
                })
                .collect::<Vec<_>>()
        });
        StageOutcome {
            stage: stage.to_string(),
            branches: outcomes,
        }
    }
}

impl std::fmt::Debug for FanOutExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanOutExecutor")
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}
