/// Pipeline orchestration errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("all {failures} branches of stage '{stage}' failed; last error: {last}")]
    AllBranchesFailed {
        stage: String,
        failures: usize,
        last: String,
    },

    #[error("task '{task}' panicked")]
    TaskPanicked { task: String },

    #[error("search abandoned after {millis} ms")]
    Timeout { millis: u64 },

    #[error("worker pool unavailable: {reason}")]
    PoolUnavailable { reason: String },
}
