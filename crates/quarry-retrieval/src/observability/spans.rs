//! Span definitions per operation: search requests and pipeline stages.

/// Span around one `search` call.
#[macro_export]
macro_rules! retrieval_span {
    ($mode:expr, $top_k:expr) => {
        tracing::info_span!("quarry.retrieval", mode = %$mode, top_k = $top_k)
    };
}

/// Span around one pipeline stage.
#[macro_export]
macro_rules! stage_span {
    ($stage:expr, $inputs:expr) => {
        tracing::debug_span!("quarry.stage", stage = $stage, inputs = $inputs)
    };
}

/// Stage labels used in spans, diagnostics, and errors.
pub mod stages {
    pub const DENSE: &str = "dense";
    pub const STANDARD_FANOUT: &str = "standard.fanout";
    pub const THOROUGH_FANOUT: &str = "thorough.fanout";
    pub const FUSION: &str = "fusion";
    pub const LATE_INTERACTION: &str = "late_interaction";
    pub const RERANK: &str = "rerank";
    pub const DIVERSITY: &str = "diversity";
}
