//! # quarry-retrieval
//!
//! Multi-stage hybrid retrieval over a read-only chunk corpus.
//!
//! `RetrievalEngine::search(query, top_k, mode)` dispatches to one of three
//! pipelines:
//!
//! - **fast**: one dense lookup on the root query.
//! - **standard**: dense and lexical search in parallel, RRF fusion, rerank.
//! - **thorough**: query enhancement, a parallel fan-out of dense and lexical
//!   searches over the variants, late-interaction rescoring, rerank, then a
//!   diversity filter.
//!
//! Fan-out runs on a fixed-width rayon pool with join-all semantics. A failing
//! branch is dropped with a diagnostic; only a stage whose every branch failed
//! is an error.

pub mod context;
pub mod engine;
pub mod executor;
pub mod expansion;
pub mod observability;
pub mod ranking;
pub mod search;

pub use engine::{search_with_timeout, RetrievalEngine};
pub use executor::FanOutExecutor;
pub use expansion::QueryEnhancer;
