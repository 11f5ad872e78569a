//! # quarry-core
//!
//! Foundation crate for the Quarry retrieval pipeline.
//! Defines the data model, collaborator traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod similarity;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::QuarryConfig;
pub use errors::{QuarryError, QuarryResult};
pub use models::{
    Chunk, ChunkId, EmbeddedChunk, EmbeddingChannel, QueryPlan, ScoredCandidate, SearchMode,
    SearchRequest, SearchResponse, SearchResult,
};
