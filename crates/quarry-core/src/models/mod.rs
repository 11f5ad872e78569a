//! Data model shared by every pipeline stage.

mod candidate;
mod chunk;
mod diagnostic;
mod query_plan;
mod response_mode;
mod search_mode;
mod search_result;

pub use candidate::{IdentityKey, ScoredCandidate, StageScores};
pub use chunk::{Chunk, ChunkId, EmbeddedChunk, EmbeddingChannel, EmbeddingRecord};
pub use diagnostic::Diagnostic;
pub use query_plan::{QueryPlan, QueryVariant, VariantKind};
pub use response_mode::ResponseMode;
pub use search_mode::SearchMode;
pub use search_result::{SearchRequest, SearchResponse, SearchResult};
