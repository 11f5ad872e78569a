//! # quarry-embeddings
//!
//! Collaborators that turn text into numbers for the retrieval pipeline:
//!
//! - embedding providers ([`HashingEmbedder`], and a fastembed ONNX model
//!   behind the `fastembed` feature),
//! - [`CachedEmbedder`], a moka cache in front of any provider so repeated
//!   query texts are embedded once,
//! - pairwise rerankers ([`OverlapReranker`], and a fastembed cross-encoder
//!   behind the same feature).

pub mod cache;
pub mod providers;
pub mod rerankers;
pub mod text;

pub use cache::CachedEmbedder;
pub use providers::{create_provider, HashingEmbedder};
pub use rerankers::{create_reranker, OverlapReranker};

#[cfg(feature = "fastembed")]
pub use providers::fastembed_provider::FastembedProvider;
#[cfg(feature = "fastembed")]
pub use rerankers::fastembed_reranker::FastembedReranker;
