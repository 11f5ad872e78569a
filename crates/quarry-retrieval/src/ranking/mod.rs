//! Second-stage rescoring: late interaction, pairwise rerank, diversity.

pub mod diversity;
pub mod late_interaction;
pub mod reranker;
pub mod sentences;
