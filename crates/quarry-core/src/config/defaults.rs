//! Default values for every config field.

pub const DEFAULT_WORKER_THREADS: usize = 4;
pub const DEFAULT_RRF_K: u32 = crate::constants::RRF_K;
pub const DEFAULT_DENSE_CHANNEL: &str = "full";

pub const DEFAULT_STANDARD_FANOUT_K: usize = 20;
pub const DEFAULT_STANDARD_RERANK_POOL: usize = 15;

pub const DEFAULT_THOROUGH_MAX_VARIANTS: usize = crate::constants::MAX_QUERY_VARIANTS;
pub const DEFAULT_THOROUGH_FANOUT_VARIANTS: usize = 5;
pub const DEFAULT_THOROUGH_FANOUT_K: usize = 10;
pub const DEFAULT_LATE_INTERACTION_POOL: usize = 50;
pub const DEFAULT_LATE_INTERACTION_KEEP: usize = 30;
pub const DEFAULT_RERANK_KEEP: usize = 20;
pub const DEFAULT_DIVERSITY_THRESHOLD: f64 = 0.85;
pub const DEFAULT_MIN_SENTENCE_CHARS: usize = 10;

pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
pub const DEFAULT_QUERY_CACHE_SIZE: u64 = 1024;

pub const DEFAULT_DB_PATH: &str = "db/quarry.db";
