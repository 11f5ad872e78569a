/// Quarry version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound on query variants a plan may carry (root included).
pub const MAX_QUERY_VARIANTS: usize = 7;

/// Upper bound on sub-queries and on variations produced by the enhancer, each.
pub const MAX_ENHANCER_OUTPUTS: usize = 5;

/// Trailing words of a question kept as its topic in keyword-paired sub-queries.
pub const TOPIC_TAIL_WORDS: usize = 5;

/// Maximum number of capitalized-phrase entities taken from a query.
pub const MAX_QUERY_ENTITIES: usize = 3;

/// Reciprocal rank fusion smoothing constant.
pub const RRF_K: u32 = 60;

/// BM25+ term-frequency saturation.
pub const BM25_K1: f64 = 1.5;

/// BM25+ length normalization.
pub const BM25_B: f64 = 0.75;

/// BM25+ lower-bound term weight.
pub const BM25_DELTA: f64 = 1.0;
