use crate::errors::QuarryResult;

/// Pairwise relevance model scoring (query, passage) pairs jointly.
pub trait IReranker: Send + Sync {
    /// Score each text against `query` in one batched call. Output order
    /// matches input order.
    fn score_pairs(&self, query: &str, texts: &[String]) -> QuarryResult<Vec<f32>>;

    fn name(&self) -> &str;
}
