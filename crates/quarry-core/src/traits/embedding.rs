use crate::errors::QuarryResult;

/// Embedding generation provider.
pub trait IEmbeddingProvider: Send + Sync {
    /// Vector for one text.
    fn embed(&self, text: &str) -> QuarryResult<Vec<f32>>;

    /// Vectors for many texts in one call, in input order.
    fn embed_batch(&self, texts: &[String]) -> QuarryResult<Vec<Vec<f32>>>;

    /// Length of every vector this provider returns.
    fn dimensions(&self) -> usize;

    /// Name used in logs and errors.
    fn name(&self) -> &str;
}
