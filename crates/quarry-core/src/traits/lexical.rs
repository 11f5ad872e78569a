use crate::errors::QuarryResult;

/// Keyword relevance over a tokenized corpus.
pub trait ILexicalScorer: Send + Sync {
    /// Score every document in `corpus` against `query`. Returns one score per
    /// document, in corpus order.
    fn score(&self, query: &[String], corpus: &[Vec<String>]) -> QuarryResult<Vec<f64>>;

    fn name(&self) -> &str;
}
