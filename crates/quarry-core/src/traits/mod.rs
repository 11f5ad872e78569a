mod corpus;
mod embedding;
mod lexical;
mod reranker;

pub use corpus::ICorpusStore;
pub use embedding::IEmbeddingProvider;
pub use lexical::ILexicalScorer;
pub use reranker::IReranker;
