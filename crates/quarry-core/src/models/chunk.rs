use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable chunk identity assigned at ingestion.
pub type ChunkId = i64;

/// A retrievable unit of document text. Immutable once ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,
    /// Originating document (usually a file path).
    pub source: String,
    pub text: String,
    /// Position of this chunk within its source document.
    #[serde(default)]
    pub chunk_index: u32,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl Chunk {
    pub fn new(id: ChunkId, source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            source: source.into(),
            text: text.into(),
            chunk_index: 0,
            metadata: serde_json::Value::Null,
        }
    }
}

/// Name of an embedding channel. Each chunk has at most one vector per channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmbeddingChannel(String);

impl EmbeddingChannel {
    /// Whole-chunk embedding.
    pub const FULL: &'static str = "full";
    /// Embedding of the chunk's first sentence.
    pub const FIRST_SENTENCE: &'static str = "first_sentence";
    /// Embedding of the chunk's extracted key terms.
    pub const KEYWORDS: &'static str = "keywords";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn full() -> Self {
        Self::new(Self::FULL)
    }

    pub fn first_sentence() -> Self {
        Self::new(Self::FIRST_SENTENCE)
    }

    pub fn keywords() -> Self {
        Self::new(Self::KEYWORDS)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EmbeddingChannel {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Display for EmbeddingChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmbeddingChannel {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// One precomputed vector for a (chunk, channel) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    pub chunk_id: ChunkId,
    pub channel: EmbeddingChannel,
    pub vector: Vec<f32>,
}

/// A chunk joined with its vector on one channel, as read from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedChunk {
    pub chunk: Chunk,
    pub vector: Vec<f32>,
}
