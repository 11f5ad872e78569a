//! Layered configuration. Every section falls back to its defaults, so an
//! empty TOML document is a valid config.

pub mod defaults;
mod embedding_config;
mod retrieval_config;
mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use embedding_config::{EmbeddingConfig, EmbeddingProviderKind, RerankerKind};
pub use retrieval_config::{CandidateKey, RetrievalConfig};
pub use storage_config::StorageConfig;

use crate::errors::{ConfigError, QuarryResult};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuarryConfig {
    pub retrieval: RetrievalConfig,
    pub embedding: EmbeddingConfig,
    pub storage: StorageConfig,
}

impl QuarryConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml_str(source: &str) -> QuarryResult<Self> {
        let config: QuarryConfig = toml::from_str(source).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> QuarryResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> QuarryResult<()> {
        self.retrieval.validate()?;
        self.embedding.validate()?;
        Ok(())
    }
}
