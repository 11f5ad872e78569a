use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Corpus store location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database produced by ingestion. Opened read-only.
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(defaults::DEFAULT_DB_PATH),
        }
    }
}
