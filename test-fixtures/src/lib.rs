//! Fixture corpora and configs shared by the workspace's integration tests.
//!
//! Paths are relative to this crate's directory, so callers in any member
//! crate resolve the same files.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

fn fixtures_root() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}

/// Absolute path of a fixture, e.g. `fixture_path("config/quarry.toml")`.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

pub fn fixture_exists(relative_path: &str) -> bool {
    fixture_path(relative_path).is_file()
}

/// Read and deserialize a JSON fixture. Panics with the path on failure.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let raw = std::fs::read(&path)
        .unwrap_or_else(|e| panic!("cannot read fixture {}: {e}", path.display()));
    serde_json::from_slice(&raw)
        .unwrap_or_else(|e| panic!("cannot parse fixture {}: {e}", path.display()))
}

/// JSON fixtures directly under `subdir`, sorted by file name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(fixture_path(subdir)) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

/// A corpus fixture: chunk rows as ingestion would have written them, plus
/// queries with the chunk ids a good retriever should surface.
///
/// Chunk rows stay untyped here so the loader has no dependency on the crates
/// under test; callers deserialize them into their own chunk type.
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusFixture {
    pub description: String,
    pub chunks: Vec<serde_json::Value>,
    #[serde(default)]
    pub queries: Vec<QueryExpectation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryExpectation {
    pub query: String,
    /// Chunk ids of which at least one must appear in the results.
    pub relevant: Vec<i64>,
}

/// Load a corpus fixture from `corpus/<name>.json`.
pub fn load_corpus(name: &str) -> CorpusFixture {
    load_fixture(&format!("corpus/{name}.json"))
}
