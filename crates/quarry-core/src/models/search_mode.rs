use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::QuarryError;

/// Cost/quality tier of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Single dense lookup on the root query.
    Fast,
    /// Dense + lexical fan-out, RRF, pairwise rerank.
    Standard,
    /// Query enhancement, multi-variant fan-out, late interaction, rerank, diversity.
    #[default]
    Thorough,
}

impl SearchMode {
    pub const ALL: [SearchMode; 3] = [SearchMode::Fast, SearchMode::Standard, SearchMode::Thorough];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Fast => "fast",
            SearchMode::Standard => "standard",
            SearchMode::Thorough => "thorough",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = QuarryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fast" => Ok(SearchMode::Fast),
            "standard" => Ok(SearchMode::Standard),
            "thorough" => Ok(SearchMode::Thorough),
            other => Err(QuarryError::invalid_argument(format!(
                "unknown search mode '{other}' (expected fast, standard, or thorough)"
            ))),
        }
    }
}
