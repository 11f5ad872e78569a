use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::search_mode::SearchMode;
use crate::errors::QuarryError;

/// Answer verbosity requested by the caller, mapped onto a search tier and a
/// number of passages to retrieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMode {
    Detail,
    Normal,
    Concise,
}

impl ResponseMode {
    pub fn search_mode(&self) -> SearchMode {
        match self {
            ResponseMode::Detail => SearchMode::Thorough,
            ResponseMode::Normal => SearchMode::Standard,
            ResponseMode::Concise => SearchMode::Fast,
        }
    }

    /// Passages to retrieve for this verbosity.
    pub fn num_docs(&self) -> usize {
        match self {
            ResponseMode::Detail => 15,
            ResponseMode::Normal => 7,
            ResponseMode::Concise => 3,
        }
    }
}

impl FromStr for ResponseMode {
    type Err = QuarryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "detail" | "detailed" => Ok(ResponseMode::Detail),
            "normal" => Ok(ResponseMode::Normal),
            "concise" | "short" | "shortconsize" => Ok(ResponseMode::Concise),
            other => Err(QuarryError::invalid_argument(format!(
                "unknown response mode '{other}'"
            ))),
        }
    }
}
