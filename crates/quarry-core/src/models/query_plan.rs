use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::search_mode::SearchMode;

/// Where a query variant came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    Root,
    SubQuery,
    Variation,
    /// Synthetic answer text, only meaningful as a dense probe.
    Hypothetical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryVariant {
    pub text: String,
    pub kind: VariantKind,
}

impl QueryVariant {
    pub fn new(text: impl Into<String>, kind: VariantKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// The set of query texts one request searches with. Rebuilt per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPlan {
    pub root: String,
    pub mode: SearchMode,
    /// Deduplicated by exact text, generation order preserved.
    pub variants: Vec<QueryVariant>,
}

impl QueryPlan {
    /// A plan that searches with the root query only.
    pub fn single(root: impl Into<String>, mode: SearchMode) -> Self {
        let root = root.into();
        Self {
            variants: vec![QueryVariant::new(root.clone(), VariantKind::Root)],
            root,
            mode,
        }
    }

    /// Build a plan from generated variants, keeping the first sighting of each
    /// text and at most `cap` variants.
    pub fn from_variants(
        root: impl Into<String>,
        mode: SearchMode,
        generated: impl IntoIterator<Item = QueryVariant>,
        cap: usize,
    ) -> Self {
        let mut seen = HashSet::new();
        let variants = generated
            .into_iter()
            .filter(|v| seen.insert(v.text.clone()))
            .take(cap)
            .collect();
        Self {
            root: root.into(),
            mode,
            variants,
        }
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|v| v.text.as_str())
    }
}
