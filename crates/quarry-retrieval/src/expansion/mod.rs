//! Query enhancement: one query in, a bounded set of related queries out.
//!
//! Three independent generators feed the thorough-mode query plan:
//! sub-queries ([`decompose`]), rewordings ([`variations`]), and one
//! hypothetical answer ([`hyde`]). Each is pure over its input.

pub mod decompose;
pub mod hyde;
pub mod key_terms;
pub mod stopwords;
pub mod synonym_expander;
pub mod variations;

use std::collections::HashSet;

use tracing::debug;

use quarry_core::constants::MAX_ENHANCER_OUTPUTS;
use quarry_core::models::{QueryPlan, QueryVariant, SearchMode, VariantKind};

pub use key_terms::key_terms;

#[derive(Debug, Clone)]
pub struct QueryEnhancer {
    max_variants: usize,
}

impl QueryEnhancer {
    pub fn new(max_variants: usize) -> Self {
        Self { max_variants }
    }

    pub fn sub_queries(&self, query: &str) -> Vec<String> {
        decompose::sub_queries(query)
    }

    pub fn variations(&self, query: &str) -> Vec<String> {
        variations::variations(query)
    }

    pub fn hypothetical(&self, query: &str) -> String {
        hyde::hypothetical_document(query)
    }

    /// `[root] + sub-queries + variations + [hypothetical]`, before dedup.
    pub fn enhance(&self, query: &str) -> Vec<QueryVariant> {
        let mut out = vec![QueryVariant::new(query, VariantKind::Root)];
        out.extend(
            self.sub_queries(query)
                .into_iter()
                .map(|q| QueryVariant::new(q, VariantKind::SubQuery)),
        );
        out.extend(
            self.variations(query)
                .into_iter()
                .map(|q| QueryVariant::new(q, VariantKind::Variation)),
        );
        out.push(QueryVariant::new(
            self.hypothetical(query),
            VariantKind::Hypothetical,
        ));
        out
    }

    /// Deduplicated, capped plan for one request.
    pub fn plan(&self, query: &str, mode: SearchMode) -> QueryPlan {
        let plan = QueryPlan::from_variants(query, mode, self.enhance(query), self.max_variants);
        debug!(variants = plan.len(), "query plan built");
        plan
    }
}

impl Default for QueryEnhancer {
    fn default() -> Self {
        Self::new(quarry_core::constants::MAX_QUERY_VARIANTS)
    }
}

/// Keep the first sighting of each string, then the first `MAX_ENHANCER_OUTPUTS`.
pub(crate) fn dedup_capped(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|s| seen.insert(s.clone()))
        .take(MAX_ENHANCER_OUTPUTS)
        .collect()
}

/// Lowercase `text`, drop every occurrence of the given word sequences, and
/// return the remaining words. Punctuation is stripped from word edges.
pub(crate) fn strip_phrases(text: &str, phrases: &[&[&str]]) -> Vec<String> {
    let words: Vec<String> = text
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect();

    let mut out = Vec::with_capacity(words.len());
    let mut i = 0;
    'outer: while i < words.len() {
        for phrase in phrases {
            let end = i + phrase.len();
            if end <= words.len() && words[i..end].iter().zip(phrase.iter()).all(|(w, p)| w == p) {
                i = end;
                continue 'outer;
            }
        }
        out.push(words[i].clone());
        i += 1;
    }
    out
}
