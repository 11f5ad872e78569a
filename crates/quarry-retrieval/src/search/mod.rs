//! First-stage candidate generation and fusion.

pub mod bm25;
pub mod dense;
pub mod lexical;
pub mod rrf_fusion;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use quarry_core::config::CandidateKey;
use quarry_core::models::{IdentityKey, ScoredCandidate};

pub use bm25::Bm25Plus;
pub use dense::DenseSearcher;
pub use lexical::LexicalSearcher;

/// Retrieval signal of one fan-out branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Dense,
    Lexical,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Dense => "dense",
            Signal::Lexical => "lexical",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descending by score. Used with stable sorts so equal scores keep input order.
pub(crate) fn by_score_desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Union of several candidate lists in list order. A chunk seen again has its
/// missing stage scores filled from the later sighting.
pub fn merge_unique(
    lists: impl IntoIterator<Item = Vec<ScoredCandidate>>,
    key: CandidateKey,
) -> Vec<ScoredCandidate> {
    let mut merged: Vec<ScoredCandidate> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for list in lists {
        for candidate in list {
            let k = owned_key(key, &candidate);
            match index.get(&k) {
                Some(&i) => merged[i].absorb(&candidate),
                None => {
                    index.insert(k, merged.len());
                    merged.push(candidate);
                }
            }
        }
    }
    merged
}

/// Owned form of [`CandidateKey::of`]; merged candidates move, so the key can't borrow.
fn owned_key(key: CandidateKey, candidate: &ScoredCandidate) -> String {
    match key.of(candidate) {
        IdentityKey::Id(id) => format!("id:{id}"),
        IdentityKey::Text(text) => format!("text:{text}"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use quarry_core::models::Chunk;

    use super::*;

    fn chunk(id: i64, text: &str) -> Arc<Chunk> {
        Arc::new(Chunk::new(id, format!("doc{id}"), text))
    }

    #[test]
    fn merge_keeps_first_sighting_order_and_fills_scores() {
        let a = chunk(1, "alpha");
        let b = chunk(2, "beta");
        let merged = merge_unique(
            vec![
                vec![ScoredCandidate::dense(a.clone(), 0.9), ScoredCandidate::dense(b.clone(), 0.5)],
                vec![ScoredCandidate::lexical(b, 3.0), ScoredCandidate::lexical(a, 1.0)],
            ],
            CandidateKey::ChunkId,
        );
        assert_eq!(merged.iter().map(|c| c.id()).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(merged[0].scores.dense, Some(0.9));
        assert_eq!(merged[0].scores.lexical, Some(1.0));
        assert_eq!(merged[1].scores.lexical, Some(3.0));
    }

    #[test]
    fn text_key_collapses_identical_text_across_sources() {
        let lists = vec![vec![
            ScoredCandidate::dense(chunk(1, "same words"), 0.8),
            ScoredCandidate::dense(chunk(2, "same words"), 0.7),
        ]];
        assert_eq!(merge_unique(lists.clone(), CandidateKey::ChunkId).len(), 2);
        let merged = merge_unique(lists, CandidateKey::Text);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id(), 1);
    }

    #[test]
    fn owned_key_agrees_with_candidate_key() {
        let a = ScoredCandidate::new(chunk(1, "same words"));
        let b = ScoredCandidate::new(chunk(2, "same words"));
        for key in [CandidateKey::ChunkId, CandidateKey::Text] {
            assert_eq!(
                owned_key(key, &a) == owned_key(key, &b),
                key.of(&a) == key.of(&b),
                "{key:?}"
            );
        }
    }

    #[test]
    fn ordering_is_descending() {
        assert_eq!(by_score_desc(1.0, 2.0), Ordering::Greater);
        assert_eq!(by_score_desc(2.0, 1.0), Ordering::Less);
    }
}
