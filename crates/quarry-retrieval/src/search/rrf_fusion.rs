//! Rank-based fusion of dense and lexical result lists.
//!
//! Each list contributes `1 / (k + rank)` per candidate, so only positions
//! matter and raw scores from different signals never need to be comparable.

use std::collections::HashMap;

use quarry_core::config::CandidateKey;
use quarry_core::models::{IdentityKey, ScoredCandidate};

use super::by_score_desc;

/// Fuse ranked candidate lists.
///
/// `k` is the smoothing constant (default 60). Ranks are 1-based. A candidate
/// absent from a list gets nothing from it. Equal fused scores keep the order
/// in which candidates were first seen, scanning lists in order. The fused
/// score is stamped into `fusion`; other stage scores of merged sightings are
/// filled in, never overwritten.
pub fn fuse(lists: &[Vec<ScoredCandidate>], k: u32, key: CandidateKey) -> Vec<ScoredCandidate> {
    let mut fused: Vec<(ScoredCandidate, f64)> = Vec::new();
    let mut index: HashMap<IdentityKey<'_>, usize> = HashMap::new();

    for list in lists {
        for (rank0, candidate) in list.iter().enumerate() {
            let contribution = 1.0 / (k as f64 + (rank0 + 1) as f64);
            match index.get(&key.of(candidate)) {
                Some(&i) => {
                    let entry = &mut fused[i];
                    entry.0.absorb(candidate);
                    entry.1 += contribution;
                }
                None => {
                    index.insert(key.of(candidate), fused.len());
                    fused.push((candidate.clone(), contribution));
                }
            }
        }
    }

    fused.sort_by(|a, b| by_score_desc(a.1, b.1));
    fused
        .into_iter()
        .map(|(mut candidate, score)| {
            candidate.scores.fusion = Some(score);
            candidate
        })
        .collect()
}
