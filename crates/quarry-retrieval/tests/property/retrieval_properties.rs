//! Property-based tests for fusion, diversity, and result bounds.

#[path = "../common/mod.rs"]
mod common;

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use proptest::prelude::*;

use quarry_core::config::CandidateKey;
use quarry_core::models::{Chunk, ScoredCandidate, SearchMode};
use quarry_core::similarity::cosine_similarity;
use quarry_core::traits::IEmbeddingProvider;
use quarry_embeddings::HashingEmbedder;
use quarry_retrieval::context::reorder_lost_in_middle;
use quarry_retrieval::ranking::diversity;
use quarry_retrieval::search::rrf_fusion::fuse;
use quarry_retrieval::RetrievalEngine;

const WORDS: &[&str] = &[
    "cache", "queue", "index", "vector", "token", "shard", "replica", "lock", "thread", "graph",
];

fn candidates(ids: &[i64]) -> Vec<ScoredCandidate> {
    ids.iter()
        .map(|&id| ScoredCandidate::new(Arc::new(Chunk::new(id, "p.md", format!("chunk {id}")))))
        .collect()
}

fn ml_engine() -> &'static RetrievalEngine {
    static ENGINE: OnceLock<RetrievalEngine> = OnceLock::new();
    ENGINE.get_or_init(|| common::engine("ml_basics"))
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 1..6).prop_map(|w| w.join(" "))
}

proptest! {
    #[test]
    fn fusing_a_list_with_itself_keeps_its_order(
        ids in prop::collection::hash_set(0i64..1000, 0..40)
    ) {
        let ids: Vec<i64> = ids.into_iter().collect();
        let list = candidates(&ids);
        let once = fuse(std::slice::from_ref(&list), 60, CandidateKey::ChunkId);
        let twice = fuse(&[list.clone(), list], 60, CandidateKey::ChunkId);

        let order = |v: &[ScoredCandidate]| v.iter().map(|c| c.id()).collect::<Vec<_>>();
        prop_assert_eq!(order(&once), ids.clone());
        prop_assert_eq!(order(&twice), ids);
        for (rank0, c) in twice.iter().enumerate() {
            let expected = 2.0 / (60.0 + (rank0 + 1) as f64);
            prop_assert!((c.scores.fusion.unwrap() - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn fusion_returns_each_identity_once(
        a in prop::collection::vec(0i64..30, 0..20),
        b in prop::collection::vec(0i64..30, 0..20),
    ) {
        let dedup = |v: Vec<i64>| {
            let mut seen = HashSet::new();
            v.into_iter().filter(|x| seen.insert(*x)).collect::<Vec<_>>()
        };
        let (a, b) = (dedup(a), dedup(b));
        let fused = fuse(&[candidates(&a), candidates(&b)], 60, CandidateKey::ChunkId);

        let expected: HashSet<i64> = a.iter().chain(&b).copied().collect();
        let got: Vec<i64> = fused.iter().map(|c| c.id()).collect();
        prop_assert_eq!(got.len(), expected.len());
        prop_assert_eq!(got.into_iter().collect::<HashSet<_>>(), expected);
        for pair in fused.windows(2) {
            prop_assert!(pair[0].scores.fusion >= pair[1].scores.fusion);
        }
    }

    #[test]
    fn diversity_output_is_pairwise_dissimilar(
        texts in prop::collection::vec(text_strategy(), 1..15),
        max_results in 1usize..10,
    ) {
        let embedder = HashingEmbedder::new(64);
        let input: Vec<ScoredCandidate> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| ScoredCandidate::new(Arc::new(Chunk::new(i as i64, "p.md", t.clone()))))
            .collect();
        let kept = diversity::filter(input, 0.85, max_results, &embedder).unwrap();

        prop_assert!(!kept.is_empty());
        prop_assert!(kept.len() <= max_results);
        prop_assert_eq!(kept[0].id(), 0);
        let vectors: Vec<Vec<f32>> = kept.iter().map(|c| embedder.embed(c.text()).unwrap()).collect();
        for i in 0..vectors.len() {
            for j in i + 1..vectors.len() {
                prop_assert!(cosine_similarity(&vectors[i], &vectors[j]) < 0.85);
            }
        }
    }

    #[test]
    fn reorder_is_a_permutation_with_best_items_at_the_ends(
        n in 0usize..40,
    ) {
        let items: Vec<usize> = (0..n).collect();
        let reordered = reorder_lost_in_middle(items.clone());
        let mut sorted = reordered.clone();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, items);
        if n >= 2 {
            prop_assert_eq!(reordered[0], 0);
            prop_assert_eq!(reordered[n - 1], 1);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn result_count_is_bounded_by_top_k_and_corpus(
        top_k in 1usize..20,
        mode in prop::sample::select(vec![SearchMode::Fast, SearchMode::Standard, SearchMode::Thorough]),
        query in text_strategy(),
    ) {
        let results = ml_engine().search(&query, top_k, mode).unwrap();
        prop_assert!(results.len() <= top_k);
        prop_assert!(results.len() <= 12);
        if mode != SearchMode::Thorough {
            prop_assert_eq!(results.len(), top_k.min(12));
        }
        let ids: HashSet<i64> = results.iter().map(|r| r.chunk_id).collect();
        prop_assert_eq!(ids.len(), results.len());
    }
}
