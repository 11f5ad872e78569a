//! Context shaping for callers assembling an answer prompt from search results.
//!
//! Not part of `search`: these run on its output. [`build_context`] chains the
//! steps: sentence compression, near-duplicate suppression, lost-in-the-middle
//! reordering, then the markdown layout of [`hierarchical_context`].

use std::fmt::Write as _;

use tracing::debug;

use quarry_core::errors::{QuarryResult, ScorerError};
use quarry_core::models::SearchResult;
use quarry_core::similarity::cosine_similarity;
use quarry_core::traits::IEmbeddingProvider;

use crate::ranking::diversity;
use crate::ranking::sentences::split_sentences;
use crate::search::by_score_desc;

/// Characters of each leading result quoted in the summary section.
const SUMMARY_CHARS: usize = 200;
/// Results quoted in the summary section.
const SUMMARY_DOCS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextOptions {
    pub sentences_per_doc: usize,
    pub min_sentence_chars: usize,
    pub diversity_threshold: f64,
    pub max_docs: usize,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            sentences_per_doc: 3,
            min_sentence_chars: 10,
            diversity_threshold: 0.85,
            max_docs: 10,
        }
    }
}

/// Prompt-ready context and the results it was built from, in layout order.
#[derive(Debug, Clone)]
pub struct ShapedContext {
    pub text: String,
    pub results: Vec<SearchResult>,
}

/// Compress, deduplicate, reorder and lay out `results` for `query`.
pub fn build_context(
    query: &str,
    results: Vec<SearchResult>,
    options: &ContextOptions,
    embedder: &dyn IEmbeddingProvider,
) -> QuarryResult<ShapedContext> {
    let results = if results.is_empty() {
        results
    } else {
        let query_vector = embedder.embed(query)?;
        let compressed = compress(
            &query_vector,
            results,
            options.sentences_per_doc,
            options.min_sentence_chars,
            embedder,
        )?;
        let distinct = diversity::filter_by(
            compressed,
            |r: &SearchResult| r.text.as_str(),
            options.diversity_threshold,
            options.max_docs,
            embedder,
        )?;
        reorder_lost_in_middle(distinct)
    };
    let text = hierarchical_context(query, &results);
    debug!(results = results.len(), chars = text.len(), "context built");
    Ok(ShapedContext { text, results })
}

/// Markdown layout: a summary quoting the first results, then every result
/// under its own numbered heading.
pub fn hierarchical_context(query: &str, results: &[SearchResult]) -> String {
    let summary: Vec<String> = results
        .iter()
        .take(SUMMARY_DOCS)
        .map(|r| {
            let head: String = r.text.chars().take(SUMMARY_CHARS).collect();
            format!("{head}...")
        })
        .collect();

    let mut out = format!(
        "# Query: {query}\n\n## Summary\n{}\n\n## Detailed Sources\n\n",
        summary.join(" ")
    );
    for (i, result) in results.iter().enumerate() {
        let _ = write!(out, "### Source {}", i + 1);
        if !result.source.is_empty() {
            let _ = write!(out, " - {}", result.source);
        }
        let _ = write!(out, "\n{}\n\n", result.text);
    }
    out
}

/// Keep the `sentences_per_doc` sentences of each result most similar to the
/// query, in their original order.
///
/// Results with at most `sentences_per_doc` sentences are returned whole.
/// Sentences to rank across all results are embedded in one batch.
pub fn compress(
    query_vector: &[f32],
    results: Vec<SearchResult>,
    sentences_per_doc: usize,
    min_sentence_chars: usize,
    embedder: &dyn IEmbeddingProvider,
) -> QuarryResult<Vec<SearchResult>> {
    let split: Vec<Vec<String>> = results
        .iter()
        .map(|r| {
            split_sentences(&r.text, min_sentence_chars)
                .into_iter()
                .map(str::to_string)
                .collect()
        })
        .collect();

    let mut owners = Vec::new();
    let mut batch = Vec::new();
    for (i, sentences) in split.iter().enumerate() {
        if sentences.len() > sentences_per_doc {
            owners.extend(std::iter::repeat(i).take(sentences.len()));
            batch.extend(sentences.iter().cloned());
        }
    }
    if batch.is_empty() {
        return Ok(results);
    }

    let vectors = embedder.embed_batch(&batch)?;
    if vectors.len() != batch.len() {
        return Err(ScorerError::BatchSizeMismatch {
            scorer: embedder.name().to_string(),
            expected: batch.len(),
            actual: vectors.len(),
        }
        .into());
    }

    let mut sims: Vec<Vec<f64>> = vec![Vec::new(); results.len()];
    for (&owner, vector) in owners.iter().zip(&vectors) {
        sims[owner].push(cosine_similarity(query_vector, vector));
    }

    let compressed = results
        .into_iter()
        .zip(split)
        .zip(sims)
        .map(|((mut result, sentences), sims)| {
            if sims.is_empty() {
                return result;
            }
            let mut order: Vec<usize> = (0..sims.len()).collect();
            order.sort_by(|&a, &b| by_score_desc(sims[a], sims[b]));
            order.truncate(sentences_per_doc);
            order.sort_unstable();
            let kept: Vec<&str> = order.iter().map(|&i| sentences[i].as_str()).collect();
            result.text = if kept.is_empty() {
                String::new()
            } else {
                format!("{}.", kept.join(". "))
            };
            result
        })
        .collect::<Vec<_>>();

    debug!(
        sentences = batch.len(),
        results = compressed.len(),
        "context compressed"
    );
    Ok(compressed)
}

/// Place the strongest items at both ends and the weakest in the middle.
///
/// Input is ranked best first. Output takes ranks 0, 2, 4, ... from the front
/// and ranks 1, 3, 5, ... from the back, e.g. `[0, 2, 4, 5, 3, 1]`.
pub fn reorder_lost_in_middle<T>(items: Vec<T>) -> Vec<T> {
    if items.len() <= 2 {
        return items;
    }
    let mut front = Vec::with_capacity(items.len());
    let mut back = Vec::with_capacity(items.len() / 2);
    for (rank, item) in items.into_iter().enumerate() {
        if rank % 2 == 0 {
            front.push(item);
        } else {
            back.push(item);
        }
    }
    front.extend(back.into_iter().rev());
    front
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_core::models::StageScores;
    use quarry_embeddings::HashingEmbedder;

    fn result(id: i64, text: &str) -> SearchResult {
        SearchResult {
            chunk_id: id,
            source: "doc.md".into(),
            text: text.into(),
            metadata: serde_json::Value::Null,
            score: 1.0,
            stage_scores: StageScores::default(),
        }
    }

    #[test]
    fn reorder_puts_best_at_both_ends() {
        assert_eq!(
            reorder_lost_in_middle(vec![0, 1, 2, 3, 4, 5]),
            vec![0, 2, 4, 5, 3, 1]
        );
        assert_eq!(reorder_lost_in_middle(vec![0, 1, 2]), vec![0, 2, 1]);
    }

    #[test]
    fn reorder_leaves_short_lists_alone() {
        assert_eq!(reorder_lost_in_middle(vec![7, 8]), vec![7, 8]);
        assert!(reorder_lost_in_middle(Vec::<u8>::new()).is_empty());
    }

    #[test]
    fn compress_keeps_most_similar_sentences_in_order() {
        let embedder = HashingEmbedder::new(256);
        let query = embedder.embed("tokio runtime scheduler").unwrap();
        let text = "Bread needs flour and water. The tokio runtime uses a work stealing scheduler. \
                    Gardens need sunlight every day. Each tokio worker runs tasks from its own queue.";
        let out = compress(&query, vec![result(1, text)], 2, 10, &embedder).unwrap();
        assert_eq!(
            out[0].text,
            "The tokio runtime uses a work stealing scheduler. Each tokio worker runs tasks from its own queue."
        );
    }

    #[test]
    fn layout_numbers_sources_and_truncates_summary() {
        let long = "x".repeat(250);
        let mut unsourced = result(2, "short passage");
        unsourced.source.clear();
        let text = hierarchical_context("what is x", &[result(1, &long), unsourced]);

        let expected = format!(
            "# Query: what is x\n\n## Summary\n{}... short passage...\n\n## Detailed Sources\n\n\
             ### Source 1 - doc.md\n{long}\n\n### Source 2\nshort passage\n\n",
            "x".repeat(200)
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn empty_results_give_bare_layout() {
        let embedder = HashingEmbedder::new(64);
        let shaped = build_context("q", Vec::new(), &ContextOptions::default(), &embedder).unwrap();
        assert!(shaped.results.is_empty());
        assert_eq!(
            shaped.text,
            "# Query: q\n\n## Summary\n\n\n## Detailed Sources\n\n"
        );
    }

    #[test]
    fn build_context_drops_duplicates_and_reorders() {
        let embedder = HashingEmbedder::new(256);
        let results = vec![
            result(1, "Rust ownership moves values between bindings."),
            result(2, "Rust ownership moves values between bindings."),
            result(3, "Sourdough bread rises slowly overnight."),
            result(4, "Tomato plants want full sun all day."),
        ];
        let shaped =
            build_context("rust ownership", results, &ContextOptions::default(), &embedder).unwrap();
        let ids: Vec<i64> = shaped.results.iter().map(|r| r.chunk_id).collect();
        assert_eq!(ids, vec![1, 4, 3]);
        assert!(shaped.text.contains("### Source 3 - doc.md\nSourdough bread"));
    }

    #[test]
    fn compress_keeps_short_results_whole() {
        let embedder = HashingEmbedder::new(64);
        let query = embedder.embed("anything").unwrap();
        let text = "Only one sentence here!";
        let out = compress(&query, vec![result(1, text)], 3, 10, &embedder).unwrap();
        assert_eq!(out[0].text, text);
    }
}
