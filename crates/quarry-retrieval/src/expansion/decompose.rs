//! Sub-query generation.

use std::sync::LazyLock;

use regex::Regex;

use quarry_core::constants::{MAX_QUERY_ENTITIES, TOPIC_TAIL_WORDS};

use super::dedup_capped;

/// Leading question word and the focus terms paired with the query tail.
const QUESTION_FOCUS: [(&str, [&str; 2]); 5] = [
    ("what", ["definition", "explanation"]),
    ("how", ["process", "method"]),
    ("why", ["reason", "cause"]),
    ("when", ["time", "date"]),
    ("where", ["location", "place"]),
];

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").expect("entity pattern is valid")
});

/// The query itself, its conjunction-split parts, question-focused rewrites of
/// its tail, and capitalized phrases. Deduplicated, at most five.
pub fn sub_queries(query: &str) -> Vec<String> {
    let mut out = vec![query.to_string()];
    let lower = query.to_lowercase();

    if lower.contains(" and ") {
        out.extend(
            lower
                .split(" and ")
                .map(str::trim)
                .filter(|part| part.chars().count() > 3)
                .map(str::to_string),
        );
    }

    if let Some((_, focus)) = QUESTION_FOCUS.iter().find(|(word, _)| lower.starts_with(word)) {
        let words: Vec<&str> = query.split_whitespace().collect();
        let tail = words[words.len().saturating_sub(TOPIC_TAIL_WORDS)..].join(" ");
        out.extend(focus.iter().map(|f| format!("{f} {tail}")));
    }

    out.extend(entities(query));
    dedup_capped(out)
}

/// Capitalized word runs longer than two characters, at most three.
pub fn entities(text: &str) -> Vec<String> {
    ENTITY
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|e| e.chars().count() > 2)
        .take(MAX_QUERY_ENTITIES)
        .map(str::to_string)
        .collect()
}
