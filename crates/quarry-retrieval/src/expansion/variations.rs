//! Rewordings of one query.

use super::stopwords::is_stop_word;
use super::{dedup_capped, strip_phrases, synonym_expander};

const QUESTION_PHRASES: &[&[&str]] = &[
    &["what", "is"],
    &["how", "does"],
    &["why"],
    &["when"],
    &["where"],
    &["who"],
];

/// The query itself, question-form rewrites when it is not already a question,
/// a keyword-only rewrite, and a synonym-expanded rewrite. Deduplicated, at
/// most five.
pub fn variations(query: &str) -> Vec<String> {
    let mut out = vec![query.to_string()];

    if !query.trim_end().ends_with('?') {
        out.push(format!("what is {query}"));
        out.push(format!("explain {query}"));
    }

    let keywords = keyword_rewrite(query);
    if !keywords.is_empty() && keywords != query.to_lowercase() {
        out.push(keywords);
    }

    let expanded = synonym_expander::expand(query);
    if expanded != query {
        out.push(expanded);
    }

    dedup_capped(out)
}

/// Lowercased query without question phrases or stop words.
pub fn keyword_rewrite(query: &str) -> String {
    strip_phrases(query, QUESTION_PHRASES)
        .into_iter()
        .filter(|w| !is_stop_word(w))
        .collect::<Vec<_>>()
        .join(" ")
}
