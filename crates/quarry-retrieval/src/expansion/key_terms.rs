//! Frequency-ranked key terms.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::stopwords::is_stop_word;

static TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-z]{4,}\b").expect("term pattern is valid"));

/// The `n` most frequent alphabetic terms of four or more letters, stop words
/// removed. Ties keep first-occurrence order.
pub fn key_terms(text: &str, n: usize) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, m) in TERM.find_iter(&lower).enumerate() {
        let term = m.as_str();
        if is_stop_word(term) {
            continue;
        }
        counts.entry(term).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> =
        counts.into_iter().map(|(t, (c, first))| (t, c, first)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked
        .into_iter()
        .take(n)
        .map(|(t, _, _)| t.to_string())
        .collect()
}
