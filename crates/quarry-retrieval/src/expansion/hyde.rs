//! Hypothetical answer generation.
//!
//! Builds a short answer-shaped passage from a template chosen by the query's
//! leading interrogative. The passage is embedded alongside the real query:
//! answer text tends to sit closer to relevant chunks in embedding space than
//! the question does.

use super::strip_phrases;

const TOPIC_WORDS: usize = 3;

const TOPIC_NOISE: &[&[&str]] = &[
    &["what", "is"],
    &["how", "does"],
    &["how", "do"],
    &["why"],
    &["when"],
    &["where"],
    &["who"],
    &["explain"],
    &["define"],
];

/// Templates in match order; the first matching prefix wins.
const TEMPLATES: [(&str, &str); 5] = [
    (
        "what is",
        "{topic} is a concept defined by its core properties. It is made up of several \
         components and shows up in many practical settings.",
    ),
    (
        "how",
        "{topic} works through a sequence of steps. Each step builds on the previous one \
         until the result is reached.",
    ),
    (
        "why",
        "{topic} happens because of underlying causes. Those causes explain its effects and \
         why it matters.",
    ),
    (
        "when",
        "{topic} occurs at particular times or under particular conditions, and that timing \
         shapes its impact.",
    ),
    (
        "where",
        "{topic} is found in specific places and settings, and its surroundings explain why \
         it appears there.",
    ),
];

const DEFAULT_TEMPLATE: &str = "{topic} has distinguishing characteristics, common uses, and \
                                practical applications worth knowing.";

/// One hypothetical answer passage for `query`.
pub fn hypothetical_document(query: &str) -> String {
    let lower = query.trim().to_lowercase();
    let template = TEMPLATES
        .iter()
        .find(|(prefix, _)| lower.starts_with(prefix))
        .map(|(_, t)| *t)
        .unwrap_or(DEFAULT_TEMPLATE);
    template.replace("{topic}", &main_topic(query))
}

/// The query without question words, reduced to its last three words.
pub fn main_topic(query: &str) -> String {
    let words = strip_phrases(query, TOPIC_NOISE);
    if words.is_empty() {
        return query.trim().to_lowercase();
    }
    words[words.len().saturating_sub(TOPIC_WORDS)..].join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_follows_interrogative() {
        assert!(hypothetical_document("What is RRF?").starts_with("rrf is a concept"));
        assert!(hypothetical_document("How do rockets fly").starts_with("rockets fly works through"));
        assert!(hypothetical_document("why is the sky blue").contains("because of underlying causes"));
        assert!(hypothetical_document("sourdough starter").starts_with("sourdough starter has"));
    }

    #[test]
    fn topic_keeps_last_three_words() {
        assert_eq!(
            main_topic("explain how the borrow checker enforces lifetimes"),
            "checker enforces lifetimes"
        );
        assert_eq!(main_topic("define entropy"), "entropy");
    }

    #[test]
    fn topic_never_empty() {
        assert_eq!(main_topic("Why?"), "why?");
    }
}
