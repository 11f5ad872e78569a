//! Synonym expansion from a built-in thesaurus.
//!
//! Each content word (four or more characters, not a stop word) that the
//! thesaurus knows gains one synonym right after it:
//! "training neural models" → "training instruction neural models frameworks".

use std::collections::HashMap;
use std::sync::LazyLock;

use super::stopwords::is_stop_word;

static THESAURUS: LazyLock<HashMap<&'static str, &'static [&'static str]>> = LazyLock::new(|| {
    let mut m: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
    m.insert("algorithm", &["procedure", "method"]);
    m.insert("answer", &["response", "reply"]);
    m.insert("build", &["construct", "assemble"]);
    m.insert("cause", &["reason", "source"]);
    m.insert("change", &["modify", "alter"]);
    m.insert("compute", &["calculate", "evaluate"]);
    m.insert("create", &["make", "produce"]);
    m.insert("data", &["information", "records"]);
    m.insert("document", &["record", "file"]);
    m.insert("error", &["mistake", "fault"]);
    m.insert("explain", &["describe", "clarify"]);
    m.insert("fast", &["quick", "rapid"]);
    m.insert("find", &["locate", "discover"]);
    m.insert("garden", &["yard", "plot"]);
    m.insert("grow", &["cultivate", "develop"]);
    m.insert("improve", &["enhance", "better"]);
    m.insert("large", &["big", "huge"]);
    m.insert("learn", &["study", "acquire"]);
    m.insert("learning", &["training", "education"]);
    m.insert("machine", &["computer", "device"]);
    m.insert("memory", &["storage", "recall"]);
    m.insert("method", &["technique", "approach"]);
    m.insert("model", &["framework", "representation"]);
    m.insert("models", &["frameworks", "representations"]);
    m.insert("network", &["graph", "web"]);
    m.insert("plant", &["flora", "vegetation"]);
    m.insert("problem", &["issue", "difficulty"]);
    m.insert("process", &["procedure", "operation"]);
    m.insert("query", &["question", "request"]);
    m.insert("rank", &["order", "grade"]);
    m.insert("result", &["outcome", "consequence"]);
    m.insert("retrieval", &["recovery", "fetching"]);
    m.insert("safety", &["security", "protection"]);
    m.insert("search", &["lookup", "query"]);
    m.insert("slow", &["sluggish", "gradual"]);
    m.insert("small", &["little", "compact"]);
    m.insert("soil", &["earth", "ground"]);
    m.insert("speed", &["velocity", "pace"]);
    m.insert("text", &["passage", "content"]);
    m.insert("train", &["teach", "educate"]);
    m.insert("training", &["instruction", "practice"]);
    m.insert("understand", &["comprehend", "grasp"]);
    m.insert("water", &["irrigate", "moisten"]);
    m.insert("word", &["term", "token"]);
    m.insert("work", &["function", "operate"]);
    m
});

/// First thesaurus synonym for `word` (lowercase) not rejected by `skip`.
pub fn synonym_for(word: &str, skip: impl Fn(&str) -> bool) -> Option<&'static str> {
    THESAURUS
        .get(word)
        .and_then(|syns| syns.iter().copied().find(|s| !skip(s)))
}

/// Expand a query with one synonym per known content word. Returns the query
/// unchanged when nothing is known.
pub fn expand(query: &str) -> String {
    let lowered: Vec<String> = query
        .split_whitespace()
        .map(|w| core(w).0.to_lowercase())
        .collect();

    query
        .split_whitespace()
        .zip(&lowered)
        .map(|(word, lower)| {
            if lower.chars().count() < 4 || is_stop_word(lower) {
                return word.to_string();
            }
            match synonym_for(lower, |s| lowered.iter().any(|w| w == s)) {
                Some(syn) => {
                    let (head, tail) = core(word);
                    format!("{head} {syn}{tail}")
                }
                None => word.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split trailing punctuation off a word.
fn core(word: &str) -> (&str, &str) {
    let end = word
        .char_indices()
        .rev()
        .take_while(|(_, c)| !c.is_alphanumeric())
        .last()
        .map(|(i, _)| i)
        .unwrap_or(word.len());
    word.split_at(end)
}
