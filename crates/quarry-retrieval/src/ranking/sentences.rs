/// Split on runs of `.`, `!`, `?` and keep trimmed fragments of at least
/// `min_chars` characters.
pub fn split_sentences(text: &str, min_chars: usize) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty() && s.chars().count() >= min_chars)
        .collect()
}
