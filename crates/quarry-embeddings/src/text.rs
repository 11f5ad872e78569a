//! Term extraction shared by the hashing embedder and the overlap reranker.

/// Split into lowercase alphanumeric terms of at least two characters.
/// Underscores stay inside terms.
pub fn terms(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|s| s.chars().count() >= 2)
        .map(|s| s.to_lowercase())
        .collect()
}

/// FNV-1a over the term bytes, reduced into `buckets`.
pub fn bucket(term: &str, buckets: usize) -> usize {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in term.as_bytes() {
        h ^= *b as u64;
        h = h.wrapping_mul(0x100000001b3);
    }
    (h % buckets.max(1) as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_drop_short_and_punctuation() {
        assert_eq!(
            terms("A quick, well-known snake_case test!"),
            vec!["quick", "well", "known", "snake_case", "test"]
        );
    }

    #[test]
    fn bucket_is_stable_and_in_range() {
        assert_eq!(bucket("rust", 64), bucket("rust", 64));
        assert!(bucket("anything", 7) < 7);
        assert_eq!(bucket("x", 0), 0);
    }
}
