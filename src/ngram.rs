//! N-gram frequency tables.
//!
//! Keys are space-joined lowercase words; a missing key reads as count zero.
//! Tables are immutable once built and shared behind `&self` for the whole
//! engine lifetime.

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct NGramTable {
    counts: HashMap<String, u64>,
}

impl NGramTable {
    pub fn new(counts: HashMap<String, u64>) -> Self {
        Self { counts }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Frequency of the gram, zero when absent.
    pub fn count(&self, gram: &str) -> u64 {
        self.counts.get(gram).copied().unwrap_or(0)
    }

    pub fn contains(&self, gram: &str) -> bool {
        self.counts.contains_key(gram)
    }

    /// Number of distinct grams. The unigram table's size doubles as the
    /// corpus-size term in the prior denominators.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

pub fn bigram_key(first: &str, second: &str) -> String {
    format!("{first} {second}")
}

pub fn trigram_key(first: &str, second: &str, third: &str) -> String {
    format!("{first} {second} {third}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, u64)]) -> NGramTable {
        NGramTable::new(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        )
    }

    #[test]
    fn absent_grams_count_zero() {
        let t = table(&[("go", 10), ("goat", 2)]);
        assert_eq!(t.count("go"), 10);
        assert_eq!(t.count("goad"), 0);
        assert!(t.contains("goat"));
        assert!(!t.contains("goad"));
    }

    #[test]
    fn size_reflects_distinct_grams() {
        let t = table(&[("go", 10), ("goat", 2)]);
        assert_eq!(t.len(), 2);
        assert!(!t.is_empty());
        assert!(NGramTable::empty().is_empty());
    }

    #[test]
    fn keys_are_space_joined() {
        assert_eq!(bigram_key("will", "go"), "will go");
        assert_eq!(trigram_key("i", "will", "go"), "i will go");
    }
}
