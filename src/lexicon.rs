//! Immutable vocabulary with derived lookup tables.
//!
//! The five word lists keep their file order because downstream scans are
//! first-match. Derived tables the hot paths need on every query are built
//! once here: the combined membership set, Swahili phonemes over the
//! concatenated Swahili lists, and index-aligned English phonemes and
//! phonetic codes.

use std::collections::HashSet;

use crate::phonetic::{english_phoneme, phonetic_code, swahili_phoneme};

pub struct Vocabulary {
    english_words: Vec<String>,
    english_morphemes: Vec<String>,
    swahili_words: Vec<String>,
    swahili_verbs: Vec<String>,
    swahili_adjectives: Vec<String>,

    all_words: HashSet<String>,
    swahili_phonemes: Vec<String>,
    english_phonemes: Vec<String>,
    english_codes: Vec<String>,
}

impl Vocabulary {
    pub fn new(
        english_words: Vec<String>,
        english_morphemes: Vec<String>,
        swahili_words: Vec<String>,
        swahili_verbs: Vec<String>,
        swahili_adjectives: Vec<String>,
    ) -> Self {
        let mut all_words = HashSet::new();
        for list in [
            &swahili_words,
            &swahili_adjectives,
            &swahili_verbs,
            &english_words,
            &english_morphemes,
        ] {
            all_words.extend(list.iter().cloned());
        }

        let swahili_phonemes = swahili_words
            .iter()
            .chain(swahili_verbs.iter())
            .chain(swahili_adjectives.iter())
            .map(|w| swahili_phoneme(w))
            .collect();

        let english_phonemes: Vec<String> =
            english_words.iter().map(|w| english_phoneme(w)).collect();
        let english_codes = english_phonemes.iter().map(|p| phonetic_code(p)).collect();

        Self {
            english_words,
            english_morphemes,
            swahili_words,
            swahili_verbs,
            swahili_adjectives,
            all_words,
            swahili_phonemes,
            english_phonemes,
            english_codes,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new(), Vec::new(), Vec::new())
    }

    /// Membership across all five lists. The probe is lowercased; entries
    /// are matched as they appear in the source lists.
    pub fn is_word(&self, word: &str) -> bool {
        self.all_words.contains(&word.to_lowercase())
    }

    pub fn english_words(&self) -> &[String] {
        &self.english_words
    }

    pub fn english_morphemes(&self) -> &[String] {
        &self.english_morphemes
    }

    pub fn swahili_words(&self) -> &[String] {
        &self.swahili_words
    }

    pub fn swahili_verbs(&self) -> &[String] {
        &self.swahili_verbs
    }

    pub fn swahili_adjectives(&self) -> &[String] {
        &self.swahili_adjectives
    }

    /// Swahili phonemes over the concatenation lexicon, then verbs, then
    /// adjectives. Candidate scans iterate this directly.
    pub fn swahili_phonemes(&self) -> &[String] {
        &self.swahili_phonemes
    }

    /// Index-aligned with [`Self::english_words`].
    pub fn english_phonemes(&self) -> &[String] {
        &self.english_phonemes
    }

    /// Phonetic codes of the English phonemes, index-aligned with
    /// [`Self::english_words`].
    pub fn english_codes(&self) -> &[String] {
        &self.english_codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample_vocabulary() -> Vocabulary {
        Vocabulary::new(
            words(&["hello", "world"]),
            words(&["net"]),
            words(&["dhamini", "kuja"]),
            words(&["fanya"]),
            words(&["zuri"]),
        )
    }

    #[test]
    fn membership_spans_all_lists() {
        let vocab = sample_vocabulary();
        assert!(vocab.is_word("hello"));
        assert!(vocab.is_word("net"));
        assert!(vocab.is_word("kuja"));
        assert!(vocab.is_word("fanya"));
        assert!(vocab.is_word("zuri"));
        assert!(!vocab.is_word("missing"));
    }

    #[test]
    fn membership_lowercases_the_probe_only() {
        let vocab = sample_vocabulary();
        assert!(vocab.is_word("HELLO"));
        assert!(vocab.is_word("Kuja"));
    }

    #[test]
    fn swahili_phonemes_follow_list_order() {
        let vocab = sample_vocabulary();
        // lexicon, then verbs, then adjectives; "dh" rewrites to "th".
        assert_eq!(
            vocab.swahili_phonemes(),
            &["thamini", "kuja", "fanya", "zuri"]
        );
    }

    #[test]
    fn english_tables_are_index_aligned() {
        let vocab = sample_vocabulary();
        assert_eq!(vocab.english_phonemes().len(), vocab.english_words().len());
        assert_eq!(vocab.english_codes().len(), vocab.english_words().len());
        assert_eq!(vocab.english_phonemes()[0], english_phoneme("hello"));
        assert_eq!(
            vocab.english_codes()[0],
            phonetic_code(&english_phoneme("hello"))
        );
    }

    #[test]
    fn empty_vocabulary_rejects_everything() {
        let vocab = Vocabulary::empty();
        assert!(!vocab.is_word("anything"));
        assert!(vocab.swahili_phonemes().is_empty());
        assert!(vocab.english_phonemes().is_empty());
    }
}
