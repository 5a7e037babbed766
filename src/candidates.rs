//! Candidate generation for invalid words.
//!
//! Two pools feed the correction models. The Swahili pool holds phonemic
//! transcriptions of vocabulary words within one edit of the misspelling
//! whose consonant skeleton matches it. The English pool holds dictionary
//! words and morphemes reached through graphemic predicates, plus words
//! reached through their phonemes and phonetic codes. Both pools are
//! deduplicated in first-seen vocabulary order.

use std::collections::HashSet;

use tracing::{debug, debug_span};

use crate::graphemic;
use crate::lexicon::Vocabulary;
use crate::metrics;
use crate::phonetic;
use crate::settings::settings;

/// Both candidate pools for one invalid word.
pub struct CandidateSet {
    swahili: Vec<String>,
    english: Vec<String>,
}

impl CandidateSet {
    /// Generate both pools for an invalid word.
    pub fn generate(vocab: &Vocabulary, invalid: &str) -> CandidateSet {
        let _span = debug_span!("generate_candidates", invalid).entered();
        let set = CandidateSet {
            swahili: swahili_candidates(vocab, invalid),
            english: english_candidates(vocab, invalid),
        };
        debug!(
            swahili_count = set.swahili.len(),
            english_count = set.english.len()
        );
        set
    }

    pub fn swahili(&self) -> &[String] {
        &self.swahili
    }

    pub fn english(&self) -> &[String] {
        &self.english
    }

    /// True when the candidate came from the Swahili pool. Decides which
    /// distortion branch the channel model takes.
    pub fn is_swahili(&self, candidate: &str) -> bool {
        self.swahili.iter().any(|c| c == candidate)
    }

    pub fn len(&self) -> usize {
        self.swahili.len() + self.english.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swahili.is_empty() && self.english.is_empty()
    }

    /// Swahili pool first, then English. A word present in both pools
    /// appears twice; within a pool it appears once.
    pub fn all(&self) -> Vec<String> {
        let mut all = self.swahili.clone();
        all.extend_from_slice(&self.english);
        all
    }

    /// Consuming variant of [`CandidateSet::all`].
    pub fn into_all(self) -> Vec<String> {
        let mut all = self.swahili;
        all.extend(self.english);
        all
    }
}

/// Swahili corrections for an invalid word: the phonemic transcriptions of
/// vocabulary words (lexicon, then verbs, then adjectives) within
/// `candidates.max_edit_distance` of the lowercased input whose consonant
/// skeleton equals the input's, case-insensitively.
pub fn swahili_candidates(vocab: &Vocabulary, invalid: &str) -> Vec<String> {
    let invalid = invalid.to_lowercase();
    let max_distance = settings().candidates.max_edit_distance;
    let invalid_skeleton = graphemic::consonant_skeleton(&invalid);

    let mut candidates = Vec::new();
    let mut seen = HashSet::new();
    for phoneme in vocab.swahili_phonemes() {
        if metrics::edit_distance(&invalid, phoneme) <= max_distance
            && invalid_skeleton.eq_ignore_ascii_case(&graphemic::consonant_skeleton(phoneme))
            && seen.insert(phoneme.clone())
        {
            candidates.push(phoneme.clone());
        }
    }
    candidates
}

/// English corrections for an invalid word.
///
/// The input is lowercased and its numeric homophones expanded; its phoneme
/// and its phonetic code (taken from the expanded grapheme, not the
/// phoneme) anchor the phonetic predicates. A dictionary word qualifies
/// when the input is a subsequence of it, when it is within one edit and
/// starts with the same letter, or when it contains an input longer than
/// two characters. A morpheme qualifies on the subsequence test alone.
/// A dictionary word also qualifies through its phoneme: subsequence or
/// near-miss against the input, or a Jaro-Winkler match between the
/// phonetic codes, both anchored on the phonemes' first letters.
pub fn english_candidates(vocab: &Vocabulary, invalid: &str) -> Vec<String> {
    let invalid = invalid.to_lowercase();
    let preprocess = phonetic::expand_numerics(&invalid);
    let input_phoneme = phonetic::english_phoneme(&preprocess);
    let input_code = phonetic::phonetic_code(&preprocess);
    let preprocess_len = preprocess.chars().count();
    let cfg = &settings().candidates;

    let mut candidates = Vec::new();
    let mut seen = HashSet::new();

    for word in vocab.english_words() {
        let subsequence = metrics::lcs_length(&preprocess, word) == preprocess_len;
        let near_miss = metrics::edit_distance(&preprocess, word) <= cfg.max_edit_distance
            && same_first_char(&preprocess, word);
        let abbreviation = preprocess_len > 2 && word.contains(preprocess.as_str());
        if (subsequence || near_miss || abbreviation) && seen.insert(word.clone()) {
            candidates.push(word.clone());
        }
    }

    for morpheme in vocab.english_morphemes() {
        if metrics::lcs_length(&preprocess, morpheme) == preprocess_len
            && seen.insert(morpheme.clone())
        {
            candidates.push(morpheme.clone());
        }
    }

    let words = vocab.english_words();
    let phonemes = vocab.english_phonemes();
    let codes = vocab.english_codes();
    for ((word, phoneme), code) in words.iter().zip(phonemes).zip(codes) {
        let subsequence = metrics::lcs_length(&preprocess, phoneme) == preprocess_len;
        let near_miss = metrics::edit_distance(&preprocess, phoneme) <= cfg.max_edit_distance
            && same_first_char(phoneme, &input_phoneme);
        let code_match = metrics::jaro_winkler(&input_code, code)
            >= cfg.jaro_threshold_for(word.chars().count())
            && same_first_char(phoneme, &input_phoneme);
        if (subsequence || near_miss || code_match) && seen.insert(word.clone()) {
            candidates.push(word.clone());
        }
    }

    candidates
}

/// All corrections for an invalid word: the Swahili pool first, then the
/// English pool.
pub fn candidate_corrections(vocab: &Vocabulary, invalid: &str) -> Vec<String> {
    CandidateSet::generate(vocab, invalid).into_all()
}

fn same_first_char(a: &str, b: &str) -> bool {
    match (a.chars().next(), b.chars().next()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}
