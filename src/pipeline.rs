//! The engine facade and the sentence normalizer built on it.
//!
//! [`Engine`] owns the vocabulary and n-gram tables and exposes every
//! query operation behind `&self`; construction is infallible and empty
//! resources simply make every word out-of-vocabulary. The normalizer
//! walks a sentence segment by segment: separators and non-correctable
//! tokens pass through verbatim, known-good words are kept as typed, and
//! the rest run through the repair ladder of code-mixing normalization,
//! typo repair, and the noisy-channel model.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug_span;

use crate::candidates;
use crate::graphemic;
use crate::lexicon::Vocabulary;
use crate::model::{channel, explain, language, noisy};
use crate::model::{ChannelRow, NoisyRow, PriorRow};
use crate::ngram::NGramTable;
use crate::phonetic;
use crate::resources::Resources;
use crate::tokenize::{tokenize, Segment};

pub struct Engine {
    vocabulary: Vocabulary,
    unigrams: NGramTable,
    bigrams: NGramTable,
    trigrams: NGramTable,
}

/// What the normalizer did with one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// Whitespace, punctuation, or symbols between words.
    Separator,
    /// A word segment no correction gate accepts (too short, digits only).
    Ungated,
    /// Already a dictionary word or a well-formed Swahili inflection.
    AlreadyValid,
    /// Rewritten by the code-mixing normalizer.
    WordMixing,
    /// Rewritten by morphological typo repair.
    TypoRepair,
    /// Replaced by the top noisy-channel candidate.
    BestCandidate,
    /// Nothing matched; the token went through unchanged.
    NoCandidates,
}

/// One segment's decision, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenDecision {
    pub original: String,
    pub output: String,
    pub outcome: Outcome,
}

fn correction_gates() -> &'static [Regex; 3] {
    static GATES: OnceLock<[Regex; 3]> = OnceLock::new();
    GATES.get_or_init(|| {
        [
            Regex::new(r"^[a-zA-Z]{2,}$").expect("static pattern"),
            Regex::new(r"^[a-zA-Z]+[0-9][a-zA-Z]*$").expect("static pattern"),
            Regex::new(r"^[a-zA-Z]*[0-9][a-zA-Z]+$").expect("static pattern"),
        ]
    })
}

fn is_correction_target(token: &str) -> bool {
    correction_gates().iter().any(|gate| gate.is_match(token))
}

impl Engine {
    pub fn new(resources: Resources) -> Self {
        Self {
            vocabulary: Vocabulary::new(
                resources.english_words,
                resources.english_morphemes,
                resources.swahili_words,
                resources.swahili_verbs,
                resources.swahili_adjectives,
            ),
            unigrams: NGramTable::new(resources.unigrams),
            bigrams: NGramTable::new(resources.bigrams),
            trigrams: NGramTable::new(resources.trigrams),
        }
    }

    /// Correction candidates for `word`, Swahili pool first.
    pub fn candidate_corrections(&self, word: &str) -> Vec<String> {
        candidates::candidate_corrections(&self.vocabulary, word)
    }

    /// Membership across all five word lists.
    pub fn is_dictionary_word(&self, word: &str) -> bool {
        self.vocabulary.is_word(word)
    }

    /// Whether `word` is a well-formed Swahili inflection or agreed
    /// adjective over the loaded verb and adjective lists.
    pub fn is_valid_swahili(&self, word: &str) -> bool {
        graphemic::is_valid_swahili(
            word,
            self.vocabulary.swahili_verbs(),
            self.vocabulary.swahili_adjectives(),
        )
    }

    pub fn process_word_mixing(&self, word: &str) -> String {
        graphemic::process_word_mixing(word)
    }

    pub fn process_swahili_typos(&self, word: &str) -> String {
        graphemic::process_swahili_typos(word, self.vocabulary.swahili_verbs())
    }

    pub fn process_swahili_phonetics(&self, word: &str) -> String {
        phonetic::swahili_expand_numerics(word)
    }

    pub fn unigram_language_model(&self, word: &str) -> Vec<PriorRow> {
        language::unigram_priors(&self.vocabulary, &self.unigrams, word)
    }

    pub fn unigram_language_model_ranked(&self, word: &str, top_n: usize) -> Vec<PriorRow> {
        language::unigram_priors_ranked(&self.vocabulary, &self.unigrams, word, top_n)
    }

    pub fn bigram_language_model(&self, word: &str, preceding: &str) -> Vec<PriorRow> {
        language::bigram_priors(&self.vocabulary, &self.unigrams, &self.bigrams, word, preceding)
    }

    pub fn bigram_language_model_ranked(
        &self,
        word: &str,
        preceding: &str,
        top_n: usize,
    ) -> Vec<PriorRow> {
        language::bigram_priors_ranked(
            &self.vocabulary,
            &self.unigrams,
            &self.bigrams,
            word,
            preceding,
            top_n,
        )
    }

    pub fn trigram_language_model(
        &self,
        word: &str,
        preceding: &str,
        preceding_preceding: &str,
    ) -> Vec<PriorRow> {
        language::trigram_priors(
            &self.vocabulary,
            &self.bigrams,
            &self.trigrams,
            word,
            preceding,
            preceding_preceding,
        )
    }

    pub fn trigram_language_model_ranked(
        &self,
        word: &str,
        preceding: &str,
        preceding_preceding: &str,
        top_n: usize,
    ) -> Vec<PriorRow> {
        language::trigram_priors_ranked(
            &self.vocabulary,
            &self.bigrams,
            &self.trigrams,
            word,
            preceding,
            preceding_preceding,
            top_n,
        )
    }

    pub fn unigram_channel_model(&self, word: &str) -> Vec<ChannelRow> {
        channel::unigram_channel(&self.vocabulary, &self.unigrams, word)
    }

    pub fn unigram_channel_model_ranked(&self, word: &str, top_n: usize) -> Vec<ChannelRow> {
        channel::unigram_channel_ranked(&self.vocabulary, &self.unigrams, word, top_n)
    }

    pub fn bigram_channel_model(&self, word: &str, preceding: &str) -> Vec<ChannelRow> {
        channel::bigram_channel(&self.vocabulary, &self.unigrams, &self.bigrams, word, preceding)
    }

    pub fn bigram_channel_model_ranked(
        &self,
        word: &str,
        preceding: &str,
        top_n: usize,
    ) -> Vec<ChannelRow> {
        channel::bigram_channel_ranked(
            &self.vocabulary,
            &self.unigrams,
            &self.bigrams,
            word,
            preceding,
            top_n,
        )
    }

    pub fn trigram_channel_model(
        &self,
        word: &str,
        preceding: &str,
        preceding_preceding: &str,
    ) -> Vec<ChannelRow> {
        channel::trigram_channel(
            &self.vocabulary,
            &self.bigrams,
            &self.trigrams,
            word,
            preceding,
            preceding_preceding,
        )
    }

    pub fn trigram_channel_model_ranked(
        &self,
        word: &str,
        preceding: &str,
        preceding_preceding: &str,
        top_n: usize,
    ) -> Vec<ChannelRow> {
        channel::trigram_channel_ranked(
            &self.vocabulary,
            &self.bigrams,
            &self.trigrams,
            word,
            preceding,
            preceding_preceding,
            top_n,
        )
    }

    pub fn unigram_noisy_channel(&self, word: &str) -> Vec<NoisyRow> {
        noisy::unigram_noisy(&self.vocabulary, &self.unigrams, word)
    }

    pub fn unigram_noisy_channel_ranked(&self, word: &str, top_n: usize) -> Vec<NoisyRow> {
        noisy::unigram_noisy_ranked(&self.vocabulary, &self.unigrams, word, top_n)
    }

    pub fn bigram_noisy_channel(&self, word: &str, preceding: &str) -> Vec<NoisyRow> {
        noisy::bigram_noisy(&self.vocabulary, &self.unigrams, &self.bigrams, word, preceding)
    }

    pub fn bigram_noisy_channel_ranked(
        &self,
        word: &str,
        preceding: &str,
        top_n: usize,
    ) -> Vec<NoisyRow> {
        noisy::bigram_noisy_ranked(
            &self.vocabulary,
            &self.unigrams,
            &self.bigrams,
            word,
            preceding,
            top_n,
        )
    }

    pub fn trigram_noisy_channel(
        &self,
        word: &str,
        preceding: &str,
        preceding_preceding: &str,
    ) -> Vec<NoisyRow> {
        noisy::trigram_noisy(
            &self.vocabulary,
            &self.bigrams,
            &self.trigrams,
            word,
            preceding,
            preceding_preceding,
        )
    }

    pub fn trigram_noisy_channel_ranked(
        &self,
        word: &str,
        preceding: &str,
        preceding_preceding: &str,
        top_n: usize,
    ) -> Vec<NoisyRow> {
        noisy::trigram_noisy_ranked(
            &self.vocabulary,
            &self.bigrams,
            &self.trigrams,
            word,
            preceding,
            preceding_preceding,
            top_n,
        )
    }

    /// Full diagnostic for one word; see [`explain::explain`].
    pub fn explain(
        &self,
        word: &str,
        context: &[String],
        top_n: usize,
    ) -> explain::ExplainResult {
        explain::explain(
            &self.vocabulary,
            &self.unigrams,
            &self.bigrams,
            &self.trigrams,
            word,
            context,
            top_n,
        )
    }

    /// Normalize a sentence, emitting corrected words in place and
    /// everything else verbatim.
    pub fn normalize(&self, sentence: &str) -> String {
        self.normalize_verbose(sentence)
            .into_iter()
            .map(|decision| decision.output)
            .collect()
    }

    /// Like [`Engine::normalize`] but keeps the per-segment decisions.
    pub fn normalize_verbose(&self, sentence: &str) -> Vec<TokenDecision> {
        let _span = debug_span!("normalize").entered();
        tokenize(sentence)
            .into_iter()
            .map(|segment| self.decide(segment))
            .collect()
    }

    fn decide(&self, segment: Segment) -> TokenDecision {
        if !segment.is_word {
            return TokenDecision {
                original: segment.text.clone(),
                output: segment.text,
                outcome: Outcome::Separator,
            };
        }
        let token = segment.text;
        if !is_correction_target(&token) {
            return TokenDecision {
                original: token.clone(),
                output: token,
                outcome: Outcome::Ungated,
            };
        }
        if self.is_dictionary_word(&token) || self.is_valid_swahili(&token) {
            return TokenDecision {
                original: token.clone(),
                output: token,
                outcome: Outcome::AlreadyValid,
            };
        }

        let preprocessed = self.process_swahili_phonetics(&token);
        let mixed = self.process_word_mixing(&preprocessed);
        if mixed != preprocessed {
            return TokenDecision {
                original: token,
                output: mixed,
                outcome: Outcome::WordMixing,
            };
        }
        let repaired = self.process_swahili_typos(&preprocessed);
        if repaired != preprocessed {
            return TokenDecision {
                original: token,
                output: repaired,
                outcome: Outcome::TypoRepair,
            };
        }

        // The noisy-channel fallback scores the original token, not the
        // phonetics output; a phonetics-only change is never adopted.
        match self.unigram_noisy_channel_ranked(&token, 1).into_iter().next() {
            Some(row) => TokenDecision {
                original: token,
                output: row.word,
                outcome: Outcome::BestCandidate,
            },
            None => TokenDecision {
                original: token.clone(),
                output: token,
                outcome: Outcome::NoCandidates,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::mini_engine as engine;

    #[test]
    fn valid_words_keep_their_case() {
        let engine = engine();
        assert_eq!(engine.normalize("Hello leo"), "Hello leo");
    }

    #[test]
    fn separators_and_ungated_tokens_pass_through() {
        let engine = engine();
        // "a" is one letter, "2" has no letters; neither is gated.
        assert_eq!(engine.normalize("a!! ok 2"), "a!! ok 2");

        let decisions = engine.normalize_verbose("a!! ok 2");
        let outcomes: Vec<Outcome> = decisions.iter().map(|d| d.outcome).collect();
        assert_eq!(
            outcomes,
            [
                Outcome::Ungated,
                Outcome::Separator,
                Outcome::AlreadyValid,
                Outcome::Separator,
                Outcome::Ungated,
            ]
        );
    }

    #[test]
    fn mixing_wins_over_later_stages() {
        let engine = engine();
        let decisions = engine.normalize_verbose("anacookia");
        assert_eq!(decisions.len(), 1);
        assert_eq!(decisions[0].output, "anapikia");
        assert_eq!(decisions[0].outcome, Outcome::WordMixing);
    }

    #[test]
    fn typo_repair_fixes_inflected_verbs() {
        let engine = engine();
        let decisions = engine.normalize_verbose("anafnya");
        assert_eq!(decisions.len(), 1);
        assert_eq!(decisions[0].output, "anafanya");
        assert_eq!(decisions[0].outcome, Outcome::TypoRepair);
    }

    #[test]
    fn noisy_channel_replaces_unrepairable_tokens() {
        let engine = engine();
        assert_eq!(engine.normalize("kja leo"), "kuja leo");

        let decisions = engine.normalize_verbose("kja leo");
        assert_eq!(decisions[0].outcome, Outcome::BestCandidate);
        assert_eq!(decisions[2].outcome, Outcome::AlreadyValid);
    }

    #[test]
    fn unmatched_tokens_stay_as_typed() {
        let engine = engine();
        let decisions = engine.normalize_verbose("zzqq");
        assert_eq!(decisions[0].outcome, Outcome::NoCandidates);
        assert_eq!(decisions[0].output, "zzqq");
    }

    #[test]
    fn phonetics_change_alone_is_not_adopted() {
        let engine = engine();
        // "wali2sumbua" expands to "walitusumbua", but the mixing and typo
        // stages leave that expansion alone and the noisy-channel fallback
        // scores the original token, which has no candidates.
        let decisions = engine.normalize_verbose("wali2sumbua");
        assert_eq!(decisions[0].outcome, Outcome::NoCandidates);
        assert_eq!(decisions[0].output, "wali2sumbua");
    }

    #[test]
    fn numeric_tokens_are_gated_by_shape() {
        assert!(is_correction_target("hey"));
        assert!(is_correction_target("wa2"));
        assert!(is_correction_target("2dy"));
        assert!(is_correction_target("l8r"));
        assert!(!is_correction_target("a"));
        assert!(!is_correction_target("2"));
        assert!(!is_correction_target("24"));
        assert!(!is_correction_target("gr8!"));
    }

    #[test]
    fn model_delegates_share_the_engine_tables() {
        let engine = engine();
        let priors = engine.unigram_language_model("kja");
        assert_eq!(priors.len(), 1);
        // Sole unseen candidate over a two-entry table.
        assert_eq!(priors[0].prior.text(), "0.20000");

        let result = engine.explain("kja", &[], 0);
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].combined.text(), "0.53750");

        assert_eq!(engine.candidate_corrections("kja"), ["kuja"]);
    }

    #[test]
    fn empty_resources_degrade_gracefully() {
        let engine = Engine::new(Resources::default());
        assert!(!engine.is_dictionary_word("hello"));
        assert!(engine.candidate_corrections("kja").is_empty());
        assert_eq!(engine.normalize("kja leo"), "kja leo");
        assert_eq!(engine.normalize(""), "");
    }

    #[test]
    fn helper_stages_are_exposed_directly() {
        let engine = engine();
        assert!(engine.is_valid_swahili("fanyisha"));
        assert_eq!(engine.process_word_mixing("anacookia"), "anapikia");
        assert_eq!(engine.process_swahili_typos("anafnya"), "anafanya");
        assert_eq!(
            engine.process_swahili_phonetics("wali2sumbua"),
            "walitusumbua"
        );
    }
}
