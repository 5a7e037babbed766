//! Channel model: distortion likelihoods layered over the prior rows.
//!
//! Each candidate is scored on two independent surfaces. The graphemic
//! score compares spellings, the phonemic score compares the invalid word
//! against the candidate's phoneme, and the posterior is their plain
//! average. Which formulas apply depends on the pool the candidate came
//! from: Swahili candidates are already phoneme strings and compare
//! directly, English candidates see the invalid word with its digits
//! expanded first. Rows keep the prior stage's order.

use tracing::debug_span;

use super::{language, ChannelRow, PriorRow};
use crate::candidates::CandidateSet;
use crate::graphemic::{
    probability_english_matches, probability_phonemes_match, probability_swahili_matches,
};
use crate::lexicon::Vocabulary;
use crate::ngram::NGramTable;
use crate::phonetic::{english_phoneme, expand_numerics, swahili_phoneme};
use crate::score::Score;

/// Channel rows for all corrections of `invalid`, priors from unigram
/// counts.
pub fn unigram_channel(
    vocab: &Vocabulary,
    unigrams: &NGramTable,
    invalid: &str,
) -> Vec<ChannelRow> {
    let _span = debug_span!("unigram_channel", invalid).entered();
    let invalid = invalid.to_lowercase();
    let set = CandidateSet::generate(vocab, &invalid);
    let corrections = set.all();
    channel_rows(language::unigram_rows(&corrections, unigrams), &set, &invalid)
}

/// Like [`unigram_channel`], keeping only the `top_n` highest posteriors
/// when `0 < top_n < len`.
pub fn unigram_channel_ranked(
    vocab: &Vocabulary,
    unigrams: &NGramTable,
    invalid: &str,
    top_n: usize,
) -> Vec<ChannelRow> {
    let mut rows = unigram_channel(vocab, unigrams, invalid);
    super::rank(&mut rows, top_n, |row| row.posterior.text());
    rows
}

pub fn bigram_channel(
    vocab: &Vocabulary,
    unigrams: &NGramTable,
    bigrams: &NGramTable,
    invalid: &str,
    preceding: &str,
) -> Vec<ChannelRow> {
    let _span = debug_span!("bigram_channel", invalid, preceding).entered();
    let invalid = invalid.to_lowercase();
    let preceding = preceding.to_lowercase();
    let set = CandidateSet::generate(vocab, &invalid);
    let corrections = set.all();
    channel_rows(
        language::bigram_rows(&corrections, unigrams, bigrams, &preceding),
        &set,
        &invalid,
    )
}

pub fn bigram_channel_ranked(
    vocab: &Vocabulary,
    unigrams: &NGramTable,
    bigrams: &NGramTable,
    invalid: &str,
    preceding: &str,
    top_n: usize,
) -> Vec<ChannelRow> {
    let mut rows = bigram_channel(vocab, unigrams, bigrams, invalid, preceding);
    super::rank(&mut rows, top_n, |row| row.posterior.text());
    rows
}

pub fn trigram_channel(
    vocab: &Vocabulary,
    bigrams: &NGramTable,
    trigrams: &NGramTable,
    invalid: &str,
    preceding: &str,
    preceding_preceding: &str,
) -> Vec<ChannelRow> {
    let _span = debug_span!("trigram_channel", invalid, preceding, preceding_preceding).entered();
    let invalid = invalid.to_lowercase();
    let preceding = preceding.to_lowercase();
    let preceding_preceding = preceding_preceding.to_lowercase();
    let set = CandidateSet::generate(vocab, &invalid);
    let corrections = set.all();
    channel_rows(
        language::trigram_rows(
            &corrections,
            bigrams,
            trigrams,
            &preceding,
            &preceding_preceding,
        ),
        &set,
        &invalid,
    )
}

pub fn trigram_channel_ranked(
    vocab: &Vocabulary,
    bigrams: &NGramTable,
    trigrams: &NGramTable,
    invalid: &str,
    preceding: &str,
    preceding_preceding: &str,
    top_n: usize,
) -> Vec<ChannelRow> {
    let mut rows = trigram_channel(
        vocab,
        bigrams,
        trigrams,
        invalid,
        preceding,
        preceding_preceding,
    );
    super::rank(&mut rows, top_n, |row| row.posterior.text());
    rows
}

pub(crate) fn channel_rows(
    priors: Vec<PriorRow>,
    set: &CandidateSet,
    invalid: &str,
) -> Vec<ChannelRow> {
    priors
        .into_iter()
        .map(|row| {
            let (graphemic, phonemic) = distortion(set, invalid, &row.word);
            // The posterior averages the raw likelihoods, not the printed
            // five-digit values.
            let posterior = Score::new((graphemic + phonemic) / 2.0);
            ChannelRow {
                word: row.word,
                gram: row.gram,
                context: row.context,
                frequency: row.frequency,
                prior: row.prior,
                graphemic: Score::new(graphemic),
                phonemic: Score::new(phonemic),
                posterior,
            }
        })
        .collect()
}

fn distortion(set: &CandidateSet, invalid: &str, candidate: &str) -> (f64, f64) {
    if set.is_swahili(candidate) {
        let graphemic = probability_swahili_matches(invalid, candidate);
        let phonemic = probability_phonemes_match(invalid, &swahili_phoneme(candidate));
        (graphemic, phonemic)
    } else {
        let expanded = expand_numerics(invalid);
        let graphemic = probability_english_matches(&expanded, candidate);
        let phonemic = probability_phonemes_match(&expanded, &english_phoneme(candidate));
        (graphemic, phonemic)
    }
}
