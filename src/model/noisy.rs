//! Noisy-channel combination of prior and posterior.
//!
//! The combined score averages the two five-digit printed values, not the
//! raw floats underneath them. Ranking here differs from the earlier
//! stages: rows are re-sorted by combined score whenever a rank is
//! requested, and the `top_n` guard only decides whether the sorted list
//! is truncated.

use tracing::debug_span;

use super::{channel, ChannelRow, NoisyRow};
use crate::lexicon::Vocabulary;
use crate::ngram::NGramTable;
use crate::score::Score;

/// Combined scores for all corrections of `invalid`, priors from unigram
/// counts. Rows keep the channel stage's order.
pub fn unigram_noisy(vocab: &Vocabulary, unigrams: &NGramTable, invalid: &str) -> Vec<NoisyRow> {
    let _span = debug_span!("unigram_noisy", invalid).entered();
    noisy_rows(channel::unigram_channel(vocab, unigrams, invalid))
}

/// Like [`unigram_noisy`], sorted by combined score; truncated to `top_n`
/// rows when `0 < top_n < len`.
pub fn unigram_noisy_ranked(
    vocab: &Vocabulary,
    unigrams: &NGramTable,
    invalid: &str,
    top_n: usize,
) -> Vec<NoisyRow> {
    let mut rows = unigram_noisy(vocab, unigrams, invalid);
    rank(&mut rows, top_n);
    rows
}

pub fn bigram_noisy(
    vocab: &Vocabulary,
    unigrams: &NGramTable,
    bigrams: &NGramTable,
    invalid: &str,
    preceding: &str,
) -> Vec<NoisyRow> {
    let _span = debug_span!("bigram_noisy", invalid, preceding).entered();
    noisy_rows(channel::bigram_channel(
        vocab, unigrams, bigrams, invalid, preceding,
    ))
}

pub fn bigram_noisy_ranked(
    vocab: &Vocabulary,
    unigrams: &NGramTable,
    bigrams: &NGramTable,
    invalid: &str,
    preceding: &str,
    top_n: usize,
) -> Vec<NoisyRow> {
    let mut rows = bigram_noisy(vocab, unigrams, bigrams, invalid, preceding);
    rank(&mut rows, top_n);
    rows
}

pub fn trigram_noisy(
    vocab: &Vocabulary,
    bigrams: &NGramTable,
    trigrams: &NGramTable,
    invalid: &str,
    preceding: &str,
    preceding_preceding: &str,
) -> Vec<NoisyRow> {
    let _span = debug_span!("trigram_noisy", invalid, preceding, preceding_preceding).entered();
    noisy_rows(channel::trigram_channel(
        vocab,
        bigrams,
        trigrams,
        invalid,
        preceding,
        preceding_preceding,
    ))
}

pub fn trigram_noisy_ranked(
    vocab: &Vocabulary,
    bigrams: &NGramTable,
    trigrams: &NGramTable,
    invalid: &str,
    preceding: &str,
    preceding_preceding: &str,
    top_n: usize,
) -> Vec<NoisyRow> {
    let mut rows = trigram_noisy(
        vocab,
        bigrams,
        trigrams,
        invalid,
        preceding,
        preceding_preceding,
    );
    rank(&mut rows, top_n);
    rows
}

pub(crate) fn noisy_rows(channel: Vec<ChannelRow>) -> Vec<NoisyRow> {
    channel
        .into_iter()
        .map(|row| {
            let combined = combine(&row.prior, &row.posterior);
            NoisyRow {
                word: row.word,
                prior: row.prior,
                posterior: row.posterior,
                combined,
            }
        })
        .collect()
}

/// Average of the two printed five-digit values, not the raw floats.
pub(crate) fn combine(prior: &Score, posterior: &Score) -> Score {
    Score::new((prior.rounded() + posterior.rounded()) / 2.0)
}

/// Sort happens unconditionally; only the truncation sits behind the
/// guard, so a pass-through rank still reorders the rows.
fn rank(rows: &mut Vec<NoisyRow>, top_n: usize) {
    rows.sort_by(|a, b| b.combined.text().cmp(a.combined.text()));
    if top_n > 0 && top_n < rows.len() {
        rows.truncate(top_n);
    }
}
