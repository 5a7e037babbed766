//! Prior probabilities over candidate corrections from n-gram counts.
//!
//! Each order shares one smoothing scheme: a candidate whose gram was never
//! counted gets `(count + d) / (base + zero_count * d)` where `d` is the
//! configured discount and `zero_count` is the number of candidates in the
//! batch with a zero count; a counted candidate gets `1 / (base +
//! zero_count)`. The base is the unigram table size, the preceding word's
//! unigram count, or the context bigram's count, by order. The two branches
//! deliberately disagree about scaling `zero_count`.

use tracing::debug_span;

use super::{rank, PriorRow};
use crate::candidates;
use crate::lexicon::Vocabulary;
use crate::ngram::{bigram_key, trigram_key, NGramTable};
use crate::score::Score;
use crate::settings::settings;

/// Prior rows for all corrections of `invalid`, from unigram counts,
/// sorted by candidate word.
pub fn unigram_priors(vocab: &Vocabulary, unigrams: &NGramTable, invalid: &str) -> Vec<PriorRow> {
    let _span = debug_span!("unigram_priors", invalid).entered();
    let invalid = invalid.to_lowercase();
    let corrections = candidates::candidate_corrections(vocab, &invalid);
    unigram_rows(&corrections, unigrams)
}

/// Like [`unigram_priors`], keeping only the `top_n` highest-scored rows
/// when `0 < top_n < len`.
pub fn unigram_priors_ranked(
    vocab: &Vocabulary,
    unigrams: &NGramTable,
    invalid: &str,
    top_n: usize,
) -> Vec<PriorRow> {
    let mut rows = unigram_priors(vocab, unigrams, invalid);
    rank(&mut rows, top_n, |row| row.prior.text());
    rows
}

/// Prior rows from bigram counts over `preceding + candidate`.
pub fn bigram_priors(
    vocab: &Vocabulary,
    unigrams: &NGramTable,
    bigrams: &NGramTable,
    invalid: &str,
    preceding: &str,
) -> Vec<PriorRow> {
    let _span = debug_span!("bigram_priors", invalid, preceding).entered();
    let invalid = invalid.to_lowercase();
    let preceding = preceding.to_lowercase();
    let corrections = candidates::candidate_corrections(vocab, &invalid);
    bigram_rows(&corrections, unigrams, bigrams, &preceding)
}

pub fn bigram_priors_ranked(
    vocab: &Vocabulary,
    unigrams: &NGramTable,
    bigrams: &NGramTable,
    invalid: &str,
    preceding: &str,
    top_n: usize,
) -> Vec<PriorRow> {
    let mut rows = bigram_priors(vocab, unigrams, bigrams, invalid, preceding);
    rank(&mut rows, top_n, |row| row.prior.text());
    rows
}

/// Prior rows from trigram counts over the two preceding words and the
/// candidate.
pub fn trigram_priors(
    vocab: &Vocabulary,
    bigrams: &NGramTable,
    trigrams: &NGramTable,
    invalid: &str,
    preceding: &str,
    preceding_preceding: &str,
) -> Vec<PriorRow> {
    let _span = debug_span!("trigram_priors", invalid, preceding, preceding_preceding).entered();
    let invalid = invalid.to_lowercase();
    let preceding = preceding.to_lowercase();
    let preceding_preceding = preceding_preceding.to_lowercase();
    let corrections = candidates::candidate_corrections(vocab, &invalid);
    trigram_rows(
        &corrections,
        bigrams,
        trigrams,
        &preceding,
        &preceding_preceding,
    )
}

pub fn trigram_priors_ranked(
    vocab: &Vocabulary,
    bigrams: &NGramTable,
    trigrams: &NGramTable,
    invalid: &str,
    preceding: &str,
    preceding_preceding: &str,
    top_n: usize,
) -> Vec<PriorRow> {
    let mut rows = trigram_priors(
        vocab,
        bigrams,
        trigrams,
        invalid,
        preceding,
        preceding_preceding,
    );
    rank(&mut rows, top_n, |row| row.prior.text());
    rows
}

pub(crate) fn unigram_rows(corrections: &[String], unigrams: &NGramTable) -> Vec<PriorRow> {
    let base = unigrams.len() as u64;
    let zero_count = corrections
        .iter()
        .filter(|word| unigrams.count(word) == 0)
        .count();

    let mut rows: Vec<PriorRow> = corrections
        .iter()
        .map(|word| {
            let count = unigrams.count(word);
            PriorRow {
                word: word.clone(),
                gram: None,
                context: None,
                frequency: count,
                prior: Score::new(smoothed_prior(count, base, zero_count)),
            }
        })
        .collect();
    rows.sort_by(|a, b| a.word.cmp(&b.word));
    rows
}

pub(crate) fn bigram_rows(
    corrections: &[String],
    unigrams: &NGramTable,
    bigrams: &NGramTable,
    preceding: &str,
) -> Vec<PriorRow> {
    let base = unigrams.count(preceding);
    let zero_count = corrections
        .iter()
        .filter(|word| bigrams.count(&bigram_key(preceding, word)) == 0)
        .count();

    let mut rows: Vec<PriorRow> = corrections
        .iter()
        .map(|word| {
            let gram = bigram_key(preceding, word);
            let count = bigrams.count(&gram);
            PriorRow {
                word: word.clone(),
                gram: Some(gram),
                context: None,
                frequency: count,
                prior: Score::new(smoothed_prior(count, base, zero_count)),
            }
        })
        .collect();
    rows.sort_by(|a, b| a.word.cmp(&b.word));
    rows
}

pub(crate) fn trigram_rows(
    corrections: &[String],
    bigrams: &NGramTable,
    trigrams: &NGramTable,
    preceding: &str,
    preceding_preceding: &str,
) -> Vec<PriorRow> {
    let context = bigram_key(preceding_preceding, preceding);
    let base = bigrams.count(&context);
    let zero_count = corrections
        .iter()
        .filter(|word| trigrams.count(&trigram_key(preceding_preceding, preceding, word)) == 0)
        .count();

    let mut rows: Vec<PriorRow> = corrections
        .iter()
        .map(|word| {
            let gram = trigram_key(preceding_preceding, preceding, word);
            let count = trigrams.count(&gram);
            PriorRow {
                word: word.clone(),
                gram: Some(gram),
                context: Some(context.clone()),
                frequency: count,
                prior: Score::new(smoothed_prior(count, base, zero_count)),
            }
        })
        .collect();
    rows.sort_by(|a, b| a.word.cmp(&b.word));
    rows
}

fn smoothed_prior(count: u64, base: u64, zero_count: usize) -> f64 {
    let discount = settings().language_model.zero_count_discount;
    if count == 0 {
        (count as f64 + discount) / (base as f64 + zero_count as f64 * discount)
    } else {
        1.0 / (base as f64 + zero_count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn table(entries: &[(&str, u64)]) -> NGramTable {
        NGramTable::new(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<HashMap<_, _>>(),
        )
    }

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn all_counted_batch_splits_table_size() {
        let unigrams = table(&[("go", 10), ("goat", 2)]);
        let rows = unigram_rows(&words(&["go", "goat"]), &unigrams);
        assert_eq!(rows[0].word, "go");
        assert_eq!(rows[0].frequency, 10);
        assert_eq!(rows[0].prior.text(), "0.50000");
        assert_eq!(rows[1].prior.text(), "0.50000");
    }

    #[test]
    fn zero_count_discount_applies_batch_wide() {
        let unigrams = table(&[("go", 10), ("goat", 2)]);
        let rows = unigram_rows(&words(&["go", "goat", "goad"]), &unigrams);
        let by_word = |w: &str| rows.iter().find(|r| r.word == w).unwrap();
        assert_eq!(by_word("goad").prior.text(), "0.20000");
        assert_eq!(by_word("goad").frequency, 0);
        assert_eq!(by_word("go").prior.text(), "0.33333");
        assert_eq!(by_word("goat").prior.text(), "0.33333");
    }

    #[test]
    fn rows_sort_alphabetically() {
        let unigrams = table(&[]);
        let rows = unigram_rows(&words(&["zebra", "apple", "mango"]), &unigrams);
        let order: Vec<&str> = rows.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(order, ["apple", "mango", "zebra"]);
    }

    #[test]
    fn duplicate_corrections_keep_their_rows() {
        // A word can land in both candidate pools; both entries count
        // toward the batch and both rows survive.
        let unigrams = table(&[("go", 1)]);
        let rows = unigram_rows(&words(&["go", "go"]), &unigrams);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].prior.text(), rows[1].prior.text());
    }

    #[test]
    fn ranked_truncates_inside_guard_only() {
        let unigrams = table(&[("go", 10)]);
        let corrections = words(&["go", "goat", "goad"]);

        let mut ranked = unigram_rows(&corrections, &unigrams);
        rank(&mut ranked, 2, |row| row.prior.text());
        let order: Vec<&str> = ranked.iter().map(|r| r.word.as_str()).collect();
        // "go" is counted (0.33333); the other two share 0.25000 and keep
        // their alphabetical order through the stable sort.
        assert_eq!(order, ["go", "goad"]);

        for pass_through in [0, 3, 5] {
            let mut rows = unigram_rows(&corrections, &unigrams);
            rank(&mut rows, pass_through, |row| row.prior.text());
            let order: Vec<&str> = rows.iter().map(|r| r.word.as_str()).collect();
            assert_eq!(order, ["go", "goad", "goat"], "top_n={pass_through}");
        }
    }

    #[test]
    fn equal_printed_scores_tie_despite_raw_difference() {
        // Two raw values that round to the same five digits compare equal
        // as strings; the stable sort leaves the alphabetical order alone
        // even though their raw values would reorder.
        let mut rows = vec![
            PriorRow {
                word: "alpha".to_string(),
                gram: None,
                context: None,
                frequency: 0,
                prior: Score::new(0.333_331),
            },
            PriorRow {
                word: "beta".to_string(),
                gram: None,
                context: None,
                frequency: 0,
                prior: Score::new(0.333_334),
            },
        ];
        assert!(rows[0].prior.value() < rows[1].prior.value());
        rank(&mut rows, 1, |row| row.prior.text());
        assert_eq!(rows[0].word, "alpha");
    }

    #[test]
    fn bigram_base_is_preceding_word_count() {
        let unigrams = table(&[("nina", 4)]);
        let bigrams = table(&[("nina kuja", 3)]);
        let rows = bigram_rows(&words(&["kuja", "kula"]), &unigrams, &bigrams, "nina");
        let by_word = |w: &str| rows.iter().find(|r| r.word == w).unwrap();

        let kuja = by_word("kuja");
        assert_eq!(kuja.gram.as_deref(), Some("nina kuja"));
        assert_eq!(kuja.frequency, 3);
        assert_eq!(kuja.prior.text(), "0.20000");

        let kula = by_word("kula");
        assert_eq!(kula.frequency, 0);
        assert_eq!(kula.prior.text(), "0.11111");
    }

    #[test]
    fn trigram_base_is_context_bigram_count() {
        let bigrams = table(&[("mimi nina", 2)]);
        let trigrams = table(&[("mimi nina kuja", 1)]);
        let rows = trigram_rows(&words(&["kuja", "kula"]), &bigrams, &trigrams, "nina", "mimi");
        let by_word = |w: &str| rows.iter().find(|r| r.word == w).unwrap();

        let kuja = by_word("kuja");
        assert_eq!(kuja.gram.as_deref(), Some("mimi nina kuja"));
        assert_eq!(kuja.context.as_deref(), Some("mimi nina"));
        assert_eq!(kuja.prior.text(), "0.33333");

        assert_eq!(by_word("kula").prior.text(), "0.20000");
    }

    #[test]
    fn unknown_context_still_scores() {
        // A preceding word missing from the unigram table gives base 0;
        // the discount alone carries the probability.
        let unigrams = table(&[]);
        let bigrams = table(&[]);
        let rows = bigram_rows(&words(&["kuja"]), &unigrams, &bigrams, "sijui");
        assert_eq!(rows[0].prior.text(), "1.00000");
    }

    #[test]
    fn counted_gram_over_missing_base_goes_infinite() {
        // The division is left unguarded: a counted bigram whose preceding
        // word never made the unigram table divides by zero, and "inf"
        // outranks any digit string.
        let unigrams = table(&[]);
        let bigrams = table(&[("nina kuja", 3)]);
        let rows = bigram_rows(&words(&["kuja"]), &unigrams, &bigrams, "nina");
        assert!(rows[0].prior.value().is_infinite());
        assert_eq!(rows[0].prior.text(), "inf");
    }
}
