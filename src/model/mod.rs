//! The correction-ranking stages.
//!
//! [`language`] assigns each candidate a smoothed prior from corpus counts,
//! [`channel`] scores how plausibly the misspelling distorts each candidate,
//! and [`noisy`] averages the rounded pair and ranks. [`explain`] bundles
//! one word's full scoring into a serializable report.
//!
//! Ranked variants compare the five-digit printed score strings, not the
//! raw values; rows carry [`Score`] so the printed form survives each stage.

pub mod channel;
pub mod explain;
pub mod language;
pub mod noisy;

use serde::Serialize;

use crate::score::Score;

/// One candidate scored by the language model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorRow {
    pub word: String,
    /// The n-gram the count was read from; absent at the unigram order.
    pub gram: Option<String>,
    /// The context bigram whose count anchors the trigram denominator.
    pub context: Option<String>,
    pub frequency: u64,
    pub prior: Score,
}

/// A [`PriorRow`] extended with the channel model's distortion scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelRow {
    pub word: String,
    pub gram: Option<String>,
    pub context: Option<String>,
    pub frequency: u64,
    pub prior: Score,
    pub graphemic: Score,
    pub phonemic: Score,
    pub posterior: Score,
}

/// The combined stage's output: prior, posterior, and their average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoisyRow {
    pub word: String,
    pub prior: Score,
    pub posterior: Score,
    pub combined: Score,
}

/// Descending sort by printed score, then truncate, only when
/// `0 < top_n < len`; any other `top_n` passes the rows through untouched.
/// The sort is stable, so rows with equal printed scores keep their
/// incoming order.
pub(crate) fn rank<T>(rows: &mut Vec<T>, top_n: usize, score: impl Fn(&T) -> &str) {
    if top_n > 0 && top_n < rows.len() {
        rows.sort_by(|a, b| score(b).cmp(score(a)));
        rows.truncate(top_n);
    }
}
