//! Diagnostic breakdown of a single correction query.
//!
//! Runs the full pipeline for one invalid word and keeps every
//! intermediate the production entry points throw away: both candidate
//! pools and the per-candidate score columns from all three stages.

use serde::Serialize;

use crate::candidates::CandidateSet;
use crate::lexicon::Vocabulary;
use crate::ngram::NGramTable;
use crate::score::Score;

use super::{channel, language, noisy};

/// Full diagnostic result for one invalid word.
#[derive(Debug, Serialize)]
pub struct ExplainResult {
    pub word: String,
    /// Preceding words, sentence order, most recent last.
    pub context: Vec<String>,
    pub swahili_candidates: Vec<String>,
    pub english_candidates: Vec<String>,
    pub rows: Vec<ExplainRow>,
}

/// One candidate with its complete score breakdown.
#[derive(Debug, Serialize)]
pub struct ExplainRow {
    pub word: String,
    /// The n-gram the frequency was read from; absent at the unigram order.
    pub gram: Option<String>,
    pub frequency: u64,
    pub prior: Score,
    pub graphemic: Score,
    pub phonemic: Score,
    pub posterior: Score,
    pub combined: Score,
}

/// Score every correction of `word` and capture the intermediate columns.
/// The context length picks the model order: none for unigram, one
/// preceding word for bigram, two or more for trigram. Rows come back
/// sorted by combined score, truncated to `top_n` when `0 < top_n < len`.
pub fn explain(
    vocab: &Vocabulary,
    unigrams: &NGramTable,
    bigrams: &NGramTable,
    trigrams: &NGramTable,
    word: &str,
    context: &[String],
    top_n: usize,
) -> ExplainResult {
    let word = word.to_lowercase();
    let context: Vec<String> = context.iter().map(|w| w.to_lowercase()).collect();

    let set = CandidateSet::generate(vocab, &word);
    let corrections = set.all();

    let priors = match context.len() {
        0 => language::unigram_rows(&corrections, unigrams),
        1 => language::bigram_rows(&corrections, unigrams, bigrams, &context[0]),
        n => language::trigram_rows(
            &corrections,
            bigrams,
            trigrams,
            &context[n - 1],
            &context[n - 2],
        ),
    };

    let mut rows: Vec<ExplainRow> = channel::channel_rows(priors, &set, &word)
        .into_iter()
        .map(|row| {
            let combined = noisy::combine(&row.prior, &row.posterior);
            ExplainRow {
                word: row.word,
                gram: row.gram,
                frequency: row.frequency,
                prior: row.prior,
                graphemic: row.graphemic,
                phonemic: row.phonemic,
                posterior: row.posterior,
                combined,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.combined.text().cmp(a.combined.text()));
    if top_n > 0 && top_n < rows.len() {
        rows.truncate(top_n);
    }

    ExplainResult {
        word,
        context,
        swahili_candidates: set.swahili().to_vec(),
        english_candidates: set.english().to_vec(),
        rows,
    }
}

/// Format an ExplainResult as human-readable text.
pub fn format_text(result: &ExplainResult) -> String {
    use unicode_width::UnicodeWidthStr;
    let mut out = String::new();

    out.push_str(&format!("=== Corrections for \"{}\" ===\n", result.word));
    if !result.context.is_empty() {
        out.push_str(&format!("  context: {}\n", result.context.join(" ")));
    }
    out.push_str(&format!(
        "  Swahili pool ({}): {}\n",
        result.swahili_candidates.len(),
        result.swahili_candidates.join(", "),
    ));
    out.push_str(&format!(
        "  English pool ({}): {}\n",
        result.english_candidates.len(),
        result.english_candidates.join(", "),
    ));

    if result.rows.is_empty() {
        out.push_str("\nNo corrections found.\n");
        return out;
    }

    out.push_str(&format!("\n=== Scores ({}) ===\n", result.rows.len()));
    for (i, row) in result.rows.iter().enumerate() {
        let pad_width = 16;
        let display_width = UnicodeWidthStr::width(row.word.as_str());
        let padded = if display_width < pad_width {
            format!("{}{}", row.word, " ".repeat(pad_width - display_width))
        } else {
            row.word.clone()
        };
        out.push_str(&format!(
            "  #{:<2} {} freq={:<6} prior={} graph={} phon={} post={} -> combined={}\n",
            i + 1,
            padded,
            row.frequency,
            row.prior,
            row.graphemic,
            row.phonemic,
            row.posterior,
            row.combined,
        ));
        if let Some(gram) = &row.gram {
            out.push_str(&format!("       gram \"{}\"\n", gram));
        }
    }

    out
}
