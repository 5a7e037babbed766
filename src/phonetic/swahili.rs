//! The Swahili grapheme-to-phoneme rules.
//!
//! Swahili orthography is close to phonemic already; only three Arabic-loan
//! digraphs need collapsing, and only their first occurrence is rewritten.

/// Convert a Swahili word (lowercased by the caller) to its phoneme.
pub fn swahili_phoneme(word: &str) -> String {
    let mut out = word.to_string();

    // 'dh' as in dhamini, dhahabu
    if let Some(p) = out.find("dh") {
        out.replace_range(p..p + 2, "th");
    }
    // 'kh' as in alkhamisi
    if let Some(p) = out.find("kh") {
        out.replace_range(p..p + 2, "k");
    }
    // 'gh' as in lugha, ghorofa
    if let Some(p) = out.find("gh") {
        out.replace_range(p..p + 2, "g");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digraphs_collapse() {
        assert_eq!(swahili_phoneme("dhamini"), "thamini");
        assert_eq!(swahili_phoneme("alkhamisi"), "alkamisi");
        assert_eq!(swahili_phoneme("lugha"), "luga");
    }

    #[test]
    fn only_first_occurrence_rewrites() {
        assert_eq!(swahili_phoneme("ghafla ghafla"), "gafla ghafla");
    }

    #[test]
    fn plain_words_unchanged() {
        assert_eq!(swahili_phoneme("piga"), "piga");
        assert_eq!(swahili_phoneme("soma"), "soma");
    }
}
