//! Graphemic analysis of code-mixed SMS words.
//!
//! Everything that reasons about spelling shapes lives here: consonant
//! skeletons, Swahili morphological validity, English/Swahili mixing
//! normalization, typo repair over decomposed verb roots, and the
//! string-distortion likelihoods the channel model consumes.

use std::sync::OnceLock;

use regex::Regex;

use crate::metrics;
use crate::paradigm::LOAN_VERBS;
use crate::settings::settings;

/// Lowercase the word and strip the five plain vowels, keeping everything
/// else in order. "hello" becomes "hll".
pub fn consonant_skeleton(word: &str) -> String {
    word.to_lowercase()
        .chars()
        .filter(|c| !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
        .collect()
}

/// Affirmative verb inflection: subject prefix, tense marker, optional
/// object marker, then the root.
fn inflection_templates() -> &'static (Regex, Regex) {
    static TEMPLATES: OnceLock<(Regex, Regex)> = OnceLock::new();
    TEMPLATES.get_or_init(|| {
        (
            Regex::new(
                r"^(ni|wa|ki|vi|i|zi|pa|mwa|mwe|a|u)(ki|li|l|me|na|ta)(ni|ji|tu|m|wa|ki|vi|i|zi|po|ku|pa)?(\w+)$",
            )
            .expect("static pattern"),
            Regex::new(
                r"^(ha|si)(m|wa|li|ya|ki|vi|i|zi|u|pa)?(ku|ja|ta|i)(m|wa|ki|vi|i|zi|u|ku|tu)?(\w+)$",
            )
            .expect("static pattern"),
        )
    })
}

/// Looser variants used for mixing detection: the tense slot is optional so
/// forms like "zitago" still decompose.
fn mixing_templates() -> &'static (Regex, Regex) {
    static TEMPLATES: OnceLock<(Regex, Regex)> = OnceLock::new();
    TEMPLATES.get_or_init(|| {
        (
            Regex::new(
                r"^(ni|wa|ki|vi|i|zi|pa|mwa|mwe|a|u)(ki|li|l|me|na|ta)?(ni|ji|tu|m|wa|ki|vi|i|zi|po|ku|pa)?(\w+)$",
            )
            .expect("static pattern"),
            Regex::new(
                r"^(ha|si)(m|wa|tu|ki|vi|i|zi|ku|pa)?(ku|ja|ta|i)?(m|wa|ki|vi|i|zi|u|ku|tu)?(\w+)$",
            )
            .expect("static pattern"),
        )
    })
}

fn tense_templates() -> &'static (Regex, Regex) {
    static TEMPLATES: OnceLock<(Regex, Regex)> = OnceLock::new();
    TEMPLATES.get_or_init(|| {
        (
            Regex::new(r"^(\w+[^ing|in'|in])(ing|in'|in)$").expect("static pattern"),
            Regex::new(r"^(\w+[^d])(d)$").expect("static pattern"),
        )
    })
}

fn affirmative_root(word: &str) -> Option<&str> {
    inflection_templates()
        .0
        .captures(word)
        .and_then(|c| c.get(4))
        .map(|m| m.as_str())
}

fn negative_root(word: &str) -> Option<&str> {
    inflection_templates()
        .1
        .captures(word)
        .and_then(|c| c.get(5))
        .map(|m| m.as_str())
}

fn mixing_affirmative_root(word: &str) -> Option<&str> {
    mixing_templates()
        .0
        .captures(word)
        .and_then(|c| c.get(4))
        .map(|m| m.as_str())
}

fn mixing_negative_root(word: &str) -> Option<&str> {
    mixing_templates()
        .1
        .captures(word)
        .and_then(|c| c.get(5))
        .map(|m| m.as_str())
}

/// Whether the candidate is a well-formed Swahili inflection or a noun-class
/// agreed adjective. Bare roots do not validate here; dictionary membership
/// covers those.
///
/// Verbs are tried first. A candidate that decomposes under the affirmative
/// template validates when its root equals the verb or a sanctioned final-'a'
/// extension of it; the negative template allows a smaller extension set.
/// Candidates that decompose under neither template fall back to whole-word
/// suffix substitution against each verb. Verbs ending in 'i' get their own
/// substitution chain that runs in every case.
pub fn is_valid_swahili(candidate: &str, verbs: &[String], adjectives: &[String]) -> bool {
    let candidate = candidate.to_lowercase();
    let affirmative = affirmative_root(&candidate);
    let negative = negative_root(&candidate);

    for verb in verbs {
        if let Some(root) = affirmative {
            if root == verb.as_str() {
                return true;
            }
            if let Some(stem) = verb.strip_suffix('a') {
                for ending in ["ia", "iwa", "isha", "iza"] {
                    if root.ends_with(ending)
                        && root.eq_ignore_ascii_case(&format!("{stem}{ending}"))
                    {
                        return true;
                    }
                }
            }
        } else if let Some(root) = negative {
            if root == verb.as_str() {
                return true;
            }
            if let Some(stem) = verb.strip_suffix('a') {
                for ending in ["ia", "iwa"] {
                    if root.ends_with(ending)
                        && root.eq_ignore_ascii_case(&format!("{stem}{ending}"))
                    {
                        return true;
                    }
                }
            }
        } else if let Some(stem) = verb.strip_suffix('a') {
            for ending in [
                "ia", "e", "iwa", "ana", "anga", "ua", "ika", "esha", "isha", "iza", "zwa",
                "ea", "eshwa", "ishwa", "eni",
            ] {
                if candidate.ends_with(ending)
                    && candidate.eq_ignore_ascii_case(&format!("{stem}{ending}"))
                {
                    return true;
                }
            }
        }

        if let Some(stem) = verb.strip_suffix('i') {
            for (ending, extension) in [
                ("ia", "ia"),
                ("iwa", "iwa"),
                ("ana", "iana"),
                ("anga", "ianga"),
                ("ishwa", "ishwa"),
                ("eni", "ieni"),
                ("ika", "ika"),
                ("isha", "isha"),
            ] {
                if candidate.ends_with(ending)
                    && candidate.eq_ignore_ascii_case(&format!("{stem}{extension}"))
                {
                    return true;
                }
            }
        }
    }

    for adjective in adjectives {
        if !candidate.contains(adjective.as_str()) {
            continue;
        }
        let prefixes: &[&str] = if adjective.starts_with('e') {
            &["mw", "w", "ch", "p", "kw", "ny"]
        } else {
            &["m", "wa", "ki", "vi", "mi", "ma", "pa", "ku", "z"]
        };
        for prefix in prefixes {
            if candidate.eq_ignore_ascii_case(&format!("{prefix}{adjective}")) {
                return true;
            }
        }
    }

    false
}

/// Normalize an English/Swahili concatenation like "hazikuspoil" or
/// "wanatucookia" by swapping the embedded English root for the loan verb's
/// Swahili form matching the word's ending. Afterwards the original word is
/// checked against the English tense templates: a Swahili stem carrying
/// "-ing" comes back as the English progressive, a "-d" form as the English
/// past. Words that neither decompose nor inflect pass through lowercased.
pub fn process_word_mixing(word: &str) -> String {
    let original = word.to_lowercase();
    let mut word = original.clone();

    if let Some(root) = mixing_negative_root(&original) {
        for row in LOAN_VERBS {
            if original.contains(row.english) {
                let form = if original.ends_with("ia") {
                    row.applicative
                } else if original.ends_with("ii") {
                    row.negative
                } else if original.ends_with("iwa") {
                    row.passive
                } else if original.ends_with("ana") {
                    row.reciprocal
                } else {
                    row.swahili
                };
                word = original.replace(root, form);
                break;
            }
        }
    } else if let Some(root) = mixing_affirmative_root(&original) {
        for row in LOAN_VERBS {
            if original.contains(row.english) {
                let form = if original.ends_with("ia") {
                    row.applicative
                } else if original.ends_with("ie") {
                    row.subjunctive
                } else if original.ends_with("iwa") {
                    row.passive
                } else if original.ends_with("ana") {
                    row.reciprocal
                } else {
                    row.swahili
                };
                word = original.replace(root, form);
                break;
            }
        }
    }

    let (present, past) = tense_templates();
    if let Some(caps) = present.captures(&original) {
        if let Some(stem) = caps.get(1) {
            for row in LOAN_VERBS {
                if stem.as_str() == row.swahili {
                    word = format!("{}ing", row.english);
                    break;
                }
            }
        }
    }
    if let Some(caps) = past.captures(&original) {
        if let Some(stem) = caps.get(1) {
            for row in LOAN_VERBS {
                if stem.as_str() == row.swahili {
                    word = row.past.to_string();
                    break;
                }
            }
        }
    }

    word
}

/// Repair a misspelled inflected Swahili verb. The word is decomposed via
/// the inflection templates; the root is then matched against the verb list
/// in order. An exact root hit returns the word unchanged. Otherwise the
/// first verb sharing the root's first letter, containing the root as a
/// subsequence, and within `morphology.typo_edit_distance` replaces the
/// root in place. The walk stops at the first hit either way, so list order
/// decides.
pub fn process_swahili_typos(word: &str, verbs: &[String]) -> String {
    let original = word.to_lowercase();

    let root = match (affirmative_root(&original), negative_root(&original)) {
        (Some(root), _) => root,
        (None, Some(root)) => root,
        (None, None) => return original,
    };

    let max_distance = settings().morphology.typo_edit_distance;
    for verb in verbs {
        if root == verb.as_str() {
            return original;
        }
        if verb.chars().next() == root.chars().next()
            && metrics::lcs_length(root, verb) == root.chars().count()
            && metrics::edit_distance(root, verb) <= max_distance
        {
            return original.replace(root, verb);
        }
    }

    original
}

/// Likelihood that a misspelled English word matches a candidate: the LCS
/// ratio over the longer length, divided by the edit distance between the
/// consonant skeletons. A zero distance is replaced by the ratio itself,
/// pinning the result at 1.
pub fn probability_english_matches(original: &str, candidate: &str) -> f64 {
    let numerator = metrics::lcs_length(original, candidate) as f64;
    let denominator = original.chars().count().max(candidate.chars().count()) as f64;
    let lcs_ratio = numerator / denominator;

    let mut lev = metrics::edit_distance(
        &consonant_skeleton(original),
        &consonant_skeleton(candidate),
    ) as f64;
    if lev == 0.0 {
        lev = lcs_ratio;
    }
    lcs_ratio / lev
}

/// Swahili variant of [`probability_english_matches`]: orthography is
/// phonemic, so the edit distance runs over the raw strings.
pub fn probability_swahili_matches(original: &str, candidate: &str) -> f64 {
    let numerator = metrics::lcs_length(original, candidate) as f64;
    let denominator = original.chars().count().max(candidate.chars().count()) as f64;
    let lcs_ratio = numerator / denominator;

    let mut lev = metrics::edit_distance(original, candidate) as f64;
    if lev == 0.0 {
        lev = lcs_ratio;
    }
    lcs_ratio / lev
}

/// Likelihood that two phoneme strings denote the same word. The LCS is
/// normalized by the first argument's length, then divided by the raw edit
/// distance with the same zero-distance guard as the graphemic formulas.
/// Asymmetric in its arguments.
pub fn probability_phonemes_match(original: &str, candidate: &str) -> f64 {
    let numerator = metrics::lcs_length(original, candidate) as f64;
    let denominator = original.chars().count() as f64;
    let lcs_ratio = numerator / denominator;

    let mut lev = metrics::edit_distance(original, candidate) as f64;
    if lev == 0.0 {
        lev = lcs_ratio;
    }
    lcs_ratio / lev
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn skeleton_strips_vowels() {
        assert_eq!(consonant_skeleton("hello"), "hll");
        assert_eq!(consonant_skeleton("HeLLo"), "hll");
        assert_eq!(consonant_skeleton("aeiou"), "");
        assert_eq!(consonant_skeleton("rhythm"), "rhythm");
    }

    #[test]
    fn affirmative_inflection_validates_exact_root() {
        let verbs = words(&["fanya"]);
        assert!(is_valid_swahili("anafanya", &verbs, &[]));
        assert!(is_valid_swahili("ANAFANYA", &verbs, &[]));
    }

    #[test]
    fn negative_inflection_validates_exact_root() {
        let verbs = words(&["fanya"]);
        assert!(is_valid_swahili("hakufanya", &verbs, &[]));
    }

    #[test]
    fn whole_word_suffix_substitution() {
        let verbs = words(&["fanya"]);
        assert!(is_valid_swahili("fanyisha", &verbs, &[]));
        assert!(is_valid_swahili("fanyeni", &verbs, &[]));
        assert!(is_valid_swahili("fanye", &verbs, &[]));
    }

    #[test]
    fn final_i_verbs_use_their_own_chain() {
        let verbs = words(&["rudi"]);
        assert!(is_valid_swahili("rudia", &verbs, &[]));
        assert!(is_valid_swahili("rudiana", &verbs, &[]));
        assert!(is_valid_swahili("rudieni", &verbs, &[]));
        assert!(!is_valid_swahili("rudoka", &verbs, &[]));
    }

    #[test]
    fn bare_verb_is_not_validated_by_inflection() {
        let verbs = words(&["fanya"]);
        assert!(!is_valid_swahili("fanya", &verbs, &[]));
    }

    #[test]
    fn adjective_agreement_prefixes() {
        let adjectives = words(&["zuri", "embamba"]);
        assert!(is_valid_swahili("mzuri", &[], &adjectives));
        assert!(is_valid_swahili("wazuri", &[], &adjectives));
        assert!(is_valid_swahili("kizuri", &[], &adjectives));
        assert!(is_valid_swahili("mwembamba", &[], &adjectives));
        assert!(is_valid_swahili("nyembamba", &[], &adjectives));
        assert!(!is_valid_swahili("nzuri", &[], &adjectives));
        assert!(!is_valid_swahili("blah", &[], &adjectives));
    }

    #[test]
    fn mixing_substitutes_applicative_form() {
        assert_eq!(process_word_mixing("anacookia"), "anapikia");
    }

    #[test]
    fn mixing_substitutes_bare_root_under_negation() {
        assert_eq!(process_word_mixing("hazikuspoil"), "hazikuharibu");
        assert_eq!(process_word_mixing("zilispoil"), "ziliharibu");
    }

    #[test]
    fn progressive_suffix_on_swahili_stem_goes_english() {
        assert_eq!(process_word_mixing("somaing"), "reading");
    }

    #[test]
    fn past_suffix_on_swahili_stem_goes_english() {
        assert_eq!(process_word_mixing("pikad"), "cooked");
    }

    #[test]
    fn unmixed_words_pass_through() {
        assert_eq!(process_word_mixing("hello"), "hello");
    }

    #[test]
    fn typo_repair_restores_dropped_vowel() {
        let verbs = words(&["fanya"]);
        assert_eq!(process_swahili_typos("anafnya", &verbs), "anafanya");
    }

    #[test]
    fn typo_repair_leaves_exact_roots_alone() {
        let verbs = words(&["fanya"]);
        assert_eq!(process_swahili_typos("anafanya", &verbs), "anafanya");
    }

    #[test]
    fn typo_repair_walks_verbs_in_list_order() {
        // "fanya" decomposes cleanly, but "fanyia" comes first and is within
        // distance 2, so the earlier entry wins.
        let verbs = words(&["fanyia", "fanya"]);
        assert_eq!(process_swahili_typos("anafanya", &verbs), "anafanyia");
    }

    #[test]
    fn typo_repair_ignores_undecomposable_words() {
        let verbs = words(&["fanya"]);
        assert_eq!(process_swahili_typos("xyz", &verbs), "xyz");
    }

    #[test]
    fn english_likelihood_uses_skeleton_distance() {
        let p = probability_english_matches("helo", "hello");
        assert!((p - 0.8).abs() < 1e-9);
        // Same skeleton, different spelling: distance collapses to the ratio.
        let p = probability_english_matches("bat", "beat");
        assert!((p - 1.0).abs() < 1e-9);
    }

    #[test]
    fn swahili_likelihood_uses_raw_distance() {
        let p = probability_swahili_matches("kja", "kuja");
        assert!((p - 0.75).abs() < 1e-9);
        let p = probability_swahili_matches("kuja", "kuja");
        assert!((p - 1.0).abs() < 1e-9);
    }

    #[test]
    fn phoneme_likelihood_is_asymmetric() {
        let forward = probability_phonemes_match("on", "ona");
        let backward = probability_phonemes_match("ona", "on");
        assert!((forward - 1.0).abs() < 1e-9);
        assert!((backward - 2.0 / 3.0).abs() < 1e-9);
    }
}
