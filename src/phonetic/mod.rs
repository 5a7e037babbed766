//! Grapheme-to-phoneme transduction and numeric-homophone expansion.
//!
//! Two rule systems live here: the English cascade in [`english`] and the
//! Swahili digraph rules in [`swahili`]. Both produce the simplified sound
//! approximations the candidate generator and channel model compare, plus a
//! Soundex-like digit code derived from the phoneme.

mod english;
mod swahili;

use std::sync::OnceLock;

use regex::Regex;

pub use english::english_phoneme;
pub use swahili::swahili_phoneme;

/// Letters treated as consonants by the rewrite rules. 'y' is not one.
pub(crate) fn is_consonant(c: char) -> bool {
    matches!(
        c,
        'b' | 'c' | 'd' | 'f' | 'g' | 'h' | 'j' | 'k' | 'l' | 'm' | 'n' | 'p' | 'q' | 'r' | 's'
            | 't' | 'v' | 'w' | 'x' | 'z'
    )
}

/// Letters treated as vowels by the rewrite rules, 'y' included.
pub(crate) fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

fn english_numeric_gate() -> &'static (Regex, Regex) {
    static GATE: OnceLock<(Regex, Regex)> = OnceLock::new();
    GATE.get_or_init(|| {
        (
            Regex::new(r"^[a-zA-Z]+[1246789]?[a-zA-Z]*$").expect("static pattern"),
            Regex::new(r"^[1246789]?[a-zA-Z]+$").expect("static pattern"),
        )
    })
}

fn swahili_numeric_gates() -> &'static (Regex, Regex) {
    static GATES: OnceLock<(Regex, Regex)> = OnceLock::new();
    GATES.get_or_init(|| {
        (
            Regex::new(r"^(m|wa|ki|vi|i|zi|pa|mwa|a|u|ni)(ki|li|l|me|na|ta)?(2)(\w+)$")
                .expect("static pattern"),
            Regex::new(r"^(ha|si)(m|wa|tu|ki|vi|i|zi|ku|pa)?(ku|ja|ta|i)?(2)(\w+)$")
                .expect("static pattern"),
        )
    })
}

/// Number-homophone replacements, tried in this order. Only the first digit
/// present in the word is expanded.
const DIGIT_HOMOPHONES: [(char, &str); 7] = [
    ('1', "one"),
    ('2', "too"),
    ('4', "for"),
    ('6', "six"),
    ('7', "seven"),
    ('8', "ate"),
    ('9', "nin"),
];

/// Expand an embedded digit to its English homophone ("gr8" -> "grate",
/// "sum1" -> "sumone"). Words with more than one digit, or digits outside
/// the homophone set, pass through unchanged.
pub fn expand_numerics(word: &str) -> String {
    let (letters_first, digit_first) = english_numeric_gate();
    if !letters_first.is_match(word) && !digit_first.is_match(word) {
        return word.to_string();
    }

    let mut out = word.to_string();
    for (digit, replacement) in DIGIT_HOMOPHONES {
        if let Some(pos) = out.find(digit) {
            out.replace_range(pos..pos + 1, replacement);
            break;
        }
    }
    out
}

/// Expand "2" to "tu" inside an inflected Swahili word ("wali2sumbua" ->
/// "walitusumbua"). The digit only expands when the word decomposes as an
/// affirmative or negative verb frame around it; every "2" is replaced.
/// Always lowercases.
pub fn swahili_expand_numerics(word: &str) -> String {
    let word = word.to_lowercase();
    let (affirmative, negative) = swahili_numeric_gates();

    if (affirmative.is_match(&word) || negative.is_match(&word)) && word.contains('2') {
        return word.replace('2', "tu");
    }
    word
}

/// Reduce a phoneme to its digit-class code. Consonant classes collapse to
/// one digit each; 'y' or 'i' in final position becomes '6'; everything
/// else is left as is.
pub fn phonetic_code(phoneme: &str) -> String {
    let mut code = phoneme.to_string();

    // Class substitutions repeat until the pattern is gone. "th" and "sh"
    // must collapse before their single-letter members.
    const CLASSES: [(&str, &str); 16] = [
        ("th", "0"),
        ("t", "0"),
        ("d", "0"),
        ("sh", "1"),
        ("s", "1"),
        ("x", "1"),
        ("z", "1"),
        ("q", "2"),
        ("k", "2"),
        ("c", "2"),
        ("f", "3"),
        ("v", "3"),
        ("l", "4"),
        ("r", "4"),
        ("g", "5"),
        ("j", "5"),
    ];
    for (pattern, digit) in CLASSES {
        while let Some(pos) = code.find(pattern) {
            code.replace_range(pos..pos + pattern.len(), digit);
        }
    }

    // Terminal glides: only when the first occurrence is the last character.
    for glide in ['y', 'i'] {
        if let Some(pos) = code.find(glide) {
            if pos + 1 == code.len() {
                code.replace_range(pos..pos + 1, "6");
            }
        }
    }

    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_numerics_priority_order() {
        assert_eq!(expand_numerics("gr8"), "grate");
        assert_eq!(expand_numerics("sum1"), "sumone");
        assert_eq!(expand_numerics("b4"), "bfor");
        assert_eq!(expand_numerics("7teen"), "seventeen");
    }

    #[test]
    fn expand_numerics_only_first_matching_digit() {
        // Two digits fail the gate entirely.
        assert_eq!(expand_numerics("g8r8"), "g8r8");
    }

    #[test]
    fn expand_numerics_ignores_unlisted_digits() {
        assert_eq!(expand_numerics("gr3"), "gr3");
        assert_eq!(expand_numerics("hello"), "hello");
    }

    #[test]
    fn swahili_numeric_requires_verb_frame() {
        assert_eq!(swahili_expand_numerics("wali2sumbua"), "walitusumbua");
        assert_eq!(swahili_expand_numerics("haku2sumbua"), "hakutusumbua");
        // No recognizable prefix chain: the digit stays.
        assert_eq!(swahili_expand_numerics("xy2z"), "xy2z");
    }

    #[test]
    fn swahili_numeric_lowercases() {
        assert_eq!(swahili_expand_numerics("Wali2sumbua"), "walitusumbua");
        assert_eq!(swahili_expand_numerics("PIGA"), "piga");
    }

    #[test]
    fn phonetic_code_collapses_classes() {
        assert_eq!(phonetic_code("that"), "0a0");
        assert_eq!(phonetic_code("shazam"), "1a1am");
        assert_eq!(phonetic_code("karg"), "2a45");
    }

    #[test]
    fn phonetic_code_terminal_glides() {
        assert_eq!(phonetic_code("may"), "ma6");
        assert_eq!(phonetic_code("mai"), "ma6");
        // 'i' not in final position is untouched.
        assert_eq!(phonetic_code("pia"), "pia");
    }

    #[test]
    fn phonetic_code_digraphs_before_singles() {
        // "sh" must become one '1', not "1h".
        assert_eq!(phonetic_code("sh"), "1");
        assert_eq!(phonetic_code("th"), "0");
    }

    #[test]
    fn consonant_and_vowel_classes() {
        assert!(is_consonant('q'));
        assert!(is_consonant('x'));
        assert!(!is_consonant('y'));
        assert!(is_vowel('y'));
        assert!(is_vowel('a'));
        assert!(!is_vowel('b'));
    }
}
