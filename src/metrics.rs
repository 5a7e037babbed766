//! String-similarity primitives shared by every model stage.

/// Levenshtein distance with unit-cost insert, delete, and substitute.
///
/// Runs the full (|a|+1) x (|b|+1) dynamic program; the bottom-right cell is
/// the distance. O(|a|*|b|) time and space.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        table[0][j] = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            let deletion = table[i - 1][j] + 1;
            let insertion = table[i][j - 1] + 1;
            let substitution = table[i - 1][j - 1] + cost;
            table[i][j] = deletion.min(insertion).min(substitution);
        }
    }

    table[a.len()][b.len()]
}

/// Length of the longest common subsequence of `a` and `b`.
pub fn lcs_length(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    lcs_table(&a, &b)[0][0]
}

/// One longest common subsequence of `a` and `b`.
///
/// Ties during reconstruction advance the index into `a`, so among equally
/// long subsequences the one following `a`'s earliest characters wins.
pub fn lcs(a: &str, b: &str) -> String {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let opt = lcs_table(&a, &b);

    let mut out = String::new();
    let mut i = 0;
    let mut j = 0;
    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            out.push(a[i]);
            i += 1;
            j += 1;
        } else if opt[i + 1][j] >= opt[i][j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }
    out
}

/// Suffix-indexed LCS table: opt[i][j] = LCS length of a[i..] and b[j..].
fn lcs_table(a: &[char], b: &[char]) -> Vec<Vec<usize>> {
    let mut opt = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in (0..a.len()).rev() {
        for j in (0..b.len()).rev() {
            if a[i] == b[j] {
                opt[i][j] = opt[i + 1][j + 1] + 1;
            } else {
                opt[i][j] = opt[i + 1][j].max(opt[i][j + 1]);
            }
        }
    }
    opt
}

/// Jaro-Winkler similarity over phonetic codes.
///
/// Match counting is positional only for equal-length inputs (compared after
/// sorting each side's characters); for unequal lengths a character of the
/// shorter string matches if it occurs anywhere in the longer one.
/// Transpositions are half the position-wise mismatches over the shorter
/// length. Returns NaN when there are no matches at all; a NaN never passes
/// a >= threshold test, which is the guard the candidate generator relies on.
pub fn jaro_winkler(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    if a_chars.is_empty() && b_chars.is_empty() {
        return f64::NAN;
    }

    let matches = if a_chars.len() == b_chars.len() {
        let mut sa = a_chars.clone();
        let mut sb = b_chars.clone();
        sa.sort_unstable();
        sb.sort_unstable();
        sa.iter().zip(&sb).filter(|(x, y)| x == y).count()
    } else {
        let (shorter, longer) = if a_chars.len() < b_chars.len() {
            (&a_chars, &b_chars)
        } else {
            (&b_chars, &a_chars)
        };
        shorter.iter().filter(|c| longer.contains(c)).count()
    };

    if matches == 0 {
        return f64::NAN;
    }

    let shorter_len = a_chars.len().min(b_chars.len());
    let mismatches = (0..shorter_len).filter(|&i| a_chars[i] != b_chars[i]).count();
    let transpositions = mismatches / 2;

    let m = matches as f64;
    let t = transpositions as f64;
    let jaro = (m / a_chars.len() as f64 + m / b_chars.len() as f64 + (m - t) / m) / 3.0;

    // Winkler prefix bonus, common prefix capped at four characters.
    let prefix = a_chars
        .iter()
        .zip(&b_chars)
        .take(4)
        .take_while(|(x, y)| x == y)
        .count();
    jaro + prefix as f64 * 0.1 * (1.0 - jaro)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn edit_distance_classic_pair() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn edit_distance_empty_sides() {
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("", ""), 0);
    }

    #[test]
    fn lcs_length_classic_pair() {
        assert_eq!(lcs_length("ABCBDAB", "BDCABA"), 4);
    }

    #[test]
    fn lcs_reconstruction_is_a_subsequence() {
        let s = lcs("ABCBDAB", "BDCABA");
        assert_eq!(s.len(), 4);
        // Every reconstructed char must appear in order in both inputs.
        for (input, sub) in [("ABCBDAB", &s), ("BDCABA", &s)] {
            let mut it = input.chars();
            for c in sub.chars() {
                assert!(it.any(|x| x == c), "{s} not a subsequence of {input}");
            }
        }
    }

    #[test]
    fn lcs_of_disjoint_strings_is_empty() {
        assert_eq!(lcs("abc", "xyz"), "");
        assert_eq!(lcs_length("abc", "xyz"), 0);
    }

    #[test]
    fn jaro_winkler_pinned_value() {
        let got = jaro_winkler("MARTHA", "MARHTA");
        assert!((got - 0.9611).abs() < 1e-3, "got {got}");
    }

    #[test]
    fn jaro_winkler_identical_strings() {
        assert!((jaro_winkler("piga", "piga") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn jaro_winkler_no_matches_is_nan() {
        let got = jaro_winkler("aaa", "bbb");
        assert!(got.is_nan());
        // The generator's threshold test must reject NaN.
        assert!(!(got >= 0.8));
    }

    #[test]
    fn jaro_winkler_unequal_lengths_counts_membership() {
        // "ab" vs "ba x": both chars of the shorter occur in the longer.
        let got = jaro_winkler("ab", "bax");
        assert!(got.is_finite());
        assert!(got > 0.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn edit_distance_symmetric(a in "[a-z]{0,12}", b in "[a-z]{0,12}") {
            prop_assert_eq!(edit_distance(&a, &b), edit_distance(&b, &a));
        }

        #[test]
        fn edit_distance_identity(a in "[a-z]{0,16}") {
            prop_assert_eq!(edit_distance(&a, &a), 0);
        }

        #[test]
        fn edit_distance_triangle(
            a in "[a-z]{0,8}",
            b in "[a-z]{0,8}",
            c in "[a-z]{0,8}",
        ) {
            prop_assert!(
                edit_distance(&a, &b) <= edit_distance(&a, &c) + edit_distance(&c, &b)
            );
        }

        #[test]
        fn lcs_length_bounded_by_shorter(a in "[a-z]{0,12}", b in "[a-z]{0,12}") {
            prop_assert!(lcs_length(&a, &b) <= a.len().min(b.len()));
        }
    }
}
