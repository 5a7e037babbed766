//! The English grapheme-to-phoneme rule cascade.
//!
//! An ordered list of substring rewrites over a working buffer. Rule order
//! and the grouping into exclusive chains versus independent rules are load
//! bearing: later rules see the buffer state earlier rules left behind, and
//! reordering changes output for real words. The groups run in sequence:
//! vowel-letter combinations, r-controlled vowels (phonograms), two
//! digraph/diphthong chains, consonant digraphs, trailing-h forms, "qu",
//! and the terminal "-y".

use super::{is_consonant, is_vowel};

/// Character buffer with `StringBuilder`-style index operations.
///
/// All positions are char indices. `replace` clamps the end bound, since a
/// few rules compute spans that can run past the buffer.
struct Buf {
    chars: Vec<char>,
}

impl Buf {
    fn new(s: &str) -> Self {
        Self {
            chars: s.chars().collect(),
        }
    }

    fn len(&self) -> usize {
        self.chars.len()
    }

    fn char_at(&self, i: usize) -> Option<char> {
        self.chars.get(i).copied()
    }

    fn find(&self, pat: &str) -> Option<usize> {
        self.find_from(pat, 0)
    }

    fn find_from(&self, pat: &str, from: usize) -> Option<usize> {
        let pat: Vec<char> = pat.chars().collect();
        if pat.is_empty() {
            return None;
        }
        let from = from.min(self.chars.len());
        self.chars[from..]
            .windows(pat.len())
            .position(|w| w == pat.as_slice())
            .map(|p| p + from)
    }

    fn rfind(&self, pat: &str) -> Option<usize> {
        let pat: Vec<char> = pat.chars().collect();
        if pat.is_empty() || pat.len() > self.chars.len() {
            return None;
        }
        self.chars
            .windows(pat.len())
            .rposition(|w| w == pat.as_slice())
    }

    fn replace(&mut self, start: usize, end: usize, with: &str) {
        let end = end.min(self.chars.len());
        if start > end {
            return;
        }
        self.chars.splice(start..end, with.chars());
    }

    fn remove(&mut self, i: usize) {
        if i < self.chars.len() {
            self.chars.remove(i);
        }
    }

    fn into_string(self) -> String {
        self.chars.into_iter().collect()
    }
}

/// True when `pat` first occurs exactly `offset` chars after `base`,
/// searching from `base` onward. False when `base` is None.
fn follows(buf: &Buf, pat: &str, base: Option<usize>, offset: usize) -> bool {
    match base {
        Some(b) => buf.find_from(pat, b) == Some(b + offset),
        None => false,
    }
}

/// Convert an English word (lowercased by the caller) to its phoneme.
pub fn english_phoneme(word: &str) -> String {
    let mut buf = Buf::new(word);
    vowel_combinations(&mut buf);
    phonograms(&mut buf);
    a_e_diphthongs(&mut buf);
    i_o_u_diphthongs(&mut buf);
    consonant_digraphs(&mut buf);
    buf.into_string()
}

/// Vowel-letter combinations. Independent rules except the tur/ure pair.
fn vowel_combinations(buf: &mut Buf) {
    // 'alk' as in chalk, talk
    if let Some(p) = buf.find("alk") {
        if p > 0 {
            buf.replace(p, p + 3, "ok");
        }
    }
    // 'olk' as in yolk
    if let Some(p) = buf.find("olk") {
        if p > 0 {
            buf.replace(p, p + 3, "ok");
        }
    }
    // '-eer' as in steer, cheer
    if let Some(p) = buf.find("eer") {
        if p > 0 {
            buf.replace(p, p + 3, "ia");
        }
    }
    // 'hon-' as in honor, honest: the h is silent
    if buf.len() > 3 && buf.find("hon") == Some(0) {
        buf.remove(0);
    }
    // '-igh' as in high, sigh
    if buf.len() > 3 {
        if let Some(p) = buf.find("igh") {
            if p > 0 {
                buf.replace(p, p + 3, "y");
            }
        }
    }
    // '-ous' as in dubious: only the 'ou' collapses
    if buf.len() >= 4 {
        if let Some(p) = buf.find("ous") {
            if p > 0 {
                buf.replace(p, p + 2, "a");
            }
        }
    }
    // 'tion' as in nation
    if buf.len() > 4 {
        if let Some(p) = buf.find("tion") {
            if p > 0 {
                buf.replace(p, p + 4, "shen");
            }
        }
    }
    // 'sion' as in television
    if buf.len() > 4 {
        if let Some(p) = buf.find("sion") {
            if p > 0 {
                buf.replace(p, p + 4, "shen");
            }
        }
    }
    // '-ture' with a vowel after, as in culture; otherwise 'ure' as in sure
    let p_tur = buf.find("tur");
    let tur_vowel = p_tur
        .and_then(|p| buf.char_at(p + 3))
        .is_some_and(is_vowel);
    if buf.len() > 4 && p_tur.is_some_and(|p| p > 0) && tur_vowel {
        if let Some(p) = p_tur {
            buf.replace(p, p + 2, "cha");
        }
    } else if buf.len() > 3 {
        if let Some(p) = buf.find("ure") {
            if p > 0 {
                buf.replace(p, p + 3, "ua");
            }
        }
    }
}

/// R-controlled vowels. Each pair rewrites at the word end first, then
/// before a consonant.
fn phonograms(buf: &mut Buf) {
    // 'ar' as in car (final) or card (preconsonant, r drops)
    if let Some(p) = buf.find("ar") {
        if buf.rfind("ar") == Some(buf.len() - 2) {
            let last = buf.len() - 2;
            buf.replace(last, last + 2, "a");
        } else if buf.char_at(p + 2).is_some_and(is_consonant) {
            buf.remove(p + 1);
        }
    }
    // 'er' as in clever (final) or herd
    if let Some(p) = buf.find("er") {
        if buf.rfind("er") == Some(buf.len() - 2) {
            let last = buf.len() - 2;
            buf.replace(last, last + 2, "a");
        } else if buf.char_at(p + 2).is_some_and(is_consonant) {
            buf.replace(p, p + 2, "a");
        }
    }
    // 'ir' as in stir (final) or swirl
    if let Some(p) = buf.find("ir") {
        if buf.rfind("ir") == Some(buf.len() - 2) {
            let last = buf.len() - 2;
            buf.replace(last, last + 2, "a");
        } else if buf.char_at(p + 2).is_some_and(is_consonant) {
            buf.replace(p, p + 2, "a");
        }
    }
    // 'or': a "for" anywhere (for, before) keeps its vowel and drops the r;
    // otherwise as ar/er
    if let Some(p) = buf.find("or") {
        if let Some(pf) = buf.find("for") {
            buf.remove(pf + 2);
        } else if buf.rfind("or") == Some(buf.len() - 2) {
            let last = buf.len() - 2;
            buf.replace(last, last + 2, "a");
        } else if buf.char_at(p + 2).is_some_and(is_consonant) {
            buf.replace(p, p + 2, "o");
        }
    }
    // 'ur' as in fur (final) or burn
    if let Some(p) = buf.find("ur") {
        if buf.rfind("ur") == Some(buf.len() - 2) {
            let last = buf.len() - 2;
            buf.replace(last, last + 2, "a");
        } else if buf.char_at(p + 2).is_some_and(is_consonant) {
            buf.replace(p, p + 2, "a");
        }
    }
}

/// First diphthong chain: a- and e-led patterns, first match wins.
/// Positions are taken before any branch fires, so every condition sees the
/// same buffer.
fn a_e_diphthongs(buf: &mut Buf) {
    let p_ae = buf.find("ae");
    let p_a = buf.find("a");
    let p_i = buf.find("i");
    let p_e = buf.find("e");
    let p_r = buf.find("r");
    let p_au = buf.find("au");
    let p_aw = buf.find("aw");
    let p_ay = buf.find("ay");
    let p_ea = buf.find("ea");
    let p_ee = buf.find("ee");
    let p_ei = buf.find("ei");
    let p_ey = buf.find("ey");

    if let Some(p) = p_ae {
        // 'ae' as in aerospace
        buf.replace(p, p + 2, "e");
    } else if follows(buf, "e", p_a, 2) {
        // 'a_e' as in mate
        if let Some(p) = p_a {
            buf.replace(p, p + 1, "ei");
        }
    } else if follows(buf, "i", p_a, 1) && follows(buf, "r", p_i, 1) {
        // 'air' as in flair; the r test keys off the first i in the word
        if let Some(p) = p_a {
            buf.replace(p, p + 3, "ea");
        }
    } else if p_a.is_some_and(|p| p > 0) && follows(buf, "i", p_a, 1) {
        // 'ai' as in wait
        if let Some(p) = p_a {
            buf.replace(p, p + 2, "ei");
        }
    } else if let Some(p) = p_au {
        // 'au' as in audit
        buf.replace(p, p + 2, "o");
    } else if p_aw.is_some_and(|p| p > 0) {
        // 'aw' as in claw
        if let Some(p) = p_aw {
            buf.replace(p, p + 2, "o");
        }
    } else if p_ay.is_some_and(|p| p > 0) {
        // 'ay' as in tray
        if let Some(p) = p_ay {
            buf.replace(p, p + 2, "ei");
        }
    } else if let Some(p) = p_ea {
        // 'ea' as in eat
        buf.replace(p, p + 2, "i");
    } else if follows(buf, "r", p_e, 1) && follows(buf, "e", p_r, 1) {
        // 'e_re' as in here; the trailing-e test keys off the first r
        if let Some(p) = p_e {
            buf.replace(p, p + 3, "ia");
        }
    } else if let Some(p) = p_ee {
        // 'ee' as in feel
        buf.replace(p, p + 2, "i");
    } else if p_ei.is_some_and(|p| p > 0) {
        // 'ei' as in receive
        if let Some(p) = p_ei {
            buf.replace(p, p + 2, "i");
        }
    } else if p_ey.is_some_and(|p| p > 0) {
        // 'ey' as in they
        if let Some(p) = p_ey {
            buf.replace(p, p + 2, "ei");
        }
    }
}

/// Second diphthong chain: i-, o- and u-led patterns including the ough
/// family, first match wins.
fn i_o_u_diphthongs(buf: &mut Buf) {
    let p_ier = buf.find("ier");
    let p_i = buf.find("i");
    let p_ie = buf.find("ie");
    let p_oa = buf.find("oa");
    let p_oe = buf.find("oe");
    let p_oo = buf.find("oo");
    let p_ough = buf.find("ough");
    let p_ou = buf.find("ou");
    let p_ow = buf.find("ow");
    let p_oy = buf.find("oy");
    let p_ue = buf.find("ue");
    let p_ui = buf.find("ui");
    let p_r = buf.find("r");
    let p_t = buf.find("t");
    let p_c = buf.find("c");
    let p_d = buf.find("d");
    let leading_th = buf.find("th") == Some(0);

    let i_e_pattern = p_i.is_some_and(|p| {
        p > 0
            && p != buf.len() - 1
            && buf.char_at(p + 1).is_some_and(is_consonant)
            && buf.find_from("e", p) == Some(p + 2)
    });
    let ough_before = |lead: Option<usize>| match (p_ough, lead) {
        (Some(po), Some(pl)) => po > 0 && pl + 1 == po,
        _ => false,
    };

    if p_ier.is_some_and(|p| p > 0) {
        // 'ier' as in barrier
        if let Some(p) = p_ier {
            buf.replace(p, p + 3, "ia");
        }
    } else if i_e_pattern {
        // 'i_e' as in bike, crime
        if let Some(p) = p_i {
            buf.replace(p, p + 1, "y");
        }
    } else if p_ie.is_some_and(|p| p > 0) {
        // 'ie' as in thief
        if let Some(p) = p_ie {
            buf.replace(p, p + 2, "i");
        }
    } else if let Some(p) = p_oa {
        // 'oa' as in goat
        buf.replace(p, p + 2, "o");
    } else if p_oe.is_some_and(|p| p > 0) {
        // 'oe' as in hoe
        if let Some(p) = p_oe {
            buf.replace(p, p + 2, "o");
        }
    } else if let Some(p) = p_oo {
        // 'oo' as in pool
        buf.replace(p, p + 2, "u");
    } else if p_ough == Some(0) {
        // 'ough-' as in ought
        buf.replace(0, 4, "ot");
    } else if p_ough == Some(3) && leading_th {
        // 'through'
        buf.replace(3, 7, "u");
    } else if p_ough == Some(2) && leading_th {
        // 'thought'
        buf.replace(2, 6, "o");
    } else if ough_before(p_r) || ough_before(p_t) {
        // 'rough', 'tough'
        if let Some(p) = p_ou {
            buf.replace(p, p + 2, "a");
        }
    } else if ough_before(p_c) || ough_before(p_d) {
        // 'cough', 'dough'
        if let Some(p) = p_ou {
            buf.replace(p, p + 2, "o");
        }
    } else if p_ou.is_some_and(|p| p > 0) {
        // 'ou' as in ghoul
        if let Some(p) = p_ou {
            buf.replace(p, p + 2, "u");
        }
    } else if let Some(p) = p_ow {
        // 'ow': late in the word as in throw, early as in owl
        if p >= 2 {
            buf.replace(p, p + 2, "o");
        } else {
            buf.replace(p, p + 2, "ao");
        }
    } else if let Some(p) = p_oy {
        // 'oy' as in boy
        buf.replace(p, p + 2, "oi");
    } else if p_ue.is_some_and(|p| p > 0) {
        // 'ue' as in sue
        if let Some(p) = p_ue {
            buf.replace(p, p + 2, "u");
        }
    } else if p_ui.is_some_and(|p| p > 0) {
        // 'ui' as in fruit
        if let Some(p) = p_ui {
            buf.replace(p, p + 2, "u");
        }
    }
}

/// Consonant digraphs, silent letters, and terminal forms. Independent
/// rules applied in order on the evolving buffer.
fn consonant_digraphs(buf: &mut Buf) {
    // 'ck' as in lick
    if let Some(p) = buf.find("ck") {
        if p > 0 {
            buf.replace(p, p + 2, "k");
        }
    }
    // 'dg' as in edge
    if let Some(p) = buf.find("dg") {
        if p > 0 {
            buf.replace(p, p + 2, "j");
        }
    }
    // 'ex-' as in exit
    if buf.find("ex") == Some(0) {
        buf.remove(0);
    }
    // 'gh': hard g away from the end (ghost), f at the end (laugh)
    if buf.len() > 2 {
        if let Some(p) = buf.find("gh") {
            if p < buf.len() - 2 {
                buf.replace(p, p + 2, "g");
            } else {
                buf.replace(p, p + 2, "f");
            }
        }
    }
    // 'gn-' as in gnome
    if buf.find("gn") == Some(0) {
        buf.replace(0, 2, "n");
    }
    // 'kn-' as in know
    if buf.find("kn") == Some(0) {
        buf.remove(0);
    }
    // '-mb' as in comb
    if buf.len() > 2 && buf.find("mb") == Some(buf.len() - 2) {
        let p = buf.len() - 2;
        buf.remove(p + 1);
    }
    // '-mn' as in column
    if buf.len() > 2 && buf.find("mn") == Some(buf.len() - 2) {
        let p = buf.len() - 2;
        buf.replace(p, p + 2, "m");
    }
    // 'ph-' as in phone
    if buf.len() > 2 && buf.find("ph") == Some(0) {
        buf.replace(0, 2, "f");
    }
    // 'pn-' as in pneumonia
    if buf.len() > 2 && buf.find("pn") == Some(0) {
        buf.replace(0, 2, "n");
    }
    // 'ps-' as in psychology
    if buf.len() > 2 && buf.find("ps") == Some(0) {
        buf.remove(0);
    }
    // 'rh-' as in rhino
    if buf.len() > 2 && buf.find("rh") == Some(0) {
        buf.replace(0, 2, "r");
    }
    // 'tch' as in catch
    if buf.len() >= 3 {
        if let Some(p) = buf.find("tch") {
            if p > 0 {
                buf.remove(p);
            }
        }
    }
    // 'wr-' as in write
    if buf.len() > 2 && buf.find("wr") == Some(0) {
        buf.remove(0);
    }
    // 'wh-': silent h before a/e/i/y (what, whistle), silent w in who-
    if buf.find("wha") == Some(0)
        || buf.find("whe") == Some(0)
        || buf.find("whi") == Some(0)
        || buf.find("why") == Some(0)
    {
        buf.remove(1);
    } else if buf.find("who") == Some(0) {
        buf.remove(0);
    }
    // trailing vowel+h after a consonant, as in tempah/tempeh
    if buf.len() > 2 && buf.rfind("h") == Some(buf.len() - 1) {
        let tail = buf.len() - 2;
        let before_ok = tail > 0 && buf.char_at(tail - 1).is_some_and(is_consonant);
        if buf.find("ah") == Some(tail) && before_ok {
            buf.remove(tail + 1);
        } else if buf.find("eh") == Some(tail) && before_ok {
            buf.remove(tail + 1);
        } else if buf.find("ih") == Some(tail) && before_ok {
            buf.remove(tail + 1);
        } else if buf.find("oh") == Some(tail) && before_ok {
            buf.remove(tail + 1);
        } else if buf.find("uh") == Some(tail) && before_ok {
            buf.replace(tail, tail + 2, "a");
        }
    }
    // 'qu' with a consonant somewhere after it, as in equal, quit
    if let Some(p) = buf.find("qu") {
        for i in p + 1..buf.len() {
            if buf.char_at(i).is_some_and(is_consonant) {
                buf.replace(p, p + 2, "kw");
                break;
            }
        }
    }
    // terminal vowel-consonant-y, as in study
    if buf.len() > 2 && buf.rfind("y") == Some(buf.len() - 1) {
        let y = buf.len() - 1;
        if buf.char_at(y - 1).is_some_and(is_consonant) && buf.char_at(y - 2).is_some_and(is_vowel)
        {
            buf.replace(y, y + 1, "i");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vowel_combinations_fire() {
        assert_eq!(english_phoneme("chalk"), "chok");
        assert_eq!(english_phoneme("talk"), "tok");
        assert_eq!(english_phoneme("sigh"), "sy");
        assert_eq!(english_phoneme("sure"), "sua");
    }

    #[test]
    fn leading_hon_drops_the_h() {
        // honor -> onor, then the final 'or' collapses
        assert_eq!(english_phoneme("honor"), "ona");
    }

    #[test]
    fn tion_and_sion_become_shen() {
        assert_eq!(english_phoneme("nation"), "nashen");
        assert_eq!(english_phoneme("television"), "televishen");
    }

    #[test]
    fn here_becomes_hia() {
        assert_eq!(english_phoneme("here"), "hia");
    }

    #[test]
    fn silent_letter_heads() {
        assert_eq!(english_phoneme("know"), "no");
        assert_eq!(english_phoneme("what"), "wat");
        assert_eq!(english_phoneme("who"), "ho");
        assert_eq!(english_phoneme("phone"), "fone");
    }

    #[test]
    fn ough_family() {
        assert_eq!(english_phoneme("through"), "thru");
        assert_eq!(english_phoneme("thought"), "thot");
        assert_eq!(english_phoneme("rough"), "raf");
        assert_eq!(english_phoneme("cough"), "cof");
        assert_eq!(english_phoneme("laugh"), "lof");
    }

    #[test]
    fn trailing_forms() {
        assert_eq!(english_phoneme("comb"), "com");
        assert_eq!(english_phoneme("column"), "colum");
        assert_eq!(english_phoneme("study"), "studi");
        assert_eq!(english_phoneme("catch"), "cach");
    }

    #[test]
    fn qu_needs_a_consonant_after() {
        assert_eq!(english_phoneme("equal"), "ekwal");
    }

    #[test]
    fn i_consonant_e_becomes_y() {
        assert_eq!(english_phoneme("bike"), "byke");
    }

    #[test]
    fn short_words_pass_length_gates() {
        // Too short for the gated rules; unchanged.
        assert_eq!(english_phoneme("am"), "am");
        assert_eq!(english_phoneme("a"), "a");
    }
}
