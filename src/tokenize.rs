//! Word-boundary segmentation for the normalizer.
//!
//! A sentence splits into maximal runs of alphanumeric characters (word
//! segments) and maximal runs of everything else (separator segments).
//! Concatenating the segment texts reproduces the input exactly, so the
//! driver can rewrite word segments in place and emit the rest verbatim.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub is_word: bool,
}

pub fn tokenize(sentence: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut current_is_word = false;

    for c in sentence.chars() {
        let is_word = c.is_alphanumeric();
        if !current.is_empty() && is_word != current_is_word {
            segments.push(Segment {
                text: std::mem::take(&mut current),
                is_word: current_is_word,
            });
        }
        current_is_word = is_word;
        current.push(c);
    }
    if !current.is_empty() {
        segments.push(Segment {
            text: current,
            is_word: current_is_word,
        });
    }
    segments
}
