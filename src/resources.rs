//! Loading of word lists and n-gram tables, plain-text or bundled.
//!
//! The plain-text layout is a directory of eight fixed-name files. Loading
//! never fails: an unreadable or malformed resource degrades to an empty
//! collection with a warning, and the engine runs with whatever survived.
//! The bundle is a single compiled file carrying all eight resources, with
//! typed errors since the caller chose an explicit artifact.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const ENGLISH_LEXICON_FILE: &str = "english_lexicon.txt";
pub const ENGLISH_MORPHEMES_FILE: &str = "english_morphemes.txt";
pub const SWAHILI_LEXICON_FILE: &str = "swahili_lexicon.txt";
pub const SWAHILI_VERBS_FILE: &str = "swahili_verbs.txt";
pub const SWAHILI_ADJECTIVES_FILE: &str = "swahili_adjectives.txt";
pub const UNIGRAMS_FILE: &str = "unigrams.txt";
pub const BIGRAMS_FILE: &str = "bigrams.txt";
pub const TRIGRAMS_FILE: &str = "trigrams.txt";

const MAGIC: &[u8; 4] = b"SNFB";
const VERSION: u8 = 1;
const HEADER_SIZE: usize = 4 + 1; // magic + version

#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected SNFB)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),
}

/// Everything the engine reads at startup. Word lists keep file order;
/// the n-gram maps are keyed by space-joined grams.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    pub english_words: Vec<String>,
    pub english_morphemes: Vec<String>,
    pub swahili_words: Vec<String>,
    pub swahili_verbs: Vec<String>,
    pub swahili_adjectives: Vec<String>,
    pub unigrams: HashMap<String, u64>,
    pub bigrams: HashMap<String, u64>,
    pub trigrams: HashMap<String, u64>,
}

impl Resources {
    /// Read the plain-text layout. Each missing or malformed file becomes
    /// an empty collection; nothing here returns an error.
    pub fn load_dir(dir: &Path) -> Self {
        Self {
            english_words: load_word_list(&dir.join(ENGLISH_LEXICON_FILE)),
            english_morphemes: load_word_list(&dir.join(ENGLISH_MORPHEMES_FILE)),
            swahili_words: load_word_list(&dir.join(SWAHILI_LEXICON_FILE)),
            swahili_verbs: load_word_list(&dir.join(SWAHILI_VERBS_FILE)),
            swahili_adjectives: load_word_list(&dir.join(SWAHILI_ADJECTIVES_FILE)),
            unigrams: load_ngram_file(&dir.join(UNIGRAMS_FILE)),
            bigrams: load_ngram_file(&dir.join(BIGRAMS_FILE)),
            trigrams: load_ngram_file(&dir.join(TRIGRAMS_FILE)),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, BundleError> {
        let payload = bincode::serialize(self).map_err(BundleError::Serialize)?;
        let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&payload);
        Ok(buf)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, BundleError> {
        if data.len() < HEADER_SIZE {
            return Err(BundleError::InvalidHeader);
        }
        if &data[..4] != MAGIC {
            return Err(BundleError::InvalidMagic);
        }
        if data[4] != VERSION {
            return Err(BundleError::UnsupportedVersion(data[4]));
        }
        bincode::deserialize(&data[HEADER_SIZE..]).map_err(BundleError::Deserialize)
    }

    pub fn open_bundle(path: &Path) -> Result<Self, BundleError> {
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }

    pub fn save_bundle(&self, path: &Path) -> Result<(), BundleError> {
        Ok(fs::write(path, self.to_bytes()?)?)
    }
}

fn load_word_list(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(text) => text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        Err(e) => {
            warn!("word list {} unreadable, continuing empty: {e}", path.display());
            Vec::new()
        }
    }
}

fn load_ngram_file(path: &Path) -> HashMap<String, u64> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!("n-gram file {} unreadable, continuing empty: {e}", path.display());
            return HashMap::new();
        }
    };
    match parse_ngram_lines(&text) {
        Ok(table) => table,
        Err(line_no) => {
            warn!(
                "n-gram file {} malformed at line {line_no}, continuing empty",
                path.display()
            );
            HashMap::new()
        }
    }
}

/// Parse `<gram>-->count` lines. One bad line rejects the whole file so a
/// corrupt resource cannot half-load; duplicate grams keep the last count.
fn parse_ngram_lines(text: &str) -> Result<HashMap<String, u64>, usize> {
    let mut table = HashMap::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        let (gram, count) = line.split_once("-->").ok_or(idx + 1)?;
        let count: u64 = count.parse().map_err(|_| idx + 1)?;
        table.insert(gram.to_string(), count);
    }
    Ok(table)
}
