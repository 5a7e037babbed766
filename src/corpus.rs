//! Corpus download and n-gram table construction.
//!
//! `fetch` pulls a ZIP archive of plain-text corpus files over HTTP and
//! extracts its `.txt` members. `build_ngrams` scans a directory of such
//! files, counts unigrams, bigrams and trigrams, and writes the three
//! `<gram>-->count` files the resource loader reads.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Cursor};
use std::path::Path;

use crate::ngram::{bigram_key, trigram_key};
use crate::resources::{BIGRAMS_FILE, TRIGRAMS_FILE, UNIGRAMS_FILE};
use crate::tokenize::tokenize;

/// Default corpus archive: the project's curated Swahili/English web-text
/// snapshot, packaged as a ZIP of plain-text files.
pub const DEFAULT_CORPUS_URL: &str =
    "https://github.com/sanifu-nlp/sanifu-corpus/releases/download/v1/sanifu-corpus.zip";

/// Hard cap on the downloaded archive size.
const MAX_ARCHIVE_BYTES: u64 = 200 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("bad archive: {0}")]
    BadArchive(String),
}

/// N-gram counts accumulated over a corpus.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NGramCounts {
    pub unigrams: HashMap<String, u64>,
    pub bigrams: HashMap<String, u64>,
    pub trigrams: HashMap<String, u64>,
}

/// Download a corpus ZIP from `url` and extract its `.txt` members into
/// `dest`. Returns the number of files extracted.
pub fn fetch(url: &str, dest: &Path) -> Result<usize, CorpusError> {
    fs::create_dir_all(dest)?;

    eprintln!("Downloading corpus archive to {}...", dest.display());
    eprintln!("  {url}");
    let body = ureq::get(url)
        .call()
        .map_err(|e| CorpusError::Http(format!("{url}: {e}")))?
        .into_body()
        .with_config()
        .limit(MAX_ARCHIVE_BYTES)
        .read_to_vec()
        .map_err(|e| CorpusError::Http(format!("{url}: {e}")))?;

    let count = extract_text_members(&body, dest)?;
    if count == 0 {
        return Err(CorpusError::BadArchive(
            "no .txt members found in archive".to_string(),
        ));
    }
    eprintln!("Done. {count} files saved to {}", dest.display());
    Ok(count)
}

/// Extract the `.txt` members of a ZIP archive into `dest`.
/// Returns the number of files extracted. Uses basename only (zip-slip safe).
fn extract_text_members(archive_bytes: &[u8], dest: &Path) -> Result<usize, CorpusError> {
    let cursor = Cursor::new(archive_bytes);
    let mut archive = zip::ZipArchive::new(cursor)?;
    let mut count = 0;
    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let raw_name = file.name().to_string();
        if !raw_name.ends_with(".txt") {
            continue;
        }
        let basename = Path::new(&raw_name)
            .file_name()
            .ok_or_else(|| CorpusError::BadArchive(format!("invalid member name: {raw_name}")))?
            .to_string_lossy();
        let out_path = dest.join(&*basename);
        let mut out = fs::File::create(&out_path)?;
        io::copy(&mut file, &mut out)?;
        eprintln!("    → {basename}");
        count += 1;
    }
    Ok(count)
}

/// Count n-grams in one piece of text.
///
/// Each line is a sentence: words are lowercased and counted in order, and
/// grams never span a line break. Punctuation drops out of the word stream
/// without breaking adjacency.
pub fn count_ngrams(text: &str) -> NGramCounts {
    let mut counts = NGramCounts::default();
    count_into(text, &mut counts);
    counts
}

fn count_into(text: &str, counts: &mut NGramCounts) {
    for line in text.lines() {
        let words: Vec<String> = tokenize(line)
            .into_iter()
            .filter(|seg| seg.is_word)
            .map(|seg| seg.text.to_lowercase())
            .collect();

        for word in &words {
            *counts.unigrams.entry(word.clone()).or_insert(0) += 1;
        }
        for pair in words.windows(2) {
            *counts
                .bigrams
                .entry(bigram_key(&pair[0], &pair[1]))
                .or_insert(0) += 1;
        }
        for triple in words.windows(3) {
            *counts
                .trigrams
                .entry(trigram_key(&triple[0], &triple[1], &triple[2]))
                .or_insert(0) += 1;
        }
    }
}

/// Scan the `.txt` files under `input_dir`, count n-grams across all of
/// them, and write `unigrams.txt`, `bigrams.txt` and `trigrams.txt` under
/// `output_dir`. Returns the accumulated counts.
pub fn build_ngrams(input_dir: &Path, output_dir: &Path) -> Result<NGramCounts, CorpusError> {
    let mut files: Vec<_> = fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".txt"))
        .collect();
    files.sort_by_key(|e| e.file_name());

    if files.is_empty() {
        return Err(CorpusError::BadArchive(format!(
            "no .txt files found in {}",
            input_dir.display()
        )));
    }

    let mut counts = NGramCounts::default();
    for file_entry in &files {
        let path = file_entry.path();
        eprintln!("Reading {}...", path.display());
        let content = fs::read_to_string(&path)?;
        count_into(&content, &mut counts);
    }

    fs::create_dir_all(output_dir)?;
    write_counts(&counts.unigrams, &output_dir.join(UNIGRAMS_FILE))?;
    write_counts(&counts.bigrams, &output_dir.join(BIGRAMS_FILE))?;
    write_counts(&counts.trigrams, &output_dir.join(TRIGRAMS_FILE))?;

    Ok(counts)
}

/// Write one table in the `<gram>-->count` layout, keys sorted so rebuilds
/// are byte-identical.
fn write_counts(counts: &HashMap<String, u64>, path: &Path) -> Result<(), CorpusError> {
    let mut keys: Vec<&String> = counts.keys().collect();
    keys.sort();

    let mut out = String::with_capacity(counts.len() * 16);
    for key in keys {
        out.push_str(key);
        out.push_str("-->");
        out.push_str(&counts[key].to_string());
        out.push('\n');
    }
    Ok(fs::write(path, out)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    #[test]
    fn counts_stay_within_lines() {
        let counts = count_ngrams("niko na job\nniko na deadline");

        assert_eq!(counts.unigrams["niko"], 2);
        assert_eq!(counts.unigrams["na"], 2);
        assert_eq!(counts.unigrams["job"], 1);
        assert_eq!(counts.bigrams["niko na"], 2);
        assert_eq!(counts.bigrams["na job"], 1);
        assert_eq!(counts.trigrams["niko na job"], 1);
        assert_eq!(counts.trigrams["niko na deadline"], 1);
        // "deadline niko" would only exist if grams crossed the line break
        assert!(!counts.bigrams.contains_key("deadline niko"));
    }

    #[test]
    fn counts_lowercase_words() {
        let counts = count_ngrams("Niko NA Job");
        assert_eq!(counts.unigrams["niko"], 1);
        assert_eq!(counts.unigrams["na"], 1);
        assert_eq!(counts.bigrams["niko na"], 1);
        assert!(!counts.unigrams.contains_key("Niko"));
    }

    #[test]
    fn punctuation_drops_without_breaking_adjacency() {
        let counts = count_ngrams("habari, rafiki!");
        assert_eq!(counts.unigrams.len(), 2);
        assert_eq!(counts.bigrams["habari rafiki"], 1);
    }

    #[test]
    fn empty_text_counts_nothing() {
        assert_eq!(count_ngrams(""), NGramCounts::default());
        assert_eq!(count_ngrams("  ...  "), NGramCounts::default());
    }

    #[test]
    fn build_writes_sorted_loader_format() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(input.path().join("a.txt"), "niko na job\n").unwrap();
        fs::write(input.path().join("b.txt"), "niko home\n").unwrap();
        fs::write(input.path().join("notes.md"), "ignored entirely\n").unwrap();

        let counts = build_ngrams(input.path(), output.path()).unwrap();
        assert_eq!(counts.unigrams["niko"], 2);

        let unigrams = fs::read_to_string(output.path().join(UNIGRAMS_FILE)).unwrap();
        assert_eq!(unigrams, "home-->1\njob-->1\nna-->1\nniko-->2\n");
        let bigrams = fs::read_to_string(output.path().join(BIGRAMS_FILE)).unwrap();
        assert_eq!(bigrams, "na job-->1\nniko home-->1\nniko na-->1\n");
        let trigrams = fs::read_to_string(output.path().join(TRIGRAMS_FILE)).unwrap();
        assert_eq!(trigrams, "niko na job-->1\n");
    }

    #[test]
    fn build_errors_without_text_files() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(input.path().join("notes.md"), "not a corpus\n").unwrap();

        let err = build_ngrams(input.path(), output.path()).unwrap_err();
        assert!(matches!(err, CorpusError::BadArchive(_)));
    }

    fn archive_of(members: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in members {
            writer
                .start_file(name.to_string(), SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn extract_keeps_only_text_members() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = archive_of(&[
            ("docs/a.txt", "habari yako"),
            ("logo.png", "not text"),
            ("README", "not text either"),
        ]);

        let count = extract_text_members(&bytes, dir.path()).unwrap();
        assert_eq!(count, 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("a.txt")).unwrap(),
            "habari yako"
        );
        assert!(!dir.path().join("logo.png").exists());
    }

    #[test]
    fn extract_flattens_traversal_names() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = archive_of(&[("../escape.txt", "stays inside")]);

        let count = extract_text_members(&bytes, dir.path()).unwrap();
        assert_eq!(count, 1);
        assert!(dir.path().join("escape.txt").exists());
        assert!(!dir.path().parent().unwrap().join("escape.txt").exists());
    }

    #[test]
    fn garbage_bytes_are_a_zip_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_text_members(b"definitely not a zip", dir.path()).unwrap_err();
        assert!(matches!(err, CorpusError::Zip(_)));
    }
}
