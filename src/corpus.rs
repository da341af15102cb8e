//! Background word-frequency table.
//!
//! Keyword significance is always measured against a large reference corpus
//! (for English, typically British National Corpus counts). The table is
//! loaded once at startup and shared by reference across every analysis;
//! nothing in the crate mutates it after construction.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use rustc_hash::FxHashMap;

use crate::error::TranscriptError;

/// Immutable word-frequency table for a reference corpus.
///
/// Lookups are total: a word the corpus has never seen has frequency 0, which
/// the log-likelihood guards handle without special-casing.
#[derive(Debug, Clone, Default)]
pub struct BackgroundCorpus {
    frequencies: FxHashMap<String, u64>,
    total: u64,
}

impl BackgroundCorpus {
    /// Build a corpus from explicit counts. Duplicate words accumulate.
    pub fn from_counts<I, S>(counts: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut frequencies: FxHashMap<String, u64> = FxHashMap::default();
        let mut total = 0u64;
        for (word, count) in counts {
            total += count;
            *frequencies.entry(word.into()).or_insert(0) += count;
        }
        Self { frequencies, total }
    }

    /// Parse a corpus from a JSON object mapping word to count.
    pub fn from_json_reader(reader: impl Read) -> Result<Self, TranscriptError> {
        let frequencies: FxHashMap<String, u64> = serde_json::from_reader(reader)
            .map_err(|e| TranscriptError::json("parsing background corpus", e))?;
        let total = frequencies.values().sum();
        Ok(Self { frequencies, total })
    }

    /// Load a JSON corpus file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TranscriptError> {
        let file = File::open(path.as_ref())
            .map_err(|e| TranscriptError::io("opening background corpus", e))?;
        let corpus = Self::from_json_reader(BufReader::new(file))?;
        tracing::debug!(
            words = corpus.len(),
            total = corpus.total,
            "background corpus loaded"
        );
        Ok(corpus)
    }

    /// Frequency of `word` in the reference corpus; 0 when absent.
    pub fn frequency(&self, word: &str) -> u64 {
        self.frequencies.get(word).copied().unwrap_or(0)
    }

    /// Total token count of the corpus (the sum of all frequencies).
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct words in the table.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn from_counts_sums_total() {
        let corpus = BackgroundCorpus::from_counts([("the", 100u64), ("ferret", 3), ("the", 50)]);

        assert_eq!(corpus.frequency("the"), 150);
        assert_eq!(corpus.frequency("ferret"), 3);
        assert_eq!(corpus.total(), 153);
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn unknown_word_has_zero_frequency() {
        let corpus = BackgroundCorpus::from_counts([("the", 10u64)]);
        assert_eq!(corpus.frequency("zyzzyva"), 0);
    }

    #[test]
    fn parses_json_object() {
        let json = r#"{"the": 6187267, "of": 2941444, "ferret": 104}"#;
        let corpus = BackgroundCorpus::from_json_reader(json.as_bytes()).unwrap();

        assert_eq!(corpus.frequency("ferret"), 104);
        assert_eq!(corpus.total(), 6187267 + 2941444 + 104);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = BackgroundCorpus::from_json_reader(&b"not json"[..]).unwrap_err();
        assert!(matches!(err, TranscriptError::Json { .. }));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"word": 7, "another": 3}}"#).unwrap();

        let corpus = BackgroundCorpus::load(file.path()).unwrap();
        assert_eq!(corpus.frequency("word"), 7);
        assert_eq!(corpus.total(), 10);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = BackgroundCorpus::load("/nonexistent/bnc.json").unwrap_err();
        assert!(matches!(err, TranscriptError::Io { .. }));
    }
}
