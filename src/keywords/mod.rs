//! Statistical keyword and collocation analysis.
//!
//! Given the plain text of a transcript, surfaces the words (and adjacent
//! word pairs) that distinguish it from ordinary language. Single words are
//! scored with a log-likelihood ratio against a background corpus; pairs are
//! counted over the raw token stream and kept when both halves are already
//! significant keywords.
//!
//! [`KeywordRanker`] and [`CollocationExtractor`] can be used separately;
//! [`TranscriptAnalyzer`] runs both over one tokenization pass and is what
//! tagging and publishing layers call.

mod collocations;
mod loglik;
mod ranker;

pub use collocations::CollocationExtractor;
pub use loglik::log_likelihood;
pub use ranker::KeywordRanker;

use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::corpus::BackgroundCorpus;
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::{is_keyword_token, lax_tokens, MIN_KEYWORD_CHARS};
use crate::types::TranscriptAnalysis;

/// Tunables for keyword and collocation analysis.
///
/// The defaults match how the background corpus itself was counted; change
/// `min_token_chars` only with a corpus prepared the same way.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Maximum number of ranked keywords returned.
    pub top_n: usize,
    /// Minimum keyword length in characters.
    pub min_token_chars: usize,
    /// Minimum occurrences for a collocation to be reported.
    pub min_collocation_count: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            top_n: 100,
            min_token_chars: MIN_KEYWORD_CHARS,
            min_collocation_count: CollocationExtractor::DEFAULT_MIN_COUNT,
        }
    }
}

/// Combined keyword and collocation analysis over one tokenization pass.
///
/// The strict token counts (for ranking) are a filtered view of the lax
/// token list (for pairing), so both are built while reading each line once.
#[derive(Debug)]
pub struct TranscriptAnalyzer<'a> {
    corpus: &'a BackgroundCorpus,
    stopwords: StopwordFilter,
    config: AnalyzerConfig,
}

impl<'a> TranscriptAnalyzer<'a> {
    pub fn new(corpus: &'a BackgroundCorpus) -> Self {
        Self::with_config(corpus, AnalyzerConfig::default())
    }

    pub fn with_config(corpus: &'a BackgroundCorpus, config: AnalyzerConfig) -> Self {
        Self {
            corpus,
            stopwords: StopwordFilter::default(),
            config,
        }
    }

    /// Replace the default English stopword filter.
    pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
        self.stopwords = stopwords;
        self
    }

    /// Analyze the text of one transcript.
    ///
    /// `lines` is typically the caption text of every clip in a track. The
    /// keyword list feeds the collocation filter, so the two outputs are
    /// consistent by construction. Empty input yields an empty analysis.
    pub fn analyze<I, S>(&self, lines: I) -> TranscriptAnalysis
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts: FxHashMap<String, u64> = FxHashMap::default();
        let mut sample_total = 0u64;
        let mut tokens: Vec<String> = Vec::new();

        for line in lines {
            for token in lax_tokens(line.as_ref()) {
                if is_keyword_token(&token, &self.stopwords, self.config.min_token_chars) {
                    sample_total += 1;
                    *counts.entry(token.clone()).or_insert(0) += 1;
                }
                tokens.push(token);
            }
        }

        let keywords = ranker::score_counts(&counts, sample_total, self.corpus, self.config.top_n);
        let keyword_set: FxHashSet<String> = keywords.iter().map(|k| k.word.clone()).collect();
        let collocations = CollocationExtractor::new()
            .with_min_count(self.config.min_collocation_count)
            .extract_from_tokens(&tokens, &keyword_set);

        tracing::debug!(
            tokens = tokens.len(),
            retained = sample_total,
            keywords = keywords.len(),
            collocations = collocations.len(),
            "transcript analyzed"
        );

        TranscriptAnalysis {
            keywords,
            collocations,
        }
    }

    /// Analyze many transcripts in parallel.
    ///
    /// Transcripts are independent and the background corpus is shared
    /// read-only, so this is a plain data-parallel map.
    pub fn analyze_batch(&self, transcripts: &[Vec<String>]) -> Vec<TranscriptAnalysis> {
        transcripts
            .par_iter()
            .map(|lines| self.analyze(lines))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_corpus() -> BackgroundCorpus {
        BackgroundCorpus::from_counts([
            ("the", 600_000u64),
            ("and", 400_000),
            ("climate", 800),
            ("change", 9_000),
        ])
    }

    #[test]
    fn analysis_links_collocations_to_keywords() {
        let corpus = make_corpus();
        let analyzer = TranscriptAnalyzer::new(&corpus);

        let lines = vec![
            "climate change is coming and climate change is here",
            "we talk climate change every week",
        ];
        let analysis = analyzer.analyze(lines);

        assert!(analysis.keywords.iter().any(|k| k.word == "climate"));
        assert!(analysis.keywords.iter().any(|k| k.word == "change"));
        assert_eq!(analysis.collocations.len(), 1);
        assert_eq!(
            analysis.collocations[0].pair,
            ("climate".into(), "change".into())
        );
        assert_eq!(analysis.collocations[0].count, 3);
    }

    #[test]
    fn collocations_use_lax_adjacency() {
        // "of" never ranks as a keyword, so pairs containing it are dropped
        // even though they were counted.
        let corpus = make_corpus();
        let analyzer = TranscriptAnalyzer::new(&corpus);

        let analysis = analyzer.analyze([
            "signs of change signs of change signs of change",
        ]);

        assert!(analysis
            .collocations
            .iter()
            .all(|c| c.pair.0 != "of" && c.pair.1 != "of"));
    }

    #[test]
    fn empty_input_yields_empty_analysis() {
        let corpus = make_corpus();
        let analyzer = TranscriptAnalyzer::new(&corpus);

        let analysis = analyzer.analyze(Vec::<String>::new());
        assert!(analysis.keywords.is_empty());
        assert!(analysis.collocations.is_empty());
    }

    #[test]
    fn batch_matches_sequential() {
        let corpus = make_corpus();
        let analyzer = TranscriptAnalyzer::new(&corpus);

        let transcripts = vec![
            vec!["climate change climate change climate change".to_string()],
            vec!["the weather and the forecast".to_string()],
            Vec::new(),
        ];

        let batch = analyzer.analyze_batch(&transcripts);
        assert_eq!(batch.len(), 3);
        for (lines, parallel) in transcripts.iter().zip(&batch) {
            let sequential = analyzer.analyze(lines);
            assert_eq!(sequential.keywords, parallel.keywords);
            assert_eq!(sequential.collocations, parallel.collocations);
        }
    }
}
