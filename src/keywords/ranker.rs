//! Keyword ranking against the background corpus.

use std::cmp::Ordering;

use rustc_hash::FxHashMap;

use crate::corpus::BackgroundCorpus;
use crate::keywords::loglik::log_likelihood;
use crate::keywords::AnalyzerConfig;
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::strict_tokens;
use crate::types::KeywordScore;

/// Ranks the words of a transcript by log-likelihood significance.
///
/// Borrows the background corpus, so many rankers (or many parallel calls on
/// one ranker) can share a single loaded table.
#[derive(Debug)]
pub struct KeywordRanker<'a> {
    corpus: &'a BackgroundCorpus,
    stopwords: StopwordFilter,
    config: AnalyzerConfig,
}

impl<'a> KeywordRanker<'a> {
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

    /// Score and rank the retained tokens of `lines`.
    ///
    /// Returns at most `top_n` keywords, highest score first; ties break
    /// alphabetically so equal inputs rank identically across runs. Empty
    /// input yields an empty list.
    pub fn rank<I, S>(&self, lines: I) -> Vec<KeywordScore>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts: FxHashMap<String, u64> = FxHashMap::default();
        let mut sample_total = 0u64;

        for line in lines {
            for token in strict_tokens(line.as_ref(), &self.stopwords, self.config.min_token_chars)
            {
                sample_total += 1;
                *counts.entry(token).or_insert(0) += 1;
            }
        }

        score_counts(&counts, sample_total, self.corpus, self.config.top_n)
    }
}

/// Score a prepared frequency map and order the result.
///
/// Shared by [`KeywordRanker::rank`] and the combined analyzer, which builds
/// the map itself during its single pass.
pub(crate) fn score_counts(
    counts: &FxHashMap<String, u64>,
    sample_total: u64,
    corpus: &BackgroundCorpus,
    top_n: usize,
) -> Vec<KeywordScore> {
    let mut scored: Vec<KeywordScore> = counts
        .iter()
        .map(|(word, &sample_freq)| KeywordScore {
            word: word.clone(),
            score: log_likelihood(
                corpus.frequency(word),
                sample_freq,
                corpus.total(),
                sample_total,
            ),
        })
        .collect();

    scored.sort_by(|x, y| {
        y.score
            .partial_cmp(&x.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| x.word.cmp(&y.word))
    });
    scored.truncate(top_n);
    scored
}
