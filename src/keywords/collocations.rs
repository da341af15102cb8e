//! Adjacent-pair collocation extraction.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::nlp::tokenizer::lax_tokens;
use crate::types::Collocation;

/// Extracts recurring two-word sequences whose members are both ranked
/// keywords.
///
/// Pairs are counted over the lax token stream, so adjacency reflects the
/// transcript as spoken: a content word next to a function word still counts
/// as a pair, it just never survives the keyword filter. Filtering happens
/// after counting: a pair is kept only if both halves made the keyword list
/// and it occurred at least `min_count` times.
#[derive(Debug, Clone)]
pub struct CollocationExtractor {
    min_count: u64,
}

impl Default for CollocationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CollocationExtractor {
    pub const DEFAULT_MIN_COUNT: u64 = 3;

    pub fn new() -> Self {
        Self {
            min_count: Self::DEFAULT_MIN_COUNT,
        }
    }

    /// Keep only pairs seen at least `min_count` times.
    pub fn with_min_count(mut self, min_count: u64) -> Self {
        self.min_count = min_count;
        self
    }

    /// Tokenize `lines` laxly into one ordered token list and extract the
    /// qualifying pairs.
    pub fn extract<I, S>(&self, lines: I, keywords: &FxHashSet<String>) -> Vec<Collocation>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<String> = lines
            .into_iter()
            .flat_map(|line| lax_tokens(line.as_ref()).collect::<Vec<_>>())
            .collect();
        self.extract_from_tokens(&tokens, keywords)
    }

    /// Extract qualifying pairs from an already-tokenized stream.
    ///
    /// An `n`-token stream has `n - 1` candidate pairs, none padded at the
    /// ends. The result is ordered most frequent first, ties alphabetical.
    pub fn extract_from_tokens(
        &self,
        tokens: &[String],
        keywords: &FxHashSet<String>,
    ) -> Vec<Collocation> {
        let mut counts: FxHashMap<(&str, &str), u64> = FxHashMap::default();
        for pair in tokens.windows(2) {
            *counts
                .entry((pair[0].as_str(), pair[1].as_str()))
                .or_insert(0) += 1;
        }

        let mut collocations: Vec<Collocation> = counts
            .into_iter()
            .filter(|&((first, second), count)| {
                count >= self.min_count && keywords.contains(first) && keywords.contains(second)
            })
            .map(|((first, second), count)| Collocation {
                pair: (first.to_string(), second.to_string()),
                count,
            })
            .collect();

        collocations.sort_by(|x, y| y.count.cmp(&x.count).then_with(|| x.pair.cmp(&y.pair)));
        collocations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword_set(words: &[&str]) -> FxHashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn counts_repeated_adjacent_pairs() {
        let extractor = CollocationExtractor::new();
        let keywords = keyword_set(&["climate", "change"]);
        let lines = ["climate change and climate change so climate change"];

        let collocations = extractor.extract(lines, &keywords);
        assert_eq!(collocations.len(), 1);
        assert_eq!(collocations[0].pair, ("climate".into(), "change".into()));
        assert_eq!(collocations[0].count, 3);
    }

    #[test]
    fn pairs_below_min_count_are_dropped() {
        let extractor = CollocationExtractor::new();
        let keywords = keyword_set(&["climate", "change"]);
        // Two occurrences: below the default threshold of three.
        let collocations = extractor.extract(["climate change climate change"], &keywords);
        assert!(collocations.is_empty());
    }

    #[test]
    fn exactly_three_occurrences_are_kept() {
        let extractor = CollocationExtractor::new();
        let keywords = keyword_set(&["deep", "sea"]);
        let collocations = extractor.extract(["deep sea deep sea deep sea"], &keywords);

        assert_eq!(collocations.len(), 1);
        assert_eq!(collocations[0].count, 3);
    }

    #[test]
    fn both_members_must_be_keywords() {
        let extractor = CollocationExtractor::new().with_min_count(1);
        let keywords = keyword_set(&["sea"]);

        assert!(extractor.extract(["deep sea"], &keywords).is_empty());
    }

    #[test]
    fn pairs_span_line_boundaries() {
        // Tokens form one ordered list across lines, so the last word of one
        // line is adjacent to the first word of the next.
        let extractor = CollocationExtractor::new().with_min_count(1);
        let keywords = keyword_set(&["alpha", "omega"]);
        let collocations = extractor.extract(["alpha", "omega"], &keywords);

        assert_eq!(collocations.len(), 1);
        assert_eq!(collocations[0].pair, ("alpha".into(), "omega".into()));
    }

    #[test]
    fn tokens_are_lowercased_before_pairing() {
        let extractor = CollocationExtractor::new().with_min_count(2);
        let keywords = keyword_set(&["machine", "learning"]);
        let collocations = extractor.extract(["Machine Learning machine learning"], &keywords);

        assert_eq!(collocations.len(), 1);
        assert_eq!(collocations[0].count, 2);
    }

    #[test]
    fn ordered_by_count_descending() {
        let extractor = CollocationExtractor::new().with_min_count(1);
        let keywords = keyword_set(&["red", "fox", "grey", "owl"]);
        let collocations = extractor.extract(["red fox grey owl red fox red fox"], &keywords);

        assert_eq!(collocations[0].pair, ("red".into(), "fox".into()));
        assert_eq!(collocations[0].count, 3);
        for pair in collocations.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
    }

    #[test]
    fn empty_and_single_token_inputs_yield_nothing() {
        let extractor = CollocationExtractor::new().with_min_count(1);
        let keywords = keyword_set(&["lonely"]);

        assert!(extractor.extract(Vec::<String>::new(), &keywords).is_empty());
        assert!(extractor.extract(["lonely"], &keywords).is_empty());
    }
}
