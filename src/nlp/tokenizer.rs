//! Tokenization policies for transcript text.
//!
//! Two deliberately different policies read the same lines. Keyword ranking
//! needs tokens comparable with the background corpus, so it drops anything
//! the corpus would not contain; collocation counting needs true adjacency,
//! so it keeps every token in position and nothing is filtered before pairs
//! are counted.

use crate::nlp::stopwords::StopwordFilter;

/// Default minimum keyword length in characters. Shorter tokens are mostly
/// noise from the transcription engine.
pub const MIN_KEYWORD_CHARS: usize = 3;

/// Every whitespace-delimited token of `line`, lowercased, in order.
pub fn lax_tokens(line: &str) -> impl Iterator<Item = String> + '_ {
    line.split_whitespace().map(|w| w.to_lowercase())
}

/// Whether an already-lowercased token is retained for keyword ranking.
///
/// A token survives if it is not a stopword, is entirely alphabetic (no
/// digits, punctuation, or markup residue), and has at least `min_chars`
/// characters.
pub fn is_keyword_token(token: &str, stopwords: &StopwordFilter, min_chars: usize) -> bool {
    !stopwords.is_stopword(token)
        && token.chars().all(char::is_alphabetic)
        && token.chars().count() >= min_chars
}

/// Lowercased tokens of `line` that pass the keyword retention policy.
pub fn strict_tokens<'a>(
    line: &'a str,
    stopwords: &'a StopwordFilter,
    min_chars: usize,
) -> impl Iterator<Item = String> + 'a {
    lax_tokens(line).filter(move |token| is_keyword_token(token, stopwords, min_chars))
}
