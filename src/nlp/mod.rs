//! Text processing components.
//!
//! Tokenization policies and stopword filtering used by keyword analysis.

pub mod stopwords;
pub mod tokenizer;
