//! Caption clip segmentation and corpus-statistical keyword extraction for
//! podcast transcripts.
//!
//! The crate covers the analysis core of a transcription pipeline:
//!
//! - **Readers** ([`readers`]) normalize engine-specific output — inline
//!   `token(start,end)` streams, XML marker lists, XML segment/label trees
//!   with speakers, WebVTT/SRT cue files — into timed [`Word`]s or [`Clip`]s
//!   in seconds.
//! - **Segmentation** ([`segment`]) windows word streams into caption clips
//!   with a hard per-clip duration ceiling, respecting segment and speaker
//!   boundaries.
//! - **Analysis** ([`keywords`]) ranks transcript words by log-likelihood
//!   significance against a [`BackgroundCorpus`] and extracts keyword
//!   collocations for tagging and search.
//! - **Writers** ([`writers`]) serialize clips back out as WebVTT.
//!
//! ```
//! use cliprank::{BackgroundCorpus, ClipSegmenter, TranscriptAnalyzer, Word};
//!
//! let corpus = BackgroundCorpus::from_counts([("the", 6_000_000u64), ("resin", 30)]);
//! let words = vec![
//!     Word::new("the", 0.0, 0.2),
//!     Word::new("resin", 0.2, 0.8),
//!     Word::new("cracked", 0.9, 1.4),
//!     Word::new("raw", 4.2, 4.4),
//!     Word::new("resin", 4.5, 5.1),
//!     Word::new("everywhere", 5.1, 5.9),
//! ];
//!
//! let segmenter = ClipSegmenter::new();
//! let clips: Vec<_> = segmenter.segment(words, None).collect();
//! assert_eq!(clips[0].text, "the resin cracked");
//! assert_eq!(clips[1].text, "raw resin everywhere");
//!
//! let analyzer = TranscriptAnalyzer::new(&corpus);
//! let analysis = analyzer.analyze(clips.iter().map(|c| c.text.as_str()));
//! assert_eq!(analysis.keywords[0].word, "resin");
//! ```

pub mod corpus;
pub mod error;
pub mod keywords;
pub mod nlp;
pub mod readers;
pub mod segment;
pub mod types;
pub mod writers;

pub use corpus::BackgroundCorpus;
pub use error::TranscriptError;
pub use keywords::{
    log_likelihood, AnalyzerConfig, CollocationExtractor, KeywordRanker, TranscriptAnalyzer,
};
pub use nlp::stopwords::StopwordFilter;
pub use segment::{segment_turns, ClipSegmenter, Clips, SegmenterConfig, SpeakerTurn};
pub use types::{
    Clip, Collocation, KeywordScore, Speaker, SpeakerRef, SpeakerRegistry, TranscriptAnalysis,
    Word,
};
