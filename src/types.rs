//! Core data types shared across the crate.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::Serialize;

/// A single transcribed token with its timing interval.
///
/// Times are seconds from the start of the recording. Every reader converts
/// its native unit (frames, centiseconds, `HH:MM:SS.mmm`) into this form, so
/// downstream code never sees format-specific time bases.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl Word {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Span of the word in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A caption unit covering one or more consecutive words.
///
/// Produced by [`ClipSegmenter`](crate::segment::ClipSegmenter) from timed
/// word streams, or directly by the caption readers for formats that already
/// carry caption-sized cues.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    /// Start time of the first word, in seconds.
    pub start: f64,
    /// End time of the last word, in seconds.
    pub end: f64,
    /// Space-joined text of the folded words, in time order.
    pub text: String,
    /// Attribution for speaker-segmented sources; `None` otherwise.
    pub speaker: Option<SpeakerRef>,
    /// True on the first clip of a speaker turn. Rendering layers use this
    /// to open a new paragraph.
    pub begins_paragraph: bool,
}

/// A named speaker in a transcript.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Speaker {
    pub name: String,
}

/// Shared handle to a [`Speaker`].
///
/// Identity is the allocation: every clip attributed to the same speaker in
/// one run holds a clone of the same `Arc`, so renderers can group clips by
/// pointer without comparing names.
pub type SpeakerRef = Arc<Speaker>;

/// Interning map from speaker name to its single [`SpeakerRef`].
///
/// Owned by the caller and scoped to one transcript run; separate runs get
/// separate registries and never share speaker identity.
#[derive(Debug, Default)]
pub struct SpeakerRegistry {
    by_name: FxHashMap<String, SpeakerRef>,
}

impl SpeakerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the handle for `name`, creating it on first sight.
    pub fn intern(&mut self, name: &str) -> SpeakerRef {
        if let Some(speaker) = self.by_name.get(name) {
            return Arc::clone(speaker);
        }
        let speaker: SpeakerRef = Arc::new(Speaker {
            name: name.to_string(),
        });
        self.by_name.insert(name.to_string(), Arc::clone(&speaker));
        speaker
    }

    /// Handle for `name`, if it has been interned.
    pub fn get(&self, name: &str) -> Option<&SpeakerRef> {
        self.by_name.get(name)
    }

    /// All interned speakers, in arbitrary order.
    pub fn speakers(&self) -> impl Iterator<Item = &SpeakerRef> {
        self.by_name.values()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// A word together with its log-likelihood significance score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordScore {
    pub word: String,
    pub score: f64,
}

/// An adjacent two-word sequence and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collocation {
    pub pair: (String, String),
    pub count: u64,
}

impl Collocation {
    /// The pair as a single space-joined phrase, e.g. for tagging.
    pub fn phrase(&self) -> String {
        format!("{} {}", self.pair.0, self.pair.1)
    }
}

/// Combined result of one analysis pass over a transcript.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TranscriptAnalysis {
    /// Ranked keywords, most significant first.
    pub keywords: Vec<KeywordScore>,
    /// Keyword collocations, most frequent first.
    pub collocations: Vec<Collocation>,
}

impl TranscriptAnalysis {
    /// Keywords scoring strictly above `threshold`, preserving rank order.
    pub fn keywords_above(&self, threshold: f64) -> impl Iterator<Item = &KeywordScore> {
        self.keywords.iter().filter(move |k| k.score > threshold)
    }
}
