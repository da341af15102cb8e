//! Greedy time-windowing of word streams into caption clips.
//!
//! A clip accumulates consecutive words until the next word would stretch it
//! past the configured maximum duration, measured from the clip's first
//! word. Measuring from the first word gives every clip a hard ceiling on
//! its span; measuring between neighbors would let gaps compound and produce
//! arbitrarily long captions.

use crate::types::{Clip, SpeakerRef, SpeakerRegistry, Word};

/// Default maximum clip span in seconds.
pub const DEFAULT_MAX_DURATION: f64 = 4.0;

/// Tunables for clip windowing.
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Maximum clip span in seconds, measured from the clip's first word.
    pub max_duration: f64,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_duration: DEFAULT_MAX_DURATION,
        }
    }
}

/// Windows word streams into caption clips.
///
/// Stateless between calls; one segmenter can serve any number of streams,
/// concurrently or not.
#[derive(Debug, Clone, Default)]
pub struct ClipSegmenter {
    config: SegmenterConfig,
}

impl ClipSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SegmenterConfig) -> Self {
        Self { config }
    }

    pub fn with_max_duration(mut self, seconds: f64) -> Self {
        self.config.max_duration = seconds;
        self
    }

    /// Lazily window `words` into clips.
    ///
    /// Every clip carries `speaker` unchanged. An empty stream yields no
    /// clips. The iterator pulls from `words` on demand, so dropping it
    /// early abandons the rest of the input without reading it.
    ///
    /// Words must be well formed (`end >= start`, nondecreasing starts);
    /// the readers enforce that boundary, and no further validation happens
    /// here.
    pub fn segment<I>(&self, words: I, speaker: Option<SpeakerRef>) -> Clips<I::IntoIter>
    where
        I: IntoIterator<Item = Word>,
    {
        Clips {
            words: words.into_iter(),
            open: None,
            max_duration: self.config.max_duration,
            speaker,
        }
    }
}

/// Lazy clip stream returned by [`ClipSegmenter::segment`].
#[derive(Debug)]
pub struct Clips<I> {
    words: I,
    open: Option<Clip>,
    max_duration: f64,
    speaker: Option<SpeakerRef>,
}

impl<I> Clips<I> {
    fn start_clip(&self, word: Word) -> Clip {
        Clip {
            start: word.start,
            end: word.end,
            text: word.text,
            speaker: self.speaker.clone(),
            begins_paragraph: false,
        }
    }
}

impl<I> Iterator for Clips<I>
where
    I: Iterator<Item = Word>,
{
    type Item = Clip;

    fn next(&mut self) -> Option<Clip> {
        loop {
            let Some(word) = self.words.next() else {
                // Input exhausted: flush the still-open clip, if any.
                return self.open.take();
            };

            let Some(mut clip) = self.open.take() else {
                self.open = Some(self.start_clip(word));
                continue;
            };

            // Window measured from the clip's first word, not the previous
            // word, so the split point depends only on the clip's own span.
            if word.end - clip.start < self.max_duration {
                clip.text.push(' ');
                clip.text.push_str(&word.text);
                clip.end = word.end;
                self.open = Some(clip);
            } else {
                self.open = Some(self.start_clip(word));
                return Some(clip);
            }
        }
    }
}

/// One speaker's contiguous run of words.
#[derive(Debug, Clone)]
pub struct SpeakerTurn {
    pub speaker: String,
    pub words: Vec<Word>,
}

/// Window each turn independently and concatenate the clip sequences.
///
/// Speaker names are interned through `registry`, so turns by the same
/// speaker share one [`SpeakerRef`] across the whole run. The first clip of
/// each turn is flagged `begins_paragraph`; a turn with no words contributes
/// nothing.
pub fn segment_turns<I>(
    turns: I,
    segmenter: &ClipSegmenter,
    registry: &mut SpeakerRegistry,
) -> Vec<Clip>
where
    I: IntoIterator<Item = SpeakerTurn>,
{
    let mut clips = Vec::new();
    for turn in turns {
        let speaker = registry.intern(&turn.speaker);
        let first = clips.len();
        clips.extend(segmenter.segment(turn.words, Some(speaker)));
        if let Some(clip) = clips.get_mut(first) {
            clip.begins_paragraph = true;
        }
    }
    clips
}
