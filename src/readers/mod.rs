//! Format-specific readers producing the canonical word stream.
//!
//! Transcription engines and caption tools disagree about everything:
//! units (seconds, frames, centiseconds), carriers (inline markers, XML
//! trees, cue blocks), and what metadata rides along. Each reader here
//! normalizes one format into [`Word`] records timed in seconds, emitted in
//! nondecreasing start order, or into ready-made [`Clip`]s for formats whose
//! units are already caption-sized.
//!
//! Timecode validation happens at this boundary: a record whose end precedes
//! its start is rejected here, and the segmenter downstream trusts its
//! input.
//!
//! [`Word`]: crate::types::Word
//! [`Clip`]: crate::types::Clip

pub mod markers;
pub mod plain;
pub mod segments;
pub mod vtt;

use crate::error::TranscriptError;
use crate::types::Word;

/// Build a [`Word`] after checking the interval is well formed.
pub(crate) fn checked_word(
    context: &'static str,
    text: &str,
    start: f64,
    end: f64,
) -> Result<Word, TranscriptError> {
    if end < start {
        return Err(TranscriptError::timecode(
            context,
            format!("word {text:?} ends at {end} before it starts at {start}"),
        ));
    }
    Ok(Word::new(text, start, end))
}

/// Decode the five predefined XML entities. `&amp;` goes last so a literal
/// `&amp;lt;` does not turn into `<`.
pub(crate) fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
