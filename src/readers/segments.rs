//! Reader for XML segment/label transcripts with speaker turns.
//!
//! Transcription services that diarize deliver a tree of `segment` elements,
//! each naming its speaker and holding `label` children, one per word, with
//! `start`/`end` timecodes in centiseconds. Segments are natural discourse
//! boundaries: each is windowed independently and its first clip opens a new
//! paragraph.
//!
//! Like the marker reader, this scans the machine-emitted document with
//! anchored patterns rather than a full XML parser.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::error::TranscriptError;
use crate::readers::{checked_word, unescape_xml};
use crate::segment::{segment_turns, ClipSegmenter, SpeakerTurn};
use crate::types::{Clip, SpeakerRef, SpeakerRegistry, Word};

const CONTEXT: &str = "reading segmented transcript";
const CENTISECONDS: f64 = 100.0;

static SEGMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<segment\b[^>]*>(.*?)</segment\s*>").expect("segment pattern")
});
static SPEAKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<speaker\s*>([^<]*)<").expect("speaker pattern"));
static LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<label\b[^>]*>(.*?)</label\s*>").expect("label pattern"));
static START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<start\s*>([^<]*)<").expect("start pattern"));
static END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<end\s*>([^<]*)<").expect("end pattern"));
static VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<value\s*>([^<]*)<").expect("value pattern"));

/// Clips plus the distinct speakers of one transcript, in order of first
/// appearance.
#[derive(Debug)]
pub struct SegmentedTranscript {
    pub clips: Vec<Clip>,
    pub speakers: Vec<SpeakerRef>,
}

/// Extract speaker turns from `xml`, one per segment element, with times
/// converted from centiseconds to seconds.
pub fn turns(xml: &str) -> Result<Vec<SpeakerTurn>, TranscriptError> {
    let mut turns = Vec::new();
    for segment in SEGMENT_RE.captures_iter(xml) {
        turns.push(parse_segment(&segment[1])?);
    }
    Ok(turns)
}

/// Read `xml` into clips, windowing each segment independently.
///
/// Speaker names intern into a registry scoped to this call, so clips from
/// different segments by the same speaker share one [`SpeakerRef`], while
/// separate documents never do.
pub fn read_clips(
    xml: &str,
    segmenter: &ClipSegmenter,
) -> Result<SegmentedTranscript, TranscriptError> {
    let turns = turns(xml)?;

    let mut registry = SpeakerRegistry::new();
    let mut speakers: Vec<SpeakerRef> = Vec::new();
    for turn in &turns {
        let speaker = registry.intern(&turn.speaker);
        if !speakers.iter().any(|known| Arc::ptr_eq(known, &speaker)) {
            speakers.push(speaker);
        }
    }

    let clips = segment_turns(turns, segmenter, &mut registry);
    tracing::debug!(
        clips = clips.len(),
        speakers = speakers.len(),
        "segmented transcript read"
    );
    Ok(SegmentedTranscript { clips, speakers })
}

fn parse_segment(body: &str) -> Result<SpeakerTurn, TranscriptError> {
    let speaker = match SPEAKER_RE.captures(body) {
        Some(caps) => unescape_xml(caps[1].trim()),
        None => {
            return Err(TranscriptError::format(
                CONTEXT,
                "segment has no speaker element",
            ))
        }
    };

    let mut words = Vec::new();
    for label in LABEL_RE.captures_iter(body) {
        words.push(parse_label(&label[1])?);
    }
    Ok(SpeakerTurn { speaker, words })
}

fn parse_label(body: &str) -> Result<Word, TranscriptError> {
    let value = VALUE_RE
        .captures(body)
        .ok_or_else(|| missing_field("value"))?;
    let start = START_RE
        .captures(body)
        .ok_or_else(|| missing_field("start"))?;
    let end = END_RE.captures(body).ok_or_else(|| missing_field("end"))?;

    let start = parse_centiseconds(start[1].trim())? / CENTISECONDS;
    let end = parse_centiseconds(end[1].trim())? / CENTISECONDS;
    checked_word(CONTEXT, &unescape_xml(value[1].trim()), start, end)
}

fn missing_field(field: &str) -> TranscriptError {
    TranscriptError::format(CONTEXT, format!("label is missing its {field} element"))
}

fn parse_centiseconds(field: &str) -> Result<f64, TranscriptError> {
    field.parse::<f64>().map_err(|_| {
        TranscriptError::timecode(CONTEXT, format!("non-numeric timecode {field:?}"))
    })
}
