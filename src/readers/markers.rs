//! Reader for XML marker lists with frame-indexed times.
//!
//! Editing tools export speech analysis as dynamic-media marker tracks: a
//! `frameRate` declaration (`f100` for 100 fps, `f30000s1001` for the
//! rational 30000/1001) followed by a `markers` list whose entries carry
//! `name`, `startTime`, and `duration` in frames. A document may hold
//! several tracks; every marker list is read, in order, against the rate
//! most recently declared before it. Times divide by the frame rate to give
//! seconds, so a list with no rate anywhere before it is unusable and
//! rejected.
//!
//! The documents are machine-emitted with one element per line and no CDATA
//! tricks, so the reader scans with anchored patterns instead of pulling in
//! a full XML parser; namespace prefixes are accepted and ignored.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::TranscriptError;
use crate::readers::{checked_word, unescape_xml};
use crate::segment::ClipSegmenter;
use crate::types::{Clip, Word};

const CONTEXT: &str = "reading marker list";

static MARKERS_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(?:\w+:)?markers[\s>]").expect("markers pattern"));
static MARKERS_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</(?:\w+:)?markers\s*>").expect("markers close pattern"));
static FRAME_RATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(?:\w+:)?frameRate\s*>([^<]*)<").expect("frame rate pattern"));
static LI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<(?:\w+:)?li\b[^>]*>(.*?)</(?:\w+:)?li\s*>").expect("list item pattern")
});
static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(?:\w+:)?(name|startTime|duration)\s*>([^<]*)<").expect("field pattern")
});

static SIMPLE_RATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^f(\d+)$").expect("simple rate pattern"));
static RATIONAL_RATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^f(\d+)s(\d+)$").expect("rational rate pattern"));

/// Extract the marker words of `xml`, converted to seconds.
///
/// Multi-track documents carry several marker lists; their entries
/// concatenate in document order, each list converted with the frame rate
/// most recently declared before it. A document without a marker list
/// yields no words. A marker list with no frame rate anywhere before it is
/// an error.
pub fn words(xml: &str) -> Result<Vec<Word>, TranscriptError> {
    let mut words = Vec::new();
    let mut rate = None;
    let mut cursor = 0;
    while let Some(open) = MARKERS_OPEN_RE.find(&xml[cursor..]) {
        let open_start = cursor + open.start();
        let open_end = cursor + open.end();

        if let Some(caps) = FRAME_RATE_RE.captures_iter(&xml[cursor..open_start]).last() {
            rate = Some(parse_frame_rate(&caps[1])?);
        }
        let Some(rate) = rate else {
            return Err(TranscriptError::format(
                CONTEXT,
                "no frame rate declared before the marker list",
            ));
        };

        let rest = &xml[open_end..];
        let Some(close) = MARKERS_CLOSE_RE.find(rest) else {
            return Err(TranscriptError::format(CONTEXT, "unterminated marker list"));
        };
        for item in LI_RE.captures_iter(&rest[..close.start()]) {
            words.push(parse_marker(&item[1], rate)?);
        }
        cursor = open_end + close.end();
    }
    tracing::debug!(words = words.len(), "marker lists read");
    Ok(words)
}

/// Read the marker words of `xml` and window them into clips.
pub fn read_clips(xml: &str, segmenter: &ClipSegmenter) -> Result<Vec<Clip>, TranscriptError> {
    Ok(segmenter.segment(words(xml)?, None).collect())
}

fn parse_marker(body: &str, rate: f64) -> Result<Word, TranscriptError> {
    let mut name = None;
    let mut start_frames = None;
    let mut duration_frames = None;
    for field in FIELD_RE.captures_iter(body) {
        let value = field.get(2).map_or("", |m| m.as_str()).trim();
        match &field[1] {
            "name" => name = Some(unescape_xml(value)),
            "startTime" => start_frames = Some(parse_frames(value)?),
            "duration" => duration_frames = Some(parse_frames(value)?),
            _ => unreachable!(),
        }
    }

    let name = name.ok_or_else(|| missing_field("name"))?;
    let start_frames = start_frames.ok_or_else(|| missing_field("startTime"))?;
    let duration_frames = duration_frames.ok_or_else(|| missing_field("duration"))?;

    let start = start_frames / rate;
    let end = (start_frames + duration_frames) / rate;
    checked_word(CONTEXT, &name, start, end)
}

fn missing_field(field: &str) -> TranscriptError {
    TranscriptError::format(CONTEXT, format!("marker is missing its {field} field"))
}

fn parse_frames(field: &str) -> Result<f64, TranscriptError> {
    field.parse::<f64>().map_err(|_| {
        TranscriptError::timecode(CONTEXT, format!("non-numeric frame count {field:?}"))
    })
}

fn parse_frame_rate(text: &str) -> Result<f64, TranscriptError> {
    let text = text.trim();
    let rate = if let Some(caps) = RATIONAL_RATE_RE.captures(text) {
        let numerator = parse_frames(&caps[1])?;
        let denominator = parse_frames(&caps[2])?;
        if denominator == 0.0 {
            return Err(TranscriptError::format(
                CONTEXT,
                format!("frame rate {text:?} divides by zero"),
            ));
        }
        numerator / denominator
    } else if let Some(caps) = SIMPLE_RATE_RE.captures(text) {
        parse_frames(&caps[1])?
    } else {
        return Err(TranscriptError::format(
            CONTEXT,
            format!("unrecognized frame rate {text:?}"),
        ));
    };

    if rate <= 0.0 || !rate.is_finite() {
        return Err(TranscriptError::format(
            CONTEXT,
            format!("frame rate {text:?} is not positive"),
        ));
    }
    Ok(rate)
}
