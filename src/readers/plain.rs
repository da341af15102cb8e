//! Reader for plain tokenizer output with inline timecodes.
//!
//! The format is whitespace-separated `token(start,end)` runs, times in
//! seconds, e.g. `hello(0.10,0.55) world(0.60,1.10)`. Two control tokens
//! appear inline: `<sil>` marks silence and `<s>` marks a segment boundary;
//! neither is a spoken word. Some engines also interleave diagnostic lines
//! beginning with `Falling back`, which carry no tokens.

use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::TranscriptError;
use crate::readers::checked_word;
use crate::segment::ClipSegmenter;
use crate::types::{Clip, Word};

/// Inline marker for a stretch of silence.
pub const SILENCE_TOKEN: &str = "<sil>";
/// Inline marker for a segment boundary.
pub const BOUNDARY_TOKEN: &str = "<s>";

const DIAGNOSTIC_PREFIX: &str = "Falling back";
const CONTEXT: &str = "reading token stream";

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^\s(]+)\(([\d.]+),([\d.]+)\)").expect("token pattern"));

/// Lazy iterator over every token in the stream, control tokens included.
///
/// This is the raw layer: [`words`] strips the control tokens and
/// [`Segments`] splits on them. Reading stops at the first error: after
/// yielding an `Err` the iterator is exhausted.
#[derive(Debug)]
pub struct PlainTokens<R> {
    lines: std::io::Lines<R>,
    queue: VecDeque<Result<Word, TranscriptError>>,
    done: bool,
}

impl<R: BufRead> PlainTokens<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            queue: VecDeque::new(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for PlainTokens<R> {
    type Item = Result<Word, TranscriptError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if let Some(item) = self.queue.pop_front() {
                if item.is_err() {
                    self.done = true;
                    self.queue.clear();
                }
                return Some(item);
            }
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.done = true;
                    return Some(Err(TranscriptError::io(CONTEXT, e)));
                }
            };
            if line.starts_with(DIAGNOSTIC_PREFIX) {
                tracing::warn!(line = %line, "skipping diagnostic line");
                continue;
            }
            for caps in TOKEN_RE.captures_iter(&line) {
                self.queue.push_back(parse_token(&caps));
            }
        }
    }
}

fn parse_token(caps: &regex::Captures<'_>) -> Result<Word, TranscriptError> {
    let text = &caps[1];
    let start = parse_seconds(&caps[2])?;
    let end = parse_seconds(&caps[3])?;
    checked_word(CONTEXT, text, start, end)
}

fn parse_seconds(field: &str) -> Result<f64, TranscriptError> {
    field
        .parse::<f64>()
        .map_err(|_| TranscriptError::timecode(CONTEXT, format!("bad seconds value {field:?}")))
}

/// The spoken words of the stream: every token except silences and segment
/// boundaries.
pub fn words<R: BufRead>(reader: R) -> impl Iterator<Item = Result<Word, TranscriptError>> {
    PlainTokens::new(reader).filter(|item| {
        item.as_ref()
            .map_or(true, |word| word.text != SILENCE_TOKEN && word.text != BOUNDARY_TOKEN)
    })
}

/// Iterator over the stream's segments, split on [`BOUNDARY_TOKEN`].
///
/// Silences are dropped; consecutive or leading boundaries never produce an
/// empty segment.
#[derive(Debug)]
pub struct Segments<R> {
    tokens: PlainTokens<R>,
}

impl<R: BufRead> Segments<R> {
    pub fn new(reader: R) -> Self {
        Self {
            tokens: PlainTokens::new(reader),
        }
    }
}

impl<R: BufRead> Iterator for Segments<R> {
    type Item = Result<Vec<Word>, TranscriptError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut segment = Vec::new();
        loop {
            match self.tokens.next() {
                Some(Err(e)) => return Some(Err(e)),
                Some(Ok(word)) if word.text == SILENCE_TOKEN => {}
                Some(Ok(word)) if word.text == BOUNDARY_TOKEN => {
                    if !segment.is_empty() {
                        return Some(Ok(segment));
                    }
                }
                Some(Ok(word)) => segment.push(word),
                None => {
                    if segment.is_empty() {
                        return None;
                    }
                    return Some(Ok(segment));
                }
            }
        }
    }
}

/// Read the whole stream into clips, windowing each segment independently.
///
/// A segment boundary always closes the open clip, even when the next word
/// would still have fit the time window.
pub fn read_clips<R: BufRead>(
    reader: R,
    segmenter: &ClipSegmenter,
) -> Result<Vec<Clip>, TranscriptError> {
    let mut clips = Vec::new();
    for segment in Segments::new(reader) {
        clips.extend(segmenter.segment(segment?, None));
    }
    Ok(clips)
}
