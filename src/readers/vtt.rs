//! WebVTT and SRT caption reader.
//!
//! Cue files already carry caption-sized units, so this reader produces
//! [`Clip`]s directly instead of a word stream; re-windowing captions that a
//! human already timed would only make them worse.
//!
//! Parsing is a five-state line scanner: preamble, separator, cue id,
//! timecode, text, looping back to separator on the blank line that closes a
//! cue. The optional `WEBVTT` header and the optional per-cue identifier
//! line make the two formats close enough to share the scanner.

use std::io::BufRead;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::TranscriptError;
use crate::types::Clip;

const CONTEXT: &str = "reading caption cues";

static TIMECODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+):(\d+):(\d+)[.,](\d+)\s*-->\s*(\d+):(\d+):(\d+)[.,](\d+)")
        .expect("cue timing pattern")
});

/// Parse a WebVTT or SRT document into clips.
///
/// Multi-line cue text is joined with spaces. Cues carry no speaker and no
/// paragraph flag. A cue line where the timing should be is an error, as is
/// a cue that ends before it starts.
pub fn read_clips<R: BufRead>(reader: R) -> Result<Vec<Clip>, TranscriptError> {
    let mut scanner = CueScanner::new();
    for line in reader.lines() {
        let line = line.map_err(|e| TranscriptError::io(CONTEXT, e))?;
        scanner.handle(line.trim())?;
    }
    Ok(scanner.finish())
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Preamble,
    Separator,
    CueId,
    Timecode,
    Text,
}

#[derive(Debug)]
struct CueScanner {
    state: State,
    start: f64,
    end: f64,
    lines: Vec<String>,
    clips: Vec<Clip>,
}

impl CueScanner {
    fn new() -> Self {
        Self {
            state: State::Preamble,
            start: 0.0,
            end: 0.0,
            lines: Vec::new(),
            clips: Vec::new(),
        }
    }

    fn handle(&mut self, line: &str) -> Result<(), TranscriptError> {
        match self.state {
            State::Preamble => {
                self.state = State::Separator;
                // SRT files have no header; reprocess the line as content.
                if !line.starts_with("WEBVTT") {
                    self.handle(line)?;
                }
            }
            State::Separator => {
                if !line.is_empty() {
                    self.state = State::CueId;
                    self.handle(line)?;
                }
            }
            State::CueId => {
                self.state = State::Timecode;
                // The identifier line is optional; a timing line takes its
                // place directly.
                if TIMECODE_RE.is_match(line) {
                    self.handle(line)?;
                }
            }
            State::Timecode => {
                let caps = TIMECODE_RE.captures(line).ok_or_else(|| {
                    TranscriptError::timecode(
                        CONTEXT,
                        format!("expected a cue timing line, got {line:?}"),
                    )
                })?;
                self.start = cue_seconds(&caps, 1)?;
                self.end = cue_seconds(&caps, 5)?;
                if self.end < self.start {
                    return Err(TranscriptError::timecode(
                        CONTEXT,
                        format!("cue ends at {} before it starts at {}", self.end, self.start),
                    ));
                }
                self.state = State::Text;
            }
            State::Text => {
                if line.is_empty() {
                    self.flush();
                    self.state = State::Separator;
                } else {
                    self.lines.push(line.to_string());
                }
            }
        }
        Ok(())
    }

    fn flush(&mut self) {
        let text = self.lines.join(" ");
        self.lines.clear();
        self.clips.push(Clip {
            start: self.start,
            end: self.end,
            text,
            speaker: None,
            begins_paragraph: false,
        });
    }

    fn finish(mut self) -> Vec<Clip> {
        // A file may end without the closing blank line.
        if self.state == State::Text {
            self.flush();
        }
        tracing::debug!(clips = self.clips.len(), "caption cues read");
        self.clips
    }
}

fn cue_seconds(caps: &regex::Captures<'_>, first_group: usize) -> Result<f64, TranscriptError> {
    let mut parts = [0u64; 4];
    for (i, part) in parts.iter_mut().enumerate() {
        let field = &caps[first_group + i];
        *part = field.parse().map_err(|_| {
            TranscriptError::timecode(CONTEXT, format!("timecode field {field:?} out of range"))
        })?;
    }
    let [hours, minutes, seconds, millis] = parts;
    let whole = hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|hm| hm.checked_add(seconds))
        .ok_or_else(|| {
            TranscriptError::timecode(
                CONTEXT,
                format!("timecode {hours}:{minutes}:{seconds} out of range"),
            )
        })?;
    Ok(whole as f64 + millis as f64 / 1000.0)
}
