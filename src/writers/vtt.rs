//! WebVTT serialization of caption clips.

use std::io::{self, Write};

use crate::types::Clip;

/// Write `clips` as a WebVTT document.
///
/// Header line, then numbered cues separated by blank lines, timings in
/// zero-padded `HH:MM:SS.mmm`. Speaker and paragraph metadata do not survive
/// the format and are not written.
pub fn write_vtt<'a, I, W>(clips: I, out: &mut W) -> io::Result<()>
where
    I: IntoIterator<Item = &'a Clip>,
    W: Write,
{
    writeln!(out, "WEBVTT")?;
    writeln!(out)?;
    for (index, clip) in clips.into_iter().enumerate() {
        writeln!(out, "{}", index + 1)?;
        writeln!(
            out,
            "{} --> {}",
            format_timestamp(clip.start),
            format_timestamp(clip.end)
        )?;
        writeln!(out, "{}", clip.text)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Format seconds as `HH:MM:SS.mmm`, truncating below the millisecond.
pub fn format_timestamp(seconds: f64) -> String {
    let whole = seconds.floor();
    let millis = ((seconds - whole) * 1000.0) as u64;
    let whole = whole as u64;
    let hours = whole / 3600;
    let minutes = (whole % 3600) / 60;
    let secs = whole % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}.{millis:03}")
}
