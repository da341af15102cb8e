use thiserror::Error;

/// Failures surfaced at the adapter and resource boundaries.
///
/// The analysis core itself is total: empty input, unknown background words,
/// and arithmetic degeneracies all produce empty or zero-valued results, not
/// errors. Only reading transcript data and loading the background corpus
/// can fail.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed timecode while {context}: {message}")]
    Timecode {
        context: &'static str,
        message: String,
    },
    #[error("{context}: {message}")]
    Format {
        context: &'static str,
        message: String,
    },
}

impl TranscriptError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn timecode(context: &'static str, message: impl Into<String>) -> Self {
        Self::Timecode {
            context,
            message: message.into(),
        }
    }

    pub(crate) fn format(context: &'static str, message: impl Into<String>) -> Self {
        Self::Format {
            context,
            message: message.into(),
        }
    }
}
