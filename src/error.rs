use thiserror::Error;

/// A timestamp string matched neither `HH:MM:SS.mmm` nor `MM:SS.mmm`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time format: '{text}'")]
pub struct TimeFormatError {
    pub text: String,
}

impl TimeFormatError {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

/// Why a timestamp edit was refused. The stored value is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditRejection {
    #[error("timestamp must look like HH:MM:SS.mmm or MM:SS.mmm")]
    InvalidFormat,
    #[error("start time must be before end time")]
    OrderViolation,
    #[error("no cue at that index")]
    NoSuchCue,
}

/// A timing line in source text that could not be read. The cue it introduced is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line_number}: cannot parse timing line '{line}': {cause}")]
pub struct CueTimingError {
    pub line_number: usize,
    pub line: String,
    pub cause: String,
}

#[derive(Debug, Error)]
pub enum TranscriptionError {
    #[error("transcription service failed: {0}")]
    Service(String),
    #[error("transcription service returned an empty response")]
    EmptyResponse,
    #[error("no transcript text could be extracted from the response")]
    MissingText,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("cannot save: {count} invalid timestamp(s) found (HH:MM:SS.mmm, start < end)")]
    InvalidTimestamps { count: usize },
    #[error("nothing to save: the transcript is empty")]
    EmptyTranscript,
}

#[derive(Debug, Error)]
pub enum AutosaveError {
    #[error("autosave is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("autosave is incomplete: {0}")]
    Incomplete(&'static str),
}
