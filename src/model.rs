use serde::{Deserialize, Serialize};

/// One timed text entry. Identity is the cue's index in its sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Cue {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.start < self.end
    }

    /// Half-open `[start, end)` containment.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t < self.end
    }

    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Start => self.start,
            Field::End => self.end,
        }
    }

    pub(crate) fn set(&mut self, field: Field, value: f64) {
        match field {
            Field::Start => self.start = value,
            Field::End => self.end = value,
        }
    }
}

/// Which bound of a cue an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Start,
    End,
}

impl Field {
    pub fn other(self) -> Field {
        match self {
            Field::Start => Field::End,
            Field::End => Field::Start,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Start => "start",
            Field::End => "end",
        }
    }

    /// Whether `value` placed in this field is consistent with `other` in the sibling field.
    pub fn orders_with(self, value: f64, other: f64) -> bool {
        match self {
            Field::Start => value < other,
            Field::End => other < value,
        }
    }
}

/// File names the document was loaded from, used for save names and autosave.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptMeta {
    pub original_vtt_filename: Option<String>,
    pub audio_base_filename: Option<String>,
}

impl TranscriptMeta {
    pub fn from_vtt_path(path: &std::path::Path) -> Self {
        Self {
            original_vtt_filename: path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|s| s.to_string()),
            audio_base_filename: None,
        }
    }
}
