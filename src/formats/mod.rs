pub mod json;
pub mod time;
pub mod txt;
pub mod vtt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::model::{Cue, TranscriptMeta};

/// Output formats the editor can save.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Cue text only
    Plain,
    /// `[start - end] text` blocks
    Timestamped,
    /// WebVTT document
    Vtt,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Plain | ExportFormat::Timestamped => "txt",
            ExportFormat::Vtt => "vtt",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Plain | ExportFormat::Timestamped => "text/plain;charset=utf-8",
            ExportFormat::Vtt => "text/vtt",
        }
    }

    /// Formats that carry timing and therefore require every cue to validate.
    pub fn carries_timing(self) -> bool {
        !matches!(self, ExportFormat::Plain)
    }

    fn filename_suffix(self) -> &'static str {
        match self {
            ExportFormat::Timestamped => "_modified_with_ts",
            ExportFormat::Plain | ExportFormat::Vtt => "_modified",
        }
    }

    pub fn render(self, cues: &[Cue]) -> String {
        match self {
            ExportFormat::Plain => txt::write_plain(cues),
            ExportFormat::Timestamped => txt::write_timestamped(cues),
            ExportFormat::Vtt => vtt::write_vtt(cues),
        }
    }
}

/// Suggested file name for a save: source VTT stem, else audio base name, else `fallback`.
pub fn default_save_filename(meta: &TranscriptMeta, format: ExportFormat, fallback: &str) -> String {
    let base = meta
        .original_vtt_filename
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(strip_extension)
        .or(meta.audio_base_filename.as_deref().filter(|s| !s.is_empty()))
        .unwrap_or(fallback);

    format!("{base}{}.{}", format.filename_suffix(), format.extension())
}

fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) if i > 0 => &name[..i],
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_name_prefers_vtt_then_audio_then_fallback() {
        let mut meta = TranscriptMeta {
            original_vtt_filename: Some("talk.en.vtt".into()),
            audio_base_filename: Some("talk".into()),
        };
        assert_eq!(
            default_save_filename(&meta, ExportFormat::Vtt, "transcript"),
            "talk.en_modified.vtt"
        );
        assert_eq!(
            default_save_filename(&meta, ExportFormat::Timestamped, "transcript"),
            "talk.en_modified_with_ts.txt"
        );

        meta.original_vtt_filename = None;
        assert_eq!(
            default_save_filename(&meta, ExportFormat::Plain, "transcript"),
            "talk_modified.txt"
        );

        meta.audio_base_filename = None;
        assert_eq!(
            default_save_filename(&meta, ExportFormat::Plain, "transcript"),
            "transcript_modified.txt"
        );
    }

    #[test]
    fn dotfile_names_keep_their_stem() {
        let meta = TranscriptMeta {
            original_vtt_filename: Some(".vtt".into()),
            audio_base_filename: None,
        };
        assert_eq!(
            default_save_filename(&meta, ExportFormat::Vtt, "transcript"),
            ".vtt_modified.vtt"
        );
    }

    #[test]
    fn only_plain_text_skips_timing() {
        assert!(!ExportFormat::Plain.carries_timing());
        assert!(ExportFormat::Timestamped.carries_timing());
        assert!(ExportFormat::Vtt.carries_timing());
        assert_eq!(ExportFormat::Vtt.mime_type(), "text/vtt");
    }
}
