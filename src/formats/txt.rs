use crate::{formats::time::seconds_to_vtt_time, model::Cue};

/// Cue texts separated by a blank line, no timing.
pub fn write_plain(cues: &[Cue]) -> String {
    cues.iter()
        .map(|c| c.text.trim())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// `[HH:MM:SS.mmm - HH:MM:SS.mmm] text` per cue, blank-line separated.
pub fn write_timestamped(cues: &[Cue]) -> String {
    cues.iter()
        .map(|c| {
            format!(
                "[{} - {}] {}",
                seconds_to_vtt_time(c.start),
                seconds_to_vtt_time(c.end),
                c.text.trim()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
