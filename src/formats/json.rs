use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    config::Autosave,
    error::AutosaveError,
    model::{Cue, TranscriptMeta},
};

/// Persisted form of an editing session: plain `{start, end, text}` triples plus file names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutosaveSnapshot {
    #[serde(default)]
    pub transcript: Option<Vec<Cue>>,
    #[serde(default)]
    pub original_vtt_filename: Option<String>,
    #[serde(default)]
    pub audio_base_filename: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize)]
struct Content<'a> {
    transcript: &'a [Cue],
    meta: &'a TranscriptMeta,
}

/// Produces autosave payloads, skipping ones whose content matches the last payload.
#[derive(Debug)]
pub struct Autosaver {
    interval_secs: u64,
    last_run: Option<DateTime<Utc>>,
    last_content: Option<String>,
}

impl Default for Autosaver {
    fn default() -> Self {
        Self::from_config(&Autosave::default())
    }
}

impl Autosaver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(cfg: &Autosave) -> Self {
        Self {
            interval_secs: cfg.interval_secs,
            last_run: None,
            last_content: None,
        }
    }

    pub fn interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.interval_secs)
    }

    /// Whether a full interval has passed since the last snapshot attempt.
    /// A clock that went backwards counts as due.
    pub fn due(&self, now: DateTime<Utc>) -> bool {
        let Some(last) = self.last_run else {
            return true;
        };
        match u64::try_from((now - last).num_seconds()) {
            Ok(elapsed) => elapsed >= self.interval_secs,
            Err(_) => true,
        }
    }

    /// Host timer entry point: snapshots only when [`Autosaver::due`].
    pub fn tick(
        &mut self,
        cues: &[Cue],
        meta: &TranscriptMeta,
        now: DateTime<Utc>,
    ) -> Result<Option<String>, AutosaveError> {
        if !self.due(now) {
            return Ok(None);
        }
        self.snapshot(cues, meta, now)
    }

    /// Returns the JSON to store, or `None` when nothing changed since the last call.
    pub fn snapshot(
        &mut self,
        cues: &[Cue],
        meta: &TranscriptMeta,
        now: DateTime<Utc>,
    ) -> Result<Option<String>, AutosaveError> {
        self.last_run = Some(now);
        let content = serde_json::to_string(&Content {
            transcript: cues,
            meta,
        })?;
        if self.last_content.as_deref() == Some(content.as_str()) {
            tracing::trace!("autosave skipped, content unchanged");
            return Ok(None);
        }

        let snapshot = AutosaveSnapshot {
            transcript: Some(cues.to_vec()),
            original_vtt_filename: meta.original_vtt_filename.clone(),
            audio_base_filename: meta.audio_base_filename.clone(),
            timestamp: now,
        };
        let out = serde_json::to_string(&snapshot)?;
        self.last_content = Some(content);
        tracing::debug!(cues = cues.len(), bytes = out.len(), "autosave snapshot produced");
        Ok(Some(out))
    }

    /// Marks restored content as already saved.
    pub fn remember(&mut self, cues: &[Cue], meta: &TranscriptMeta) -> Result<(), AutosaveError> {
        self.last_content = Some(serde_json::to_string(&Content {
            transcript: cues,
            meta,
        })?);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.last_content = None;
    }
}

/// Decodes an autosave payload back into cues and file names.
pub fn restore(raw: &str) -> Result<(Vec<Cue>, TranscriptMeta, DateTime<Utc>), AutosaveError> {
    let snapshot: AutosaveSnapshot = serde_json::from_str(raw)?;
    let transcript = snapshot
        .transcript
        .ok_or(AutosaveError::Incomplete("missing transcript"))?;

    if snapshot.original_vtt_filename.is_none() && snapshot.audio_base_filename.is_none() {
        return Err(AutosaveError::Incomplete("missing file names"));
    }

    let meta = TranscriptMeta {
        original_vtt_filename: snapshot.original_vtt_filename,
        audio_base_filename: snapshot.audio_base_filename,
    };
    Ok((transcript, meta, snapshot.timestamp))
}
