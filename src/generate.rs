use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::{
    error::TranscriptionError,
    formats::vtt::{VttReport, parse_vtt_with_report},
    model::TranscriptMeta,
    store::CueStore,
};

const DEFAULT_AUDIO_MIME: &str = "audio/mpeg";

/// Audio handed to a transcription service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionRequest {
    pub audio_base64: String,
    pub mime_type: String,
}

impl TranscriptionRequest {
    pub fn from_audio(bytes: &[u8], mime_type: Option<&str>) -> Self {
        Self {
            audio_base64: BASE64.encode(bytes),
            mime_type: mime_type
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(DEFAULT_AUDIO_MIME)
                .to_string(),
        }
    }
}

/// A remote speech-to-text backend that answers with VTT-ish text.
pub trait TranscriptionService {
    fn transcribe(&self, request: &TranscriptionRequest) -> Result<String, TranscriptionError>;
}

/// Removes a markdown code fence around a generated document and makes sure it
/// starts with a `WEBVTT` header.
pub fn normalize_generated_vtt(text: &str) -> String {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix("```") {
        let (info, after) = rest.split_once('\n').unwrap_or((rest, ""));
        let info = info.trim();
        // "```vtt" or bare "```" on its own line
        body = if info.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            after
        } else {
            rest
        };
    }
    if let Some(rest) = body.trim_end().strip_suffix("```") {
        body = rest;
    }

    let body = body.trim();
    if body.starts_with("WEBVTT") {
        body.to_string()
    } else {
        tracing::warn!("generated transcript has no WEBVTT header, prepending one");
        format!("WEBVTT\n\n{body}")
    }
}

/// Runs `service` and, only if it succeeds, replaces the store's document with the result.
pub fn generate_transcript(
    store: &mut CueStore,
    service: &dyn TranscriptionService,
    request: &TranscriptionRequest,
) -> Result<VttReport, TranscriptionError> {
    tracing::info!(
        mime = request.mime_type.as_str(),
        payload_bytes = request.audio_base64.len(),
        "requesting transcript"
    );

    let text = service.transcribe(request).inspect_err(|e| {
        tracing::error!(err = %e, "transcription failed, keeping current transcript");
    })?;
    if text.trim().is_empty() {
        tracing::error!("transcription returned nothing, keeping current transcript");
        return Err(TranscriptionError::EmptyResponse);
    }

    let report = parse_vtt_with_report(&normalize_generated_vtt(&text));
    if report.cues.is_empty() {
        tracing::error!(
            dropped = report.dropped.len(),
            "no cues in transcription response, keeping current transcript"
        );
        return Err(TranscriptionError::MissingText);
    }

    let audio_base = store.meta().audio_base_filename.clone();
    let meta = TranscriptMeta {
        original_vtt_filename: Some(format!(
            "{}_generated.vtt",
            audio_base.as_deref().unwrap_or("transcript")
        )),
        audio_base_filename: audio_base,
    };
    store.load(report.cues.clone(), meta);

    tracing::info!(
        cues = report.cues.len(),
        dropped = report.dropped.len(),
        "generated transcript loaded"
    );
    Ok(report)
}
