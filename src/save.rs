use crate::{error::ExportError, formats::ExportFormat, store::CueStore, validate::revalidate_all};

/// Renders the document for saving.
///
/// The editor's draft is committed first. Formats that carry timing are refused
/// while any timestamp is invalid; plain text is always available.
pub fn save_document(store: &mut CueStore, format: ExportFormat) -> Result<String, ExportError> {
    store.commit_draft();

    if store.is_empty() {
        return Err(ExportError::EmptyTranscript);
    }

    if format.carries_timing() {
        let count = revalidate_all(store);
        if count > 0 {
            return Err(ExportError::InvalidTimestamps { count });
        }
    }

    let out = format.render(store.cues());
    tracing::info!(?format, cues = store.len(), bytes = out.len(), "document rendered");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{Cue, Field, TranscriptMeta},
        validate::validate_timestamp_edit,
    };

    fn store() -> CueStore {
        CueStore::with_cues(
            vec![Cue::new(1.0, 3.5, "Hello world"), Cue::new(4.0, 6.0, "Second cue")],
            TranscriptMeta::default(),
        )
    }

    #[test]
    fn invalid_timestamps_block_only_timed_formats() {
        let mut s = store();
        validate_timestamp_edit(&mut s, 1, Field::Start, "whenever").unwrap_err();

        assert_eq!(
            save_document(&mut s, ExportFormat::Vtt),
            Err(ExportError::InvalidTimestamps { count: 1 })
        );
        assert_eq!(
            save_document(&mut s, ExportFormat::Timestamped),
            Err(ExportError::InvalidTimestamps { count: 1 })
        );
        assert_eq!(
            save_document(&mut s, ExportFormat::Plain).unwrap(),
            "Hello world\n\nSecond cue"
        );
    }

    #[test]
    fn save_includes_uncommitted_draft() {
        let mut s = store();
        s.focus_cue(0);
        s.set_draft("Hello there");
        let out = save_document(&mut s, ExportFormat::Vtt).unwrap();
        assert!(out.contains("00:00:01.000 --> 00:00:03.500\nHello there\n"));
    }

    #[test]
    fn empty_document_is_not_saved() {
        let mut s = CueStore::new();
        assert_eq!(
            save_document(&mut s, ExportFormat::Plain),
            Err(ExportError::EmptyTranscript)
        );
    }
}
