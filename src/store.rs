use crate::{
    error::EditRejection,
    model::{Cue, Field, TranscriptMeta},
};

/// Validation state of one timestamp field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldState {
    pub rejection: Option<EditRejection>,
    /// Text the user typed that has not been accepted yet.
    pub pending: Option<String>,
}

impl FieldState {
    pub fn is_invalid(&self) -> bool {
        self.rejection.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CueFlags {
    pub start: FieldState,
    pub end: FieldState,
}

impl CueFlags {
    pub fn field(&self, field: Field) -> &FieldState {
        match field {
            Field::Start => &self.start,
            Field::End => &self.end,
        }
    }

    pub(crate) fn field_mut(&mut self, field: Field) -> &mut FieldState {
        match field {
            Field::Start => &mut self.start,
            Field::End => &mut self.end,
        }
    }

    pub fn invalid_fields(&self) -> usize {
        usize::from(self.start.is_invalid()) + usize::from(self.end.is_invalid())
    }
}

/// The cue before, at, and after a focused index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueContext<'a> {
    pub previous: Option<(usize, &'a Cue)>,
    pub current: (usize, &'a Cue),
    pub next: Option<(usize, &'a Cue)>,
}

/// Owns the cue sequence, its per-field validation flags, and the editing cursors.
#[derive(Debug, Default)]
pub struct CueStore {
    cues: Vec<Cue>,
    flags: Vec<CueFlags>,
    meta: TranscriptMeta,
    focused: Option<usize>,
    active: Option<usize>,
    draft: String,
}

impl CueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cues(cues: Vec<Cue>, meta: TranscriptMeta) -> Self {
        let mut store = Self::new();
        store.load(cues, meta);
        store
    }

    /// Discards the current document and all session state in favour of `cues`.
    pub fn load(&mut self, cues: Vec<Cue>, meta: TranscriptMeta) {
        tracing::info!(
            cues = cues.len(),
            source = meta.original_vtt_filename.as_deref().unwrap_or(""),
            "transcript loaded"
        );
        self.flags = vec![CueFlags::default(); cues.len()];
        self.cues = cues;
        self.meta = meta;
        self.focused = None;
        self.active = None;
        self.draft.clear();
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn cue(&self, index: usize) -> Option<&Cue> {
        self.cues.get(index)
    }

    pub(crate) fn cue_mut(&mut self, index: usize) -> Option<&mut Cue> {
        self.cues.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn meta(&self) -> &TranscriptMeta {
        &self.meta
    }

    pub fn set_audio_base_filename(&mut self, name: impl Into<String>) {
        self.meta.audio_base_filename = Some(name.into());
    }

    pub fn flags(&self, index: usize) -> Option<&CueFlags> {
        self.flags.get(index)
    }

    pub(crate) fn flags_mut(&mut self, index: usize) -> Option<&mut CueFlags> {
        self.flags.get_mut(index)
    }

    /// Cue loaded into the editing surface.
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Cue under the playback position.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub(crate) fn set_active(&mut self, index: Option<usize>) {
        self.active = index;
    }

    /// Current contents of the editing surface.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Records a keystroke-level change to the editing surface. Nothing is committed.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Writes the draft into the focused cue. Returns whether the cue text changed.
    pub fn commit_draft(&mut self) -> bool {
        let Some(index) = self.focused else {
            return false;
        };
        let Some(cue) = self.cues.get_mut(index) else {
            return false;
        };
        if cue.text == self.draft {
            return false;
        }

        cue.text.clone_from(&self.draft);
        tracing::debug!(cue = index, chars = cue.text.chars().count(), "cue text committed");
        true
    }

    /// Moves the editing surface to `index`, committing the draft of the cue it leaves.
    /// Returns whether focus moved.
    pub fn focus_cue(&mut self, index: usize) -> bool {
        if index >= self.cues.len() || self.focused == Some(index) {
            return false;
        }

        self.commit_draft();
        self.draft.clone_from(&self.cues[index].text);
        self.focused = Some(index);
        tracing::debug!(cue = index, "focus moved");
        true
    }

    pub fn context(&self, index: usize) -> Option<CueContext<'_>> {
        let current = self.cues.get(index)?;
        let previous = index
            .checked_sub(1)
            .and_then(|i| self.cues.get(i).map(|c| (i, c)));
        let next = self.cues.get(index + 1).map(|c| (index + 1, c));

        Some(CueContext {
            previous,
            current: (index, current),
            next,
        })
    }

    /// Number of timestamp fields currently flagged invalid.
    pub fn invalid_field_count(&self) -> usize {
        self.flags.iter().map(CueFlags::invalid_fields).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CueStore {
        CueStore::with_cues(
            vec![
                Cue::new(0.0, 1.0, "zero"),
                Cue::new(1.0, 2.0, "one"),
                Cue::new(2.0, 3.0, "two"),
            ],
            TranscriptMeta::default(),
        )
    }

    #[test]
    fn focus_commits_draft_of_previous_cue() {
        let mut s = store();
        assert!(s.focus_cue(0));
        assert_eq!(s.draft(), "zero");

        s.set_draft("  zero, edited ");
        assert_eq!(s.cue(0).unwrap().text, "zero");

        assert!(s.focus_cue(2));
        assert_eq!(s.cue(0).unwrap().text, "  zero, edited ");
        assert_eq!(s.draft(), "two");
        assert_eq!(s.focused(), Some(2));
    }

    #[test]
    fn refocusing_same_cue_keeps_draft() {
        let mut s = store();
        s.focus_cue(1);
        s.set_draft("typing");
        assert!(!s.focus_cue(1));
        assert_eq!(s.draft(), "typing");
        assert!(!s.focus_cue(9));
    }

    #[test]
    fn commit_without_focus_is_a_no_op() {
        let mut s = store();
        s.set_draft("orphan");
        assert!(!s.commit_draft());
        assert!(s.cues().iter().all(|c| c.text != "orphan"));
    }

    #[test]
    fn load_resets_session_state() {
        let mut s = store();
        s.focus_cue(1);
        s.set_active(Some(1));
        s.flags_mut(0).unwrap().start.rejection = Some(EditRejection::InvalidFormat);

        s.load(vec![Cue::new(5.0, 6.0, "new")], TranscriptMeta::default());
        assert_eq!(s.len(), 1);
        assert_eq!(s.focused(), None);
        assert_eq!(s.active(), None);
        assert_eq!(s.draft(), "");
        assert_eq!(s.invalid_field_count(), 0);
    }

    #[test]
    fn context_has_neighbours() {
        let s = store();
        let ctx = s.context(0).unwrap();
        assert!(ctx.previous.is_none());
        assert_eq!(ctx.next.map(|(i, _)| i), Some(1));

        let ctx = s.context(2).unwrap();
        assert_eq!(ctx.previous.map(|(_, c)| c.text.as_str()), Some("one"));
        assert!(ctx.next.is_none());
        assert!(s.context(3).is_none());
    }
}
