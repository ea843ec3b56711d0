use crate::{
    error::EditRejection,
    formats::time::parse_lenient_edit_time,
    model::Field,
    store::{CueStore, FieldState},
};

/// A committed timestamp edit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accepted {
    pub value: f64,
    /// Set when the sibling field's pending text became valid and was committed too.
    pub sibling_committed: Option<f64>,
    /// Whether the sibling field's invalid flag was cleared by this edit.
    pub sibling_cleared: bool,
}

/// Validates `raw` for one bound of cue `index` and commits it on success.
///
/// Rejections leave the stored value alone and flag the field; an ordering
/// rejection flags the sibling field as well.
pub fn validate_timestamp_edit(
    store: &mut CueStore,
    index: usize,
    field: Field,
    raw: &str,
) -> Result<Accepted, EditRejection> {
    let Some(cue) = store.cue(index) else {
        return Err(EditRejection::NoSuchCue);
    };
    let sibling = field.other();
    let committed_sibling = cue.get(sibling);

    let Some(value) = parse_lenient_edit_time(raw) else {
        set_state(store, index, field, EditRejection::InvalidFormat, raw);
        tracing::debug!(cue = index, field = field.as_str(), raw, "timestamp edit has invalid format");
        return Err(EditRejection::InvalidFormat);
    };

    let pending_sibling = pending_value(store, index, sibling);
    let other = pending_sibling.unwrap_or(committed_sibling);

    if !field.orders_with(value, other) {
        set_state(store, index, field, EditRejection::OrderViolation, raw);
        if let Some(flags) = store.flags_mut(index) {
            flags.field_mut(sibling).rejection = Some(EditRejection::OrderViolation);
        }
        tracing::debug!(
            cue = index,
            field = field.as_str(),
            value,
            other,
            "timestamp edit breaks start < end"
        );
        return Err(EditRejection::OrderViolation);
    }

    if let Some(cue) = store.cue_mut(index) {
        cue.set(field, value);
    }
    if let Some(flags) = store.flags_mut(index) {
        *flags.field_mut(field) = FieldState::default();
    }
    tracing::info!(cue = index, field = field.as_str(), value, "timestamp updated");

    let mut accepted = Accepted {
        value,
        sibling_committed: None,
        sibling_cleared: false,
    };

    let sibling_flagged = store
        .flags(index)
        .is_some_and(|f| f.field(sibling).is_invalid());
    if sibling_flagged {
        let has_pending = store
            .flags(index)
            .is_some_and(|f| f.field(sibling).pending.is_some());

        match pending_sibling {
            Some(p) if sibling.orders_with(p, value) => {
                if let Some(cue) = store.cue_mut(index) {
                    cue.set(sibling, p);
                }
                accepted.sibling_committed = Some(p);
                accepted.sibling_cleared = true;
            }
            None if !has_pending && sibling.orders_with(committed_sibling, value) => {
                accepted.sibling_cleared = true;
            }
            _ => {}
        }

        if accepted.sibling_cleared {
            if let Some(flags) = store.flags_mut(index) {
                *flags.field_mut(sibling) = FieldState::default();
            }
            tracing::debug!(cue = index, field = sibling.as_str(), "sibling timestamp valid again");
        }
    }

    Ok(accepted)
}

/// Re-runs validation over every cue ahead of a timestamped save.
///
/// Pending field text is retried, and cues whose committed bounds are out of
/// order get both fields flagged. Returns the number of invalid fields.
pub fn revalidate_all(store: &mut CueStore) -> usize {
    for index in 0..store.len() {
        for field in [Field::Start, Field::End] {
            let pending = store
                .flags(index)
                .and_then(|f| f.field(field).pending.clone());
            if let Some(raw) = pending {
                let _ = validate_timestamp_edit(store, index, field, &raw);
            }
        }

        if store.cue(index).is_some_and(|c| !c.is_ordered()) {
            if let Some(flags) = store.flags_mut(index) {
                for field in [Field::Start, Field::End] {
                    let state = flags.field_mut(field);
                    if state.rejection.is_none() {
                        state.rejection = Some(EditRejection::OrderViolation);
                    }
                }
            }
        }
    }

    let invalid = store.invalid_field_count();
    if invalid > 0 {
        tracing::warn!(invalid, "document has invalid timestamps");
    }
    invalid
}

fn pending_value(store: &CueStore, index: usize, field: Field) -> Option<f64> {
    store
        .flags(index)
        .and_then(|f| f.field(field).pending.as_deref())
        .and_then(parse_lenient_edit_time)
}

fn set_state(store: &mut CueStore, index: usize, field: Field, rejection: EditRejection, raw: &str) {
    if let Some(flags) = store.flags_mut(index) {
        *flags.field_mut(field) = FieldState {
            rejection: Some(rejection),
            pending: Some(raw.to_string()),
        };
    }
}
