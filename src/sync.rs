use crate::{config::Playback, formats::time::format_display_time, model::Cue, store::CueStore};

/// Requests the synchronizer makes of the host's media player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerCommand {
    Play,
    Pause,
    Seek(f64),
}

/// One media clock update as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub time: f64,
    pub playing: bool,
    /// Whether the text editing surface currently holds input focus.
    pub editor_focused: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncUpdate {
    pub active: Option<usize>,
    /// The active cue differs from the previous tick's.
    pub transition: bool,
    pub focus_changed: bool,
    /// Clock readout, refreshed on every tick.
    pub clock: String,
    pub command: Option<PlayerCommand>,
}

/// Lowest index whose `[start, end)` contains `t`.
///
/// Cues are not guaranteed sorted after edits, so this scans rather than bisects.
pub fn find_active_cue(cues: &[Cue], t: f64) -> Option<usize> {
    cues.iter().position(|c| c.contains(t))
}

/// Follows the media clock and keeps the store's cursors in step with it.
#[derive(Debug, Clone)]
pub struct Synchronizer {
    auto_pause: bool,
    auto_pause_lead: f64,
    paused_for_editing: bool,
}

impl Synchronizer {
    pub fn new(cfg: &Playback) -> Self {
        Self {
            auto_pause: cfg.auto_pause,
            auto_pause_lead: cfg.auto_pause_lead_secs.max(0.0),
            paused_for_editing: false,
        }
    }

    pub fn paused_for_editing(&self) -> bool {
        self.paused_for_editing
    }

    pub fn on_time_update(&mut self, store: &mut CueStore, tick: Tick) -> SyncUpdate {
        let command = self.check_auto_pause(store, tick);

        let active = find_active_cue(store.cues(), tick.time);
        let transition = active != store.active();
        let mut focus_changed = false;

        if transition {
            tracing::debug!(from = ?store.active(), to = ?active, time = tick.time, "active cue changed");
            if let Some(index) = active {
                // Never swap out text the user is typing into.
                if !tick.editor_focused {
                    focus_changed = store.focus_cue(index);
                }
            }
            store.set_active(active);
        }

        SyncUpdate {
            active,
            transition,
            focus_changed,
            clock: format_display_time(tick.time),
            command,
        }
    }

    /// The editing surface lost focus: commit its text, and resume if playback
    /// was paused for editing.
    pub fn on_editor_blur(&mut self, store: &mut CueStore) -> Option<PlayerCommand> {
        store.commit_draft();
        if self.paused_for_editing {
            tracing::info!("resuming playback after editor blur");
            Some(PlayerCommand::Play)
        } else {
            None
        }
    }

    /// Playback started, by the user or by us.
    pub fn on_play(&mut self) {
        if self.paused_for_editing {
            tracing::debug!("manual resume, clearing paused-for-editing");
        }
        self.paused_for_editing = false;
    }

    /// Focuses cue `index` and asks the player to jump to its start.
    pub fn seek_to_cue(&mut self, store: &mut CueStore, index: usize) -> Option<PlayerCommand> {
        let start = store.cue(index)?.start;
        if !start.is_finite() {
            return None;
        }
        store.focus_cue(index);
        Some(PlayerCommand::Seek(start))
    }

    fn check_auto_pause(&mut self, store: &CueStore, tick: Tick) -> Option<PlayerCommand> {
        if !self.auto_pause || !tick.editor_focused || !tick.playing {
            return None;
        }
        let index = store.focused()?;
        let cue = store.cue(index)?;
        if tick.time >= cue.end - self.auto_pause_lead {
            self.paused_for_editing = true;
            tracing::info!(cue = index, time = tick.time, "paused for editing at end of cue");
            return Some(PlayerCommand::Pause);
        }
        None
    }
}
