//! Cue model, WebVTT parsing and validation, and playback-to-cue
//! synchronisation for reviewing timed transcripts against their audio.

pub mod cli;
pub mod config;
pub mod error;
pub mod formats;
pub mod generate;
pub mod model;
pub mod pipeline;
pub mod save;
pub mod store;
pub mod sync;
pub mod validate;

pub use error::{
    AutosaveError, CueTimingError, EditRejection, ExportError, TimeFormatError, TranscriptionError,
};
pub use formats::ExportFormat;
pub use model::{Cue, Field, TranscriptMeta};
pub use store::CueStore;
pub use sync::{PlayerCommand, Synchronizer, Tick};
