// SPDX-License-Identifier: MPL-2.0
//! Story playback engine.
//!
//! Pure state machines with injected time; no rendering and no I/O. The
//! screen glue in [`crate::ui::story_viewer`] feeds them events and performs
//! the effects they return.
//!
//! - [`clock`] - Normalized progress of the active story (self-timed or player-driven)
//! - [`gesture`] - Pointer classification into taps, holds and dismiss drags
//! - [`sequence`] - Current index over a shrinking story list
//! - [`seen`] - At-most-once "seen" reporting per session
//! - [`roster`] - Epoch-guarded viewer roster loading
//! - [`session`] - The orchestrating [`session::StoryPlaybackSession`]
//! - [`draft`] - Filter and duration selection for a story being composed

pub mod clock;
pub mod draft;
pub mod gesture;
pub mod roster;
pub mod seen;
pub mod sequence;
pub mod session;

pub use clock::{ClockEvent, ClockSource, ProgressClock};
pub use draft::StoryDraft;
pub use gesture::{Gesture, GestureSettings};
pub use roster::{RosterOutcome, RosterRequest, ViewerRosterFetcher};
pub use seen::ViewRecordDeduplicator;
pub use sequence::{Removal, SequenceController, Step};
pub use session::{Effect, ExitReason, Message, SessionSettings, StoryPlaybackSession};
