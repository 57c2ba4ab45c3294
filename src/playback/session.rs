// SPDX-License-Identifier: MPL-2.0
//! Story playback session: the state machine behind the full-screen viewer.
//!
//! One session exists per opened story group. It composes the progress
//! clock, the gesture interpreter, the sequence controller, the seen-report
//! deduplicator and the roster fetcher, and is driven only by messages:
//! classified gestures, clock ticks, player status callbacks, media load
//! results, service responses and external removal/close signals.
//!
//! Every side effect (loading media, driving the native player, network
//! calls, closing the screen) is returned as an [`Effect`] for the owner to
//! perform. Time is injected through `now` on every call.
//!
//! # Phases
//!
//! ```text
//! Loading ──loaded──▶ Playing ◀──toggle/hold──▶ Paused
//!    ▲                   │  ▲                     │
//!    └───next/prev/done──┘  └──drag cancel── Dragging ◀── drag
//!                                                 │
//!       exhausted / commit / emptied ──▶ Closing ──finalize──▶ Closed
//! ```
//!
//! `Close` moves any phase to `Closed`.

use std::collections::HashSet;
use std::time::Instant;

use crate::application::port::PlayerStatus;
use crate::diagnostics::{DiagnosticsHandle, SessionStateEvent, UserAction};
use crate::domain::story::{
    AuthorId, DisplayDuration, MediaKind, MediaRef, Phase, Progress, RosterEpoch, Story,
    StoryGroup, StoryId, ViewerRoster,
};
use crate::error::ServiceError;

use super::clock::{ClockEvent, ClockSource, ProgressClock};
use super::gesture::{self, Gesture, GestureSettings};
use super::roster::{RosterOutcome, RosterRequest, ViewerRosterFetcher};
use super::seen::ViewRecordDeduplicator;
use super::sequence::{Removal, SequenceController, Step};

/// Session tunables.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionSettings {
    /// Display time of photos that do not carry their own.
    pub default_photo_duration: DisplayDuration,
    /// Gesture classification thresholds.
    pub gestures: GestureSettings,
}

/// Why a session entered `Closing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The last story completed or was skipped.
    Exhausted,
    /// A dismiss drag was committed.
    Dismissed,
    /// Every story was removed.
    Emptied,
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Raw pointer input, classified by the session's gesture interpreter.
    Pointer(gesture::Message),
    /// An already classified gesture (keyboard shortcuts, accessibility actions).
    Gesture(Gesture),
    /// Clock tick; also polls the long-press timer.
    Tick,
    /// Native player status callback for the current video.
    PlayerStatus(PlayerStatus),
    MediaLoaded { story_id: StoryId },
    MediaFailed { story_id: StoryId },
    RosterLoaded {
        epoch: RosterEpoch,
        story_id: StoryId,
        result: Result<ViewerRoster, ServiceError>,
    },
    SeenReported {
        story_id: StoryId,
        result: Result<(), ServiceError>,
    },
    /// The owner asked to delete the current story.
    DeleteRequested,
    DeleteSucceeded { story_id: StoryId },
    DeleteFailed {
        story_id: StoryId,
        error: ServiceError,
    },
    /// A story was removed by another path (expiry sweep, another device).
    StoryRemoved { story_id: StoryId },
    /// Explicit dismissal.
    Close,
    /// The exit animation finished.
    Finalize,
    SetDiagnostics(DiagnosticsHandle),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Load the media of the newly current story.
    LoadMedia {
        story_id: StoryId,
        media: MediaKind,
        media_ref: MediaRef,
    },
    PausePlayer,
    ResumePlayer,
    /// Seek the player to the start.
    RestartPlayer,
    StopPlayer,
    /// Report a story as seen (fire-and-forget).
    MarkSeen(StoryId),
    /// Fetch the viewer roster; answer with [`Message::RosterLoaded`].
    FetchRoster(RosterRequest),
    /// Delete a story; answer with `DeleteSucceeded` or `DeleteFailed`.
    DeleteStory(StoryId),
    /// Surface a failed user action; the error carries its i18n key.
    ShowError(ServiceError),
    /// The session entered `Closing`; run the exit transition then send
    /// [`Message::Finalize`].
    Finished(ExitReason),
    /// The session is closed; drop it.
    Closed,
}

#[derive(Debug, Clone)]
struct PendingDelete {
    story_id: StoryId,
    resume: bool,
}

/// Playback state for one opened story group.
#[derive(Debug)]
pub struct StoryPlaybackSession {
    author: AuthorId,
    is_own: bool,
    settings: SessionSettings,
    phase: Phase,
    sequence: SequenceController,
    clock: ProgressClock,
    gestures: gesture::State,
    seen: ViewRecordDeduplicator,
    roster: ViewerRosterFetcher,
    /// Phase to return to when a drag is cancelled.
    pre_drag: Option<Phase>,
    drag_offset: f32,
    holding: bool,
    media_failed: bool,
    pending_delete: Option<PendingDelete>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl StoryPlaybackSession {
    /// Opens a group at `start_index` (clamped) in `Loading`.
    ///
    /// Returns the session and the effects for the first story.
    #[must_use]
    pub fn open(
        group: StoryGroup,
        is_own: bool,
        start_index: usize,
        settings: SessionSettings,
    ) -> (Self, Vec<Effect>) {
        let author = group.author().clone();
        let mut session = Self {
            author,
            is_own,
            settings,
            phase: Phase::Loading,
            sequence: SequenceController::from_group(group, start_index),
            clock: ProgressClock::new(),
            gestures: gesture::State::new(settings.gestures),
            seen: ViewRecordDeduplicator::new(),
            roster: ViewerRosterFetcher::new(is_own),
            pre_drag: None,
            drag_offset: 0.0,
            holding: false,
            media_failed: false,
            pending_delete: None,
            diagnostics: None,
        };
        let mut effects = Vec::new();
        session.enter_current(false, &mut effects);
        (session, effects)
    }

    /// Handles a message and returns the effects to perform.
    pub fn handle(&mut self, msg: Message, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        match msg {
            Message::Pointer(event) => {
                if let Some(gesture) = self.gestures.handle(event) {
                    self.apply_gesture(gesture, now, &mut effects);
                }
            }
            Message::Gesture(gesture) => self.apply_gesture(gesture, now, &mut effects),
            Message::Tick => self.on_tick(now, &mut effects),
            Message::PlayerStatus(status) => self.on_player_status(status, now, &mut effects),
            Message::MediaLoaded { story_id } => self.on_media_loaded(&story_id, now, &mut effects),
            Message::MediaFailed { story_id } => {
                if self.phase == Phase::Loading && self.is_current(&story_id) {
                    self.media_failed = true;
                    self.log_state(SessionStateEvent::MediaFailed);
                }
            }
            Message::RosterLoaded {
                epoch,
                story_id,
                result,
            } => {
                let error = result.as_ref().err().map(ToString::to_string);
                if self.roster.apply(epoch, &story_id, result) == RosterOutcome::Failed {
                    self.log_warning(format!(
                        "roster fetch failed: {}",
                        error.unwrap_or_default()
                    ));
                }
            }
            Message::SeenReported { story_id, result } => {
                if let Err(error) = result {
                    self.log_warning(format!("mark seen failed for {story_id}: {error}"));
                }
            }
            Message::DeleteRequested => self.on_delete_requested(now, &mut effects),
            Message::DeleteSucceeded { story_id } => {
                let resume = self.take_pending_delete(&story_id);
                self.roster.forget(&story_id);
                let removal = self.remove_story(&story_id, &mut effects);
                if resume
                    && matches!(removal, Removal::NotFound | Removal::OtherRemoved)
                    && self.phase.is_paused()
                {
                    self.resume_playback(now, &mut effects);
                }
            }
            Message::DeleteFailed { story_id, error } => {
                if self.pending_delete.as_ref().map(|p| &p.story_id) != Some(&story_id) {
                    return effects;
                }
                if self.take_pending_delete(&story_id) && self.phase.is_paused() {
                    self.resume_playback(now, &mut effects);
                }
                self.log_error(format!("delete failed for {story_id}: {error}"));
                effects.push(Effect::ShowError(error));
            }
            Message::StoryRemoved { story_id } => {
                if !self.phase.is_terminal() {
                    self.roster.forget(&story_id);
                    self.remove_story(&story_id, &mut effects);
                }
            }
            Message::Close => self.close(&mut effects),
            Message::Finalize => {
                if self.phase == Phase::Closing {
                    self.set_phase(Phase::Closed);
                    effects.push(Effect::Closed);
                }
            }
            Message::SetDiagnostics(handle) => self.diagnostics = Some(handle),
        }
        effects
    }

    // =========================================================================
    // Gestures
    // =========================================================================

    fn apply_gesture(&mut self, gesture: Gesture, now: Instant, effects: &mut Vec<Effect>) {
        if self.phase.is_terminal() {
            return;
        }
        if gesture == Gesture::LongPressEnd {
            let was_holding = std::mem::replace(&mut self.holding, false);
            if was_holding && self.pending_delete.is_none() {
                self.log_action(UserAction::HoldRelease);
                if self.phase.is_paused() {
                    self.resume_playback(now, effects);
                }
            }
            return;
        }
        // Controls are disabled while a deletion is pending.
        if self.pending_delete.is_some() {
            return;
        }
        match gesture {
            Gesture::Next => {
                self.log_action(UserAction::NavigateNext);
                self.advance(now, effects);
            }
            Gesture::Previous => {
                self.log_action(UserAction::NavigatePrevious);
                self.retreat(now, effects);
            }
            Gesture::TogglePause => match self.phase {
                Phase::Playing => {
                    self.log_action(UserAction::TogglePause);
                    self.pause_playback(now, effects);
                }
                Phase::Paused(_) if !self.holding => {
                    self.log_action(UserAction::TogglePause);
                    self.resume_playback(now, effects);
                }
                _ => {}
            },
            Gesture::LongPressStart => {
                self.holding = true;
                self.log_action(UserAction::HoldPause);
                if self.phase == Phase::Playing {
                    self.pause_playback(now, effects);
                }
            }
            Gesture::DragUpdate(dy) => self.drag_update(dy, now, effects),
            Gesture::DragCommit => {
                if self.phase.is_dragging() {
                    self.log_action(UserAction::DismissDrag { committed: true });
                    self.drag_offset = 0.0;
                    self.pre_drag = None;
                    self.finish(ExitReason::Dismissed, effects);
                }
            }
            Gesture::DragCancel => {
                if self.phase.is_dragging() {
                    self.log_action(UserAction::DismissDrag { committed: false });
                    self.drag_cancel(now, effects);
                }
            }
            Gesture::LongPressEnd => {}
        }
    }

    fn drag_update(&mut self, dy: f32, now: Instant, effects: &mut Vec<Effect>) {
        match self.phase {
            Phase::Playing | Phase::Paused(_) | Phase::Loading => {
                let before = self.phase;
                if before == Phase::Playing {
                    self.pause_playback(now, effects);
                }
                self.pre_drag = Some(before);
                self.set_phase(Phase::Dragging);
            }
            Phase::Dragging => {}
            Phase::Closing | Phase::Closed => return,
        }
        self.drag_offset = dy.max(0.0);
    }

    fn drag_cancel(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        self.drag_offset = 0.0;
        match self.pre_drag.take().unwrap_or(Phase::Playing) {
            Phase::Playing if !self.holding => {
                self.set_phase(Phase::Paused(self.clock.progress()));
                self.resume_playback(now, effects);
            }
            Phase::Loading => self.set_phase(Phase::Loading),
            _ => self.set_phase(Phase::Paused(self.clock.progress())),
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    fn advance(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        let leaving_video = self.current_is_video();
        match self.sequence.advance() {
            Step::Moved => self.enter_current(leaving_video, effects),
            Step::Exhausted => {
                self.log_state(SessionStateEvent::SequenceExhausted);
                self.finish(ExitReason::Exhausted, effects);
            }
            Step::Restarted => self.restart(now, effects),
        }
    }

    fn retreat(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        let leaving_video = self.current_is_video();
        match self.sequence.retreat() {
            Step::Moved => self.enter_current(leaving_video, effects),
            Step::Restarted => self.restart(now, effects),
            Step::Exhausted => {}
        }
    }

    fn restart(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        self.clock.reset(now);
        if self.current_is_video() && self.phase != Phase::Loading {
            effects.push(Effect::RestartPlayer);
        }
        if self.phase.is_paused() {
            self.set_phase(Phase::Paused(Progress::ZERO));
        }
    }

    /// Makes the story at the current index active with a fresh clock.
    fn enter_current(&mut self, leaving_video: bool, effects: &mut Vec<Effect>) {
        if leaving_video {
            effects.push(Effect::StopPlayer);
        }
        self.clock = ProgressClock::new();
        self.media_failed = false;
        self.drag_offset = 0.0;
        self.pre_drag = None;
        self.set_phase(Phase::Loading);

        let Some(story) = self.sequence.current() else {
            return;
        };
        let story_id = story.id.clone();
        let server_seen = story.seen_by_current_viewer;
        effects.push(Effect::LoadMedia {
            story_id: story_id.clone(),
            media: story.media,
            media_ref: story.media_ref.clone(),
        });
        if self.seen.claim(&story_id, self.is_own, server_seen) {
            effects.push(Effect::MarkSeen(story_id.clone()));
        }
        if let Some(request) = self.roster.activate(&story_id) {
            effects.push(Effect::FetchRoster(request));
        }
    }

    fn finish(&mut self, reason: ExitReason, effects: &mut Vec<Effect>) {
        if self.current_is_video() {
            effects.push(Effect::StopPlayer);
        }
        self.stop_activity();
        self.set_phase(Phase::Closing);
        effects.push(Effect::Finished(reason));
    }

    fn close(&mut self, effects: &mut Vec<Effect>) {
        if self.phase == Phase::Closed {
            return;
        }
        self.log_action(UserAction::Close);
        if self.phase != Phase::Closing && self.current_is_video() {
            effects.push(Effect::StopPlayer);
        }
        self.stop_activity();
        self.set_phase(Phase::Closed);
        effects.push(Effect::Closed);
    }

    fn stop_activity(&mut self) {
        self.clock.stop();
        self.roster.detach();
        self.drag_offset = 0.0;
        self.pre_drag = None;
    }

    // =========================================================================
    // Clock
    // =========================================================================

    fn on_tick(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        if let Some(gesture) = self.gestures.handle(gesture::Message::Poll(now)) {
            self.apply_gesture(gesture, now, effects);
        }
        if self.phase == Phase::Playing && self.clock.tick(now) == ClockEvent::Completed {
            self.advance(now, effects);
        }
    }

    fn on_player_status(&mut self, status: PlayerStatus, now: Instant, effects: &mut Vec<Effect>) {
        if self.phase != Phase::Playing || !self.current_is_video() {
            return;
        }
        if self.clock.on_player_status(status) == ClockEvent::Completed {
            self.advance(now, effects);
        }
    }

    fn on_media_loaded(&mut self, story_id: &StoryId, now: Instant, effects: &mut Vec<Effect>) {
        if !self.is_current(story_id) {
            return;
        }
        match self.phase {
            Phase::Loading => {
                self.media_failed = false;
                self.start_clock(now);
                self.set_phase(Phase::Playing);
                if self.current_is_video() {
                    effects.push(Effect::ResumePlayer);
                }
                if self.holding || self.pending_delete.is_some() {
                    self.pause_playback(now, effects);
                }
            }
            Phase::Dragging if self.pre_drag == Some(Phase::Loading) => {
                // Loaded under the finger: start frozen, resume on cancel.
                self.media_failed = false;
                self.start_clock(now);
                self.clock.pause(now);
                self.pre_drag = Some(Phase::Playing);
            }
            _ => {}
        }
    }

    fn start_clock(&mut self, now: Instant) {
        let source = match self.sequence.current().map(|story| story.media) {
            Some(MediaKind::Photo { display_duration }) => ClockSource::Timed(
                display_duration
                    .unwrap_or(self.settings.default_photo_duration)
                    .as_duration(),
            ),
            Some(MediaKind::Video) => ClockSource::Player,
            None => return,
        };
        self.clock.start(source, now);
    }

    fn pause_playback(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        self.clock.pause(now);
        if self.current_is_video() {
            effects.push(Effect::PausePlayer);
        }
        self.set_phase(Phase::Paused(self.clock.progress()));
    }

    fn resume_playback(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        self.clock.resume(now);
        if self.current_is_video() {
            effects.push(Effect::ResumePlayer);
        }
        self.set_phase(Phase::Playing);
    }

    // =========================================================================
    // Deletion
    // =========================================================================

    fn on_delete_requested(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        if !self.is_own
            || self.pending_delete.is_some()
            || self.phase.is_terminal()
            || self.phase.is_dragging()
        {
            return;
        }
        let Some(story_id) = self.current_id() else {
            return;
        };
        // A story still loading resumes too if it plays before the failure.
        let resume = matches!(self.phase, Phase::Playing | Phase::Loading);
        if self.phase == Phase::Playing {
            self.pause_playback(now, effects);
        }
        self.log_action_with_details(UserAction::DeleteStory, story_id.to_string());
        self.pending_delete = Some(PendingDelete {
            story_id: story_id.clone(),
            resume,
        });
        effects.push(Effect::DeleteStory(story_id));
    }

    /// Clears a matching pending deletion; returns whether playback should resume.
    fn take_pending_delete(&mut self, story_id: &StoryId) -> bool {
        match &self.pending_delete {
            Some(pending) if &pending.story_id == story_id => self
                .pending_delete
                .take()
                .is_some_and(|pending| pending.resume && !self.holding),
            _ => false,
        }
    }

    fn remove_story(&mut self, story_id: &StoryId, effects: &mut Vec<Effect>) -> Removal {
        if self.phase.is_terminal() {
            return Removal::NotFound;
        }
        let leaving_video = self.current_is_video();
        let removal = self.sequence.remove(story_id);
        if removal != Removal::NotFound {
            self.log_state(SessionStateEvent::StoryRemoved {
                remaining: self.sequence.len(),
            });
        }
        match removal {
            Removal::Emptied => {
                if leaving_video {
                    effects.push(Effect::StopPlayer);
                }
                self.stop_activity();
                self.set_phase(Phase::Closing);
                effects.push(Effect::Finished(ExitReason::Emptied));
            }
            Removal::CurrentReplaced => {
                self.holding = false;
                self.enter_current(leaving_video, effects);
                // The replacement must not inherit a pending delete.
                self.pending_delete = None;
            }
            Removal::OtherRemoved | Removal::NotFound => {}
        }
        removal
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn set_phase(&mut self, phase: Phase) {
        if self.phase.name() != phase.name() {
            self.log_state(SessionStateEvent::PhaseChanged {
                from: self.phase.name().to_string(),
                to: phase.name().to_string(),
            });
        }
        self.phase = phase;
    }

    fn current_id(&self) -> Option<StoryId> {
        self.sequence.current().map(|story| story.id.clone())
    }

    fn is_current(&self, story_id: &StoryId) -> bool {
        self.sequence
            .current()
            .is_some_and(|story| &story.id == story_id)
    }

    fn current_is_video(&self) -> bool {
        self.sequence
            .current()
            .is_some_and(|story| story.media.is_video())
    }

    fn log_action(&self, action: UserAction) {
        if let Some(handle) = &self.diagnostics {
            handle.log_action(action);
        }
    }

    fn log_action_with_details(&self, action: UserAction, details: String) {
        if let Some(handle) = &self.diagnostics {
            handle.log_action_with_details(action, Some(details));
        }
    }

    fn log_state(&self, state: SessionStateEvent) {
        if let Some(handle) = &self.diagnostics {
            handle.log_state(state);
        }
    }

    fn log_warning(&self, message: String) {
        if let Some(handle) = &self.diagnostics {
            handle.log_warning(message);
        }
    }

    fn log_error(&self, message: String) {
        if let Some(handle) = &self.diagnostics {
            handle.log_error(message);
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Progress of the current story in [0, 1].
    #[must_use]
    pub fn progress(&self) -> Progress {
        self.clock.progress()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.sequence.index()
    }

    #[must_use]
    pub fn current_story(&self) -> Option<&Story> {
        self.sequence.current()
    }

    #[must_use]
    pub fn stories(&self) -> &[Story] {
        self.sequence.stories()
    }

    #[must_use]
    pub fn author(&self) -> &AuthorId {
        &self.author
    }

    #[must_use]
    pub fn is_own(&self) -> bool {
        self.is_own
    }

    /// Ids reported as seen during this session.
    #[must_use]
    pub fn marked_seen(&self) -> &HashSet<StoryId> {
        self.seen.marked()
    }

    /// Roster of the current story, when known.
    #[must_use]
    pub fn roster(&self) -> Option<&ViewerRoster> {
        self.roster.roster()
    }

    #[must_use]
    pub fn is_roster_loading(&self) -> bool {
        self.roster.is_loading()
    }

    #[must_use]
    pub fn roster_epoch(&self) -> RosterEpoch {
        self.roster.epoch()
    }

    /// Downward translation of an ongoing dismiss drag.
    #[must_use]
    pub fn drag_offset(&self) -> f32 {
        self.drag_offset
    }

    #[must_use]
    pub fn is_holding(&self) -> bool {
        self.holding
    }

    /// Whether the current story's media failed to load.
    #[must_use]
    pub fn media_failed(&self) -> bool {
        self.media_failed
    }

    #[must_use]
    pub fn is_delete_pending(&self) -> bool {
        self.pending_delete.is_some()
    }

    /// Story whose deletion is awaiting the backend.
    #[must_use]
    pub fn pending_delete_id(&self) -> Option<&StoryId> {
        self.pending_delete.as_ref().map(|p| &p.story_id)
    }

    /// Whether navigation and playback controls accept input.
    #[must_use]
    pub fn controls_enabled(&self) -> bool {
        self.pending_delete.is_none() && !self.phase.is_terminal()
    }

    /// Whether the owner should keep sending [`Message::Tick`].
    #[must_use]
    pub fn needs_tick(&self) -> bool {
        (self.phase == Phase::Playing && !self.clock.is_player_driven())
            || self.gestures.awaiting_long_press()
    }

    /// Time left on the current photo, if it is self-timed.
    #[must_use]
    pub fn remaining(&self) -> Option<std::time::Duration> {
        self.clock.remaining()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticEventKind, DiagnosticsCollector};
    use crate::domain::story::Viewer;
    use crate::test_utils::assert_abs_diff_eq;
    use iced::{Point, Size};
    use std::time::Duration;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn photo(id: &str, duration_ms: u64) -> Story {
        Story::new(
            id,
            MediaKind::Photo {
                display_duration: Some(DisplayDuration::from_millis(duration_ms)),
            },
            format!("{id}.jpg"),
        )
    }

    fn video(id: &str) -> Story {
        Story::new(id, MediaKind::Video, format!("{id}.mp4"))
    }

    fn group(stories: Vec<Story>) -> StoryGroup {
        StoryGroup::new(AuthorId::new("ana"), stories).expect("non-empty group")
    }

    fn open(stories: Vec<Story>, is_own: bool, start: usize) -> (StoryPlaybackSession, Vec<Effect>) {
        StoryPlaybackSession::open(group(stories), is_own, start, SessionSettings::default())
    }

    fn load(session: &mut StoryPlaybackSession, now: Instant) -> Vec<Effect> {
        let story_id = session.current_story().expect("current").id.clone();
        session.handle(Message::MediaLoaded { story_id }, now)
    }

    fn abc() -> Vec<Story> {
        vec![photo("a", 10_000), photo("b", 10_000), photo("c", 10_000)]
    }

    fn current(session: &StoryPlaybackSession) -> &str {
        session.current_story().map_or("", |s| s.id.as_str())
    }

    #[test]
    fn open_loads_start_story_and_marks_seen() {
        let (session, effects) = open(abc(), false, 1);

        assert_eq!(session.phase(), Phase::Loading);
        assert_eq!(session.current_index(), 1);
        assert!(matches!(
            &effects[0],
            Effect::LoadMedia { story_id, .. } if story_id.as_str() == "b"
        ));
        assert!(effects.contains(&Effect::MarkSeen(StoryId::new("b"))));
        assert!(!effects.iter().any(|e| matches!(e, Effect::FetchRoster(_))));
    }

    #[test]
    fn start_index_is_clamped() {
        let (session, _) = open(abc(), false, 7);
        assert_eq!(session.current_index(), 2);
    }

    #[test]
    fn server_seen_stories_are_not_reported() {
        let (_, effects) = open(vec![photo("a", 5_000).with_seen(true)], false, 0);
        assert!(!effects.iter().any(|e| matches!(e, Effect::MarkSeen(_))));
    }

    #[test]
    fn loaded_photo_plays_and_advances_on_completion() {
        let t0 = Instant::now();
        let (mut session, _) = open(abc(), false, 0);
        load(&mut session, t0);
        assert_eq!(session.phase(), Phase::Playing);
        assert!(session.needs_tick());

        session.handle(Message::Tick, t0 + ms(5_000));
        assert_abs_diff_eq!(session.progress().value(), 0.5, epsilon = 1e-3);

        let effects = session.handle(Message::Tick, t0 + ms(10_001));
        assert_eq!(current(&session), "b");
        assert_eq!(session.phase(), Phase::Loading);
        assert_eq!(session.progress(), Progress::ZERO);
        assert!(effects.contains(&Effect::MarkSeen(StoryId::new("b"))));
    }

    #[test]
    fn photo_without_duration_uses_default() {
        let t0 = Instant::now();
        let story = Story::new("a", MediaKind::photo(), "a.jpg");
        let (mut session, _) = open(vec![story], false, 0);
        load(&mut session, t0);

        session.handle(Message::Tick, t0 + ms(3_500));
        assert_abs_diff_eq!(session.progress().value(), 0.5, epsilon = 1e-3);
    }

    #[test]
    fn exhausting_sequence_fires_once_then_finalizes() {
        let t0 = Instant::now();
        let (mut session, _) = open(vec![photo("a", 1_000)], false, 0);
        load(&mut session, t0);

        let effects = session.handle(Message::Tick, t0 + ms(1_500));
        assert_eq!(session.phase(), Phase::Closing);
        assert_eq!(effects, vec![Effect::Finished(ExitReason::Exhausted)]);

        assert!(session.handle(Message::Tick, t0 + ms(2_000)).is_empty());
        assert!(session
            .handle(Message::Gesture(Gesture::Next), t0 + ms(2_000))
            .is_empty());

        assert_eq!(
            session.handle(Message::Finalize, t0 + ms(2_300)),
            vec![Effect::Closed]
        );
        assert_eq!(session.phase(), Phase::Closed);
    }

    #[test]
    fn retreat_at_start_restarts_current_story() {
        let t0 = Instant::now();
        let (mut session, _) = open(abc(), false, 0);
        load(&mut session, t0);
        session.handle(Message::Tick, t0 + ms(6_000));

        session.handle(Message::Gesture(Gesture::Previous), t0 + ms(6_000));
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.progress(), Progress::ZERO);
        assert_eq!(session.phase(), Phase::Playing);
    }

    #[test]
    fn pause_and_resume_keep_elapsed_fraction() {
        let t0 = Instant::now();
        let (mut session, _) = open(abc(), false, 0);
        load(&mut session, t0);

        session.handle(Message::Gesture(Gesture::TogglePause), t0 + ms(4_000));
        assert!(session.phase().is_paused());
        assert!(!session.needs_tick());

        session.handle(Message::Gesture(Gesture::TogglePause), t0 + ms(20_000));
        assert_eq!(session.phase(), Phase::Playing);
        let remaining = session.remaining().expect("timed story");
        assert_abs_diff_eq!(remaining.as_secs_f64(), 6.0, epsilon = 1e-3);
    }

    #[test]
    fn pause_during_drag_is_noop() {
        let t0 = Instant::now();
        let (mut session, _) = open(abc(), false, 0);
        load(&mut session, t0);

        session.handle(Message::Gesture(Gesture::DragUpdate(30.0)), t0 + ms(1_000));
        assert_eq!(session.phase(), Phase::Dragging);
        session.handle(Message::Gesture(Gesture::TogglePause), t0 + ms(1_100));
        assert_eq!(session.phase(), Phase::Dragging);
        assert_abs_diff_eq!(session.drag_offset(), 30.0);
    }

    #[test]
    fn drag_cancel_returns_to_pre_drag_phase() {
        let t0 = Instant::now();
        let (mut session, _) = open(abc(), false, 0);
        load(&mut session, t0);

        session.handle(Message::Gesture(Gesture::DragUpdate(40.0)), t0 + ms(2_000));
        session.handle(Message::Gesture(Gesture::DragCancel), t0 + ms(9_000));
        assert_eq!(session.phase(), Phase::Playing);
        assert_abs_diff_eq!(session.progress().value(), 0.2, epsilon = 1e-3);
        assert_abs_diff_eq!(session.drag_offset(), 0.0);

        session.handle(Message::Gesture(Gesture::TogglePause), t0 + ms(10_000));
        session.handle(Message::Gesture(Gesture::DragUpdate(40.0)), t0 + ms(10_500));
        session.handle(Message::Gesture(Gesture::DragCancel), t0 + ms(11_000));
        assert!(session.phase().is_paused());
    }

    #[test]
    fn drag_commit_dismisses() {
        let t0 = Instant::now();
        let (mut session, _) = open(abc(), false, 0);
        load(&mut session, t0);

        session.handle(Message::Gesture(Gesture::DragUpdate(200.0)), t0 + ms(500));
        let effects = session.handle(Message::Gesture(Gesture::DragCommit), t0 + ms(600));
        assert_eq!(session.phase(), Phase::Closing);
        assert_eq!(effects, vec![Effect::Finished(ExitReason::Dismissed)]);
    }

    #[test]
    fn pointer_drag_flows_through_interpreter() {
        let t0 = Instant::now();
        let (mut session, _) = open(abc(), false, 0);
        load(&mut session, t0);

        session.handle(
            Message::Pointer(gesture::Message::ViewportResized(Size::new(300.0, 600.0))),
            t0,
        );
        session.handle(
            Message::Pointer(gesture::Message::PointerDown {
                position: Point::new(150.0, 200.0),
                at: t0,
            }),
            t0,
        );
        session.handle(
            Message::Pointer(gesture::Message::PointerMoved {
                position: Point::new(150.0, 400.0),
                at: t0 + ms(500),
            }),
            t0 + ms(500),
        );
        assert_eq!(session.phase(), Phase::Dragging);

        let effects = session.handle(
            Message::Pointer(gesture::Message::PointerUp {
                position: Point::new(150.0, 400.0),
                at: t0 + ms(900),
            }),
            t0 + ms(900),
        );
        assert_eq!(effects, vec![Effect::Finished(ExitReason::Dismissed)]);
    }

    #[test]
    fn long_press_holds_until_release() {
        let t0 = Instant::now();
        let (mut session, _) = open(abc(), false, 0);
        load(&mut session, t0);

        session.handle(
            Message::Pointer(gesture::Message::PointerDown {
                position: Point::new(150.0, 300.0),
                at: t0 + ms(1_000),
            }),
            t0 + ms(1_000),
        );
        session.handle(Message::Tick, t0 + ms(1_300));
        assert!(session.is_holding());
        assert!(session.phase().is_paused());

        session.handle(
            Message::Pointer(gesture::Message::PointerUp {
                position: Point::new(150.0, 300.0),
                at: t0 + ms(4_000),
            }),
            t0 + ms(4_000),
        );
        assert!(!session.is_holding());
        assert_eq!(session.phase(), Phase::Playing);
    }

    #[test]
    fn revisiting_story_does_not_report_twice() {
        let t0 = Instant::now();
        let (mut session, _) = open(abc(), false, 0);
        load(&mut session, t0);

        session.handle(Message::Gesture(Gesture::Next), t0);
        let effects = session.handle(Message::Gesture(Gesture::Previous), t0);
        assert!(!effects.iter().any(|e| matches!(e, Effect::MarkSeen(_))));
        assert_eq!(session.marked_seen().len(), 2);
    }

    #[test]
    fn failed_seen_report_is_not_retried() {
        let t0 = Instant::now();
        let (mut session, _) = open(abc(), false, 0);
        let effects = session.handle(
            Message::SeenReported {
                story_id: StoryId::new("a"),
                result: Err(ServiceError::Network("offline".into())),
            },
            t0,
        );
        assert!(effects.is_empty());
        assert!(session.marked_seen().contains(&StoryId::new("a")));
    }

    #[test]
    fn stale_roster_is_discarded() {
        let t0 = Instant::now();
        let (mut session, effects) = open(abc(), true, 0);
        let Some(Effect::FetchRoster(first)) = effects
            .iter()
            .find(|e| matches!(e, Effect::FetchRoster(_)))
            .cloned()
        else {
            panic!("expected roster fetch");
        };
        assert!(!effects.iter().any(|e| matches!(e, Effect::MarkSeen(_))));

        session.handle(Message::Gesture(Gesture::Next), t0);
        session.handle(Message::Gesture(Gesture::Next), t0);
        assert_eq!(session.roster_epoch().value(), first.epoch.value() + 2);

        session.handle(
            Message::RosterLoaded {
                epoch: first.epoch,
                story_id: first.story_id.clone(),
                result: Ok(ViewerRoster {
                    count: 1,
                    viewers: vec![Viewer {
                        id: "u1".into(),
                        display_name: "Uma".into(),
                    }],
                }),
            },
            t0,
        );
        assert!(session.roster().is_none());
        assert!(session.is_roster_loading());
    }

    #[test]
    fn deleting_tail_shows_previous_with_fresh_clock() {
        let t0 = Instant::now();
        let (mut session, _) = open(abc(), true, 2);
        load(&mut session, t0);
        session.handle(Message::Tick, t0 + ms(5_000));

        let effects = session.handle(Message::DeleteRequested, t0 + ms(5_000));
        assert_eq!(effects, vec![Effect::DeleteStory(StoryId::new("c"))]);
        assert!(!session.controls_enabled());

        let effects = session.handle(
            Message::DeleteSucceeded {
                story_id: StoryId::new("c"),
            },
            t0 + ms(5_200),
        );
        assert_eq!(session.stories().len(), 2);
        assert_eq!(session.current_index(), 1);
        assert_eq!(current(&session), "b");
        assert_eq!(session.phase(), Phase::Loading);
        assert_eq!(session.progress(), Progress::ZERO);
        assert!(session.controls_enabled());
        assert!(effects.iter().any(|e| matches!(e, Effect::FetchRoster(_))));
    }

    #[test]
    fn deleting_mid_sequence_shows_next_story() {
        let t0 = Instant::now();
        let (mut session, _) = open(abc(), true, 1);
        load(&mut session, t0);

        session.handle(Message::DeleteRequested, t0);
        session.handle(
            Message::DeleteSucceeded {
                story_id: StoryId::new("b"),
            },
            t0,
        );
        assert_eq!(session.current_index(), 1);
        assert_eq!(current(&session), "c");
    }

    #[test]
    fn deleting_only_story_closes() {
        let t0 = Instant::now();
        let (mut session, _) = open(vec![photo("a", 5_000)], true, 0);
        load(&mut session, t0);

        session.handle(Message::DeleteRequested, t0);
        let effects = session.handle(
            Message::DeleteSucceeded {
                story_id: StoryId::new("a"),
            },
            t0,
        );
        assert_eq!(session.phase(), Phase::Closing);
        assert_eq!(effects, vec![Effect::Finished(ExitReason::Emptied)]);
    }

    #[test]
    fn failed_delete_restores_playback_and_reports() {
        let t0 = Instant::now();
        let (mut session, _) = open(abc(), true, 0);
        load(&mut session, t0);

        session.handle(Message::DeleteRequested, t0 + ms(1_000));
        assert!(session.phase().is_paused());

        let effects = session.handle(
            Message::DeleteFailed {
                story_id: StoryId::new("a"),
                error: ServiceError::Network("offline".into()),
            },
            t0 + ms(3_000),
        );
        let [Effect::ShowError(error)] = effects.as_slice() else {
            panic!("expected a single error, got {effects:?}");
        };
        assert_eq!(error.i18n_key(), "error-story-network");
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.stories().len(), 3);
        assert!(session.controls_enabled());
    }

    #[test]
    fn delete_is_owner_only() {
        let (mut session, _) = open(abc(), false, 0);
        assert!(session
            .handle(Message::DeleteRequested, Instant::now())
            .is_empty());
    }

    #[test]
    fn removing_other_story_keeps_current() {
        let t0 = Instant::now();
        let (mut session, _) = open(abc(), false, 2);
        load(&mut session, t0);

        let effects = session.handle(
            Message::StoryRemoved {
                story_id: StoryId::new("a"),
            },
            t0,
        );
        assert!(effects.is_empty());
        assert_eq!(current(&session), "c");
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.phase(), Phase::Playing);
    }

    #[test]
    fn media_failure_keeps_loading_indicator() {
        let t0 = Instant::now();
        let (mut session, _) = open(abc(), false, 0);
        session.handle(
            Message::MediaFailed {
                story_id: StoryId::new("a"),
            },
            t0,
        );
        assert!(session.media_failed());
        assert_eq!(session.phase(), Phase::Loading);
        assert!(session.handle(Message::Tick, t0 + ms(60_000)).is_empty());
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn stale_media_load_is_ignored() {
        let t0 = Instant::now();
        let (mut session, _) = open(abc(), false, 0);
        session.handle(Message::Gesture(Gesture::Next), t0);
        session.handle(
            Message::MediaLoaded {
                story_id: StoryId::new("a"),
            },
            t0,
        );
        assert_eq!(session.phase(), Phase::Loading);
    }

    #[test]
    fn video_progress_follows_player() {
        let t0 = Instant::now();
        let (mut session, _) = open(vec![video("v"), photo("p", 5_000)], false, 0);
        let effects = load(&mut session, t0);
        assert_eq!(effects, vec![Effect::ResumePlayer]);
        assert!(!session.needs_tick());

        session.handle(Message::PlayerStatus(PlayerStatus::playing(2_000, 8_000)), t0);
        assert_abs_diff_eq!(session.progress().value(), 0.25, epsilon = 1e-4);

        let effects = session.handle(Message::Gesture(Gesture::TogglePause), t0);
        assert_eq!(effects, vec![Effect::PausePlayer]);

        session.handle(Message::Gesture(Gesture::TogglePause), t0);
        let effects = session.handle(Message::PlayerStatus(PlayerStatus::finished(8_000)), t0);
        assert_eq!(effects[0], Effect::StopPlayer);
        assert_eq!(current(&session), "p");
    }

    #[test]
    fn close_from_any_phase() {
        let t0 = Instant::now();
        let (mut session, _) = open(vec![video("v")], false, 0);
        load(&mut session, t0);

        let effects = session.handle(Message::Close, t0);
        assert_eq!(effects, vec![Effect::StopPlayer, Effect::Closed]);
        assert_eq!(session.phase(), Phase::Closed);
        assert!(session.handle(Message::Close, t0).is_empty());
    }

    #[test]
    fn diagnostics_record_actions_and_phases() {
        let t0 = Instant::now();
        let mut collector = DiagnosticsCollector::default();
        let (mut session, _) = open(abc(), false, 0);
        session.handle(Message::SetDiagnostics(collector.handle()), t0);
        load(&mut session, t0);
        session.handle(Message::Gesture(Gesture::Next), t0);

        collector.process_pending();
        let kinds: Vec<_> = collector.iter().map(|e| e.kind.clone()).collect();
        assert!(kinds.contains(&DiagnosticEventKind::UserAction {
            action: UserAction::NavigateNext,
            details: None,
        }));
        assert!(kinds.contains(&DiagnosticEventKind::SessionState {
            state: SessionStateEvent::PhaseChanged {
                from: "loading".to_string(),
                to: "playing".to_string(),
            },
        }));
    }
}
