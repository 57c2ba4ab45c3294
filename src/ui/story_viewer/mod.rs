// SPDX-License-Identifier: MPL-2.0
//! Full-screen story viewer component.
//!
//! Owns one [`StoryPlaybackSession`] at a time and wires it to iced:
//!
//! - raw mouse, touch and keyboard events become gesture messages
//! - a 16 ms `time::every` subscription drives the clock while it runs
//! - session effects become player calls, backend [`Task`]s or outward [`Effect`]s
//!
//! Backend calls block, so they run on Tokio's blocking pool and come back
//! as [`Message::Reply`] stamped with the session that issued them. Replies
//! for a session that is gone are dropped here; roster responses also keep
//! the epoch they were issued under, which lets the live session drop stale
//! ones. Group fetches are stamped the same way, and only the latest
//! [`Message::Open`] may open a session.

mod view;

use crate::application::port::{MediaPlayer, StoryService};
use crate::config::PROGRESS_TICK_MS;
use crate::diagnostics::{DiagnosticsHandle, UserAction};
use crate::domain::story::{AuthorId, MediaKind, MediaRef, Phase, Story, StoryGroup, StoryId};
use crate::error::ServiceError;
use crate::playback::gesture::{self, Gesture};
use crate::playback::session::{self, ExitReason, SessionSettings, StoryPlaybackSession};
use crate::ui::notifications::{self, Notification, NotificationMessage};
use iced::{event, keyboard, mouse, time, touch, window, Point, Subscription, Task};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How often toast timers are checked.
const NOTIFICATION_TICK: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub enum Message {
    /// Fetch and open an author's stories.
    Open {
        author: AuthorId,
        is_own: bool,
        /// Start index; the first unseen story when `None`.
        start: Option<usize>,
    },
    GroupLoaded {
        /// Open request this response answers.
        request: u64,
        author: AuthorId,
        is_own: bool,
        start: Option<usize>,
        result: Result<Vec<Story>, ServiceError>,
    },
    RawEvent(event::Event),
    Tick(Instant),
    /// Host input forwarded to the session (media load results, player status,
    /// external removal, finalize).
    Session(session::Message),
    /// Backend result for the session identified by `session_id`.
    Reply {
        session_id: u64,
        message: session::Message,
    },
    DeleteCurrent,
    Notification(NotificationMessage),
}

/// What the host application must do after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Load and display an asset; answer with `Session(MediaLoaded | MediaFailed)`.
    LoadMedia {
        story_id: StoryId,
        media: MediaKind,
        media_ref: MediaRef,
    },
    /// Run the exit transition, then send `Session(Finalize)`.
    Exit(ExitReason),
    /// The session is gone; `marked_seen` can be overlaid on the stories rail.
    Closed {
        author: AuthorId,
        marked_seen: HashSet<StoryId>,
    },
    /// The group could not be opened.
    OpenFailed(ServiceError),
}

pub struct StoryViewer {
    service: Arc<dyn StoryService>,
    settings: SessionSettings,
    session: Option<StoryPlaybackSession>,
    /// Incremented each time a session opens; stamps backend replies.
    session_id: u64,
    open_requests: u64,
    /// The only open request whose response is still wanted.
    pending_open: Option<u64>,
    player: Option<Box<dyn MediaPlayer + Send>>,
    viewport: Option<iced::Size>,
    cursor_position: Option<Point>,
    notifications: notifications::Manager,
    diagnostics: Option<DiagnosticsHandle>,
}

impl std::fmt::Debug for StoryViewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryViewer")
            .field("session", &self.session)
            .field("has_player", &self.player.is_some())
            .finish_non_exhaustive()
    }
}

impl StoryViewer {
    pub fn new(service: Arc<dyn StoryService>, settings: SessionSettings) -> Self {
        Self {
            service,
            settings,
            session: None,
            session_id: 0,
            open_requests: 0,
            pending_open: None,
            player: None,
            viewport: None,
            cursor_position: None,
            notifications: notifications::Manager::new(),
            diagnostics: None,
        }
    }

    /// Attaches the native player used for video stories.
    pub fn set_player(&mut self, player: Box<dyn MediaPlayer + Send>) {
        self.player = Some(player);
    }

    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.notifications.set_diagnostics(handle.clone());
        if let Some(session) = &mut self.session {
            session.handle(session::Message::SetDiagnostics(handle.clone()), Instant::now());
        }
        self.diagnostics = Some(handle);
    }

    #[must_use]
    pub fn session(&self) -> Option<&StoryPlaybackSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    #[must_use]
    pub fn notifications(&self) -> &notifications::Manager {
        &self.notifications
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let events = event::listen_with(|event, _status, _window| {
            let relevant = matches!(
                event,
                event::Event::Mouse(
                    mouse::Event::CursorMoved { .. }
                        | mouse::Event::CursorLeft
                        | mouse::Event::ButtonPressed(mouse::Button::Left)
                        | mouse::Event::ButtonReleased(mouse::Button::Left),
                ) | event::Event::Touch(_)
                    | event::Event::Window(window::Event::Resized(_))
                    | event::Event::Keyboard(keyboard::Event::KeyPressed { .. })
            );
            relevant.then_some(Message::RawEvent(event))
        });

        let clock = if self.session.as_ref().is_some_and(StoryPlaybackSession::needs_tick) {
            time::every(Duration::from_millis(PROGRESS_TICK_MS)).map(Message::Tick)
        } else {
            Subscription::none()
        };

        let toasts = if self.notifications.has_notifications() {
            time::every(NOTIFICATION_TICK)
                .map(|at| Message::Notification(NotificationMessage::Tick(at)))
        } else {
            Subscription::none()
        };

        Subscription::batch([events, clock, toasts])
    }

    pub fn update(&mut self, message: Message) -> (Effect, Task<Message>) {
        self.update_at(message, Instant::now())
    }

    /// Same as [`StoryViewer::update`] with an explicit clock.
    pub fn update_at(&mut self, message: Message, now: Instant) -> (Effect, Task<Message>) {
        match message {
            Message::Open {
                author,
                is_own,
                start,
            } => {
                // The active session ends before another group is fetched.
                let (closed, _) = self.forward(session::Message::Close, now);

                self.open_requests = self.open_requests.wrapping_add(1);
                let request = self.open_requests;
                self.pending_open = Some(request);
                let fetch_author = author.clone();
                let task = self.call(
                    move |service| service.fetch_story_group(&fetch_author),
                    move |result| Message::GroupLoaded {
                        request,
                        author,
                        is_own,
                        start,
                        result,
                    },
                );
                (closed, task)
            }
            Message::GroupLoaded {
                request,
                author,
                is_own,
                start,
                result,
            } => {
                if self.pending_open != Some(request) {
                    return (Effect::None, Task::none());
                }
                self.pending_open = None;
                self.open_group(author, is_own, start, result, now)
            }
            Message::RawEvent(event) => match self.translate_event(&event, now) {
                Some(msg) => self.forward(msg, now),
                None => (Effect::None, Task::none()),
            },
            Message::Tick(at) => {
                self.notifications.tick(at);
                self.forward(session::Message::Tick, at)
            }
            Message::Session(msg) => self.session_message(msg, now),
            Message::Reply {
                session_id,
                message,
            } => {
                if session_id != self.session_id {
                    return (Effect::None, Task::none());
                }
                self.session_message(message, now)
            }
            Message::DeleteCurrent => self.forward(session::Message::DeleteRequested, now),
            Message::Notification(msg) => {
                self.notifications.handle_message(&msg);
                (Effect::None, Task::none())
            }
        }
    }

    fn open_group(
        &mut self,
        author: AuthorId,
        is_own: bool,
        start: Option<usize>,
        result: Result<Vec<Story>, ServiceError>,
        now: Instant,
    ) -> (Effect, Task<Message>) {
        let group = match result {
            Ok(stories) => StoryGroup::new(author, stories).ok_or(ServiceError::NotFound),
            Err(error) => Err(error),
        };
        let group = match group {
            Ok(group) => group,
            Err(error) => {
                self.notifications
                    .push(Notification::from_service_error(&error));
                return (Effect::OpenFailed(error), Task::none());
            }
        };

        if let Some(handle) = &self.diagnostics {
            handle.log_action(UserAction::OpenGroup {
                story_count: group.len(),
                is_own,
            });
        }
        let start = start.unwrap_or_else(|| group.first_unseen_index());
        let (mut session, effects) =
            StoryPlaybackSession::open(group, is_own, start, self.settings);
        if let Some(handle) = &self.diagnostics {
            session.handle(session::Message::SetDiagnostics(handle.clone()), now);
        }
        if let Some(size) = self.viewport {
            session.handle(
                session::Message::Pointer(gesture::Message::ViewportResized(size)),
                now,
            );
        }
        self.session = Some(session);
        self.session_id = self.session_id.wrapping_add(1);
        self.apply_effects(effects)
    }

    /// Forwards a message to the live session, with the toasts it implies.
    fn session_message(&mut self, msg: session::Message, now: Instant) -> (Effect, Task<Message>) {
        let Some(session) = &self.session else {
            return (Effect::None, Task::none());
        };
        let is_current =
            |id: &StoryId| session.current_story().is_some_and(|story| &story.id == id);
        let confirm_delete = matches!(
            &msg,
            session::Message::DeleteSucceeded { story_id }
                if session.pending_delete_id() == Some(story_id)
        );
        match &msg {
            session::Message::MediaLoaded { story_id } if is_current(story_id) => {
                self.notifications.clear_media_errors();
            }
            session::Message::MediaFailed { story_id }
                if is_current(story_id)
                    && session.phase() == Phase::Loading
                    && !session.media_failed() =>
            {
                self.notifications
                    .push(Notification::warning("story-media-failed"));
            }
            _ => {}
        }

        let outcome = self.forward(msg, now);
        if confirm_delete {
            self.notifications.push(Notification::success("story-deleted"));
        }
        outcome
    }

    fn forward(&mut self, msg: session::Message, now: Instant) -> (Effect, Task<Message>) {
        let Some(session) = &mut self.session else {
            return (Effect::None, Task::none());
        };
        let effects = session.handle(msg, now);
        self.apply_effects(effects)
    }

    /// Turns session effects into player calls and tasks.
    ///
    /// A single session step emits at most one outward effect.
    fn apply_effects(&mut self, effects: Vec<session::Effect>) -> (Effect, Task<Message>) {
        let mut outward = Effect::None;
        let mut tasks = Vec::new();
        let session_id = self.session_id;
        let reply = move |message: session::Message| Message::Reply {
            session_id,
            message,
        };

        for effect in effects {
            match effect {
                session::Effect::LoadMedia {
                    story_id,
                    media,
                    media_ref,
                } => {
                    outward = Effect::LoadMedia {
                        story_id,
                        media,
                        media_ref,
                    };
                }
                session::Effect::PausePlayer => self.with_player(|p| p.pause()),
                session::Effect::ResumePlayer => self.with_player(|p| p.play()),
                session::Effect::RestartPlayer => self.with_player(|p| p.seek(Duration::ZERO)),
                session::Effect::StopPlayer => self.with_player(|p| {
                    p.pause();
                    p.seek(Duration::ZERO);
                }),
                session::Effect::MarkSeen(story_id) => {
                    let reported = story_id.clone();
                    tasks.push(self.call(
                        move |service| service.mark_story_seen(&story_id),
                        move |result| {
                            reply(session::Message::SeenReported {
                                story_id: reported,
                                result,
                            })
                        },
                    ));
                }
                session::Effect::FetchRoster(request) => {
                    let epoch = request.epoch;
                    let story_id = request.story_id.clone();
                    tasks.push(self.call(
                        move |service| service.fetch_viewers(&request.story_id),
                        move |result| {
                            reply(session::Message::RosterLoaded {
                                epoch,
                                story_id,
                                result,
                            })
                        },
                    ));
                }
                session::Effect::DeleteStory(story_id) => {
                    let deleted = story_id.clone();
                    tasks.push(self.call(
                        move |service| service.delete_story(&story_id),
                        move |result| {
                            reply(match result {
                                Ok(()) => session::Message::DeleteSucceeded { story_id: deleted },
                                Err(error) => session::Message::DeleteFailed {
                                    story_id: deleted,
                                    error,
                                },
                            })
                        },
                    ));
                }
                session::Effect::ShowError(error) => {
                    self.notifications
                        .push(Notification::from_service_error(&error));
                }
                session::Effect::Finished(reason) => outward = Effect::Exit(reason),
                session::Effect::Closed => {
                    if let Some(session) = self.session.take() {
                        outward = Effect::Closed {
                            author: session.author().clone(),
                            marked_seen: session.marked_seen().clone(),
                        };
                    }
                }
            }
        }

        (outward, Task::batch(tasks))
    }

    fn with_player(&mut self, action: impl FnOnce(&mut dyn MediaPlayer)) {
        if let Some(player) = self.player.as_deref_mut() {
            action(player);
        }
    }

    fn call<T, F, M>(&self, call: F, map: M) -> Task<Message>
    where
        T: Send + 'static,
        F: FnOnce(&dyn StoryService) -> Result<T, ServiceError> + Send + 'static,
        M: FnOnce(Result<T, ServiceError>) -> Message + Send + 'static,
    {
        Task::perform(call_service(Arc::clone(&self.service), call), map)
    }

    /// Maps a raw iced event to a session message.
    fn translate_event(&mut self, event: &event::Event, now: Instant) -> Option<session::Message> {
        let pointer = |msg| Some(session::Message::Pointer(msg));
        match event {
            event::Event::Mouse(mouse_event) => match mouse_event {
                mouse::Event::CursorMoved { position } => {
                    self.cursor_position = Some(*position);
                    pointer(gesture::Message::PointerMoved {
                        position: *position,
                        at: now,
                    })
                }
                mouse::Event::CursorLeft => {
                    self.cursor_position = None;
                    pointer(gesture::Message::Cancel)
                }
                mouse::Event::ButtonPressed(mouse::Button::Left) => {
                    self.cursor_position.and_then(|position| {
                        pointer(gesture::Message::PointerDown { position, at: now })
                    })
                }
                mouse::Event::ButtonReleased(mouse::Button::Left) => {
                    self.cursor_position.and_then(|position| {
                        pointer(gesture::Message::PointerUp { position, at: now })
                    })
                }
                _ => None,
            },
            event::Event::Touch(touch_event) => match touch_event {
                touch::Event::FingerPressed { position, .. } => {
                    pointer(gesture::Message::PointerDown {
                        position: *position,
                        at: now,
                    })
                }
                touch::Event::FingerMoved { position, .. } => {
                    pointer(gesture::Message::PointerMoved {
                        position: *position,
                        at: now,
                    })
                }
                touch::Event::FingerLifted { position, .. } => {
                    pointer(gesture::Message::PointerUp {
                        position: *position,
                        at: now,
                    })
                }
                touch::Event::FingerLost { .. } => pointer(gesture::Message::Cancel),
            },
            event::Event::Window(window::Event::Resized(size)) => {
                self.viewport = Some(*size);
                pointer(gesture::Message::ViewportResized(*size))
            }
            event::Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(named),
                ..
            }) => match named {
                keyboard::key::Named::ArrowLeft => {
                    Some(session::Message::Gesture(Gesture::Previous))
                }
                keyboard::key::Named::ArrowRight => Some(session::Message::Gesture(Gesture::Next)),
                keyboard::key::Named::Space => {
                    Some(session::Message::Gesture(Gesture::TogglePause))
                }
                keyboard::key::Named::Escape => Some(session::Message::Close),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Runs a blocking backend call on Tokio's blocking pool.
///
/// # Errors
///
/// Returns the call's own error, or [`ServiceError::Other`] if the blocking
/// task panicked or was cancelled.
pub async fn call_service<T, F>(service: Arc<dyn StoryService>, call: F) -> Result<T, ServiceError>
where
    T: Send + 'static,
    F: FnOnce(&dyn StoryService) -> Result<T, ServiceError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || call(service.as_ref()))
        .await
        .map_err(|e| ServiceError::Other(e.to_string()))?
}
