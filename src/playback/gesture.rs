// SPDX-License-Identifier: MPL-2.0
//! Gesture interpreter for the full-screen story viewer.
//!
//! Classifies raw pointer down/move/up events into taps (three horizontal
//! zones), long-press holds and vertical dismiss drags. The tap/drag/hold
//! decision is taken once per interaction: the first movement past the slop
//! either starts a drag or marks the interaction as ignored, and the
//! long-press timer only fires while the pointer has not yet moved.

use crate::config::{
    DEFAULT_DISMISS_THRESHOLD_PX, DEFAULT_DISMISS_VELOCITY_PX_PER_SEC, DEFAULT_DRAG_TOP_INSET_PX,
    DEFAULT_LONG_PRESS_MS, DEFAULT_TAP_SLOP_PX,
};
use iced::{Point, Size};
use std::time::{Duration, Instant};

/// Thresholds used to classify pointer motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSettings {
    /// Movement under which the pointer is still considered stationary.
    pub tap_slop_px: f32,
    /// Hold time before a stationary press becomes a long-press.
    pub long_press_delay: Duration,
    /// Downward travel that commits a dismiss drag.
    pub dismiss_threshold_px: f32,
    /// Downward release speed that commits a dismiss drag.
    pub dismiss_velocity_px_per_sec: f32,
    /// Drags starting above this line are not dismiss-intent.
    pub top_inset_px: f32,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            tap_slop_px: DEFAULT_TAP_SLOP_PX,
            long_press_delay: Duration::from_millis(DEFAULT_LONG_PRESS_MS),
            dismiss_threshold_px: DEFAULT_DISMISS_THRESHOLD_PX,
            dismiss_velocity_px_per_sec: DEFAULT_DISMISS_VELOCITY_PX_PER_SEC,
            top_inset_px: DEFAULT_DRAG_TOP_INSET_PX,
        }
    }
}

/// Classified gesture outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Tap in the left third.
    Previous,
    /// Tap in the right third.
    Next,
    /// Tap in the center third.
    TogglePause,
    /// Downward translation of an ongoing dismiss drag (never negative).
    DragUpdate(f32),
    /// Dismiss drag released past a threshold.
    DragCommit,
    /// Dismiss drag released short of both thresholds.
    DragCancel,
    /// Stationary press held past the long-press delay.
    LongPressStart,
    /// Release of a long-press.
    LongPressEnd,
}

/// Raw pointer input.
#[derive(Debug, Clone, Copy)]
pub enum Message {
    PointerDown { position: Point, at: Instant },
    PointerMoved { position: Point, at: Instant },
    PointerUp { position: Point, at: Instant },
    /// Long-press timer check.
    Poll(Instant),
    /// The pointer was lost (window unfocused, touch cancelled).
    Cancel,
    /// The viewer area changed size.
    ViewportResized(Size),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tracking {
    Idle,
    /// Down, not yet moved past the slop.
    Pending { origin: Point, started_at: Instant },
    /// Long-press in progress; movement no longer matters.
    Holding,
    Dragging {
        origin: Point,
        last: Point,
        last_at: Instant,
        velocity_y: f32,
    },
    /// Motion that is neither a tap nor a dismiss drag.
    Ignored,
}

/// Gesture interpreter state.
#[derive(Debug, Clone)]
pub struct State {
    settings: GestureSettings,
    viewport: Size,
    tracking: Tracking,
}

impl Default for State {
    fn default() -> Self {
        Self::new(GestureSettings::default())
    }
}

impl State {
    #[must_use]
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            settings,
            viewport: Size::ZERO,
            tracking: Tracking::Idle,
        }
    }

    /// Sets the viewer area used for tap zones.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    /// Feeds one pointer event and returns the gesture it completes, if any.
    pub fn handle(&mut self, msg: Message) -> Option<Gesture> {
        match msg {
            Message::PointerDown { position, at } => {
                // A new press always starts a new interaction.
                let previous = self.abandon();
                self.tracking = Tracking::Pending {
                    origin: position,
                    started_at: at,
                };
                previous
            }
            Message::PointerMoved { position, at } => self.on_move(position, at),
            Message::PointerUp { position, at } => self.on_release(position, at),
            Message::Poll(now) => self.on_poll(now),
            Message::Cancel => self.abandon(),
            Message::ViewportResized(size) => {
                self.viewport = size;
                None
            }
        }
    }

    fn on_move(&mut self, position: Point, at: Instant) -> Option<Gesture> {
        match self.tracking {
            Tracking::Pending { origin, .. } => {
                let dx = position.x - origin.x;
                let dy = position.y - origin.y;
                if dx.hypot(dy) <= self.settings.tap_slop_px {
                    return None;
                }
                // One-shot decision.
                let vertical = dx.abs() <= self.settings.tap_slop_px && dy.abs() > dx.abs();
                if vertical && origin.y >= self.settings.top_inset_px {
                    self.tracking = Tracking::Dragging {
                        origin,
                        last: position,
                        last_at: at,
                        velocity_y: 0.0,
                    };
                    Some(Gesture::DragUpdate(dy.max(0.0)))
                } else {
                    self.tracking = Tracking::Ignored;
                    None
                }
            }
            Tracking::Dragging {
                origin,
                last,
                last_at,
                velocity_y,
            } => {
                self.tracking = Tracking::Dragging {
                    origin,
                    last: position,
                    last_at: at,
                    velocity_y: sample_velocity(last, last_at, position, at).unwrap_or(velocity_y),
                };
                Some(Gesture::DragUpdate((position.y - origin.y).max(0.0)))
            }
            Tracking::Idle | Tracking::Holding | Tracking::Ignored => None,
        }
    }

    fn on_release(&mut self, position: Point, at: Instant) -> Option<Gesture> {
        let tracking = std::mem::replace(&mut self.tracking, Tracking::Idle);
        match tracking {
            Tracking::Pending { origin, .. } => Some(self.classify_tap(origin)),
            Tracking::Holding => Some(Gesture::LongPressEnd),
            Tracking::Dragging {
                origin,
                last,
                last_at,
                velocity_y,
            } => {
                let velocity_y =
                    sample_velocity(last, last_at, position, at).unwrap_or(velocity_y);
                let dy = position.y - origin.y;
                if dy > self.settings.dismiss_threshold_px
                    || velocity_y > self.settings.dismiss_velocity_px_per_sec
                {
                    Some(Gesture::DragCommit)
                } else {
                    Some(Gesture::DragCancel)
                }
            }
            Tracking::Idle | Tracking::Ignored => None,
        }
    }

    fn on_poll(&mut self, now: Instant) -> Option<Gesture> {
        match self.tracking {
            Tracking::Pending { started_at, .. }
                if now.saturating_duration_since(started_at) >= self.settings.long_press_delay =>
            {
                self.tracking = Tracking::Holding;
                Some(Gesture::LongPressStart)
            }
            _ => None,
        }
    }

    /// Ends the current interaction without a tap.
    fn abandon(&mut self) -> Option<Gesture> {
        match std::mem::replace(&mut self.tracking, Tracking::Idle) {
            Tracking::Holding => Some(Gesture::LongPressEnd),
            Tracking::Dragging { .. } => Some(Gesture::DragCancel),
            _ => None,
        }
    }

    fn classify_tap(&self, position: Point) -> Gesture {
        let width = self.viewport.width;
        if width <= 0.0 {
            return Gesture::TogglePause;
        }
        let third = width / 3.0;
        if position.x < third {
            Gesture::Previous
        } else if position.x >= third * 2.0 {
            Gesture::Next
        } else {
            Gesture::TogglePause
        }
    }

    /// Whether the long-press timer should be polled.
    #[must_use]
    pub fn awaiting_long_press(&self) -> bool {
        matches!(self.tracking, Tracking::Pending { .. })
    }

    #[must_use]
    pub fn is_holding(&self) -> bool {
        self.tracking == Tracking::Holding
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.tracking, Tracking::Dragging { .. })
    }

    #[must_use]
    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }
}

/// Vertical velocity between two samples, `None` when no time elapsed.
fn sample_velocity(from: Point, from_at: Instant, to: Point, to_at: Instant) -> Option<f32> {
    let dt = to_at.saturating_duration_since(from_at).as_secs_f32();
    (dt > 0.0).then(|| (to.y - from.y) / dt)
}
