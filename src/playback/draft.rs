// SPDX-License-Identifier: MPL-2.0
//! Story being composed before upload.
//!
//! Holds the captured media and the cosmetic choices made on the capture
//! screen. Uploading is handled elsewhere; this only produces the [`Story`]
//! value once the backend has assigned an id.

use crate::domain::story::{DisplayDuration, FilterPreset, MediaKind, MediaRef, Story, StoryId};
use crate::ui::filter_overlay::{self, FilterOverlay};

#[derive(Debug, Clone, PartialEq)]
pub struct StoryDraft {
    media: MediaKind,
    media_ref: MediaRef,
    filter: FilterPreset,
}

impl StoryDraft {
    /// Starts a draft with no filter.
    pub fn new(media: MediaKind, media_ref: impl Into<String>) -> Self {
        Self {
            media,
            media_ref: MediaRef::new(media_ref),
            filter: FilterPreset::default(),
        }
    }

    /// Swipe to the next filter.
    pub fn next_filter(&mut self) -> FilterPreset {
        self.filter = self.filter.next();
        self.filter
    }

    /// Swipe to the previous filter.
    pub fn previous_filter(&mut self) -> FilterPreset {
        self.filter = self.filter.previous();
        self.filter
    }

    pub fn select_filter(&mut self, filter: FilterPreset) {
        self.filter = filter;
    }

    /// Sets how long a photo stays on screen.
    ///
    /// Returns false for videos, whose length comes from the player.
    pub fn set_display_duration(&mut self, duration: DisplayDuration) -> bool {
        match &mut self.media {
            MediaKind::Photo { display_duration } => {
                *display_duration = Some(duration);
                true
            }
            MediaKind::Video => false,
        }
    }

    #[must_use]
    pub fn filter(&self) -> FilterPreset {
        self.filter
    }

    #[must_use]
    pub fn media(&self) -> MediaKind {
        self.media
    }

    #[must_use]
    pub fn media_ref(&self) -> &MediaRef {
        &self.media_ref
    }

    /// Overlay to draw over the capture preview.
    #[must_use]
    pub fn overlay(&self) -> Option<FilterOverlay> {
        filter_overlay::resolve(self.filter)
    }

    /// Finalizes the draft once the backend has assigned an id.
    #[must_use]
    pub fn into_story(self, id: impl Into<StoryId>) -> Story {
        Story::new(id, self.media, self.media_ref.as_str()).with_filter(self.filter)
    }
}
