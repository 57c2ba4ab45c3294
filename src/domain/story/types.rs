// SPDX-License-Identifier: MPL-2.0
//! Story and story-group value types.

use super::newtypes::DisplayDuration;
use std::fmt;
use std::time::SystemTime;

// =============================================================================
// Identifiers
// =============================================================================

/// Opaque story identifier, unique within an author's sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoryId(String);

impl StoryId {
    /// Wraps a backend identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StoryId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for StoryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Opaque author identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AuthorId(String);

impl AuthorId {
    /// Wraps a backend identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AuthorId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// =============================================================================
// Media
// =============================================================================

/// Kind of media carried by a story.
///
/// Photos are self-timed; videos report their own duration through the
/// native player's status callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Still image shown for a fixed time.
    Photo {
        /// Display time, when the backend provides one.
        display_duration: Option<DisplayDuration>,
    },
    /// Video whose progress mirrors the native player.
    Video,
}

impl MediaKind {
    /// A photo using the default display time.
    #[must_use]
    pub fn photo() -> Self {
        Self::Photo {
            display_duration: None,
        }
    }

    /// Returns true for video stories.
    #[must_use]
    pub fn is_video(self) -> bool {
        matches!(self, Self::Video)
    }
}

/// Locator of a story asset (remote URL or local cache path).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaRef(String);

impl MediaRef {
    /// Wraps an asset locator.
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    /// Returns the locator as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Filter Preset
// =============================================================================

/// Cosmetic filter tag applied on top of the media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterPreset {
    /// No overlay.
    #[default]
    Original,
    /// Orange tint.
    Warm,
    /// Blue tint.
    Cool,
    /// Brown wash.
    Sepia,
    /// Dark desaturating veil.
    Noir,
    /// Light wash.
    Fade,
    /// Pink tint.
    Rose,
}

impl FilterPreset {
    /// All presets in picker order.
    pub const ALL: [FilterPreset; 7] = [
        FilterPreset::Original,
        FilterPreset::Warm,
        FilterPreset::Cool,
        FilterPreset::Sepia,
        FilterPreset::Noir,
        FilterPreset::Fade,
        FilterPreset::Rose,
    ];

    fn position(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    /// Next preset in picker order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Previous preset in picker order, wrapping around.
    #[must_use]
    pub fn previous(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }

    /// Returns the i18n key for the preset label.
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            FilterPreset::Original => "story-filter-original",
            FilterPreset::Warm => "story-filter-warm",
            FilterPreset::Cool => "story-filter-cool",
            FilterPreset::Sepia => "story-filter-sepia",
            FilterPreset::Noir => "story-filter-noir",
            FilterPreset::Fade => "story-filter-fade",
            FilterPreset::Rose => "story-filter-rose",
        }
    }
}

// =============================================================================
// Story
// =============================================================================

/// A single ephemeral media item.
///
/// Immutable once created; it only ever disappears (deletion or expiry).
/// Expired items are filtered by the backend and never re-checked here.
#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    /// Identifier, unique within the author's sequence.
    pub id: StoryId,
    /// Photo or video.
    pub media: MediaKind,
    /// Asset locator.
    pub media_ref: MediaRef,
    /// Cosmetic filter.
    pub filter: FilterPreset,
    /// Creation time.
    pub created_at: SystemTime,
    /// Time after which the backend stops serving the item.
    pub expires_at: SystemTime,
    /// Whether the backend reported the item as seen at fetch time.
    pub seen_by_current_viewer: bool,
}

impl Story {
    /// Creates an unseen story with a 24 hour lifetime starting now.
    pub fn new(id: impl Into<StoryId>, media: MediaKind, media_ref: impl Into<String>) -> Self {
        let created_at = SystemTime::now();
        Self {
            id: id.into(),
            media,
            media_ref: MediaRef::new(media_ref),
            filter: FilterPreset::default(),
            created_at,
            expires_at: created_at + std::time::Duration::from_secs(24 * 60 * 60),
            seen_by_current_viewer: false,
        }
    }

    /// Sets the filter preset.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterPreset) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the server-side seen flag.
    #[must_use]
    pub fn with_seen(mut self, seen: bool) -> Self {
        self.seen_by_current_viewer = seen;
        self
    }
}

/// Ordered, non-empty sequence of one author's current stories.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryGroup {
    author: AuthorId,
    stories: Vec<Story>,
}

impl StoryGroup {
    /// Builds a group, returning `None` when `stories` is empty.
    #[must_use]
    pub fn new(author: AuthorId, stories: Vec<Story>) -> Option<Self> {
        if stories.is_empty() {
            None
        } else {
            Some(Self { author, stories })
        }
    }

    /// The author of every story in the group.
    #[must_use]
    pub fn author(&self) -> &AuthorId {
        &self.author
    }

    /// Stories in display order.
    #[must_use]
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    /// Number of stories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stories.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// Whether every story was reported seen by the backend.
    ///
    /// Informational only; playback never consults it.
    #[must_use]
    pub fn all_seen(&self) -> bool {
        self.stories.iter().all(|s| s.seen_by_current_viewer)
    }

    /// Index of the first unseen story, or 0 when all are seen.
    #[must_use]
    pub fn first_unseen_index(&self) -> usize {
        self.stories
            .iter()
            .position(|s| !s.seen_by_current_viewer)
            .unwrap_or(0)
    }

    pub(crate) fn stories_mut(&mut self) -> &mut Vec<Story> {
        &mut self.stories
    }

    /// Consumes the group, returning its stories.
    #[must_use]
    pub fn into_stories(self) -> Vec<Story> {
        self.stories
    }
}

// =============================================================================
// Viewer Roster
// =============================================================================

/// Someone who viewed a story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    /// Account identifier.
    pub id: String,
    /// Name shown in the roster.
    pub display_name: String,
}

/// "Who viewed this" result for one of the viewer's own stories.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewerRoster {
    /// Total view count (may exceed `viewers.len()` when paginated).
    pub count: u32,
    /// First page of viewers.
    pub viewers: Vec<Viewer>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_group_is_rejected() {
        assert!(StoryGroup::new(AuthorId::new("ana"), Vec::new()).is_none());
    }

    #[test]
    fn all_seen_reflects_server_flags() {
        let group = StoryGroup::new(
            AuthorId::new("ana"),
            vec![
                Story::new("a", MediaKind::photo(), "a.jpg").with_seen(true),
                Story::new("b", MediaKind::Video, "b.mp4"),
            ],
        )
        .unwrap();
        assert!(!group.all_seen());
        assert_eq!(group.first_unseen_index(), 1);
    }

    #[test]
    fn first_unseen_defaults_to_start_when_everything_seen() {
        let group = StoryGroup::new(
            AuthorId::new("ana"),
            vec![Story::new("a", MediaKind::photo(), "a.jpg").with_seen(true)],
        )
        .unwrap();
        assert!(group.all_seen());
        assert_eq!(group.first_unseen_index(), 0);
    }

    #[test]
    fn filter_cycle_wraps_both_ways() {
        assert_eq!(FilterPreset::Rose.next(), FilterPreset::Original);
        assert_eq!(FilterPreset::Original.previous(), FilterPreset::Rose);
        assert_eq!(FilterPreset::Warm.previous(), FilterPreset::Original);
    }

    #[test]
    fn story_expires_after_creation() {
        let story = Story::new("a", MediaKind::Video, "a.mp4");
        assert!(story.expires_at > story.created_at);
        assert!(!story.seen_by_current_viewer);
    }
}
