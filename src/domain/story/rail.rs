// SPDX-License-Identifier: MPL-2.0
//! Summary rail ordering for the stories row.
//!
//! The rail lists one avatar per author. The viewer's own group always comes
//! first, then groups with something unseen, then fully seen groups. Within a
//! bucket the backend order is kept.

use super::types::{AuthorId, StoryGroup, StoryId};
use std::collections::HashSet;

/// One rail entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RailEntry {
    /// Group shown by the avatar.
    pub group: StoryGroup,
    /// Whether this is the viewer's own group.
    pub is_own: bool,
}

impl RailEntry {
    /// Whether the avatar ring should be highlighted.
    #[must_use]
    pub fn has_unseen(&self) -> bool {
        !self.is_own && !self.group.all_seen()
    }
}

/// Ordered list of story groups for the summary rail.
#[derive(Debug, Clone, Default)]
pub struct StoriesRail {
    entries: Vec<RailEntry>,
}

impl StoriesRail {
    /// Builds the rail from fetched groups.
    #[must_use]
    pub fn new(own_author: &AuthorId, groups: Vec<StoryGroup>) -> Self {
        let entries = groups
            .into_iter()
            .map(|group| RailEntry {
                is_own: group.author() == own_author,
                group,
            })
            .collect();
        let mut rail = Self { entries };
        rail.sort();
        rail
    }

    fn sort(&mut self) {
        // Stable: backend order survives inside each bucket.
        self.entries.sort_by_key(|entry| {
            if entry.is_own {
                0
            } else if entry.has_unseen() {
                1
            } else {
                2
            }
        });
    }

    /// Entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[RailEntry] {
        &self.entries
    }

    /// Looks up the group for an author.
    #[must_use]
    pub fn group(&self, author: &AuthorId) -> Option<&StoryGroup> {
        self.entries
            .iter()
            .find(|entry| entry.group.author() == author)
            .map(|entry| &entry.group)
    }

    /// Marks the given story ids as seen in `author`'s group and re-sorts.
    ///
    /// Used after a session closes so the rail reflects local viewing before
    /// the next backend refresh.
    pub fn apply_session_seen(&mut self, author: &AuthorId, marked: &HashSet<StoryId>) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.group.author() == author)
        {
            for story in entry.group.stories_mut() {
                if marked.contains(&story.id) {
                    story.seen_by_current_viewer = true;
                }
            }
        }
        self.sort();
    }

    /// Drops a story from its group, removing the group when it empties.
    pub fn remove_story(&mut self, author: &AuthorId, id: &StoryId) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.group.author() == author)
        {
            entry.group.stories_mut().retain(|story| &story.id != id);
        }
        self.entries.retain(|entry| !entry.group.is_empty());
    }
}
