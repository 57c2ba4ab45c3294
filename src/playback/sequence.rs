// SPDX-License-Identifier: MPL-2.0
//! Ordered story sequence with a current index.
//!
//! The index is kept in `0..len` after every mutation. Deleting the current
//! item never leaves the index dangling: the tail case steps back one slot,
//! otherwise the item that shifts into the slot becomes current.

use crate::domain::story::{Story, StoryGroup, StoryId};

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The current index changed.
    Moved,
    /// Retreat at the first item: the same item starts over.
    Restarted,
    /// Advance at the last item: nothing left to show.
    Exhausted,
}

/// Result of removing a story from the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The id is not part of the sequence.
    NotFound,
    /// The only remaining story was removed.
    Emptied,
    /// The current story was removed and another one took its place.
    CurrentReplaced,
    /// A different story was removed; the current story is unchanged.
    OtherRemoved,
}

#[derive(Debug, Clone)]
pub struct SequenceController {
    stories: Vec<Story>,
    index: usize,
}

impl SequenceController {
    /// Creates a controller positioned at `start` (clamped).
    ///
    /// Returns `None` for an empty sequence.
    #[must_use]
    pub fn new(stories: Vec<Story>, start: usize) -> Option<Self> {
        if stories.is_empty() {
            return None;
        }
        let mut controller = Self { stories, index: start };
        controller.clamp();
        Some(controller)
    }

    /// Creates a controller over a group, which is never empty.
    #[must_use]
    pub fn from_group(group: StoryGroup, start: usize) -> Self {
        let mut controller = Self {
            stories: group.into_stories(),
            index: start,
        };
        controller.clamp();
        controller
    }

    pub fn advance(&mut self) -> Step {
        if self.index + 1 >= self.stories.len() {
            Step::Exhausted
        } else {
            self.index += 1;
            Step::Moved
        }
    }

    pub fn retreat(&mut self) -> Step {
        if self.index == 0 {
            Step::Restarted
        } else {
            self.index -= 1;
            Step::Moved
        }
    }

    /// Removes a story and reconciles the current index.
    pub fn remove(&mut self, id: &StoryId) -> Removal {
        let Some(position) = self.position_of(id) else {
            return Removal::NotFound;
        };
        if self.stories.len() == 1 {
            self.stories.clear();
            self.index = 0;
            return Removal::Emptied;
        }

        let was_current = position == self.index;
        let was_last = self.index == self.stories.len() - 1;
        self.stories.remove(position);

        let outcome = if was_current {
            if was_last {
                self.index -= 1;
            }
            Removal::CurrentReplaced
        } else {
            if position < self.index {
                self.index -= 1;
            }
            Removal::OtherRemoved
        };
        self.clamp();
        outcome
    }

    fn clamp(&mut self) {
        self.index = self.index.min(self.stories.len().saturating_sub(1));
    }

    /// The story being shown, `None` only once the sequence was emptied.
    #[must_use]
    pub fn current(&self) -> Option<&Story> {
        self.stories.get(self.index)
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.stories.len()
    }

    #[must_use]
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    #[must_use]
    pub fn position_of(&self, id: &StoryId) -> Option<usize> {
        self.stories.iter().position(|story| &story.id == id)
    }
}
