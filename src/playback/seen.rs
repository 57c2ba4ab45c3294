// SPDX-License-Identifier: MPL-2.0
//! Session-scoped "seen" report deduplication.
//!
//! An id is claimed synchronously before the network call is issued, so two
//! activations of the same item in one event-loop turn report it once. Claims
//! are never rolled back: a failed report stays marked for the rest of the
//! session.

use crate::domain::story::StoryId;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct ViewRecordDeduplicator {
    marked: HashSet<StoryId>,
}

impl ViewRecordDeduplicator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a seen report should be sent for this story.
    #[must_use]
    pub fn should_report(&self, id: &StoryId, is_own_story: bool, server_seen: bool) -> bool {
        !is_own_story && !server_seen && !self.marked.contains(id)
    }

    /// Checks and marks in one step.
    ///
    /// Returns true when the caller must send the report.
    pub fn claim(&mut self, id: &StoryId, is_own_story: bool, server_seen: bool) -> bool {
        if !self.should_report(id, is_own_story, server_seen) {
            return false;
        }
        self.marked.insert(id.clone())
    }

    #[must_use]
    pub fn is_marked(&self, id: &StoryId) -> bool {
        self.marked.contains(id)
    }

    /// Ids reported this session.
    #[must_use]
    pub fn marked(&self) -> &HashSet<StoryId> {
        &self.marked
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.marked.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_claim_reports_second_does_not() {
        let mut dedup = ViewRecordDeduplicator::new();
        let id = StoryId::new("a");
        assert!(dedup.claim(&id, false, false));
        assert!(!dedup.claim(&id, false, false));
        assert!(dedup.is_marked(&id));
    }

    #[test]
    fn own_stories_are_never_reported() {
        let mut dedup = ViewRecordDeduplicator::new();
        assert!(!dedup.claim(&StoryId::new("a"), true, false));
        assert!(dedup.is_empty());
    }

    #[test]
    fn server_seen_flag_suppresses_report() {
        let dedup = ViewRecordDeduplicator::new();
        assert!(!dedup.should_report(&StoryId::new("a"), false, true));
    }

    #[test]
    fn marked_set_only_grows() {
        let mut dedup = ViewRecordDeduplicator::new();
        let mut previous = 0;
        for id in ["a", "b", "a", "c", "b"] {
            dedup.claim(&StoryId::new(id), false, false);
            assert!(dedup.len() >= previous);
            previous = dedup.len();
        }
        assert_eq!(dedup.len(), 3);
    }
}
