// SPDX-License-Identifier: MPL-2.0
//! "Who viewed this" roster loading for the viewer's own stories.
//!
//! Every activation of an item bumps the epoch and issues a request stamped
//! with it. A response is applied only while its epoch is still current and
//! it names the item now showing, so a slow response for an earlier item
//! cannot overwrite the roster on screen. Nothing is cancelled; stale
//! responses are simply dropped.
//!
//! Successful rosters are cached per story: revisiting an item shows the last
//! known roster while the refresh is in flight, and a failed refresh leaves it
//! in place.

use crate::domain::story::{RosterEpoch, StoryId, ViewerRoster};
use crate::error::ServiceError;
use std::collections::HashMap;

/// A roster fetch to run, stamped with the epoch it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRequest {
    pub story_id: StoryId,
    pub epoch: RosterEpoch,
}

/// What happened to a roster response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterOutcome {
    /// The roster is now displayed.
    Applied,
    /// The response belongs to an earlier epoch and was dropped.
    Stale,
    /// The request failed; the previous roster (if any) stays displayed.
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct ViewerRosterFetcher {
    enabled: bool,
    epoch: RosterEpoch,
    current: Option<StoryId>,
    loading: bool,
    cache: HashMap<StoryId, ViewerRoster>,
}

impl ViewerRosterFetcher {
    /// Creates a fetcher; a disabled one (someone else's stories) never issues requests.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    /// Records that `story_id` became the current item.
    pub fn activate(&mut self, story_id: &StoryId) -> Option<RosterRequest> {
        if !self.enabled {
            return None;
        }
        self.epoch = self.epoch.next();
        self.current = Some(story_id.clone());
        self.loading = true;
        Some(RosterRequest {
            story_id: story_id.clone(),
            epoch: self.epoch,
        })
    }

    /// Applies a response if it is still current.
    ///
    /// Epochs restart with every fetcher, so the story id is checked too.
    pub fn apply(
        &mut self,
        epoch: RosterEpoch,
        story_id: &StoryId,
        result: Result<ViewerRoster, ServiceError>,
    ) -> RosterOutcome {
        if !self.enabled || epoch != self.epoch || self.current.as_ref() != Some(story_id) {
            return RosterOutcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(roster) => {
                self.cache.insert(story_id.clone(), roster);
                RosterOutcome::Applied
            }
            Err(_) => RosterOutcome::Failed,
        }
    }

    /// Invalidates every in-flight request without issuing a new one.
    pub fn detach(&mut self) {
        if self.enabled {
            self.epoch = self.epoch.next();
            self.current = None;
            self.loading = false;
        }
    }

    /// Drops the cached roster of a deleted story.
    pub fn forget(&mut self, story_id: &StoryId) {
        self.cache.remove(story_id);
    }

    /// Roster to display for the current item.
    #[must_use]
    pub fn roster(&self) -> Option<&ViewerRoster> {
        self.current.as_ref().and_then(|id| self.cache.get(id))
    }

    /// Whether a request for the current item is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn epoch(&self) -> RosterEpoch {
        self.epoch
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::story::Viewer;

    fn roster(count: u32) -> ViewerRoster {
        ViewerRoster {
            count,
            viewers: (0..count)
                .map(|i| Viewer {
                    id: format!("u{i}"),
                    display_name: format!("User {i}"),
                })
                .collect(),
        }
    }

    #[test]
    fn disabled_fetcher_issues_nothing() {
        let mut fetcher = ViewerRosterFetcher::new(false);
        assert!(fetcher.activate(&StoryId::new("a")).is_none());
        assert_eq!(fetcher.epoch(), RosterEpoch::default());
    }

    #[test]
    fn current_response_is_applied() {
        let mut fetcher = ViewerRosterFetcher::new(true);
        let request = fetcher.activate(&StoryId::new("a")).unwrap();
        assert!(fetcher.is_loading());

        assert_eq!(
            fetcher.apply(request.epoch, &request.story_id, Ok(roster(2))),
            RosterOutcome::Applied
        );
        assert!(!fetcher.is_loading());
        assert_eq!(fetcher.roster().map(|r| r.count), Some(2));
    }

    #[test]
    fn response_two_epochs_old_is_discarded() {
        let mut fetcher = ViewerRosterFetcher::new(true);
        let first = fetcher.activate(&StoryId::new("a")).unwrap();
        fetcher.activate(&StoryId::new("b"));
        let third = fetcher.activate(&StoryId::new("c")).unwrap();
        assert_eq!(third.epoch.value(), first.epoch.value() + 2);

        assert_eq!(
            fetcher.apply(first.epoch, &first.story_id, Ok(roster(9))),
            RosterOutcome::Stale
        );
        assert!(fetcher.roster().is_none());
        assert!(fetcher.is_loading());
    }

    #[test]
    fn cached_roster_survives_failed_refresh() {
        let mut fetcher = ViewerRosterFetcher::new(true);
        let id = StoryId::new("a");
        let request = fetcher.activate(&id).unwrap();
        fetcher.apply(request.epoch, &id, Ok(roster(1)));

        fetcher.activate(&StoryId::new("b"));
        let revisit = fetcher.activate(&id).unwrap();
        // Shown while the refresh is in flight.
        assert_eq!(fetcher.roster().map(|r| r.count), Some(1));

        assert_eq!(
            fetcher.apply(
                revisit.epoch,
                &revisit.story_id,
                Err(ServiceError::Network("offline".into()))
            ),
            RosterOutcome::Failed
        );
        assert_eq!(fetcher.roster().map(|r| r.count), Some(1));
        assert!(!fetcher.is_loading());
    }

    #[test]
    fn detach_discards_in_flight_responses() {
        let mut fetcher = ViewerRosterFetcher::new(true);
        let request = fetcher.activate(&StoryId::new("a")).unwrap();
        fetcher.detach();
        assert_eq!(
            fetcher.apply(request.epoch, &request.story_id, Ok(roster(3))),
            RosterOutcome::Stale
        );
    }

    #[test]
    fn response_for_another_story_is_discarded() {
        // A fresh fetcher reuses epoch values a previous one already issued.
        let mut old = ViewerRosterFetcher::new(true);
        let late = old.activate(&StoryId::new("a")).unwrap();

        let mut fetcher = ViewerRosterFetcher::new(true);
        let request = fetcher.activate(&StoryId::new("b")).unwrap();
        assert_eq!(late.epoch, request.epoch);

        assert_eq!(
            fetcher.apply(late.epoch, &late.story_id, Ok(roster(42))),
            RosterOutcome::Stale
        );
        assert!(fetcher.roster().is_none());
        assert!(fetcher.is_loading());
    }

    #[test]
    fn forget_drops_cache_entry() {
        let mut fetcher = ViewerRosterFetcher::new(true);
        let id = StoryId::new("a");
        let request = fetcher.activate(&id).unwrap();
        fetcher.apply(request.epoch, &id, Ok(roster(1)));
        fetcher.forget(&id);
        assert!(fetcher.roster().is_none());
    }
}
