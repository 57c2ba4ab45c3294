// SPDX-License-Identifier: MPL-2.0
//! Story backend port definition.
//!
//! This module defines the [`StoryService`] trait for the four backend
//! operations the playback core depends on, plus an in-memory implementation
//! used by integration tests and offline demos.
//!
//! # Design Notes
//!
//! - The backend is trusted to filter expired stories out of group fetches
//! - `mark_story_seen` is idempotent server-side; callers never retry it
//! - Methods block; the screen runs them on Tokio's blocking pool

use crate::domain::story::{AuthorId, Story, StoryId, Viewer, ViewerRoster};
use crate::error::ServiceError;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

// =============================================================================
// StoryService Trait
// =============================================================================

/// Port for the story backend.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`: several calls (a roster fetch, a
/// seen report) may be in flight at the same time.
pub trait StoryService: Send + Sync {
    /// Fetches an author's current stories in display order.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] when the request fails.
    fn fetch_story_group(&self, author: &AuthorId) -> Result<Vec<Story>, ServiceError>;

    /// Reports a story as seen by the current viewer.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] when the request fails. Callers absorb it.
    fn mark_story_seen(&self, id: &StoryId) -> Result<(), ServiceError>;

    /// Fetches who viewed one of the current viewer's own stories.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] when the request fails. Callers absorb it.
    fn fetch_viewers(&self, id: &StoryId) -> Result<ViewerRoster, ServiceError>;

    /// Deletes one of the current viewer's own stories.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] when the deletion was not applied.
    fn delete_story(&self, id: &StoryId) -> Result<(), ServiceError>;
}

// =============================================================================
// InMemoryStoryService
// =============================================================================

#[derive(Debug, Default)]
struct Store {
    groups: HashMap<AuthorId, Vec<Story>>,
    viewers: HashMap<StoryId, Vec<Viewer>>,
    seen_reports: Vec<StoryId>,
    failing: HashSet<&'static str>,
}

/// Process-local [`StoryService`] backed by a mutex-protected map.
///
/// Failures can be injected per operation with [`InMemoryStoryService::fail`].
#[derive(Debug, Default)]
pub struct InMemoryStoryService {
    store: Mutex<Store>,
}

impl InMemoryStoryService {
    /// Operation name accepted by [`InMemoryStoryService::fail`].
    pub const FETCH_GROUP: &'static str = "fetch_story_group";
    /// Operation name accepted by [`InMemoryStoryService::fail`].
    pub const MARK_SEEN: &'static str = "mark_story_seen";
    /// Operation name accepted by [`InMemoryStoryService::fail`].
    pub const FETCH_VIEWERS: &'static str = "fetch_viewers";
    /// Operation name accepted by [`InMemoryStoryService::fail`].
    pub const DELETE: &'static str = "delete_story";

    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a group of stories for an author.
    pub fn insert_group(&self, author: AuthorId, stories: Vec<Story>) {
        if let Ok(mut store) = self.store.lock() {
            store.groups.insert(author, stories);
        }
    }

    /// Records a viewer of a story.
    pub fn add_viewer(&self, id: &StoryId, viewer: Viewer) {
        if let Ok(mut store) = self.store.lock() {
            store.viewers.entry(id.clone()).or_default().push(viewer);
        }
    }

    /// Makes every subsequent call of `operation` fail with a network error.
    pub fn fail(&self, operation: &'static str) {
        if let Ok(mut store) = self.store.lock() {
            store.failing.insert(operation);
        }
    }

    /// Clears an injected failure.
    pub fn recover(&self, operation: &'static str) {
        if let Ok(mut store) = self.store.lock() {
            store.failing.remove(operation);
        }
    }

    /// Every story id reported through `mark_story_seen`, in call order.
    #[must_use]
    pub fn seen_reports(&self) -> Vec<StoryId> {
        self.store
            .lock()
            .map(|store| store.seen_reports.clone())
            .unwrap_or_default()
    }

    fn with_store<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut Store) -> Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        let mut store = self
            .store
            .lock()
            .map_err(|_| ServiceError::Other("story store poisoned".to_string()))?;
        if store.failing.contains(operation) {
            return Err(ServiceError::Network(format!("{operation} unavailable")));
        }
        f(&mut store)
    }
}

impl StoryService for InMemoryStoryService {
    fn fetch_story_group(&self, author: &AuthorId) -> Result<Vec<Story>, ServiceError> {
        self.with_store(Self::FETCH_GROUP, |store| {
            store.groups.get(author).cloned().ok_or(ServiceError::NotFound)
        })
    }

    fn mark_story_seen(&self, id: &StoryId) -> Result<(), ServiceError> {
        self.with_store(Self::MARK_SEEN, |store| {
            store.seen_reports.push(id.clone());
            for story in store.groups.values_mut().flatten() {
                if &story.id == id {
                    story.seen_by_current_viewer = true;
                }
            }
            Ok(())
        })
    }

    fn fetch_viewers(&self, id: &StoryId) -> Result<ViewerRoster, ServiceError> {
        self.with_store(Self::FETCH_VIEWERS, |store| {
            let viewers = store.viewers.get(id).cloned().unwrap_or_default();
            Ok(ViewerRoster {
                count: u32::try_from(viewers.len()).unwrap_or(u32::MAX),
                viewers,
            })
        })
    }

    fn delete_story(&self, id: &StoryId) -> Result<(), ServiceError> {
        self.with_store(Self::DELETE, |store| {
            let mut found = false;
            for stories in store.groups.values_mut() {
                let before = stories.len();
                stories.retain(|story| &story.id != id);
                found |= stories.len() != before;
            }
            if found {
                store.viewers.remove(id);
                Ok(())
            } else {
                Err(ServiceError::NotFound)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::story::MediaKind;

    // Test that the trait is object-safe
    fn _assert_object_safe(_: &dyn StoryService) {}

    fn service_with_group() -> InMemoryStoryService {
        let service = InMemoryStoryService::new();
        service.insert_group(
            AuthorId::new("ana"),
            vec![
                Story::new("a", MediaKind::photo(), "a.jpg"),
                Story::new("b", MediaKind::Video, "b.mp4"),
            ],
        );
        service
    }

    #[test]
    fn fetch_group_returns_stories_in_order() {
        let service = service_with_group();
        let stories = service.fetch_story_group(&AuthorId::new("ana")).unwrap();
        let ids: Vec<_> = stories.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn unknown_author_is_not_found() {
        let service = service_with_group();
        assert_eq!(
            service.fetch_story_group(&AuthorId::new("bob")),
            Err(ServiceError::NotFound)
        );
    }

    #[test]
    fn mark_seen_is_recorded_and_flags_story() {
        let service = service_with_group();
        service.mark_story_seen(&StoryId::new("a")).unwrap();

        assert_eq!(service.seen_reports(), vec![StoryId::new("a")]);
        let stories = service.fetch_story_group(&AuthorId::new("ana")).unwrap();
        assert!(stories[0].seen_by_current_viewer);
    }

    #[test]
    fn viewers_roster_counts_entries() {
        let service = service_with_group();
        service.add_viewer(
            &StoryId::new("a"),
            Viewer {
                id: "u1".into(),
                display_name: "Uma".into(),
            },
        );
        let roster = service.fetch_viewers(&StoryId::new("a")).unwrap();
        assert_eq!(roster.count, 1);
        assert_eq!(roster.viewers[0].display_name, "Uma");
    }

    #[test]
    fn delete_removes_story_once() {
        let service = service_with_group();
        service.delete_story(&StoryId::new("a")).unwrap();
        assert_eq!(
            service.delete_story(&StoryId::new("a")),
            Err(ServiceError::NotFound)
        );
    }

    #[test]
    fn injected_failure_until_recovered() {
        let service = service_with_group();
        service.fail(InMemoryStoryService::DELETE);
        assert!(matches!(
            service.delete_story(&StoryId::new("a")),
            Err(ServiceError::Network(_))
        ));

        service.recover(InMemoryStoryService::DELETE);
        assert!(service.delete_story(&StoryId::new("a")).is_ok());
    }
}
