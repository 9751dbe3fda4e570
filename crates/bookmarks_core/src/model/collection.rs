//! Bookmark, group and collection records.
//!
//! # Responsibility
//! - Define the persisted document shape
//!   `{ groups: [{ id, name, order, bookmarks: [{ id, title, url, order }] }] }`.
//! - Provide read helpers that present groups and bookmarks in display order.
//!
//! # Invariants
//! - A bookmark is owned by exactly one group's `bookmarks` vector.
//! - `bookmarks` and `groups` vectors carry no display sequence; callers sort
//!   through [`Collection::sorted_groups`] / [`Group::sorted_bookmarks`].

use crate::model::order::{sorted_refs, OrderedItem};
use serde::{Deserialize, Serialize};

/// Single saved link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Stable id, assigned at creation.
    pub id: String,
    /// User-facing label.
    pub title: String,
    /// Absolute `http`/`https` URL.
    pub url: String,
    /// Display order among bookmarks of the owning group.
    pub order: i64,
}

impl Bookmark {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        order: i64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            order,
        }
    }
}

/// Named container of bookmarks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Stable id, assigned at creation.
    pub id: String,
    /// User-facing name, never blank.
    pub name: String,
    /// Display order among all groups.
    pub order: i64,
    /// Owned bookmarks in arbitrary container order.
    pub bookmarks: Vec<Bookmark>,
}

impl Group {
    /// Creates an empty group.
    pub fn new(id: impl Into<String>, name: impl Into<String>, order: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            order,
            bookmarks: Vec::new(),
        }
    }

    /// Returns bookmarks sorted by `order` (stable for ties).
    pub fn sorted_bookmarks(&self) -> Vec<&Bookmark> {
        sorted_refs(&self.bookmarks)
    }

    pub fn find_bookmark(&self, bookmark_id: &str) -> Option<&Bookmark> {
        self.bookmarks
            .iter()
            .find(|bookmark| bookmark.id == bookmark_id)
    }
}

/// Aggregate root persisted as one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub groups: Vec<Group>,
}

impl Collection {
    /// Returns the `{ groups: [] }` collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns groups sorted by `order` (stable for ties).
    pub fn sorted_groups(&self) -> Vec<&Group> {
        sorted_refs(&self.groups)
    }

    pub fn find_group(&self, group_id: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == group_id)
    }

    pub fn find_group_mut(&mut self, group_id: &str) -> Option<&mut Group> {
        self.groups.iter_mut().find(|group| group.id == group_id)
    }

    /// Finds one bookmark together with its owning group.
    pub fn find_bookmark(&self, bookmark_id: &str) -> Option<(&Group, &Bookmark)> {
        self.groups.iter().find_map(|group| {
            group
                .find_bookmark(bookmark_id)
                .map(|bookmark| (group, bookmark))
        })
    }

    /// Total number of bookmarks across all groups.
    pub fn bookmark_count(&self) -> usize {
        self.groups.iter().map(|group| group.bookmarks.len()).sum()
    }
}

impl OrderedItem for Bookmark {
    fn item_id(&self) -> &str {
        &self.id
    }

    fn order(&self) -> i64 {
        self.order
    }

    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

impl OrderedItem for Group {
    fn item_id(&self) -> &str {
        &self.id
    }

    fn order(&self) -> i64 {
        self.order
    }

    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}
