//! Collection mutation service.
//!
//! # Responsibility
//! - Validate user input (group names, bookmark URLs, target groups).
//! - Provide add/edit/delete/move operations over an in-memory collection.
//!
//! # Invariants
//! - Failed operations leave the collection untouched.
//! - Every add/edit/move leaves group and bookmark orders dense (`0..n-1`)
//!   when they were dense before.
//! - Deletes never renumber siblings; relative order is unaffected.
//! - The service never persists; callers save after mutating.

use crate::model::collection::{Bookmark, Collection, Group};
use crate::model::id::generate_id;
use crate::model::order::{move_to_index, next_order, normalize_orders};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use url::Url;

/// Result type used by collection service operations.
pub type CollectionResult<T> = Result<T, CollectionError>;

/// Coarse classification of [`CollectionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad user input; nothing was mutated.
    Validation,
    /// Operation referenced an id that does not exist.
    NotFound,
}

/// Errors from collection service operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// Group name is blank after trim.
    InvalidGroupName,
    /// URL is blank, malformed, or not `http`/`https`.
    InvalidUrl { url: String, reason: String },
    /// Selected target group does not exist.
    UnknownGroup(String),
    /// Referenced group does not exist.
    GroupNotFound(String),
    /// Referenced bookmark does not exist.
    BookmarkNotFound(String),
}

impl CollectionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidGroupName | Self::InvalidUrl { .. } | Self::UnknownGroup(_) => {
                ErrorKind::Validation
            }
            Self::GroupNotFound(_) | Self::BookmarkNotFound(_) => ErrorKind::NotFound,
        }
    }
}

impl Display for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidGroupName => write!(f, "group name must not be blank"),
            Self::InvalidUrl { url, reason } => write!(f, "invalid url `{url}`: {reason}"),
            Self::UnknownGroup(id) => write!(f, "target group does not exist: {id}"),
            Self::GroupNotFound(id) => write!(f, "group not found: {id}"),
            Self::BookmarkNotFound(id) => write!(f, "bookmark not found: {id}"),
        }
    }
}

impl Error for CollectionError {}

/// Mutation facade over one borrowed collection.
pub struct CollectionService<'c> {
    collection: &'c mut Collection,
}

impl<'c> CollectionService<'c> {
    pub fn new(collection: &'c mut Collection) -> Self {
        Self { collection }
    }

    pub fn collection(&self) -> &Collection {
        self.collection
    }

    /// Appends a new empty group after all existing groups.
    pub fn add_group(&mut self, name: &str) -> CollectionResult<Group> {
        let name = normalize_group_name(name)?;
        let order = next_order(&mut self.collection.groups);
        let group = Group::new(generate_id(), name, order);
        self.collection.groups.push(group.clone());
        debug!(
            "event=group_add module=service status=ok group_id={} order={}",
            group.id, group.order
        );
        Ok(group)
    }

    /// Renames one group; its order is unchanged.
    pub fn rename_group(&mut self, group_id: &str, name: &str) -> CollectionResult<()> {
        let name = normalize_group_name(name)?;
        let group = self
            .collection
            .find_group_mut(group_id)
            .ok_or_else(|| CollectionError::GroupNotFound(group_id.to_string()))?;
        group.name = name;
        Ok(())
    }

    /// Appends a new bookmark to the end of `group_id`.
    pub fn add_bookmark(
        &mut self,
        group_id: &str,
        title: &str,
        url: &str,
    ) -> CollectionResult<Bookmark> {
        let url = normalize_url(url)?;
        let group = self
            .collection
            .find_group_mut(group_id)
            .ok_or_else(|| CollectionError::UnknownGroup(group_id.to_string()))?;

        let order = next_order(&mut group.bookmarks);
        let bookmark = Bookmark::new(generate_id(), title.trim(), url, order);
        group.bookmarks.push(bookmark.clone());
        debug!(
            "event=bookmark_add module=service status=ok group_id={} bookmark_id={} order={}",
            group.id, bookmark.id, bookmark.order
        );
        Ok(bookmark)
    }

    /// Updates title/url and optionally relocates the bookmark.
    ///
    /// Staying in the same group keeps `order`. Relocation appends to the
    /// target group and closes the gap left in the source group.
    pub fn edit_bookmark(
        &mut self,
        bookmark_id: &str,
        title: &str,
        url: &str,
        target_group_id: &str,
    ) -> CollectionResult<Bookmark> {
        let url = normalize_url(url)?;
        let source_index = self
            .group_index_of_bookmark(bookmark_id)
            .ok_or_else(|| CollectionError::BookmarkNotFound(bookmark_id.to_string()))?;
        let target_index = self
            .collection
            .groups
            .iter()
            .position(|group| group.id == target_group_id)
            .ok_or_else(|| CollectionError::UnknownGroup(target_group_id.to_string()))?;
        let title = title.trim().to_string();

        if source_index == target_index {
            let bookmark = self.collection.groups[source_index]
                .bookmarks
                .iter_mut()
                .find(|bookmark| bookmark.id == bookmark_id)
                .ok_or_else(|| CollectionError::BookmarkNotFound(bookmark_id.to_string()))?;
            bookmark.title = title;
            bookmark.url = url;
            return Ok(bookmark.clone());
        }

        let source = &mut self.collection.groups[source_index];
        let position = source
            .bookmarks
            .iter()
            .position(|bookmark| bookmark.id == bookmark_id)
            .ok_or_else(|| CollectionError::BookmarkNotFound(bookmark_id.to_string()))?;
        let mut bookmark = source.bookmarks.remove(position);
        normalize_orders(&mut source.bookmarks);
        let source_id = source.id.clone();

        let target = &mut self.collection.groups[target_index];
        bookmark.title = title;
        bookmark.url = url;
        bookmark.order = next_order(&mut target.bookmarks);
        target.bookmarks.push(bookmark.clone());
        debug!(
            "event=bookmark_relocate module=service status=ok bookmark_id={} from_group={} to_group={} order={}",
            bookmark.id, source_id, target.id, bookmark.order
        );
        Ok(bookmark)
    }

    /// Removes one bookmark. Returns `false` when it does not exist.
    pub fn delete_bookmark(&mut self, bookmark_id: &str) -> bool {
        for group in &mut self.collection.groups {
            if let Some(position) = group
                .bookmarks
                .iter()
                .position(|bookmark| bookmark.id == bookmark_id)
            {
                group.bookmarks.remove(position);
                return true;
            }
        }
        false
    }

    /// Removes one group with all its bookmarks. Returns `false` when it does
    /// not exist.
    pub fn delete_group(&mut self, group_id: &str) -> bool {
        let before = self.collection.groups.len();
        self.collection.groups.retain(|group| group.id != group_id);
        before != self.collection.groups.len()
    }

    /// Moves a bookmark to `target_index` in its group's display sequence.
    ///
    /// Returns `Ok(false)` when the bookmark already sits at the (clamped)
    /// target index.
    pub fn move_bookmark(
        &mut self,
        group_id: &str,
        bookmark_id: &str,
        target_index: usize,
    ) -> CollectionResult<bool> {
        let group = self
            .collection
            .find_group_mut(group_id)
            .ok_or_else(|| CollectionError::GroupNotFound(group_id.to_string()))?;
        move_to_index(&mut group.bookmarks, bookmark_id, target_index)
            .ok_or_else(|| CollectionError::BookmarkNotFound(bookmark_id.to_string()))
    }

    /// Moves a group to `target_index` in the collection's display sequence.
    pub fn move_group(&mut self, group_id: &str, target_index: usize) -> CollectionResult<bool> {
        move_to_index(&mut self.collection.groups, group_id, target_index)
            .ok_or_else(|| CollectionError::GroupNotFound(group_id.to_string()))
    }

    fn group_index_of_bookmark(&self, bookmark_id: &str) -> Option<usize> {
        self.collection
            .groups
            .iter()
            .position(|group| group.find_bookmark(bookmark_id).is_some())
    }
}

/// Trims and validates a bookmark URL.
///
/// Accepts absolute `http`/`https` URLs with a host; everything else
/// (`ftp:`, `javascript:`, schemeless text, blank input) is rejected.
pub fn normalize_url(value: &str) -> CollectionResult<String> {
    let trimmed = value.trim();
    let invalid = |reason: String| CollectionError::InvalidUrl {
        url: trimmed.to_string(),
        reason,
    };

    if trimmed.is_empty() {
        return Err(invalid("url must not be blank".to_string()));
    }
    let parsed = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme `{other}`"))),
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(invalid("url has no host".to_string()));
    }
    Ok(trimmed.to_string())
}

fn normalize_group_name(value: &str) -> CollectionResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CollectionError::InvalidGroupName);
    }
    Ok(trimmed.to_string())
}
