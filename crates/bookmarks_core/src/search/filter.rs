//! Case-insensitive substring search over titles and URLs.
//!
//! # Invariants
//! - Inputs are never mutated; results are fresh copies.
//! - Relative order of bookmarks and groups is preserved.
//! - A blank query matches everything.

use crate::model::collection::{Bookmark, Collection, Group};

/// Normalized search text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    /// Trims and lowercases `text`.
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.trim().to_lowercase(),
        }
    }

    /// Whether a non-blank query is in effect.
    pub fn is_active(&self) -> bool {
        !self.needle.is_empty()
    }

    /// Normalized (trimmed, lowercase) query text.
    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Whether `bookmark` matches. Inactive queries match everything.
    pub fn matches(&self, bookmark: &Bookmark) -> bool {
        !self.is_active()
            || bookmark.title.to_lowercase().contains(&self.needle)
            || bookmark.url.to_lowercase().contains(&self.needle)
    }
}

/// Returns bookmarks whose title or URL contains `query`.
pub fn filter_bookmarks(bookmarks: &[Bookmark], query: &str) -> Vec<Bookmark> {
    let query = SearchQuery::new(query);
    bookmarks
        .iter()
        .filter(|bookmark| query.matches(bookmark))
        .cloned()
        .collect()
}

/// Returns the collection reduced to matching bookmarks.
///
/// Groups without matches are dropped. A blank query returns a full copy.
pub fn apply_filter(collection: &Collection, query: &str) -> Collection {
    let query = SearchQuery::new(query);
    if !query.is_active() {
        return collection.clone();
    }

    let groups = collection
        .groups
        .iter()
        .filter_map(|group| {
            let bookmarks = group
                .bookmarks
                .iter()
                .filter(|bookmark| query.matches(bookmark))
                .cloned()
                .collect::<Vec<_>>();
            (!bookmarks.is_empty()).then(|| Group {
                id: group.id.clone(),
                name: group.name.clone(),
                order: group.order,
                bookmarks,
            })
        })
        .collect();
    Collection { groups }
}

/// Counts matching bookmarks across all groups.
///
/// Returns `0` for a blank query; use [`SearchQuery::is_active`] to tell "no
/// search" from "no matches".
pub fn match_count(collection: &Collection, query: &str) -> usize {
    let query = SearchQuery::new(query);
    if !query.is_active() {
        return 0;
    }
    collection
        .groups
        .iter()
        .flat_map(|group| group.bookmarks.iter())
        .filter(|bookmark| query.matches(bookmark))
        .count()
}
