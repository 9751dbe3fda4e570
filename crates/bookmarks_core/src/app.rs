//! Application state container for renderer-facing calls.
//!
//! # Responsibility
//! - Own the in-memory collection, its persistence adapter, the active
//!   search query and both drag controllers.
//! - Save after every successful mutation and report results through one
//!   response envelope.
//!
//! # Invariants
//! - The in-memory collection is the source of truth; a failed save is
//!   reported and logged, never rolled back.
//! - No call panics; failures surface as `ok = false` responses.

use crate::model::collection::Collection;
use crate::repo::collection_store::{CollectionStore, LoadSource};
use crate::repo::kv_store::KeyValueStore;
use crate::search::filter::{apply_filter, match_count, SearchQuery};
use crate::service::collection_service::{
    CollectionError, CollectionResult, CollectionService, ErrorKind,
};
use crate::service::reorder::{BookmarkReorder, DragElement, DragOutcome, GroupReorder};
use log::warn;

/// Result envelope for one renderer action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the action was accepted.
    pub ok: bool,
    /// Id of the created or changed entity, when there is one.
    pub id: Option<String>,
    /// Whether this action wrote the store successfully.
    pub saved: bool,
    /// Failure classification when `ok` is false.
    pub error_kind: Option<ErrorKind>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn changed(message: impl Into<String>, id: Option<String>, saved: bool) -> Self {
        let mut message = message.into();
        if !saved {
            message.push_str("; save failed, changes kept in memory");
        }
        Self {
            ok: true,
            id,
            saved,
            error_kind: None,
            message,
        }
    }

    fn unchanged(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            id: None,
            saved: false,
            error_kind: None,
            message: message.into(),
        }
    }

    fn failure(err: &CollectionError) -> Self {
        Self {
            ok: false,
            id: None,
            saved: false,
            error_kind: Some(err.kind()),
            message: err.to_string(),
        }
    }
}

/// Result of completing a drag gesture with a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropResponse {
    pub outcome: DragOutcome,
    /// Whether the drop wrote the store. Only a `Moved` drop saves.
    pub saved: bool,
}

/// Top-level bookmark application state.
pub struct BookmarkApp<S: KeyValueStore> {
    store: CollectionStore<S>,
    collection: Collection,
    load_source: LoadSource,
    query: SearchQuery,
    bookmark_drag: BookmarkReorder,
    group_drag: GroupReorder,
}

impl<S: KeyValueStore> BookmarkApp<S> {
    /// Loads the stored collection (seeding an empty store).
    pub fn open(store: S) -> Self {
        let store = CollectionStore::new(store);
        let (collection, load_source) = store.load_with_source();
        Self {
            store,
            collection,
            load_source,
            query: SearchQuery::default(),
            bookmark_drag: BookmarkReorder::new(),
            group_drag: GroupReorder::new(),
        }
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn store(&self) -> &CollectionStore<S> {
        &self.store
    }

    /// How the collection was obtained at startup.
    pub fn load_source(&self) -> LoadSource {
        self.load_source
    }

    pub fn add_group(&mut self, name: &str) -> ActionResponse {
        let result = self.service().add_group(name).map(|group| group.id);
        self.finish(result, "group created")
    }

    pub fn rename_group(&mut self, group_id: &str, name: &str) -> ActionResponse {
        let result = self
            .service()
            .rename_group(group_id, name)
            .map(|()| group_id.to_string());
        self.finish(result, "group renamed")
    }

    pub fn delete_group(&mut self, group_id: &str) -> ActionResponse {
        if !self.service().delete_group(group_id) {
            return ActionResponse::unchanged("group not found; nothing deleted");
        }
        self.finish(Ok(group_id.to_string()), "group deleted")
    }

    pub fn add_bookmark(&mut self, group_id: &str, title: &str, url: &str) -> ActionResponse {
        let result = self
            .service()
            .add_bookmark(group_id, title, url)
            .map(|bookmark| bookmark.id);
        self.finish(result, "bookmark created")
    }

    pub fn edit_bookmark(
        &mut self,
        bookmark_id: &str,
        title: &str,
        url: &str,
        target_group_id: &str,
    ) -> ActionResponse {
        let result = self
            .service()
            .edit_bookmark(bookmark_id, title, url, target_group_id)
            .map(|bookmark| bookmark.id);
        self.finish(result, "bookmark updated")
    }

    pub fn delete_bookmark(&mut self, bookmark_id: &str) -> ActionResponse {
        if !self.service().delete_bookmark(bookmark_id) {
            return ActionResponse::unchanged("bookmark not found; nothing deleted");
        }
        self.finish(Ok(bookmark_id.to_string()), "bookmark deleted")
    }

    pub fn move_bookmark(
        &mut self,
        group_id: &str,
        bookmark_id: &str,
        target_index: usize,
    ) -> ActionResponse {
        match self
            .service()
            .move_bookmark(group_id, bookmark_id, target_index)
        {
            Ok(false) => ActionResponse::unchanged("bookmark already at target position"),
            Ok(true) => self.finish(Ok(bookmark_id.to_string()), "bookmark moved"),
            Err(err) => self.finish(Err(err), ""),
        }
    }

    pub fn move_group(&mut self, group_id: &str, target_index: usize) -> ActionResponse {
        match self.service().move_group(group_id, target_index) {
            Ok(false) => ActionResponse::unchanged("group already at target position"),
            Ok(true) => self.finish(Ok(group_id.to_string()), "group moved"),
            Err(err) => self.finish(Err(err), ""),
        }
    }

    /// Sets the active search text.
    pub fn set_query(&mut self, text: &str) {
        self.query = SearchQuery::new(text);
    }

    pub fn clear_query(&mut self) {
        self.query = SearchQuery::default();
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// Collection as it should be rendered under the active query.
    pub fn view(&self) -> Collection {
        apply_filter(&self.collection, self.query.as_str())
    }

    /// Matches for the active query (`0` when no query is active).
    pub fn match_count(&self) -> usize {
        match_count(&self.collection, self.query.as_str())
    }

    pub fn bookmark_drag(&self) -> &BookmarkReorder {
        &self.bookmark_drag
    }

    pub fn group_drag(&self) -> &GroupReorder {
        &self.group_drag
    }

    pub fn begin_bookmark_drag(&mut self, element: &DragElement) -> bool {
        self.bookmark_drag.begin(element)
    }

    pub fn bookmark_drag_over(&self, element: &DragElement) -> bool {
        self.bookmark_drag.drag_over(element)
    }

    pub fn drop_bookmark(&mut self, target: &DragElement) -> DropResponse {
        let result = self.bookmark_drag.drop_on(&mut self.collection, target);
        self.settle_drop(result)
    }

    pub fn cancel_bookmark_drag(&mut self) -> DragOutcome {
        self.bookmark_drag.cancel()
    }

    pub fn begin_group_drag(&mut self, element: &DragElement) -> bool {
        self.group_drag.begin(element)
    }

    pub fn group_drag_over(&self, element: &DragElement) -> bool {
        self.group_drag.drag_over(element)
    }

    pub fn drop_group(&mut self, target: &DragElement) -> DropResponse {
        let result = self.group_drag.drop_on(&mut self.collection, target);
        self.settle_drop(result)
    }

    pub fn cancel_group_drag(&mut self) -> DragOutcome {
        self.group_drag.cancel()
    }

    fn service(&mut self) -> CollectionService<'_> {
        CollectionService::new(&mut self.collection)
    }

    fn finish(&mut self, result: CollectionResult<String>, message: &str) -> ActionResponse {
        match result {
            Ok(id) => {
                let saved = self.store.save(&self.collection);
                ActionResponse::changed(message, Some(id), saved)
            }
            Err(err) => {
                warn!(
                    "event=action_rejected module=app status=error kind={:?}",
                    err.kind()
                );
                ActionResponse::failure(&err)
            }
        }
    }

    fn settle_drop(&mut self, result: CollectionResult<DragOutcome>) -> DropResponse {
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(
                    "event=drag_drop module=app status=error kind={:?}",
                    err.kind()
                );
                DragOutcome::Ignored
            }
        };
        let saved = outcome == DragOutcome::Moved && self.store.save(&self.collection);
        DropResponse { outcome, saved }
    }
}
