//! Core logic for the bookmark manager.
//! This crate owns the collection model, its ordering invariants, search and
//! persistence; renderers only read views and call back into it.

pub mod app;
pub mod db;
pub mod favicon;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use app::{ActionResponse, BookmarkApp, DropResponse};
pub use favicon::favicon_url;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::collection::{Bookmark, Collection, Group};
pub use model::id::{generate_id, ID_PREFIX};
pub use model::order::{normalize_orders, OrderedItem};
pub use model::seed::seed_collection;
pub use repo::collection_store::{
    decode_collection, encode_collection, CollectionStore, LoadSource, PersistenceError,
    SchemaError, STORAGE_KEY,
};
pub use repo::kv_store::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult,
};
pub use search::filter::{apply_filter, filter_bookmarks, match_count, SearchQuery};
pub use service::collection_service::{
    normalize_url, CollectionError, CollectionResult, CollectionService, ErrorKind,
};
pub use service::reorder::{BookmarkReorder, DragElement, DragOutcome, DragPhase, GroupReorder};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
