//! Collection persistence adapter.
//!
//! # Responsibility
//! - Save and load the whole collection as one JSON document under
//!   [`STORAGE_KEY`].
//! - Install the seed dataset on first load.
//! - Validate stored documents against the expected shape before use.
//!
//! # Invariants
//! - `save` and `load` never panic and never return errors; failures are
//!   logged and reported through their return values.
//! - A stored document that does not match the schema loads as an empty
//!   collection and is left in place (the next successful save replaces it).

use crate::model::collection::Collection;
use crate::model::seed::seed_collection;
use crate::repo::kv_store::{KeyValueStore, StoreError};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Well-known key holding the serialized collection.
pub const STORAGE_KEY: &str = "bookmarks-data";

/// Stored document failed schema validation.
#[derive(Debug)]
pub enum SchemaError {
    /// Text is not JSON, or JSON does not match the collection shape.
    Malformed(serde_json::Error),
    /// Two groups share one id.
    DuplicateGroupId(String),
    /// One bookmark id appears more than once, in one group or across groups.
    DuplicateBookmarkId(String),
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "stored collection is malformed: {err}"),
            Self::DuplicateGroupId(id) => write!(f, "duplicate group id in stored collection: {id}"),
            Self::DuplicateBookmarkId(id) => {
                write!(f, "duplicate bookmark id in stored collection: {id}")
            }
        }
    }
}

impl Error for SchemaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            Self::DuplicateGroupId(_) | Self::DuplicateBookmarkId(_) => None,
        }
    }
}

/// Collection could not be written to the store.
#[derive(Debug)]
pub enum PersistenceError {
    Serialize(serde_json::Error),
    Store(StoreError),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize collection: {err}"),
            Self::Store(err) => write!(f, "failed to write collection: {err}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for PersistenceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Which branch [`CollectionStore::load_with_source`] took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// A valid stored document was decoded.
    Stored,
    /// Nothing was stored; the seed dataset was installed.
    Seeded,
    /// Stored document was unreadable or malformed; an empty collection was
    /// substituted.
    Recovered,
}

/// Parses and validates one stored collection document.
///
/// Besides the shape check, group ids must be unique and every bookmark id
/// must occur exactly once across the whole collection.
pub fn decode_collection(raw: &str) -> Result<Collection, SchemaError> {
    let collection: Collection = serde_json::from_str(raw).map_err(SchemaError::Malformed)?;
    ensure_unique_ids(&collection)?;
    Ok(collection)
}

/// Serializes a collection to its stored document form.
pub fn encode_collection(collection: &Collection) -> Result<String, serde_json::Error> {
    serde_json::to_string(collection)
}

/// Persistence adapter over any [`KeyValueStore`].
pub struct CollectionStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> CollectionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying key-value store.
    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Writes the collection, replacing any stored document.
    pub fn try_save(&self, collection: &Collection) -> Result<(), PersistenceError> {
        let document = encode_collection(collection).map_err(PersistenceError::Serialize)?;
        self.store.set(STORAGE_KEY, &document)?;
        debug!(
            "event=collection_save module=repo status=ok groups={} bookmarks={} bytes={}",
            collection.groups.len(),
            collection.bookmark_count(),
            document.len()
        );
        Ok(())
    }

    /// Writes the collection and reports whether the write succeeded.
    pub fn save(&self, collection: &Collection) -> bool {
        match self.try_save(collection) {
            Ok(()) => true,
            Err(err) => {
                warn!("event=collection_save module=repo status=error error={err}");
                false
            }
        }
    }

    /// Loads the stored collection, seeding or recovering as needed.
    pub fn load(&self) -> Collection {
        self.load_with_source().0
    }

    /// Loads the stored collection and reports which branch produced it.
    pub fn load_with_source(&self) -> (Collection, LoadSource) {
        let raw = match self.store.get(STORAGE_KEY) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    "event=collection_load module=repo status=error error_code=store_read_failed error={err}"
                );
                return (Collection::empty(), LoadSource::Recovered);
            }
        };

        let Some(raw) = raw else {
            let seed = seed_collection();
            let persisted = self.save(&seed);
            info!(
                "event=collection_load module=repo status=ok source=seeded groups={} persisted={}",
                seed.groups.len(),
                persisted
            );
            return (seed, LoadSource::Seeded);
        };

        match decode_collection(&raw) {
            Ok(collection) => {
                info!(
                    "event=collection_load module=repo status=ok source=stored groups={} bookmarks={}",
                    collection.groups.len(),
                    collection.bookmark_count()
                );
                (collection, LoadSource::Stored)
            }
            Err(err) => {
                warn!(
                    "event=collection_load module=repo status=error error_code=schema_invalid error={err}"
                );
                (Collection::empty(), LoadSource::Recovered)
            }
        }
    }

    /// Removes the stored document; the next load seeds again.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(STORAGE_KEY)
    }
}

fn ensure_unique_ids(collection: &Collection) -> Result<(), SchemaError> {
    let mut group_ids = HashSet::new();
    let mut bookmark_ids = HashSet::new();
    for group in &collection.groups {
        if !group_ids.insert(group.id.as_str()) {
            return Err(SchemaError::DuplicateGroupId(group.id.clone()));
        }
        for bookmark in &group.bookmarks {
            if !bookmark_ids.insert(bookmark.id.as_str()) {
                return Err(SchemaError::DuplicateBookmarkId(bookmark.id.clone()));
            }
        }
    }
    Ok(())
}
