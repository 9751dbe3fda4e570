use bookmarks_core::db::open_db;
use bookmarks_core::{
    encode_collection, generate_id, seed_collection, Bookmark, Collection, CollectionStore, Group,
    KeyValueStore, LoadSource, MemoryKeyValueStore, PersistenceError, SqliteKeyValueStore,
    StoreError, ID_PREFIX, STORAGE_KEY,
};
use std::collections::HashSet;

fn sample_collection() -> Collection {
    let mut work = Group::new("g-work", "Work", 0);
    work.bookmarks = vec![
        Bookmark::new("b-docs", "Docs", "https://docs.rs", 1),
        Bookmark::new("b-crates", "Crates", "https://crates.io", 0),
    ];
    let play = Group::new("g-play", "Play", 1);
    Collection {
        groups: vec![work, play],
    }
}

#[test]
fn generate_id_has_prefix_and_bounded_length() {
    let id = generate_id();
    assert!(id.starts_with(ID_PREFIX));
    assert!(id.starts_with("id-"));
    assert!(id.len() > 10, "id too short: {id}");
    assert!(id.len() < 30, "id too long: {id}");
}

#[test]
fn generate_id_is_unique_across_consecutive_calls() {
    let ids = (0..1000).map(|_| generate_id()).collect::<HashSet<_>>();
    assert_eq!(ids.len(), 1000);
}

#[test]
fn save_writes_exact_document_under_storage_key() {
    let store = CollectionStore::new(MemoryKeyValueStore::new());
    let collection = Collection {
        groups: vec![Group::new("test", "Test", 0)],
    };

    assert!(store.save(&collection));
    assert_eq!(
        store.inner().get(STORAGE_KEY).unwrap().as_deref(),
        Some(r#"{"groups":[{"id":"test","name":"Test","order":0,"bookmarks":[]}]}"#)
    );
}

#[test]
fn save_overwrites_existing_document() {
    let store = CollectionStore::new(MemoryKeyValueStore::new());
    assert!(store.save(&Collection {
        groups: vec![Group::new("1", "First", 0)],
    }));
    assert!(store.save(&Collection {
        groups: vec![Group::new("2", "Second", 0)],
    }));

    let loaded = store.load();
    assert_eq!(loaded.groups.len(), 1);
    assert_eq!(loaded.groups[0].name, "Second");
}

#[test]
fn save_then_load_round_trips() {
    let store = CollectionStore::new(MemoryKeyValueStore::new());
    let collection = sample_collection();

    assert!(store.save(&collection));
    let (loaded, source) = store.load_with_source();
    assert_eq!(source, LoadSource::Stored);
    assert_eq!(loaded, collection);

    assert!(store.save(&Collection::empty()));
    assert_eq!(store.load(), Collection::empty());
}

#[test]
fn load_from_empty_store_installs_and_persists_seed() {
    let store = CollectionStore::new(MemoryKeyValueStore::new());

    let (first, source) = store.load_with_source();
    assert_eq!(source, LoadSource::Seeded);
    assert_eq!(first, seed_collection());
    let names = first
        .sorted_groups()
        .iter()
        .map(|group| (group.name.as_str(), group.order))
        .collect::<Vec<_>>();
    assert_eq!(names, vec![("Development", 0), ("Social", 1), ("News", 2)]);
    assert!(store.inner().get(STORAGE_KEY).unwrap().is_some());

    let (second, source) = store.load_with_source();
    assert_eq!(source, LoadSource::Stored);
    assert_eq!(second, first);
}

#[test]
fn seed_data_has_dense_orders_and_https_bookmarks() {
    let seed = seed_collection();
    let development = seed
        .groups
        .iter()
        .find(|group| group.name == "Development")
        .unwrap();
    assert!(!development.bookmarks.is_empty());

    let mut group_orders = seed.groups.iter().map(|group| group.order).collect::<Vec<_>>();
    group_orders.sort_unstable();
    assert_eq!(group_orders, (0..seed.groups.len() as i64).collect::<Vec<_>>());

    for group in &seed.groups {
        let mut orders = group
            .bookmarks
            .iter()
            .map(|bookmark| bookmark.order)
            .collect::<Vec<_>>();
        orders.sort_unstable();
        assert_eq!(orders, (0..group.bookmarks.len() as i64).collect::<Vec<_>>());
        assert!(group
            .bookmarks
            .iter()
            .all(|bookmark| bookmark.url.starts_with("https://")));
    }
}

#[test]
fn load_returns_empty_collection_for_corrupt_text() {
    let kv = MemoryKeyValueStore::new();
    kv.set(STORAGE_KEY, "invalid json{").unwrap();
    let store = CollectionStore::new(&kv);

    let (loaded, source) = store.load_with_source();
    assert_eq!(source, LoadSource::Recovered);
    assert_eq!(loaded, Collection { groups: vec![] });
    // corrupt document is not replaced by a load
    assert_eq!(kv.get(STORAGE_KEY).unwrap().as_deref(), Some("invalid json{"));
}

#[test]
fn load_returns_empty_collection_for_wrong_shape() {
    let kv = MemoryKeyValueStore::new();
    for document in [
        r#"{"groups":[{"id":"g","order":0,"bookmarks":[]}]}"#,
        r#"{"groups":[{"id":"g","name":"G","order":0,"bookmarks":[{"id":"b","title":"B","order":0}]}]}"#,
        r#"{"groups":"nope"}"#,
        r#"{}"#,
    ] {
        kv.set(STORAGE_KEY, document).unwrap();
        assert_eq!(CollectionStore::new(&kv).load(), Collection::empty());
    }
}

#[test]
fn load_recovers_when_ids_are_not_unique() {
    let kv = MemoryKeyValueStore::new();
    let mut first = Group::new("g-a", "A", 0);
    first.bookmarks = vec![Bookmark::new("b-shared", "One", "https://one.example", 0)];
    let mut second = Group::new("g-b", "B", 1);
    second.bookmarks = vec![Bookmark::new("b-shared", "Two", "https://two.example", 0)];
    let shared_bookmark = Collection {
        groups: vec![first, second],
    };
    let shared_group = Collection {
        groups: vec![Group::new("g-a", "A", 0), Group::new("g-a", "B", 1)],
    };

    for collection in [shared_bookmark, shared_group] {
        let document = encode_collection(&collection).unwrap();
        kv.set(STORAGE_KEY, &document).unwrap();

        let (loaded, source) = CollectionStore::new(&kv).load_with_source();
        assert_eq!(source, LoadSource::Recovered);
        assert_eq!(loaded, Collection::empty());
    }
}

#[test]
fn save_reports_false_when_quota_is_exceeded() {
    let kv = MemoryKeyValueStore::with_quota(64);
    let store = CollectionStore::new(&kv);

    assert!(!store.save(&seed_collection()));
    let err = store.try_save(&seed_collection()).unwrap_err();
    assert!(matches!(
        err,
        PersistenceError::Store(StoreError::QuotaExceeded { limit: 64, .. })
    ));
    assert_eq!(kv.get(STORAGE_KEY).unwrap(), None);

    assert!(store.save(&Collection::empty()));
}

#[test]
fn clear_makes_next_load_seed_again() {
    let store = CollectionStore::new(MemoryKeyValueStore::new());
    assert!(store.save(&sample_collection()));

    store.clear().unwrap();
    let (loaded, source) = store.load_with_source();
    assert_eq!(source, LoadSource::Seeded);
    assert_eq!(loaded, seed_collection());
}

#[test]
fn sqlite_store_round_trips_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bookmarks.db");
    let collection = sample_collection();

    {
        let conn = open_db(&path).unwrap();
        let store = CollectionStore::new(SqliteKeyValueStore::try_new(&conn).unwrap());
        assert!(store.save(&collection));
    }

    let conn = open_db(&path).unwrap();
    let store = CollectionStore::new(SqliteKeyValueStore::try_new(&conn).unwrap());
    let (loaded, source) = store.load_with_source();
    assert_eq!(source, LoadSource::Stored);
    assert_eq!(loaded, collection);
}
