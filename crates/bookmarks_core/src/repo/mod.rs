//! Storage layer: key-value stores and the collection persistence adapter.
//!
//! # Responsibility
//! - Define the key-value store contract and its SQLite/memory backends.
//! - Isolate document encoding and schema validation from the model.
//!
//! # Invariants
//! - The collection is always stored as one document under one key.

pub mod collection_store;
pub mod kv_store;
