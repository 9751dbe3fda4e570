//! Bookmark collection domain model.
//!
//! # Responsibility
//! - Define the persisted shape of groups, bookmarks and the collection root.
//! - Provide the shared ordering primitives used by every reorder path.
//!
//! # Invariants
//! - Every group and bookmark is identified by an id from [`id::generate_id`]
//!   (or a fixed seed id) that never changes after creation.
//! - Display order is derived from `order`, never from container position.

pub mod collection;
pub mod id;
pub mod order;
pub mod seed;
