//! Search entry points.
//!
//! # Responsibility
//! - Produce filtered, read-only views of the collection for rendering.

pub mod filter;
