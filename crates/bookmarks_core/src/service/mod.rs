//! Core use-case services.
//!
//! # Responsibility
//! - Validate and apply collection mutations.
//! - Drive drag-and-drop gestures into reorder operations.
//! - Keep renderer-facing layers decoupled from storage details.

pub mod collection_service;
pub mod reorder;
