//! Drag-and-drop reorder controllers.
//!
//! # Responsibility
//! - Track one drag gesture at a time for bookmarks and, separately, groups.
//! - Translate a drop onto a target element into a move operation.
//!
//! # Invariants
//! - Gesture state is `Idle -> Dragging -> (Dropped | Cancelled) -> Idle`.
//!   Only `Idle` and `Dragging` are held ([`DragPhase`]); the terminal
//!   transitions are returned as [`DragOutcome`] and the controller is
//!   already `Idle` again when the call returns.
//! - Every terminal event (drop or cancel) clears all tracked state, even when
//!   the drop was a no-op or failed.
//! - Drag-over never mutates the collection.
//! - Bookmark drops never cross groups; relocation goes through
//!   `CollectionService::edit_bookmark`.

use crate::model::collection::Collection;
use crate::model::order::display_position;
use crate::service::collection_service::{CollectionResult, CollectionService};
use log::debug;

/// Observable controller phase between events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
}

/// Terminal transition of one gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Drop moved the dragged item.
    Moved,
    /// Drop landed on the item's current position.
    Unchanged,
    /// Drop was not applicable (no gesture, wrong element, other group).
    Ignored,
    /// Gesture ended without a drop.
    Cancelled,
}

/// Rendered element a gesture starts from or lands on.
///
/// Mirrors the `data-id` / `data-group-id` attributes the renderer attaches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragElement {
    Bookmark { id: String, group_id: String },
    Group { id: String },
}

impl DragElement {
    pub fn bookmark(id: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self::Bookmark {
            id: id.into(),
            group_id: group_id.into(),
        }
    }

    pub fn group(id: impl Into<String>) -> Self {
        Self::Group { id: id.into() }
    }
}

#[derive(Debug, Default)]
struct DragState {
    dragged_id: Option<String>,
    source_group_id: Option<String>,
}

impl DragState {
    fn phase(&self) -> DragPhase {
        if self.dragged_id.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }
}

/// Bookmark-level reorder controller.
#[derive(Debug, Default)]
pub struct BookmarkReorder {
    state: DragState,
}

impl BookmarkReorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        self.state.phase()
    }

    pub fn dragged_id(&self) -> Option<&str> {
        self.state.dragged_id.as_deref()
    }

    pub fn source_group_id(&self) -> Option<&str> {
        self.state.source_group_id.as_deref()
    }

    /// Starts a gesture. Only bookmark elements are draggable here.
    ///
    /// Returns whether the controller entered `Dragging`. A new gesture
    /// replaces any stale one.
    pub fn begin(&mut self, element: &DragElement) -> bool {
        let DragElement::Bookmark { id, group_id } = element else {
            return false;
        };
        self.state = DragState {
            dragged_id: Some(id.clone()),
            source_group_id: Some(group_id.clone()),
        };
        debug!("event=drag_start module=reorder level=bookmark bookmark_id={id} group_id={group_id}");
        true
    }

    /// Returns whether `element` is a valid drop target for the gesture.
    pub fn drag_over(&self, element: &DragElement) -> bool {
        match (self.state.source_group_id.as_deref(), element) {
            (Some(source), DragElement::Bookmark { group_id, .. }) => source == group_id,
            (Some(source), DragElement::Group { id }) => source == id,
            (None, _) => false,
        }
    }

    /// Completes the gesture by dropping onto `target`.
    ///
    /// Dropping onto a sibling bookmark moves to that sibling's display
    /// index; dropping onto the source group element moves to the end.
    pub fn drop_on(
        &mut self,
        collection: &mut Collection,
        target: &DragElement,
    ) -> CollectionResult<DragOutcome> {
        let state = std::mem::take(&mut self.state);
        let (Some(dragged_id), Some(source_group_id)) = (state.dragged_id, state.source_group_id)
        else {
            return Ok(DragOutcome::Ignored);
        };

        let target_index = match target {
            DragElement::Bookmark { id, group_id } if *group_id == source_group_id => collection
                .find_group(group_id)
                .and_then(|group| display_position(&group.bookmarks, id)),
            DragElement::Group { id } if *id == source_group_id => Some(usize::MAX),
            _ => None,
        };
        let Some(target_index) = target_index else {
            debug!("event=drag_drop module=reorder level=bookmark status=ignored bookmark_id={dragged_id}");
            return Ok(DragOutcome::Ignored);
        };

        let moved = CollectionService::new(collection).move_bookmark(
            &source_group_id,
            &dragged_id,
            target_index,
        )?;
        debug!(
            "event=drag_drop module=reorder level=bookmark status=ok bookmark_id={dragged_id} moved={moved}"
        );
        Ok(if moved {
            DragOutcome::Moved
        } else {
            DragOutcome::Unchanged
        })
    }

    /// Ends the gesture without a drop.
    pub fn cancel(&mut self) -> DragOutcome {
        self.state = DragState::default();
        DragOutcome::Cancelled
    }
}

/// Group-level reorder controller.
#[derive(Debug, Default)]
pub struct GroupReorder {
    state: DragState,
}

impl GroupReorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        self.state.phase()
    }

    pub fn dragged_id(&self) -> Option<&str> {
        self.state.dragged_id.as_deref()
    }

    /// Starts a gesture. Gestures starting inside a bookmark element are
    /// rejected and leave the controller `Idle`.
    pub fn begin(&mut self, element: &DragElement) -> bool {
        let DragElement::Group { id } = element else {
            return false;
        };
        self.state = DragState {
            dragged_id: Some(id.clone()),
            source_group_id: None,
        };
        debug!("event=drag_start module=reorder level=group group_id={id}");
        true
    }

    /// Returns whether `element` is a valid drop target for the gesture.
    pub fn drag_over(&self, element: &DragElement) -> bool {
        self.state.dragged_id.is_some() && matches!(element, DragElement::Group { .. })
    }

    /// Completes the gesture by dropping onto another group.
    ///
    /// A drop onto a bookmark element counts as a drop onto its group.
    pub fn drop_on(
        &mut self,
        collection: &mut Collection,
        target: &DragElement,
    ) -> CollectionResult<DragOutcome> {
        let state = std::mem::take(&mut self.state);
        let Some(dragged_id) = state.dragged_id else {
            return Ok(DragOutcome::Ignored);
        };

        let target_group_id = match target {
            DragElement::Group { id } => id,
            DragElement::Bookmark { group_id, .. } => group_id,
        };
        let Some(target_index) = display_position(&collection.groups, target_group_id) else {
            debug!("event=drag_drop module=reorder level=group status=ignored group_id={dragged_id}");
            return Ok(DragOutcome::Ignored);
        };

        let moved = CollectionService::new(collection).move_group(&dragged_id, target_index)?;
        debug!("event=drag_drop module=reorder level=group status=ok group_id={dragged_id} moved={moved}");
        Ok(if moved {
            DragOutcome::Moved
        } else {
            DragOutcome::Unchanged
        })
    }

    /// Ends the gesture without a drop.
    pub fn cancel(&mut self) -> DragOutcome {
        self.state = DragState::default();
        DragOutcome::Cancelled
    }
}
