//! Order-field primitives shared by bookmarks and groups.
//!
//! # Responsibility
//! - Derive display sequences from `order` values.
//! - Reassign dense `0..n-1` order values after gaps or duplicates appear.
//!
//! # Invariants
//! - Sorting is stable: items with equal `order` keep their container
//!   position relative to each other.
//! - Helpers never reorder the underlying slice; only `order` values change.

/// Item that carries an id and a sibling-relative display order.
pub trait OrderedItem {
    /// Stable item id.
    fn item_id(&self) -> &str;
    /// Current display order among siblings.
    fn order(&self) -> i64;
    /// Overwrites the display order.
    fn set_order(&mut self, order: i64);
}

/// Returns slice indices in display sequence (`order ASC`, ties by position).
pub fn display_sequence<T: OrderedItem>(items: &[T]) -> Vec<usize> {
    let mut indices = (0..items.len()).collect::<Vec<_>>();
    indices.sort_by_key(|index| items[*index].order());
    indices
}

/// Returns items as references in display sequence.
pub fn sorted_refs<T: OrderedItem>(items: &[T]) -> Vec<&T> {
    display_sequence(items)
        .into_iter()
        .map(|index| &items[index])
        .collect()
}

/// Returns the zero-based display position of `id`, if present.
pub fn display_position<T: OrderedItem>(items: &[T], id: &str) -> Option<usize> {
    display_sequence(items)
        .into_iter()
        .position(|index| items[index].item_id() == id)
}

/// Returns the order value for an item appended after all siblings.
///
/// `max(order) + 1`, or `0` for an empty container. When `max(order)` is
/// already `i64::MAX` the siblings are normalized first and `len` is
/// returned, so the appended item still sorts last.
pub fn next_order<T: OrderedItem>(items: &mut [T]) -> i64 {
    let Some(max) = items.iter().map(OrderedItem::order).max() else {
        return 0;
    };
    match max.checked_add(1) {
        Some(next) => next,
        None => {
            normalize_orders(items);
            items.len() as i64
        }
    }
}

/// Reassigns `0..n-1` following the current display sequence.
///
/// Idempotent: a dense, duplicate-free sequence is left unchanged.
pub fn normalize_orders<T: OrderedItem>(items: &mut [T]) {
    let sequence = display_sequence(items);
    assign_ranks(items, &sequence);
}

/// Moves `id` to `target_index` in display sequence.
///
/// Indices past the end clamp to the last position.
///
/// Returns `None` when `id` is absent, `Some(false)` when the clamped target
/// equals the current position (no values are touched), and `Some(true)`
/// after a move. A successful move always leaves orders dense.
pub fn move_to_index<T: OrderedItem>(items: &mut [T], id: &str, target_index: usize) -> Option<bool> {
    let mut sequence = display_sequence(items);
    let current = sequence
        .iter()
        .position(|index| items[*index].item_id() == id)?;
    let target = target_index.min(sequence.len() - 1);
    if target == current {
        return Some(false);
    }

    let moved = sequence.remove(current);
    sequence.insert(target, moved);
    assign_ranks(items, &sequence);
    normalize_orders(items);
    Some(true)
}

/// Returns whether orders are exactly `0..n-1` (in any container position).
pub fn is_dense<T: OrderedItem>(items: &[T]) -> bool {
    let mut orders = items.iter().map(OrderedItem::order).collect::<Vec<_>>();
    orders.sort_unstable();
    orders
        .iter()
        .enumerate()
        .all(|(index, order)| *order == index as i64)
}

fn assign_ranks<T: OrderedItem>(items: &mut [T], sequence: &[usize]) {
    for (rank, index) in sequence.iter().enumerate() {
        items[*index].set_order(rank as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::{
        display_position, is_dense, move_to_index, next_order, normalize_orders, OrderedItem,
    };

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Item {
        id: &'static str,
        order: i64,
    }

    impl OrderedItem for Item {
        fn item_id(&self) -> &str {
            self.id
        }

        fn order(&self) -> i64 {
            self.order
        }

        fn set_order(&mut self, order: i64) {
            self.order = order;
        }
    }

    fn items(spec: &[(&'static str, i64)]) -> Vec<Item> {
        spec.iter().map(|(id, order)| Item { id, order: *order }).collect()
    }

    fn ids_in_display_order(items: &[Item]) -> Vec<&'static str> {
        let mut sorted = items.to_vec();
        sorted.sort_by_key(|item| item.order);
        sorted.into_iter().map(|item| item.id).collect()
    }

    #[test]
    fn normalize_closes_gaps_and_breaks_ties_by_position() {
        let mut values = items(&[("a", 7), ("b", 2), ("c", 7), ("d", -1)]);
        normalize_orders(&mut values);

        assert_eq!(ids_in_display_order(&values), vec!["d", "b", "a", "c"]);
        assert!(is_dense(&values));
        // container position is untouched
        assert_eq!(values[0].id, "a");
    }

    #[test]
    fn normalize_is_idempotent() {
        let mut values = items(&[("a", 4), ("b", 9), ("c", 4)]);
        normalize_orders(&mut values);
        let once = values.clone();
        normalize_orders(&mut values);
        assert_eq!(values, once);
    }

    #[test]
    fn next_order_uses_max_plus_one() {
        assert_eq!(next_order::<Item>(&mut []), 0);
        let mut values = items(&[("a", 0), ("b", 5)]);
        assert_eq!(next_order(&mut values), 6);
        // siblings are untouched when no overflow is possible
        assert_eq!(values[1].order, 5);
    }

    #[test]
    fn next_order_normalizes_when_max_is_saturated() {
        let mut values = items(&[("a", i64::MAX), ("b", -3), ("c", 4)]);

        assert_eq!(next_order(&mut values), 3);
        assert_eq!(ids_in_display_order(&values), vec!["b", "c", "a"]);
        assert!(is_dense(&values));
    }

    #[test]
    fn move_to_index_clamps_and_reports_noop() {
        let mut values = items(&[("a", 0), ("b", 1), ("c", 2)]);

        assert_eq!(move_to_index(&mut values, "c", 10), Some(false));
        assert_eq!(move_to_index(&mut values, "missing", 0), None);

        assert_eq!(move_to_index(&mut values, "a", 99), Some(true));
        assert_eq!(ids_in_display_order(&values), vec!["b", "c", "a"]);
        assert_eq!(display_position(&values, "a"), Some(2));
        assert!(is_dense(&values));
    }
}
