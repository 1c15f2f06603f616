//! Stateless sort and filter operations over order collections.
//!
//! These are derived view operations, not part of the aggregate: callers
//! hold the fetched list and re-derive a presentation ordering from it, so
//! clearing the sort always restores the backend's original order.

use super::order::Order;

/// The dimension an order list can be sorted by. One at a time: activating
/// one dimension clears the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Fixed status rank: pending < processing < completed < cancelled.
    Status,
    /// Chronological by creation time.
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// An active sort. `None` means unsorted (original backend order).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Advances the tri-state sort toggle for `key`:
/// unsorted → ascending → descending → unsorted. Toggling a different key
/// replaces the current sort with that key ascending.
pub fn toggle_sort(current: Option<SortOrder>, key: SortKey) -> Option<SortOrder> {
    match current {
        Some(sort) if sort.key == key => match sort.direction {
            SortDirection::Ascending => Some(SortOrder {
                key,
                direction: SortDirection::Descending,
            }),
            SortDirection::Descending => None,
        },
        _ => Some(SortOrder {
            key,
            direction: SortDirection::Ascending,
        }),
    }
}

/// Returns a copy of `orders` arranged by `sort`; `None` preserves the
/// original order. The sort is stable, so equal keys keep their relative
/// backend order in both directions.
pub fn sorted(orders: &[Order], sort: Option<SortOrder>) -> Vec<Order> {
    let mut result = orders.to_vec();
    let Some(sort) = sort else {
        return result;
    };
    match (sort.key, sort.direction) {
        (SortKey::Status, SortDirection::Ascending) => {
            result.sort_by_key(|o| o.status.rank());
        }
        (SortKey::Status, SortDirection::Descending) => {
            result.sort_by_key(|o| std::cmp::Reverse(o.status.rank()));
        }
        (SortKey::Date, SortDirection::Ascending) => {
            result.sort_by_key(|o| o.created_at);
        }
        (SortKey::Date, SortDirection::Descending) => {
            result.sort_by_key(|o| std::cmp::Reverse(o.created_at));
        }
    }
    result
}

/// Splits orders into (active, settled): pending/processing orders first,
/// completed/cancelled ones in the second bucket.
pub fn partition_by_activity(orders: &[Order]) -> (Vec<Order>, Vec<Order>) {
    orders
        .iter()
        .cloned()
        .partition(|order| order.status.is_active())
}

/// All of one customer's orders, regardless of status.
pub fn orders_for_customer(orders: &[Order], customer_id: &str) -> Vec<Order> {
    orders
        .iter()
        .filter(|order| order.customer_id == customer_id)
        .cloned()
        .collect()
}
