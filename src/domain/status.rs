use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
///
/// ```text
/// Pending ──► Processing ──► Completed
///    │            │
///    └────────────┴──► Cancelled
/// ```
///
/// `Completed` and `Cancelled` are terminal: no outgoing transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed by the customer, not yet picked up by the store.
    #[default]
    Pending,

    /// Being picked; line items are checked off one by one.
    Processing,

    /// All items picked and handed over (terminal).
    Completed,

    /// Cancelled by the customer or the store (terminal).
    Cancelled,
}

impl OrderStatus {
    /// Fixed rank used when sorting order lists by status.
    pub fn rank(&self) -> u8 {
        match self {
            OrderStatus::Pending => 1,
            OrderStatus::Processing => 2,
            OrderStatus::Completed => 3,
            OrderStatus::Cancelled => 4,
        }
    }

    /// Returns true if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Returns true if the order still needs store-side work.
    pub fn is_active(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Processing)
    }

    /// Wire representation, matching the backend's lowercase strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Events that drive status transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvent {
    /// Move the order one step forward in its lifecycle.
    Advance,
    /// Cancel the order.
    Cancel,
}

/// Computes the next status for `(current, event)`, or `None` when the
/// transition is refused.
///
/// A refused transition is a silent no-op by design, never an error: the
/// guard on `Processing → Completed` (every line item checked) failing, an
/// advance from a terminal status, or a cancel from a terminal status all
/// return `None` and the caller keeps its current state. Surfacing the
/// refusal as a disabled control is the caller's job.
pub fn next_status(
    current: OrderStatus,
    event: StatusEvent,
    all_items_checked: bool,
) -> Option<OrderStatus> {
    match (current, event) {
        (OrderStatus::Pending, StatusEvent::Advance) => Some(OrderStatus::Processing),
        (OrderStatus::Processing, StatusEvent::Advance) if all_items_checked => {
            Some(OrderStatus::Completed)
        }
        (OrderStatus::Processing, StatusEvent::Advance) => None,
        (OrderStatus::Pending | OrderStatus::Processing, StatusEvent::Cancel) => {
            Some(OrderStatus::Cancelled)
        }
        (OrderStatus::Completed | OrderStatus::Cancelled, _) => None,
    }
}
