use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::money;
use super::status::{next_status, OrderStatus, StatusEvent};

/// One ingredient entry within an order.
///
/// Invariant: `line_cost >= 0`, enforced where orders enter the system
/// (the DTO mapping boundary).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: Uuid,
    pub amount_quantity: f64,
    pub unit: String,
    pub ingredient_name: String,
    pub line_cost: BigDecimal,
    pub checked: bool,
}

/// Delivery option chosen at checkout.
///
/// The price is a pure function of the variant and is never stored next to
/// it; [`Delivery::price`] is the only source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Delivery {
    Express,
    Standard,
    #[serde(rename = "")]
    #[default]
    Unselected,
}

impl Delivery {
    pub fn price(&self) -> BigDecimal {
        match self {
            Delivery::Express => BigDecimal::from(119),
            Delivery::Standard => BigDecimal::from(49),
            Delivery::Unselected => BigDecimal::zero(),
        }
    }
}

/// An order as held in memory by both the customer views and the store
/// dashboard.
///
/// The grand total is always derived from the line items and the delivery
/// selection; it is never stored as independent state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub order_number: i64,
    pub status: OrderStatus,
    pub customer_id: String,
    pub customer_name: String,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub line_items: Vec<LineItem>,
    pub delivery: Delivery,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Sum of all line costs.
    pub fn subtotal(&self) -> BigDecimal {
        money::subtotal(&self.line_items)
    }

    /// Subtotal plus delivery price, recomputed on every call.
    pub fn grand_total(&self) -> BigDecimal {
        money::grand_total(&self.subtotal(), &self.delivery.price())
    }

    /// True when every line item has been checked off.
    ///
    /// An order without line items satisfies the guard vacuously.
    pub fn all_items_checked(&self) -> bool {
        self.line_items.iter().all(|item| item.checked)
    }

    /// Whether an advance would currently be accepted by the status machine.
    pub fn can_advance(&self) -> bool {
        next_status(self.status, StatusEvent::Advance, self.all_items_checked()).is_some()
    }

    /// Whether a cancel would currently be accepted by the status machine.
    pub fn can_cancel(&self) -> bool {
        next_status(self.status, StatusEvent::Cancel, self.all_items_checked()).is_some()
    }

    /// Marks one line item picked or unpicked.
    ///
    /// Only legal while the order is being processed. Any other status makes
    /// this a refused no-op, even if the caller forgot to disable the
    /// control. Returns whether the write was applied.
    pub fn toggle_item_checked(&mut self, item_id: Uuid, checked: bool) -> bool {
        if self.status != OrderStatus::Processing {
            return false;
        }
        match self.line_items.iter_mut().find(|item| item.id == item_id) {
            Some(item) => {
                item.checked = checked;
                true
            }
            None => false,
        }
    }

    /// Applies an already-acknowledged status, including its side effects on
    /// the line items.
    ///
    /// Entering `Processing` resets every `checked` flag so the picker
    /// re-verifies staged items; entering `Completed` sets them all for
    /// display consistency.
    pub(crate) fn apply_status(&mut self, next: OrderStatus) {
        match next {
            OrderStatus::Processing => {
                for item in &mut self.line_items {
                    item.checked = false;
                }
            }
            OrderStatus::Completed => {
                for item in &mut self.line_items {
                    item.checked = true;
                }
            }
            OrderStatus::Pending | OrderStatus::Cancelled => {}
        }
        self.status = next;
        self.updated_at = Utc::now();
    }
}
