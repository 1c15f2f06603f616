use std::collections::HashSet;
use std::sync::Mutex;

use uuid::Uuid;

use crate::domain::errors::GatewayError;
use crate::domain::order::Order;
use crate::domain::ports::{OrderFilter, OrderGateway};
use crate::domain::status::{next_status, StatusEvent, OrderStatus};

/// Outcome of an attempted status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The backend acknowledged the update and local state now carries the
    /// new status.
    Applied(OrderStatus),
    /// The transition was refused before any backend call: guard not
    /// satisfied, terminal status, or a request for this order still in
    /// flight. Local state is unchanged and this is not an error.
    Refused,
}

/// Orchestrates order lifecycle operations against a gateway.
///
/// Transitions are backend-first: the candidate status is PUT to the backend
/// and applied locally only on acknowledgment, so a rejected update never
/// diverges local state. A per-order in-flight set rejects re-entrant
/// advance/cancel (double-click) until the prior request settles.
pub struct OrderService<G> {
    gateway: G,
    in_flight: Mutex<HashSet<Uuid>>,
}

impl<G: OrderGateway> OrderService<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Fetches one expanded order.
    pub fn load_order(&self, id: Uuid) -> Result<Order, GatewayError> {
        self.gateway.fetch_order(id)
    }

    /// Fetches the order list, optionally narrowed to one customer.
    pub fn list_orders(&self, filter: Option<&OrderFilter>) -> Result<Vec<Order>, GatewayError> {
        self.gateway.fetch_orders(filter)
    }

    /// Moves the order one step forward in its lifecycle.
    pub fn advance(&self, order: &mut Order) -> Result<Transition, GatewayError> {
        self.transition(order, StatusEvent::Advance)
    }

    /// Cancels the order.
    pub fn cancel(&self, order: &mut Order) -> Result<Transition, GatewayError> {
        self.transition(order, StatusEvent::Cancel)
    }

    /// Removes the order from the backend. The caller drops it from its
    /// local collection on success.
    pub fn delete(&self, order: &Order) -> Result<(), GatewayError> {
        self.gateway.delete_order(order.id).inspect_err(|e| {
            log::warn!("delete of order {} failed: {e}", order.id);
        })
    }

    fn transition(
        &self,
        order: &mut Order,
        event: StatusEvent,
    ) -> Result<Transition, GatewayError> {
        let Some(next) = next_status(order.status, event, order.all_items_checked()) else {
            return Ok(Transition::Refused);
        };

        {
            let mut in_flight = self.lock_in_flight();
            if !in_flight.insert(order.id) {
                log::warn!(
                    "status update for order {} already in flight, ignoring",
                    order.id
                );
                return Ok(Transition::Refused);
            }
        }

        let result = self.gateway.update_order_status(order.id, next);
        self.lock_in_flight().remove(&order.id);

        match result {
            Ok(()) => {
                order.apply_status(next);
                log::info!("order {} moved to {next}", order.id);
                Ok(Transition::Applied(next))
            }
            Err(e) => {
                log::warn!(
                    "status update for order {} to {next} failed, keeping {}: {e}",
                    order.id,
                    order.status
                );
                Err(e)
            }
        }
    }

    fn lock_in_flight(&self) -> std::sync::MutexGuard<'_, HashSet<Uuid>> {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
