//! In-memory fakes for the gateway and the session blob store.
//!
//! These back the test suite but are ordinary adapters: the core is required
//! to work against them without knowing it is not talking to a network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use uuid::Uuid;

use crate::domain::errors::GatewayError;
use crate::domain::order::Order;
use crate::domain::ports::{BlobStore, OrderFilter, OrderGateway};
use crate::domain::status::OrderStatus;

/// Gateway fake over a mutex-guarded map.
///
/// `fail_status_updates` makes every `update_order_status` answer with a
/// 500, for exercising the backend-first transition contract.
#[derive(Default)]
pub struct InMemoryOrderGateway {
    orders: Mutex<HashMap<Uuid, Order>>,
    fail_status_updates: AtomicBool,
}

impl InMemoryOrderGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, order: Order) {
        self.lock_orders().insert(order.id, order);
    }

    pub fn fail_status_updates(&self, fail: bool) {
        self.fail_status_updates.store(fail, Ordering::SeqCst);
    }

    pub fn order_count(&self) -> usize {
        self.lock_orders().len()
    }

    fn lock_orders(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, Order>> {
        self.orders
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl OrderGateway for InMemoryOrderGateway {
    fn fetch_order(&self, id: Uuid) -> Result<Order, GatewayError> {
        self.lock_orders()
            .get(&id)
            .cloned()
            .ok_or(GatewayError::NotFound)
    }

    fn fetch_orders(&self, filter: Option<&OrderFilter>) -> Result<Vec<Order>, GatewayError> {
        let orders = self.lock_orders();
        let mut result: Vec<Order> = match filter.and_then(|f| f.customer_id.as_deref()) {
            Some(customer_id) => orders
                .values()
                .filter(|o| o.customer_id == customer_id)
                .cloned()
                .collect(),
            None => orders.values().cloned().collect(),
        };
        // Map iteration order is arbitrary; present oldest first like the
        // backend does.
        result.sort_by_key(|o| o.created_at);
        Ok(result)
    }

    fn update_order_status(&self, id: Uuid, status: OrderStatus) -> Result<(), GatewayError> {
        if self.fail_status_updates.load(Ordering::SeqCst) {
            return Err(GatewayError::HttpStatus { status: 500 });
        }
        let mut orders = self.lock_orders();
        let order = orders.get_mut(&id).ok_or(GatewayError::NotFound)?;
        order.status = status;
        Ok(())
    }

    fn delete_order(&self, id: Uuid) -> Result<(), GatewayError> {
        self.lock_orders()
            .remove(&id)
            .map(|_| ())
            .ok_or(GatewayError::NotFound)
    }
}

/// Session-scoped blob store fake.
#[derive(Default)]
pub struct InMemorySessionStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_blobs(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.blobs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl BlobStore for InMemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock_blobs().get(key).cloned()
    }

    fn put(&self, key: &str, value: String) {
        self.lock_blobs().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.lock_blobs().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::order::Delivery;

    fn order(customer: &str) -> Order {
        Order {
            id: Uuid::new_v4(),
            order_number: 1,
            status: OrderStatus::Pending,
            customer_id: customer.to_string(),
            customer_name: "Test Person".to_string(),
            address: None,
            postal_code: None,
            city: None,
            line_items: vec![],
            delivery: Delivery::Standard,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn fetch_order_returns_not_found_for_unknown_id() {
        let gateway = InMemoryOrderGateway::new();
        let err = gateway.fetch_order(Uuid::new_v4()).expect_err("unknown");
        assert!(matches!(err, GatewayError::NotFound));
    }

    #[test]
    fn fetch_orders_filters_by_customer() {
        let gateway = InMemoryOrderGateway::new();
        gateway.insert(order("a"));
        gateway.insert(order("a"));
        gateway.insert(order("b"));

        let filter = OrderFilter {
            customer_id: Some("a".to_string()),
        };
        let mine = gateway.fetch_orders(Some(&filter)).expect("list");
        assert_eq!(mine.len(), 2);
        assert_eq!(gateway.fetch_orders(None).expect("list").len(), 3);
    }

    #[test]
    fn update_is_visible_on_the_next_fetch() {
        let gateway = InMemoryOrderGateway::new();
        let o = order("a");
        gateway.insert(o.clone());

        gateway
            .update_order_status(o.id, OrderStatus::Processing)
            .expect("update");

        let fetched = gateway.fetch_order(o.id).expect("fetch");
        assert_eq!(fetched.status, OrderStatus::Processing);
    }

    #[test]
    fn delete_removes_the_order() {
        let gateway = InMemoryOrderGateway::new();
        let o = order("a");
        gateway.insert(o.clone());

        gateway.delete_order(o.id).expect("delete");
        assert_eq!(gateway.order_count(), 0);
        assert!(matches!(
            gateway.delete_order(o.id),
            Err(GatewayError::NotFound)
        ));
    }

    #[test]
    fn blob_store_roundtrip_and_removal() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.get("k"), None);
        store.put("k", "v".to_string());
        assert_eq!(store.get("k"), Some("v".to_string()));
        store.remove("k");
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn injected_failure_leaves_stored_order_untouched() {
        let gateway = InMemoryOrderGateway::new();
        let o = order("a");
        gateway.insert(o.clone());
        gateway.fail_status_updates(true);

        let err = gateway
            .update_order_status(o.id, OrderStatus::Processing)
            .expect_err("must fail");
        assert!(matches!(err, GatewayError::HttpStatus { status: 500 }));
        assert_eq!(
            gateway.fetch_order(o.id).expect("fetch").status,
            OrderStatus::Pending
        );
    }
}
