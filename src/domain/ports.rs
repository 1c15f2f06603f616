use uuid::Uuid;

use super::errors::GatewayError;
use super::order::Order;
use super::status::OrderStatus;

/// Optional narrowing of a list fetch.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Only orders placed by this customer.
    pub customer_id: Option<String>,
}

/// The only contract the core needs from networking.
///
/// Implemented by the HTTP adapter in production and by an in-memory fake in
/// tests; no core logic may assume a live network behind it.
pub trait OrderGateway: Send + Sync + 'static {
    /// Fetches one expanded order. `GatewayError::NotFound` if absent.
    fn fetch_order(&self, id: Uuid) -> Result<Order, GatewayError>;

    /// Fetches all orders, optionally narrowed by `filter`.
    fn fetch_orders(&self, filter: Option<&OrderFilter>) -> Result<Vec<Order>, GatewayError>;

    /// Asks the backend to move an order to `status`. `Ok(())` means the
    /// update was acknowledged; only then may local state advance.
    fn update_order_status(&self, id: Uuid, status: OrderStatus) -> Result<(), GatewayError>;

    /// Removes an order from the backend.
    fn delete_order(&self, id: Uuid) -> Result<(), GatewayError>;
}

/// Session-scoped key/value store for in-progress checkout state.
///
/// Values are opaque string blobs (JSON in practice). Writes are best-effort;
/// a lost blob only costs the user their in-progress cart.
pub trait BlobStore {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}
