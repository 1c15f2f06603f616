//! Order state and pricing engine for the storefront.
//!
//! The crate holds the rules behind the ordering UI: how an order moves
//! through its lifecycle (`domain::status`), how totals derive from line
//! items and the delivery choice (`domain::money`), the order and cart
//! aggregates (`domain::order`, `domain::cart`), and the gateway boundary to
//! the REST backend (`domain::ports`, implemented over HTTP and in memory in
//! `infrastructure`). `application` wires these together: backend-first
//! status transitions with a per-order in-flight guard, and the
//! session-persisted checkout flow.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::checkout::CheckoutSession;
pub use application::order_service::{OrderService, Transition};
pub use domain::cart::{Cart, CartItem, CreateOrderRequest};
pub use domain::errors::{CheckoutError, GatewayError};
pub use domain::order::{Delivery, LineItem, Order};
pub use domain::ports::{BlobStore, OrderFilter, OrderGateway};
pub use domain::status::OrderStatus;
pub use infrastructure::http_gateway::HttpOrderGateway;
pub use infrastructure::memory::{InMemoryOrderGateway, InMemorySessionStore};
