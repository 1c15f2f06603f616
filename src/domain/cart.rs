use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::CheckoutError;
use super::order::Delivery;

/// One product in the pre-order cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: Uuid,
    pub name: String,
    pub unit_price: BigDecimal,
    pub quantity: u32,
}

/// The pre-order cart, owned by the checkout flow's session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sets the quantity of one item. Quantity zero removes it.
    pub fn set_quantity(&mut self, item_id: Uuid, quantity: u32) {
        if quantity == 0 {
            self.remove_item(item_id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.id == item_id) {
            item.quantity = quantity;
        }
    }

    pub fn remove_item(&mut self, item_id: Uuid) {
        self.items.retain(|i| i.id != item_id);
    }

    /// Sum of `unit_price × quantity` over all items.
    pub fn total(&self) -> BigDecimal {
        self.items.iter().fold(BigDecimal::zero(), |acc, item| {
            acc + &item.unit_price * BigDecimal::from(item.quantity)
        })
    }
}

/// One line of an order-creation request, as sent to the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderItem {
    pub id: Uuid,
    pub name: String,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub unit_price: String,
    pub quantity: u32,
}

/// The order-creation request a checkout submission produces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub delivery_type: Delivery,
    pub items: Vec<CreateOrderItem>,
}

/// Converts a cart and delivery selection into an order-creation request.
///
/// Refused when the cart is empty or no delivery option was picked; the
/// checkout flow surfaces these as form validation, not as faults.
pub fn build_order_request(
    cart: &Cart,
    delivery: Delivery,
    customer_id: &str,
) -> Result<CreateOrderRequest, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    if delivery == Delivery::Unselected {
        return Err(CheckoutError::NoDeliverySelected);
    }
    Ok(CreateOrderRequest {
        customer_id: customer_id.to_string(),
        delivery_type: delivery,
        items: cart
            .items
            .iter()
            .map(|item| CreateOrderItem {
                id: item.id,
                name: item.name.clone(),
                unit_price: item.unit_price.to_string(),
                quantity: item.quantity,
            })
            .collect(),
    })
}
