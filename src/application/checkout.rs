use crate::domain::cart::{build_order_request, Cart, CreateOrderRequest};
use crate::domain::errors::CheckoutError;
use crate::domain::order::Delivery;
use crate::domain::ports::BlobStore;

/// Session key holding the serialized in-progress cart.
pub const CHECKOUT_PRODUCTS_KEY: &str = "checkoutProducts";
/// Session key holding the serialized delivery selection.
pub const DELIVERY_DATA_KEY: &str = "deliveryData";

/// The checkout flow's session state.
///
/// Cart and delivery selection are persisted to a session-scoped blob store
/// after every change so a page reload does not lose progress, and both keys
/// are cleared on successful confirmation. Corrupt blobs are treated as
/// absent: losing an in-progress cart is cheaper than failing checkout.
pub struct CheckoutSession<S> {
    store: S,
}

impl<S: BlobStore> CheckoutSession<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The persisted cart, or an empty one.
    pub fn cart(&self) -> Cart {
        self.read_json(CHECKOUT_PRODUCTS_KEY).unwrap_or_default()
    }

    /// The persisted delivery selection, or unselected.
    pub fn delivery(&self) -> Delivery {
        self.read_json(DELIVERY_DATA_KEY).unwrap_or_default()
    }

    pub fn save_cart(&self, cart: &Cart) {
        self.write_json(CHECKOUT_PRODUCTS_KEY, cart);
    }

    pub fn save_delivery(&self, delivery: Delivery) {
        self.write_json(DELIVERY_DATA_KEY, &delivery);
    }

    /// Changes one item's quantity (zero removes it) and persists the cart.
    pub fn set_item_quantity(&self, item_id: uuid::Uuid, quantity: u32) -> Cart {
        let mut cart = self.cart();
        cart.set_quantity(item_id, quantity);
        self.save_cart(&cart);
        cart
    }

    /// Removes one item and persists the cart.
    pub fn remove_item(&self, item_id: uuid::Uuid) -> Cart {
        let mut cart = self.cart();
        cart.remove_item(item_id);
        self.save_cart(&cart);
        cart
    }

    /// Turns the persisted cart and delivery selection into an
    /// order-creation request.
    ///
    /// The session is left untouched either way: a validation failure lets
    /// the user fix the form and resubmit, and a valid request still needs
    /// backend acknowledgment before [`CheckoutSession::confirm`] clears
    /// the state. A failed order creation therefore never loses the cart.
    pub fn submit(&self, customer_id: &str) -> Result<CreateOrderRequest, CheckoutError> {
        build_order_request(&self.cart(), self.delivery(), customer_id)
    }

    /// Clears the checkout state once the backend has confirmed the order.
    pub fn confirm(&self) {
        self.store.remove(CHECKOUT_PRODUCTS_KEY);
        self.store.remove(DELIVERY_DATA_KEY);
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("discarding corrupt session blob under {key}: {e}");
                None
            }
        }
    }

    fn write_json<T: serde::Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.store.put(key, raw),
            Err(e) => log::warn!("could not persist session blob under {key}: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use uuid::Uuid;

    use super::*;
    use crate::domain::cart::CartItem;
    use crate::infrastructure::memory::InMemorySessionStore;

    fn cart_item(price: &str, quantity: u32) -> CartItem {
        CartItem {
            id: Uuid::new_v4(),
            name: "Havregryn".to_string(),
            unit_price: BigDecimal::from_str(price).expect("valid decimal"),
            quantity,
        }
    }

    fn session() -> CheckoutSession<InMemorySessionStore> {
        CheckoutSession::new(InMemorySessionStore::new())
    }

    #[test]
    fn empty_session_yields_empty_cart_and_no_delivery() {
        let session = session();
        assert!(session.cart().is_empty());
        assert_eq!(session.delivery(), Delivery::Unselected);
    }

    #[test]
    fn cart_survives_a_reload() {
        let session = session();
        let cart = Cart {
            items: vec![cart_item("19.90", 2)],
        };
        session.save_cart(&cart);
        session.save_delivery(Delivery::Standard);

        // A "reload" is just a fresh read from the same store.
        assert_eq!(session.cart(), cart);
        assert_eq!(session.delivery(), Delivery::Standard);
    }

    #[test]
    fn quantity_change_and_removal_are_persisted() {
        let session = session();
        let cart = Cart {
            items: vec![cart_item("10.00", 1), cart_item("5.00", 1)],
        };
        session.save_cart(&cart);
        let first = cart.items[0].id;
        let second = cart.items[1].id;

        session.set_item_quantity(first, 3);
        session.remove_item(second);

        let reloaded = session.cart();
        assert_eq!(reloaded.items.len(), 1);
        assert_eq!(reloaded.items[0].quantity, 3);
    }

    #[test]
    fn submit_leaves_session_intact_until_confirmation() {
        let session = session();
        session.save_cart(&Cart {
            items: vec![cart_item("10.00", 1)],
        });
        session.save_delivery(Delivery::Express);

        let request = session.submit("cust-1").expect("valid checkout");

        // Nothing is cleared yet; a failed backend POST can be retried
        // with the cart still in place.
        assert_eq!(request.items.len(), 1);
        assert_eq!(session.cart().items.len(), 1);
        assert_eq!(session.delivery(), Delivery::Express);
    }

    #[test]
    fn confirm_clears_both_session_keys() {
        let session = session();
        session.save_cart(&Cart {
            items: vec![cart_item("10.00", 1)],
        });
        session.save_delivery(Delivery::Express);
        session.submit("cust-1").expect("valid checkout");

        session.confirm();

        assert!(session.cart().is_empty());
        assert_eq!(session.delivery(), Delivery::Unselected);
    }

    #[test]
    fn failed_submit_keeps_the_session() {
        let session = session();
        session.save_cart(&Cart {
            items: vec![cart_item("10.00", 1)],
        });
        // No delivery selected.

        let err = session.submit("cust-1").expect_err("must be refused");

        assert_eq!(err, CheckoutError::NoDeliverySelected);
        assert_eq!(session.cart().items.len(), 1);
    }

    #[test]
    fn corrupt_blob_is_treated_as_absent() {
        let store = InMemorySessionStore::new();
        store.put(CHECKOUT_PRODUCTS_KEY, "{not json".to_string());
        let session = CheckoutSession::new(store);

        assert!(session.cart().is_empty());
    }
}
