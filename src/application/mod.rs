pub mod checkout;
pub mod order_service;
