use thiserror::Error;

/// Errors the gateway boundary can surface to the core.
///
/// Guard failures are deliberately absent: a refused transition is a silent
/// no-op, not an error (see `domain::status::next_status`).
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The requested order does not exist on the backend.
    #[error("Order not found")]
    NotFound,

    /// The request never completed (DNS, connection, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("Unexpected HTTP status: {status}")]
    HttpStatus { status: u16 },

    /// The backend answered 2xx but the payload could not be mapped into the
    /// data model (unknown status string, negative line cost, bad JSON).
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The gateway could not be constructed (missing base URL, client build).
    #[error("Gateway configuration error: {0}")]
    Configuration(String),
}

impl GatewayError {
    /// True for errors that should block the view ("could not load") rather
    /// than show a transient, dismissible notice.
    pub fn is_blocking(&self) -> bool {
        matches!(self, GatewayError::NotFound)
    }

    /// User-facing copy for this failure.
    ///
    /// Network and HTTP-status failures get the same treatment; they are only
    /// distinguished for logging.
    pub fn user_notice(&self) -> &'static str {
        match self {
            GatewayError::NotFound => "The order could not be loaded.",
            GatewayError::Network(_)
            | GatewayError::HttpStatus { .. }
            | GatewayError::InvalidResponse(_)
            | GatewayError::Configuration(_) => {
                "Something went wrong. Please try again."
            }
        }
    }
}

/// Errors raised when a checkout submission cannot be turned into an order
/// request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("No delivery option selected")]
    NoDeliverySelected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_the_only_blocking_error() {
        assert!(GatewayError::NotFound.is_blocking());
        assert!(!GatewayError::Network("refused".to_string()).is_blocking());
        assert!(!GatewayError::HttpStatus { status: 500 }.is_blocking());
        assert!(!GatewayError::InvalidResponse("bad".to_string()).is_blocking());
    }

    #[test]
    fn transient_errors_share_the_retry_notice() {
        assert_eq!(
            GatewayError::Network("refused".to_string()).user_notice(),
            GatewayError::HttpStatus { status: 502 }.user_notice()
        );
    }

    #[test]
    fn display_messages() {
        assert_eq!(GatewayError::NotFound.to_string(), "Order not found");
        assert_eq!(
            GatewayError::HttpStatus { status: 503 }.to_string(),
            "Unexpected HTTP status: 503"
        );
        assert_eq!(CheckoutError::EmptyCart.to_string(), "Cart is empty");
    }
}
