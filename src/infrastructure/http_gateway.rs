use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use uuid::Uuid;

use crate::domain::errors::GatewayError;
use crate::domain::order::Order;
use crate::domain::ports::{OrderFilter, OrderGateway};
use crate::domain::status::OrderStatus;

use super::dto::{map_order, OrderDto, UpdateStatusBody};

// ── Error conversions (transport concern only) ───────────────────────────────

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        GatewayError::Network(e.to_string())
    }
}

// ── Gateway ───────────────────────────────────────────────────────────────────

/// REST adapter for the order backend.
///
/// All requests carry the session cookie (the client keeps a cookie store);
/// nothing is retried automatically — a failed request is reported once and
/// the user re-triggers the action.
pub struct HttpOrderGateway {
    client: Client,
    base_url: String,
}

impl HttpOrderGateway {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| GatewayError::Configuration(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Builds a gateway from `ORDER_API_BASE_URL` (via `.env` or the
    /// environment).
    pub fn from_env() -> Result<Self, GatewayError> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var("ORDER_API_BASE_URL").map_err(|_| {
            GatewayError::Configuration("ORDER_API_BASE_URL must be set".to_string())
        })?;
        Self::new(base_url)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Maps a non-2xx response to the error taxonomy. 404 is the only status
    /// with distinct handling (blocking not-found view instead of a notice).
    fn check_status(response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound);
        }
        if !status.is_success() {
            log::warn!("backend answered {status}");
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

impl OrderGateway for HttpOrderGateway {
    fn fetch_order(&self, id: Uuid) -> Result<Order, GatewayError> {
        let response = self
            .client
            .get(self.url(&format!("/api/expand/Order/{id}")))
            .send()?;
        let response = Self::check_status(response)?;
        let dto: OrderDto = response
            .json()
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        map_order(dto)
    }

    fn fetch_orders(&self, filter: Option<&OrderFilter>) -> Result<Vec<Order>, GatewayError> {
        let response = self.client.get(self.url("/api/Order")).send()?;
        let response = Self::check_status(response)?;
        let dtos: Vec<OrderDto> = response
            .json()
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        let orders = dtos
            .into_iter()
            .map(map_order)
            .collect::<Result<Vec<_>, _>>()?;

        // The list endpoint takes no query parameters, so narrowing happens
        // here after the fetch.
        Ok(match filter.and_then(|f| f.customer_id.as_deref()) {
            Some(customer_id) => orders
                .into_iter()
                .filter(|o| o.customer_id == customer_id)
                .collect(),
            None => orders,
        })
    }

    fn update_order_status(&self, id: Uuid, status: OrderStatus) -> Result<(), GatewayError> {
        let response = self
            .client
            .put(self.url(&format!("/api/Order/{id}")))
            .json(&UpdateStatusBody { status })
            .send()?;
        Self::check_status(response)?;
        Ok(())
    }

    fn delete_order(&self, id: Uuid) -> Result<(), GatewayError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/Order/{id}")))
            .send()?;
        Self::check_status(response)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let gateway = HttpOrderGateway::new("http://localhost:8080/").expect("client");
        assert_eq!(
            gateway.url("/api/Order"),
            "http://localhost:8080/api/Order"
        );
    }

    fn free_port() -> u16 {
        // Bind to port 0 to let the OS assign a free port, then release it.
        // There is a small TOCTOU window, but it is acceptable for test usage.
        std::net::TcpListener::bind("127.0.0.1:0")
            .expect("bind failed")
            .local_addr()
            .expect("addr failed")
            .port()
    }

    #[test]
    fn reqwest_errors_become_network_errors() {
        // The listener is dropped before the request, so the connection is
        // refused at transport level.
        let port = free_port();
        let gateway =
            HttpOrderGateway::new(format!("http://127.0.0.1:{port}")).expect("client");
        let err = gateway.fetch_orders(None).expect_err("must fail");
        assert!(matches!(err, GatewayError::Network(_)));
    }
}
