//! Backend wire shapes and their normalization into the data model.
//!
//! The backend is a headless CMS, so its order shape is generic and loosely
//! typed: status and delivery arrive as plain strings, decimal costs as
//! strings, and optional address fields may be missing entirely. Everything
//! is validated here so the rest of the crate only ever sees well-formed
//! orders.

use std::str::FromStr;

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::GatewayError;
use crate::domain::order::{Delivery, LineItem, Order};
use crate::domain::status::OrderStatus;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemDto {
    pub id: Uuid,
    pub amount_quantity: f64,
    pub unit: String,
    pub ingredient_name: String,
    /// Decimal cost as a string, e.g. "29.90".
    pub line_cost: String,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: Uuid,
    pub order_number: i64,
    pub status: String,
    pub customer_id: String,
    pub customer_name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub line_items: Vec<LineItemDto>,
    #[serde(default)]
    pub delivery_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `PUT /api/Order/{id}`.
#[derive(Debug, Serialize)]
pub struct UpdateStatusBody {
    pub status: OrderStatus,
}

fn parse_status(raw: &str) -> Result<OrderStatus, GatewayError> {
    match raw {
        "pending" => Ok(OrderStatus::Pending),
        "processing" => Ok(OrderStatus::Processing),
        "completed" => Ok(OrderStatus::Completed),
        "cancelled" => Ok(OrderStatus::Cancelled),
        // The legacy NotStarted/Started/Finished model is dead data; orders
        // still carrying it are rejected rather than silently reinterpreted.
        other => Err(GatewayError::InvalidResponse(format!(
            "unknown order status '{other}'"
        ))),
    }
}

fn parse_delivery(raw: &str) -> Result<Delivery, GatewayError> {
    match raw {
        "express" => Ok(Delivery::Express),
        "standard" => Ok(Delivery::Standard),
        "" => Ok(Delivery::Unselected),
        other => Err(GatewayError::InvalidResponse(format!(
            "unknown delivery type '{other}'"
        ))),
    }
}

fn map_line_item(dto: LineItemDto) -> Result<LineItem, GatewayError> {
    let line_cost = BigDecimal::from_str(&dto.line_cost).map_err(|e| {
        GatewayError::InvalidResponse(format!("invalid line cost '{}': {e}", dto.line_cost))
    })?;
    if line_cost < BigDecimal::zero() {
        return Err(GatewayError::InvalidResponse(format!(
            "negative line cost '{}'",
            dto.line_cost
        )));
    }
    Ok(LineItem {
        id: dto.id,
        amount_quantity: dto.amount_quantity,
        unit: dto.unit,
        ingredient_name: dto.ingredient_name,
        line_cost,
        checked: dto.checked,
    })
}

/// Normalizes one backend order into the data model.
pub fn map_order(dto: OrderDto) -> Result<Order, GatewayError> {
    Ok(Order {
        id: dto.id,
        order_number: dto.order_number,
        status: parse_status(&dto.status)?,
        customer_id: dto.customer_id,
        customer_name: dto.customer_name,
        address: dto.address,
        postal_code: dto.postal_code,
        city: dto.city,
        line_items: dto
            .line_items
            .into_iter()
            .map(map_line_item)
            .collect::<Result<Vec<_>, _>>()?,
        delivery: parse_delivery(&dto.delivery_type)?,
        created_at: dto.created_at,
        updated_at: dto.updated_at,
    })
}
