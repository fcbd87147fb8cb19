use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Gateway amounts are expressed in paise; listing prices in rupees.
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Success,
    Failed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Success => "SUCCESS",
            OrderStatus::Failed => "FAILED",
        }
    }

    pub fn parse(s: &str) -> OrderStatus {
        match s {
            "PENDING" => OrderStatus::Pending,
            "SUCCESS" => OrderStatus::Success,
            _ => OrderStatus::Failed,
        }
    }
}

/// Local record of a purchase attempt. `status` moves PENDING -> SUCCESS or
/// PENDING -> FAILED exactly once, via a conditional update; no other
/// transition exists.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub listing_id: Uuid,
    pub amount_minor: i64,
    pub status: OrderStatus,
    pub gateway_order_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub buyer_id: Uuid,
    pub listing_id: Uuid,
    pub amount_minor: i64,
    pub gateway_order_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub listing_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    /// Gateway order id, passed to the client-side checkout widget.
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
    pub db_order_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
    #[serde(rename = "dbOrderId")]
    pub db_order_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentResponse {
    pub verified: bool,
    pub order_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}
