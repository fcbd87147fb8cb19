use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// The only status a payment row is ever written with in this flow.
pub const PAYMENT_STATUS_PAID: &str = "PAID";

/// Durable proof of a verified transaction, one-to-one with a SUCCESS order.
/// Created once, never mutated. The signature is stored opaquely for audit
/// and never re-derived from storage.
#[derive(Debug, Clone, Serialize)]
pub struct Payment {
    pub id: Uuid,
    pub order_id: Uuid,
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub gateway_signature: String,
    pub amount_minor: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub order_id: Uuid,
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub gateway_signature: String,
    pub amount_minor: i64,
}
