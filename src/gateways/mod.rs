use anyhow::Result;
use serde::{Deserialize, Serialize};

pub mod mock;
pub mod razorpay;

#[derive(Debug, Clone)]
pub struct GatewayOrderRequest {
    pub amount_minor: i64,
    pub currency: String,
    pub receipt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteOrder {
    pub order_id: String,
    pub amount_minor: i64,
    pub currency: String,
}

#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    fn name(&self) -> &'static str;

    /// Creates a remote order the client-side checkout widget can charge
    /// against. Any transport or HTTP-level failure is an `Err`; no local
    /// state may be written when this fails.
    async fn create_order(&self, request: GatewayOrderRequest) -> Result<RemoteOrder>;
}
