use crate::gateways::{GatewayOrderRequest, PaymentGateway, RemoteOrder};
use anyhow::{bail, Result};
use std::sync::Mutex;

/// Scripted gateway. Records every request so tests can assert on the
/// amounts actually sent.
pub struct MockGateway {
    pub behavior: String,
    pub requests: Mutex<Vec<GatewayOrderRequest>>,
}

impl MockGateway {
    pub fn new(behavior: &str) -> Self {
        Self {
            behavior: behavior.to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("mock gateway lock").len()
    }
}

#[async_trait::async_trait]
impl PaymentGateway for MockGateway {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn create_order(&self, request: GatewayOrderRequest) -> Result<RemoteOrder> {
        self.requests
            .lock()
            .expect("mock gateway lock")
            .push(request.clone());

        match self.behavior.as_str() {
            "ALWAYS_UNAVAILABLE" => bail!("mock gateway unavailable"),
            _ => Ok(RemoteOrder {
                order_id: format!("order_mock_{}", uuid::Uuid::new_v4().simple()),
                amount_minor: request.amount_minor,
                currency: request.currency,
            }),
        }
    }
}
