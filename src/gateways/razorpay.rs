use crate::gateways::{GatewayOrderRequest, PaymentGateway, RemoteOrder};
use anyhow::{anyhow, bail, Result};
use serde_json::json;

pub struct RazorpayGateway {
    pub base_url: String,
    pub key_id: String,
    pub key_secret: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

#[async_trait::async_trait]
impl PaymentGateway for RazorpayGateway {
    fn name(&self) -> &'static str {
        "razorpay"
    }

    async fn create_order(&self, request: GatewayOrderRequest) -> Result<RemoteOrder> {
        let order_url = format!("{}/v1/orders", self.base_url);
        let body = json!({
            "amount": request.amount_minor,
            "currency": request.currency,
            "receipt": request.receipt,
            "payment_capture": 1
        });

        let resp = self
            .client
            .post(order_url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!(
                "order creation returned HTTP_{}: {}",
                status.as_u16(),
                body.chars().take(200).collect::<String>()
            );
        }

        let v: serde_json::Value = resp.json().await?;
        let order_id = v
            .get("id")
            .and_then(|id| id.as_str())
            .ok_or_else(|| anyhow!("order creation response missing id"))?
            .to_string();
        let amount_minor = v
            .get("amount")
            .and_then(|a| a.as_i64())
            .unwrap_or(request.amount_minor);
        let currency = v
            .get("currency")
            .and_then(|c| c.as_str())
            .unwrap_or(&request.currency)
            .to_string();

        Ok(RemoteOrder {
            order_id,
            amount_minor,
            currency,
        })
    }
}
