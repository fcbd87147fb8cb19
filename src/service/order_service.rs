use crate::domain::order::{
    CreateOrderRequest, CreateOrderResponse, NewOrder, Order, MINOR_UNITS_PER_MAJOR,
};
use crate::domain::ports::{ListingStore, OrderStore};
use crate::error::CheckoutError;
use crate::gateways::{GatewayOrderRequest, PaymentGateway};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct OrderService {
    pub listings: Arc<dyn ListingStore>,
    pub orders: Arc<dyn OrderStore>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub currency: String,
    pub min_price_major: i64,
}

impl OrderService {
    pub async fn create_order(
        &self,
        buyer_id: Uuid,
        req: CreateOrderRequest,
    ) -> Result<CreateOrderResponse, CheckoutError> {
        let listing = self
            .listings
            .get(req.listing_id)
            .await?
            .ok_or(CheckoutError::NotFound)?;

        if listing.price_major < self.min_price_major {
            return Err(CheckoutError::InvalidAmount);
        }

        if self.orders.has_success(buyer_id, listing.id).await? {
            return Err(CheckoutError::AlreadyOwned);
        }

        // Integer multiplication only; the gateway bills in minor units.
        let amount_minor = listing.price_major * MINOR_UNITS_PER_MAJOR;

        let remote = self
            .gateway
            .create_order(GatewayOrderRequest {
                amount_minor,
                currency: self.currency.clone(),
                receipt: format!("receipt_{}", chrono::Utc::now().timestamp_millis()),
            })
            .await
            .map_err(|e| {
                tracing::warn!(listing_id = %listing.id, error = %e, "gateway order creation failed");
                CheckoutError::GatewayUnavailable(e.to_string())
            })?;

        let order = self
            .orders
            .insert_pending(NewOrder {
                buyer_id,
                listing_id: listing.id,
                amount_minor,
                gateway_order_id: remote.order_id.clone(),
            })
            .await
            .map_err(|e| {
                // Gateway order exists with no local row; there is no
                // compensating transaction, so leave a trail for reconciliation.
                tracing::error!(
                    gateway_order_id = %remote.order_id,
                    buyer_id = %buyer_id,
                    listing_id = %listing.id,
                    error = %e,
                    "remote order created but local order insert failed"
                );
                CheckoutError::Internal(e)
            })?;

        tracing::info!(
            order_id = %order.id,
            gateway_order_id = %remote.order_id,
            amount_minor,
            "order created"
        );

        Ok(CreateOrderResponse {
            order_id: remote.order_id,
            amount: remote.amount_minor,
            currency: remote.currency,
            db_order_id: order.id,
        })
    }

    /// Status lookup for the buyer's own orders, used by the client after an
    /// ALREADY_FINALIZED response. Other buyers' orders are indistinguishable
    /// from missing ones.
    pub async fn get_order(&self, buyer_id: Uuid, order_id: Uuid) -> Result<Order, CheckoutError> {
        let order = self
            .orders
            .get(order_id)
            .await?
            .ok_or(CheckoutError::NotFound)?;

        if order.buyer_id != buyer_id {
            return Err(CheckoutError::NotFound);
        }

        Ok(order)
    }
}
