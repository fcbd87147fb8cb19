use crate::domain::listing::Listing;
use crate::domain::order::{NewOrder, Order, OrderStatus};
use crate::domain::payment::{NewPayment, Payment, PAYMENT_STATUS_PAID};
use crate::domain::ports::{ListingStore, OrderStore, PaymentStore};
use anyhow::bail;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory implementation of all three stores, with the same
/// compare-and-set semantics as the Postgres repos. Used by the test suite
/// and for running the service without a database.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    listings: Arc<RwLock<HashMap<Uuid, Listing>>>,
    orders: Arc<RwLock<HashMap<Uuid, Order>>>,
    payments: Arc<RwLock<HashMap<Uuid, Payment>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_listing(&self, listing: Listing) {
        self.listings.write().await.insert(listing.id, listing);
    }

    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn payment_count(&self) -> usize {
        self.payments.read().await.len()
    }
}

#[async_trait]
impl ListingStore for InMemoryStore {
    async fn get(&self, listing_id: Uuid) -> anyhow::Result<Option<Listing>> {
        Ok(self.listings.read().await.get(&listing_id).cloned())
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn insert_pending(&self, order: NewOrder) -> anyhow::Result<Order> {
        let stored = Order {
            id: Uuid::new_v4(),
            buyer_id: order.buyer_id,
            listing_id: order.listing_id,
            amount_minor: order.amount_minor,
            status: OrderStatus::Pending,
            gateway_order_id: order.gateway_order_id,
            created_at: chrono::Utc::now(),
        };
        self.orders.write().await.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get(&self, order_id: Uuid) -> anyhow::Result<Option<Order>> {
        Ok(self.orders.read().await.get(&order_id).cloned())
    }

    async fn has_success(&self, buyer_id: Uuid, listing_id: Uuid) -> anyhow::Result<bool> {
        Ok(self.orders.read().await.values().any(|o| {
            o.buyer_id == buyer_id && o.listing_id == listing_id && o.status == OrderStatus::Success
        }))
    }

    async fn finalize_pending(&self, order_id: Uuid, to: OrderStatus) -> anyhow::Result<bool> {
        // Held write lock makes the check-and-set atomic, mirroring the
        // single conditional UPDATE in the Postgres repo.
        let mut orders = self.orders.write().await;

        let Some(current) = orders.get(&order_id) else {
            return Ok(false);
        };
        if current.status != OrderStatus::Pending {
            return Ok(false);
        }
        if to == OrderStatus::Success {
            let (buyer_id, listing_id) = (current.buyer_id, current.listing_id);
            let pair_taken = orders.values().any(|o| {
                o.buyer_id == buyer_id
                    && o.listing_id == listing_id
                    && o.status == OrderStatus::Success
            });
            if pair_taken {
                return Ok(false);
            }
        }

        if let Some(order) = orders.get_mut(&order_id) {
            order.status = to;
        }
        Ok(true)
    }
}

#[async_trait]
impl PaymentStore for InMemoryStore {
    async fn insert(&self, payment: NewPayment) -> anyhow::Result<Payment> {
        let mut payments = self.payments.write().await;
        if payments.contains_key(&payment.order_id) {
            bail!("payment already recorded for order {}", payment.order_id);
        }

        let stored = Payment {
            id: Uuid::new_v4(),
            order_id: payment.order_id,
            gateway_order_id: payment.gateway_order_id,
            gateway_payment_id: payment.gateway_payment_id,
            gateway_signature: payment.gateway_signature,
            amount_minor: payment.amount_minor,
            status: PAYMENT_STATUS_PAID.to_string(),
            created_at: chrono::Utc::now(),
        };
        payments.insert(stored.order_id, stored.clone());
        Ok(stored)
    }

    async fn get_by_order(&self, order_id: Uuid) -> anyhow::Result<Option<Payment>> {
        Ok(self.payments.read().await.get(&order_id).cloned())
    }
}
