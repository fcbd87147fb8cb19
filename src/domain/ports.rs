use crate::domain::listing::Listing;
use crate::domain::order::{NewOrder, Order, OrderStatus};
use crate::domain::payment::{NewPayment, Payment};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait ListingStore: Send + Sync {
    async fn get(&self, listing_id: Uuid) -> anyhow::Result<Option<Listing>>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert_pending(&self, order: NewOrder) -> anyhow::Result<Order>;

    async fn get(&self, order_id: Uuid) -> anyhow::Result<Option<Order>>;

    async fn has_success(&self, buyer_id: Uuid, listing_id: Uuid) -> anyhow::Result<bool>;

    /// Single conditional update PENDING -> `to`. Returns `false` when the
    /// order is missing, is no longer PENDING, or (for SUCCESS) another order
    /// for the same (buyer, listing) already succeeded. The caller must
    /// re-read the order before deciding what to report.
    async fn finalize_pending(&self, order_id: Uuid, to: OrderStatus) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn insert(&self, payment: NewPayment) -> anyhow::Result<Payment>;

    async fn get_by_order(&self, order_id: Uuid) -> anyhow::Result<Option<Payment>>;
}
