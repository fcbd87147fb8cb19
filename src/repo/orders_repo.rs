use crate::domain::order::{NewOrder, Order, OrderStatus};
use crate::domain::ports::OrderStore;
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Clone)]
pub struct OrdersRepo {
    pub pool: PgPool,
}

fn map_order(r: PgRow) -> Order {
    Order {
        id: r.get("id"),
        buyer_id: r.get("buyer_id"),
        listing_id: r.get("listing_id"),
        amount_minor: r.get("amount_minor"),
        status: OrderStatus::parse(r.get::<String, _>("status").as_str()),
        gateway_order_id: r.get("gateway_order_id"),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl OrderStore for OrdersRepo {
    async fn insert_pending(&self, order: NewOrder) -> anyhow::Result<Order> {
        let id = Uuid::new_v4();
        let row = sqlx::query(
            r#"
            INSERT INTO orders (id, buyer_id, listing_id, amount_minor, status, gateway_order_id)
            VALUES ($1, $2, $3, $4, 'PENDING', $5)
            RETURNING created_at
            "#,
        )
        .bind(id)
        .bind(order.buyer_id)
        .bind(order.listing_id)
        .bind(order.amount_minor)
        .bind(&order.gateway_order_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Order {
            id,
            buyer_id: order.buyer_id,
            listing_id: order.listing_id,
            amount_minor: order.amount_minor,
            status: OrderStatus::Pending,
            gateway_order_id: order.gateway_order_id,
            created_at: row.get("created_at"),
        })
    }

    async fn get(&self, order_id: Uuid) -> anyhow::Result<Option<Order>> {
        let row = sqlx::query(
            "SELECT id, buyer_id, listing_id, amount_minor, status, gateway_order_id, created_at FROM orders WHERE id = $1",
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(map_order))
    }

    async fn has_success(&self, buyer_id: Uuid, listing_id: Uuid) -> anyhow::Result<bool> {
        let row = sqlx::query(
            "SELECT 1 FROM orders WHERE buyer_id = $1 AND listing_id = $2 AND status = 'SUCCESS' LIMIT 1",
        )
        .bind(buyer_id)
        .bind(listing_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }

    async fn finalize_pending(&self, order_id: Uuid, to: OrderStatus) -> anyhow::Result<bool> {
        // Two concurrent callers race on the WHERE clause: exactly one sees
        // rows_affected = 1. The NOT EXISTS arm keeps a second PENDING order
        // for the same (buyer, listing) from producing a second SUCCESS; the
        // partial unique index backs this at the storage layer.
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status = $2, updated_at = now()
            WHERE id = $1
              AND status = 'PENDING'
              AND ($2 <> 'SUCCESS' OR NOT EXISTS (
                    SELECT 1 FROM orders o
                    WHERE o.buyer_id = orders.buyer_id
                      AND o.listing_id = orders.listing_id
                      AND o.status = 'SUCCESS'))
            "#,
        )
        .bind(order_id)
        .bind(to.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
