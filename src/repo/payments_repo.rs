use crate::domain::payment::{NewPayment, Payment, PAYMENT_STATUS_PAID};
use crate::domain::ports::PaymentStore;
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Clone)]
pub struct PaymentsRepo {
    pub pool: PgPool,
}

#[async_trait]
impl PaymentStore for PaymentsRepo {
    async fn insert(&self, payment: NewPayment) -> anyhow::Result<Payment> {
        let id = Uuid::new_v4();
        // order_id is UNIQUE; a duplicate insert is a bug upstream and
        // surfaces as an error rather than a second payment row.
        let row = sqlx::query(
            r#"
            INSERT INTO payments (id, order_id, gateway_order_id, gateway_payment_id, gateway_signature, amount_minor, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING created_at
            "#,
        )
        .bind(id)
        .bind(payment.order_id)
        .bind(&payment.gateway_order_id)
        .bind(&payment.gateway_payment_id)
        .bind(&payment.gateway_signature)
        .bind(payment.amount_minor)
        .bind(PAYMENT_STATUS_PAID)
        .fetch_one(&self.pool)
        .await?;

        Ok(Payment {
            id,
            order_id: payment.order_id,
            gateway_order_id: payment.gateway_order_id,
            gateway_payment_id: payment.gateway_payment_id,
            gateway_signature: payment.gateway_signature,
            amount_minor: payment.amount_minor,
            status: PAYMENT_STATUS_PAID.to_string(),
            created_at: row.get("created_at"),
        })
    }

    async fn get_by_order(&self, order_id: Uuid) -> anyhow::Result<Option<Payment>> {
        let row = sqlx::query(
            "SELECT id, order_id, gateway_order_id, gateway_payment_id, gateway_signature, amount_minor, status, created_at FROM payments WHERE order_id = $1",
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| Payment {
            id: r.get("id"),
            order_id: r.get("order_id"),
            gateway_order_id: r.get("gateway_order_id"),
            gateway_payment_id: r.get("gateway_payment_id"),
            gateway_signature: r.get("gateway_signature"),
            amount_minor: r.get("amount_minor"),
            status: r.get("status"),
            created_at: r.get("created_at"),
        }))
    }
}
