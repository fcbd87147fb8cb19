use crate::domain::listing::Listing;
use crate::domain::ports::ListingStore;
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Clone)]
pub struct ListingsRepo {
    pub pool: PgPool,
}

#[async_trait]
impl ListingStore for ListingsRepo {
    async fn get(&self, listing_id: Uuid) -> anyhow::Result<Option<Listing>> {
        let row = sqlx::query("SELECT id, price_major, seller_id FROM listings WHERE id = $1")
            .bind(listing_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| Listing {
            id: r.get("id"),
            price_major: r.get("price_major"),
            seller_id: r.get("seller_id"),
        }))
    }
}
