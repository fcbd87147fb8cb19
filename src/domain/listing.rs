use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Read model of a sellable project. The listing catalog is owned by the
/// marketplace application; the payment core only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: Uuid,
    /// Price in major currency units (rupees).
    pub price_major: i64,
    pub seller_id: Uuid,
}
