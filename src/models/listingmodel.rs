use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::BigDecimal, FromRow};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "availability_mode", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityMode {
    Pickup,
    Donation,
    Sale,
}

impl AvailabilityMode {
    pub fn to_str(&self) -> &str {
        match self {
            AvailabilityMode::Pickup => "pickup",
            AvailabilityMode::Donation => "donation",
            AvailabilityMode::Sale => "sale",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Listing {
    pub id: Uuid,
    pub company_id: Uuid,
    pub waste_type: String,
    pub description: String,
    pub quantity: BigDecimal,
    pub unit: String,
    pub storage_conditions: Option<String>,
    pub availability: AvailabilityMode,
    pub price: Option<BigDecimal>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct ListingImage {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub url: String,
    pub position: i32,
}

// Hard cap carried over from the product rules: a listing shows at most
// five photos.
pub const MAX_LISTING_IMAGES: usize = 5;
