use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::listingmodel::{AvailabilityMode, Listing, ListingImage};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateListingDto {
    #[validate(length(min = 2, max = 100, message = "Waste type must be between 2-100 characters"))]
    pub waste_type: String,

    #[validate(length(
        min = 10,
        max = 5000,
        message = "Description must be between 10-5000 characters"
    ))]
    pub description: String,

    pub quantity: BigDecimal,

    #[validate(length(min = 1, max = 20, message = "Unit must be between 1-20 characters"))]
    pub unit: String,

    #[validate(length(max = 500, message = "Storage conditions must be at most 500 characters"))]
    pub storage_conditions: Option<String>,

    pub availability: AvailabilityMode,

    pub price: Option<BigDecimal>,

    #[serde(default)]
    pub image_urls: Vec<String>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct UpdateListingDto {
    #[validate(length(min = 2, max = 100, message = "Waste type must be between 2-100 characters"))]
    pub waste_type: Option<String>,

    #[validate(length(
        min = 10,
        max = 5000,
        message = "Description must be between 10-5000 characters"
    ))]
    pub description: Option<String>,

    pub quantity: Option<BigDecimal>,

    #[validate(length(min = 1, max = 20, message = "Unit must be between 1-20 characters"))]
    pub unit: Option<String>,

    #[validate(length(max = 500, message = "Storage conditions must be at most 500 characters"))]
    pub storage_conditions: Option<String>,

    pub availability: Option<AvailabilityMode>,

    pub price: Option<BigDecimal>,
}

#[derive(Serialize, Deserialize, Validate)]
pub struct RequestQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Clone)]
pub struct ListingWithImages {
    #[serde(flatten)]
    pub listing: Listing,
    pub images: Vec<ListingImage>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn create_listing_dto_validates_lengths() {
        let dto = CreateListingDto {
            waste_type: "x".to_string(),
            description: "short".to_string(),
            quantity: BigDecimal::from_str("10.5").unwrap(),
            unit: "kg".to_string(),
            storage_conditions: None,
            availability: AvailabilityMode::Sale,
            price: None,
            image_urls: vec![],
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn availability_serializes_snake_case() {
        let json = serde_json::to_string(&AvailabilityMode::Donation).unwrap();
        assert_eq!(json, "\"donation\"");
    }
}
