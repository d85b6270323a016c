use async_trait::async_trait;
use sqlx::{types::BigDecimal, Error};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::listingmodel::{AvailabilityMode, Listing, ListingImage};

#[async_trait]
pub trait ListingExt {
    async fn save_listing(
        &self,
        company_id: Uuid,
        waste_type: String,
        description: String,
        quantity: BigDecimal,
        unit: String,
        storage_conditions: Option<String>,
        availability: AvailabilityMode,
        price: Option<BigDecimal>,
        image_urls: Vec<String>,
    ) -> Result<(Listing, Vec<ListingImage>), Error>;

    async fn get_listing_by_id(&self, listing_id: Uuid) -> Result<Option<Listing>, Error>;

    async fn get_listings(&self, limit: i64, offset: i64) -> Result<Vec<Listing>, Error>;

    async fn get_company_listings(
        &self,
        company_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Listing>, Error>;

    async fn get_listing_images(&self, listing_id: Uuid) -> Result<Vec<ListingImage>, Error>;

    async fn update_listing(
        &self,
        listing_id: Uuid,
        company_id: Uuid,
        waste_type: Option<String>,
        description: Option<String>,
        quantity: Option<BigDecimal>,
        unit: Option<String>,
        storage_conditions: Option<String>,
        availability: Option<AvailabilityMode>,
        price: Option<BigDecimal>,
    ) -> Result<Option<Listing>, Error>;

    /// Returns true when a row was deleted. Images and proposals go with it
    /// through the foreign key cascade.
    async fn delete_listing(&self, listing_id: Uuid, company_id: Uuid) -> Result<bool, Error>;
}

#[async_trait]
impl ListingExt for DBClient {
    async fn save_listing(
        &self,
        company_id: Uuid,
        waste_type: String,
        description: String,
        quantity: BigDecimal,
        unit: String,
        storage_conditions: Option<String>,
        availability: AvailabilityMode,
        price: Option<BigDecimal>,
        image_urls: Vec<String>,
    ) -> Result<(Listing, Vec<ListingImage>), Error> {
        let mut tx = self.pool.begin().await?;

        let listing = sqlx::query_as::<_, Listing>(
            r#"
            INSERT INTO listings
                (company_id, waste_type, description, quantity, unit,
                 storage_conditions, availability, price)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, company_id, waste_type, description, quantity, unit,
                      storage_conditions, availability, price, created_at, updated_at
            "#,
        )
        .bind(company_id)
        .bind(waste_type)
        .bind(description)
        .bind(quantity)
        .bind(unit)
        .bind(storage_conditions)
        .bind(availability)
        .bind(price)
        .fetch_one(&mut *tx)
        .await?;

        let mut images = Vec::with_capacity(image_urls.len());
        for (position, url) in image_urls.into_iter().enumerate() {
            let image = sqlx::query_as::<_, ListingImage>(
                r#"
                INSERT INTO listing_images (listing_id, url, position)
                VALUES ($1, $2, $3)
                RETURNING id, listing_id, url, position
                "#,
            )
            .bind(listing.id)
            .bind(url)
            .bind(position as i32)
            .fetch_one(&mut *tx)
            .await?;
            images.push(image);
        }

        tx.commit().await?;
        Ok((listing, images))
    }

    async fn get_listing_by_id(&self, listing_id: Uuid) -> Result<Option<Listing>, Error> {
        sqlx::query_as::<_, Listing>(
            r#"
            SELECT id, company_id, waste_type, description, quantity, unit,
                   storage_conditions, availability, price, created_at, updated_at
            FROM listings
            WHERE id = $1
            "#,
        )
        .bind(listing_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_listings(&self, limit: i64, offset: i64) -> Result<Vec<Listing>, Error> {
        sqlx::query_as::<_, Listing>(
            r#"
            SELECT id, company_id, waste_type, description, quantity, unit,
                   storage_conditions, availability, price, created_at, updated_at
            FROM listings
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_company_listings(
        &self,
        company_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Listing>, Error> {
        sqlx::query_as::<_, Listing>(
            r#"
            SELECT id, company_id, waste_type, description, quantity, unit,
                   storage_conditions, availability, price, created_at, updated_at
            FROM listings
            WHERE company_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(company_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_listing_images(&self, listing_id: Uuid) -> Result<Vec<ListingImage>, Error> {
        sqlx::query_as::<_, ListingImage>(
            r#"
            SELECT id, listing_id, url, position
            FROM listing_images
            WHERE listing_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(listing_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_listing(
        &self,
        listing_id: Uuid,
        company_id: Uuid,
        waste_type: Option<String>,
        description: Option<String>,
        quantity: Option<BigDecimal>,
        unit: Option<String>,
        storage_conditions: Option<String>,
        availability: Option<AvailabilityMode>,
        price: Option<BigDecimal>,
    ) -> Result<Option<Listing>, Error> {
        sqlx::query_as::<_, Listing>(
            r#"
            UPDATE listings
            SET waste_type = COALESCE($3, waste_type),
                description = COALESCE($4, description),
                quantity = COALESCE($5, quantity),
                unit = COALESCE($6, unit),
                storage_conditions = COALESCE($7, storage_conditions),
                availability = COALESCE($8, availability),
                price = COALESCE($9, price),
                updated_at = NOW()
            WHERE id = $1 AND company_id = $2
            RETURNING id, company_id, waste_type, description, quantity, unit,
                      storage_conditions, availability, price, created_at, updated_at
            "#,
        )
        .bind(listing_id)
        .bind(company_id)
        .bind(waste_type)
        .bind(description)
        .bind(quantity)
        .bind(unit)
        .bind(storage_conditions)
        .bind(availability)
        .bind(price)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_listing(&self, listing_id: Uuid, company_id: Uuid) -> Result<bool, Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM listings
            WHERE id = $1 AND company_id = $2
            "#,
        )
        .bind(listing_id)
        .bind(company_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
