use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::listingdb::ListingExt,
    dtos::{CreateListingDto, ListingWithImages, RequestQueryDto, UpdateListingDto},
    error::{ErrorMessage, HttpError},
    middleware::JWTAuthMiddleware,
    models::listingmodel::MAX_LISTING_IMAGES,
    AppState,
};

pub fn listings_handler() -> Router {
    Router::new()
        .route("/", get(get_listings).post(create_listing))
        .route("/mine", get(get_my_listings))
        .route(
            "/:listing_id",
            get(get_listing).put(update_listing).delete(delete_listing),
        )
}

fn check_image_count(image_urls: &[String]) -> Result<(), HttpError> {
    if image_urls.len() > MAX_LISTING_IMAGES {
        return Err(HttpError::bad_request(format!(
            "A listing can have at most {} images",
            MAX_LISTING_IMAGES
        )));
    }
    Ok(())
}

pub async fn create_listing(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<CreateListingDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;
    check_image_count(&body.image_urls)?;

    let (listing, images) = app_state
        .db_client
        .save_listing(
            auth.company.id,
            body.waste_type,
            ammonia::clean(&body.description),
            body.quantity,
            body.unit,
            body.storage_conditions,
            body.availability,
            body.price,
            body.image_urls,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!("listing {} published by {}", listing.id, auth.company.id);

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "data": ListingWithImages { listing, images }
        })),
    ))
}

pub async fn get_listings(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(pagination): Query<RequestQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    pagination
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = pagination.page.unwrap_or(1);
    let limit = pagination.limit.unwrap_or(20) as i64;
    let offset = ((page - 1) as i64) * limit;

    let listings = app_state
        .db_client
        .get_listings(limit, offset)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let mut details = Vec::with_capacity(listings.len());
    for listing in listings {
        let images = app_state
            .db_client
            .get_listing_images(listing.id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
        details.push(ListingWithImages { listing, images });
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": details
    })))
}

pub async fn get_my_listings(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Query(pagination): Query<RequestQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    pagination
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = pagination.page.unwrap_or(1);
    let limit = pagination.limit.unwrap_or(20) as i64;
    let offset = ((page - 1) as i64) * limit;

    let listings = app_state
        .db_client
        .get_company_listings(auth.company.id, limit, offset)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let mut details = Vec::with_capacity(listings.len());
    for listing in listings {
        let images = app_state
            .db_client
            .get_listing_images(listing.id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
        details.push(ListingWithImages { listing, images });
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": details
    })))
}

pub async fn get_listing(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(listing_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let listing = app_state
        .db_client
        .get_listing_by_id(listing_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::ListingNotFound.to_string()))?;

    let images = app_state
        .db_client
        .get_listing_images(listing.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": ListingWithImages { listing, images }
    })))
}

pub async fn update_listing(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(listing_id): Path<Uuid>,
    Json(body): Json<UpdateListingDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    // Ownership is part of the WHERE clause; a foreign company gets the
    // same 404 as a missing listing.
    let listing = app_state
        .db_client
        .update_listing(
            listing_id,
            auth.company.id,
            body.waste_type,
            body.description.map(|d| ammonia::clean(&d)),
            body.quantity,
            body.unit,
            body.storage_conditions,
            body.availability,
            body.price,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::ListingNotFound.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": listing
    })))
}

pub async fn delete_listing(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(listing_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_listing(listing_id, auth.company.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if !deleted {
        return Err(HttpError::not_found(
            ErrorMessage::ListingNotFound.to_string(),
        ));
    }

    tracing::info!("listing {} deleted by {}", listing_id, auth.company.id);

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Listing deleted"
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn sixth_image_rejects_the_listing() {
        let urls: Vec<String> = (0..MAX_LISTING_IMAGES + 1)
            .map(|i| format!("https://cdn.example.com/{}.jpg", i))
            .collect();
        let err = check_image_count(&urls).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn cap_and_below_are_accepted() {
        let urls: Vec<String> = (0..MAX_LISTING_IMAGES)
            .map(|i| format!("https://cdn.example.com/{}.jpg", i))
            .collect();
        assert!(check_image_count(&urls).is_ok());
        assert!(check_image_count(&[]).is_ok());
    }
}
