use std::sync::Arc;

use axum::{
    response::IntoResponse,
    routing::{get, patch},
    Extension, Json, Router,
};

use crate::{
    db::notificationdb::NotificationExt,
    dtos::{MarkMatchViewedDto, MarkViewedDto, NotificationListResponseDto},
    error::HttpError,
    middleware::JWTAuthMiddleware,
    AppState,
};

pub fn notifications_handler() -> Router {
    Router::new()
        .route("/", get(get_notifications).patch(mark_viewed))
        .route("/match-unique", patch(mark_match_viewed))
}

pub async fn get_notifications(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let notifications = app_state
        .db_client
        .get_company_notifications(auth.company.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let unread_count = app_state
        .db_client
        .get_unviewed_notification_count(auth.company.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(NotificationListResponseDto {
        status: "success".to_string(),
        data: notifications,
        unread_count,
    }))
}

pub async fn mark_viewed(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<MarkViewedDto>,
) -> Result<impl IntoResponse, HttpError> {
    let updated = match body.notification_ids {
        Some(ids) => app_state
            .db_client
            .mark_notifications_viewed(auth.company.id, &ids)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?,
        None => app_state
            .db_client
            .mark_all_notifications_viewed(auth.company.id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?,
    };

    Ok(Json(serde_json::json!({
        "status": "success",
        "updated_count": updated
    })))
}

pub async fn mark_match_viewed(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<MarkMatchViewedDto>,
) -> Result<impl IntoResponse, HttpError> {
    let updated = app_state
        .db_client
        .mark_match_notification_viewed(body.proposal_id, auth.company.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "updated_count": updated
    })))
}
