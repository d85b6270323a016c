use std::sync::Arc;

use axum::{
    extract::Query,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::proposaldb::ProposalExt,
    dtos::{
        AcceptedMatchesResponseDto, CreateProposalDto, ProposalAction, ProposalResponseDto,
        RequestQueryDto, RespondProposalDto, RespondResponseDto,
    },
    error::HttpError,
    middleware::JWTAuthMiddleware,
    service::error::ServiceError,
    AppState,
};

pub fn proposals_handler() -> Router {
    Router::new()
        .route("/", post(create_proposal))
        .route("/respond", patch(respond_to_proposal))
        .route("/sent", get(get_sent_proposals))
        .route("/received", get(get_received_proposals))
        .route("/accepted", get(get_accepted_matches))
}

pub async fn create_proposal(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<CreateProposalDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let proposal = app_state
        .proposal_service
        .create_proposal(&auth.company, body)
        .await
        .map_err(HttpError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(ProposalResponseDto {
            status: "success".to_string(),
            data: proposal,
        }),
    ))
}

pub async fn respond_to_proposal(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<RespondProposalDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let action = ProposalAction::parse(&body.action)
        .ok_or_else(|| HttpError::from(ServiceError::InvalidAction(body.action.clone())))?;

    let (proposal, match_created) = app_state
        .proposal_service
        .respond_to_proposal(&auth.company, body.proposal_id, action)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(RespondResponseDto {
        status: "success".to_string(),
        match_created,
        data: proposal,
    }))
}

pub async fn get_sent_proposals(
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

    let proposals = app_state
        .db_client
        .get_sent_proposals(auth.company.id, limit, offset)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": proposals
    })))
}

pub async fn get_received_proposals(
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

    let proposals = app_state
        .db_client
        .get_received_proposals(auth.company.id, limit, offset)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": proposals
    })))
}

pub async fn get_accepted_matches(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let matches = app_state
        .db_client
        .get_accepted_matches(auth.company.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(AcceptedMatchesResponseDto {
        status: "success".to_string(),
        data: matches,
    }))
}
