use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        auth::auth_handler, chat::chat_handler, chat::ws_upgrade, listings::listings_handler,
        notifications::notifications_handler, proposals::proposals_handler,
    },
    middleware::auth,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/auth", auth_handler())
        .nest(
            "/listings",
            listings_handler().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/proposals",
            proposals_handler().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/notifications",
            notifications_handler().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/chat",
            chat_handler()
                .layer(middleware::from_fn(auth))
                // The websocket handshake authenticates itself (query
                // param or cookie) because browsers cannot attach headers
                // to it, so it sits outside the auth layer.
                .route("/ws", get(ws_upgrade)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
