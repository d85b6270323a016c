use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, WebSocketUpgrade,
    },
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::task::JoinHandle;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{chatdb::ChatExt, companydb::CompanyExt, proposaldb::ProposalExt},
    dtos::{
        ChatClientEvent, ChatHistoryQueryDto, ChatHistoryResponseDto, ChatServerEvent,
        LastSeenQueryDto, RecordSeenDto,
    },
    error::{ErrorMessage, HttpError},
    middleware::JWTAuthMiddleware,
    models::companymodel::Company,
    utils::token,
    AppState,
};

pub fn chat_handler() -> Router {
    Router::new()
        .route("/history", get(get_chat_history))
        .route("/last-seen", get(get_last_seen).post(record_seen))
        .route("/unread", get(get_unread_count))
}

pub async fn get_chat_history(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Query(query): Query<ChatHistoryQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_participant(&app_state, query.match_id, auth.company.id).await?;

    let messages = app_state
        .db_client
        .get_chat_history(query.match_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ChatHistoryResponseDto {
        status: "success".to_string(),
        data: messages,
    }))
}

pub async fn record_seen(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<RecordSeenDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    ensure_participant(&app_state, body.match_id, auth.company.id).await?;

    let last_seen = app_state
        .db_client
        .upsert_last_seen(body.match_id, auth.company.id, body.last_seen_message_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": last_seen
    })))
}

pub async fn get_last_seen(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Query(query): Query<LastSeenQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_participant(&app_state, query.match_id, auth.company.id).await?;

    let last_seen = app_state
        .db_client
        .get_last_seen(query.match_id, auth.company.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": { "last_seen_message_id": last_seen }
    })))
}

pub async fn get_unread_count(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Query(query): Query<LastSeenQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_participant(&app_state, query.match_id, auth.company.id).await?;

    let unread = app_state
        .db_client
        .get_unread_count(query.match_id, auth.company.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": { "unread_count": unread }
    })))
}

async fn ensure_participant(
    app_state: &Arc<AppState>,
    match_id: Uuid,
    company_id: Uuid,
) -> Result<(), HttpError> {
    let is_participant = app_state
        .db_client
        .is_match_participant(match_id, company_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if !is_participant {
        return Err(HttpError::not_found(
            ErrorMessage::NotMatchParticipant.to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct WsQueryDto {
    pub token: Option<String>,
}

/// Browsers cannot set an Authorization header on a websocket handshake,
/// so the token arrives as a query parameter or the session cookie.
pub async fn ws_upgrade(
    ws: WebSocketUpgrade,
    Query(query): Query<WsQueryDto>,
    cookie_jar: CookieJar,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<Response, HttpError> {
    let raw_token = query
        .token
        .or_else(|| cookie_jar.get("token").map(|c| c.value().to_string()))
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::TokenNotProvided.to_string()))?;

    let company_id = token::decode_token(raw_token, app_state.env.jwt_secret.as_bytes())?;
    let company_id = Uuid::parse_str(&company_id)
        .map_err(|_| HttpError::unauthorized(ErrorMessage::InvalidToken.to_string()))?;

    let company = app_state
        .db_client
        .get_company(Some(company_id), None, None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::CompanyNoLongerExist.to_string()))?;

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, app_state, company)))
}

async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>, company: Company) {
    let (sender, mut receiver) = socket.split();
    let sender = Arc::new(tokio::sync::Mutex::new(sender));

    // One forwarding task per joined room; aborted on leave/disconnect.
    let mut joined: HashMap<Uuid, JoinHandle<()>> = HashMap::new();

    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Text(text) => {
                let event = match serde_json::from_str::<ChatClientEvent>(&text) {
                    Ok(event) => event,
                    Err(_) => {
                        send_frame(
                            &sender,
                            &ChatServerEvent::Error {
                                message: "unrecognized event".to_string(),
                            },
                        )
                        .await;
                        continue;
                    }
                };

                match event {
                    ChatClientEvent::Join { match_id } => {
                        handle_join(&app_state, &company, &sender, &mut joined, match_id).await;
                    }
                    ChatClientEvent::Message { match_id, content } => {
                        handle_message(&app_state, &company, &sender, &joined, match_id, content)
                            .await;
                    }
                    ChatClientEvent::Leave { match_id } => {
                        if let Some(task) = joined.remove(&match_id) {
                            // Wait for the forward task to die so its
                            // receiver is dropped before the prune check.
                            task.abort();
                            let _ = task.await;
                            app_state.chat_relay.prune(match_id).await;
                        }
                        send_frame(&sender, &ChatServerEvent::Left { match_id }).await;
                    }
                }
            }
            Message::Ping(data) => {
                let mut sender = sender.lock().await;
                let _ = sender.send(Message::Pong(data)).await;
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    for (match_id, task) in joined {
        task.abort();
        let _ = task.await;
        app_state.chat_relay.prune(match_id).await;
    }
}

async fn handle_join(
    app_state: &Arc<AppState>,
    company: &Company,
    sender: &Arc<tokio::sync::Mutex<futures::stream::SplitSink<WebSocket, Message>>>,
    joined: &mut HashMap<Uuid, JoinHandle<()>>,
    match_id: Uuid,
) {
    if joined.contains_key(&match_id) {
        send_frame(sender, &ChatServerEvent::Joined { match_id }).await;
        return;
    }

    // Room membership is checked here, not assumed from the client.
    let is_participant = match app_state
        .db_client
        .is_match_participant(match_id, company.id)
        .await
    {
        Ok(is_participant) => is_participant,
        Err(e) => {
            tracing::error!("participation check failed for match {}: {}", match_id, e);
            send_frame(
                sender,
                &ChatServerEvent::Error {
                    message: "could not verify match participation".to_string(),
                },
            )
            .await;
            return;
        }
    };

    if !is_participant {
        send_frame(
            sender,
            &ChatServerEvent::Error {
                message: ErrorMessage::NotMatchParticipant.to_string(),
            },
        )
        .await;
        return;
    }

    let mut broadcast_rx = app_state.chat_relay.join(match_id).await;
    let sender_clone = sender.clone();
    let forward_task = tokio::spawn(async move {
        while let Ok(frame) = broadcast_rx.recv().await {
            let mut sender = sender_clone.lock().await;
            if sender.send(Message::Text(frame)).await.is_err() {
                break;
            }
        }
    });

    joined.insert(match_id, forward_task);
    send_frame(sender, &ChatServerEvent::Joined { match_id }).await;
}

async fn handle_message(
    app_state: &Arc<AppState>,
    company: &Company,
    sender: &Arc<tokio::sync::Mutex<futures::stream::SplitSink<WebSocket, Message>>>,
    joined: &HashMap<Uuid, JoinHandle<()>>,
    match_id: Uuid,
    content: String,
) {
    if !joined.contains_key(&match_id) {
        send_frame(
            sender,
            &ChatServerEvent::Error {
                message: "join the room before sending messages".to_string(),
            },
        )
        .await;
        return;
    }

    let content = sanitize_content(&content);
    if content.is_empty() {
        send_frame(
            sender,
            &ChatServerEvent::Error {
                message: "message content is empty".to_string(),
            },
        )
        .await;
        return;
    }

    // Persist first; broadcast only once the insert committed. A client
    // never sees a message that was not durably stored.
    let message = match app_state
        .db_client
        .save_chat_message(match_id, company.id, content)
        .await
    {
        Ok(message) => message,
        Err(e) => {
            tracing::error!("chat message persistence failed for match {}: {}", match_id, e);
            send_frame(
                sender,
                &ChatServerEvent::Error {
                    message: "message could not be saved".to_string(),
                },
            )
            .await;
            return;
        }
    };

    let frame = ChatServerEvent::Message { data: message };
    match serde_json::to_string(&frame) {
        Ok(frame) => {
            app_state.chat_relay.publish(match_id, frame).await;
        }
        Err(e) => {
            tracing::error!("failed to serialize chat frame: {}", e);
        }
    }
}

/// Chat content is stored HTML-sanitized: markup is stripped and the
/// remaining text is entity-encoded (`<` becomes `&lt;`). Clients render
/// it as an HTML fragment or decode entities for plain-text display.
fn sanitize_content(raw: &str) -> String {
    ammonia::clean(raw.trim())
}

async fn send_frame(
    sender: &Arc<tokio::sync::Mutex<futures::stream::SplitSink<WebSocket, Message>>>,
    frame: &ChatServerEvent,
) {
    if let Ok(text) = serde_json::to_string(frame) {
        let mut sender = sender.lock().await;
        let _ = sender.send(Message::Text(text)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_content_is_entity_encoded() {
        assert_eq!(sanitize_content("a < b"), "a &lt; b");
        assert_eq!(sanitize_content("  10kg & 20kg  "), "10kg &amp; 20kg");
    }

    #[test]
    fn markup_is_stripped() {
        assert_eq!(sanitize_content("<script>alert(1)</script>oi"), "oi");
        assert_eq!(sanitize_content("<b>negrito</b>"), "<b>negrito</b>");
    }
}
