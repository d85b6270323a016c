use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One persisted chat message. Ids come from a bigserial column, so within
/// a match they grow in insertion order and unread math can compare them
/// with a plain `>`.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct ChatMessage {
    pub id: i64,
    pub match_id: Uuid,
    pub sender_company_id: Uuid,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct ChatLastSeen {
    pub match_id: Uuid,
    pub company_id: Uuid,
    pub last_seen_message_id: i64,
    pub updated_at: Option<DateTime<Utc>>,
}
