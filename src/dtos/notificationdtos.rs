use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::notificationmodel::Notification;

#[derive(Debug, Deserialize)]
pub struct MarkViewedDto {
    /// When omitted, every unviewed notification of the caller is marked.
    pub notification_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Deserialize)]
pub struct MarkMatchViewedDto {
    pub proposal_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct NotificationListResponseDto {
    pub status: String,
    pub data: Vec<Notification>,
    pub unread_count: i64,
}
