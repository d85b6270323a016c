use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "notification_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    NewProposal,
    ProposalAccepted,
    ProposalRejected,
    MatchConfirmed,
}

impl NotificationType {
    pub fn to_str(&self) -> &str {
        match self {
            NotificationType::NewProposal => "new_proposal",
            NotificationType::ProposalAccepted => "proposal_accepted",
            NotificationType::ProposalRejected => "proposal_rejected",
            NotificationType::MatchConfirmed => "match_confirmed",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub company_id: Uuid,
    pub proposal_id: Uuid,
    pub notification_type: NotificationType,
    pub title: String,
    pub body: String,
    pub viewed: bool,
    pub created_at: Option<DateTime<Utc>>,
}
