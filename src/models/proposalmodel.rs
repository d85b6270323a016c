use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::BigDecimal, FromRow};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "proposal_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ProposalStatus {
    pub fn to_str(&self) -> &str {
        match self {
            ProposalStatus::Pending => "pending",
            ProposalStatus::Accepted => "accepted",
            ProposalStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "proposal_frequency", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProposalFrequency {
    OneOff,
    Weekly,
    Monthly,
    Quarterly,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "transport_mode", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Proposer,
    Owner,
    Negotiable,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Proposal {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub proposing_company_id: Uuid,
    pub receiving_company_id: Uuid,
    pub quantity: BigDecimal,
    pub frequency: ProposalFrequency,
    pub price: Option<BigDecimal>,
    pub message: Option<String>,
    pub transport: TransportMode,
    pub status: ProposalStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub responded_at: Option<DateTime<Utc>>,
}

/// Row shape for the accepted-matches view: an accepted proposal joined
/// with the counterpart company name and the set of companies whose
/// match-confirmed notification has already been viewed.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct AcceptedMatch {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub proposing_company_id: Uuid,
    pub receiving_company_id: Uuid,
    pub counterpart_name: String,
    pub responded_at: Option<DateTime<Utc>>,
    pub notified_company_ids: Vec<Uuid>,
}
