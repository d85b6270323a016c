use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::proposalmodel::{
    AcceptedMatch, Proposal, ProposalFrequency, ProposalStatus, TransportMode,
};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateProposalDto {
    pub listing_id: Uuid,

    pub quantity: BigDecimal,

    pub frequency: ProposalFrequency,

    pub price: Option<BigDecimal>,

    #[validate(length(max = 2000, message = "Message must be at most 2000 characters"))]
    pub message: Option<String>,

    pub transport: TransportMode,
}

/// Action values kept from the legacy wire contract ("aceitar"/"rejeitar").
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProposalAction {
    Accept,
    Reject,
}

impl ProposalAction {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "aceitar" => Some(ProposalAction::Accept),
            "rejeitar" => Some(ProposalAction::Reject),
            _ => None,
        }
    }

    pub fn target_status(&self) -> ProposalStatus {
        match self {
            ProposalAction::Accept => ProposalStatus::Accepted,
            ProposalAction::Reject => ProposalStatus::Rejected,
        }
    }
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct RespondProposalDto {
    pub proposal_id: Uuid,

    #[validate(length(min = 1, message = "Action is required"))]
    pub action: String,
}

#[derive(Debug, Serialize)]
pub struct ProposalResponseDto {
    pub status: String,
    pub data: Proposal,
}

#[derive(Debug, Serialize)]
pub struct RespondResponseDto {
    pub status: String,
    pub match_created: bool,
    pub data: Proposal,
}

#[derive(Debug, Serialize)]
pub struct AcceptedMatchesResponseDto {
    pub status: String,
    pub data: Vec<AcceptedMatch>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_action_values_parse() {
        assert_eq!(ProposalAction::parse("aceitar"), Some(ProposalAction::Accept));
        assert_eq!(ProposalAction::parse("rejeitar"), Some(ProposalAction::Reject));
        assert_eq!(ProposalAction::parse("accept"), None);
        assert_eq!(ProposalAction::parse(""), None);
    }

    #[test]
    fn action_maps_to_terminal_status() {
        assert_eq!(
            ProposalAction::Accept.target_status(),
            ProposalStatus::Accepted
        );
        assert_eq!(
            ProposalAction::Reject.target_status(),
            ProposalStatus::Rejected
        );
    }

    #[test]
    fn frequency_and_transport_serialize_snake_case() {
        assert_eq!(
            serde_json::to_string(&ProposalFrequency::OneOff).unwrap(),
            "\"one_off\""
        );
        assert_eq!(
            serde_json::to_string(&TransportMode::Negotiable).unwrap(),
            "\"negotiable\""
        );
    }
}
