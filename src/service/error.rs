use thiserror::Error;
use uuid::Uuid;

use crate::error::{ErrorMessage, HttpError};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Listing {0} not found")]
    ListingNotFound(Uuid),

    #[error("Proposal {0} not found or not pending for this company")]
    ProposalNotFound(Uuid),

    #[error("Company {0} cannot send a proposal on its own listing {1}")]
    OwnListingProposal(Uuid, Uuid),

    #[error("A pending proposal for listing {0} from company {1} already exists")]
    DuplicatePendingProposal(Uuid, Uuid),

    #[error("Company {0} is not a participant of match {1}")]
    NotMatchParticipant(Uuid, Uuid),

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::ListingNotFound(_) => {
                HttpError::not_found(ErrorMessage::ListingNotFound.to_string())
            }
            // Not-found and not-authorized are deliberately the same answer
            // so responders cannot probe for foreign proposal ids.
            ServiceError::ProposalNotFound(_) => {
                HttpError::not_found(ErrorMessage::ProposalNotFound.to_string())
            }
            ServiceError::OwnListingProposal(_, _) => {
                HttpError::bad_request(ErrorMessage::OwnProposalForbidden.to_string())
            }
            ServiceError::DuplicatePendingProposal(_, _) => {
                HttpError::conflict(ErrorMessage::PendingProposalExists.to_string())
            }
            ServiceError::NotMatchParticipant(_, _) => {
                HttpError::not_found(ErrorMessage::NotMatchParticipant.to_string())
            }
            ServiceError::InvalidAction(_) => HttpError::bad_request(error.to_string()),
            ServiceError::Database(_) => HttpError::server_error(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn duplicate_pending_maps_to_conflict() {
        let err: HttpError =
            ServiceError::DuplicatePendingProposal(Uuid::nil(), Uuid::nil()).into();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[test]
    fn own_listing_maps_to_bad_request() {
        let err: HttpError = ServiceError::OwnListingProposal(Uuid::nil(), Uuid::nil()).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_and_unauthorized_both_map_to_not_found() {
        let missing: HttpError = ServiceError::ProposalNotFound(Uuid::nil()).into();
        let foreign: HttpError = ServiceError::NotMatchParticipant(Uuid::nil(), Uuid::nil()).into();
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
        assert_eq!(foreign.status, StatusCode::NOT_FOUND);
    }
}
