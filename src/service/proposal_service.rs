use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{db::DBClient, listingdb::ListingExt},
    dtos::{CreateProposalDto, ProposalAction},
    models::{
        companymodel::Company,
        notificationmodel::NotificationType,
        proposalmodel::{Proposal, ProposalStatus},
    },
    service::{error::ServiceError, notification_service::NotificationService},
};

/// The proposal lifecycle: create (with duplicate-pending protection),
/// accept/reject (one-way transition) and the notification fan-out tied to
/// both. Every state change and its notifications share one transaction.
#[derive(Debug, Clone)]
pub struct ProposalService {
    db_client: Arc<DBClient>,
    notification_service: Arc<NotificationService>,
}

impl ProposalService {
    pub fn new(db_client: Arc<DBClient>, notification_service: Arc<NotificationService>) -> Self {
        Self {
            db_client,
            notification_service,
        }
    }

    pub async fn create_proposal(
        &self,
        proposer: &Company,
        body: CreateProposalDto,
    ) -> Result<Proposal, ServiceError> {
        let listing = self
            .db_client
            .get_listing_by_id(body.listing_id)
            .await?
            .ok_or(ServiceError::ListingNotFound(body.listing_id))?;

        if listing.company_id == proposer.id {
            return Err(ServiceError::OwnListingProposal(proposer.id, listing.id));
        }

        let mut tx = self.db_client.pool.begin().await?;

        // Conditional insert: the WHERE NOT EXISTS plus the partial unique
        // index on (listing_id, proposing_company_id) for pending rows make
        // the one-pending-proposal rule hold under concurrent requests.
        let inserted = sqlx::query_as::<_, Proposal>(
            r#"
            INSERT INTO proposals
                (listing_id, proposing_company_id, receiving_company_id,
                 quantity, frequency, price, message, transport)
            SELECT $1, $2, $3, $4, $5, $6, $7, $8
            WHERE NOT EXISTS (
                SELECT 1 FROM proposals
                WHERE listing_id = $1
                  AND proposing_company_id = $2
                  AND status = 'pending'::proposal_status
            )
            RETURNING id, listing_id, proposing_company_id, receiving_company_id,
                      quantity, frequency, price, message, transport, status,
                      created_at, responded_at
            "#,
        )
        .bind(listing.id)
        .bind(proposer.id)
        .bind(listing.company_id)
        .bind(body.quantity)
        .bind(body.frequency)
        .bind(body.price)
        .bind(body.message.map(|m| ammonia::clean(&m)))
        .bind(body.transport)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| Self::map_unique_violation(e, listing.id, proposer.id))?;

        let proposal = inserted.ok_or(ServiceError::DuplicatePendingProposal(
            listing.id,
            proposer.id,
        ))?;

        let (title, notification_body) =
            NotificationService::compose_new_proposal(&proposer.name, &listing.waste_type);
        self.notification_service
            .store(
                &mut *tx,
                listing.company_id,
                proposal.id,
                NotificationType::NewProposal,
                title,
                notification_body,
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            "proposal {} created by {} on listing {}",
            proposal.id,
            proposer.id,
            listing.id
        );

        Ok(proposal)
    }

    /// Returns the updated proposal and whether a match was created.
    pub async fn respond_to_proposal(
        &self,
        responder: &Company,
        proposal_id: Uuid,
        action: ProposalAction,
    ) -> Result<(Proposal, bool), ServiceError> {
        let mut tx = self.db_client.pool.begin().await?;

        // One statement drives the transition: only a pending proposal
        // addressed to the responder moves, so a second response (or a
        // foreign company's attempt) finds no row.
        let updated = sqlx::query_as::<_, Proposal>(
            r#"
            UPDATE proposals
            SET status = $3, responded_at = NOW()
            WHERE id = $1
              AND receiving_company_id = $2
              AND status = 'pending'::proposal_status
            RETURNING id, listing_id, proposing_company_id, receiving_company_id,
                      quantity, frequency, price, message, transport, status,
                      created_at, responded_at
            "#,
        )
        .bind(proposal_id)
        .bind(responder.id)
        .bind(action.target_status())
        .fetch_optional(&mut *tx)
        .await?;

        let proposal = updated.ok_or(ServiceError::ProposalNotFound(proposal_id))?;

        let waste_type = sqlx::query_scalar::<_, String>(
            r#"
            SELECT waste_type FROM listings WHERE id = $1
            "#,
        )
        .bind(proposal.listing_id)
        .fetch_one(&mut *tx)
        .await?;

        let match_created = proposal.status == ProposalStatus::Accepted;

        if match_created {
            let (title, body) =
                NotificationService::compose_proposal_accepted(&responder.name, &waste_type);
            self.notification_service
                .store(
                    &mut *tx,
                    proposal.proposing_company_id,
                    proposal.id,
                    NotificationType::ProposalAccepted,
                    title,
                    body,
                )
                .await?;

            let (title, body) = NotificationService::compose_match_confirmed(&responder.name);
            self.notification_service
                .store(
                    &mut *tx,
                    proposal.proposing_company_id,
                    proposal.id,
                    NotificationType::MatchConfirmed,
                    title,
                    body,
                )
                .await?;
        } else {
            let (title, body) =
                NotificationService::compose_proposal_rejected(&responder.name, &waste_type);
            self.notification_service
                .store(
                    &mut *tx,
                    proposal.proposing_company_id,
                    proposal.id,
                    NotificationType::ProposalRejected,
                    title,
                    body,
                )
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            "proposal {} {} by company {}",
            proposal.id,
            proposal.status.to_str(),
            responder.id
        );

        Ok((proposal, match_created))
    }

    fn map_unique_violation(error: sqlx::Error, listing_id: Uuid, proposer_id: Uuid) -> ServiceError {
        if let sqlx::Error::Database(ref db_err) = error {
            if db_err.code().as_deref() == Some("23505") {
                return ServiceError::DuplicatePendingProposal(listing_id, proposer_id);
            }
        }
        ServiceError::Database(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    #[tokio::test]
    async fn proposal_service_compiles() {
        let pool = PgPool::connect_lazy("postgres://localhost/recircula").unwrap();
        let db_client = Arc::new(DBClient::new(pool));
        let notification_service = Arc::new(NotificationService::new());
        let svc = ProposalService::new(db_client, notification_service);

        let _ = svc.respond_to_proposal(
            &Company {
                id: Uuid::nil(),
                name: "x".to_string(),
                email: "x@x.com".to_string(),
                cnpj: "0".repeat(14),
                address: "a".to_string(),
                city: "c".to_string(),
                state: "SP".to_string(),
                password: String::new(),
                created_at: None,
                updated_at: None,
            },
            Uuid::nil(),
            ProposalAction::Accept,
        );
    }
}
