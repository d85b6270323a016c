use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::proposalmodel::{AcceptedMatch, Proposal};

#[async_trait]
pub trait ProposalExt {
    async fn get_sent_proposals(
        &self,
        company_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Proposal>, Error>;

    async fn get_received_proposals(
        &self,
        company_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Proposal>, Error>;

    /// Accepted proposals where the company sits on either side, annotated
    /// with the counterpart name and the companies that already viewed
    /// their match-confirmed notification.
    async fn get_accepted_matches(&self, company_id: Uuid) -> Result<Vec<AcceptedMatch>, Error>;

    /// True when the company is a party of the ACCEPTED proposal behind
    /// `match_id`. Chat join and history checks go through this.
    async fn is_match_participant(&self, match_id: Uuid, company_id: Uuid)
        -> Result<bool, Error>;
}

#[async_trait]
impl ProposalExt for DBClient {
    async fn get_sent_proposals(
        &self,
        company_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Proposal>, Error> {
        sqlx::query_as::<_, Proposal>(
            r#"
            SELECT id, listing_id, proposing_company_id, receiving_company_id,
                   quantity, frequency, price, message, transport, status,
                   created_at, responded_at
            FROM proposals
            WHERE proposing_company_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(company_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_received_proposals(
        &self,
        company_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Proposal>, Error> {
        sqlx::query_as::<_, Proposal>(
            r#"
            SELECT id, listing_id, proposing_company_id, receiving_company_id,
                   quantity, frequency, price, message, transport, status,
                   created_at, responded_at
            FROM proposals
            WHERE receiving_company_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(company_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_accepted_matches(&self, company_id: Uuid) -> Result<Vec<AcceptedMatch>, Error> {
        sqlx::query_as::<_, AcceptedMatch>(
            r#"
            SELECT p.id,
                   p.listing_id,
                   p.proposing_company_id,
                   p.receiving_company_id,
                   CASE WHEN p.proposing_company_id = $1 THEN rc.name
                        ELSE pc.name
                   END AS counterpart_name,
                   p.responded_at,
                   ARRAY(
                       SELECT n.company_id
                       FROM notifications n
                       WHERE n.proposal_id = p.id
                         AND n.notification_type = 'match_confirmed'::notification_type
                         AND n.viewed = true
                   ) AS notified_company_ids
            FROM proposals p
            INNER JOIN companies pc ON pc.id = p.proposing_company_id
            INNER JOIN companies rc ON rc.id = p.receiving_company_id
            WHERE p.status = 'accepted'::proposal_status
              AND (p.proposing_company_id = $1 OR p.receiving_company_id = $1)
            ORDER BY p.responded_at DESC NULLS LAST
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn is_match_participant(
        &self,
        match_id: Uuid,
        company_id: Uuid,
    ) -> Result<bool, Error> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM proposals
                WHERE id = $1
                  AND status = 'accepted'::proposal_status
                  AND (proposing_company_id = $2 OR receiving_company_id = $2)
            )
            "#,
        )
        .bind(match_id)
        .bind(company_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
