use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::notificationmodel::Notification;

#[async_trait]
pub trait NotificationExt {
    async fn get_company_notifications(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<Notification>, Error>;

    async fn get_unviewed_notification_count(&self, company_id: Uuid) -> Result<i64, Error>;

    /// Marks the given notifications viewed, scoped to the company so one
    /// tenant can never flip another tenant's rows.
    async fn mark_notifications_viewed(
        &self,
        company_id: Uuid,
        notification_ids: &[Uuid],
    ) -> Result<u64, Error>;

    async fn mark_all_notifications_viewed(&self, company_id: Uuid) -> Result<u64, Error>;

    /// Targeted update limited to match-confirmed rows for exactly
    /// (proposal, company). Idempotent.
    async fn mark_match_notification_viewed(
        &self,
        proposal_id: Uuid,
        company_id: Uuid,
    ) -> Result<u64, Error>;
}

#[async_trait]
impl NotificationExt for DBClient {
    async fn get_company_notifications(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<Notification>, Error> {
        sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, company_id, proposal_id, notification_type, title, body,
                   viewed, created_at
            FROM notifications
            WHERE company_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_unviewed_notification_count(&self, company_id: Uuid) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM notifications
            WHERE company_id = $1 AND viewed = false
            "#,
        )
        .bind(company_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn mark_notifications_viewed(
        &self,
        company_id: Uuid,
        notification_ids: &[Uuid],
    ) -> Result<u64, Error> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET viewed = true
            WHERE company_id = $1 AND id = ANY($2)
            "#,
        )
        .bind(company_id)
        .bind(notification_ids)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn mark_all_notifications_viewed(&self, company_id: Uuid) -> Result<u64, Error> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET viewed = true
            WHERE company_id = $1 AND viewed = false
            "#,
        )
        .bind(company_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn mark_match_notification_viewed(
        &self,
        proposal_id: Uuid,
        company_id: Uuid,
    ) -> Result<u64, Error> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET viewed = true
            WHERE proposal_id = $1
              AND company_id = $2
              AND notification_type = 'match_confirmed'::notification_type
            "#,
        )
        .bind(proposal_id)
        .bind(company_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
