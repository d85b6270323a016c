use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    models::notificationmodel::{Notification, NotificationType},
    service::error::ServiceError,
};

/// Composes and stores proposal lifecycle notifications. Writes go through
/// whatever executor the caller hands in, which lets the proposal workflow
/// put them inside its own transaction.
#[derive(Debug, Clone, Default)]
pub struct NotificationService;

impl NotificationService {
    pub fn new() -> Self {
        Self
    }

    /// Stores one notification row. The executor is passed in so callers
    /// can run this inside the transaction that produced the event; a
    /// proposal update and its notifications commit or roll back together.
    pub async fn store<'e, E>(
        &self,
        executor: E,
        recipient_company_id: Uuid,
        proposal_id: Uuid,
        notification_type: NotificationType,
        title: String,
        body: String,
    ) -> Result<Notification, ServiceError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications
                (company_id, proposal_id, notification_type, title, body)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, company_id, proposal_id, notification_type, title, body,
                      viewed, created_at
            "#,
        )
        .bind(recipient_company_id)
        .bind(proposal_id)
        .bind(notification_type)
        .bind(title)
        .bind(body)
        .fetch_one(executor)
        .await?;

        tracing::info!(
            "notification stored: {} for company {} (proposal {})",
            notification_type.to_str(),
            recipient_company_id,
            proposal_id
        );

        Ok(notification)
    }

    pub fn compose_new_proposal(company_name: &str, waste_type: &str) -> (String, String) {
        (
            "New proposal received".to_string(),
            format!(
                "{} sent a proposal for your listing \"{}\"",
                company_name, waste_type
            ),
        )
    }

    pub fn compose_proposal_accepted(company_name: &str, waste_type: &str) -> (String, String) {
        (
            "Proposal accepted".to_string(),
            format!(
                "{} accepted your proposal for \"{}\"",
                company_name, waste_type
            ),
        )
    }

    pub fn compose_proposal_rejected(company_name: &str, waste_type: &str) -> (String, String) {
        (
            "Proposal rejected".to_string(),
            format!(
                "{} rejected your proposal for \"{}\"",
                company_name, waste_type
            ),
        )
    }

    pub fn compose_match_confirmed(company_name: &str) -> (String, String) {
        (
            "It's a match!".to_string(),
            format!("You and {} can now chat about the details", company_name),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composed_texts_mention_counterpart() {
        let (title, body) =
            NotificationService::compose_new_proposal("Metalurgica Sul", "steel shavings");
        assert_eq!(title, "New proposal received");
        assert!(body.contains("Metalurgica Sul"));
        assert!(body.contains("steel shavings"));

        let (_, body) = NotificationService::compose_match_confirmed("Quimica Norte");
        assert!(body.contains("Quimica Norte"));
    }
}
