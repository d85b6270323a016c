use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::chatmodel::{ChatLastSeen, ChatMessage};

#[async_trait]
pub trait ChatExt {
    async fn save_chat_message(
        &self,
        match_id: Uuid,
        sender_company_id: Uuid,
        content: String,
    ) -> Result<ChatMessage, Error>;

    /// Full history of a match, ascending by id (= insertion order).
    async fn get_chat_history(&self, match_id: Uuid) -> Result<Vec<ChatMessage>, Error>;

    /// Upsert of the last-seen marker. The marker never moves backwards:
    /// concurrent acknowledgments keep the highest id either of them saw.
    async fn upsert_last_seen(
        &self,
        match_id: Uuid,
        company_id: Uuid,
        last_seen_message_id: i64,
    ) -> Result<ChatLastSeen, Error>;

    /// 0 when the company never acknowledged anything in this match.
    async fn get_last_seen(&self, match_id: Uuid, company_id: Uuid) -> Result<i64, Error>;

    /// Count of messages after the company's marker, excluding its own.
    async fn get_unread_count(&self, match_id: Uuid, company_id: Uuid) -> Result<i64, Error>;
}

#[async_trait]
impl ChatExt for DBClient {
    async fn save_chat_message(
        &self,
        match_id: Uuid,
        sender_company_id: Uuid,
        content: String,
    ) -> Result<ChatMessage, Error> {
        sqlx::query_as::<_, ChatMessage>(
            r#"
            INSERT INTO chat_messages (match_id, sender_company_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, match_id, sender_company_id, content, created_at
            "#,
        )
        .bind(match_id)
        .bind(sender_company_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_chat_history(&self, match_id: Uuid) -> Result<Vec<ChatMessage>, Error> {
        sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT id, match_id, sender_company_id, content, created_at
            FROM chat_messages
            WHERE match_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(match_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn upsert_last_seen(
        &self,
        match_id: Uuid,
        company_id: Uuid,
        last_seen_message_id: i64,
    ) -> Result<ChatLastSeen, Error> {
        sqlx::query_as::<_, ChatLastSeen>(
            r#"
            INSERT INTO chat_last_seen (match_id, company_id, last_seen_message_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (match_id, company_id)
            DO UPDATE SET
                last_seen_message_id =
                    GREATEST(chat_last_seen.last_seen_message_id, EXCLUDED.last_seen_message_id),
                updated_at = NOW()
            RETURNING match_id, company_id, last_seen_message_id, updated_at
            "#,
        )
        .bind(match_id)
        .bind(company_id)
        .bind(last_seen_message_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_last_seen(&self, match_id: Uuid, company_id: Uuid) -> Result<i64, Error> {
        let last_seen = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT last_seen_message_id
            FROM chat_last_seen
            WHERE match_id = $1 AND company_id = $2
            "#,
        )
        .bind(match_id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(last_seen.unwrap_or(0))
    }

    async fn get_unread_count(&self, match_id: Uuid, company_id: Uuid) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM chat_messages m
            WHERE m.match_id = $1
              AND m.sender_company_id != $2
              AND m.id > COALESCE(
                  (SELECT last_seen_message_id
                   FROM chat_last_seen
                   WHERE match_id = $1 AND company_id = $2),
                  0)
            "#,
        )
        .bind(match_id)
        .bind(company_id)
        .fetch_one(&self.pool)
        .await
    }
}
