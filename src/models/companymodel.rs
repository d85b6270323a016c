use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Company {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub cnpj: String,
    pub address: String,
    pub city: String,
    pub state: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
