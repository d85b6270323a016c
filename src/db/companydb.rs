use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::companymodel::Company;

#[async_trait]
pub trait CompanyExt {
    async fn get_company(
        &self,
        company_id: Option<Uuid>,
        email: Option<&str>,
        cnpj: Option<&str>,
    ) -> Result<Option<Company>, Error>;

    async fn save_company(
        &self,
        name: String,
        email: String,
        cnpj: String,
        address: String,
        city: String,
        state: String,
        password: String,
    ) -> Result<Company, Error>;
}

#[async_trait]
impl CompanyExt for DBClient {
    async fn get_company(
        &self,
        company_id: Option<Uuid>,
        email: Option<&str>,
        cnpj: Option<&str>,
    ) -> Result<Option<Company>, Error> {
        let mut company: Option<Company> = None;

        if let Some(company_id) = company_id {
            company = sqlx::query_as::<_, Company>(
                r#"
                SELECT id, name, email, cnpj, address, city, state, password,
                       created_at, updated_at
                FROM companies
                WHERE id = $1
                "#,
            )
            .bind(company_id)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(email) = email {
            company = sqlx::query_as::<_, Company>(
                r#"
                SELECT id, name, email, cnpj, address, city, state, password,
                       created_at, updated_at
                FROM companies
                WHERE email = $1
                "#,
            )
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(cnpj) = cnpj {
            company = sqlx::query_as::<_, Company>(
                r#"
                SELECT id, name, email, cnpj, address, city, state, password,
                       created_at, updated_at
                FROM companies
                WHERE cnpj = $1
                "#,
            )
            .bind(cnpj)
            .fetch_optional(&self.pool)
            .await?;
        }

        Ok(company)
    }

    async fn save_company(
        &self,
        name: String,
        email: String,
        cnpj: String,
        address: String,
        city: String,
        state: String,
        password: String,
    ) -> Result<Company, Error> {
        sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (name, email, cnpj, address, city, state, password)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, email, cnpj, address, city, state, password,
                      created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(cnpj)
        .bind(address)
        .bind(city)
        .bind(state)
        .bind(password)
        .fetch_one(&self.pool)
        .await
    }
}
