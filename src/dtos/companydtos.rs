use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::models::companymodel::Company;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct RegisterCompanyDto {
    #[validate(length(min = 1, message = "Company name is required"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "CNPJ is required"))]
    pub cnpj: String,

    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,

    #[validate(length(min = 2, max = 2, message = "State must be a two-letter code"))]
    pub state: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,

    #[validate(
        length(min = 1, message = "Confirm Password is required"),
        must_match(other = "password", message = "passwords do not match")
    )]
    #[serde(rename = "passwordConfirm")]
    pub password_confirm: String,
}

impl RegisterCompanyDto {
    /// CNPJ arrives either as 14 bare digits or punctuated
    /// (`12.345.678/0001-90`).
    pub fn validate_cnpj(&self) -> Result<(), ValidationError> {
        let cnpj_regex =
            regex::Regex::new(r"^(\d{14}|\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2})$")
                .map_err(|_| ValidationError::new("invalid_cnpj_regex"))?;

        if !cnpj_regex.is_match(&self.cnpj) {
            let mut error = ValidationError::new("invalid_cnpj");
            error.message = Some(Cow::from(
                "CNPJ must have 14 digits (e.g., 12.345.678/0001-90)",
            ));
            return Err(error);
        }
        Ok(())
    }

    /// Normalized digits-only form used for storage and uniqueness.
    pub fn cnpj_digits(&self) -> String {
        self.cnpj.chars().filter(|c| c.is_ascii_digit()).collect()
    }
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginCompanyDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,
    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterCompanyDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub cnpj: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl FilterCompanyDto {
    pub fn filter_company(company: &Company) -> Self {
        FilterCompanyDto {
            id: company.id.to_string(),
            name: company.name.clone(),
            email: company.email.clone(),
            cnpj: company.cnpj.clone(),
            address: company.address.clone(),
            city: company.city.clone(),
            state: company.state.clone(),
            created_at: company.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompanyData {
    pub company: FilterCompanyDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompanyResponseDto {
    pub status: String,
    pub data: CompanyData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompanyLoginResponseDto {
    pub status: String,
    pub token: String,
    pub company: FilterCompanyDto,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_register() -> RegisterCompanyDto {
        RegisterCompanyDto {
            name: "Metalurgica Sul".to_string(),
            email: "contato@metsul.com.br".to_string(),
            cnpj: "12.345.678/0001-90".to_string(),
            address: "Av. Industrial 100".to_string(),
            city: "Porto Alegre".to_string(),
            state: "RS".to_string(),
            password: "secret1".to_string(),
            password_confirm: "secret1".to_string(),
        }
    }

    #[test]
    fn register_dto_accepts_valid_input() {
        let dto = valid_register();
        assert!(dto.validate().is_ok());
        assert!(dto.validate_cnpj().is_ok());
        assert_eq!(dto.cnpj_digits(), "12345678000190");
    }

    #[test]
    fn register_dto_rejects_mismatched_passwords() {
        let mut dto = valid_register();
        dto.password_confirm = "other12".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn register_dto_rejects_malformed_cnpj() {
        let mut dto = valid_register();
        dto.cnpj = "123".to_string();
        assert!(dto.validate_cnpj().is_err());
    }

    #[test]
    fn bare_digit_cnpj_is_accepted() {
        let mut dto = valid_register();
        dto.cnpj = "12345678000190".to_string();
        assert!(dto.validate_cnpj().is_ok());
    }

    #[test]
    fn login_dto_requires_email_shape() {
        let dto = LoginCompanyDto {
            email: "not-an-email".to_string(),
            password: "secret1".to_string(),
        };
        assert!(dto.validate().is_err());
    }
}
