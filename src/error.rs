use axum::{http::StatusCode, response::IntoResponse, Json};
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum ErrorMessage {
    EmailExist,
    CnpjExist,
    WrongCredentials,
    TokenNotProvided,
    InvalidToken,
    CompanyNoLongerExist,
    ListingNotFound,
    ProposalNotFound,
    OwnProposalForbidden,
    PendingProposalExists,
    NotMatchParticipant,
}

impl ToString for ErrorMessage {
    fn to_string(&self) -> String {
        self.to_str().to_owned()
    }
}

impl ErrorMessage {
    fn to_str(&self) -> &str {
        match self {
            ErrorMessage::EmailExist => "A company with this email already exists",
            ErrorMessage::CnpjExist => "A company with this CNPJ already exists",
            ErrorMessage::WrongCredentials => "Email or password is wrong",
            ErrorMessage::TokenNotProvided => "You are not logged in, please provide a token",
            ErrorMessage::InvalidToken => "Authentication token is invalid or expired",
            ErrorMessage::CompanyNoLongerExist => {
                "Company belonging to this token no longer exists"
            }
            ErrorMessage::ListingNotFound => "Listing not found",
            ErrorMessage::ProposalNotFound => "Proposal not found",
            ErrorMessage::OwnProposalForbidden => "You cannot send a proposal on your own listing",
            ErrorMessage::PendingProposalExists => {
                "A pending proposal for this listing already exists"
            }
            ErrorMessage::NotMatchParticipant => "You are not a participant of this match",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpError {
    pub message: String,
    pub status: StatusCode,
}

impl HttpError {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        HttpError {
            message: message.into(),
            status,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::BAD_REQUEST)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::UNAUTHORIZED)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::NOT_FOUND)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::CONFLICT)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn into_http_response(self) -> axum::response::Response {
        let json_response = Json(serde_json::json!({
            "status": "fail",
            "message": self.message
        }));

        (self.status, json_response).into_response()
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HttpError: message: {}, status: {}",
            self.message, self.status
        )
    }
}

impl std::error::Error for HttpError {}

impl IntoResponse for HttpError {
    fn into_response(self) -> axum::response::Response {
        self.into_http_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_map_to_expected_status() {
        assert_eq!(HttpError::bad_request("x").status, StatusCode::BAD_REQUEST);
        assert_eq!(HttpError::unauthorized("x").status, StatusCode::UNAUTHORIZED);
        assert_eq!(HttpError::not_found("x").status, StatusCode::NOT_FOUND);
        assert_eq!(HttpError::conflict("x").status, StatusCode::CONFLICT);
        assert_eq!(
            HttpError::server_error("x").status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_message_renders_text() {
        assert_eq!(
            ErrorMessage::PendingProposalExists.to_string(),
            "A pending proposal for this listing already exists"
        );
    }
}
