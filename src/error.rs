use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum HotelError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{message}")]
    Unauthorized { code: &'static str, message: String },

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("request body too large")]
    PayloadTooLarge,

    #[error("Too many requests, try again later")]
    TooManyRequests,

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Invalid mail address: {0}")]
    MailAddress(#[from] lettre::address::AddressError),

    #[error("Mail build error: {0}")]
    MailBuild(#[from] lettre::error::Error),

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl HotelError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            code: "UNAUTHORIZED",
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    fn is_mail_failure(&self) -> bool {
        matches!(
            self,
            HotelError::Smtp(_) | HotelError::MailAddress(_) | HotelError::MailBuild(_)
        )
    }
}

impl IntoResponse for HotelError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match &self {
            HotelError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            HotelError::Unauthorized { code, message } => {
                (StatusCode::UNAUTHORIZED, *code, message.clone())
            }
            HotelError::Token(_) => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Invalid or expired token".to_string(),
            ),
            HotelError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            HotelError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            HotelError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            HotelError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                self.to_string(),
            ),
            HotelError::TooManyRequests => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMIT",
                self.to_string(),
            ),
            e if e.is_mail_failure() => {
                error!(error = %e, "mail delivery failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MAIL_ERROR",
                    "Failed to send OTP email".to_string(),
                )
            }
            e => {
                error!(error = %e, "internal error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Server error".to_string(),
                )
            }
        };
        let body = ApiErrorBody {
            status: "error",
            code,
            message,
        };
        (status, Json(body)).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub status: &'static str,
    pub code: &'static str,
    pub message: String,
}
