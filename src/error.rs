//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. Every Task Service and Session Issuer failure is mapped to one
//! of its variants before crossing the API boundary, so nothing propagates to
//! a client as a raw store or crypto error.
//!
//! `AppError` implements `actix_web::error::ResponseError` to convert
//! application errors into HTTP responses with `{"message": ...}` JSON bodies.
//! `From` implementations for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error`, and `bcrypt::BcryptError` allow conversion
//! with the `?` operator.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Client input is malformed, missing, or out of range (HTTP 400).
    /// Covers missing task fields, unparseable dates, past due dates on
    /// creation, invalid sort fields, and duplicate registration emails.
    Validation(String),
    /// Authentication failed or is missing (HTTP 401).
    /// The login message is intentionally generic so it never reveals
    /// whether an email is registered.
    Unauthorized(String),
    /// The caller is authenticated but not permitted (HTTP 403).
    /// Raised when a non-admin touches a task they do not own.
    Forbidden(String),
    /// The requested resource was not found (HTTP 404).
    /// Malformed ids and missing records share one message so the response
    /// carries no existence signal.
    NotFound(String),
    /// An unexpected server-side failure (HTTP 500).
    Internal(String),
    /// A database failure (HTTP 500). Wraps errors from `sqlx`.
    Database(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::Database(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(msg) => HttpResponse::BadRequest().json(json!({
                "message": msg
            })),
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "message": msg
            })),
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(json!({
                "message": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "message": msg
            })),
            // Internal detail is logged server-side only; the client always
            // receives the same generic body.
            AppError::Internal(msg) | AppError::Database(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "message": "Server error"
                }))
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Task not found".into()),
            _ => AppError::Database(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Invalid access token: {}", error))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let error = AppError::Validation("All fields are required".into());
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::Unauthorized("Invalid email or password".into());
        assert_eq!(error.error_response().status(), 401);

        let error = AppError::Forbidden("Not allowed".into());
        assert_eq!(error.error_response().status(), 403);

        let error = AppError::NotFound("Task not found".into());
        assert_eq!(error.error_response().status(), 404);

        let error = AppError::Internal("boom".into());
        assert_eq!(error.error_response().status(), 500);
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let error: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(error, AppError::NotFound(_)));
    }

    #[test]
    fn test_jwt_error_maps_to_unauthorized() {
        use jsonwebtoken::{decode, DecodingKey, Validation};

        let jwt_error = decode::<serde_json::Value>(
            "definitely-not-a-jwt",
            &DecodingKey::from_secret(b"secret"),
            &Validation::default(),
        )
        .unwrap_err();

        let error: AppError = jwt_error.into();
        match error {
            AppError::Unauthorized(msg) => assert!(msg.contains("Invalid access token")),
            other => panic!("Expected Unauthorized, got {:?}", other),
        }
    }
}
