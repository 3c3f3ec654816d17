//! # Command Errors
//!
//! Every command returns `Result<T, ApiError>`. The bridge sends the error
//! to the front end as `{"code": "...", "message": "..."}`.
//!
//! ```text
//! ValidationError ─┐
//! CoreError ───────┼──► ApiError { code, message } ──► {"id":..,"error":{..}}
//! DbError ─────────┘          │
//!                             └── storage detail goes to error!, not the shopper
//! ```
//!
//! | Code               | Raised by                                        |
//! |--------------------|--------------------------------------------------|
//! | `NOT_FOUND`        | unknown product, account or command              |
//! | `VALIDATION_ERROR` | form input, quantity, bad arguments, taken email |
//! | `AUTH_ERROR`       | wrong email/password                             |
//! | `CHECKOUT_ERROR`   | empty bag, order placed before Review            |
//! | `DATABASE_ERROR`   | SQLite failures                                  |
//! | `INTERNAL`         | storage I/O, hashing, response encoding          |

use serde::Serialize;
use tracing::error;

use santos_core::{CoreError, ValidationError};
use santos_db::DbError;

/// Error sent back for a failed command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub code: ErrorCode,
    /// Shown to the shopper as is.
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    DatabaseError,
    AuthError,
    CheckoutError,
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(what: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", what, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::AuthError, message)
    }

    pub fn checkout(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CheckoutError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    fn database(message: &str) -> Self {
        ApiError::new(ErrorCode::DatabaseError, message)
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::Duplicate { field, value } => {
                ApiError::validation(format!("An account with {} '{}' already exists", field, value))
            }
            DbError::Busy => ApiError::database("The store is busy, please try again"),
            DbError::Connect(_) | DbError::Migrate(_) | DbError::Query(_) => {
                error!(error = %err, "Database failure");
                ApiError::database("Database operation failed")
            }
            DbError::Json(_) => {
                error!(error = %err, "Stored catalog data is unreadable");
                ApiError::database("Stored data is unreadable")
            }
            DbError::Io(_) | DbError::InvalidKey(_) => {
                error!(error = %err, "Storage failure");
                ApiError::internal("Storage unavailable")
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::checkout(err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;
