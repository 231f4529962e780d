//! Centralized error handling.
//!
//! Provides a unified error type for the whole crate, with a numeric
//! status classifier that the response envelope (and any outer transport
//! layer) maps directly to an outward status code.

use sea_orm::DbErr;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Not Found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    // Input rejected before reaching the store
    #[error("{0}")]
    BadRequest(String),

    // The registry never established a connection
    #[error("database connection has not been established")]
    ConnectionUnavailable,

    // Descriptor construction rejected (programmer error)
    #[error("invalid entity descriptor: {0}")]
    Descriptor(String),

    // Store failures
    #[error(transparent)]
    Database(#[from] DbErr),

    // Internal
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Numeric status classifier used by the response envelope.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::NotFound => 404,
            AppError::Conflict(_) => 409,
            AppError::BadRequest(_) => 400,
            AppError::ConnectionUnavailable => 503,
            AppError::Descriptor(_) | AppError::Database(_) | AppError::Internal(_) => 500,
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn descriptor(msg: impl Into<String>) -> Self {
        AppError::Descriptor(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(AppError::NotFound.status_code(), 404);
        assert_eq!(AppError::Conflict("x".into()).status_code(), 409);
        assert_eq!(AppError::bad_request("x").status_code(), 400);
        assert_eq!(AppError::ConnectionUnavailable.status_code(), 503);
        assert_eq!(AppError::internal("x").status_code(), 500);
    }

    #[test]
    fn db_errors_convert_and_classify_as_internal() {
        let err: AppError = DbErr::Custom("boom".into()).into();
        assert_eq!(err.status_code(), 500);
    }
}
