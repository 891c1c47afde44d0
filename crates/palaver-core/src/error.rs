//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all layers of Palaver.
///
/// Covers domain errors (validation, not-found), authentication errors,
/// and infrastructure errors (database, cache, media storage). Cache and
/// notifier errors exist in the taxonomy but are swallowed at their call
/// sites; they never decide the outcome of a request on their own.
#[derive(Error, Debug)]
pub enum PalaverError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    // ============ Authentication Errors ============
    /// Unauthorized access
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Invalid token
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Media storage error
    #[error("Media storage error: {0}")]
    Media(String),

    /// Real-time delivery error
    #[error("Realtime delivery error: {0}")]
    Realtime(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PalaverError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Unauthorized(_) | Self::InvalidToken(_) => 401,
            Self::Database(_)
            | Self::Cache(_)
            | Self::Media(_)
            | Self::Realtime(_)
            | Self::Configuration(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::InvalidToken(_) => "INVALID_TOKEN",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Media(_) => "MEDIA_ERROR",
            Self::Realtime(_) => "REALTIME_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// True when the display message is safe to show to an API caller.
    ///
    /// Infrastructure errors are reported with a generic message so that
    /// connection strings and query text never leak through the HTTP surface.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Validation(_) | Self::Unauthorized(_) | Self::InvalidToken(_)
        )
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an unauthorized error.
    #[must_use]
    pub fn unauthorized<T: Into<String>>(message: T) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for PalaverError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for PalaverError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `PalaverError`.
    ///
    /// Non-user-facing errors are collapsed to a generic message.
    #[must_use]
    pub fn from_error(error: &PalaverError) -> Self {
        let message = if error.is_user_facing() {
            error.to_string()
        } else {
            "Internal server error".to_string()
        };
        Self {
            code: error.error_code().to_string(),
            message,
        }
    }
}

impl From<&PalaverError> for ErrorResponse {
    fn from(error: &PalaverError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(PalaverError::not_found("User", 1).status_code(), 404);
        assert_eq!(PalaverError::validation("empty message").status_code(), 400);
        assert_eq!(PalaverError::unauthorized("no token").status_code(), 401);
        assert_eq!(PalaverError::InvalidToken("bad".to_string()).status_code(), 401);
        assert_eq!(PalaverError::Database("down".to_string()).status_code(), 500);
        assert_eq!(PalaverError::Cache("down".to_string()).status_code(), 500);
        assert_eq!(PalaverError::Media("full".to_string()).status_code(), 500);
        assert_eq!(PalaverError::internal("oops").status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(PalaverError::not_found("User", 1).error_code(), "NOT_FOUND");
        assert_eq!(PalaverError::validation("x").error_code(), "VALIDATION_ERROR");
        assert_eq!(PalaverError::Cache("x".to_string()).error_code(), "CACHE_ERROR");
        assert_eq!(PalaverError::internal("x").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_error_constructors() {
        let not_found = PalaverError::not_found("User", "123");
        assert!(not_found.to_string().contains("User"));
        assert!(not_found.to_string().contains("123"));

        let validation = PalaverError::validation("text or image is required");
        assert!(validation.to_string().contains("text or image is required"));
    }

    #[test]
    fn test_error_response_hides_internal_detail() {
        let err = PalaverError::Database("connection refused at 10.0.0.1:5432".to_string());
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "DATABASE_ERROR");
        assert_eq!(response.message, "Internal server error");
    }

    #[test]
    fn test_error_response_keeps_user_facing_detail() {
        let err = PalaverError::validation("cannot send messages to yourself");
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "VALIDATION_ERROR");
        assert!(response.message.contains("cannot send messages to yourself"));
    }
}
