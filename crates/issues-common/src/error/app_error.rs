//! Application error types
//!
//! Errors raised outside the domain: configuration, authentication and
//! wrapped infrastructure failures.

use issues_core::DomainError;
use std::fmt;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("this page requires an authenticated user")]
    MissingAuth,

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Validation errors
    #[error("{0}")]
    Validation(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::InvalidToken | Self::TokenExpired | Self::MissingAuth => 401,
            Self::Config(_) | Self::Internal(_) => 500,
            Self::Domain(e) => domain_status(e),
        }
    }

    /// Get error code for logs and responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::MissingAuth => "MISSING_AUTH",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code())
    }

    #[must_use]
    pub fn config(msg: impl fmt::Display) -> Self {
        Self::Config(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Status code for a domain error; shared by every layer that wraps one
#[must_use]
pub fn domain_status(e: &DomainError) -> u16 {
    if e.is_not_found() {
        404
    } else if e.is_authorization() {
        401
    } else if e.is_validation() {
        400
    } else {
        500
    }
}

impl From<AppError> for DomainError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Domain(e) => e,
            AppError::InvalidToken | AppError::TokenExpired | AppError::MissingAuth => {
                DomainError::Unauthenticated
            }
            AppError::Validation(msg) => DomainError::Validation(msg),
            other => DomainError::Internal(other.to_string()),
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InvalidToken.status_code(), 401);
        assert_eq!(AppError::MissingAuth.status_code(), 401);
        assert_eq!(AppError::config("no repo").status_code(), 500);
        assert_eq!(AppError::Validation("x".into()).status_code(), 400);
        assert_eq!(AppError::Domain(DomainError::IssueNotFound(1)).status_code(), 404);
        assert_eq!(
            AppError::Domain(DomainError::permission_denied("x")).status_code(),
            401
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::TokenExpired.error_code(), "TOKEN_EXPIRED");
        assert_eq!(
            AppError::Domain(DomainError::IssueNotFound(1)).error_code(),
            "UNKNOWN_ISSUE"
        );
    }

    #[test]
    fn test_is_server_error() {
        assert!(AppError::config("x").is_server_error());
        assert!(!AppError::InvalidToken.is_server_error());
    }

    #[test]
    fn test_into_domain_error() {
        assert!(matches!(
            DomainError::from(AppError::TokenExpired),
            DomainError::Unauthenticated
        ));
        assert!(DomainError::from(AppError::Validation("bad".into())).is_validation());
    }

    #[test]
    fn test_missing_auth_message() {
        assert_eq!(
            AppError::MissingAuth.to_string(),
            "this page requires an authenticated user"
        );
    }
}
