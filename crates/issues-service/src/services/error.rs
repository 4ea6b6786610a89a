//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use issues_common::{domain_status, AppError};
use issues_core::DomainError;
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or collaborator failure
    Domain(DomainError),

    /// Application error (auth, configuration)
    App(AppError),

    /// The embedding application left out a required mount value
    Configuration(String),

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Validation error
    Validation(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::Configuration(msg) => write!(f, "configuration error: {msg}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::Validation(msg) => write!(f, "{msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => domain_status(e),
            Self::App(e) => e.status_code(),
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Configuration(_) | Self::Internal(_) => 500,
        }
    }

    /// Get the error code for logs
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == 404
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error() {
        let err = ServiceError::configuration("no repository mounted");
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
        assert!(err.to_string().contains("no repository mounted"));
    }

    #[test]
    fn test_not_found_error() {
        let err = ServiceError::not_found("Issue", "42");
        assert_eq!(err.status_code(), 404);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Issue not found: 42");
    }

    #[test]
    fn test_domain_mapping() {
        assert_eq!(ServiceError::from(DomainError::IssueNotFound(1)).status_code(), 404);
        assert_eq!(ServiceError::from(DomainError::Unauthenticated).status_code(), 401);
        assert_eq!(ServiceError::from(DomainError::validation("bad state")).status_code(), 400);
        assert_eq!(ServiceError::from(DomainError::Storage("disk".into())).status_code(), 500);
    }

    #[test]
    fn test_validation_message_is_plain() {
        assert_eq!(ServiceError::validation("bad state").to_string(), "bad state");
    }
}
