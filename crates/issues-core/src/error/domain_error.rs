//! Domain errors - error types shared by the domain layer and its collaborators

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("issue {0} not found")]
    IssueNotFound(u64),

    #[error("comment {comment_id} not found in issue {issue_id}")]
    CommentNotFound { issue_id: u64, comment_id: u64 },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("{0}")]
    Validation(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("this page requires an authenticated user")]
    Unauthenticated,

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("storage error: {0}")]
    Storage(String),

    #[error("notification service error: {0}")]
    Notifications(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Shorthand for a validation failure
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Shorthand for a permission failure
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    /// Get an error code string for logs and responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::IssueNotFound(_) => "UNKNOWN_ISSUE",
            Self::CommentNotFound { .. } => "UNKNOWN_COMMENT",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::PermissionDenied(_) => "PERMISSION_DENIED",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Notifications(_) => "NOTIFICATIONS_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::IssueNotFound(_) | Self::CommentNotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an authorization error
    ///
    /// Both an anonymous caller and a caller lacking rights map to 401.
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::PermissionDenied(_))
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            Self::PermissionDenied(err.to_string())
        } else {
            Self::Storage(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(format!("malformed record: {err}"))
    }
}
