//! Rendering errors

use thiserror::Error;

/// Errors raised while rendering templates or encoding fragments
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template {0:?} not found")]
    NotFound(String),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("fragment encoding failed: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    #[error("context serialization failed: {0}")]
    Context(#[from] serde_json::Error),
}

impl RenderError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Template(_) | Self::Encode(_) | Self::Context(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "TEMPLATE_NOT_FOUND",
            Self::Template(_) => "TEMPLATE_ERROR",
            Self::Encode(_) => "FRAGMENT_ENCODING_ERROR",
            Self::Context(_) => "CONTEXT_ERROR",
        }
    }
}

pub type RenderResult<T> = Result<T, RenderError>;
