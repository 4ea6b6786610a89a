//! Path parameter extractors
//!
//! Issue and comment IDs arrive as strings and are parsed here, so a
//! non-numeric segment is a 400 rather than a routing miss.

use serde::Deserialize;

use crate::response::ApiError;

fn parse_id(raw: &str, what: &str) -> Result<u64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {what} format")))
}

/// Path parameters with an issue id
#[derive(Debug, Deserialize)]
pub struct IssuePath {
    pub id: String,
}

impl IssuePath {
    /// Parse id as an issue ID
    pub fn id(&self) -> Result<u64, ApiError> {
        parse_id(&self.id, "issue id")
    }
}

/// Path parameters with an issue id and a comment id
#[derive(Debug, Deserialize)]
pub struct CommentPath {
    pub id: String,
    pub comment_id: String,
}

impl CommentPath {
    /// Parse id as an issue ID
    pub fn id(&self) -> Result<u64, ApiError> {
        parse_id(&self.id, "issue id")
    }

    /// Parse comment_id as a comment ID
    pub fn comment_id(&self) -> Result<u64, ApiError> {
        parse_id(&self.comment_id, "comment id")
    }
}

/// Path parameters for template previews
#[derive(Debug, Deserialize)]
pub struct MockPath {
    pub template: String,
}
