//! Issue entity

use serde::{Deserialize, Serialize};

use crate::entities::{Comment, Label};
use crate::value_objects::IssueState;

/// Issue entity.
///
/// The opening comment is embedded: it holds the issue's author, creation
/// time, body and reactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub state: IssueState,
    pub title: String,
    pub comment: Comment,
    pub labels: Vec<Label>,
    /// Number of comments beyond the opening one
    pub replies: u32,
    /// Request-scoped; only ever set by the view-state composer
    #[serde(default)]
    pub unread: bool,
}

impl Issue {
    pub fn new(id: u64, title: impl Into<String>, comment: Comment) -> Self {
        Self {
            id,
            state: IssueState::Open,
            title: title.into(),
            comment,
            labels: Vec::new(),
            replies: 0,
            unread: false,
        }
    }
}
