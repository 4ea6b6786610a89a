//! Comment entity - the opening post of an issue or a reply to it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Reaction, User};

/// Who last edited a comment body, and when
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edited {
    pub by: User,
    pub at: DateTime<Utc>,
}

/// Comment entity.
///
/// ID 0 is the opening comment of its issue; replies count up from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub user: User,
    pub created_at: DateTime<Utc>,
    pub edited: Option<Edited>,
    /// Raw markdown
    pub body: String,
    pub reactions: Vec<Reaction>,
}

impl Comment {
    pub fn new(id: u64, user: User, body: impl Into<String>) -> Self {
        Self {
            id,
            user,
            created_at: Utc::now(),
            edited: None,
            body: body.into(),
            reactions: Vec::new(),
        }
    }

    #[inline]
    pub fn is_opening(&self) -> bool {
        self.id == 0
    }

    /// Replace the body and record the edit
    pub fn edit_body(&mut self, body: String, by: &User) {
        self.body = body;
        self.edited = Some(Edited {
            by: by.clone(),
            at: Utc::now(),
        });
    }
}
