//! Event entity - a state, title or label change recorded on an issue

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::{Label, User};

/// Kind of timeline event
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    Reopened,
    Closed,
    Renamed,
    Labeled,
    Unlabeled,
    Other(String),
}

impl EventKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Reopened => "reopened",
            Self::Closed => "closed",
            Self::Renamed => "renamed",
            Self::Labeled => "labeled",
            Self::Unlabeled => "unlabeled",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for EventKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "reopened" => Self::Reopened,
            "closed" => Self::Closed,
            "renamed" => Self::Renamed,
            "labeled" => Self::Labeled,
            "unlabeled" => Self::Unlabeled,
            _ => Self::Other(s),
        }
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Title change carried by a `Renamed` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

/// Event entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub actor: User,
    pub created_at: DateTime<Utc>,
    pub kind: EventKind,
    pub rename: Option<Rename>,
    pub label: Option<Label>,
}

impl Event {
    pub fn new(id: u64, actor: User, kind: EventKind) -> Self {
        Self {
            id,
            actor,
            created_at: Utc::now(),
            kind,
            rename: None,
            label: None,
        }
    }

    pub fn renamed(id: u64, actor: User, from: String, to: String) -> Self {
        Self {
            rename: Some(Rename { from, to }),
            ..Self::new(id, actor, EventKind::Renamed)
        }
    }
}
