//! Timeline items - comments and events merged into one ordered sequence

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::{Comment, Event};

/// One entry in an issue's timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IssueItem {
    Comment(Comment),
    Event(Event),
}

impl IssueItem {
    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Self::Comment(c) => c.created_at,
            Self::Event(e) => e.created_at,
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            Self::Comment(c) => c.id,
            Self::Event(e) => e.id,
        }
    }
}

impl From<Comment> for IssueItem {
    fn from(c: Comment) -> Self {
        Self::Comment(c)
    }
}

impl From<Event> for IssueItem {
    fn from(e: Event) -> Self {
        Self::Event(e)
    }
}

/// Order items by creation time, ties broken by ID.
///
/// The sort is stable, so items equal on both keys keep their input order.
pub fn sort_items(items: &mut [IssueItem]) {
    items.sort_by_key(|item| (item.created_at(), item.id()));
}
