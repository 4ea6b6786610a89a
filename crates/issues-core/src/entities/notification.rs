//! Notification entity - an unread marker on some thread of a repository

use serde::{Deserialize, Serialize};

use crate::value_objects::RepoSpec;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub repo: RepoSpec,
    /// Kind of thread, e.g. `issues`; must match the store's thread type
    pub thread_type: String,
    pub thread_id: u64,
    pub title: String,
}

/// Selects notifications for one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationFilter {
    pub repo: RepoSpec,
}
