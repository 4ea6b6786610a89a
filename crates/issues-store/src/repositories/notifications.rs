//! In-memory notification index

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

use issues_core::{
    Notification, NotificationFilter, NotificationIndex, RepoResult, RequestContext, UserDirectory,
    UserSpec,
};

/// Unread markers per recipient.
///
/// `list` answers for whoever the [`UserDirectory`] says is calling; an
/// anonymous caller has no notifications.
pub struct MemoryNotificationIndex {
    users: Arc<dyn UserDirectory>,
    entries: RwLock<Vec<(UserSpec, Notification)>>,
}

impl MemoryNotificationIndex {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self {
            users,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Mark a thread unread for `recipient`. Duplicate markers are ignored.
    pub fn notify(&self, recipient: &UserSpec, notification: Notification) {
        let mut entries = self.entries.write();
        let exists = entries
            .iter()
            .any(|(user, n)| user == recipient && same_thread(n, &notification));
        if !exists {
            debug!(thread_id = notification.thread_id, "notification added");
            entries.push((recipient.clone(), notification));
        }
    }
}

fn same_thread(a: &Notification, b: &Notification) -> bool {
    a.repo == b.repo && a.thread_type == b.thread_type && a.thread_id == b.thread_id
}

#[async_trait]
impl NotificationIndex for MemoryNotificationIndex {
    async fn list(
        &self,
        ctx: &RequestContext,
        filter: &NotificationFilter,
    ) -> RepoResult<Vec<Notification>> {
        let user = self.users.get_authenticated(ctx).await?;
        if user.is_anonymous() {
            return Ok(Vec::new());
        }
        let spec = user.spec();
        Ok(self
            .entries
            .read()
            .iter()
            .filter(|(recipient, n)| *recipient == spec && n.repo == filter.repo)
            .map(|(_, n)| n.clone())
            .collect())
    }
}

impl std::fmt::Debug for MemoryNotificationIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryNotificationIndex")
            .field("entries", &self.entries.read().len())
            .finish_non_exhaustive()
    }
}
