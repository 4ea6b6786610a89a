//! Service context - dependency container for services
//!
//! Holds the issue store and the optional collaborators the composer and
//! the use cases consult.

use std::sync::Arc;
use tracing::error;

use issues_core::{
    IssueStore, Mount, NotificationIndex, RepoSpec, RequestContext, User, UserDirectory,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// - the [`IssueStore`] (required)
/// - a [`UserDirectory`]; without one every viewer is anonymous
/// - a [`NotificationIndex`]; without one no issue is ever unread
#[derive(Clone)]
pub struct ServiceContext {
    issue_store: Arc<dyn IssueStore>,
    users: Option<Arc<dyn UserDirectory>>,
    notifications: Option<Arc<dyn NotificationIndex>>,
}

impl ServiceContext {
    pub fn new(
        issue_store: Arc<dyn IssueStore>,
        users: Option<Arc<dyn UserDirectory>>,
        notifications: Option<Arc<dyn NotificationIndex>>,
    ) -> Self {
        Self {
            issue_store,
            users,
            notifications,
        }
    }

    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    /// Get the issue store
    pub fn issue_store(&self) -> &dyn IssueStore {
        self.issue_store.as_ref()
    }

    /// Get the user directory, if configured
    pub fn users(&self) -> Option<&dyn UserDirectory> {
        self.users.as_deref()
    }

    /// Get the notification index, if configured
    pub fn notifications(&self) -> Option<&dyn NotificationIndex> {
        self.notifications.as_deref()
    }

    /// Resolve the viewer. Without a user directory this is the anonymous user.
    pub async fn current_user(&self, request: &RequestContext) -> ServiceResult<User> {
        match self.users() {
            Some(users) => Ok(users.get_authenticated(request).await?),
            None => Ok(User::anonymous()),
        }
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("issue_store", &"dyn IssueStore")
            .field("users", &self.users.is_some())
            .field("notifications", &self.notifications.is_some())
            .finish()
    }
}

/// Both mount values, or a configuration error naming the missing one
pub fn require_mount(mount: &Mount) -> ServiceResult<(&RepoSpec, &str)> {
    let Some(repo) = mount.repo.as_ref() else {
        error!("no repository specified for the issue tracker");
        return Err(ServiceError::configuration("no repository specified"));
    };
    let Some(base_uri) = mount.base_uri.as_deref() else {
        error!("no base URI specified for the issue tracker");
        return Err(ServiceError::configuration("no base URI specified"));
    };
    Ok((repo, base_uri))
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    issue_store: Option<Arc<dyn IssueStore>>,
    users: Option<Arc<dyn UserDirectory>>,
    notifications: Option<Arc<dyn NotificationIndex>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue_store(mut self, store: Arc<dyn IssueStore>) -> Self {
        self.issue_store = Some(store);
        self
    }

    pub fn users(mut self, users: Arc<dyn UserDirectory>) -> Self {
        self.users = Some(users);
        self
    }

    pub fn notifications(mut self, index: Arc<dyn NotificationIndex>) -> Self {
        self.notifications = Some(index);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Configuration` if no issue store was given
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.issue_store
                .ok_or_else(|| ServiceError::configuration("issue_store is required"))?,
            self.users,
            self.notifications,
        ))
    }
}
