//! Collaborator traits - the storage, identity and notification services
//!
//! The domain layer defines what it needs and the store crate (or an
//! embedding application) provides the implementation. Every call receives
//! the caller's [`RequestContext`].

use async_trait::async_trait;

use crate::entities::{Comment, Event, Issue, Notification, NotificationFilter, User};
use crate::error::DomainError;
use crate::requests::{CommentRequest, IssueRequest, NewIssue};
use crate::value_objects::{RepoSpec, RequestContext, StateFilter};

/// Result type for collaborator operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Issue Store
// ============================================================================

#[async_trait]
pub trait IssueStore: Send + Sync {
    /// List issues matching `filter`, newest first
    async fn list(
        &self,
        ctx: &RequestContext,
        repo: &RepoSpec,
        filter: StateFilter,
    ) -> RepoResult<Vec<Issue>>;

    /// Count issues matching `filter`
    async fn count(
        &self,
        ctx: &RequestContext,
        repo: &RepoSpec,
        filter: StateFilter,
    ) -> RepoResult<u64>;

    /// Fetch one issue
    async fn get(&self, ctx: &RequestContext, repo: &RepoSpec, id: u64) -> RepoResult<Issue>;

    /// All comments of an issue, opening comment first
    async fn list_comments(
        &self,
        ctx: &RequestContext,
        repo: &RepoSpec,
        id: u64,
    ) -> RepoResult<Vec<Comment>>;

    /// All events of an issue
    async fn list_events(
        &self,
        ctx: &RequestContext,
        repo: &RepoSpec,
        id: u64,
    ) -> RepoResult<Vec<Event>>;

    /// Append a reply authored by the current user
    async fn create_comment(
        &self,
        ctx: &RequestContext,
        repo: &RepoSpec,
        id: u64,
        body: String,
    ) -> RepoResult<Comment>;

    /// Open a new issue authored by the current user
    async fn create(&self, ctx: &RequestContext, repo: &RepoSpec, issue: NewIssue)
        -> RepoResult<Issue>;

    /// Change state and/or title; returns the updated issue and the events
    /// the change produced (possibly none)
    async fn edit(
        &self,
        ctx: &RequestContext,
        repo: &RepoSpec,
        id: u64,
        req: IssueRequest,
    ) -> RepoResult<(Issue, Vec<Event>)>;

    /// Edit a comment body or toggle one of the current user's reactions
    async fn edit_comment(
        &self,
        ctx: &RequestContext,
        repo: &RepoSpec,
        id: u64,
        req: CommentRequest,
    ) -> RepoResult<Comment>;

    /// The store's thread-type capability, if it has one.
    ///
    /// Unread markers can only be computed for stores that expose it.
    fn as_thread_typed(&self) -> Option<&dyn ThreadTyped> {
        None
    }
}

/// Stores whose issues are addressable as notification threads
pub trait ThreadTyped: Send + Sync {
    /// Thread type notifications use to refer to this store's issues
    fn thread_type(&self) -> &str;
}

// ============================================================================
// User Directory
// ============================================================================

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve the caller. No credential yields [`User::anonymous`]; an
    /// invalid credential is an error.
    async fn get_authenticated(&self, ctx: &RequestContext) -> RepoResult<User>;
}

// ============================================================================
// Notification Index
// ============================================================================

#[async_trait]
pub trait NotificationIndex: Send + Sync {
    /// Notifications of the caller for one repository
    async fn list(
        &self,
        ctx: &RequestContext,
        filter: &NotificationFilter,
    ) -> RepoResult<Vec<Notification>>;
}
