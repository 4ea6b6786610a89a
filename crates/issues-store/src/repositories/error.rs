//! Error helpers shared by the stores

use issues_core::{DomainError, RepoResult, RequestContext, User, UserDirectory};

/// Create an "issue not found" error
pub fn issue_not_found(id: u64) -> DomainError {
    DomainError::IssueNotFound(id)
}

/// Create a "comment not found" error
pub fn comment_not_found(issue_id: u64, comment_id: u64) -> DomainError {
    DomainError::CommentNotFound {
        issue_id,
        comment_id,
    }
}

/// Resolve the caller, failing for anonymous viewers
pub async fn require_user(users: &dyn UserDirectory, ctx: &RequestContext) -> RepoResult<User> {
    let user = users.get_authenticated(ctx).await?;
    if user.is_anonymous() {
        return Err(DomainError::Unauthenticated);
    }
    Ok(user)
}
