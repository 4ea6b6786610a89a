//! Issue service
//!
//! Mutating use cases behind the POST endpoints. Requests are validated
//! here before the store sees them.

use tracing::{info, instrument};

use issues_core::{
    Comment, CommentRequest, DomainError, EmojiId, Event, Issue, IssueRequest, NewIssue, RepoSpec,
    RequestContext,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Issue service
pub struct IssueService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> IssueService<'a> {
    /// Create a new IssueService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create an issue. Anonymous callers are turned away before the store
    /// is consulted.
    #[instrument(skip(self, request, issue))]
    pub async fn create(
        &self,
        request: &RequestContext,
        repo: &RepoSpec,
        issue: NewIssue,
    ) -> ServiceResult<Issue> {
        let user = self.ctx.current_user(request).await?;
        if user.is_anonymous() {
            return Err(DomainError::Unauthenticated.into());
        }
        issue.check()?;

        let created = self.ctx.issue_store().create(request, repo, issue).await?;
        info!(issue_id = created.id, user = %user.login, "Issue created");
        Ok(created)
    }

    /// Change state and/or title; returns the issue and the events recorded
    #[instrument(skip(self, request))]
    pub async fn edit(
        &self,
        request: &RequestContext,
        repo: &RepoSpec,
        id: u64,
        req: IssueRequest,
    ) -> ServiceResult<(Issue, Vec<Event>)> {
        req.check()?;
        let (issue, events) = self.ctx.issue_store().edit(request, repo, id, req).await?;
        info!(issue_id = id, events = events.len(), "Issue edited");
        Ok((issue, events))
    }

    /// Post a reply
    #[instrument(skip(self, request, body))]
    pub async fn comment(
        &self,
        request: &RequestContext,
        repo: &RepoSpec,
        id: u64,
        body: String,
    ) -> ServiceResult<Comment> {
        if body.trim().is_empty() {
            return Err(ServiceError::validation("comment body must not be empty"));
        }
        let comment = self
            .ctx
            .issue_store()
            .create_comment(request, repo, id, body)
            .await?;
        info!(issue_id = id, comment_id = comment.id, "Comment created");
        Ok(comment)
    }

    /// Replace a comment body
    #[instrument(skip(self, request, body))]
    pub async fn edit_comment(
        &self,
        request: &RequestContext,
        repo: &RepoSpec,
        id: u64,
        comment_id: u64,
        body: String,
    ) -> ServiceResult<Comment> {
        self.apply(request, repo, id, CommentRequest::body(comment_id, body))
            .await
    }

    /// Toggle the caller's reaction on a comment
    #[instrument(skip(self, request))]
    pub async fn toggle_reaction(
        &self,
        request: &RequestContext,
        repo: &RepoSpec,
        id: u64,
        comment_id: u64,
        reaction: EmojiId,
    ) -> ServiceResult<Comment> {
        self.apply(request, repo, id, CommentRequest::reaction(comment_id, reaction))
            .await
    }

    async fn apply(
        &self,
        request: &RequestContext,
        repo: &RepoSpec,
        id: u64,
        req: CommentRequest,
    ) -> ServiceResult<Comment> {
        req.check()?;
        Ok(self
            .ctx
            .issue_store()
            .edit_comment(request, repo, id, req)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use issues_core::{EventKind, IssueStore, RepoResult, StateFilter, User, UserSpec};
    use issues_store::{MemoryIssueStore, StaticUserDirectory};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn gopher() -> User {
        User::new(UserSpec::new(1, "example.org"), "gopher")
    }

    fn repo() -> RepoSpec {
        RepoSpec::new("example.org/repo")
    }

    fn ctx_for(user: User) -> ServiceContext {
        let users = Arc::new(StaticUserDirectory::new(user));
        ServiceContext::builder()
            .issue_store(Arc::new(MemoryIssueStore::new(users.clone())))
            .users(users)
            .build()
            .unwrap()
    }

    /// Wraps a store and counts `create` calls
    struct CountingStore {
        inner: MemoryIssueStore,
        creates: AtomicUsize,
    }

    #[async_trait]
    impl IssueStore for CountingStore {
        async fn list(&self, c: &RequestContext, r: &RepoSpec, f: StateFilter) -> RepoResult<Vec<Issue>> {
            self.inner.list(c, r, f).await
        }
        async fn count(&self, c: &RequestContext, r: &RepoSpec, f: StateFilter) -> RepoResult<u64> {
            self.inner.count(c, r, f).await
        }
        async fn get(&self, c: &RequestContext, r: &RepoSpec, id: u64) -> RepoResult<Issue> {
            self.inner.get(c, r, id).await
        }
        async fn list_comments(&self, c: &RequestContext, r: &RepoSpec, id: u64) -> RepoResult<Vec<Comment>> {
            self.inner.list_comments(c, r, id).await
        }
        async fn list_events(&self, c: &RequestContext, r: &RepoSpec, id: u64) -> RepoResult<Vec<Event>> {
            self.inner.list_events(c, r, id).await
        }
        async fn create_comment(&self, c: &RequestContext, r: &RepoSpec, id: u64, body: String) -> RepoResult<Comment> {
            self.inner.create_comment(c, r, id, body).await
        }
        async fn create(&self, c: &RequestContext, r: &RepoSpec, issue: NewIssue) -> RepoResult<Issue> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            self.inner.create(c, r, issue).await
        }
        async fn edit(&self, c: &RequestContext, r: &RepoSpec, id: u64, req: IssueRequest) -> RepoResult<(Issue, Vec<Event>)> {
            self.inner.edit(c, r, id, req).await
        }
        async fn edit_comment(&self, c: &RequestContext, r: &RepoSpec, id: u64, req: CommentRequest) -> RepoResult<Comment> {
            self.inner.edit_comment(c, r, id, req).await
        }
    }

    #[tokio::test]
    async fn test_anonymous_create_never_reaches_store() {
        let users = Arc::new(StaticUserDirectory::anonymous());
        let store = Arc::new(CountingStore {
            inner: MemoryIssueStore::new(users.clone()),
            creates: AtomicUsize::new(0),
        });
        let ctx = ServiceContext::builder()
            .issue_store(store.clone())
            .users(users)
            .build()
            .unwrap();

        let err = IssueService::new(&ctx)
            .create(&RequestContext::anonymous(), &repo(), NewIssue::new("Title", ""))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);
        assert_eq!(store.creates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_create_validates_title() {
        let ctx = ctx_for(gopher());
        let err = IssueService::new(&ctx)
            .create(&RequestContext::anonymous(), &repo(), NewIssue::new("  ", ""))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_edit_close_records_event() {
        let ctx = ctx_for(gopher());
        let service = IssueService::new(&ctx);
        let request = RequestContext::anonymous();
        let issue = service
            .create(&request, &repo(), NewIssue::new("Title", "body"))
            .await
            .unwrap();

        let (edited, events) = service
            .edit(&request, &repo(), issue.id, IssueRequest::close())
            .await
            .unwrap();
        assert!(edited.state.is_closed());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Closed);
    }

    #[tokio::test]
    async fn test_empty_comment_rejected() {
        let ctx = ctx_for(gopher());
        let err = IssueService::new(&ctx)
            .comment(&RequestContext::anonymous(), &repo(), 1, "   ".into())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_reaction_toggles_back() {
        let ctx = ctx_for(gopher());
        let service = IssueService::new(&ctx);
        let request = RequestContext::anonymous();
        let issue = service
            .create(&request, &repo(), NewIssue::new("Title", "body"))
            .await
            .unwrap();

        let once = service
            .toggle_reaction(&request, &repo(), issue.id, 0, EmojiId::new("+1"))
            .await
            .unwrap();
        assert_eq!(once.reactions.len(), 1);
        let twice = service
            .toggle_reaction(&request, &repo(), issue.id, 0, EmojiId::new("+1"))
            .await
            .unwrap();
        assert!(twice.reactions.is_empty());
    }

    #[tokio::test]
    async fn test_edit_comment_body() {
        let ctx = ctx_for(gopher());
        let service = IssueService::new(&ctx);
        let request = RequestContext::anonymous();
        let issue = service
            .create(&request, &repo(), NewIssue::new("Title", "body"))
            .await
            .unwrap();
        let comment = service
            .comment(&request, &repo(), issue.id, "first".into())
            .await
            .unwrap();

        let edited = service
            .edit_comment(&request, &repo(), issue.id, comment.id, "second".into())
            .await
            .unwrap();
        assert_eq!(edited.body, "second");
        assert!(edited.edited.is_some());
    }
}
