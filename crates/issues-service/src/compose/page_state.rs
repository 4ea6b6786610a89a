//! Per-request page state with lazy store-backed accessors

use std::collections::HashSet;
use tracing::{instrument, warn};

use issues_core::{
    sort_items, DomainError, Issue, IssueItem, NotificationFilter, RepoSpec, RequestContext,
    StateFilter, User,
};

use crate::services::{ServiceContext, ServiceError, ServiceResult};
use crate::tabs::{parse_query, selected_filter, IssuesNav};

/// Read-only view of one request.
///
/// Each accessor is independently fallible and hits the collaborators every
/// time it is called; handlers await only the ones their page needs.
pub struct PageState<'a> {
    ctx: &'a ServiceContext,
    request: RequestContext,
    repo: RepoSpec,
    base_uri: String,
    req_path: String,
    query: Option<String>,
    issue_id: Option<u64>,
    current_user: User,
}

impl<'a> PageState<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        ctx: &'a ServiceContext,
        request: RequestContext,
        repo: RepoSpec,
        base_uri: String,
        req_path: String,
        query: Option<String>,
        issue_id: Option<u64>,
        current_user: User,
    ) -> Self {
        Self {
            ctx,
            request,
            repo,
            base_uri,
            req_path,
            query,
            issue_id,
            current_user,
        }
    }

    // === Request values ===

    pub fn request(&self) -> &RequestContext {
        &self.request
    }

    pub fn repo(&self) -> &RepoSpec {
        &self.repo
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Path relative to the mount; empty at the mount root
    pub fn req_path(&self) -> &str {
        &self.req_path
    }

    /// Absolute path of the page
    pub fn path(&self) -> String {
        format!("{}{}", self.base_uri, self.req_path)
    }

    pub fn issue_id(&self) -> Option<u64> {
        self.issue_id
    }

    pub fn current_user(&self) -> &User {
        &self.current_user
    }

    /// The current user, or `Unauthenticated` for anonymous viewers
    pub fn require_authenticated(&self) -> ServiceResult<&User> {
        if self.current_user.is_anonymous() {
            return Err(DomainError::Unauthenticated.into());
        }
        Ok(&self.current_user)
    }

    // === Lazy accessors ===

    /// The selected tab
    pub fn tab(&self) -> ServiceResult<StateFilter> {
        selected_filter(&parse_query(self.query.as_deref())?)
    }

    /// Tab navigation with both counts
    pub async fn nav(&self) -> ServiceResult<IssuesNav> {
        let pairs = parse_query(self.query.as_deref())?;
        let selected = selected_filter(&pairs)?;
        let (open, closed) = tokio::try_join!(self.open_count(), self.closed_count())?;
        Ok(IssuesNav::new(&self.path(), &pairs, selected, open, closed))
    }

    /// Issues in the selected tab, newest first, with unread markers
    #[instrument(skip(self), fields(repo = %self.repo))]
    pub async fn issues(&self) -> ServiceResult<Vec<Issue>> {
        let filter = self.tab()?;
        let mut issues = self
            .ctx
            .issue_store()
            .list(&self.request, &self.repo, filter)
            .await?;
        self.mark_unread(&mut issues).await;
        Ok(issues)
    }

    pub async fn open_count(&self) -> ServiceResult<u64> {
        self.count(StateFilter::Open).await
    }

    pub async fn closed_count(&self) -> ServiceResult<u64> {
        self.count(StateFilter::Closed).await
    }

    async fn count(&self, filter: StateFilter) -> ServiceResult<u64> {
        Ok(self
            .ctx
            .issue_store()
            .count(&self.request, &self.repo, filter)
            .await?)
    }

    /// The issue named by the `{id}` path variable
    #[instrument(skip(self), fields(issue_id = ?self.issue_id))]
    pub async fn issue(&self) -> ServiceResult<Issue> {
        let id = self.require_issue_id()?;
        Ok(self.ctx.issue_store().get(&self.request, &self.repo, id).await?)
    }

    /// Comments and events of the current issue in timeline order
    #[instrument(skip(self), fields(issue_id = ?self.issue_id))]
    pub async fn items(&self) -> ServiceResult<Vec<IssueItem>> {
        let id = self.require_issue_id()?;
        let store = self.ctx.issue_store();
        let (comments, events) = tokio::try_join!(
            store.list_comments(&self.request, &self.repo, id),
            store.list_events(&self.request, &self.repo, id),
        )?;

        let mut items: Vec<IssueItem> = comments
            .into_iter()
            .map(IssueItem::from)
            .chain(events.into_iter().map(IssueItem::from))
            .collect();
        sort_items(&mut items);
        Ok(items)
    }

    fn require_issue_id(&self) -> ServiceResult<u64> {
        self.issue_id
            .ok_or_else(|| ServiceError::not_found("Issue", "no issue id in request"))
    }

    /// Set `unread` on issues the viewer has notifications for.
    ///
    /// Needs a notification index, a thread-typed store and a signed-in
    /// viewer. A failing index leaves every issue read.
    async fn mark_unread(&self, issues: &mut [Issue]) {
        let Some(index) = self.ctx.notifications() else {
            return;
        };
        let Some(typed) = self.ctx.issue_store().as_thread_typed() else {
            return;
        };
        if self.current_user.is_anonymous() {
            return;
        }

        let filter = NotificationFilter {
            repo: self.repo.clone(),
        };
        let notifications = match index.list(&self.request, &filter).await {
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, repo = %self.repo, "listing notifications failed, showing all issues as read");
                return;
            }
        };

        let thread_type = typed.thread_type();
        let unread: HashSet<u64> = notifications
            .iter()
            .filter(|n| n.thread_type == thread_type)
            .map(|n| n.thread_id)
            .collect();
        for issue in issues {
            issue.unread = unread.contains(&issue.id);
        }
    }
}

impl std::fmt::Debug for PageState<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageState")
            .field("repo", &self.repo)
            .field("base_uri", &self.base_uri)
            .field("req_path", &self.req_path)
            .field("issue_id", &self.issue_id)
            .field("current_user", &self.current_user.login)
            .finish_non_exhaustive()
    }
}
