//! In-memory implementation of IssueStore

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, instrument};

use issues_core::{
    Comment, CommentRequest, Event, Issue, IssueRequest, IssueState, IssueStore, Label, NewIssue,
    RepoResult, RepoSpec, RequestContext, StateFilter, ThreadTyped, UserDirectory,
};

use super::edit::{apply_comment_request, apply_issue_request};
use super::error::{comment_not_found, issue_not_found, require_user};
use super::ISSUES_THREAD_TYPE;

/// An issue with its full timeline. `comments[0]` is the opening comment.
#[derive(Debug, Clone)]
struct StoredIssue {
    state: IssueState,
    title: String,
    labels: Vec<Label>,
    comments: Vec<Comment>,
    events: Vec<Event>,
}

impl StoredIssue {
    fn to_issue(&self, id: u64) -> Issue {
        Issue {
            id,
            state: self.state.clone(),
            title: self.title.clone(),
            comment: self.comments[0].clone(),
            labels: self.labels.clone(),
            replies: (self.comments.len() - 1) as u32,
            unread: false,
        }
    }

    fn next_comment_id(&self) -> u64 {
        self.comments.last().map_or(1, |c| c.id + 1)
    }

    fn next_event_id(&self) -> u64 {
        self.events.last().map_or(1, |e| e.id + 1)
    }
}

#[derive(Debug, Default)]
struct RepoIssues {
    issues: BTreeMap<u64, StoredIssue>,
}

impl RepoIssues {
    fn next_id(&self) -> u64 {
        self.issues.keys().next_back().map_or(1, |id| id + 1)
    }
}

/// Volatile issue store.
///
/// Issues are kept per repository in ID order. Mutations require an
/// authenticated caller, resolved through the configured [`UserDirectory`].
pub struct MemoryIssueStore {
    users: Arc<dyn UserDirectory>,
    repos: RwLock<HashMap<RepoSpec, RepoIssues>>,
}

impl MemoryIssueStore {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self {
            users,
            repos: RwLock::new(HashMap::new()),
        }
    }

    /// Insert an issue as-is, keeping its ID unless it is 0.
    ///
    /// Intended for seeding; no caller identity is involved. Returns the ID
    /// the issue was stored under.
    pub fn insert_issue(&self, repo: &RepoSpec, mut issue: Issue) -> u64 {
        let mut repos = self.repos.write();
        let issues = repos.entry(repo.clone()).or_default();
        let id = if issue.id == 0 { issues.next_id() } else { issue.id };
        issue.comment.id = 0;
        issues.issues.insert(
            id,
            StoredIssue {
                state: issue.state,
                title: issue.title,
                labels: issue.labels,
                comments: vec![issue.comment],
                events: Vec::new(),
            },
        );
        id
    }

    /// Append a reply as-is; an ID of 0 is replaced by the next free one
    pub fn insert_comment(
        &self,
        repo: &RepoSpec,
        issue_id: u64,
        mut comment: Comment,
    ) -> RepoResult<u64> {
        self.with_issue_mut(repo, issue_id, |stored| {
            if comment.id == 0 {
                comment.id = stored.next_comment_id();
            }
            let id = comment.id;
            stored.comments.push(comment);
            Ok(id)
        })
    }

    /// Append an event as-is; an ID of 0 is replaced by the next free one
    pub fn insert_event(
        &self,
        repo: &RepoSpec,
        issue_id: u64,
        mut event: Event,
    ) -> RepoResult<u64> {
        self.with_issue_mut(repo, issue_id, |stored| {
            if event.id == 0 {
                event.id = stored.next_event_id();
            }
            let id = event.id;
            stored.events.push(event);
            Ok(id)
        })
    }

    fn with_issue<T>(
        &self,
        repo: &RepoSpec,
        id: u64,
        f: impl FnOnce(&StoredIssue) -> T,
    ) -> RepoResult<T> {
        let repos = self.repos.read();
        repos
            .get(repo)
            .and_then(|r| r.issues.get(&id))
            .map(f)
            .ok_or_else(|| issue_not_found(id))
    }

    fn with_issue_mut<T>(
        &self,
        repo: &RepoSpec,
        id: u64,
        f: impl FnOnce(&mut StoredIssue) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let mut repos = self.repos.write();
        let stored = repos
            .get_mut(repo)
            .and_then(|r| r.issues.get_mut(&id))
            .ok_or_else(|| issue_not_found(id))?;
        f(stored)
    }
}

impl std::fmt::Debug for MemoryIssueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryIssueStore")
            .field("repos", &self.repos.read().len())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl IssueStore for MemoryIssueStore {
    #[instrument(skip(self, _ctx))]
    async fn list(
        &self,
        _ctx: &RequestContext,
        repo: &RepoSpec,
        filter: StateFilter,
    ) -> RepoResult<Vec<Issue>> {
        let repos = self.repos.read();
        let Some(issues) = repos.get(repo) else {
            return Ok(Vec::new());
        };
        Ok(issues
            .issues
            .iter()
            .rev()
            .filter(|(_, stored)| filter.matches(&stored.state))
            .map(|(id, stored)| stored.to_issue(*id))
            .collect())
    }

    #[instrument(skip(self, _ctx))]
    async fn count(
        &self,
        _ctx: &RequestContext,
        repo: &RepoSpec,
        filter: StateFilter,
    ) -> RepoResult<u64> {
        let repos = self.repos.read();
        Ok(repos.get(repo).map_or(0, |issues| {
            issues
                .issues
                .values()
                .filter(|stored| filter.matches(&stored.state))
                .count() as u64
        }))
    }

    #[instrument(skip(self, _ctx))]
    async fn get(&self, _ctx: &RequestContext, repo: &RepoSpec, id: u64) -> RepoResult<Issue> {
        self.with_issue(repo, id, |stored| stored.to_issue(id))
    }

    #[instrument(skip(self, _ctx))]
    async fn list_comments(
        &self,
        _ctx: &RequestContext,
        repo: &RepoSpec,
        id: u64,
    ) -> RepoResult<Vec<Comment>> {
        self.with_issue(repo, id, |stored| stored.comments.clone())
    }

    #[instrument(skip(self, _ctx))]
    async fn list_events(
        &self,
        _ctx: &RequestContext,
        repo: &RepoSpec,
        id: u64,
    ) -> RepoResult<Vec<Event>> {
        self.with_issue(repo, id, |stored| stored.events.clone())
    }

    #[instrument(skip(self, ctx, body))]
    async fn create_comment(
        &self,
        ctx: &RequestContext,
        repo: &RepoSpec,
        id: u64,
        body: String,
    ) -> RepoResult<Comment> {
        let author = require_user(self.users.as_ref(), ctx).await?;
        self.with_issue_mut(repo, id, |stored| {
            let comment = Comment::new(stored.next_comment_id(), author, body);
            stored.comments.push(comment.clone());
            debug!(issue_id = id, comment_id = comment.id, "comment created");
            Ok(comment)
        })
    }

    #[instrument(skip(self, ctx, issue))]
    async fn create(
        &self,
        ctx: &RequestContext,
        repo: &RepoSpec,
        issue: NewIssue,
    ) -> RepoResult<Issue> {
        issue.check()?;
        let author = require_user(self.users.as_ref(), ctx).await?;

        let mut repos = self.repos.write();
        let issues = repos.entry(repo.clone()).or_default();
        let id = issues.next_id();
        let stored = StoredIssue {
            state: IssueState::Open,
            title: issue.title,
            labels: Vec::new(),
            comments: vec![Comment::new(0, author, issue.body)],
            events: Vec::new(),
        };
        let created = stored.to_issue(id);
        issues.issues.insert(id, stored);
        debug!(issue_id = id, "issue created");
        Ok(created)
    }

    #[instrument(skip(self, ctx))]
    async fn edit(
        &self,
        ctx: &RequestContext,
        repo: &RepoSpec,
        id: u64,
        req: IssueRequest,
    ) -> RepoResult<(Issue, Vec<Event>)> {
        req.check()?;
        let actor = require_user(self.users.as_ref(), ctx).await?;
        self.with_issue_mut(repo, id, |stored| {
            let mut next = stored.next_event_id();
            let events = apply_issue_request(&mut stored.state, &mut stored.title, &req, &actor, || {
                let event_id = next;
                next += 1;
                event_id
            });
            stored.events.extend(events.iter().cloned());
            Ok((stored.to_issue(id), events))
        })
    }

    #[instrument(skip(self, ctx))]
    async fn edit_comment(
        &self,
        ctx: &RequestContext,
        repo: &RepoSpec,
        id: u64,
        req: CommentRequest,
    ) -> RepoResult<Comment> {
        req.check()?;
        let actor = require_user(self.users.as_ref(), ctx).await?;
        self.with_issue_mut(repo, id, |stored| {
            let comment = stored
                .comments
                .iter_mut()
                .find(|c| c.id == req.id)
                .ok_or_else(|| comment_not_found(id, req.id))?;
            apply_comment_request(comment, &req, &actor)?;
            Ok(comment.clone())
        })
    }

    fn as_thread_typed(&self) -> Option<&dyn ThreadTyped> {
        Some(self)
    }
}

impl ThreadTyped for MemoryIssueStore {
    fn thread_type(&self) -> &str {
        ISSUES_THREAD_TYPE
    }
}
