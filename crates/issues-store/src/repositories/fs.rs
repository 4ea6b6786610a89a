//! Filesystem implementation of IssueStore
//!
//! Layout, one directory per repository:
//!
//! ```text
//! {root}/{repo uri}/{issue id}/0           issue record with its opening comment
//! {root}/{repo uri}/{issue id}/{n}         reply comments, n >= 1
//! {root}/{repo uri}/{issue id}/events/{n}  events, n >= 1
//! ```
//!
//! Issue IDs start at 1; every new ID is the largest existing one plus one.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use issues_core::{
    Comment, CommentRequest, DomainError, Event, Issue, IssueRequest, IssueState, IssueStore,
    NewIssue, RepoResult, RepoSpec, RequestContext, StateFilter, ThreadTyped, UserDirectory,
};

use crate::models::{CommentRecord, EventRecord, IssueRecord};

use super::edit::{apply_comment_request, apply_issue_request};
use super::error::{comment_not_found, issue_not_found, require_user};
use super::ISSUES_THREAD_TYPE;

const ISSUE_FILE: &str = "0";
const EVENTS_DIR: &str = "events";

/// Issue store persisting JSON records under a root directory
pub struct FsIssueStore {
    root: PathBuf,
    users: Arc<dyn UserDirectory>,
    /// Serializes writers so ID allocation cannot race
    write_lock: Mutex<()>,
}

impl FsIssueStore {
    pub fn new(root: impl Into<PathBuf>, users: Arc<dyn UserDirectory>) -> Self {
        Self {
            root: root.into(),
            users,
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of a repository. Rejects URIs that would escape the root.
    fn repo_dir(&self, repo: &RepoSpec) -> RepoResult<PathBuf> {
        let relative = Path::new(&repo.uri);
        let valid = !repo.uri.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !valid {
            return Err(DomainError::validation(format!(
                "invalid repository: {:?}",
                repo.uri
            )));
        }
        Ok(self.root.join(relative))
    }

    fn issue_dir(&self, repo: &RepoSpec, id: u64) -> RepoResult<PathBuf> {
        Ok(self.repo_dir(repo)?.join(id.to_string()))
    }

    async fn load_issue(&self, repo: &RepoSpec, id: u64) -> RepoResult<Issue> {
        let dir = self.issue_dir(repo, id)?;
        let record: IssueRecord = read_json(&dir.join(ISSUE_FILE))
            .await?
            .ok_or_else(|| issue_not_found(id))?;
        let replies = read_dir_ids(&dir).await?.iter().filter(|n| **n != 0).count();
        Ok(record.into_issue(id, replies as u32))
    }
}

impl std::fmt::Debug for FsIssueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FsIssueStore")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

/// Numeric entry names of `dir`, ascending. A missing directory is empty.
async fn read_dir_ids(dir: &Path) -> RepoResult<Vec<u64>> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    let mut ids = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if let Some(id) = entry.file_name().to_str().and_then(|s| s.parse().ok()) {
            ids.push(id);
        }
    }
    ids.sort_unstable();
    Ok(ids)
}

async fn next_id(dir: &Path) -> RepoResult<u64> {
    Ok(read_dir_ids(dir).await?.last().map_or(1, |last| last + 1))
}

/// Read a JSON record; `None` if the file does not exist
async fn read_json<T: DeserializeOwned>(path: &Path) -> RepoResult<Option<T>> {
    match fs::read(path).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write a JSON record through a temporary file so readers never see a
/// partial record
async fn write_json<T: Serialize>(path: &Path, value: &T) -> RepoResult<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

#[async_trait]
impl IssueStore for FsIssueStore {
    #[instrument(skip(self, _ctx))]
    async fn list(
        &self,
        _ctx: &RequestContext,
        repo: &RepoSpec,
        filter: StateFilter,
    ) -> RepoResult<Vec<Issue>> {
        let ids = read_dir_ids(&self.repo_dir(repo)?).await?;
        let mut issues = Vec::new();
        for id in ids.into_iter().rev() {
            let issue = self.load_issue(repo, id).await?;
            if filter.matches(&issue.state) {
                issues.push(issue);
            }
        }
        Ok(issues)
    }

    #[instrument(skip(self, ctx))]
    async fn count(
        &self,
        ctx: &RequestContext,
        repo: &RepoSpec,
        filter: StateFilter,
    ) -> RepoResult<u64> {
        Ok(self.list(ctx, repo, filter).await?.len() as u64)
    }

    #[instrument(skip(self, _ctx))]
    async fn get(&self, _ctx: &RequestContext, repo: &RepoSpec, id: u64) -> RepoResult<Issue> {
        self.load_issue(repo, id).await
    }

    #[instrument(skip(self, _ctx))]
    async fn list_comments(
        &self,
        _ctx: &RequestContext,
        repo: &RepoSpec,
        id: u64,
    ) -> RepoResult<Vec<Comment>> {
        let issue = self.load_issue(repo, id).await?;
        let dir = self.issue_dir(repo, id)?;

        let mut comments = vec![issue.comment];
        for comment_id in read_dir_ids(&dir).await? {
            if comment_id == 0 {
                continue;
            }
            if let Some(record) = read_json::<CommentRecord>(&dir.join(comment_id.to_string())).await? {
                comments.push(record.into_comment(comment_id));
            }
        }
        Ok(comments)
    }

    #[instrument(skip(self, _ctx))]
    async fn list_events(
        &self,
        _ctx: &RequestContext,
        repo: &RepoSpec,
        id: u64,
    ) -> RepoResult<Vec<Event>> {
        let dir = self.issue_dir(repo, id)?;
        if fs::metadata(dir.join(ISSUE_FILE)).await.is_err() {
            return Err(issue_not_found(id));
        }

        let events_dir = dir.join(EVENTS_DIR);
        let mut events = Vec::new();
        for event_id in read_dir_ids(&events_dir).await? {
            if let Some(record) = read_json::<EventRecord>(&events_dir.join(event_id.to_string())).await? {
                events.push(record.into_event(event_id));
            }
        }
        Ok(events)
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
        let _guard = self.write_lock.lock().await;

        // Existence check doubles as validation of the repo path.
        self.load_issue(repo, id).await?;
        let dir = self.issue_dir(repo, id)?;
        let comment = Comment::new(next_id(&dir).await?, author, body);
        write_json(&dir.join(comment.id.to_string()), &CommentRecord::from(&comment)).await?;

        debug!(issue_id = id, comment_id = comment.id, "comment created");
        Ok(comment)
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
        let _guard = self.write_lock.lock().await;

        let repo_dir = self.repo_dir(repo)?;
        fs::create_dir_all(&repo_dir).await?;
        let id = next_id(&repo_dir).await?;
        let dir = repo_dir.join(id.to_string());
        fs::create_dir(&dir).await?;

        let created = Issue::new(id, issue.title, Comment::new(0, author, issue.body));
        write_json(&dir.join(ISSUE_FILE), &IssueRecord::from(&created)).await?;

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
        let _guard = self.write_lock.lock().await;

        let mut issue = self.load_issue(repo, id).await?;
        let dir = self.issue_dir(repo, id)?;
        let events_dir = dir.join(EVENTS_DIR);

        let mut next = next_id(&events_dir).await?;
        let mut state: IssueState = issue.state.clone();
        let events = apply_issue_request(&mut state, &mut issue.title, &req, &actor, || {
            let event_id = next;
            next += 1;
            event_id
        });
        issue.state = state;

        if !events.is_empty() {
            write_json(&dir.join(ISSUE_FILE), &IssueRecord::from(&issue)).await?;
            fs::create_dir_all(&events_dir).await?;
            for event in &events {
                write_json(&events_dir.join(event.id.to_string()), &EventRecord::from(event)).await?;
            }
        }
        Ok((issue, events))
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
        let _guard = self.write_lock.lock().await;

        let mut issue = self.load_issue(repo, id).await?;
        let dir = self.issue_dir(repo, id)?;

        if req.id == 0 {
            apply_comment_request(&mut issue.comment, &req, &actor)?;
            write_json(&dir.join(ISSUE_FILE), &IssueRecord::from(&issue)).await?;
            return Ok(issue.comment);
        }

        let path = dir.join(req.id.to_string());
        let record: CommentRecord = read_json(&path)
            .await?
            .ok_or_else(|| comment_not_found(id, req.id))?;
        let mut comment = record.into_comment(req.id);
        apply_comment_request(&mut comment, &req, &actor)?;
        write_json(&path, &CommentRecord::from(&comment)).await?;
        Ok(comment)
    }

    fn as_thread_typed(&self) -> Option<&dyn ThreadTyped> {
        Some(self)
    }
}

impl ThreadTyped for FsIssueStore {
    fn thread_type(&self) -> &str {
        ISSUES_THREAD_TYPE
    }
}
