//! Test fixtures and data generators
//!
//! Provides reusable users, issues and seeding helpers.

use chrono::{Duration, Utc};
use issues_core::{Comment, Event, EventKind, Issue, IssueState, RepoSpec, User, UserSpec};
use issues_store::MemoryIssueStore;

/// Base URI the test server is mounted under. The router itself is served
/// at the root, so links in rendered pages resolve against the server.
pub const BASE_URI: &str = "";

pub fn repo() -> RepoSpec {
    RepoSpec::new("example.org/repo")
}

pub fn gopher() -> User {
    User::new(UserSpec::new(1, "example.org"), "gopher")
}

pub fn alice() -> User {
    User::new(UserSpec::new(2, "example.org"), "alice")
}

/// Issue with an explicit ID, opened an hour ago
pub fn issue(id: u64, title: &str, state: IssueState, author: User) -> Issue {
    let mut comment = Comment::new(0, author, format!("Body of {title}"));
    comment.created_at = Utc::now() - Duration::hours(1);
    let mut issue = Issue::new(id, title, comment);
    issue.state = state;
    issue
}

/// Seed issue 42, open, by gopher
pub fn seed_issue_42(store: &MemoryIssueStore) -> u64 {
    store.insert_issue(&repo(), issue(42, "Issue forty-two", IssueState::Open, gopher()))
}

/// Seed issue 42 after it was closed and reopened, leaving it open with
/// events 1 and 2 recorded
pub fn seed_issue_42_with_history(store: &MemoryIssueStore) -> u64 {
    let id = seed_issue_42(store);
    for (minutes_ago, kind) in [(50, EventKind::Closed), (40, EventKind::Reopened)] {
        let mut event = Event::new(0, alice(), kind);
        event.created_at = Utc::now() - Duration::minutes(minutes_ago);
        store
            .insert_event(&repo(), id, event)
            .expect("issue 42 was just seeded");
    }
    id
}

/// Seed three open and two closed issues
pub fn seed_mixed(store: &MemoryIssueStore) {
    for (id, state) in [
        (1, IssueState::Open),
        (2, IssueState::Closed),
        (3, IssueState::Open),
        (4, IssueState::Closed),
        (5, IssueState::Open),
    ] {
        let title = format!("{} issue {id}", state.as_str());
        store.insert_issue(&repo(), issue(id, &title, state, alice()));
    }
}
