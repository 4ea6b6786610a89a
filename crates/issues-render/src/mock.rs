//! Fixed sample data for previewing templates in isolation

use chrono::{TimeZone, Utc};
use serde::Serialize;

use issues_core::{Comment, Event, EventKind, Issue, IssueItem, StateFilter, User, UserSpec};
use issues_service::IssuesNav;

use crate::context::PageBase;
use crate::error::RenderResult;
use crate::templates::{RenderScope, TemplateSet};

/// Issue ID used by the sample data
pub const MOCK_ISSUE_ID: u64 = 123;

/// Context covering every template: pages and fragments alike
#[derive(Debug, Clone, Serialize)]
pub struct MockPage {
    #[serde(flatten)]
    pub base: PageBase,
    pub issue: Issue,
    pub issues: Vec<Issue>,
    pub nav: IssuesNav,
    pub comment: Comment,
    pub event: Event,
    pub items: Vec<IssueItem>,
}

pub fn mock_user() -> User {
    User {
        login: "shurcooL".to_string(),
        avatar_url: "https://avatars.githubusercontent.com/u/1924134?v=3&s=96".to_string(),
        html_url: "https://github.com/shurcooL".to_string(),
        ..User::new(UserSpec::new(0, "github.com"), "")
    }
}

pub fn mock_comment() -> Comment {
    let mut comment = Comment::new(
        0,
        mock_user(),
        "I've resolved this in [`4387efb`](https://www.example.com). \
         Please re-open or leave a comment if there's still room for improvement here.",
    );
    comment.created_at = Utc
        .timestamp_opt(1_443_244_474, 0)
        .single()
        .unwrap_or_else(Utc::now);
    comment
}

pub fn mock_event() -> Event {
    Event::new(1, mock_user(), EventKind::Closed)
}

pub fn mock_issue() -> Issue {
    Issue::new(MOCK_ISSUE_ID, "Mock issue.", mock_comment())
}

impl MockPage {
    pub fn new(base: PageBase) -> Self {
        let issue = mock_issue();
        let comment = mock_comment();
        let event = mock_event();
        Self {
            base,
            issues: vec![issue.clone()],
            nav: IssuesNav::new("", &[], StateFilter::Open, 1, 0),
            items: vec![
                IssueItem::Comment(comment.clone()),
                IssueItem::Event(event.clone()),
            ],
            issue,
            comment,
            event,
        }
    }
}

/// Render `template` (without its `.html` suffix) against the sample data
pub fn render_mock(
    templates: &TemplateSet,
    current_user: User,
    base_uri: &str,
    template: &str,
) -> RenderResult<String> {
    let scope = RenderScope::new(current_user, base_uri).with_issue(MOCK_ISSUE_ID);
    let scoped = templates.scoped(&scope);
    let page = MockPage::new(scoped.page_base(&format!("/mock/{template}")));
    scoped.render(&format!("{template}.html"), &page)
}
