//! Issue mapper

use issues_core::{Issue, IssueState, Label};

use crate::models::{CommentRecord, IssueRecord};

impl IssueRecord {
    /// Issue entity stored under `id`. The reply count is derived by the
    /// caller from the comment files.
    pub fn into_issue(self, id: u64, replies: u32) -> Issue {
        Issue {
            id,
            state: IssueState::from(self.state),
            title: self.title,
            comment: self.comment.into_comment(0),
            labels: self.labels.into_iter().map(Label::from).collect(),
            replies,
            unread: false,
        }
    }
}

impl From<&Issue> for IssueRecord {
    fn from(issue: &Issue) -> Self {
        IssueRecord {
            state: issue.state.to_string(),
            title: issue.title.clone(),
            labels: issue.labels.iter().map(Into::into).collect(),
            comment: CommentRecord::from(&issue.comment),
        }
    }
}
