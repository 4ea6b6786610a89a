//! Issue record

use serde::{Deserialize, Serialize};

use super::{CommentRecord, LabelRecord};

/// Issue file `0` in an issue directory: the issue fields plus its opening
/// comment, flattened into one object.
///
/// There is no reply count and no unread flag; both are derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    pub state: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<LabelRecord>,
    #[serde(flatten)]
    pub comment: CommentRecord,
}
