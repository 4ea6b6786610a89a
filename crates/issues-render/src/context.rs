//! Page contexts
//!
//! Serializable inputs for the page templates. Fragment templates take
//! ad-hoc contexts (`comment`, `event`, `issue`) built at the call site.

use serde::Serialize;

use issues_core::{Issue, IssueItem, User};
use issues_service::IssuesNav;

/// State handed to client-side code as a JSON object in the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientState {
    #[serde(rename = "BaseURI")]
    pub base_uri: String,
    #[serde(rename = "ReqPath")]
    pub req_path: String,
    #[serde(rename = "CurrentUser")]
    pub current_user: User,
    #[serde(rename = "DisableReactions")]
    pub disable_reactions: bool,
}

/// Fields shared by every full page
#[derive(Debug, Clone, Serialize)]
pub struct PageBase {
    pub req_path: String,
    pub state: ClientState,
}

/// Issue list
#[derive(Debug, Clone, Serialize)]
pub struct IndexPage {
    #[serde(flatten)]
    pub base: PageBase,
    pub issues: Vec<Issue>,
    pub nav: IssuesNav,
}

/// Single issue with its timeline
#[derive(Debug, Clone, Serialize)]
pub struct IssuePage {
    #[serde(flatten)]
    pub base: PageBase,
    pub issue: Issue,
    pub items: Vec<IssueItem>,
}

/// New issue form
#[derive(Debug, Clone, Serialize)]
pub struct NewIssuePage {
    #[serde(flatten)]
    pub base: PageBase,
}
