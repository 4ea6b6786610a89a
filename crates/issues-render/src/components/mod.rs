//! HTML components
//!
//! Each component renders from the narrow input it holds and nothing else;
//! none of them reads request state. All text and attribute values are
//! escaped here, so the output can be emitted verbatim.

mod badge;
mod entry;
mod event;
mod label;
mod nav;
mod time;
mod user;

pub use badge::{IssueBadge, IssueIcon};
pub use entry::IssueEntry;
pub use event::{EventIcon, EventText};
pub use label::LabelBadge;
pub use nav::{ClosedIssuesTab, IssuesNav, OpenIssuesTab};
pub use time::RelativeTime;
pub use user::{Avatar, UserLink};

/// Something that renders itself as an HTML snippet
pub trait Component {
    fn render(&self) -> String;
}

/// Octicon glyph span; the icon font is supplied by the embedder
pub(crate) fn octicon(name: &str) -> String {
    format!(r#"<span class="octicon octicon-{name}"></span>"#)
}

pub(crate) fn text(s: &str) -> std::borrow::Cow<'_, str> {
    html_escape::encode_text(s)
}

pub(crate) fn attr(s: &str) -> std::borrow::Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(s)
}
