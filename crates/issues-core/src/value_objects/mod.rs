//! Value objects - immutable types that represent domain concepts

mod emoji;
mod issue_state;
mod mount;
mod request_context;
mod rgb;

pub use emoji::EmojiId;
pub use issue_state::{IssueState, StateFilter};
pub use mount::{Mount, RepoSpec};
pub use request_context::{Credential, RequestContext};
pub use rgb::Rgb;
