//! # issues-core
//!
//! Domain layer for the issue tracker: issues, comments, events, reactions,
//! the value objects that scope a request, and the traits (ports) for the
//! storage, user and notification collaborators.
//! This crate has no dependency on the web framework or any storage engine.

pub mod entities;
pub mod error;
pub mod requests;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    sort_items, Comment, Edited, Event, EventKind, Issue, IssueItem, Label, Notification,
    NotificationFilter, Reaction, Rename, User, UserSpec,
};
pub use error::DomainError;
pub use requests::{CommentRequest, IssueRequest, NewIssue};
pub use traits::{IssueStore, NotificationIndex, RepoResult, ThreadTyped, UserDirectory};
pub use value_objects::{
    Credential, EmojiId, IssueState, Mount, RepoSpec, RequestContext, Rgb, StateFilter,
};
