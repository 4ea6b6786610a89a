//! Domain entities - core business objects

mod comment;
mod event;
mod issue;
mod item;
mod label;
mod notification;
mod reaction;
mod user;

pub use comment::{Comment, Edited};
pub use event::{Event, EventKind, Rename};
pub use issue::Issue;
pub use item::{sort_items, IssueItem};
pub use label::Label;
pub use notification::{Notification, NotificationFilter};
pub use reaction::Reaction;
pub use user::{User, UserSpec};
