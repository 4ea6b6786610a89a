//! On-disk record types
//!
//! These are the JSON shapes the filesystem store reads and writes. They are
//! kept apart from the domain entities so the file format can stay stable
//! while the entities evolve.

mod comment;
mod event;
mod issue;

pub use comment::{CommentRecord, EditedRecord, ReactionRecord, UserRecord};
pub use event::{EventRecord, LabelRecord, RenameRecord};
pub use issue::IssueRecord;
