//! Collaborator implementations

mod edit;
mod error;
mod fs;
mod memory;
mod notifications;
mod seed;
mod users;

pub use fs::FsIssueStore;
pub use memory::MemoryIssueStore;
pub use notifications::MemoryNotificationIndex;
pub use seed::seed_sample_issue;
pub use users::StaticUserDirectory;

/// Thread type under which both stores expose their issues to notifications
pub const ISSUES_THREAD_TYPE: &str = "issues";
