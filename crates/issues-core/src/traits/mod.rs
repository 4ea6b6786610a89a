//! Traits (ports) for the collaborators the tracker depends on

mod collaborators;

pub use collaborators::{IssueStore, NotificationIndex, RepoResult, ThreadTyped, UserDirectory};
