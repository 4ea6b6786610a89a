//! # issues-store
//!
//! Reference implementations of the collaborator traits defined in
//! `issues-core`:
//!
//! - [`MemoryIssueStore`]: volatile store, also usable as a test double
//! - [`FsIssueStore`]: JSON records on the local filesystem
//! - [`StaticUserDirectory`]: a fixed signed-in user
//! - [`MemoryNotificationIndex`]: per-user unread markers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use issues_store::{MemoryIssueStore, StaticUserDirectory};
//!
//! let users = Arc::new(StaticUserDirectory::new(gopher));
//! let store = MemoryIssueStore::new(users);
//! ```

pub mod mappers;
pub mod models;
pub mod repositories;

// Re-export commonly used types
pub use repositories::{
    seed_sample_issue, FsIssueStore, MemoryIssueStore, MemoryNotificationIndex,
    StaticUserDirectory, ISSUES_THREAD_TYPE,
};
