//! # issues-service
//!
//! Application layer: turns a request into a read-only [`PageState`] with
//! lazily evaluated accessors, models the Open/Closed tab navigation, and
//! wraps the mutating issue use cases.

pub mod compose;
pub mod services;
pub mod tabs;

pub use compose::{PageRequest, PageState, ViewStateComposer};
pub use services::{
    require_mount, IssueService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult,
};
pub use tabs::{IssuesNav, Tab};
