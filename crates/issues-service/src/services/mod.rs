//! Business logic services
//!
//! The dependency container, the service error type and the mutating
//! issue use cases.

pub mod context;
pub mod error;
pub mod issue;

pub use context::{require_mount, ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use issue::IssueService;
