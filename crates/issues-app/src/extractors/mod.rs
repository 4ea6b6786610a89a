//! Axum extractors for request handling
//!
//! Custom extractors for the caller's credential, path variables and
//! request bodies. Every rejection becomes an [`ApiError`](crate::response::ApiError).

mod body;
mod context;
mod path;

pub use body::{DeferredJson, FormBody, ReactionForm, ValueForm};
pub use context::{RequestCtx, ACCESS_TOKEN_COOKIE};
pub use path::{CommentPath, IssuePath, MockPath};
