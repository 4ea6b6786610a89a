//! View-state composition
//!
//! A [`PageState`] is built fresh for every request. Composing it only
//! resolves the mount and the viewer; everything backed by the issue store
//! is fetched on demand by its accessors.

mod composer;
mod page_state;

pub use composer::{PageRequest, ViewStateComposer};
pub use page_state::PageState;
