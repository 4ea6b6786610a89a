//! # issues-render
//!
//! Server-side rendering for the issue tracker.
//!
//! - [`TemplateSet`]: every page and fragment template, parsed once at
//!   startup together with the scope-free helpers
//! - [`ScopedTemplates`]: a per-request copy whose helpers know the viewer
//!   and the current issue
//! - [`components`]: small HTML components rendered straight from their
//!   inputs
//! - [`FragmentSet`]: named fragments for partial page updates

pub mod components;
pub mod context;
pub mod error;
pub mod fragments;
pub mod helpers;
pub mod mock;
pub mod templates;

pub use context::{ClientState, IndexPage, IssuePage, NewIssuePage, PageBase};
pub use error::{RenderError, RenderResult};
pub use fragments::FragmentSet;
pub use templates::{RenderScope, ScopedTemplates, TemplateSet, UiOptions};
