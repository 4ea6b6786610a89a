//! Integration test utilities for the issue tracker
//!
//! This crate provides helpers for running end-to-end tests against the
//! real router backed by the in-memory store.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
