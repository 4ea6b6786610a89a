//! # issues-app
//!
//! Embeddable issue tracker web application built with Axum.
//!
//! [`create_app`] builds a self-contained router; an embedding application
//! can nest it under any base URI as long as the configured mount agrees.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::{AppState, MountResolver, StaticMount};
