//! # issues-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{Claims, JwtService, JwtUserDirectory};
pub use config::{
    AppConfig, AppSettings, AuthConfig, AuthMode, ConfigError, Environment, MountConfig,
    NotificationConfig, ServerConfig, StoreBackend, StoreConfig, UiConfig,
};
pub use error::{domain_status, AppError, AppResult};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
