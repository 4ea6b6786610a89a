//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, AuthConfig, AuthMode, ConfigError, Environment, MountConfig,
    NotificationConfig, ServerConfig, StoreBackend, StoreConfig, UiConfig,
};
