//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub mount: MountConfig,
    pub auth: AuthConfig,
    pub ui: UiConfig,
    pub notifications: NotificationConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests running longer than this are answered with 503
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which issue store backs the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Volatile in-memory store seeded with a sample issue
    #[default]
    Memory,
    /// JSON files under `StoreConfig::data_dir`
    Fs,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub data_dir: PathBuf,
}

/// Where the tracker is mounted.
///
/// Both values are optional; requests fail with a configuration error when
/// either is missing.
#[derive(Debug, Clone, Default)]
pub struct MountConfig {
    pub repo: Option<String>,
    pub base_uri: Option<String>,
}

/// How the current user is determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// No user directory; every viewer is anonymous
    None,
    /// A fixed user is always signed in
    #[default]
    Static,
    /// Users present a signed access token
    Jwt,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub mode: AuthMode,
    pub jwt_secret: Option<String>,
    pub token_expiry: i64,
    pub static_user_id: u64,
    pub static_user_login: String,
    pub static_user_domain: String,
}

/// Presentation options supplied by the embedder
#[derive(Debug, Clone, Default)]
pub struct UiConfig {
    /// Raw HTML inserted at the start of `<head>`
    pub head_pre: String,
    /// Raw HTML inserted at the start of `<body>`
    pub body_pre: String,
    pub disable_reactions: bool,
    /// Serve `/mock/{template}` previews
    pub enable_mock: bool,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationConfig {
    /// Attach the in-memory notification index
    pub enabled: bool,
}

// Default value functions
fn default_app_name() -> String {
    "issues".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data/issues")
}

fn default_token_expiry() -> i64 {
    86400 // 1 day
}

fn default_static_user_id() -> u64 {
    1
}

fn default_static_user_login() -> String {
    "gopher".to_string()
}

fn default_static_user_domain() -> String {
    "example.org".to_string()
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidValue(key, other.to_string())),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable holds an unusable value
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let env = match get("APP_ENV").map(|s| s.to_lowercase()).as_deref() {
            None | Some("development") => Environment::Development,
            Some("staging") => Environment::Staging,
            Some("production") => Environment::Production,
            Some(other) => return Err(ConfigError::InvalidValue("APP_ENV", other.to_string())),
        };

        let port = match get("HTTP_PORT") {
            Some(s) => s
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT", s))?,
            None => default_port(),
        };

        let backend = match get("STORE_BACKEND").map(|s| s.to_lowercase()).as_deref() {
            None | Some("memory") => StoreBackend::Memory,
            Some("fs") => StoreBackend::Fs,
            Some(other) => {
                return Err(ConfigError::InvalidValue("STORE_BACKEND", other.to_string()))
            }
        };

        let mode = match get("AUTH_MODE").map(|s| s.to_lowercase()).as_deref() {
            None | Some("static") => AuthMode::Static,
            Some("none") => AuthMode::None,
            Some("jwt") => AuthMode::Jwt,
            Some(other) => return Err(ConfigError::InvalidValue("AUTH_MODE", other.to_string())),
        };
        let jwt_secret = get("JWT_SECRET");
        if mode == AuthMode::Jwt && jwt_secret.is_none() {
            return Err(ConfigError::MissingVar("JWT_SECRET"));
        }

        let enable_mock = match get("UI_ENABLE_MOCK") {
            Some(v) => parse_bool("UI_ENABLE_MOCK", &v)?,
            None => env.is_development(),
        };

        Ok(Self {
            app: AppSettings {
                name: get("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            server: ServerConfig {
                host: get("HTTP_HOST").unwrap_or_else(default_host),
                port,
                request_timeout_secs: match get("HTTP_REQUEST_TIMEOUT") {
                    Some(s) => s
                        .parse::<u64>()
                        .ok()
                        .filter(|secs| *secs > 0)
                        .ok_or(ConfigError::InvalidValue("HTTP_REQUEST_TIMEOUT", s))?,
                    None => default_request_timeout_secs(),
                },
            },
            store: StoreConfig {
                backend,
                data_dir: get("STORE_DATA_DIR").map_or_else(default_data_dir, PathBuf::from),
            },
            mount: MountConfig {
                repo: get("MOUNT_REPO"),
                // An empty base URI is valid: it mounts the tracker at the site root.
                base_uri: lookup("MOUNT_BASE_URI").map(|s| s.trim_end_matches('/').to_string()),
            },
            auth: AuthConfig {
                mode,
                jwt_secret,
                token_expiry: match get("JWT_TOKEN_EXPIRY") {
                    Some(s) => s
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("JWT_TOKEN_EXPIRY", s))?,
                    None => default_token_expiry(),
                },
                static_user_id: match get("STATIC_USER_ID") {
                    Some(s) => s
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("STATIC_USER_ID", s))?,
                    None => default_static_user_id(),
                },
                static_user_login: get("STATIC_USER_LOGIN").unwrap_or_else(default_static_user_login),
                static_user_domain: get("STATIC_USER_DOMAIN")
                    .unwrap_or_else(default_static_user_domain),
            },
            ui: UiConfig {
                head_pre: lookup("UI_HEAD_PRE").unwrap_or_default(),
                body_pre: lookup("UI_BODY_PRE").unwrap_or_default(),
                disable_reactions: get("UI_DISABLE_REACTIONS")
                    .map(|v| parse_bool("UI_DISABLE_REACTIONS", &v))
                    .transpose()?
                    .unwrap_or(false),
                enable_mock,
            },
            notifications: NotificationConfig {
                enabled: get("NOTIFICATIONS_ENABLED")
                    .map(|v| parse_bool("NOTIFICATIONS_ENABLED", &v))
                    .transpose()?
                    .unwrap_or(false),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
