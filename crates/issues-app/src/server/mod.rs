//! Server setup and initialization
//!
//! Provides the application builder and server runner.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use issues_common::{AppConfig, AppError, AuthMode, JwtService, JwtUserDirectory, StoreBackend};
use issues_core::{IssueStore, NotificationIndex, RepoSpec, User, UserDirectory, UserSpec};
use issues_render::{TemplateSet, UiOptions};
use issues_service::ServiceContextBuilder;
use issues_store::{
    seed_sample_issue, FsIssueStore, MemoryIssueStore, MemoryNotificationIndex,
    StaticUserDirectory,
};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::{AppState, StaticMount};

/// Build the complete Axum application with all routes and middleware.
///
/// Tracker routes are nested under the configured base URI so the links
/// the pages render resolve; `/health` stays at the root.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let tracker = create_router(config.ui.enable_mock);
    let router = match config.mount.base_uri.as_deref() {
        Some(base) if !base.is_empty() => Router::new().nest(base, tracker),
        _ => tracker,
    }
    .merge(health_routes());

    let timeout = Duration::from_secs(config.server.request_timeout_secs);
    apply_middleware(router, timeout).with_state(state)
}

/// Resolve the current user per the configured auth mode
fn create_user_directory(config: &AppConfig) -> Result<Arc<dyn UserDirectory>, AppError> {
    let directory: Arc<dyn UserDirectory> = match config.auth.mode {
        AuthMode::None => Arc::new(StaticUserDirectory::anonymous()),
        AuthMode::Static => Arc::new(StaticUserDirectory::new(static_user(config))),
        AuthMode::Jwt => {
            let secret = config
                .auth
                .jwt_secret
                .as_deref()
                .ok_or_else(|| AppError::config("JWT_SECRET is required when AUTH_MODE=jwt"))?;
            Arc::new(JwtUserDirectory::new(JwtService::new(
                secret,
                config.auth.token_expiry,
            )))
        }
    };
    Ok(directory)
}

fn static_user(config: &AppConfig) -> User {
    User::new(
        UserSpec::new(config.auth.static_user_id, config.auth.static_user_domain.clone()),
        config.auth.static_user_login.clone(),
    )
}

fn create_issue_store(
    config: &AppConfig,
    users: Arc<dyn UserDirectory>,
) -> Arc<dyn IssueStore> {
    match config.store.backend {
        StoreBackend::Memory => {
            let store = MemoryIssueStore::new(users);
            // A fresh development server starts with one sample issue
            if config.app.env.is_development() {
                if let Some(repo) = &config.mount.repo {
                    let id = seed_sample_issue(&store, &RepoSpec::new(repo), &static_user(config));
                    info!(issue_id = id, repo = %repo, "Seeded sample issue");
                }
            }
            info!("Using in-memory issue store");
            Arc::new(store)
        }
        StoreBackend::Fs => {
            info!(root = %config.store.data_dir.display(), "Using filesystem issue store");
            Arc::new(FsIssueStore::new(config.store.data_dir.clone(), users))
        }
    }
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let users = create_user_directory(&config)?;
    let issue_store = create_issue_store(&config, Arc::clone(&users));

    let mut builder = ServiceContextBuilder::new()
        .issue_store(issue_store)
        .users(Arc::clone(&users));
    if config.notifications.enabled {
        let index: Arc<dyn NotificationIndex> = Arc::new(MemoryNotificationIndex::new(users));
        builder = builder.notifications(index);
        info!("Notification index attached");
    }
    let service_context = builder.build().map_err(AppError::config)?;

    if config.mount.repo.is_none() || config.mount.base_uri.is_none() {
        warn!("Mount is incomplete; every page will answer with a configuration error");
    }
    if let Some(base) = config.mount.base_uri.as_deref() {
        if !base.is_empty() && !base.starts_with('/') {
            return Err(AppError::config(format!(
                "MOUNT_BASE_URI must be empty or start with '/', got {base:?}"
            )));
        }
    }
    let mount = Arc::new(StaticMount::from(&config.mount));

    let templates = TemplateSet::new(&UiOptions {
        head_pre: config.ui.head_pre.clone(),
        body_pre: config.ui.body_pre.clone(),
        disable_reactions: config.ui.disable_reactions,
    })
    .map_err(AppError::internal)?;

    Ok(AppState::new(service_context, templates, mount, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.server.address();

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, &addr).await
}
