//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! the parsed templates, the mount resolver and the configuration.

mod mount;

pub use mount::{MountResolver, StaticMount};

use std::sync::Arc;

use issues_common::AppConfig;
use issues_core::Mount;
use issues_render::TemplateSet;
use issues_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all collaborators
    service_context: Arc<ServiceContext>,
    /// Templates parsed at startup; never mutated afterwards
    templates: Arc<TemplateSet>,
    mount: Arc<dyn MountResolver>,
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        service_context: ServiceContext,
        templates: TemplateSet,
        mount: Arc<dyn MountResolver>,
        config: AppConfig,
    ) -> Self {
        Self {
            service_context: Arc::new(service_context),
            templates: Arc::new(templates),
            mount,
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    /// Repository and base URI for the current request
    pub fn mount(&self) -> Mount {
        self.mount.resolve()
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("templates", &"TemplateSet")
            .field("mount", &self.mount.resolve())
            .field("config", &"AppConfig")
            .finish()
    }
}
