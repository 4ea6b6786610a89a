//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use issues_app::{create_app, AppState, StaticMount};
use issues_common::AppConfig;
use issues_core::{Mount, NotificationIndex, UserDirectory};
use issues_render::{FragmentSet, TemplateSet, UiOptions};
use issues_service::ServiceContext;
use issues_store::{MemoryIssueStore, StaticUserDirectory};
use reqwest::{Client, Response, StatusCode};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{gopher, repo, BASE_URI};

/// Counter for unique test ports
static PORT_COUNTER: AtomicU16 = AtomicU16::new(19000);

/// Get a unique port for testing
pub fn get_test_port() -> u16 {
    PORT_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    /// The store behind the server, for seeding and inspection
    pub store: Arc<MemoryIssueStore>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server on which every request is signed in as `gopher`
    pub async fn start() -> Result<Self> {
        Self::start_with_users(Arc::new(StaticUserDirectory::new(gopher()))).await
    }

    /// Start a server on which nobody is signed in
    pub async fn start_anonymous() -> Result<Self> {
        Self::start_with_users(Arc::new(StaticUserDirectory::anonymous())).await
    }

    /// Start a test server resolving users through `users`
    pub async fn start_with_users(users: Arc<dyn UserDirectory>) -> Result<Self> {
        Self::start_with(users, None).await
    }

    /// Start a test server with an optional notification index
    pub async fn start_with(
        users: Arc<dyn UserDirectory>,
        notifications: Option<Arc<dyn NotificationIndex>>,
    ) -> Result<Self> {
        Self::start_at(users, notifications, BASE_URI).await
    }

    /// Start a server signed in as `gopher` with the tracker mounted under
    /// `base_uri`
    pub async fn start_mounted(base_uri: &str) -> Result<Self> {
        Self::start_at(Arc::new(StaticUserDirectory::new(gopher())), None, base_uri).await
    }

    async fn start_at(
        users: Arc<dyn UserDirectory>,
        notifications: Option<Arc<dyn NotificationIndex>>,
        base_uri: &str,
    ) -> Result<Self> {
        let store = Arc::new(MemoryIssueStore::new(Arc::clone(&users)));

        let mut builder = ServiceContext::builder()
            .issue_store(store.clone())
            .users(users);
        if let Some(index) = notifications {
            builder = builder.notifications(index);
        }
        let service_context = builder.build()?;

        let templates = TemplateSet::new(&UiOptions::default())?;
        let mount = Arc::new(StaticMount::new(Mount::new(repo(), base_uri)));
        let mut config = test_config()?;
        config.mount.base_uri = Some(base_uri.to_string());
        let state = AppState::new(service_context, templates, mount, config);

        // Build application
        let app = create_app(state);

        // Bind to port
        let addr = SocketAddr::from(([127, 0, 0, 1], get_test_port()));
        let listener = TcpListener::bind(addr).await?;
        let actual_addr = listener.local_addr()?;

        // Spawn server task
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Create HTTP client
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr: actual_addr,
            client,
            store,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with a bearer token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await?)
    }

    /// Make a GET request carrying the session cookie
    pub async fn get_with_cookie(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .get(&url)
            .header("Cookie", format!("access_token={token}"))
            .send()
            .await?)
    }

    /// Make a POST request with a JSON body
    pub async fn post_json<T: serde::Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request with a form body
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).form(form).send().await?)
    }
}

/// Create a test configuration
pub fn test_config() -> Result<AppConfig> {
    // Defaults only; the environment of the test run is ignored
    AppConfig::from_lookup(|_| None).map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    assert_text(response, expected_status).await.map(|_| ())
}

/// Assert response status and return the body
pub async fn assert_text(response: Response, expected_status: StatusCode) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;
    if status != expected_status {
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(body)
}

/// Assert response status and decode a fragment set
pub async fn assert_fragments(response: Response, expected_status: StatusCode) -> Result<FragmentSet> {
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = assert_text(response, expected_status).await?;
    if content_type.as_deref() != Some("application/x-www-form-urlencoded") {
        anyhow::bail!("Expected a form-encoded fragment set, got {content_type:?}");
    }
    Ok(FragmentSet::decode(&body)?)
}
