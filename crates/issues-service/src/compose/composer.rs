//! Request to page state

use tracing::{debug, instrument};

use issues_core::{Mount, RequestContext};

use super::page_state::PageState;
use crate::services::{require_mount, ServiceContext, ServiceResult};

/// What the router extracted from the request
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    pub context: RequestContext,
    /// Path relative to the mount; `"/"` and `""` both denote the mount root
    pub req_path: String,
    /// Raw query string without the leading `?`
    pub query: Option<String>,
    /// The `{id}` path variable, already parsed
    pub issue_id: Option<u64>,
}

impl PageRequest {
    pub fn new(context: RequestContext, req_path: impl Into<String>) -> Self {
        Self {
            context,
            req_path: req_path.into(),
            ..Self::default()
        }
    }

    pub fn with_query(mut self, query: Option<String>) -> Self {
        self.query = query;
        self
    }

    pub fn with_issue(mut self, id: u64) -> Self {
        self.issue_id = Some(id);
        self
    }
}

/// View-state composer
pub struct ViewStateComposer<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ViewStateComposer<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve the mount and the current user into a page state.
    ///
    /// Fails with a configuration error when the mount lacks a repository
    /// or base URI, and with the directory's error when the credential is
    /// rejected. No issue data is loaded here.
    #[instrument(skip(self, mount, request), fields(req_path = %request.req_path))]
    pub async fn compose(&self, mount: &Mount, request: PageRequest) -> ServiceResult<PageState<'a>> {
        let (repo, base_uri) = require_mount(mount)?;
        let current_user = self.ctx.current_user(&request.context).await?;

        let req_path = if request.req_path == "/" {
            String::new()
        } else {
            request.req_path
        };
        debug!(user_id = current_user.id, issue_id = ?request.issue_id, "page state composed");

        Ok(PageState::new(
            self.ctx,
            request.context,
            repo.clone(),
            base_uri.to_string(),
            req_path,
            request.query,
            request.issue_id,
            current_user,
        ))
    }
}
