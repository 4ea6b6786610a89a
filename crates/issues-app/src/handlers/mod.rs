//! Route handlers
//!
//! Page handlers compose a view state and render full HTML; action
//! handlers mutate through the issue service and answer with fragments.

pub mod actions;
pub mod health;
pub mod mock;
pub mod pages;

use issues_core::RequestContext;
use issues_render::{RenderScope, ScopedTemplates};
use issues_service::{PageRequest, PageState, ViewStateComposer};

use crate::response::ApiResult;
use crate::state::AppState;

/// Compose the view state for a request
pub(crate) async fn compose<'a>(
    state: &'a AppState,
    request: PageRequest,
) -> ApiResult<PageState<'a>> {
    let page = ViewStateComposer::new(state.service_context())
        .compose(&state.mount(), request)
        .await?;
    Ok(page)
}

/// Compose the view state of an action on issue `id`
pub(crate) async fn compose_issue<'a>(
    state: &'a AppState,
    ctx: RequestContext,
    req_path: &str,
    id: u64,
) -> ApiResult<PageState<'a>> {
    compose(state, PageRequest::new(ctx, req_path).with_issue(id)).await
}

/// Templates bound to the viewer and, if any, the current issue
pub(crate) fn scoped_templates(state: &AppState, page: &PageState<'_>) -> ScopedTemplates {
    let mut scope = RenderScope::new(page.current_user().clone(), page.base_uri());
    scope.issue_id = page.issue_id();
    state.templates().scoped(&scope)
}
